use crate::constants::{STAR_CANDIDATES, STAR_MIN_DISTANCE, STAR_SEED, STAR_SPREAD};
use glam::Vec3;
use rand::prelude::*;

/// Sample `candidates` points uniformly in a cube of side `spread` centred on
/// the origin and keep those farther than `min_distance` from it.
pub fn generate_starfield(candidates: usize, spread: f32, min_distance: f32, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let half = spread * 0.5;
    let mut stars = Vec::with_capacity(candidates);
    for _ in 0..candidates {
        let p = Vec3::new(
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
            rng.gen_range(-half..=half),
        );
        if p.length() > min_distance {
            stars.push(p);
        }
    }
    stars
}

pub fn default_starfield() -> Vec<Vec3> {
    generate_starfield(STAR_CANDIDATES, STAR_SPREAD, STAR_MIN_DISTANCE, STAR_SEED)
}
