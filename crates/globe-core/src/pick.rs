use glam::Vec3;

/// World-space ray. `dir` is expected to be normalized.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[inline]
pub fn ray_sphere(ray: &Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = -b - sq;
    if t0 >= 0.0 {
        return Some(t0);
    }
    // origin inside the sphere: report the exit point
    let t1 = -b + sq;
    (t1 >= 0.0).then_some(t1)
}

/// Intersect a ray with a closed cylinder whose base disc is centred on
/// `base`, extending `height` along the unit vector `axis`.
///
/// Returns the nearest non-negative hit distance, caps included.
pub fn ray_capped_cylinder(
    ray: &Ray,
    base: Vec3,
    axis: Vec3,
    height: f32,
    radius: f32,
) -> Option<f32> {
    let o = ray.origin - base;
    let d = ray.dir;
    let od = o.dot(axis);
    let dd = d.dot(axis);
    let r2 = radius * radius;
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.map_or(true, |b| t < b) {
            best = Some(t);
        }
    };

    // Side wall: solve in the plane perpendicular to the axis.
    let d_perp = d - axis * dd;
    let o_perp = o - axis * od;
    let a = d_perp.length_squared();
    if a > 1e-12 {
        let b = 2.0 * o_perp.dot(d_perp);
        let c = o_perp.length_squared() - r2;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sq = disc.sqrt();
            for t in [(-b - sq) / (2.0 * a), (-b + sq) / (2.0 * a)] {
                let along = od + t * dd;
                if (0.0..=height).contains(&along) {
                    consider(t);
                }
            }
        }
    }

    // End caps.
    if dd.abs() > 1e-12 {
        for s in [0.0, height] {
            let t = (s - od) / dd;
            let p = o + d * t - axis * s;
            if p.length_squared() <= r2 {
                consider(t);
            }
        }
    }

    best
}
