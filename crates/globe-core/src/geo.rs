//! Geographic to scene-space conversions.
//!
//! The globe is y-up: latitude 90 sits on `+Y` and longitude grows eastward
//! around the vertical axis. The azimuth carries a fixed 180° offset, so
//! `lon = 0` lands on `+X`, `lon = 90` on `-Z` and the ±180° seam on `-X`.

use glam::Vec3;

/// Project a latitude/longitude pair (degrees) onto a sphere of `radius`.
///
/// Inputs are not clamped; out-of-range values follow the same trigonometric
/// identities as in-range ones.
#[inline]
pub fn lat_lon_to_cartesian(lat: f64, lon: f64, radius: f32) -> Vec3 {
    let phi = (90.0 - lat).to_radians();
    let theta = (lon + 180.0).to_radians();
    let r = radius as f64;
    let x = -(r * phi.sin() * theta.cos());
    let z = r * phi.sin() * theta.sin();
    let y = r * phi.cos();
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Unit outward normal at a latitude/longitude.
#[inline]
pub fn surface_normal(lat: f64, lon: f64) -> Vec3 {
    lat_lon_to_cartesian(lat, lon, 1.0).normalize_or_zero()
}

/// Inverse of [`lat_lon_to_cartesian`]: returns `(lat, lon)` in degrees with
/// `lon` in `(-180, 180]`. The origin maps to `(0, 0)`.
pub fn cartesian_to_lat_lon(p: Vec3) -> (f64, f64) {
    let (x, y, z) = (p.x as f64, p.y as f64, p.z as f64);
    let r = (x * x + y * y + z * z).sqrt();
    if r == 0.0 {
        return (0.0, 0.0);
    }
    let lat = 90.0 - (y / r).clamp(-1.0, 1.0).acos().to_degrees();
    // x = -s*cos(theta), z = s*sin(theta)
    let theta = z.atan2(-x).to_degrees();
    let mut lon = theta - 180.0;
    if lon <= -180.0 {
        lon += 360.0;
    }
    (lat, lon)
}
