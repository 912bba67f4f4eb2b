use glam::{Quat, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    Linear,
    /// Cubic ease-in-out ("power3.inOut").
    CubicInOut,
}

impl Easing {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }
}

/// Eased camera-eye animation between two points around the origin.
///
/// The path sweeps the direction around the origin and interpolates the
/// distance, so the eye never cuts through the globe.
#[derive(Clone, Debug)]
pub struct CameraTween {
    from: Vec3,
    to: Vec3,
    duration: f32,
    elapsed: f32,
    easing: Easing,
}

impl CameraTween {
    pub fn new(from: Vec3, to: Vec3, duration_sec: f32, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration: duration_sec.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn destination(&self) -> Vec3 {
        self.to
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    /// Advance by `dt_sec` and return the eye position for the new time.
    pub fn step(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt_sec.max(0.0)).min(self.duration);
        self.sample()
    }

    pub fn sample(&self) -> Vec3 {
        let s = self.easing.apply(self.progress());
        if s >= 1.0 {
            return self.to;
        }
        orbit_lerp(self.from, self.to, s)
    }
}

fn orbit_lerp(from: Vec3, to: Vec3, s: f32) -> Vec3 {
    let (Some(from_dir), Some(to_dir)) = (from.try_normalize(), to.try_normalize()) else {
        return from.lerp(to, s);
    };
    let radius = from.length() + (to.length() - from.length()) * s;
    let arc = Quat::from_rotation_arc(from_dir, to_dir);
    let dir = Quat::IDENTITY.slerp(arc, s) * from_dir;
    dir.normalize_or_zero() * radius
}

/// Eye position hovering `offset` above the surface point of a globe of
/// `globe_radius`, looking back at the centre.
#[inline]
pub fn focus_eye(surface_point: Vec3, globe_radius: f32, offset: f32) -> Vec3 {
    surface_point.normalize_or_zero() * (globe_radius + offset)
}
