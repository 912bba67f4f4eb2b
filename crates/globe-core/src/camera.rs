//! Camera description, viewport mapping and damped orbit controls.
//!
//! These types avoid platform APIs so the web frontend and host tests share
//! them. The controls keep the camera on a sphere around a fixed target and
//! clamp its distance to a configured range.

use crate::pick::Ray;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::{PI, TAU};

/// Output surface size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel position (origin top-left) to normalized device coordinates.
    #[inline]
    pub fn to_ndc(&self, px: Vec2) -> Vec2 {
        Vec2::new(
            (px.x / self.width) * 2.0 - 1.0,
            -(px.y / self.height) * 2.0 + 1.0,
        )
    }

    #[inline]
    pub fn from_ndc(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        )
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn distance_to_target(&self) -> f32 {
        (self.eye - self.target).length()
    }

    /// World-space ray from the eye through a point given in NDC.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let p_far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        let far: Vec3 = p_far.truncate() / p_far.w;
        Ray::new(self.eye, far - self.eye)
    }

    /// Project a world-space point into NDC. `None` when it is behind the eye.
    pub fn project(&self, world: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

/// Orbit/zoom controls around a fixed target, with damping.
///
/// Input accumulates into pending deltas; [`OrbitControls::update`] applies a
/// `damping_factor` share of them per frame and decays the rest.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_distance: f32,
    pub max_distance: f32,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    theta_delta: f32,
    phi_delta: f32,
    scale: f32,
}

// keeps the polar angle off the poles so look_at stays well defined
const POLE_EPS: f32 = 1e-4;

impl OrbitControls {
    pub fn new(min_distance: f32, max_distance: f32, damping_factor: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            min_distance,
            max_distance,
            damping_factor: damping_factor.clamp(0.0, 1.0),
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            theta_delta: 0.0,
            phi_delta: 0.0,
            scale: 1.0,
        }
    }

    /// Queue a rotation from a pointer drag measured in pixels.
    pub fn rotate_by_pixels(&mut self, delta: Vec2, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        self.theta_delta -= TAU * delta.x / h * self.rotate_speed;
        self.phi_delta -= TAU * delta.y / h * self.rotate_speed;
    }

    /// Queue a zoom step; positive `wheel_delta_y` moves the camera away.
    pub fn dolly(&mut self, wheel_delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if wheel_delta_y > 0.0 {
            self.scale /= step;
        } else if wheel_delta_y < 0.0 {
            self.scale *= step;
        }
    }

    pub fn has_pending_motion(&self) -> bool {
        self.theta_delta.abs() > 1e-6 || self.phi_delta.abs() > 1e-6 || self.scale != 1.0
    }

    /// Apply pending input to the camera. Returns true if the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - self.target;
        let radius = offset.length();
        camera.target = self.target;
        if radius <= f32::EPSILON {
            return false;
        }

        let mut theta = offset.x.atan2(offset.z);
        let mut phi = (offset.y / radius).clamp(-1.0, 1.0).acos();
        theta += self.theta_delta * self.damping_factor;
        phi += self.phi_delta * self.damping_factor;
        phi = phi.clamp(POLE_EPS, PI - POLE_EPS);
        let new_radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            new_radius * sin_phi * theta.sin(),
            new_radius * phi.cos(),
            new_radius * sin_phi * theta.cos(),
        );
        camera.eye = self.target + new_offset;

        self.theta_delta *= 1.0 - self.damping_factor;
        self.phi_delta *= 1.0 - self.damping_factor;
        self.scale = 1.0;

        (new_offset - offset).length_squared() > 1e-12
    }
}
