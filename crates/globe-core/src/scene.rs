//! The globe scene context.
//!
//! [`GlobeScene`] is the explicitly owned state behind every scene operation:
//! camera, orbit controls, markers, the hover selection and any in-flight
//! focus animation. The web frontend constructs one per mount, feeds events
//! into it and drops it on teardown.

use crate::camera::{Camera, OrbitControls, Viewport};
use crate::constants::*;
use crate::dataset::LocationRecord;
use crate::hover::{HoverSelection, HoverTransition, SelectionSink};
use crate::marker::{MarkerId, MarkerSet};
use crate::tween::{focus_eye, CameraTween, Easing};
use glam::{Vec2, Vec3};

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub globe_radius: f32,
    pub camera_start_distance: f32,
    pub fov_degrees: f32,
    pub znear: f32,
    pub zfar: f32,
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub focus_offset: f32,
    pub focus_duration_sec: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            globe_radius: GLOBE_RADIUS,
            camera_start_distance: CAMERA_START_DISTANCE,
            fov_degrees: CAMERA_FOV_DEGREES,
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
            damping_factor: ORBIT_DAMPING_FACTOR,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            focus_offset: FOCUS_OFFSET,
            focus_duration_sec: FOCUS_DURATION_SEC,
        }
    }
}

pub struct GlobeScene {
    config: SceneConfig,
    viewport: Viewport,
    camera: Camera,
    controls: OrbitControls,
    markers: MarkerSet,
    hover: HoverSelection,
    focus: Option<CameraTween>,
}

impl GlobeScene {
    pub fn new(records: &[LocationRecord], viewport: Viewport, config: SceneConfig) -> Self {
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, config.camera_start_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.aspect(),
            fovy_radians: config.fov_degrees.to_radians(),
            znear: config.znear,
            zfar: config.zfar,
        };
        let mut controls =
            OrbitControls::new(config.min_distance, config.max_distance, config.damping_factor);
        controls.rotate_speed = config.rotate_speed;
        controls.zoom_speed = config.zoom_speed;
        let markers = MarkerSet::from_records(records, config.globe_radius);
        log::info!("[scene] built {} markers", markers.len());
        Self {
            config,
            viewport,
            camera,
            controls,
            markers,
            hover: HoverSelection::default(),
            focus: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hover.hovered()
    }

    pub fn hovered_record(&self) -> Option<&LocationRecord> {
        self.hover
            .hovered()
            .and_then(|id| self.markers.get(id))
            .map(|m| &m.record)
    }

    pub fn focus(&self) -> Option<&CameraTween> {
        self.focus.as_ref()
    }

    /// Nearest marker under a pointer position (CSS pixels). Non-marker
    /// geometry never occludes.
    pub fn pick(&self, pointer_px: Vec2) -> Option<MarkerId> {
        self.pick_ndc(self.viewport.to_ndc(pointer_px))
    }

    pub fn pick_ndc(&self, ndc: Vec2) -> Option<MarkerId> {
        let ray = self.camera.ray_through_ndc(ndc);
        self.markers.nearest_hit(&ray).map(|(id, _)| id)
    }

    pub fn pointer_move(
        &mut self,
        pointer_px: Vec2,
        sink: &mut dyn SelectionSink,
    ) -> HoverTransition {
        let hit = self.pick(pointer_px);
        let transition = self.hover.update(hit, &mut self.markers, sink);
        if transition != HoverTransition::Unchanged {
            log::debug!("[hover] {:?}", transition);
        }
        transition
    }

    /// Drop any hover highlight and tell `sink` the selection is gone.
    /// Nothing is reported when no marker is hovered.
    pub fn release_hover(&mut self, sink: &mut dyn SelectionSink) -> HoverTransition {
        self.hover.clear(&mut self.markers, sink)
    }

    /// Focus the camera on the marker under the pointer, if any.
    pub fn click(&mut self, pointer_px: Vec2) -> Option<MarkerId> {
        let id = self.pick(pointer_px)?;
        self.focus_on(id).then_some(id)
    }

    /// Start a camera animation toward `id`, replacing any running one.
    pub fn focus_on(&mut self, id: MarkerId) -> bool {
        let Some(marker) = self.markers.get(id) else {
            return false;
        };
        let destination = focus_eye(
            marker.position,
            self.config.globe_radius,
            self.config.focus_offset,
        );
        if self.focus.take().is_some() {
            log::debug!("[focus] replacing in-flight animation");
        }
        log::debug!(
            "[focus] {} -> eye ({:.3},{:.3},{:.3})",
            marker.record.name,
            destination.x,
            destination.y,
            destination.z
        );
        self.focus = Some(CameraTween::new(
            self.camera.eye,
            destination,
            self.config.focus_duration_sec,
            Easing::CubicInOut,
        ));
        true
    }

    pub fn orbit_drag(&mut self, delta_px: Vec2) {
        self.controls.rotate_by_pixels(delta_px, self.viewport.height);
    }

    pub fn zoom(&mut self, wheel_delta_y: f32) {
        self.controls.dolly(wheel_delta_y);
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.aspect = viewport.aspect();
    }

    /// Per-frame step: focus animation first, then control damping.
    pub fn advance(&mut self, dt_sec: f32) {
        if let Some(tween) = &mut self.focus {
            self.camera.eye = tween.step(dt_sec);
            if tween.is_finished() {
                self.focus = None;
            }
        }
        self.controls.update(&mut self.camera);
    }

    /// Pixel position of a world point, `None` when behind the camera.
    pub fn project_to_screen(&self, world: Vec3) -> Option<Vec2> {
        self.camera
            .project(world)
            .map(|ndc| self.viewport.from_ndc(ndc))
    }
}
