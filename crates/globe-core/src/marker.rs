//! Markers: the visual proxies for location records.

use crate::constants::{
    rgb_from_hex, MARKER_COLOR, MARKER_HOVER_COLOR, MARKER_MAX_HEIGHT, MARKER_MIN_HEIGHT,
    MARKER_PICK_RADIUS,
};
use crate::dataset::{max_value, LocationRecord};
use crate::geo::lat_lon_to_cartesian;
use crate::pick::{ray_capped_cylinder, Ray};
use glam::{Mat4, Quat, Vec3};

/// Index of a marker inside its [`MarkerSet`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub usize);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Highlight {
    #[default]
    Normal,
    Hovered,
}

#[derive(Clone, Debug)]
pub struct Marker {
    pub id: MarkerId,
    pub record: LocationRecord,
    /// Surface point the marker stands on.
    pub position: Vec3,
    /// Unit outward normal; the cylinder extrudes along it.
    pub normal: Vec3,
    pub height: f32,
    base_color: [f32; 3],
    highlight: Highlight,
}

impl Marker {
    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    pub fn is_hovered(&self) -> bool {
        self.highlight == Highlight::Hovered
    }

    pub fn set_highlight(&mut self, highlight: Highlight) {
        self.highlight = highlight;
    }

    pub fn base_color(&self) -> [f32; 3] {
        self.base_color
    }

    /// Colour to draw with right now.
    pub fn color(&self) -> [f32; 3] {
        match self.highlight {
            Highlight::Normal => self.base_color,
            Highlight::Hovered => rgb_from_hex(MARKER_HOVER_COLOR),
        }
    }

    pub fn tip(&self) -> Vec3 {
        self.position + self.normal * self.height
    }

    /// Model matrix for a unit cylinder spanning `y ∈ [0, 1]`.
    pub fn model_matrix(&self) -> Mat4 {
        let rotation = Quat::from_rotation_arc(Vec3::Y, self.normal);
        Mat4::from_scale_rotation_translation(
            Vec3::new(1.0, self.height, 1.0),
            rotation,
            self.position,
        )
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray_capped_cylinder(ray, self.position, self.normal, self.height, MARKER_PICK_RADIUS)
    }
}

/// Height for a value normalized against the set maximum.
#[inline]
pub fn marker_height(value: f64, max_value: f64) -> f32 {
    if max_value <= 0.0 || !value.is_finite() {
        return MARKER_MIN_HEIGHT;
    }
    let normalized = (value / max_value) as f32;
    (normalized * MARKER_MAX_HEIGHT).max(MARKER_MIN_HEIGHT)
}

#[derive(Clone, Debug, Default)]
pub struct MarkerSet {
    markers: Vec<Marker>,
}

impl MarkerSet {
    pub fn from_records(records: &[LocationRecord], globe_radius: f32) -> Self {
        let max = max_value(records);
        let base_color = rgb_from_hex(MARKER_COLOR);
        let markers = records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                let position = lat_lon_to_cartesian(record.lat, record.lon, globe_radius);
                let normal = position.try_normalize().unwrap_or(Vec3::Y);
                Marker {
                    id: MarkerId(i),
                    record: record.clone(),
                    position,
                    normal,
                    height: marker_height(record.value, max),
                    base_color,
                    highlight: Highlight::Normal,
                }
            })
            .collect();
        Self { markers }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id.0)
    }

    pub fn get_mut(&mut self, id: MarkerId) -> Option<&mut Marker> {
        self.markers.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Marker> {
        self.markers.iter()
    }

    pub fn hovered_count(&self) -> usize {
        self.markers.iter().filter(|m| m.is_hovered()).count()
    }

    /// Nearest marker along the ray. Ties go to the lower index.
    pub fn nearest_hit(&self, ray: &Ray) -> Option<(MarkerId, f32)> {
        let mut best = None::<(MarkerId, f32)>;
        for m in &self.markers {
            if let Some(t) = m.intersect(ray) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((m.id, t)),
                }
            }
        }
        best
    }
}
