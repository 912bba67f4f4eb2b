use glam::Vec2;

/// Pointer position relative to an element's bounding rect, in CSS pixels.
#[inline]
pub fn pointer_local_px(client_x: f32, client_y: f32, rect_left: f32, rect_top: f32) -> Vec2 {
    Vec2::new(client_x - rect_left, client_y - rect_top)
}

/// Normalize a wheel delta to pixels (`delta_mode`: 0 pixels, 1 lines, 2 pages).
#[inline]
pub fn wheel_delta_px(delta_y: f32, delta_mode: u32, line_px: f32, page_px: f32) -> f32 {
    match delta_mode {
        1 => delta_y * line_px,
        2 => delta_y * page_px,
        _ => delta_y,
    }
}

/// Orbit drag tracking between pointerdown and pointerup.
///
/// `travelled` survives `end()` so the click that follows a pointerup can
/// tell a drag from a tap.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub active: bool,
    pub last: Vec2,
    pub travelled: f32,
}

impl DragState {
    pub fn begin(&mut self, at: Vec2) {
        self.active = true;
        self.last = at;
        self.travelled = 0.0;
    }

    /// Movement since the previous position while dragging.
    pub fn move_to(&mut self, at: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = at - self.last;
        self.last = at;
        self.travelled += delta.length();
        Some(delta)
    }

    pub fn end(&mut self) {
        self.active = false;
    }

    pub fn suppresses_click(&self, tolerance_px: f32) -> bool {
        self.travelled > tolerance_px
    }
}
