// DOM wiring and asset locations
pub const DEFAULT_CONTAINER_ID: &str = "globe-root";
pub const DETAILS_PANEL_ID: &str = "details-panel";
pub const GLOBE_TEXTURE_URL: &str = "/earthmap.jpg";
pub const MAX_TEXTURE_DIMENSION: u32 = 8192; // WebGPU default max_texture_dimension_2d

// Pointer interaction
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 4.0; // a click after more travel than this ends a drag
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 800.0;

// Frame pacing
pub const MAX_FRAME_DT_SEC: f32 = 0.1; // clamp after the tab was hidden

// Backdrop
pub const CLEAR_COLOR: [f64; 3] = [0.0, 0.0, 0.0];

