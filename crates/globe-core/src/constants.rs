// Shared scene tuning constants used by the web frontend and the tests.

// Globe
pub const GLOBE_RADIUS: f32 = 1.0;
pub const GLOBE_SEGMENTS: u32 = 64; // both width and height segments
pub const GLOBE_FALLBACK_COLOR: [f32; 3] = [0.16, 0.28, 0.45]; // untextured globe

// Atmosphere shell drawn around the globe
pub const ATMOSPHERE_RADIUS: f32 = 1.03;
pub const ATMOSPHERE_COLOR: u32 = 0x87ceeb;
pub const ATMOSPHERE_OPACITY: f32 = 0.15;

// Lighting
pub const AMBIENT_LIGHT_COLOR: u32 = 0xbbbbbb;
pub const SUN_DIRECTION: [f32; 3] = [5.0, 3.0, 5.0]; // light position, normalized by the renderer
pub const SUN_INTENSITY: f32 = 1.0;

// Markers
pub const MARKER_COLOR: u32 = 0xff0000;
pub const MARKER_HOVER_COLOR: u32 = 0xffff00;
pub const MARKER_RADIUS: f32 = 0.01;
pub const MARKER_SEGMENTS: u32 = 8;
pub const MARKER_MIN_HEIGHT: f32 = 0.02;
pub const MARKER_MAX_HEIGHT: f32 = 0.2;
pub const MARKER_PICK_RADIUS: f32 = 0.012; // slightly wider than the drawn cylinder

// Camera
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_START_DISTANCE: f32 = 2.5;

// Orbit controls
pub const ORBIT_DAMPING_FACTOR: f32 = 0.05;
pub const ORBIT_MIN_DISTANCE: f32 = 1.1;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;

// Click-to-focus
pub const FOCUS_OFFSET: f32 = 0.5; // camera height above the surface point
pub const FOCUS_DURATION_SEC: f32 = 1.2;

// Starfield backdrop
pub const STAR_CANDIDATES: usize = 10_000;
pub const STAR_SPREAD: f32 = 200.0; // side of the sampling cube
pub const STAR_MIN_DISTANCE: f32 = 50.0;
pub const STAR_SEED: u64 = 0x5EED_57A2;

/// Convert a `0xRRGGBB` colour into linear-ish float RGB in \[0, 1\].
#[inline]
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
