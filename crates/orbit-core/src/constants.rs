// Shared scene/interaction tuning constants used by the core and the web frontend.

// Scene layout
pub const RING_RADIUS_X: f32 = 7.0; // ellipse half-width of the default ring
pub const RING_RADIUS_Y: f32 = 3.2; // ellipse half-height of the default ring
pub const RING_DEPTH: f32 = 0.6; // z wobble of the ring
pub const INFINITY_RADIUS: f32 = 6.0; // lemniscate half-width
pub const INFINITY_LIFT: f32 = 2.5; // lemniscate vertical amplitude
pub const PATH_SEGMENTS: usize = 200; // samples in the visible orbit line

// Camera
pub const CAMERA_DISTANCE: f32 = 14.0;
pub const CAMERA_FOVY_DEG: f32 = 55.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const PITCH_LIMIT: f32 = 1.2; // radians, keeps the orbit camera off the poles

// Visual sizing
pub const IDLE_SCALE: f32 = 1.05; // idle icon size in world units
pub const HOVER_SCALE_FACTOR: f32 = 1.22 / 1.05; // hovered icon relative to idle
pub const SCALE_SMOOTHING_RATE: f32 = 12.0; // 1/s, exponential approach rate
pub const BACKDROP_WIDTH: f32 = 12.0;
pub const BACKDROP_HEIGHT: f32 = 6.6;
pub const BACKDROP_Z: f32 = -1.0;

// Animation
pub const ORBIT_SPEED: f32 = 0.019; // curve turns per second (~0.12 rad/s)
pub const MAX_FRAME_DELTA_SEC: f32 = 0.1; // clamp after tab regains focus
pub const GLOW_BASE: f32 = 0.65;
pub const GLOW_SWING: f32 = 0.18;
pub const GLOW_HZ: f32 = 6.0; // angular rate of the glow pulse
pub const LIGHT_BASE_INTENSITY: f32 = 1.2;
pub const LIGHT_PULSE: f32 = 0.15;

// Interaction
pub const PICK_RADIUS: f32 = 0.55; // ray-sphere radius relative to icon scale 1.0
pub const CLICK_DEBOUNCE_MS: f64 = 300.0;
pub const DRAG_SENSITIVITY: f32 = 0.006; // radians per CSS pixel
pub const CLICK_DRAG_TOLERANCE_PX: f32 = 6.0;

// Viewport routing
pub const MIN_WINDOW_SIZE_PX: f32 = 10.0; // smaller rects are not rendered
pub const MAX_WINDOWS: usize = 4;

// Tooltip placement
pub const TOOLTIP_OFFSET_PX: f32 = 18.0;
pub const TOOLTIP_WIDTH_PX: f32 = 220.0;
pub const TOOLTIP_HEIGHT_PX: f32 = 80.0;
pub const TOOLTIP_EDGE_MARGIN_PX: f32 = 15.0;

// Assets
pub const ICON_DIR: &str = "/static/img/tools";
pub const DEFAULT_TOOL_COLOR: u32 = 0x61dafb;
