// Front-end wiring and rendering constants: element ids, endpoints and GPU
// buffer layout. Scene tuning (radii, speeds, scales) lives in the core crate.

// Root container; the WebGPU canvas is created inside it
pub const ROOT_ID: &str = "three-global";

// Section windows the shared scene is drawn into
pub const SKILLS_WINDOW_ID: &str = "skills-3d";
pub const PROJECTS_WINDOW_ID: &str = "projects-3d";
pub const CONTACT_WINDOW_ID: &str = "contact-3d";

// Background starfield (2D canvas)
pub const STARS_CANVAS_ID: &str = "stars-canvas";
pub const STARS_SEED: u64 = 0x5eed;

// Hover details
pub const SIDEBAR_ID: &str = "tool-sidebar";
pub const SIDEBAR_NAME_ID: &str = "tool-name";
pub const SIDEBAR_CATEGORY_ID: &str = "tool-category";
pub const SIDEBAR_DESC_ID: &str = "tool-desc";
pub const SIDEBAR_TAGS_ID: &str = "tool-tags";
pub const TOOLTIP_ID: &str = "tool-tooltip";
pub const TOOLTIP_NAME_ID: &str = "tooltip-name";
pub const TOOLTIP_CATEGORY_ID: &str = "tooltip-category";
pub const TOOLTIP_DESC_ID: &str = "tooltip-description";

// Projects modal
pub const MODAL_ID: &str = "projects-modal";
pub const MODAL_TITLE_ID: &str = "modal-title";
pub const MODAL_BODY_ID: &str = "modal-body";
pub const MODAL_CLOSE_ID: &str = "modal-close";
pub const MODAL_TOOL_NAME_ID: &str = "modal-tool-name";
pub const MODAL_TOOL_CATEGORY_ID: &str = "modal-tool-category";
pub const MODAL_TOOL_DESCRIPTION_ID: &str = "modal-tool-description";

// Root element attributes
pub const CURVE_ATTR: &str = "data-curve";
pub const TOOLS_ENDPOINT_ATTR: &str = "data-tools-endpoint";
pub const HOVER_SCALE_ATTR: &str = "data-hover-scale";

// Endpoints
pub const PROJECTS_ENDPOINT: &str = "/api/projects/";
pub const TOOLS_ENDPOINT: &str = "/api/tools/";

// Icon texture array: every icon is rasterised to a square layer
pub const ICON_TEXTURE_SIZE: u32 = 128;
pub const MAX_ICON_LAYERS: u32 = 64;

// One uniform slot per window; offsets must honour the 256-byte dynamic
// offset alignment WebGPU requires.
pub const UNIFORM_SLOT_STRIDE: u64 = 256;

// Glow sprite drawn behind the hovered icon
pub const GLOW_SCALE: f32 = 1.9;
pub const GLOW_Z_OFFSET: f32 = 0.2;

// Orbit path line
pub const PATH_LINE_ALPHA: f32 = 0.22;

// Transparent clear so the starfield shows through
pub const CLEAR_RGBA: [f64; 4] = [0.0, 0.0, 0.0, 0.0];
