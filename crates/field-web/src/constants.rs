// Host page integration constants

// Element mounted automatically by the start hook when present
pub const AUTO_MOUNT_ID: &str = "field-root";

// Dataset key (`data-variant`) naming the preset on a mount parent
pub const VARIANT_DATA_KEY: &str = "variant";

// Preset used when neither the caller nor the page names one
pub const DEFAULT_VARIANT: &str = "ambient";

// Dataset keys forwarded to `FieldConfig::apply_override`.
// camelCase because DOMStringMap maps `data-particle-count` to `particleCount`.
pub const OVERRIDE_KEYS: [&str; 14] = [
    "particleCount",
    "densityPx",
    "maxParticles",
    "connectionDistance",
    "connectEvery",
    "drag",
    "pointerRadius",
    "pointerStrength",
    "pointerActivity",
    "boundary",
    "palette",
    "renderer",
    "bloom",
    "seed",
];

// Inline style for the owned canvas: full viewport, behind content, never hit-tested
pub const CANVAS_CSS: &str = "position:fixed;left:0;top:0;width:100vw;height:100vh;\
display:block;pointer-events:none;z-index:-1";

pub const CANVAS_CLASS: &str = "field-canvas";

// Device pixel ratio is clamped so 4K+ displays don't blow up fill cost
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;
