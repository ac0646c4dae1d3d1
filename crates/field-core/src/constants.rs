// Shared tuning constants used by the presets and both renderer families.

// Palettes (linear 0..1 RGB)
pub const NEON_PALETTE: [[f32; 3]; 3] = [
    [0.0, 0.953, 1.0],   // #00f3ff cyan
    [0.616, 0.306, 0.867], // #9d4edd purple
    [1.0, 0.0, 0.898],   // #ff00e5 magenta
];
pub const NEURON_PALETTE: [[f32; 3]; 2] = [
    [0.0, 0.953, 1.0], // #00f3ff
    [1.0, 0.0, 0.898], // #ff00e5
];
pub const NETWORK_PALETTE: [[f32; 3]; 2] = [
    [0.0, 1.0, 1.0], // #00ffff
    [0.702, 0.0, 1.0], // #b300ff
];
pub const PULSE_PALETTE: [[f32; 3]; 2] = [
    [1.0, 1.0, 1.0],   // white
    [0.0, 0.953, 1.0], // #00f3ff
];

// Hue bands (start degrees, span degrees)
pub const CYAN_PURPLE_BANDS: [(f32, f32); 2] = [(180.0, 40.0), (270.0, 40.0)];
pub const CYAN_BAND: [(f32, f32); 1] = [(180.0, 40.0)];

// Lightness used for hue-driven particles (hsl(h, 100%, 70%))
pub const HUE_LIGHTNESS: f32 = 0.7;
pub const HUE_SATURATION: f32 = 1.0;

// Pointer tracking
pub const POINTER_IDLE_MS: f64 = 100.0; // pointer counts as "moving" this long after an event
pub const POINTER_VELOCITY_DECAY: f32 = 0.95; // per-frame decay of tracked pointer velocity

// Hard limits shared by every preset
pub const ABSOLUTE_MAX_PARTICLES: usize = 4000;
pub const MAX_PULSES: usize = 512;

// Hue cycling: 0.1 degree per frame at 60 fps
pub const HUE_DEG_PER_SEC: f32 = 6.0;

// Camera used by volume variants
pub const CAMERA_FOVY_DEG: f32 = 75.0;
pub const CAMERA_Z: f32 = 30.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;

// Point-cloud sizes are authored as screen points; this maps them to world units
pub const VOLUME_SPRITE_SCALE: f32 = 0.05;

// Post-processing defaults
pub const BLOOM_STRENGTH: f32 = 0.9;
pub const BLOOM_THRESHOLD: f32 = 0.6;

// Longest frame gap folded into pointer steering, in seconds
pub const MAX_STEER_STEP_SEC: f32 = 0.1;
