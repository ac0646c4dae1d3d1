pub mod animator;
pub mod camera;
pub mod config;
pub mod connector;
pub mod constants;
pub mod cosmetic;
pub mod draw;
pub mod error;
pub mod field;
pub mod input;
pub mod network;
pub mod particle;
pub mod stepper;
pub mod variant;
pub mod viewport;

pub static POINTS_WGSL: &str = include_str!("../shaders/points.wgsl");
pub static LINES_WGSL: &str = include_str!("../shaders/lines.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

pub use animator::{Animator, AnimatorState, FieldRenderer};
pub use camera::{Camera, FieldCamera, Projected};
pub use config::FieldConfig;
pub use connector::{Connector, Edge};
pub use draw::{DrawList, Ring, Segment, Sprite};
pub use error::ConfigError;
pub use field::FieldState;
pub use particle::{BoundaryPolicy, Bounds, Particle, ParticleColor};
pub use variant::Variant;
pub use viewport::{CountRule, Viewport};
