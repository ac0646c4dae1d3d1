use thiserror::Error;

/// Errors raised while building or overriding a [`crate::FieldConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("drag coefficient must be in (0, 1], got {0}")]
    InvalidDrag(f32),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("max_particles must be at least 1")]
    ZeroCapacity,
    #[error("max_particles {0} exceeds the hard limit of {1}")]
    CapacityTooLarge(usize, usize),
    #[error("{field} range is empty ({min} > {max})")]
    EmptyRange {
        field: &'static str,
        min: f32,
        max: f32,
    },
    #[error("palette must contain at least one colour")]
    EmptyPalette,
    #[error("pointer bursts cannot be combined with a neuron network")]
    BurstWithNetwork,
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("invalid value `{value}` for option `{key}`")]
    InvalidValue { key: String, value: String },
    #[error("invalid colour `{0}` (expected #rrggbb)")]
    InvalidColor(String),
    #[error("unknown variant `{0}`")]
    UnknownVariant(String),
}
