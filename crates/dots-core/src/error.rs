/// Rejected tuning values.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ParamsError {
    #[error("grid must have at least one cell per side")]
    EmptyGrid,

    #[error("{name} must be longer than zero")]
    ZeroDuration { name: &'static str },

    #[error("{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
}
