use thiserror::Error;

/// Errors raised while setting up a simulation.
///
/// A diverging field is not an error; its energies are recorded as they come.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("wave speed must be finite, got {0}")]
    InvalidWaveSpeed(f64),
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
