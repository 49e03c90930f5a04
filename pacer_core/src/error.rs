use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PacerError {
    #[error("invalid rate {0}: must be finite and > 0")]
    InvalidRate(f64),
    #[error("baseline rate {configured} rounds to {rounded}; an integer rate >= 1 is required")]
    RoundsToZero { configured: f64, rounded: f64 },
    #[error("baseline rate {0} does not fit in u32")]
    TooLarge(f64),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
