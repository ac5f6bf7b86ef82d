use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error, PartialEq)]
pub enum AxisError {
    #[error("invalid axis configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("date-time value at index {index} has no time slot")]
    MissingTimeSlot { index: usize },
}
