// D'Hondt highest-averages tabulation.

mod dhondt;

pub use dhondt::{allocate, Allocation, QuotientEntry};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AllocationError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, AllocationError>;
