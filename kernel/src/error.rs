use std::fmt::Display;

use error_stack::Context;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum KernelError {
    /// The requested change collides with the current state (e.g. the book is already on loan).
    Conflict,
    /// A referenced member or active loan does not exist.
    NotFound,
    /// Input rejected by a value object constructor.
    InvalidArgument,
    Concurrency,
    Timeout,
    Internal,
}

impl Display for KernelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KernelError::Conflict => write!(f, "Conflicting state"),
            KernelError::NotFound => write!(f, "Resource not found"),
            KernelError::InvalidArgument => write!(f, "Invalid argument"),
            KernelError::Concurrency => write!(f, "Concurrency error"),
            KernelError::Timeout => write!(f, "Process timed out"),
            KernelError::Internal => write!(f, "Internal kernel error"),
        }
    }
}

impl Context for KernelError {}
