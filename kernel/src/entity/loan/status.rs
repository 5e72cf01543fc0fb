use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

/// Two-state lifecycle of a loan entry. `Loaned` is the initial state and
/// `Returned` is terminal.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Loaned,
    Returned,
}

impl LoanStatus {
    /// The single edge of the state machine.
    pub fn returned(self) -> error_stack::Result<Self, KernelError> {
        match self {
            LoanStatus::Loaned => Ok(LoanStatus::Returned),
            LoanStatus::Returned => Err(Report::new(KernelError::Conflict)
                .attach_printable("loan has already been returned")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Loaned => "LOANED",
            LoanStatus::Returned => "RETURNED",
        }
    }
}

impl Display for LoanStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOANED" => Ok(LoanStatus::Loaned),
            "RETURNED" => Ok(LoanStatus::Returned),
            _ => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("unknown loan status: {s}"))),
        }
    }
}
