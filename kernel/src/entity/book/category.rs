use std::fmt::{Display, Formatter};
use std::str::FromStr;

use error_stack::Report;
use serde::{Deserialize, Serialize};

use crate::KernelError;

#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookCategory {
    Computer,
    Economy,
    Society,
    Language,
    Science,
}

impl BookCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookCategory::Computer => "COMPUTER",
            BookCategory::Economy => "ECONOMY",
            BookCategory::Society => "SOCIETY",
            BookCategory::Language => "LANGUAGE",
            BookCategory::Science => "SCIENCE",
        }
    }
}

impl Display for BookCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookCategory {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPUTER" => Ok(BookCategory::Computer),
            "ECONOMY" => Ok(BookCategory::Economy),
            "SOCIETY" => Ok(BookCategory::Society),
            "LANGUAGE" => Ok(BookCategory::Language),
            "SCIENCE" => Ok(BookCategory::Science),
            _ => Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("unknown book category: {s}"))),
        }
    }
}
