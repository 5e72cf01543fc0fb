use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

/// Title of a book. Loan entries keep their own copy of it, so a book name
/// outlives the catalog record it was taken from.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookName(String);

impl BookName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable("book name must not be blank"));
        }
        Ok(Self(name))
    }
}
