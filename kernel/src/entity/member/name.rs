use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Fromln, AsRefln)]
pub struct MemberName(String);

impl MemberName {
    pub fn new(name: impl Into<String>) -> error_stack::Result<Self, KernelError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable("member name must not be blank"));
        }
        Ok(Self(name))
    }
}
