use error_stack::Report;
use vodca::{AsRefln, Fromln};

use crate::KernelError;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Fromln, AsRefln)]
pub struct MemberAge(i32);

impl MemberAge {
    pub fn new(age: impl Into<i32>) -> error_stack::Result<Self, KernelError> {
        let age = age.into();
        if age < 0 {
            return Err(Report::new(KernelError::InvalidArgument)
                .attach_printable(format!("member age must not be negative: {age}")));
        }
        Ok(Self(age))
    }
}

#[cfg(test)]
mod test {
    use crate::entity::MemberAge;
    use crate::KernelError;

    #[test]
    fn accept_zero_age() {
        let age = MemberAge::new(0).unwrap();
        assert_eq!(i32::from(age), 0);
    }

    #[test]
    fn reject_negative_age() {
        let report = MemberAge::new(-1).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidArgument);
    }
}
