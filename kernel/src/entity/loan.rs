mod id;
mod status;

pub use self::{id::*, status::*};
use destructure::Destructure;
use vodca::References;

use crate::entity::{BookName, MemberId};
use crate::KernelError;

/// One row of the loan ledger.
///
/// `book_name` is a snapshot taken when the loan starts and has no setter.
/// The only mutation an entry ever sees is [`LoanEntry::mark_returned`].
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct LoanEntry {
    id: LoanId,
    book_name: BookName,
    member_id: MemberId,
    status: LoanStatus,
}

impl LoanEntry {
    /// Rebuilds an entry that already exists in storage.
    pub fn new(id: LoanId, book_name: BookName, member_id: MemberId, status: LoanStatus) -> Self {
        Self {
            id,
            book_name,
            member_id,
            status,
        }
    }

    /// Starts a new loan. Entries always begin in [`LoanStatus::Loaned`].
    pub fn loan(id: LoanId, book_name: BookName, member_id: MemberId) -> Self {
        Self::new(id, book_name, member_id, LoanStatus::Loaned)
    }

    pub fn is_returned(&self) -> bool {
        self.status == LoanStatus::Returned
    }

    pub fn mark_returned(&mut self) -> error_stack::Result<(), KernelError> {
        self.status = self.status.returned()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use crate::entity::{BookName, LoanEntry, LoanId, LoanStatus, MemberId};
    use crate::KernelError;

    fn entry() -> LoanEntry {
        LoanEntry::loan(
            LoanId::new(Uuid::new_v4()),
            BookName::new("Clean Code").unwrap(),
            MemberId::new(Uuid::new_v4()),
        )
    }

    #[test]
    fn start_loaned() {
        let loan = entry();
        assert_eq!(loan.status(), &LoanStatus::Loaned);
        assert!(!loan.is_returned());
    }

    #[test]
    fn return_once() {
        let mut loan = entry();
        let before = loan.clone();
        loan.mark_returned().unwrap();
        assert!(loan.is_returned());
        assert_eq!(loan.book_name(), before.book_name());
        assert_eq!(loan.member_id(), before.member_id());

        let report = loan.mark_returned().unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        assert_eq!(loan.status(), &LoanStatus::Returned);
    }
}
