use uuid::Uuid;

use kernel::prelude::entity::{DestructLoanEntry, LoanEntry, LoanStatus};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct LoanDto {
    pub id: Uuid,
    pub book_name: String,
    pub member_id: Uuid,
    pub status: LoanStatus,
}

impl From<LoanEntry> for LoanDto {
    fn from(value: LoanEntry) -> Self {
        let DestructLoanEntry {
            id,
            book_name,
            member_id,
            status,
        } = value.into_destruct();
        Self {
            id: id.into(),
            book_name: book_name.into(),
            member_id: member_id.into(),
            status,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoanBookDto {
    pub member_name: String,
    pub book_name: String,
}

#[derive(Debug, Clone)]
pub struct ReturnBookDto {
    pub member_name: String,
    pub book_name: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemberLoanHistoryDto {
    pub name: String,
    pub books: Vec<BookHistoryDto>,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookHistoryDto {
    pub name: String,
    pub is_returned: bool,
}
