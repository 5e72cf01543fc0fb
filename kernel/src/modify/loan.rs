use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookName, LoanEntry};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanModifier: 'static + Sync + Send {
    type Transaction: Transaction;

    /// Serializes every transaction touching `book_name` until `con` ends.
    /// Must be taken before reading the active loan of that book.
    async fn lock(
        &self,
        con: &mut Self::Transaction,
        book_name: &BookName,
    ) -> error_stack::Result<(), KernelError>;

    /// Appends to the ledger. A second active entry for the same book name
    /// fails with [`KernelError::Conflict`].
    async fn create(
        &self,
        con: &mut Self::Transaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError>;

    /// Persists the status of an existing entry.
    async fn update(
        &self,
        con: &mut Self::Transaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError>;
}

pub trait DependOnLoanModifier: 'static + Sync + Send + DependOnDatabaseConnection {
    type LoanModifier: LoanModifier<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn loan_modifier(&self) -> &Self::LoanModifier;
}
