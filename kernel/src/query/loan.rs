use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{BookName, LoanEntry, LoanStatus};
use crate::KernelError;

#[async_trait::async_trait]
pub trait LoanQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_active_by_book_name(
        &self,
        con: &mut Self::Transaction,
        book_name: &BookName,
    ) -> error_stack::Result<Option<LoanEntry>, KernelError>;

    /// Every entry of the ledger in the order it was appended.
    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<LoanEntry>, KernelError>;

    async fn count_by_status(
        &self,
        con: &mut Self::Transaction,
        status: &LoanStatus,
    ) -> error_stack::Result<i64, KernelError>;
}

pub trait DependOnLoanQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type LoanQuery: LoanQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn loan_query(&self) -> &Self::LoanQuery;
}
