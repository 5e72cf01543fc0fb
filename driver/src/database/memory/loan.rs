use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookName, LoanEntry, LoanStatus};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, Write};

pub struct InMemoryLoanRepository;

#[async_trait::async_trait]
impl LoanQuery for InMemoryLoanRepository {
    type Transaction = InMemoryTransaction;

    async fn find_active_by_book_name(
        &self,
        con: &mut InMemoryTransaction,
        book_name: &BookName,
    ) -> error_stack::Result<Option<LoanEntry>, KernelError> {
        Ok(con.view()?.loans.into_iter().find(|loan| {
            loan.status() == &LoanStatus::Loaned && loan.book_name() == book_name
        }))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<LoanEntry>, KernelError> {
        Ok(con.view()?.loans)
    }

    async fn count_by_status(
        &self,
        con: &mut InMemoryTransaction,
        status: &LoanStatus,
    ) -> error_stack::Result<i64, KernelError> {
        let count = con
            .view()?
            .loans
            .iter()
            .filter(|loan| loan.status() == status)
            .count();
        Ok(count as i64)
    }
}

#[async_trait::async_trait]
impl LoanModifier for InMemoryLoanRepository {
    type Transaction = InMemoryTransaction;

    async fn lock(
        &self,
        con: &mut InMemoryTransaction,
        book_name: &BookName,
    ) -> error_stack::Result<(), KernelError> {
        let key: &String = book_name.as_ref();
        con.lock(key).await
    }

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::CreateLoan(loan.clone()))
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::UpdateLoan(loan.clone()))
    }
}
