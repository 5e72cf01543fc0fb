use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::LoanQuery;
use kernel::interface::update::LoanModifier;
use kernel::prelude::entity::{BookName, LoanEntry, LoanId, LoanStatus, MemberId};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresLoanRepository;

#[async_trait::async_trait]
impl LoanQuery for PostgresLoanRepository {
    type Transaction = PostgresTransaction;

    async fn find_active_by_book_name(
        &self,
        con: &mut PostgresTransaction,
        book_name: &BookName,
    ) -> error_stack::Result<Option<LoanEntry>, KernelError> {
        PgLoanInternal::find_active_by_book_name(con, book_name).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<LoanEntry>, KernelError> {
        PgLoanInternal::find_all(con).await
    }

    async fn count_by_status(
        &self,
        con: &mut PostgresTransaction,
        status: &LoanStatus,
    ) -> error_stack::Result<i64, KernelError> {
        PgLoanInternal::count_by_status(con, status).await
    }
}

#[async_trait::async_trait]
impl LoanModifier for PostgresLoanRepository {
    type Transaction = PostgresTransaction;

    async fn lock(
        &self,
        con: &mut PostgresTransaction,
        book_name: &BookName,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::lock(con, book_name).await
    }

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::create(con, loan).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        loan: &LoanEntry,
    ) -> error_stack::Result<(), KernelError> {
        PgLoanInternal::update(con, loan).await
    }
}

#[derive(sqlx::FromRow)]
struct LoanRow {
    id: Uuid,
    book_name: String,
    member_id: Uuid,
    status: String,
}

impl TryFrom<LoanRow> for LoanEntry {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: LoanRow) -> Result<Self, Self::Error> {
        Ok(LoanEntry::new(
            LoanId::new(value.id),
            BookName::new(value.book_name)?,
            MemberId::new(value.member_id),
            value.status.parse()?,
        ))
    }
}

pub(in crate::database) struct PgLoanInternal;

impl PgLoanInternal {
    /// Held until the surrounding transaction ends.
    #[tracing::instrument(skip(con))]
    async fn lock(
        con: &mut PgConnection,
        book_name: &BookName,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            SELECT pg_advisory_xact_lock(hashtext($1))
            "#,
        )
        .bind(book_name.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn find_active_by_book_name(
        con: &mut PgConnection,
        book_name: &BookName,
    ) -> error_stack::Result<Option<LoanEntry>, KernelError> {
        let row = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_name, member_id, status
            FROM loan_histories
            WHERE book_name = $1 AND status = $2
            "#,
        )
        .bind(book_name.as_ref())
        .bind(LoanStatus::Loaned.as_str())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(LoanEntry::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<LoanEntry>, KernelError> {
        let rows = sqlx::query_as::<_, LoanRow>(
            // language=postgresql
            r#"
            SELECT id, book_name, member_id, status
            FROM loan_histories
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(LoanEntry::try_from).collect()
    }

    async fn count_by_status(
        con: &mut PgConnection,
        status: &LoanStatus,
    ) -> error_stack::Result<i64, KernelError> {
        let count = sqlx::query_scalar::<_, i64>(
            // language=postgresql
            r#"
            SELECT COUNT(*)
            FROM loan_histories
            WHERE status = $1
            "#,
        )
        .bind(status.as_str())
        .fetch_one(con)
        .await
        .convert_error()?;
        Ok(count)
    }

    #[tracing::instrument(skip(con))]
    async fn create(con: &mut PgConnection, loan: &LoanEntry) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO loan_histories (id, book_name, member_id, status)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.book_name().as_ref())
        .bind(loan.member_id().as_ref())
        .bind(loan.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    #[tracing::instrument(skip(con))]
    async fn update(con: &mut PgConnection, loan: &LoanEntry) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE loan_histories
            SET status = $2
            WHERE id = $1
            "#,
        )
        .bind(loan.id().as_ref())
        .bind(loan.status().as_str())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable("loan does not exist"));
        }
        Ok(())
    }
}
