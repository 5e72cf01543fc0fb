use std::collections::BTreeMap;

use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookCategory, BookId, BookName};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresBookRepository;

#[async_trait::async_trait]
impl BookQuery for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        PgBookInternal::find_all(con).await
    }

    async fn count_by_category(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<BTreeMap<BookCategory, i64>, KernelError> {
        PgBookInternal::count_by_category(con).await
    }
}

#[async_trait::async_trait]
impl BookModifier for PostgresBookRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        PgBookInternal::create(con, book).await
    }
}

#[derive(sqlx::FromRow)]
struct BookRow {
    id: Uuid,
    name: String,
    category: String,
}

impl TryFrom<BookRow> for Book {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        Ok(Book::new(
            BookId::new(value.id),
            BookName::new(value.name)?,
            value.category.parse()?,
        ))
    }
}

#[derive(sqlx::FromRow)]
struct CategoryCountRow {
    category: String,
    count: i64,
}

pub(in crate::database) struct PgBookInternal;

impl PgBookInternal {
    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Book>, KernelError> {
        let rows = sqlx::query_as::<_, BookRow>(
            // language=postgresql
            r#"
            SELECT id, name, category
            FROM books
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Book::try_from).collect()
    }

    async fn count_by_category(
        con: &mut PgConnection,
    ) -> error_stack::Result<BTreeMap<BookCategory, i64>, KernelError> {
        let rows = sqlx::query_as::<_, CategoryCountRow>(
            // language=postgresql
            r#"
            SELECT category, COUNT(*) AS count
            FROM books
            GROUP BY category
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter()
            .map(|row| {
                row.category
                    .parse::<BookCategory>()
                    .map(|category| (category, row.count))
            })
            .collect()
    }

    async fn create(con: &mut PgConnection, book: &Book) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO books (id, name, category)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(book.id().as_ref())
        .bind(book.name().as_ref())
        .bind(book.category().as_str())
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }
}
