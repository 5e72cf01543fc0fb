use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{BookQuery, DependOnBookQuery};
use kernel::interface::update::{BookModifier, DependOnBookModifier};
use kernel::prelude::entity::{Book, BookId, BookName};
use kernel::KernelError;

use crate::transfer::{BookDto, BookStatisticsDto, CreateBookDto};

#[async_trait::async_trait]
pub trait CreateBookService: 'static + Sync + Send + DependOnBookModifier {
    async fn create_book(&self, dto: CreateBookDto) -> error_stack::Result<BookDto, KernelError> {
        let name = BookName::new(dto.name)?;
        let book = Book::new(BookId::new(Uuid::new_v4()), name, dto.category);

        let mut connection = self.database_connection().transact().await?;
        self.book_modifier().create(&mut connection, &book).await?;
        connection.commit().await?;

        Ok(BookDto::from(book))
    }
}

impl<T> CreateBookService for T where T: DependOnBookModifier {}

#[async_trait::async_trait]
pub trait GetBookService: 'static + Sync + Send + DependOnBookQuery {
    async fn get_books(&self) -> error_stack::Result<Vec<BookDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let books = self.book_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(books.into_iter().map(BookDto::from).collect())
    }
}

impl<T> GetBookService for T where T: DependOnBookQuery {}

#[async_trait::async_trait]
pub trait BookStatisticsService: 'static + Sync + Send + DependOnBookQuery {
    /// Ordered by category.
    async fn get_book_statistics(
        &self,
    ) -> error_stack::Result<Vec<BookStatisticsDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let counts = self.book_query().count_by_category(&mut connection).await?;
        connection.commit().await?;

        Ok(counts
            .into_iter()
            .map(|(category, count)| BookStatisticsDto { category, count })
            .collect())
    }
}

impl<T> BookStatisticsService for T where T: DependOnBookQuery {}
