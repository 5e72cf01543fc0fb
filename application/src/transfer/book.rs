use uuid::Uuid;

use kernel::prelude::entity::{Book, BookCategory, DestructBook};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookDto {
    pub id: Uuid,
    pub name: String,
    pub category: BookCategory,
}

impl From<Book> for BookDto {
    fn from(value: Book) -> Self {
        let DestructBook { id, name, category } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            category,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateBookDto {
    pub name: String,
    pub category: BookCategory,
}

/// Number of catalog records in one category.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BookStatisticsDto {
    pub category: BookCategory,
    pub count: i64,
}
