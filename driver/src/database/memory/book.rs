use std::collections::BTreeMap;

use kernel::interface::query::BookQuery;
use kernel::interface::update::BookModifier;
use kernel::prelude::entity::{Book, BookCategory};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, Write};

pub struct InMemoryBookRepository;

#[async_trait::async_trait]
impl BookQuery for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Book>, KernelError> {
        Ok(con.view()?.books)
    }

    async fn count_by_category(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<BTreeMap<BookCategory, i64>, KernelError> {
        let counts = con
            .view()?
            .books
            .iter()
            .fold(BTreeMap::new(), |mut counts, book| {
                *counts.entry(*book.category()).or_insert(0) += 1;
                counts
            });
        Ok(counts)
    }
}

#[async_trait::async_trait]
impl BookModifier for InMemoryBookRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        book: &Book,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::CreateBook(book.clone()))
    }
}
