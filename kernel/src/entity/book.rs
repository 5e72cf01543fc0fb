mod category;
mod id;
mod name;

pub use self::{category::*, id::*, name::*};
use destructure::Destructure;
use vodca::References;

/// A catalog record. Nothing about a book changes after registration.
#[derive(Debug, Clone, Eq, PartialEq, References, Destructure)]
pub struct Book {
    id: BookId,
    name: BookName,
    category: BookCategory,
}

impl Book {
    pub fn new(id: BookId, name: BookName, category: BookCategory) -> Self {
        Self { id, name, category }
    }
}
