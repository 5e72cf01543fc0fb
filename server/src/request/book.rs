use serde::Deserialize;

use application::transfer::CreateBookDto;
use kernel::prelude::entity::BookCategory;

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    name: String,
    category: BookCategory,
}

pub struct BookTransformer;

impl Intake<CreateBookRequest> for BookTransformer {
    type To = CreateBookDto;
    fn emit(&self, input: CreateBookRequest) -> Self::To {
        CreateBookDto {
            name: input.name,
            category: input.category,
        }
    }
}
