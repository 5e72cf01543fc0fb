use serde::Deserialize;

use application::transfer::{LoanBookDto, ReturnBookDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBookRequest {
    member_name: String,
    book_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    member_name: String,
    book_name: String,
}

pub struct LoanTransformer;

impl Intake<LoanBookRequest> for LoanTransformer {
    type To = LoanBookDto;
    fn emit(&self, input: LoanBookRequest) -> Self::To {
        LoanBookDto {
            member_name: input.member_name,
            book_name: input.book_name,
        }
    }
}

impl Intake<ReturnBookRequest> for LoanTransformer {
    type To = ReturnBookDto;
    fn emit(&self, input: ReturnBookRequest) -> Self::To {
        ReturnBookDto {
            member_name: input.member_name,
            book_name: input.book_name,
        }
    }
}
