use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{MemberDto, MemberLoanHistoryDto};

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    id: Uuid,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    age: Option<i32>,
}

impl From<MemberDto> for MemberResponse {
    fn from(value: MemberDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            age: value.age,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedMemberResponse(MemberResponse);

impl IntoResponse for CreatedMemberResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct MemberLoanHistoryResponse {
    name: String,
    books: Vec<BookHistoryResponse>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookHistoryResponse {
    name: String,
    is_returned: bool,
}

pub struct MemberPresenter;

impl Exhaust<MemberDto> for MemberPresenter {
    type To = CreatedMemberResponse;
    fn emit(&self, input: MemberDto) -> Self::To {
        CreatedMemberResponse(MemberResponse::from(input))
    }
}

impl Exhaust<Vec<MemberDto>> for MemberPresenter {
    type To = Json<Vec<MemberResponse>>;
    fn emit(&self, input: Vec<MemberDto>) -> Self::To {
        Json(input.into_iter().map(MemberResponse::from).collect())
    }
}

impl Exhaust<()> for MemberPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<Vec<MemberLoanHistoryDto>> for MemberPresenter {
    type To = Json<Vec<MemberLoanHistoryResponse>>;
    fn emit(&self, input: Vec<MemberLoanHistoryDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(|history| MemberLoanHistoryResponse {
                name: history.name,
                books: history
                    .books
                    .into_iter()
                    .map(|book| BookHistoryResponse {
                        name: book.name,
                        is_returned: book.is_returned,
                    })
                    .collect(),
            })
            .collect::<Vec<_>>();

        Json(result)
    }
}
