use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::LoanDto;
use kernel::prelude::entity::LoanStatus;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    id: Uuid,
    book_name: String,
    member_id: Uuid,
    status: LoanStatus,
}

impl IntoResponse for LoanResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct LoanedCountResponse {
    count: i64,
}

pub struct LoanPresenter;

impl Exhaust<LoanDto> for LoanPresenter {
    type To = LoanResponse;
    fn emit(&self, input: LoanDto) -> Self::To {
        LoanResponse {
            id: input.id,
            book_name: input.book_name,
            member_id: input.member_id,
            status: input.status,
        }
    }
}

impl Exhaust<()> for LoanPresenter {
    type To = StatusCode;
    fn emit(&self, _: ()) -> Self::To {
        StatusCode::NO_CONTENT
    }
}

impl Exhaust<i64> for LoanPresenter {
    type To = Json<LoanedCountResponse>;
    fn emit(&self, input: i64) -> Self::To {
        Json(LoanedCountResponse { count: input })
    }
}
