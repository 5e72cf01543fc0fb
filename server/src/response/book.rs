use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use application::transfer::{BookDto, BookStatisticsDto};
use kernel::prelude::entity::BookCategory;

use crate::controller::Exhaust;

#[derive(Debug, Serialize)]
pub struct BookResponse {
    id: Uuid,
    name: String,
    category: BookCategory,
}

impl From<BookDto> for BookResponse {
    fn from(value: BookDto) -> Self {
        Self {
            id: value.id,
            name: value.name,
            category: value.category,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedBookResponse(BookResponse);

impl IntoResponse for CreatedBookResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct BookStatisticsResponse {
    category: BookCategory,
    count: i64,
}

pub struct BookPresenter;

impl Exhaust<BookDto> for BookPresenter {
    type To = CreatedBookResponse;
    fn emit(&self, input: BookDto) -> Self::To {
        CreatedBookResponse(BookResponse::from(input))
    }
}

impl Exhaust<Vec<BookDto>> for BookPresenter {
    type To = Json<Vec<BookResponse>>;
    fn emit(&self, input: Vec<BookDto>) -> Self::To {
        Json(input.into_iter().map(BookResponse::from).collect())
    }
}

impl Exhaust<Vec<BookStatisticsDto>> for BookPresenter {
    type To = Json<Vec<BookStatisticsResponse>>;
    fn emit(&self, input: Vec<BookStatisticsDto>) -> Self::To {
        let result = input
            .into_iter()
            .map(|statistics| BookStatisticsResponse {
                category: statistics.category,
                count: statistics.count,
            })
            .collect::<Vec<_>>();

        Json(result)
    }
}
