use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};

use application::service::{CountLoanedBookService, LoanBookService, ReturnBookService};

use crate::controller::{Controller, Exhaust};
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{LoanBookRequest, LoanTransformer, ReturnBookRequest};
use crate::response::LoanPresenter;

pub trait LoanRouter {
    fn route_loan(self) -> Self;
}

impl LoanRouter for Router<AppModule> {
    fn route_loan(self) -> Self {
        self.route(
            "/books/loan",
            post(
                |State(module): State<AppModule>, Json(req): Json<LoanBookRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().loan_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/return",
            post(
                |State(module): State<AppModule>, Json(req): Json<ReturnBookRequest>| async move {
                    Controller::new(LoanTransformer, LoanPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().return_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/loaned-count",
            get(|State(module): State<AppModule>| async move {
                module
                    .pgpool()
                    .count_loaned_books()
                    .await
                    .map(|count| LoanPresenter.emit(count))
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
