use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use application::service::{BookStatisticsService, CreateBookService, GetBookService};

use crate::controller::{Controller, Exhaust};
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{BookTransformer, CreateBookRequest};
use crate::response::BookPresenter;

pub trait BookRouter {
    fn route_book(self) -> Self;
}

impl BookRouter for Router<AppModule> {
    fn route_book(self) -> Self {
        self.route(
            "/books",
            get(|State(module): State<AppModule>| async move {
                module
                    .pgpool()
                    .get_books()
                    .await
                    .map(|books| BookPresenter.emit(books))
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateBookRequest>| async move {
                    Controller::new(BookTransformer, BookPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().create_book(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/books/statistics",
            get(|State(module): State<AppModule>| async move {
                module
                    .pgpool()
                    .get_book_statistics()
                    .await
                    .map(|statistics| BookPresenter.emit(statistics))
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
