use axum::extract::{Path, Query, State};
use axum::routing::{get, patch};
use axum::{Json, Router};
use uuid::Uuid;

use application::service::{
    CreateMemberService, DeleteMemberService, GetMemberService, MemberLoanHistoryService,
    UpdateMemberService,
};

use crate::controller::{Controller, Exhaust};
use crate::error::ErrorStatus;
use crate::handler::AppModule;
use crate::request::{
    CreateMemberRequest, DeleteMemberRequest, MemberTransformer, RenameMemberRequest,
};
use crate::response::MemberPresenter;

pub trait MemberRouter {
    fn route_member(self) -> Self;
}

impl MemberRouter for Router<AppModule> {
    fn route_member(self) -> Self {
        self.route(
            "/members",
            get(|State(module): State<AppModule>| async move {
                module
                    .pgpool()
                    .get_members()
                    .await
                    .map(|members| MemberPresenter.emit(members))
                    .map_err(ErrorStatus::from)
            })
            .post(
                |State(module): State<AppModule>, Json(req): Json<CreateMemberRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().create_member(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            )
            .delete(
                |State(module): State<AppModule>, Query(req): Query<DeleteMemberRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake(req)
                        .handle(|dto| module.pgpool().delete_member(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/members/:id",
            patch(
                |State(module): State<AppModule>,
                 Path(id): Path<Uuid>,
                 Json(req): Json<RenameMemberRequest>| async move {
                    Controller::new(MemberTransformer, MemberPresenter)
                        .intake((id, req))
                        .handle(|dto| module.pgpool().rename_member(dto))
                        .await
                        .map_err(ErrorStatus::from)
                },
            ),
        )
        .route(
            "/members/loan-histories",
            get(|State(module): State<AppModule>| async move {
                module
                    .pgpool()
                    .get_member_loan_histories()
                    .await
                    .map(|histories| MemberPresenter.emit(histories))
                    .map_err(ErrorStatus::from)
            }),
        )
    }
}
