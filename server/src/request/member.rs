use serde::Deserialize;
use uuid::Uuid;

use application::transfer::{CreateMemberDto, DeleteMemberDto, RenameMemberDto};

use crate::controller::Intake;

#[derive(Debug, Deserialize)]
pub struct CreateMemberRequest {
    name: String,
    age: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct RenameMemberRequest {
    name: String,
}

/// Query string of `DELETE /members`.
#[derive(Debug, Deserialize)]
pub struct DeleteMemberRequest {
    name: String,
}

pub struct MemberTransformer;

impl Intake<CreateMemberRequest> for MemberTransformer {
    type To = CreateMemberDto;
    fn emit(&self, input: CreateMemberRequest) -> Self::To {
        CreateMemberDto {
            name: input.name,
            age: input.age,
        }
    }
}

impl Intake<(Uuid, RenameMemberRequest)> for MemberTransformer {
    type To = RenameMemberDto;
    fn emit(&self, input: (Uuid, RenameMemberRequest)) -> Self::To {
        let (id, input) = input;
        RenameMemberDto {
            id,
            name: input.name,
        }
    }
}

impl Intake<DeleteMemberRequest> for MemberTransformer {
    type To = DeleteMemberDto;
    fn emit(&self, input: DeleteMemberRequest) -> Self::To {
        DeleteMemberDto { name: input.name }
    }
}
