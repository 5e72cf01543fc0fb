use uuid::Uuid;

use kernel::prelude::entity::{DestructMember, Member};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct MemberDto {
    pub id: Uuid,
    pub name: String,
    pub age: Option<i32>,
}

impl From<Member> for MemberDto {
    fn from(value: Member) -> Self {
        let DestructMember { id, name, age } = value.into_destruct();
        Self {
            id: id.into(),
            name: name.into(),
            age: age.map(i32::from),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateMemberDto {
    pub name: String,
    pub age: Option<i32>,
}

#[derive(Debug, Clone)]
pub struct RenameMemberDto {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct DeleteMemberDto {
    pub name: String,
}
