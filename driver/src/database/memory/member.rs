use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberId, MemberName};
use kernel::KernelError;

use crate::database::memory::{InMemoryTransaction, Write};

pub struct InMemoryMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;

    async fn find_by_id(
        &self,
        con: &mut InMemoryTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con
            .view()?
            .members
            .into_iter()
            .find(|member| member.id() == id))
    }

    async fn find_by_name(
        &self,
        con: &mut InMemoryTransaction,
        name: &MemberName,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        Ok(con
            .view()?
            .members
            .into_iter()
            .find(|member| member.name() == name))
    }

    async fn find_all(
        &self,
        con: &mut InMemoryTransaction,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        Ok(con.view()?.members)
    }
}

#[async_trait::async_trait]
impl MemberModifier for InMemoryMemberRepository {
    type Transaction = InMemoryTransaction;

    async fn create(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::CreateMember(member.clone()))
    }

    async fn update(
        &self,
        con: &mut InMemoryTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::UpdateMember(member.clone()))
    }

    async fn delete(
        &self,
        con: &mut InMemoryTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        con.stage(Write::DeleteMember(member_id.clone()))
    }
}
