use crate::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use crate::entity::{Member, MemberId, MemberName};
use crate::KernelError;

#[async_trait::async_trait]
pub trait MemberQuery: 'static + Sync + Send {
    type Transaction: Transaction;
    async fn find_by_id(
        &self,
        con: &mut Self::Transaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError>;

    /// Names are not unique. The earliest registered match wins.
    async fn find_by_name(
        &self,
        con: &mut Self::Transaction,
        name: &MemberName,
    ) -> error_stack::Result<Option<Member>, KernelError>;

    async fn find_all(
        &self,
        con: &mut Self::Transaction,
    ) -> error_stack::Result<Vec<Member>, KernelError>;
}

pub trait DependOnMemberQuery: 'static + Sync + Send + DependOnDatabaseConnection {
    type MemberQuery: MemberQuery<
        Transaction = <Self::DatabaseConnection as DatabaseConnection>::Transaction,
    >;
    fn member_query(&self) -> &Self::MemberQuery;
}
