use sqlx::PgConnection;
use uuid::Uuid;

use kernel::interface::query::MemberQuery;
use kernel::interface::update::MemberModifier;
use kernel::prelude::entity::{Member, MemberAge, MemberId, MemberName};
use kernel::KernelError;

use crate::database::postgres::PostgresTransaction;
use crate::error::ConvertError;

pub struct PostgresMemberRepository;

#[async_trait::async_trait]
impl MemberQuery for PostgresMemberRepository {
    type Transaction = PostgresTransaction;

    async fn find_by_id(
        &self,
        con: &mut PostgresTransaction,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        PgMemberInternal::find_by_id(con, id).await
    }

    async fn find_by_name(
        &self,
        con: &mut PostgresTransaction,
        name: &MemberName,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        PgMemberInternal::find_by_name(con, name).await
    }

    async fn find_all(
        &self,
        con: &mut PostgresTransaction,
    ) -> error_stack::Result<Vec<Member>, KernelError> {
        PgMemberInternal::find_all(con).await
    }
}

#[async_trait::async_trait]
impl MemberModifier for PostgresMemberRepository {
    type Transaction = PostgresTransaction;

    async fn create(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::create(con, member).await
    }

    async fn update(
        &self,
        con: &mut PostgresTransaction,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::update(con, member).await
    }

    async fn delete(
        &self,
        con: &mut PostgresTransaction,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        PgMemberInternal::delete(con, member_id).await
    }
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    id: Uuid,
    name: String,
    age: Option<i32>,
}

impl TryFrom<MemberRow> for Member {
    type Error = error_stack::Report<KernelError>;
    fn try_from(value: MemberRow) -> Result<Self, Self::Error> {
        Ok(Member::new(
            MemberId::new(value.id),
            MemberName::new(value.name)?,
            value.age.map(MemberAge::new).transpose()?,
        ))
    }
}

pub(in crate::database) struct PgMemberInternal;

impl PgMemberInternal {
    async fn find_by_id(
        con: &mut PgConnection,
        id: &MemberId,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM members
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Member::try_from).transpose()
    }

    async fn find_by_name(
        con: &mut PgConnection,
        name: &MemberName,
    ) -> error_stack::Result<Option<Member>, KernelError> {
        let row = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM members
            WHERE name = $1
            ORDER BY seq
            LIMIT 1
            "#,
        )
        .bind(name.as_ref())
        .fetch_optional(con)
        .await
        .convert_error()?;
        row.map(Member::try_from).transpose()
    }

    async fn find_all(con: &mut PgConnection) -> error_stack::Result<Vec<Member>, KernelError> {
        let rows = sqlx::query_as::<_, MemberRow>(
            // language=postgresql
            r#"
            SELECT id, name, age
            FROM members
            ORDER BY seq
            "#,
        )
        .fetch_all(con)
        .await
        .convert_error()?;
        rows.into_iter().map(Member::try_from).collect()
    }

    async fn create(
        con: &mut PgConnection,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        sqlx::query(
            // language=postgresql
            r#"
            INSERT INTO members (id, name, age)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.name().as_ref())
        .bind((*member.age()).map(i32::from))
        .execute(con)
        .await
        .convert_error()?;
        Ok(())
    }

    async fn update(
        con: &mut PgConnection,
        member: &Member,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            UPDATE members
            SET name = $2, age = $3
            WHERE id = $1
            "#,
        )
        .bind(member.id().as_ref())
        .bind(member.name().as_ref())
        .bind((*member.age()).map(i32::from))
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable("member does not exist"));
        }
        Ok(())
    }

    async fn delete(
        con: &mut PgConnection,
        member_id: &MemberId,
    ) -> error_stack::Result<(), KernelError> {
        let result = sqlx::query(
            // language=postgresql
            r#"
            DELETE FROM members
            WHERE id = $1
            "#,
        )
        .bind(member_id.as_ref())
        .execute(con)
        .await
        .convert_error()?;
        if result.rows_affected() == 0 {
            return Err(error_stack::Report::new(KernelError::NotFound)
                .attach_printable("member does not exist"));
        }
        Ok(())
    }
}
