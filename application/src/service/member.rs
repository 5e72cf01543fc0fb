use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnMemberQuery, MemberQuery};
use kernel::interface::update::{DependOnMemberModifier, MemberModifier};
use kernel::prelude::entity::{Member, MemberAge, MemberId, MemberName};
use kernel::KernelError;

use crate::transfer::{CreateMemberDto, DeleteMemberDto, MemberDto, RenameMemberDto};

#[async_trait::async_trait]
pub trait CreateMemberService: 'static + Sync + Send + DependOnMemberModifier {
    async fn create_member(
        &self,
        dto: CreateMemberDto,
    ) -> error_stack::Result<MemberDto, KernelError> {
        let name = MemberName::new(dto.name)?;
        let age = dto.age.map(MemberAge::new).transpose()?;
        let member = Member::new(MemberId::new(Uuid::new_v4()), name, age);

        let mut connection = self.database_connection().transact().await?;
        self.member_modifier()
            .create(&mut connection, &member)
            .await?;
        connection.commit().await?;

        Ok(MemberDto::from(member))
    }
}

impl<T> CreateMemberService for T where T: DependOnMemberModifier {}

#[async_trait::async_trait]
pub trait GetMemberService: 'static + Sync + Send + DependOnMemberQuery {
    async fn get_members(&self) -> error_stack::Result<Vec<MemberDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let members = self.member_query().find_all(&mut connection).await?;
        connection.commit().await?;

        Ok(members.into_iter().map(MemberDto::from).collect())
    }
}

impl<T> GetMemberService for T where T: DependOnMemberQuery {}

#[async_trait::async_trait]
pub trait UpdateMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier
{
    async fn rename_member(&self, dto: RenameMemberDto) -> error_stack::Result<(), KernelError> {
        let name = MemberName::new(dto.name)?;
        let id = MemberId::new(dto.id);

        let mut connection = self.database_connection().transact().await?;
        let mut member = self
            .member_query()
            .find_by_id(&mut connection, &id)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable(format!("member {} does not exist", dto.id))
            })?;
        member.substitute(|member| *member.name = name);
        self.member_modifier()
            .update(&mut connection, &member)
            .await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<T> UpdateMemberService for T where T: DependOnMemberQuery + DependOnMemberModifier {}

#[async_trait::async_trait]
pub trait DeleteMemberService:
    'static + Sync + Send + DependOnMemberQuery + DependOnMemberModifier
{
    /// A blank name never resolves and fails with [`KernelError::NotFound`].
    async fn delete_member(&self, dto: DeleteMemberDto) -> error_stack::Result<(), KernelError> {
        let name = MemberName::new(dto.name)
            .change_context(KernelError::NotFound)
            .attach_printable("member does not exist")?;

        let mut connection = self.database_connection().transact().await?;
        let member = self
            .member_query()
            .find_by_name(&mut connection, &name)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("member does not exist")
            })?;
        self.member_modifier()
            .delete(&mut connection, member.id())
            .await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<T> DeleteMemberService for T where T: DependOnMemberQuery + DependOnMemberModifier {}

#[cfg(test)]
mod test {
    use uuid::Uuid;

    use driver::database::InMemoryDatabase;
    use kernel::KernelError;

    use crate::service::{
        CreateMemberService, DeleteMemberService, GetMemberService, UpdateMemberService,
    };
    use crate::transfer::{CreateMemberDto, DeleteMemberDto, RenameMemberDto};

    fn request(name: &str, age: Option<i32>) -> CreateMemberDto {
        CreateMemberDto {
            name: name.to_string(),
            age,
        }
    }

    #[tokio::test]
    async fn create_member() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = db.create_member(request("Alice", None)).await?;
        assert_eq!(created.name, "Alice");
        assert_eq!(created.age, None);

        let members = db.get_members().await?;
        assert_eq!(members, vec![created]);
        Ok(())
    }

    #[tokio::test]
    async fn list_in_registration_order() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.create_member(request("A", Some(20))).await?;
        db.create_member(request("B", None)).await?;

        let members = db
            .get_members()
            .await?
            .into_iter()
            .map(|member| (member.name, member.age))
            .collect::<Vec<_>>();
        assert_eq!(
            members,
            vec![("A".to_string(), Some(20)), ("B".to_string(), None)]
        );
        Ok(())
    }

    #[tokio::test]
    async fn reject_invalid_member() {
        let db = InMemoryDatabase::new();
        let blank = db.create_member(request("", None)).await.unwrap_err();
        assert_eq!(blank.current_context(), &KernelError::InvalidArgument);

        let negative = db.create_member(request("A", Some(-3))).await.unwrap_err();
        assert_eq!(negative.current_context(), &KernelError::InvalidArgument);

        assert!(db.get_members().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn rename_member() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let created = db.create_member(request("A", Some(31))).await?;

        db.rename_member(RenameMemberDto {
            id: created.id,
            name: "B".to_string(),
        })
        .await?;

        let members = db.get_members().await?;
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].id, created.id);
        assert_eq!(members[0].name, "B");
        assert_eq!(members[0].age, Some(31));
        Ok(())
    }

    #[tokio::test]
    async fn rename_unknown_member() {
        let db = InMemoryDatabase::new();
        let report = db
            .rename_member(RenameMemberDto {
                id: Uuid::new_v4(),
                name: "B".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
    }

    #[tokio::test]
    async fn delete_member() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.create_member(request("A", None)).await?;

        db.delete_member(DeleteMemberDto {
            name: "A".to_string(),
        })
        .await?;
        assert!(db.get_members().await?.is_empty());

        let report = db
            .delete_member(DeleteMemberDto {
                name: "A".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        Ok(())
    }

    #[tokio::test]
    async fn delete_blank_name() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        db.create_member(request("A", None)).await?;

        let report = db
            .delete_member(DeleteMemberDto {
                name: " ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(db.get_members().await?.len(), 1);
        Ok(())
    }
}
