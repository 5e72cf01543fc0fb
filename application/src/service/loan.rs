use std::collections::HashMap;

use error_stack::{Report, ResultExt};
use uuid::Uuid;

use kernel::interface::database::{DatabaseConnection, DependOnDatabaseConnection, Transaction};
use kernel::interface::query::{DependOnLoanQuery, DependOnMemberQuery, LoanQuery, MemberQuery};
use kernel::interface::update::{DependOnLoanModifier, LoanModifier};
use kernel::prelude::entity::{BookName, LoanEntry, LoanId, LoanStatus, MemberId, MemberName};
use kernel::KernelError;

use crate::transfer::{
    BookHistoryDto, LoanBookDto, LoanDto, MemberLoanHistoryDto, ReturnBookDto,
};

#[async_trait::async_trait]
pub trait LoanBookService:
    'static + Sync + Send + DependOnMemberQuery + DependOnLoanQuery + DependOnLoanModifier
{
    /// Fails with [`KernelError::Conflict`] while another entry for the same
    /// book name is still loaned. The catalog is not consulted. A blank member
    /// name never resolves and fails with [`KernelError::NotFound`].
    async fn loan_book(&self, dto: LoanBookDto) -> error_stack::Result<LoanDto, KernelError> {
        let member_name = MemberName::new(dto.member_name)
            .change_context(KernelError::NotFound)
            .attach_printable("member does not exist")?;
        let book_name = BookName::new(dto.book_name)?;

        let mut connection = self.database_connection().transact().await?;
        let member = self
            .member_query()
            .find_by_name(&mut connection, &member_name)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound).attach_printable("member does not exist")
            })?;

        self.loan_modifier()
            .lock(&mut connection, &book_name)
            .await?;
        let active = self
            .loan_query()
            .find_active_by_book_name(&mut connection, &book_name)
            .await?;
        if active.is_some() {
            return Err(Report::new(KernelError::Conflict).attach_printable("book already on loan"));
        }

        let loan = LoanEntry::loan(LoanId::new(Uuid::new_v4()), book_name, member.id().clone());
        self.loan_modifier().create(&mut connection, &loan).await?;
        connection.commit().await?;

        Ok(LoanDto::from(loan))
    }
}

impl<T> LoanBookService for T where
    T: DependOnMemberQuery + DependOnLoanQuery + DependOnLoanModifier
{
}

#[async_trait::async_trait]
pub trait ReturnBookService:
    'static + Sync + Send + DependOnLoanQuery + DependOnLoanModifier
{
    /// Closes the active loan of the book, whoever holds it. `member_name`
    /// is accepted but not matched against the owner.
    async fn return_book(&self, dto: ReturnBookDto) -> error_stack::Result<(), KernelError> {
        let book_name = BookName::new(dto.book_name)
            .change_context(KernelError::NotFound)
            .attach_printable("no active loan for this book")?;

        let mut connection = self.database_connection().transact().await?;
        self.loan_modifier()
            .lock(&mut connection, &book_name)
            .await?;
        let mut loan = self
            .loan_query()
            .find_active_by_book_name(&mut connection, &book_name)
            .await?
            .ok_or_else(|| {
                Report::new(KernelError::NotFound)
                    .attach_printable("no active loan for this book")
                    .attach_printable(format!("returned by {}", dto.member_name))
            })?;
        loan.mark_returned()?;
        self.loan_modifier().update(&mut connection, &loan).await?;
        connection.commit().await?;

        Ok(())
    }
}

impl<T> ReturnBookService for T where T: DependOnLoanQuery + DependOnLoanModifier {}

#[async_trait::async_trait]
pub trait CountLoanedBookService: 'static + Sync + Send + DependOnLoanQuery {
    async fn count_loaned_books(&self) -> error_stack::Result<i64, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let count = self
            .loan_query()
            .count_by_status(&mut connection, &LoanStatus::Loaned)
            .await?;
        connection.commit().await?;
        Ok(count)
    }
}

impl<T> CountLoanedBookService for T where T: DependOnLoanQuery {}

#[async_trait::async_trait]
pub trait MemberLoanHistoryService:
    'static + Sync + Send + DependOnMemberQuery + DependOnLoanQuery
{
    /// One record per member, members without loans included. Books follow
    /// ledger order.
    async fn get_member_loan_histories(
        &self,
    ) -> error_stack::Result<Vec<MemberLoanHistoryDto>, KernelError> {
        let mut connection = self.database_connection().transact().await?;
        let members = self.member_query().find_all(&mut connection).await?;
        let loans = self.loan_query().find_all(&mut connection).await?;
        connection.commit().await?;

        let mut ledger: HashMap<MemberId, Vec<BookHistoryDto>> = HashMap::new();
        for loan in loans {
            let is_returned = loan.is_returned();
            let history = BookHistoryDto {
                name: loan.book_name().clone().into(),
                is_returned,
            };
            ledger
                .entry(loan.member_id().clone())
                .or_default()
                .push(history);
        }

        Ok(members
            .into_iter()
            .map(|member| MemberLoanHistoryDto {
                books: ledger.remove(member.id()).unwrap_or_default(),
                name: member.name().clone().into(),
            })
            .collect())
    }
}

impl<T> MemberLoanHistoryService for T where T: DependOnMemberQuery + DependOnLoanQuery {}

#[cfg(test)]
mod test {
    use driver::database::InMemoryDatabase;
    use kernel::prelude::entity::LoanStatus;
    use kernel::KernelError;

    use crate::service::{
        CountLoanedBookService, CreateMemberService, DeleteMemberService, LoanBookService,
        MemberLoanHistoryService, ReturnBookService,
    };
    use crate::transfer::{
        BookHistoryDto, CreateMemberDto, DeleteMemberDto, LoanBookDto, MemberLoanHistoryDto,
        ReturnBookDto,
    };

    async fn member(db: &InMemoryDatabase, name: &str) {
        db.create_member(CreateMemberDto {
            name: name.to_string(),
            age: None,
        })
        .await
        .unwrap();
    }

    fn loan(member: &str, book: &str) -> LoanBookDto {
        LoanBookDto {
            member_name: member.to_string(),
            book_name: book.to_string(),
        }
    }

    fn give_back(member: &str, book: &str) -> ReturnBookDto {
        ReturnBookDto {
            member_name: member.to_string(),
            book_name: book.to_string(),
        }
    }

    fn book(name: &str, is_returned: bool) -> BookHistoryDto {
        BookHistoryDto {
            name: name.to_string(),
            is_returned,
        }
    }

    #[tokio::test]
    async fn member_without_loans_is_listed() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;

        let histories = db.get_member_loan_histories().await?;
        assert_eq!(
            histories,
            vec![MemberLoanHistoryDto {
                name: "Alice".to_string(),
                books: vec![],
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn loan_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;

        let loaned = db.loan_book(loan("Alice", "Clean Code")).await?;
        assert_eq!(loaned.book_name, "Clean Code");
        assert_eq!(loaned.status, LoanStatus::Loaned);
        assert_eq!(db.count_loaned_books().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn loan_without_catalog_record() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        db.loan_book(loan("Alice", "Not In Catalog")).await?;
        assert_eq!(db.count_loaned_books().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn loan_by_unknown_member() {
        let db = InMemoryDatabase::new();
        let report = db
            .loan_book(loan("Nobody", "Clean Code"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(db.count_loaned_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn loan_blank_book_name() {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        let report = db.loan_book(loan("Alice", " ")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::InvalidArgument);
    }

    #[tokio::test]
    async fn loan_blank_member_name() {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        let report = db.loan_book(loan("  ", "Clean Code")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert_eq!(db.count_loaned_books().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn return_blank_book_name() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;

        let report = db.return_book(give_back("Alice", " ")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert!(format!("{report:?}").contains("no active loan for this book"));
        assert_eq!(db.count_loaned_books().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn loan_already_loaned_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        member(&db, "Bob").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;

        let report = db.loan_book(loan("Bob", "Clean Code")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        assert!(format!("{report:?}").contains("book already on loan"));

        assert_eq!(db.count_loaned_books().await?, 1);
        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories[0].books, vec![book("Clean Code", false)]);
        assert!(histories[1].books.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn return_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        member(&db, "Bob").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;
        assert!(db.loan_book(loan("Bob", "Clean Code")).await.is_err());

        db.return_book(give_back("Alice", "Clean Code")).await?;

        assert_eq!(db.count_loaned_books().await?, 0);
        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories[0].name, "Alice");
        assert_eq!(histories[0].books, vec![book("Clean Code", true)]);
        Ok(())
    }

    #[tokio::test]
    async fn return_twice() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;

        db.return_book(give_back("Alice", "Clean Code")).await?;
        let report = db
            .return_book(give_back("Alice", "Clean Code"))
            .await
            .unwrap_err();
        assert_eq!(report.current_context(), &KernelError::NotFound);
        assert!(format!("{report:?}").contains("no active loan for this book"));
        Ok(())
    }

    #[tokio::test]
    async fn return_is_not_matched_against_owner() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        member(&db, "Bob").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;

        db.return_book(give_back("Bob", "Clean Code")).await?;
        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories[0].books, vec![book("Clean Code", true)]);
        Ok(())
    }

    #[tokio::test]
    async fn loan_again_after_return() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        member(&db, "Bob").await;
        let first = db.loan_book(loan("Alice", "Clean Code")).await?;
        db.return_book(give_back("Alice", "Clean Code")).await?;
        let second = db.loan_book(loan("Bob", "Clean Code")).await?;
        assert_ne!(first.id, second.id);

        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories[0].books, vec![book("Clean Code", true)]);
        assert_eq!(histories[1].books, vec![book("Clean Code", false)]);
        assert_eq!(db.count_loaned_books().await?, 1);
        Ok(())
    }

    #[tokio::test]
    async fn history_keeps_ledger_flags() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Carol").await;
        db.loan_book(loan("Carol", "Book1")).await?;
        db.loan_book(loan("Carol", "Book2")).await?;
        db.loan_book(loan("Carol", "Book3")).await?;
        db.return_book(give_back("Carol", "Book3")).await?;

        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].name, "Carol");
        assert_eq!(
            histories[0].books,
            vec![
                book("Book1", false),
                book("Book2", false),
                book("Book3", true),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn deleted_member_keeps_book_on_loan() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        member(&db, "Bob").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;
        db.delete_member(DeleteMemberDto {
            name: "Alice".to_string(),
        })
        .await?;

        let histories = db.get_member_loan_histories().await?;
        assert_eq!(histories.len(), 1);
        assert_eq!(histories[0].name, "Bob");

        let report = db.loan_book(loan("Bob", "Clean Code")).await.unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Conflict);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_loans_of_one_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;

        let tasks = (0..16)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.loan_book(loan("Alice", "Clean Code")).await })
            })
            .collect::<Vec<_>>();

        let mut loaned = 0;
        for task in tasks {
            match task.await.expect("loan task panicked") {
                Ok(_) => loaned += 1,
                Err(report) => assert_eq!(report.current_context(), &KernelError::Conflict),
            }
        }
        assert_eq!(loaned, 1);
        assert_eq!(db.count_loaned_books().await?, 1);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_loans_of_distinct_books() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;

        let tasks = (0..8)
            .map(|i| {
                let db = db.clone();
                tokio::spawn(async move { db.loan_book(loan("Alice", &format!("Book{i}"))).await })
            })
            .collect::<Vec<_>>();
        for task in tasks {
            task.await.expect("loan task panicked")?;
        }
        assert_eq!(db.count_loaned_books().await?, 8);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_returns_of_one_book() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        member(&db, "Alice").await;
        db.loan_book(loan("Alice", "Clean Code")).await?;

        let tasks = (0..8)
            .map(|_| {
                let db = db.clone();
                tokio::spawn(async move { db.return_book(give_back("Alice", "Clean Code")).await })
            })
            .collect::<Vec<_>>();

        let mut returned = 0;
        for task in tasks {
            match task.await.expect("return task panicked") {
                Ok(()) => returned += 1,
                Err(report) => assert_eq!(report.current_context(), &KernelError::NotFound),
            }
        }
        assert_eq!(returned, 1);
        assert_eq!(db.count_loaned_books().await?, 0);
        Ok(())
    }
}
