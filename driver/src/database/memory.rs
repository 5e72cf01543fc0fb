//! Process-local storage.
//!
//! Writes made through an [`InMemoryTransaction`] are staged and become
//! visible to other transactions only on commit, all at once. Locks taken
//! through [`InMemoryTransaction::lock`] are held until the transaction ends.

mod book;
mod loan;
mod member;

pub use self::{book::*, loan::*, member::*};

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use error_stack::Report;
use tokio::sync::OwnedMutexGuard;

use kernel::interface::database::{DatabaseConnection, Transaction};
use kernel::interface::query::{
    DependOnBookQuery, DependOnLoanQuery, DependOnMemberQuery,
};
use kernel::interface::update::{
    DependOnBookModifier, DependOnLoanModifier, DependOnMemberModifier,
};
use kernel::prelude::entity::{Book, LoanEntry, LoanStatus, Member, MemberId};
use kernel::KernelError;

#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    store: Arc<Store>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Default)]
struct Store {
    tables: Mutex<Tables>,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl Store {
    fn tables(&self) -> error_stack::Result<MutexGuard<'_, Tables>, KernelError> {
        self.tables.lock().map_err(|_| {
            Report::new(KernelError::Internal).attach_printable("in-memory tables are poisoned")
        })
    }

    fn lock_for(&self, key: &str) -> error_stack::Result<Arc<tokio::sync::Mutex<()>>, KernelError> {
        let mut locks = self.locks.lock().map_err(|_| {
            Report::new(KernelError::Internal).attach_printable("in-memory locks are poisoned")
        })?;
        Ok(Arc::clone(locks.entry(key.to_string()).or_default()))
    }

    /// Drops the lock of `key` once nobody holds or waits on it.
    fn release(&self, key: &str) {
        let Ok(mut locks) = self.locks.lock() else {
            return;
        };
        if locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(key);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(in crate::database) struct Tables {
    books: Vec<Book>,
    members: Vec<Member>,
    loans: Vec<LoanEntry>,
}

#[derive(Debug, Clone)]
pub(in crate::database) enum Write {
    CreateBook(Book),
    CreateMember(Member),
    UpdateMember(Member),
    DeleteMember(MemberId),
    CreateLoan(LoanEntry),
    UpdateLoan(LoanEntry),
}

impl Tables {
    fn apply(&mut self, write: Write) -> error_stack::Result<(), KernelError> {
        match write {
            Write::CreateBook(book) => self.books.push(book),
            Write::CreateMember(member) => self.members.push(member),
            Write::UpdateMember(member) => {
                let stored = self
                    .members
                    .iter_mut()
                    .find(|stored| stored.id() == member.id())
                    .ok_or_else(|| {
                        Report::new(KernelError::NotFound).attach_printable("member does not exist")
                    })?;
                *stored = member;
            }
            Write::DeleteMember(id) => {
                let before = self.members.len();
                self.members.retain(|member| member.id() != &id);
                if self.members.len() == before {
                    return Err(
                        Report::new(KernelError::NotFound).attach_printable("member does not exist")
                    );
                }
            }
            Write::CreateLoan(loan) => {
                if loan.status() == &LoanStatus::Loaned
                    && self.loans.iter().any(|stored| {
                        stored.status() == &LoanStatus::Loaned
                            && stored.book_name() == loan.book_name()
                    })
                {
                    return Err(
                        Report::new(KernelError::Conflict).attach_printable("book already on loan")
                    );
                }
                self.loans.push(loan);
            }
            Write::UpdateLoan(loan) => {
                let stored = self
                    .loans
                    .iter_mut()
                    .find(|stored| stored.id() == loan.id())
                    .ok_or_else(|| {
                        Report::new(KernelError::NotFound).attach_printable("loan does not exist")
                    })?;
                *stored = loan;
            }
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl DatabaseConnection for InMemoryDatabase {
    type Transaction = InMemoryTransaction;
    async fn transact(&self) -> error_stack::Result<Self::Transaction, KernelError> {
        Ok(InMemoryTransaction {
            store: Arc::clone(&self.store),
            pending: Vec::new(),
            guards: Vec::new(),
        })
    }
}

pub struct InMemoryTransaction {
    store: Arc<Store>,
    pending: Vec<Write>,
    guards: Vec<(String, OwnedMutexGuard<()>)>,
}

impl InMemoryTransaction {
    /// Committed state with this transaction's own writes on top.
    pub(in crate::database) fn view(&self) -> error_stack::Result<Tables, KernelError> {
        let mut tables = self.store.tables()?.clone();
        for write in &self.pending {
            tables.apply(write.clone())?;
        }
        Ok(tables)
    }

    /// Rejects the write right away if it cannot apply to the current view.
    pub(in crate::database) fn stage(&mut self, write: Write) -> error_stack::Result<(), KernelError> {
        self.view()?.apply(write.clone())?;
        self.pending.push(write);
        Ok(())
    }

    pub(in crate::database) async fn lock(&mut self, key: &str) -> error_stack::Result<(), KernelError> {
        let lock = self.store.lock_for(key)?;
        let guard = lock.lock_owned().await;
        self.guards.push((key.to_string(), guard));
        Ok(())
    }
}

#[async_trait::async_trait]
impl Transaction for InMemoryTransaction {
    async fn commit(mut self) -> error_stack::Result<(), KernelError> {
        let pending = std::mem::take(&mut self.pending);
        let mut tables = self.store.tables()?;
        let mut staged = tables.clone();
        for write in pending {
            staged.apply(write)?;
        }
        *tables = staged;
        Ok(())
    }

    async fn roll_back(self) -> error_stack::Result<(), KernelError> {
        Ok(())
    }
}

impl Drop for InMemoryTransaction {
    fn drop(&mut self) {
        for (key, guard) in self.guards.drain(..) {
            drop(guard);
            self.store.release(&key);
        }
    }
}

impl DependOnBookQuery for InMemoryDatabase {
    type BookQuery = InMemoryBookRepository;
    fn book_query(&self) -> &Self::BookQuery {
        &InMemoryBookRepository
    }
}

impl DependOnBookModifier for InMemoryDatabase {
    type BookModifier = InMemoryBookRepository;
    fn book_modifier(&self) -> &Self::BookModifier {
        &InMemoryBookRepository
    }
}

impl DependOnMemberQuery for InMemoryDatabase {
    type MemberQuery = InMemoryMemberRepository;
    fn member_query(&self) -> &Self::MemberQuery {
        &InMemoryMemberRepository
    }
}

impl DependOnMemberModifier for InMemoryDatabase {
    type MemberModifier = InMemoryMemberRepository;
    fn member_modifier(&self) -> &Self::MemberModifier {
        &InMemoryMemberRepository
    }
}

impl DependOnLoanQuery for InMemoryDatabase {
    type LoanQuery = InMemoryLoanRepository;
    fn loan_query(&self) -> &Self::LoanQuery {
        &InMemoryLoanRepository
    }
}

impl DependOnLoanModifier for InMemoryDatabase {
    type LoanModifier = InMemoryLoanRepository;
    fn loan_modifier(&self) -> &Self::LoanModifier {
        &InMemoryLoanRepository
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use uuid::Uuid;

    use kernel::interface::database::{DatabaseConnection, Transaction};
    use kernel::interface::query::MemberQuery;
    use kernel::interface::update::MemberModifier;
    use kernel::prelude::entity::{Member, MemberId, MemberName};
    use kernel::KernelError;

    use crate::database::memory::{InMemoryDatabase, InMemoryMemberRepository};

    fn member(name: &str) -> Member {
        Member::new(
            MemberId::new(Uuid::new_v4()),
            MemberName::new(name).unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn invisible_until_commit() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut writer = db.transact().await?;
        InMemoryMemberRepository
            .create(&mut writer, &member("Alice"))
            .await?;
        assert_eq!(
            InMemoryMemberRepository.find_all(&mut writer).await?.len(),
            1
        );

        let mut reader = db.transact().await?;
        assert!(InMemoryMemberRepository
            .find_all(&mut reader)
            .await?
            .is_empty());

        writer.commit().await?;
        let mut reader = db.transact().await?;
        assert_eq!(
            InMemoryMemberRepository.find_all(&mut reader).await?.len(),
            1
        );
        Ok(())
    }

    fn held_locks(db: &InMemoryDatabase) -> usize {
        db.store.locks.lock().unwrap().len()
    }

    #[tokio::test]
    async fn release_locks_when_transaction_ends() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        for i in 0..100 {
            let mut con = db.transact().await?;
            con.lock(&format!("Book{i}")).await?;
            assert_eq!(held_locks(&db), 1);
            if i % 2 == 0 {
                con.commit().await?;
            } else {
                con.roll_back().await?;
            }
        }
        assert_eq!(held_locks(&db), 0);

        let mut con = db.transact().await?;
        con.lock("Clean Code").await?;
        drop(con);
        assert_eq!(held_locks(&db), 0);
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn keep_lock_while_waited_on() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut first = db.transact().await?;
        first.lock("Clean Code").await?;

        let waiter = {
            let db = db.clone();
            tokio::spawn(async move {
                let mut second = db.transact().await?;
                second.lock("Clean Code").await?;
                second.commit().await
            })
        };
        while Arc::strong_count(&db.store.lock_for("Clean Code")?) < 4 {
            tokio::task::yield_now().await;
        }

        first.commit().await?;
        waiter.await.expect("waiter panicked")?;
        assert_eq!(held_locks(&db), 0);
        Ok(())
    }

    #[tokio::test]
    async fn discard_on_roll_back() -> error_stack::Result<(), KernelError> {
        let db = InMemoryDatabase::new();
        let mut con = db.transact().await?;
        InMemoryMemberRepository
            .create(&mut con, &member("Alice"))
            .await?;
        con.roll_back().await?;

        let mut con = db.transact().await?;
        assert!(InMemoryMemberRepository.find_all(&mut con).await?.is_empty());
        Ok(())
    }
}
