use async_trait::async_trait;
use thiserror::Error;

use super::domain::Student;

/// Failures a student store can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A keyed write matched no row in the expected state.
    #[error("write conflict: no row matched the expected state")]
    Conflict,
    #[error("student collection unavailable: {0}")]
    Unavailable(String),
    #[error("store error: {0}")]
    Backend(String),
}

/// Repository abstraction for student persistence.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn list_all(&self) -> Result<Vec<Student>, RepoError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, RepoError>;
    /// Store a new row; `student.id` is ignored and the assigned key is returned.
    async fn insert(&self, student: Student) -> Result<Student, RepoError>;
    /// Overwrite every column of the row keyed by `student.id`.
    /// Fails with [`RepoError::Conflict`] when no row matched.
    async fn replace(&self, student: &Student) -> Result<(), RepoError>;
    /// Returns `true` when a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, RepoError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockStudentRepository {
        rows: Mutex<BTreeMap<i32, Student>>, // key: id
        last_id: AtomicI32,
        unavailable: AtomicBool,
        pending_conflicts: AtomicUsize,
    }

    impl MockStudentRepository {
        /// Every later call fails with [`RepoError::Unavailable`].
        pub fn make_unavailable(&self) {
            self.unavailable.store(true, Ordering::SeqCst);
        }

        /// The next `n` calls to `replace` report a conflict even when the row exists,
        /// as if another writer got there first.
        pub fn inject_conflicts(&self, n: usize) {
            self.pending_conflicts.store(n, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|rows| rows.len()).unwrap_or_default()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<i32, Student>>, RepoError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(RepoError::Unavailable("students".into()));
            }
            self.rows.lock().map_err(|_| RepoError::Backend("mock store poisoned".into()))
        }
    }

    #[async_trait]
    impl StudentRepository for MockStudentRepository {
        async fn list_all(&self) -> Result<Vec<Student>, RepoError> {
            Ok(self.rows()?.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Student>, RepoError> {
            Ok(self.rows()?.get(&id).cloned())
        }

        async fn insert(&self, student: Student) -> Result<Student, RepoError> {
            let mut rows = self.rows()?;
            let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
            let stored = student.with_id(id);
            rows.insert(id, stored.clone());
            Ok(stored)
        }

        async fn replace(&self, student: &Student) -> Result<(), RepoError> {
            let mut rows = self.rows()?;
            let injected = self
                .pending_conflicts
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if injected {
                return Err(RepoError::Conflict);
            }
            match rows.get_mut(&student.id) {
                Some(row) => {
                    *row = student.clone();
                    Ok(())
                }
                None => Err(RepoError::Conflict),
            }
        }

        async fn delete(&self, id: i32) -> Result<bool, RepoError> {
            Ok(self.rows()?.remove(&id).is_some())
        }
    }

}
