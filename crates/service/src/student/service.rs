use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};

use super::domain::Student;
use super::repository::{RepoError, StudentRepository};
use crate::errors::ServiceError;

/// How `update` reacts when the store reports a write conflict on a record
/// that still exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConflictPolicy {
    /// Surface the conflict to the caller as [`ServiceError::Conflict`].
    #[default]
    Propagate,
    /// Re-issue the whole-record replace, up to `max_attempts` writes in total.
    LastWriterWins { max_attempts: u32 },
}

/// Student record service independent of web framework.
///
/// Holds no state between calls besides the injected repository.
pub struct StudentService<R: StudentRepository + ?Sized> {
    repo: Arc<R>,
    conflict_policy: ConflictPolicy,
}

impl<R: StudentRepository + ?Sized> Clone for StudentService<R> {
    fn clone(&self) -> Self {
        Self { repo: Arc::clone(&self.repo), conflict_policy: self.conflict_policy }
    }
}

// Unavailable collection reads as "nothing there" for lookups; the store's
// own message stays in the log.
fn lookup_error(e: RepoError) -> ServiceError {
    match e {
        RepoError::Unavailable(msg) => {
            warn!(error = %msg, "student_collection_unavailable");
            ServiceError::NotFound(COLLECTION_UNAVAILABLE.to_string())
        }
        other => other.into(),
    }
}

const COLLECTION_UNAVAILABLE: &str = "student collection unavailable";

impl<R: StudentRepository + ?Sized> StudentService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo, conflict_policy: ConflictPolicy::default() } }

    pub fn with_conflict_policy(mut self, policy: ConflictPolicy) -> Self {
        self.conflict_policy = policy;
        self
    }

    pub fn conflict_policy(&self) -> ConflictPolicy { self.conflict_policy }

    /// All stored students, ordered by id. An empty store yields an empty list.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Student>, ServiceError> {
        let all = self.repo.list_all().await.map_err(lookup_error)?;
        debug!(count = all.len(), "students_listed");
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Student, ServiceError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(lookup_error)?
            .ok_or_else(|| ServiceError::not_found(id))
    }

    /// Store a new student and return it with its assigned id.
    ///
    /// # Examples
    /// ```
    /// use service::student::{StudentService, Student, repository::mock::MockStudentRepository};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let first = tokio_test::block_on(svc.create(Student::named("alice").with_id(99))).unwrap();
    /// let second = tokio_test::block_on(svc.create(Student::named("bob"))).unwrap();
    /// assert_eq!(first.id, 1);
    /// assert_ne!(first.id, second.id);
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: Student) -> Result<Student, ServiceError> {
        let created = self.repo.insert(input).await?;
        info!(id = created.id, "student_created");
        Ok(created)
    }

    /// Replace the record `id` with `input` in full.
    ///
    /// `input.id` must equal `id`. A conflict on a record that no longer exists
    /// is reported as [`ServiceError::NotFound`]; otherwise the configured
    /// [`ConflictPolicy`] applies.
    ///
    /// # Examples
    /// ```
    /// use service::{errors::ServiceError, student::{StudentService, Student, repository::mock::MockStudentRepository}};
    /// use std::sync::Arc;
    /// let svc = StudentService::new(Arc::new(MockStudentRepository::default()));
    /// let res = tokio_test::block_on(svc.update(999, Student::named("x").with_id(999)));
    /// assert!(matches!(res, Err(ServiceError::NotFound(_))));
    /// let res = tokio_test::block_on(svc.update(1, Student::named("x").with_id(2)));
    /// assert!(matches!(res, Err(ServiceError::BadRequest(_))));
    /// ```
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: Student) -> Result<(), ServiceError> {
        if input.id != id {
            return Err(ServiceError::BadRequest(format!(
                "path id {} does not match body id {}",
                id, input.id
            )));
        }

        let mut attempt = 1;
        loop {
            match self.repo.replace(&input).await {
                Ok(()) => {
                    info!(id, attempt, "student_updated");
                    return Ok(());
                }
                Err(RepoError::Conflict) => {
                    if self.repo.find_by_id(id).await?.is_none() {
                        return Err(ServiceError::not_found(id));
                    }
                    match self.conflict_policy {
                        ConflictPolicy::LastWriterWins { max_attempts } if attempt < max_attempts => {
                            warn!(id, attempt, "student_update_conflict_retry");
                            attempt += 1;
                        }
                        _ => {
                            error!(id, attempt, "student_update_conflict");
                            return Err(ServiceError::Conflict(id));
                        }
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await.map_err(lookup_error)? {
            return Err(ServiceError::not_found(id));
        }
        info!(id, "student_deleted");
        Ok(())
    }
}
