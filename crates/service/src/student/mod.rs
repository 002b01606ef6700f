//! Student records: three-layer architecture (domain, repository, service).
//!
//! The service owns the update/conflict rules; repositories only talk to a store.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::Student;
pub use repository::{RepoError, StudentRepository};
pub use service::{ConflictPolicy, StudentService};
