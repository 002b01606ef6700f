//! Service layer for the student registry.
//! - Separates business rules (id checks, conflict handling) from data access.
//! - Reuses the entity definitions in the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod student;
#[cfg(test)]
pub mod test_support;
