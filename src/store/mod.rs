//! Student storage subsystem.
//!
//! # Data Flow
//! ```text
//! HTTP handler (http/handlers.rs)
//!     → StudentStore (repository.rs, shared handle in AppState)
//!     → DashMap<StudentId, Student> (record.rs)
//! ```
//!
//! # Design Decisions
//! - The store is an owned object injected into handlers, never a global
//! - Contents live only for the lifetime of the process
//! - New ids are derived from the current size (`len + 1`), so an id can be
//!   handed out again after a deletion and overwrite an existing record

pub mod record;
pub mod repository;

pub use record::{seed_records, Student, StudentId, PLACEHOLDER_TEXT};
pub use repository::StudentStore;
