//! CRUD persistence for courses and their reviews, backed by SQLite.
//!
//! # Intention
//!
//! - Provide one persister per entity over a caller-owned [`rusqlite::Connection`].
//! - Normalize every storage failure into a single [`PersistenceError`].
//!
//! # Architectural Boundaries
//!
//! - Only SQLite/database code belongs here.
//! - No connection pooling, transactions spanning operations, or migrations.
//! - Persisters never open or close connections; the caller owns them.

pub mod course;
pub mod error;
pub mod model;
pub mod persist;
pub mod review;
pub mod sqlite;

pub use course::CourseCrudPersister;
pub use error::{PersistenceError, PersistenceErrorKind, Result};
pub use model::{Course, Id, Review};
pub use persist::CrudPersister;
pub use review::ReviewCrudPersister;
pub use sqlite::{course_review_schema, SqliteConfig};
