//! ScholarTrack API: schema-driven student record management over PostgreSQL.
//!
//! The three entity kinds (students, courses, enrollments) are data in the
//! registry, not code; one generic builder/repository/mapper pipeline serves
//! them all.

pub mod error;
pub mod handlers;
pub mod migrate;
pub mod outcome;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;

pub use error::AppError;
pub use migrate::ensure_tables;
pub use outcome::Outcome;
pub use routes::{entity_routes, health_routes};
pub use schema::{EntityKind, FieldDef, FieldKind};
pub use service::{CrudService, RequestValidator};
pub use state::AppState;
