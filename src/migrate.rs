//! First-boot DDL rendered from the registry.
//!
//! The repository relies on the store's constraints (NOT NULL on
//! required-on-create columns, foreign keys on enrollments); this module is
//! what puts them there on an empty database.

use crate::error::AppError;
use crate::schema::EntityKind;
use sqlx::PgPool;

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn fk_clause(kind: EntityKind, field: &str) -> Option<String> {
    let target = match (kind, field) {
        (EntityKind::Enrollment, "student_id") => EntityKind::Student,
        (EntityKind::Enrollment, "course_id") => EntityKind::Course,
        _ => return None,
    };
    Some(format!(
        " REFERENCES {} ({})",
        quote(target.table()),
        quote(target.primary_key())
    ))
}

/// CREATE TABLE IF NOT EXISTS for one kind, columns in schema order.
pub fn create_table_ddl(kind: EntityKind) -> String {
    let mut cols = vec![format!(
        "{} BIGSERIAL PRIMARY KEY",
        quote(kind.primary_key())
    )];
    for f in kind.schema() {
        let mut col = format!("{} {}", quote(f.name), f.kind.ddl_type());
        if f.required_on_create {
            col.push_str(" NOT NULL");
        }
        if let Some(fk) = fk_clause(kind, f.name) {
            col.push_str(&fk);
        }
        cols.push(col);
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        quote(kind.table()),
        cols.join(", ")
    )
}

/// Create all entity tables if absent. `EntityKind::ALL` is declared with
/// referenced tables before referencing ones, so the FK targets exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for kind in EntityKind::ALL {
        let ddl = create_table_ddl(kind);
        tracing::debug!(sql = %ddl, "ddl");
        sqlx::query(&ddl).execute(pool).await.map_err(|e| {
            AppError::backend(format!("Failed to create table {}", kind.table()), e)
        })?;
    }
    Ok(())
}
