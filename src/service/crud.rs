//! Generic CRUD execution against PostgreSQL.

use crate::error::AppError;
use crate::outcome::Outcome;
use crate::schema::EntityKind;
use crate::sql::{self, PgBindValue};
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::Row;

/// Entity repository, parameterized by [`EntityKind`] data rather than
/// per-kind code. The pool is injected at construction; each operation is a
/// single store call with no retry and no partial application.
#[derive(Clone)]
pub struct CrudService {
    pool: PgPool,
}

impl CrudService {
    pub fn new(pool: PgPool) -> Self {
        CrudService { pool }
    }

    /// Insert one row and report the generated primary key.
    pub async fn create(
        &self,
        kind: EntityKind,
        fields: &Map<String, Value>,
    ) -> Result<Outcome, AppError> {
        let q = sql::insert(kind, fields);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::backend(format!("Failed to create {}", kind.noun()), e))?;
        let id: i64 = row
            .try_get(0)
            .map_err(|e| AppError::backend(format!("Failed to create {}", kind.noun()), e))?;
        Ok(Outcome::Created { kind, id })
    }

    /// Full-table read, ordered by primary key.
    pub async fn get_all(&self, kind: EntityKind) -> Result<Outcome, AppError> {
        let q = sql::select_all(kind);
        tracing::debug!(sql = %q.sql, "query");
        let rows = sqlx::query(&q.sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::backend(format!("Failed to fetch {}", kind.path_segment()), e)
            })?;
        Ok(Outcome::FoundAll {
            records: rows.iter().map(row_to_json).collect(),
        })
    }

    /// Fetch one row by primary key; zero rows is `NotFound`.
    pub async fn get_by_id(&self, kind: EntityKind, id: i64) -> Result<Outcome, AppError> {
        let q = sql::select_by_id(kind, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let row = query
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::backend(format!("Failed to fetch {}", kind.noun()), e))?;
        match row {
            Some(r) => Ok(Outcome::Found {
                record: row_to_json(&r),
            }),
            None => Err(AppError::NotFound(kind)),
        }
    }

    /// Partial update. An empty effective field set returns
    /// `NoFieldsToUpdate` without touching the store; zero rows affected is
    /// `NotFound`.
    pub async fn update(
        &self,
        kind: EntityKind,
        id: i64,
        fields: &Map<String, Value>,
    ) -> Result<Outcome, AppError> {
        let stmt =
            sql::build_update(kind, id, fields).map_err(|_| AppError::NoFieldsToUpdate)?;
        let q = stmt.render();
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::backend(format!("Failed to update {}", kind.noun()), e))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(kind));
        }
        Ok(Outcome::Updated { kind })
    }

    /// Delete by primary key; zero rows affected is `NotFound`.
    pub async fn delete(&self, kind: EntityKind, id: i64) -> Result<Outcome, AppError> {
        let q = sql::delete(kind, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let mut query = sqlx::query(&q.sql);
        for p in &q.params {
            query = query.bind(PgBindValue::from_json(p));
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::backend(format!("Failed to delete {}", kind.noun()), e))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(kind));
        }
        Ok(Outcome::Deleted { kind })
    }
}

fn row_to_json(row: &sqlx::postgres::PgRow) -> Value {
    use sqlx::Column;
    let mut map = serde_json::Map::new();
    for col in row.columns() {
        let name = col.name();
        map.insert(name.to_string(), cell_to_value(row, name));
    }
    Value::Object(map)
}

fn cell_to_value(row: &sqlx::postgres::PgRow, name: &str) -> Value {
    if let Ok(Some(n)) = row.try_get::<Option<i64>, _>(name) {
        return Value::Number(n.into());
    }
    if let Ok(Some(d)) = row.try_get::<Option<chrono::NaiveDate>, _>(name) {
        return Value::String(d.format("%Y-%m-%d").to_string());
    }
    if let Ok(Some(s)) = row.try_get::<Option<String>, _>(name) {
        return Value::String(s);
    }
    Value::Null
}
