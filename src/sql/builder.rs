//! Builds parameterized INSERT, SELECT, UPDATE, DELETE from the entity
//! registry. Identifiers come from the registry only; request values are
//! carried as bound parameters and never interpolated into statement text.

use crate::schema::{EntityKind, FieldDef, FieldKind};
use serde_json::{Map, Value};

/// Rendered statement text plus its bound values, in placeholder order.
#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<Value>,
}

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `$n`, with a cast when the column needs server-side coercion from text.
fn placeholder(n: usize, kind: FieldKind) -> String {
    match kind.pg_cast() {
        Some(cast) => format!("${}::{}", n, cast),
        None => format!("${}", n),
    }
}

fn select_column_list(kind: EntityKind) -> String {
    let mut cols = vec![quoted(kind.primary_key())];
    cols.extend(kind.schema().iter().map(|f| quoted(f.name)));
    cols.join(", ")
}

/// A field supplied as `null`, `""`, `0`, or `false` is treated the same as
/// an absent field: skipped, not written. The rule lives in this one
/// predicate so it can change in one place.
pub fn treated_as_absent(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// One `SET` assignment: a schema field plus its 1-based placeholder index.
#[derive(Debug)]
pub struct Assignment {
    pub field: &'static FieldDef,
    pub placeholder: usize,
}

/// A partial update, built fresh per request. Assignments follow schema
/// declaration order regardless of the order the caller supplied fields in;
/// `bound_values` is parallel to `assignments`.
#[derive(Debug)]
pub struct UpdateStatement {
    kind: EntityKind,
    pub assignments: Vec<Assignment>,
    pub bound_values: Vec<Value>,
    pub predicate_field: &'static str,
    pub predicate_value: i64,
}

/// The supplied field set contained nothing to write. A request-level
/// validation failure, not a store error.
#[derive(Debug, PartialEq, Eq)]
pub struct NoFieldsToUpdate;

/// Build an UPDATE for the fields present in `fields`. Keys are assumed to
/// be schema fields (unknown keys are rejected before this point); fields
/// whose value `treated_as_absent` accepts are skipped.
pub fn build_update(
    kind: EntityKind,
    id: i64,
    fields: &Map<String, Value>,
) -> Result<UpdateStatement, NoFieldsToUpdate> {
    let mut assignments = Vec::new();
    let mut bound_values = Vec::new();
    for def in kind.schema() {
        let Some(value) = fields.get(def.name) else {
            continue;
        };
        if treated_as_absent(value) {
            continue;
        }
        assignments.push(Assignment {
            field: def,
            placeholder: assignments.len() + 1,
        });
        bound_values.push(value.clone());
    }
    if assignments.is_empty() {
        return Err(NoFieldsToUpdate);
    }
    Ok(UpdateStatement {
        kind,
        assignments,
        bound_values,
        predicate_field: kind.primary_key(),
        predicate_value: id,
    })
}

impl UpdateStatement {
    /// Render to the store's parameterized form.
    pub fn render(&self) -> QueryBuf {
        let sets: Vec<String> = self
            .assignments
            .iter()
            .map(|a| {
                format!(
                    "{} = {}",
                    quoted(a.field.name),
                    placeholder(a.placeholder, a.field.kind)
                )
            })
            .collect();
        let id_param = self.assignments.len() + 1;
        let mut params = self.bound_values.clone();
        params.push(Value::Number(self.predicate_value.into()));
        QueryBuf {
            sql: format!(
                "UPDATE {} SET {} WHERE {} = ${}::bigint",
                quoted(self.kind.table()),
                sets.join(", "),
                quoted(self.predicate_field),
                id_param
            ),
            params,
        }
    }
}

/// INSERT listing every non-PK schema column; absent fields bind NULL so the
/// store's column constraints decide requiredness. Returns the generated
/// primary key.
pub fn insert(kind: EntityKind, fields: &Map<String, Value>) -> QueryBuf {
    let mut cols = Vec::new();
    let mut placeholders = Vec::new();
    let mut params = Vec::new();
    for def in kind.schema() {
        params.push(fields.get(def.name).cloned().unwrap_or(Value::Null));
        cols.push(quoted(def.name));
        placeholders.push(placeholder(params.len(), def.kind));
    }
    QueryBuf {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            quoted(kind.table()),
            cols.join(", "),
            placeholders.join(", "),
            quoted(kind.primary_key())
        ),
        params,
    }
}

/// SELECT every row, ordered by primary key.
pub fn select_all(kind: EntityKind) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {} ORDER BY {}",
            select_column_list(kind),
            quoted(kind.table()),
            quoted(kind.primary_key())
        ),
        params: Vec::new(),
    }
}

/// SELECT one row by primary key.
pub fn select_by_id(kind: EntityKind, id: i64) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "SELECT {} FROM {} WHERE {} = $1::bigint",
            select_column_list(kind),
            quoted(kind.table()),
            quoted(kind.primary_key())
        ),
        params: vec![Value::Number(id.into())],
    }
}

/// DELETE one row by primary key.
pub fn delete(kind: EntityKind, id: i64) -> QueryBuf {
    QueryBuf {
        sql: format!(
            "DELETE FROM {} WHERE {} = $1::bigint",
            quoted(kind.table()),
            quoted(kind.primary_key())
        ),
        params: vec![Value::Number(id.into())],
    }
}
