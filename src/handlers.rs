//! Entity CRUD handlers: create, read, update, delete, list.
//!
//! Routes are parameterized on the path segment; each handler resolves the
//! entity kind from it and hands off to the repository. All response shaping
//! happens in [`crate::outcome`] and [`crate::error`].

use crate::error::AppError;
use crate::outcome::Outcome;
use crate::schema::EntityKind;
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{Map, Value};

fn resolve_kind(segment: &str) -> Result<EntityKind, AppError> {
    EntityKind::from_path(segment).ok_or_else(|| AppError::UnknownResource(segment.to_string()))
}

fn parse_id(id_str: &str) -> Result<i64, AppError> {
    id_str
        .parse()
        .map_err(|_| AppError::InvalidId(id_str.to_string()))
}

fn body_to_map(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::InvalidBody),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Json(body): Json<Value>,
) -> Result<Outcome, AppError> {
    let kind = resolve_kind(&segment)?;
    let body = body_to_map(body)?;
    RequestValidator::check_known_fields(kind, &body)?;
    state.repo.create(kind, &body).await
}

pub async fn list(
    State(state): State<AppState>,
    Path(segment): Path<String>,
) -> Result<Outcome, AppError> {
    let kind = resolve_kind(&segment)?;
    state.repo.get_all(kind).await
}

pub async fn read(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<Outcome, AppError> {
    let kind = resolve_kind(&segment)?;
    let id = parse_id(&id_str)?;
    state.repo.get_by_id(kind, id).await
}

pub async fn update(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Result<Outcome, AppError> {
    let kind = resolve_kind(&segment)?;
    let id = parse_id(&id_str)?;
    let body = body_to_map(body)?;
    RequestValidator::check_known_fields(kind, &body)?;
    state.repo.update(kind, id, &body).await
}

pub async fn delete(
    State(state): State<AppState>,
    Path((segment, id_str)): Path<(String, String)>,
) -> Result<Outcome, AppError> {
    let kind = resolve_kind(&segment)?;
    let id = parse_id(&id_str)?;
    state.repo.delete(kind, id).await
}
