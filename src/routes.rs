//! Routers: entity CRUD built from the registry, plus health endpoints.
//!
//! Entity paths are parameterized so the Path extractor receives the segment
//! and id; handlers resolve the kind by segment, so the three entity kinds
//! share one route set.

use crate::handlers::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/:kind", get(list).post(create))
        .route("/:kind/:id", get(read).put(update).delete(delete_handler))
        .with_state(state)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1")
        .fetch_optional(&state.pool)
        .await
        .is_err()
    {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

/// GET /health and GET /ready (readiness includes a pool probe).
pub fn health_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
