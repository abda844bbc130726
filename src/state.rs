//! Shared application state for all routes.

use crate::service::CrudService;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    /// Kept alongside the repository for the readiness probe.
    pub pool: PgPool,
    pub repo: CrudService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        AppState {
            repo: CrudService::new(pool.clone()),
            pool,
        }
    }
}
