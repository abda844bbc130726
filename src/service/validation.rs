//! Request validation against the entity registry.

use crate::error::AppError;
use crate::schema::EntityKind;
use serde_json::{Map, Value};

pub struct RequestValidator;

impl RequestValidator {
    /// Every key in the body must be a schema field of the kind. Unknown
    /// keys are rejected, not silently dropped; the primary key is not a
    /// writable field and counts as unknown.
    pub fn check_known_fields(
        kind: EntityKind,
        body: &Map<String, Value>,
    ) -> Result<(), AppError> {
        for key in body.keys() {
            if kind.field(key).is_none() {
                return Err(AppError::UnknownField(key.clone()));
            }
        }
        Ok(())
    }
}
