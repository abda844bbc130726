//! Success outcomes and their fixed response shapes.
//!
//! One variant per successful operation; the match in `into_parts` is
//! exhaustive, so adding a variant will not compile until it is mapped.
//! Failure outcomes live in [`crate::error::AppError`] with the same
//! exhaustive-match guarantee.

use crate::schema::EntityKind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{Map, Value};

#[derive(Debug)]
pub enum Outcome {
    Created { kind: EntityKind, id: i64 },
    FoundAll { records: Vec<Value> },
    Found { record: Value },
    Updated { kind: EntityKind },
    Deleted { kind: EntityKind },
}

fn message_body(text: String) -> Value {
    let mut m = Map::new();
    m.insert("message".into(), Value::String(text));
    Value::Object(m)
}

impl Outcome {
    pub fn into_parts(self) -> (StatusCode, Value) {
        match self {
            Outcome::Created { kind, id } => {
                let mut m = Map::new();
                m.insert(
                    "message".into(),
                    Value::String(format!("{} created successfully", kind.display())),
                );
                m.insert(kind.primary_key().into(), Value::Number(id.into()));
                (StatusCode::CREATED, Value::Object(m))
            }
            Outcome::FoundAll { records } => (StatusCode::OK, Value::Array(records)),
            Outcome::Found { record } => (StatusCode::OK, record),
            Outcome::Updated { kind } => (
                StatusCode::OK,
                message_body(format!("{} updated successfully", kind.display())),
            ),
            Outcome::Deleted { kind } => (
                StatusCode::OK,
                message_body(format!("{} deleted successfully", kind.display())),
            ),
        }
    }
}

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        let (status, body) = self.into_parts();
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn created_carries_message_and_kind_specific_id_key() {
        let (status, body) = Outcome::Created {
            kind: EntityKind::Student,
            id: 42,
        }
        .into_parts();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            body,
            json!({"message": "Student created successfully", "student_id": 42})
        );
    }

    #[test]
    fn found_passes_the_record_through_unchanged() {
        let record = json!({"course_id": 1, "course_code": "CS101"});
        let (status, body) = Outcome::Found {
            record: record.clone(),
        }
        .into_parts();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, record);
    }

    #[test]
    fn list_is_a_bare_array() {
        let (status, body) = Outcome::FoundAll {
            records: vec![json!({"enrollment_id": 1})],
        }
        .into_parts();
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_array());
    }

    #[test]
    fn update_and_delete_report_plain_messages() {
        let (_, body) = Outcome::Updated {
            kind: EntityKind::Course,
        }
        .into_parts();
        assert_eq!(body, json!({"message": "Course updated successfully"}));

        let (status, body) = Outcome::Deleted {
            kind: EntityKind::Enrollment,
        }
        .into_parts();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Enrollment deleted successfully"}));
    }
}
