//! Domain DTOs for the todo API.
//!
//! # Design
//! These types mirror the server's wire schema but are defined independently,
//! so the client never links the server's axum internals. Integration tests
//! catch any schema drift between the two crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

/// Envelope of the list endpoint: the array always sits under `todos`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            due_date: None,
        }
    }
}

/// Request payload for updating an existing todo. Only the fields present in
/// the JSON are applied; omitted fields remain unchanged on the server.
///
/// `description` and `due_date` are doubly optional: `None` leaves the key
/// out, `Some(None)` sends `null` and clears the value on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "present"
    )]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateTodo {
    pub fn clear_description() -> Self {
        Self {
            description: Some(None),
            ..Self::default()
        }
    }

    pub fn clear_due_date() -> Self {
        Self {
            due_date: Some(None),
            ..Self::default()
        }
    }
}

// Only called for keys that are present, so `null` reads back as `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body the server sends with every 4xx/5xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_clear_serializes_null() {
        let body = serde_json::to_value(UpdateTodo::clear_description()).unwrap();
        assert_eq!(body, serde_json::json!({"description": null}));

        let body = serde_json::to_value(UpdateTodo::clear_due_date()).unwrap();
        assert_eq!(body, serde_json::json!({"dueDate": null}));
    }

    #[test]
    fn update_absent_fields_are_left_out() {
        let body = serde_json::to_value(UpdateTodo::default()).unwrap();
        assert_eq!(body, serde_json::json!({}));
    }

    #[test]
    fn update_reads_null_back_as_clear() {
        let input: UpdateTodo = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(input, UpdateTodo::clear_description());

        let input: UpdateTodo = serde_json::from_str(r#"{"dueDate":"2024-06-01T00:00:00Z"}"#).unwrap();
        assert_eq!(input.due_date, Some(Some("2024-06-01T00:00:00Z".parse().unwrap())));
        assert_eq!(input.description, None);
    }
}
