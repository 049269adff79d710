//! The todo entity and the input shapes that create or patch it.
//!
//! Wire names are camelCase and timestamps serialize as RFC 3339 strings.
//! Optional fields are omitted from the JSON when absent.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

pub const MAX_TITLE_CHARS: usize = 255;
pub const MAX_DESCRIPTION_CHARS: usize = 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
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

impl Todo {
    /// A fresh, uncompleted record. Both timestamps are set to `now`.
    pub fn new(
        title: String,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date,
        }
    }

    /// Overwrite every field present in `patch`. Timestamps are left to the
    /// store.
    pub fn apply(&mut self, patch: TodoPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
    }
}

/// Payload of `GET /todos`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<Todo>,
}

/// Input for creating a todo.
///
/// `title` is optional here so that a body without one reaches validation
/// and is reported as a 400 rather than failing to deserialize.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Check the input against the entity rules and return the title.
    pub fn validate(&self) -> Result<&str, ValidationError> {
        let title = self.title.as_deref().ok_or(ValidationError::MissingTitle)?;
        validate_title(title)?;
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(title)
    }
}

/// Partial update. A field left as `None` is not touched.
///
/// `description` and `due_date` are doubly optional: an absent key leaves
/// the value alone, an explicit `null` clears it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "present")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn description(description: Option<String>) -> Self {
        Self {
            description: Some(description),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.due_date.is_none()
    }

    /// Only the fields that are present are checked.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(Some(description)) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

// Runs only when the key is present, so `null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    let actual = title.chars().count();
    if actual > MAX_TITLE_CHARS {
        return Err(ValidationError::TitleTooLong {
            max: MAX_TITLE_CHARS,
            actual,
        });
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    let actual = description.chars().count();
    if actual > MAX_DESCRIPTION_CHARS {
        return Err(ValidationError::DescriptionTooLong {
            max: MAX_DESCRIPTION_CHARS,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Todo {
        let now = "2024-05-01T12:00:00Z".parse().unwrap();
        Todo {
            id: Uuid::nil(),
            title: "Test".to_string(),
            description: None,
            completed: false,
            created_at: now,
            updated_at: now,
            due_date: None,
        }
    }

    #[test]
    fn todo_serializes_with_camel_case_and_iso_timestamps() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["title"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(json["updatedAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("description").is_none());
        assert!(json.get("dueDate").is_none());
    }

    #[test]
    fn new_todo_starts_uncompleted_with_equal_stamps() {
        let todo = Todo::new("Buy milk".to_string(), None, None, Utc::now());
        assert!(!todo.completed);
        assert_eq!(todo.created_at, todo.updated_at);
        assert_ne!(todo.id, Uuid::nil());
    }

    #[test]
    fn new_todo_without_title_deserializes() {
        let input: NewTodo = serde_json::from_str("{}").unwrap();
        assert!(input.title.is_none());
        assert_eq!(input.validate(), Err(ValidationError::MissingTitle));
    }

    #[test]
    fn new_todo_reads_due_date() {
        let input: NewTodo =
            serde_json::from_str(r#"{"title":"Pay rent","dueDate":"2024-06-01T00:00:00Z"}"#)
                .unwrap();
        assert_eq!(input.due_date, Some("2024-06-01T00:00:00Z".parse().unwrap()));
    }

    #[test]
    fn blank_titles_are_rejected() {
        assert_eq!(validate_title(""), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("   "), Err(ValidationError::EmptyTitle));
        assert_eq!(validate_title("\t\n"), Err(ValidationError::EmptyTitle));
        assert!(validate_title(" x ").is_ok());
    }

    #[test]
    fn title_length_counts_characters() {
        assert!(validate_title(&"é".repeat(MAX_TITLE_CHARS)).is_ok());
        assert_eq!(
            validate_title(&"a".repeat(MAX_TITLE_CHARS + 1)),
            Err(ValidationError::TitleTooLong {
                max: MAX_TITLE_CHARS,
                actual: MAX_TITLE_CHARS + 1,
            })
        );
    }

    #[test]
    fn long_description_is_rejected() {
        let input = NewTodo::titled("ok").with_description("d".repeat(MAX_DESCRIPTION_CHARS + 1));
        assert!(matches!(
            input.validate(),
            Err(ValidationError::DescriptionTooLong { .. })
        ));
    }

    #[test]
    fn patch_all_fields_optional() {
        let patch: TodoPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn patch_distinguishes_null_from_absent() {
        let cleared: TodoPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: TodoPatch = serde_json::from_str(r#"{"description":"x"}"#).unwrap();
        assert_eq!(set.description, Some(Some("x".to_string())));

        let absent: TodoPatch = serde_json::from_str(r#"{"completed":false}"#).unwrap();
        assert_eq!(absent.description, None);
        assert_eq!(absent.completed, Some(false));
    }

    #[test]
    fn patch_with_empty_title_is_invalid() {
        assert_eq!(
            TodoPatch::title("  ").validate(),
            Err(ValidationError::EmptyTitle)
        );
        assert!(TodoPatch::completed(true).validate().is_ok());
    }

    #[test]
    fn apply_only_touches_present_fields() {
        let mut todo = sample();
        todo.apply(TodoPatch::description(Some("x".to_string())));
        assert_eq!(todo.description.as_deref(), Some("x"));
        assert_eq!(todo.title, "Test");
        assert!(!todo.completed);

        todo.apply(TodoPatch::description(None));
        assert!(todo.description.is_none());
    }
}
