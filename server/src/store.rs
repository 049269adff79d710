//! Insertion-ordered, in-memory todo collection.
//!
//! # Design
//! A single `RwLock<Vec<Todo>>` serializes mutations; reads clone a snapshot
//! under the read lock so callers never hold a live reference. Lookups are
//! linear, which keeps ordering trivial for the collection sizes this
//! service holds.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::model::Todo;

#[derive(Debug, Default)]
pub struct TodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `todo`. Ids come from `Uuid::new_v4`, so the caller never
    /// hands in a duplicate.
    pub async fn insert(&self, todo: Todo) {
        self.todos.write().await.push(todo);
    }

    pub async fn find_all(&self) -> Vec<Todo> {
        self.todos.read().await.clone()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<Todo> {
        self.todos
            .read()
            .await
            .iter()
            .find(|todo| todo.id == id)
            .cloned()
    }

    /// Apply `mutator` to the record with `id` and stamp `updated_at`.
    ///
    /// Returns `Ok(None)` when no record matches. The mutator runs against a
    /// copy; if it fails the stored record is left exactly as it was.
    pub async fn update_by_id<F, E>(&self, id: Uuid, mutator: F) -> Result<Option<Todo>, E>
    where
        F: FnOnce(&mut Todo) -> Result<(), E>,
    {
        let mut todos = self.todos.write().await;
        let Some(slot) = todos.iter_mut().find(|todo| todo.id == id) else {
            return Ok(None);
        };
        let mut updated = slot.clone();
        mutator(&mut updated)?;
        updated.updated_at = next_stamp(slot.updated_at, Utc::now());
        *slot = updated.clone();
        Ok(Some(updated))
    }

    pub async fn delete_by_id(&self, id: Uuid) -> bool {
        let mut todos = self.todos.write().await;
        match todos.iter().position(|todo| todo.id == id) {
            Some(index) => {
                todos.remove(index);
                true
            }
            None => false,
        }
    }

    pub async fn len(&self) -> usize {
        self.todos.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.todos.read().await.is_empty()
    }
}

// Strictly after `previous`, even when the wall clock has not advanced.
fn next_stamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::nanoseconds(1)
    }
}
