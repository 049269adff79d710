//! Validated CRUD operations over a `TodoStore`.

use std::convert::Infallible;

use chrono::Utc;
use uuid::Uuid;

use crate::error::ValidationError;
use crate::model::{NewTodo, Todo, TodoPatch};
use crate::store::TodoStore;

/// The operation surface the transport calls into.
///
/// Unknown ids come back as `None` (or `false` for deletes). Only input that
/// breaks an entity rule is an error.
#[derive(Debug, Default)]
pub struct TodoService {
    store: TodoStore,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self { store }
    }

    pub async fn create_todo(&self, input: NewTodo) -> Result<Todo, ValidationError> {
        let title = match input.validate() {
            Ok(title) => title.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "rejected todo creation");
                return Err(err);
            }
        };
        let todo = Todo::new(title, input.description, input.due_date, Utc::now());
        self.store.insert(todo.clone()).await;
        tracing::info!(id = %todo.id, title = %todo.title, "created todo");
        Ok(todo)
    }

    pub async fn get_all_todos(&self) -> Vec<Todo> {
        self.store.find_all().await
    }

    pub async fn get_todo_by_id(&self, id: Uuid) -> Option<Todo> {
        self.store.find_by_id(id).await
    }

    /// Apply `patch` to the todo with `id`.
    ///
    /// An unknown id wins over an invalid patch: the caller gets `Ok(None)`
    /// without the patch being checked.
    pub async fn update_todo(
        &self,
        id: Uuid,
        patch: TodoPatch,
    ) -> Result<Option<Todo>, ValidationError> {
        let result: Result<Option<Todo>, ValidationError> = self
            .store
            .update_by_id(id, |todo| {
                patch.validate()?;
                todo.apply(patch);
                Ok(())
            })
            .await;
        match &result {
            Ok(Some(todo)) => tracing::info!(id = %todo.id, completed = todo.completed, "updated todo"),
            Ok(None) => tracing::debug!(%id, "update of unknown todo"),
            Err(err) => tracing::warn!(%id, error = %err, "rejected todo update"),
        }
        result
    }

    /// Mark the todo as completed. Completing twice only refreshes
    /// `updated_at`.
    pub async fn complete_todo(&self, id: Uuid) -> Option<Todo> {
        let result = self
            .store
            .update_by_id(id, |todo| {
                todo.apply(TodoPatch::completed(true));
                Ok::<_, Infallible>(())
            })
            .await;
        let todo = match result {
            Ok(todo) => todo,
            Err(never) => match never {},
        };
        match &todo {
            Some(todo) => tracing::info!(id = %todo.id, "completed todo"),
            None => tracing::debug!(%id, "completion of unknown todo"),
        }
        todo
    }

    pub async fn delete_todo(&self, id: Uuid) -> bool {
        let removed = self.store.delete_by_id(id).await;
        if removed {
            tracing::info!(%id, "deleted todo");
        }
        removed
    }

    pub async fn count(&self) -> usize {
        self.store.len().await
    }
}
