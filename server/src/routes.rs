//! HTTP routes. Each todo endpoint calls exactly one `TodoService` operation
//! and translates its result; no business rules live here.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use crate::error::{panic_response, ApiError, ErrorBody};
use crate::model::{NewTodo, Todo, TodoList, TodoPatch};
use crate::service::TodoService;

pub type SharedService = Arc<TodoService>;

/// Build the application router around `service`.
///
/// # Routes
///
/// - `GET /health`
/// - `GET /todos`, `POST /todos`
/// - `GET /todos/{id}`, `PUT /todos/{id}`, `DELETE /todos/{id}`
/// - `PATCH /todos/{id}/complete`
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/complete", patch(complete_todo))
        .fallback(route_not_found)
        .with_state(service)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub todos: usize,
}

async fn health(State(service): State<SharedService>) -> Json<Health> {
    Json(Health {
        status: "OK".to_string(),
        timestamp: Utc::now(),
        todos: service.count().await,
    })
}

async fn list_todos(State(service): State<SharedService>) -> Json<TodoList> {
    Json(TodoList {
        todos: service.get_all_todos().await,
    })
}

async fn create_todo(
    State(service): State<SharedService>,
    Json(input): Json<NewTodo>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let todo = service.create_todo(input).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    service
        .get_todo_by_id(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn update_todo(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
    Json(changes): Json<TodoPatch>,
) -> Result<Json<Todo>, ApiError> {
    service
        .update_todo(id, changes)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn complete_todo(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
) -> Result<Json<Todo>, ApiError> {
    service
        .complete_todo(id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(id))
}

async fn delete_todo(
    State(service): State<SharedService>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if service.delete_todo(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(id))
    }
}

async fn route_not_found() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Route not found")))
}
