//! In-memory todo service with a REST transport.
//!
//! # Overview
//! `TodoStore` owns the insertion-ordered collection, `TodoService` validates
//! input and exposes the CRUD surface, and `routes` maps each endpoint onto
//! exactly one service call.
//!
//! # Design
//! - The store is constructed explicitly and injected into the service; the
//!   service is shared with handlers as `Arc<TodoService>` router state.
//! - "Not found" is an `Option`, never an error. Only the transport turns it
//!   into a 404.
//! - Nothing in the core performs I/O, so the only contention point is the
//!   store's `RwLock`.

pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod telemetry;

use std::{future::Future, sync::Arc};

use axum::Router;
use tokio::net::TcpListener;

pub use config::Config;
pub use error::{ApiError, ErrorBody, ValidationError};
pub use model::{NewTodo, Todo, TodoList, TodoPatch};
pub use routes::router;
pub use service::TodoService;
pub use store::TodoStore;

/// Router backed by a fresh, empty store.
pub fn app() -> Router {
    router(Arc::new(TodoService::new(TodoStore::new())))
}

/// Serve a fresh app on `listener` until the process exits.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Serve a fresh app on `listener`, draining in-flight requests once
/// `shutdown` resolves.
pub async fn run_until<F>(listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app())
        .with_graceful_shutdown(shutdown)
        .await
}
