//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! The caller executes the actual HTTP round-trip, keeping the core
//! deterministic and free of I/O dependencies.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, ErrorBody, Todo, TodoList, UpdateTodo};

/// Synchronous, stateless client for the todo API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. The caller is responsible for executing the HTTP
/// round-trip between `build_*` and `parse_*`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/todos")
    }

    pub fn build_get_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Post, "/todos", input)
    }

    pub fn build_update_todo(&self, id: Uuid, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, &format!("/todos/{id}"), input)
    }

    pub fn build_complete_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Patch, &format!("/todos/{id}/complete"))
    }

    pub fn build_delete_todo(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/todos/{id}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        check_status(&response, 200)?;
        parse_body::<TodoList>(&response).map(|list| list.todos)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 201)?;
        parse_body(&response)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_complete_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        check_status(&response, 200)?;
        parse_body(&response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)?;
        Ok(())
    }

    fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
            ..self.request(method, path)
        })
    }
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.message)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest { message })
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}
