//! Request routing and response rendering.
//!
//! # Responsibility
//! - Route `/items` requests to registry use-cases.
//! - Translate service errors into 4xx responses with a reason code.
//!
//! # Invariants
//! - `handle` never panics on caller input.
//! - Error bodies always carry `error` (reason code) and `message`.

use log::{debug, warn};
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;
use taskgate_core::{
    InMemoryTaskRepository, NewTask, ServiceError, SystemClock, TaskId, TaskRepository,
    TaskService, TimeSource,
};

/// Collection path served by the adapter.
pub const ITEMS_PATH: &str = "/items";

const STATUS_OK: u16 = 200;
const STATUS_CREATED: u16 = 201;
const STATUS_BAD_REQUEST: u16 = 400;
const STATUS_NOT_FOUND: u16 = 404;
const STATUS_METHOD_NOT_ALLOWED: u16 = 405;
const STATUS_CONFLICT: u16 = 409;
const STATUS_TOO_MANY_REQUESTS: u16 = 429;
const STATUS_INTERNAL_ERROR: u16 = 500;

/// Rendered response: HTTP-style status plus JSON body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    fn ok(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    fn error(status: u16, code: &str, message: impl Into<String>) -> Self {
        Self {
            status,
            body: json!({ "error": code, "message": message.into() }),
        }
    }

    fn from_service_error(err: &ServiceError) -> Self {
        match err {
            ServiceError::RateLimited(limited) => Self {
                status: STATUS_TOO_MANY_REQUESTS,
                body: json!({
                    "error": err.code(),
                    "message": err.to_string(),
                    "retry_after_secs": limited.retry_after.as_secs_f64().ceil() as u64,
                }),
            },
            // Not-found stays a 400 to match the published route table.
            ServiceError::Validation(_) | ServiceError::NotFound(_) => {
                Self::error(STATUS_BAD_REQUEST, err.code(), err.to_string())
            }
            ServiceError::IdExhausted => Self::error(STATUS_CONFLICT, err.code(), err.to_string()),
            ServiceError::Repo(_) => Self::error(STATUS_INTERNAL_ERROR, err.code(), err.to_string()),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

enum Route {
    Collection,
    Item(String),
    Unknown,
}

fn parse_route(path: &str) -> Route {
    let path = path.split('?').next().unwrap_or_default();
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    if trimmed == ITEMS_PATH {
        return Route::Collection;
    }
    match trimmed.strip_prefix(ITEMS_PATH).and_then(|rest| rest.strip_prefix('/')) {
        Some(segment) if !segment.is_empty() && !segment.contains('/') => {
            Route::Item(segment.to_string())
        }
        _ => Route::Unknown,
    }
}

/// Adapter from transport requests to the task service.
pub struct TaskApi<R: TaskRepository = InMemoryTaskRepository, C: TimeSource = SystemClock> {
    service: TaskService<R, C>,
}

impl<R: TaskRepository, C: TimeSource> TaskApi<R, C> {
    pub fn new(service: TaskService<R, C>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &TaskService<R, C> {
        &self.service
    }

    /// Handles one request and renders its response.
    ///
    /// `method` is matched case-insensitively; `body` is ignored for methods
    /// that take no payload.
    pub fn handle(&self, method: &str, path: &str, body: &str) -> ApiResponse {
        let started_at = Instant::now();
        let method = method.trim().to_ascii_uppercase();
        let response = self.dispatch(&method, path, body);

        if response.is_success() {
            debug!(
                "event=api_request module=api status=ok method={} path={} http_status={} duration_us={}",
                method,
                path,
                response.status,
                started_at.elapsed().as_micros()
            );
        } else {
            warn!(
                "event=api_request module=api status=error method={} path={} http_status={} error_code={}",
                method,
                path,
                response.status,
                response.body["error"].as_str().unwrap_or("unknown")
            );
        }
        response
    }

    fn dispatch(&self, method: &str, path: &str, body: &str) -> ApiResponse {
        match (parse_route(path), method) {
            (Route::Collection, "GET") => self.list(),
            (Route::Collection, "POST") => self.create(body),
            (Route::Item(raw_id), "PUT") => self.with_id(&raw_id, |id| self.mark_done(id)),
            (Route::Item(raw_id), "DELETE") => self.with_id(&raw_id, |id| self.delete(id)),
            (Route::Collection, _) | (Route::Item(_), _) => ApiResponse::error(
                STATUS_METHOD_NOT_ALLOWED,
                "method_not_allowed",
                format!("method {method} not allowed on {path}"),
            ),
            (Route::Unknown, _) => ApiResponse::error(
                STATUS_NOT_FOUND,
                "unknown_route",
                format!("no route for {path}"),
            ),
        }
    }

    fn list(&self) -> ApiResponse {
        match self.service.list() {
            Ok(tasks) => ApiResponse::ok(STATUS_OK, json!(tasks)),
            Err(err) => ApiResponse::from_service_error(&err),
        }
    }

    fn create(&self, body: &str) -> ApiResponse {
        let payload: NewTask = match serde_json::from_str(body) {
            Ok(payload) => payload,
            Err(err) => {
                return ApiResponse::error(
                    STATUS_BAD_REQUEST,
                    "invalid_json",
                    format!("request body is not a valid task payload: {err}"),
                );
            }
        };

        match self.service.create(&payload) {
            Ok(task) => ApiResponse::ok(STATUS_CREATED, json!(task)),
            Err(err) => ApiResponse::from_service_error(&err),
        }
    }

    fn mark_done(&self, id: TaskId) -> ApiResponse {
        match self.service.mark_done(id) {
            Ok(task) => ApiResponse::ok(STATUS_OK, json!({ "done": task.id })),
            Err(err) => ApiResponse::from_service_error(&err),
        }
    }

    fn delete(&self, id: TaskId) -> ApiResponse {
        match self.service.delete(id) {
            Ok(deleted) => ApiResponse::ok(STATUS_OK, json!({ "deleted": deleted })),
            Err(err) => ApiResponse::from_service_error(&err),
        }
    }

    fn with_id(&self, raw_id: &str, f: impl FnOnce(TaskId) -> ApiResponse) -> ApiResponse {
        match raw_id.parse::<TaskId>() {
            Ok(id) => f(id),
            Err(err) => ApiResponse::error(
                STATUS_BAD_REQUEST,
                "invalid_id",
                format!("task id `{raw_id}` is not an integer: {err}"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_route, Route, TaskApi};
    use taskgate_core::{InMemoryTaskRepository, TaskService};

    fn api() -> TaskApi {
        TaskApi::new(TaskService::new(InMemoryTaskRepository::seeded()))
    }

    #[test]
    fn parse_route_handles_trailing_slash_and_query() {
        assert!(matches!(parse_route("/items/"), Route::Collection));
        assert!(matches!(parse_route("/items?x=1"), Route::Collection));
        assert!(matches!(parse_route("/items//"), Route::Unknown));
        assert!(matches!(parse_route("/items/7"), Route::Item(id) if id == "7"));
        assert!(matches!(parse_route("/items/7/extra"), Route::Unknown));
        assert!(matches!(parse_route("/todo"), Route::Unknown));
        assert!(matches!(parse_route("/itemsX"), Route::Unknown));
    }

    #[test]
    fn non_integer_id_is_bad_request() {
        let response = api().handle("PUT", "/items/abc", "");
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "invalid_id");
    }

    #[test]
    fn unknown_route_and_method_are_rejected() {
        let api = api();
        assert_eq!(api.handle("GET", "/nope", "").status, 404);
        assert_eq!(api.handle("PATCH", "/items", "").status, 405);
        assert_eq!(api.handle("GET", "/items/1", "").status, 405);
    }

    #[test]
    fn method_is_case_insensitive() {
        let response = api().handle("get", "/items", "");
        assert_eq!(response.status, 200);
        assert_eq!(response.body.as_array().map(Vec::len), Some(5));
    }
}
