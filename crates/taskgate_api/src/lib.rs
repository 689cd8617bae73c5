//! Transport adapter for the taskgate registry.
//!
//! Maps method/path/body requests onto `TaskService` calls and renders JSON
//! responses. Binding a socket is left to the embedding program.

pub mod api;

pub use api::{ApiResponse, TaskApi, ITEMS_PATH};
