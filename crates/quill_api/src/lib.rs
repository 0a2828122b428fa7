//! Transport-facing adapter for the Quill article core.
//!
//! Converts raw header values, path ids and JSON bodies into core calls, and
//! core outcomes into status codes. Routing and sockets stay outside.

pub mod api;
pub mod status;

pub use api::{
    ApiError, ApiResponse, ArticleApi, RequestHeaders, HEADER_USER_ID, HEADER_USER_PASS,
};
