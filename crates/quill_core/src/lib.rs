//! Core domain logic for the Quill article backend.
//! This crate is the single source of truth for permission and ownership
//! invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, QuillConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::article::{
    Article, ArticleDraft, ArticleId, ArticlePatch, ModelValidationError, TITLE_MAX_LENGTH,
};
pub use model::author::{Author, AuthorId, SECRET_MAX_LENGTH};
pub use model::permission::{ActionResult, Caller, PermissionLevel};
pub use repo::article_repo::{
    ArticleListQuery, ArticleRepository, SqliteArticleRepository, LIST_DEFAULT_LIMIT,
    LIST_MAX_LIMIT,
};
pub use repo::author_repo::{AuthorRepository, SqliteAuthorRepository};
pub use repo::{RepoError, RepoResult};
pub use service::article_service::{ArticleService, CreateOutcome, Credentials, WriteOutcome};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
