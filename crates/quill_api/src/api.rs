//! Request-level API over the article service.
//!
//! # Responsibility
//! - Decode credential headers and JSON bodies.
//! - Open one connection per request and run one service call on it.
//! - Translate service outcomes and faults through `status`.
//!
//! # Invariants
//! - Functions never panic; every failure becomes an `ApiResponse`.
//! - No connection or transaction outlives the request that opened it.
//! - Author secrets are never logged or echoed back.

use crate::status;
use log::{error, warn};
use quill_core::db::{open_db, open_db_with_seed, DbResult};
use quill_core::{
    ArticleDraft, ArticleId, ArticlePatch, ArticleService, AuthorId, Credentials, RepoResult,
    SqliteArticleRepository, SqliteAuthorRepository,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Header carrying the claimed author id.
pub const HEADER_USER_ID: &str = "userid";
/// Header carrying the plaintext secret.
pub const HEADER_USER_PASS: &str = "userpass";

type SqliteArticleService<'conn> =
    ArticleService<SqliteAuthorRepository<'conn>, SqliteArticleRepository<'conn>>;

/// Raw credential header values as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestHeaders {
    pub user_id: Option<String>,
    pub user_pass: Option<String>,
}

impl RequestHeaders {
    pub fn new(user_id: impl Into<String>, user_pass: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            user_pass: Some(user_pass.into()),
        }
    }

    /// Picks the credential headers out of `(name, value)` pairs. Header
    /// names match case-insensitively; the last occurrence wins.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut headers = Self::default();
        for (name, value) in pairs {
            if name.eq_ignore_ascii_case(HEADER_USER_ID) {
                headers.user_id = Some(value.to_string());
            } else if name.eq_ignore_ascii_case(HEADER_USER_PASS) {
                headers.user_pass = Some(value.to_string());
            }
        }
        headers
    }

    /// Converts headers to credentials. A `userid` that is not an integer
    /// counts as missing.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            author_id: self
                .user_id
                .as_deref()
                .and_then(|value| value.trim().parse::<AuthorId>().ok()),
            secret: self.user_pass.clone(),
        }
    }
}

/// Status code plus optional JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl ApiResponse {
    fn empty(status: u16) -> Self {
        Self { status, body: None }
    }

    fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: Some(body),
        }
    }

    fn bad_request(err: &ApiError) -> Self {
        Self::json(status::BAD_REQUEST, json!({ "error": err.to_string() }))
    }
}

/// Request decoding failures.
#[derive(Debug)]
pub enum ApiError {
    MalformedBody(serde_json::Error),
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedBody(err) => write!(f, "malformed request body: {err}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedBody(err) => Some(err),
        }
    }
}

/// Article endpoints bound to one database file.
#[derive(Debug, Clone)]
pub struct ArticleApi {
    db_path: PathBuf,
}

impl ArticleApi {
    /// Binds to a database file. Each request migrates it on open when needed,
    /// so a fresh path is usable without `bootstrap`.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Migrates the database once (seeding example data when `seed` is set)
    /// and binds to it.
    pub fn bootstrap(db_path: impl Into<PathBuf>, seed: bool) -> DbResult<Self> {
        let db_path = db_path.into();
        if seed {
            open_db_with_seed(&db_path)?;
        } else {
            open_db(&db_path)?;
        }
        Ok(Self { db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// `GET /article/{id?}`
    pub fn list_articles(&self, article_id: Option<ArticleId>) -> ApiResponse {
        let articles = match self.with_service("list", |service| {
            service.list_articles(article_id, None)
        }) {
            Ok(articles) => articles,
            Err(response) => return response,
        };

        match serde_json::to_value(&articles) {
            Ok(body) => ApiResponse::json(status::OK, body),
            Err(err) => {
                error!("event=api_list module=api status=error error_code=encode_failed error={err}");
                ApiResponse::empty(status::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// `POST /article`
    pub fn create_article(&self, headers: &RequestHeaders, body: &str) -> ApiResponse {
        let draft: ArticleDraft = match decode_body(body) {
            Ok(draft) => draft,
            Err(err) => return ApiResponse::bad_request(&err),
        };
        let credentials = headers.credentials();
        if !credentials.is_complete() {
            return ApiResponse::empty(status::UNAUTHORIZED);
        }

        match self.with_service("create", |service| {
            service.create_article(&credentials, &draft)
        }) {
            Ok(outcome) => ApiResponse::empty(status::create_status(outcome)),
            Err(response) => response,
        }
    }

    /// `PATCH /article/{id}`
    pub fn update_article(
        &self,
        article_id: ArticleId,
        headers: &RequestHeaders,
        body: &str,
    ) -> ApiResponse {
        let patch: ArticlePatch = match decode_body(body) {
            Ok(patch) => patch,
            Err(err) => return ApiResponse::bad_request(&err),
        };
        let credentials = headers.credentials();
        if !credentials.is_complete() {
            return ApiResponse::empty(status::UNAUTHORIZED);
        }

        match self.with_service("update", |service| {
            service.update_article(&credentials, article_id, &patch)
        }) {
            Ok(outcome) => ApiResponse::empty(status::write_status(outcome)),
            Err(response) => response,
        }
    }

    /// `DELETE /article/{id}`
    pub fn delete_article(&self, article_id: ArticleId, headers: &RequestHeaders) -> ApiResponse {
        let credentials = headers.credentials();
        if !credentials.is_complete() {
            return ApiResponse::empty(status::UNAUTHORIZED);
        }

        match self.with_service("delete", |service| {
            service.delete_article(&credentials, article_id)
        }) {
            Ok(outcome) => ApiResponse::empty(status::write_status(outcome)),
            Err(response) => response,
        }
    }

    fn with_service<T>(
        &self,
        operation: &'static str,
        run: impl FnOnce(&SqliteArticleService<'_>) -> RepoResult<T>,
    ) -> Result<T, ApiResponse> {
        let conn = open_db(&self.db_path).map_err(|err| {
            error!(
                "event=api_{} module=api status=error error_code=db_open_failed error={}",
                operation, err
            );
            ApiResponse::empty(status::INTERNAL_SERVER_ERROR)
        })?;

        let service = ArticleService::new(
            SqliteAuthorRepository::new(&conn),
            SqliteArticleRepository::new(&conn),
        );
        run(&service).map_err(|err| {
            let code = status::fault_status(&err);
            if code == status::BAD_REQUEST {
                warn!(
                    "event=api_{} module=api status=rejected error_code=validation error={}",
                    operation, err
                );
                ApiResponse::json(code, json!({ "error": err.to_string() }))
            } else {
                error!(
                    "event=api_{} module=api status=error error_code=repo_fault error={}",
                    operation, err
                );
                ApiResponse::empty(code)
            }
        })
    }
}

fn decode_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(ApiError::MalformedBody)
}
