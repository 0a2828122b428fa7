//! Article use-case service.
//!
//! # Responsibility
//! - Resolve raw credentials into a `Caller` before any write.
//! - Reject unauthenticated and wrong-login callers before the store runs.
//! - Delegate list/create/update/delete to the article repository.
//!
//! # Invariants
//! - The store is only invoked for writes with `Normal` or `Super` callers.
//! - Outcomes stay transport-agnostic; status mapping lives in adapters.

use crate::model::article::{Article, ArticleDraft, ArticleId, ArticlePatch};
use crate::model::author::AuthorId;
use crate::model::permission::{ActionResult, Caller, PermissionLevel};
use crate::repo::article_repo::{ArticleListQuery, ArticleRepository};
use crate::repo::author_repo::AuthorRepository;
use crate::repo::RepoResult;

/// Claimed identity as supplied by the caller. Either half may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub author_id: Option<AuthorId>,
    pub secret: Option<String>,
}

impl Credentials {
    pub fn new(author_id: AuthorId, secret: impl Into<String>) -> Self {
        Self {
            author_id: Some(author_id),
            secret: Some(secret.into()),
        }
    }

    /// Credentials with neither identity nor secret.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_complete(&self) -> bool {
        self.author_id.is_some() && self.secret.is_some()
    }
}

/// Result of a credential-carrying create request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(ArticleId),
    /// Missing credentials or unknown identity.
    Unauthenticated,
    WrongLogin,
    /// The insert did not produce exactly one row.
    Failed,
}

/// Result of a credential-carrying update or delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Done(ActionResult),
    /// Missing credentials or unknown identity.
    Unauthenticated,
    WrongLogin,
}

enum Gate {
    Pass(Caller),
    Unauthenticated,
    WrongLogin,
}

/// Article service facade over author and article repositories.
pub struct ArticleService<A: AuthorRepository, R: ArticleRepository> {
    authors: A,
    articles: R,
}

impl<A: AuthorRepository, R: ArticleRepository> ArticleService<A, R> {
    pub fn new(authors: A, articles: R) -> Self {
        Self { authors, articles }
    }

    /// Resolves the permission level for `credentials`.
    pub fn authorize(&self, credentials: &Credentials) -> RepoResult<PermissionLevel> {
        self.authors
            .authorize(credentials.author_id, credentials.secret.as_deref())
    }

    /// Lists one article (`article_id` set) or up to `limit` articles.
    pub fn list_articles(
        &self,
        article_id: Option<ArticleId>,
        limit: Option<u32>,
    ) -> RepoResult<Vec<Article>> {
        let query = match article_id {
            Some(id) => ArticleListQuery::one(id),
            None => ArticleListQuery::all(limit),
        };
        self.articles.list_articles(&query)
    }

    pub fn create_article(
        &self,
        credentials: &Credentials,
        draft: &ArticleDraft,
    ) -> RepoResult<CreateOutcome> {
        let caller = match self.gate(credentials)? {
            Gate::Pass(caller) => caller,
            Gate::Unauthenticated => return Ok(CreateOutcome::Unauthenticated),
            Gate::WrongLogin => return Ok(CreateOutcome::WrongLogin),
        };
        Ok(match self.articles.insert_article(draft, &caller)? {
            Some(id) => CreateOutcome::Created(id),
            None => CreateOutcome::Failed,
        })
    }

    pub fn update_article(
        &self,
        credentials: &Credentials,
        article_id: ArticleId,
        patch: &ArticlePatch,
    ) -> RepoResult<WriteOutcome> {
        let caller = match self.gate(credentials)? {
            Gate::Pass(caller) => caller,
            Gate::Unauthenticated => return Ok(WriteOutcome::Unauthenticated),
            Gate::WrongLogin => return Ok(WriteOutcome::WrongLogin),
        };
        let result = self.articles.update_article(article_id, &caller, patch)?;
        Ok(WriteOutcome::Done(result))
    }

    pub fn delete_article(
        &self,
        credentials: &Credentials,
        article_id: ArticleId,
    ) -> RepoResult<WriteOutcome> {
        let caller = match self.gate(credentials)? {
            Gate::Pass(caller) => caller,
            Gate::Unauthenticated => return Ok(WriteOutcome::Unauthenticated),
            Gate::WrongLogin => return Ok(WriteOutcome::WrongLogin),
        };
        let result = self.articles.delete_article(article_id, &caller)?;
        Ok(WriteOutcome::Done(result))
    }

    fn gate(&self, credentials: &Credentials) -> RepoResult<Gate> {
        let Some(author_id) = credentials.author_id else {
            return Ok(Gate::Unauthenticated);
        };
        Ok(match self.authorize(credentials)? {
            PermissionLevel::None => Gate::Unauthenticated,
            PermissionLevel::WrongLogin => Gate::WrongLogin,
            level @ (PermissionLevel::Normal | PermissionLevel::Super) => {
                Gate::Pass(Caller::new(author_id, level))
            }
        })
    }
}
