//! Article repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide list/create/update/delete over the `article` table.
//! - Run the ownership check and the mutation in one transaction.
//!
//! # Invariants
//! - Reads and write targets are constrained to `deleted = 0`.
//! - Write transactions are `IMMEDIATE`, so the write lock is held from the
//!   ownership check until commit.
//! - Update and delete must affect exactly one row, otherwise the transaction
//!   is rolled back and `RepoError::UnexpectedRowCount` is returned.

use crate::model::article::{Article, ArticleDraft, ArticleId, ArticlePatch};
use crate::model::permission::{ActionResult, Caller};
use crate::repo::{parse_flag, RepoError, RepoResult};
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

/// Row cap used when a list request carries no limit.
pub const LIST_DEFAULT_LIMIT: u32 = 5;
/// Hard cap applied to every list request.
pub const LIST_MAX_LIMIT: u32 = 100;

const ARTICLE_SELECT_SQL: &str = "SELECT
    id,
    title,
    content,
    author,
    deleted
FROM article";

/// Query options for listing articles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArticleListQuery {
    /// Single-article lookup; forces the effective limit to 1.
    pub article_id: Option<ArticleId>,
    /// Maximum rows to return. Defaults to 5 and clamps to 100.
    pub limit: Option<u32>,
}

impl ArticleListQuery {
    pub fn one(article_id: ArticleId) -> Self {
        Self {
            article_id: Some(article_id),
            limit: None,
        }
    }

    pub fn all(limit: Option<u32>) -> Self {
        Self {
            article_id: None,
            limit,
        }
    }

    /// Effective row cap for this query.
    pub fn applied_limit(&self) -> u32 {
        if self.article_id.is_some() {
            return 1;
        }
        normalize_list_limit(self.limit)
    }
}

/// Repository interface for article operations.
pub trait ArticleRepository {
    /// Lists non-deleted articles. No authorization is involved.
    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>>;

    /// Inserts a new article owned by `caller`.
    ///
    /// Returns the new id when exactly one row was inserted.
    fn insert_article(&self, draft: &ArticleDraft, caller: &Caller)
        -> RepoResult<Option<ArticleId>>;

    /// Inserts a new article owned by `caller`; `true` iff one row was inserted.
    ///
    /// The caller must already hold `Normal` or `Super`; permission is not
    /// re-derived here.
    fn create_article(&self, draft: &ArticleDraft, caller: &Caller) -> RepoResult<bool> {
        Ok(self.insert_article(draft, caller)?.is_some())
    }

    /// Applies the supplied fields of `patch` after the ownership check.
    ///
    /// Denials win over payload validation: a caller that may not write the
    /// article learns nothing from the shape of its patch.
    fn update_article(
        &self,
        article_id: ArticleId,
        caller: &Caller,
        patch: &ArticlePatch,
    ) -> RepoResult<ActionResult>;

    /// Removes an article after the ownership check.
    fn delete_article(&self, article_id: ArticleId, caller: &Caller) -> RepoResult<ActionResult>;
}

/// SQLite-backed article repository.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn begin_write(&self) -> RepoResult<Transaction<'conn>> {
        Ok(Transaction::new_unchecked(
            self.conn,
            TransactionBehavior::Immediate,
        )?)
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn list_articles(&self, query: &ArticleListQuery) -> RepoResult<Vec<Article>> {
        let limit = query.applied_limit();
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut sql = format!("{ARTICLE_SELECT_SQL} WHERE deleted = 0");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(article_id) = query.article_id {
            sql.push_str(" AND id = ?");
            bind_values.push(Value::Integer(article_id));
        }

        sql.push_str(" ORDER BY id ASC LIMIT ?");
        bind_values.push(Value::Integer(i64::from(limit)));

        let tx = self.conn.unchecked_transaction()?;
        let articles = {
            let mut stmt = tx.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut articles = Vec::new();
            while let Some(row) = rows.next()? {
                articles.push(parse_article_row(row)?);
            }
            articles
        };
        tx.commit()?;

        debug!(
            "event=article_list module=repo status=ok single={} limit={} returned={}",
            query.article_id.is_some(),
            limit,
            articles.len()
        );
        Ok(articles)
    }

    fn insert_article(
        &self,
        draft: &ArticleDraft,
        caller: &Caller,
    ) -> RepoResult<Option<ArticleId>> {
        draft.validate()?;

        let tx = self.begin_write()?;
        let inserted = tx.execute(
            "INSERT INTO article (title, content, author, deleted) VALUES (?1, ?2, ?3, 0);",
            params![draft.title.as_str(), draft.content.as_str(), caller.id],
        )?;
        if inserted != 1 {
            error!(
                "event=article_create module=repo status=error author_id={} inserted={}",
                caller.id, inserted
            );
            return Ok(None);
        }
        let article_id = tx.last_insert_rowid();
        tx.commit()?;

        info!(
            "event=article_create module=repo status=ok article_id={} author_id={}",
            article_id, caller.id
        );
        Ok(Some(article_id))
    }

    fn update_article(
        &self,
        article_id: ArticleId,
        caller: &Caller,
        patch: &ArticlePatch,
    ) -> RepoResult<ActionResult> {
        if patch.is_empty() {
            return Ok(ActionResult::Ok);
        }

        let tx = self.begin_write()?;
        let check = check_write_permission(&tx, article_id, caller)?;
        if check != ActionResult::Ok {
            log_denied("article_update", article_id, caller, check);
            return Ok(check);
        }
        patch.validate()?;

        let mut assignments = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();
        if let Some(title) = patch.title.as_ref() {
            assignments.push("title = ?");
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        bind_values.push(Value::Integer(article_id));

        let sql = format!(
            "UPDATE article SET {} WHERE id = ? AND deleted = 0;",
            assignments.join(", ")
        );
        let changed = tx.execute(&sql, params_from_iter(bind_values))?;
        expect_single_row("update", changed)?;
        tx.commit()?;

        info!(
            "event=article_update module=repo status=ok article_id={} author_id={} title={} content={}",
            article_id,
            caller.id,
            patch.title.is_some(),
            patch.content.is_some()
        );
        Ok(ActionResult::Ok)
    }

    fn delete_article(&self, article_id: ArticleId, caller: &Caller) -> RepoResult<ActionResult> {
        let tx = self.begin_write()?;
        let check = check_write_permission(&tx, article_id, caller)?;
        if check != ActionResult::Ok {
            log_denied("article_delete", article_id, caller, check);
            return Ok(check);
        }

        let changed = tx.execute(
            "UPDATE article SET deleted = 1 WHERE id = ?1 AND deleted = 0;",
            [article_id],
        )?;
        expect_single_row("delete", changed)?;
        tx.commit()?;

        info!(
            "event=article_delete module=repo status=ok article_id={} author_id={}",
            article_id, caller.id
        );
        Ok(ActionResult::Ok)
    }
}

/// Normalizes a list limit: absent means `LIST_DEFAULT_LIMIT`, anything above
/// `LIST_MAX_LIMIT` is clamped.
pub fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(value) if value > LIST_MAX_LIMIT => LIST_MAX_LIMIT,
        Some(value) => value,
        None => LIST_DEFAULT_LIMIT,
    }
}

/// Ownership check shared by update and delete.
///
/// Returns `ActionResult::Ok` when `caller` may mutate the article, otherwise
/// the denial to hand back unchanged.
fn check_write_permission(
    tx: &Transaction<'_>,
    article_id: ArticleId,
    caller: &Caller,
) -> RepoResult<ActionResult> {
    let owner: Option<i64> = tx
        .query_row(
            "SELECT author FROM article WHERE id = ?1 AND deleted = 0 LIMIT 1;",
            [article_id],
            |row| row.get(0),
        )
        .optional()?;

    let Some(owner) = owner else {
        return Ok(ActionResult::NotExist);
    };
    if !caller.may_write(owner) {
        return Ok(ActionResult::LackOfPermission);
    }
    Ok(ActionResult::Ok)
}

fn expect_single_row(operation: &'static str, actual: usize) -> RepoResult<()> {
    if actual == 1 {
        return Ok(());
    }
    error!(
        "event=article_{} module=repo status=error error_code=unexpected_row_count affected={}",
        operation, actual
    );
    Err(RepoError::UnexpectedRowCount {
        operation,
        expected: 1,
        actual,
    })
}

fn log_denied(event: &str, article_id: ArticleId, caller: &Caller, result: ActionResult) {
    info!(
        "event={} module=repo status=denied article_id={} author_id={} level={} result={}",
        event,
        article_id,
        caller.id,
        caller.permission.as_str(),
        result.as_str()
    );
}

fn parse_article_row(row: &Row<'_>) -> RepoResult<Article> {
    let deleted = parse_flag(row.get("deleted")?, "article.deleted")?;
    Ok(Article {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        author_id: row.get("author")?,
        deleted,
    })
}
