//! Author lookup and permission resolution.
//!
//! # Responsibility
//! - Read author identity records.
//! - Resolve a claimed identity and secret into a `PermissionLevel`.
//!
//! # Invariants
//! - Missing identity or secret resolves to `None` without touching storage.
//! - Lookup and comparison happen inside one read transaction.
//! - Resolution never writes.

use crate::model::author::{Author, AuthorId};
use crate::model::permission::PermissionLevel;
use crate::repo::{parse_flag, RepoResult};
use log::debug;
use rusqlite::{Connection, OptionalExtension, Row};

/// Repository interface for author reads.
pub trait AuthorRepository {
    /// Gets one author by id.
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    /// Resolves the caller's permission level.
    fn authorize(
        &self,
        identity: Option<AuthorId>,
        secret: Option<&str>,
    ) -> RepoResult<PermissionLevel>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        load_author(self.conn, id)
    }

    fn authorize(
        &self,
        identity: Option<AuthorId>,
        secret: Option<&str>,
    ) -> RepoResult<PermissionLevel> {
        let (Some(id), Some(secret)) = (identity, secret) else {
            return Ok(PermissionLevel::None);
        };

        let tx = self.conn.unchecked_transaction()?;
        let author = load_author(&tx, id)?;
        tx.commit()?;

        let level = resolve_permission(author.as_ref(), secret);
        debug!(
            "event=authorize module=repo status=ok author_id={} level={}",
            id,
            level.as_str()
        );
        Ok(level)
    }
}

/// Maps a looked-up author and the supplied secret to a permission level.
pub fn resolve_permission(author: Option<&Author>, secret: &str) -> PermissionLevel {
    match author {
        None => PermissionLevel::None,
        Some(author) if !author.secret_matches(secret) => PermissionLevel::WrongLogin,
        Some(author) if author.is_sudoer => PermissionLevel::Super,
        Some(_) => PermissionLevel::Normal,
    }
}

fn load_author(conn: &Connection, id: AuthorId) -> RepoResult<Option<Author>> {
    let row = conn
        .query_row(
            "SELECT id, pw, sudoer FROM author WHERE id = ?1 LIMIT 1;",
            [id],
            read_author_row,
        )
        .optional()?;

    match row {
        Some((id, secret, sudoer)) => Ok(Some(Author {
            id,
            secret,
            is_sudoer: parse_flag(sudoer, "author.sudoer")?,
        })),
        None => Ok(None),
    }
}

fn read_author_row(row: &Row<'_>) -> rusqlite::Result<(AuthorId, String, i64)> {
    Ok((row.get("id")?, row.get("pw")?, row.get("sudoer")?))
}
