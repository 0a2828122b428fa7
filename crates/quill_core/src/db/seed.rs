//! First-boot example data.
//!
//! # Invariants
//! - Seeding only runs against a database without authors, so restarts do not
//!   duplicate rows.
//! - All example rows are inserted in one transaction.

use super::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{params, Connection, TransactionBehavior};

struct SeedAuthor {
    secret: &'static str,
    is_sudoer: bool,
}

struct SeedArticle {
    title: &'static str,
    content: &'static str,
    author_id: i64,
}

const SEED_AUTHORS: &[SeedAuthor] = &[
    SeedAuthor {
        secret: "alicepw",
        is_sudoer: true,
    },
    SeedAuthor {
        secret: "bobpw",
        is_sudoer: false,
    },
];

const SEED_ARTICLES: &[SeedArticle] = &[
    SeedArticle {
        title: "Welcome to the blog",
        content: "This is the first example article.",
        author_id: 1,
    },
    SeedArticle {
        title: "Second post",
        content: "Another example article content.",
        author_id: 2,
    },
];

/// Inserts the example authors and articles when the author table is empty.
///
/// Returns `true` when rows were inserted and `false` when the database was
/// already populated.
///
/// # Errors
/// - `Seed` when an example row is rejected; the transaction is rolled back.
pub fn seed_example_data(conn: &mut Connection) -> DbResult<bool> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let authors: i64 = tx.query_row("SELECT COUNT(*) FROM author;", [], |row| row.get(0))?;
    if authors > 0 {
        debug!("event=db_seed module=db status=skipped authors={authors}");
        return Ok(false);
    }

    for author in SEED_AUTHORS {
        tx.execute(
            "INSERT INTO author (pw, sudoer) VALUES (?1, ?2);",
            params![author.secret, author.is_sudoer],
        )
        .map_err(|source| DbError::Seed {
            table: "author",
            source,
        })?;
    }
    for article in SEED_ARTICLES {
        tx.execute(
            "INSERT INTO article (title, content, author, deleted) VALUES (?1, ?2, ?3, 0);",
            params![article.title, article.content, article.author_id],
        )
        .map_err(|source| DbError::Seed {
            table: "article",
            source,
        })?;
    }
    tx.commit()?;

    info!(
        "event=db_seed module=db status=ok authors={} articles={}",
        SEED_AUTHORS.len(),
        SEED_ARTICLES.len()
    );
    Ok(true)
}
