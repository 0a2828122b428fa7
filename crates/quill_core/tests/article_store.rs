use quill_core::db::open_db_in_memory;
use quill_core::{
    ActionResult, ArticleDraft, ArticleListQuery, ArticlePatch, ArticleRepository, Caller,
    PermissionLevel, RepoError, SqliteArticleRepository, LIST_MAX_LIMIT,
};
use rusqlite::Connection;

const ALICE: Caller = Caller {
    id: 1,
    permission: PermissionLevel::Super,
};
const BOB: Caller = Caller {
    id: 2,
    permission: PermissionLevel::Normal,
};

fn title_patch(title: &str) -> ArticlePatch {
    ArticlePatch {
        title: Some(title.to_string()),
        content: None,
    }
}

fn insert_author(conn: &Connection, secret: &str, sudoer: bool) -> i64 {
    conn.execute(
        "INSERT INTO author (pw, sudoer) VALUES (?1, ?2);",
        rusqlite::params![secret, sudoer],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn list_returns_seeded_articles_in_id_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let articles = repo.list_articles(&ArticleListQuery::all(None)).unwrap();
    let ids: Vec<i64> = articles.iter().map(|article| article.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(articles[0].title, "Welcome to the blog");
    assert_eq!(articles[0].author_id, 1);
    assert!(articles.iter().all(|article| !article.deleted));
}

#[test]
fn list_by_id_returns_at_most_one_article() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let query = ArticleListQuery {
        article_id: Some(2),
        limit: Some(40),
    };
    let articles = repo.list_articles(&query).unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0].id, 2);

    assert!(repo
        .list_articles(&ArticleListQuery::one(404))
        .unwrap()
        .is_empty());
}

#[test]
fn list_applies_default_and_explicit_limits() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);
    for index in 0..8 {
        assert!(repo
            .create_article(&ArticleDraft::new(format!("post {index}"), "body"), &BOB)
            .unwrap());
    }

    assert_eq!(repo.list_articles(&ArticleListQuery::all(None)).unwrap().len(), 5);
    assert_eq!(repo.list_articles(&ArticleListQuery::all(Some(3))).unwrap().len(), 3);
    assert_eq!(repo.list_articles(&ArticleListQuery::all(Some(0))).unwrap().len(), 0);
    assert_eq!(
        repo.list_articles(&ArticleListQuery::all(Some(LIST_MAX_LIMIT + 1)))
            .unwrap()
            .len(),
        10
    );
}

#[test]
fn create_assigns_caller_as_author() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let id = repo
        .insert_article(&ArticleDraft::new("mine", "bob wrote this"), &BOB)
        .unwrap()
        .unwrap();
    let created = repo.list_articles(&ArticleListQuery::one(id)).unwrap();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].author_id, BOB.id);
    assert_eq!(created[0].content, "bob wrote this");
    assert!(!created[0].deleted);
}

#[test]
fn create_rejects_overlong_title_before_sql() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let err = repo
        .create_article(&ArticleDraft::new("t".repeat(51), "body"), &ALICE)
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[test]
fn update_reports_denial_before_rejecting_overlong_title() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);
    let long_title = title_patch(&"t".repeat(51));

    assert_eq!(
        repo.update_article(1, &BOB, &long_title).unwrap(),
        ActionResult::LackOfPermission
    );
    assert_eq!(
        repo.update_article(404, &ALICE, &long_title).unwrap(),
        ActionResult::NotExist
    );

    let err = repo.update_article(2, &BOB, &long_title).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    let untouched = repo.list_articles(&ArticleListQuery::one(2)).unwrap();
    assert_eq!(untouched[0].title, "Second post");
}

#[test]
fn create_reports_false_when_no_row_is_inserted() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER swallow_insert BEFORE INSERT ON article
         BEGIN SELECT RAISE(IGNORE); END;",
    )
    .unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    assert!(!repo
        .create_article(&ArticleDraft::new("lost", "body"), &ALICE)
        .unwrap());
}

#[test]
fn ownership_matrix_for_update_and_delete() {
    let conn = open_db_in_memory().unwrap();
    let carol_id = insert_author(&conn, "carolpw", false);
    let carol = Caller::new(carol_id, PermissionLevel::Normal);
    let repo = SqliteArticleRepository::new(&conn);

    let id = repo
        .insert_article(&ArticleDraft::new("bob's", "body"), &BOB)
        .unwrap()
        .unwrap();

    assert_eq!(
        repo.update_article(id, &carol, &title_patch("nope")).unwrap(),
        ActionResult::LackOfPermission
    );
    assert_eq!(
        repo.delete_article(id, &carol).unwrap(),
        ActionResult::LackOfPermission
    );
    assert_eq!(
        repo.update_article(id, &BOB, &title_patch("by owner")).unwrap(),
        ActionResult::Ok
    );
    assert_eq!(
        repo.update_article(id, &ALICE, &title_patch("by sudoer")).unwrap(),
        ActionResult::Ok
    );
    assert_eq!(repo.delete_article(id, &BOB).unwrap(), ActionResult::Ok);
}

#[test]
fn wrong_login_and_anonymous_callers_cannot_write_even_own_articles() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    for permission in [PermissionLevel::None, PermissionLevel::WrongLogin] {
        let caller = Caller::new(2, permission);
        assert_eq!(
            repo.update_article(2, &caller, &title_patch("x")).unwrap(),
            ActionResult::LackOfPermission
        );
        assert_eq!(
            repo.delete_article(2, &caller).unwrap(),
            ActionResult::LackOfPermission
        );
    }
}

#[test]
fn update_applies_only_supplied_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let content_only = ArticlePatch {
        title: None,
        content: Some("rewritten".to_string()),
    };
    assert_eq!(
        repo.update_article(2, &BOB, &content_only).unwrap(),
        ActionResult::Ok
    );

    let article = &repo.list_articles(&ArticleListQuery::one(2)).unwrap()[0];
    assert_eq!(article.title, "Second post");
    assert_eq!(article.content, "rewritten");
}

#[test]
fn empty_patch_is_ok_without_any_checks() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);
    let stranger = Caller::new(77, PermissionLevel::Normal);

    assert_eq!(
        repo.update_article(1, &stranger, &ArticlePatch::default()).unwrap(),
        ActionResult::Ok
    );
    assert_eq!(
        repo.update_article(404, &stranger, &ArticlePatch::default()).unwrap(),
        ActionResult::Ok
    );

    let article = &repo.list_articles(&ArticleListQuery::one(1)).unwrap()[0];
    assert_eq!(article.title, "Welcome to the blog");
    assert_eq!(article.content, "This is the first example article.");
}

#[test]
fn missing_article_yields_not_exist() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    assert_eq!(
        repo.update_article(404, &ALICE, &title_patch("x")).unwrap(),
        ActionResult::NotExist
    );
    assert_eq!(repo.delete_article(404, &ALICE).unwrap(), ActionResult::NotExist);
}

#[test]
fn deleted_article_is_terminal() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    assert_eq!(repo.delete_article(2, &ALICE).unwrap(), ActionResult::Ok);

    assert!(repo
        .list_articles(&ArticleListQuery::one(2))
        .unwrap()
        .is_empty());
    assert_eq!(
        repo.update_article(2, &ALICE, &title_patch("again")).unwrap(),
        ActionResult::NotExist
    );
    assert_eq!(repo.delete_article(2, &BOB).unwrap(), ActionResult::NotExist);

    let ids: Vec<i64> = repo
        .list_articles(&ArticleListQuery::all(None))
        .unwrap()
        .iter()
        .map(|article| article.id)
        .collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn delete_keeps_row_as_tombstone() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    assert_eq!(repo.delete_article(1, &ALICE).unwrap(), ActionResult::Ok);

    let deleted: i64 = conn
        .query_row("SELECT deleted FROM article WHERE id = 1;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(deleted, 1);
}

#[test]
fn unexpected_row_count_is_a_fault_and_rolls_back() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TRIGGER swallow_update BEFORE UPDATE ON article
         BEGIN SELECT RAISE(IGNORE); END;",
    )
    .unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    let err = repo
        .update_article(1, &ALICE, &title_patch("x"))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::UnexpectedRowCount {
            operation: "update",
            expected: 1,
            actual: 0,
        }
    ));

    let err = repo.delete_article(1, &ALICE).unwrap_err();
    assert!(matches!(
        err,
        RepoError::UnexpectedRowCount {
            operation: "delete",
            ..
        }
    ));

    conn.execute_batch("DROP TRIGGER swallow_update;").unwrap();
    let article = &repo.list_articles(&ArticleListQuery::one(1)).unwrap()[0];
    assert_eq!(article.title, "Welcome to the blog");
    assert!(conn.is_autocommit());
}

#[test]
fn seed_scenario_end_to_end() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn);

    assert_eq!(
        repo.update_article(1, &BOB, &title_patch("x")).unwrap(),
        ActionResult::LackOfPermission
    );
    assert_eq!(
        repo.update_article(1, &ALICE, &title_patch("x")).unwrap(),
        ActionResult::Ok
    );
    assert_eq!(
        repo.list_articles(&ArticleListQuery::one(1)).unwrap()[0].title,
        "x"
    );
    assert_eq!(repo.delete_article(2, &ALICE).unwrap(), ActionResult::Ok);
    assert!(repo
        .list_articles(&ArticleListQuery::one(2))
        .unwrap()
        .is_empty());
}
