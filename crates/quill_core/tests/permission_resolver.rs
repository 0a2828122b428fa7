use quill_core::db::open_db_in_memory;
use quill_core::{AuthorRepository, PermissionLevel, SqliteAuthorRepository};

#[test]
fn missing_identity_or_secret_resolves_to_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    assert_eq!(repo.authorize(None, Some("alicepw")).unwrap(), PermissionLevel::None);
    assert_eq!(repo.authorize(Some(1), None).unwrap(), PermissionLevel::None);
    assert_eq!(repo.authorize(None, None).unwrap(), PermissionLevel::None);
}

#[test]
fn missing_credentials_never_touch_storage() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE article; DROP TABLE author;")
        .unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    assert_eq!(repo.authorize(None, Some("x")).unwrap(), PermissionLevel::None);
    assert!(repo.authorize(Some(1), Some("x")).is_err());
}

#[test]
fn unknown_identity_resolves_to_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    assert_eq!(
        repo.authorize(Some(99), Some("alicepw")).unwrap(),
        PermissionLevel::None
    );
}

#[test]
fn seeded_authors_resolve_to_expected_levels() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    assert_eq!(
        repo.authorize(Some(1), Some("alicepw")).unwrap(),
        PermissionLevel::Super
    );
    assert_eq!(
        repo.authorize(Some(2), Some("bobpw")).unwrap(),
        PermissionLevel::Normal
    );
    assert_eq!(
        repo.authorize(Some(2), Some("wrong")).unwrap(),
        PermissionLevel::WrongLogin
    );
    assert_eq!(
        repo.authorize(Some(1), Some("bobpw")).unwrap(),
        PermissionLevel::WrongLogin
    );
}

#[test]
fn secret_comparison_is_exact() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    for candidate in ["bobpw ", "BOBPW", "bob", ""] {
        assert_eq!(
            repo.authorize(Some(2), Some(candidate)).unwrap(),
            PermissionLevel::WrongLogin,
            "candidate {candidate:?}"
        );
    }
}

#[test]
fn authorize_is_stable_without_intervening_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let first = repo.authorize(Some(2), Some("bobpw")).unwrap();
    let second = repo.authorize(Some(2), Some("bobpw")).unwrap();
    assert_eq!(first, second);
}

#[test]
fn get_author_reads_sudoer_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAuthorRepository::new(&conn);

    let alice = repo.get_author(1).unwrap().unwrap();
    assert!(alice.is_sudoer);
    assert!(alice.secret_matches("alicepw"));
    assert!(repo.get_author(3).unwrap().is_none());
}
