use super::*;

#[test]
fn open_creates_all_tables() {
    let root = temp_dir("fresh");
    let db = Database::open(root.join("data.sqlite")).unwrap();
    assert_eq!(db.list_tables().unwrap(), vec!["event", "guest", "host", "band"]);
    assert_eq!(db.path(), Some(root.join("data.sqlite").as_path()));
    db.close().unwrap();
}

#[test]
fn reopen_keeps_existing_tables_untouched() {
    let root = temp_dir("reopen_schema");
    let path = root.join("data.sqlite");
    let db = Database::open(&path).unwrap();
    db.insert(&event("Gala")).unwrap();
    db.close().unwrap();

    let db = Database::open(&path).unwrap();
    assert_eq!(db.list_tables().unwrap().len(), 4);
    assert_eq!(db.keys(TableKind::Event).unwrap().as_slice(), ["Gala"]);
}

#[test]
fn internal_tables_are_hidden() {
    let db = Database::open_in_memory().unwrap();
    db.insert(&event("Gala")).unwrap();
    let tables = db.list_tables().unwrap();
    assert!(!tables.iter().any(|t| t.starts_with('_')));
    assert!(db.store().table_exists("_key_sequence").unwrap());
}

#[test]
fn open_on_directory_fails() {
    let root = temp_dir("dir_as_file");
    let err = Database::open(&root).unwrap_err();
    assert!(matches!(err, CoreError::StoreFailure(_)));
}
