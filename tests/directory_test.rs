mod helpers;

use orgbot::db;
use orgbot::directory::{self, query_directory};
use orgbot::error::{StoreError, ToolError};
use orgbot::llm::ToolCall;
use orgbot::tools::{DirectoryTool, Tool, ToolRegistry};
use tempfile::TempDir;

#[test]
fn seeded_directory_has_six_employees() {
    let (_tmp, path) = helpers::seeded_store();
    let listing = DirectoryTool::new(&path).list().unwrap();

    assert_eq!(listing.len(), 6);
    let names: Vec<&str> = listing.values().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Alice", "Bob", "Charlie", "David", "Eve", "Fred"]);
}

#[test]
fn root_has_no_manager() {
    let (_tmp, path) = helpers::seeded_store();
    let listing = DirectoryTool::new(&path).list().unwrap();

    let alice = &listing[&1];
    assert_eq!(alice.designation, "CEO");
    assert_eq!(alice.manager_id, None);
    assert_eq!(alice.manager_name, None);
}

#[test]
fn manager_name_matches_manager_id() {
    let (_tmp, path) = helpers::seeded_store();
    let listing = DirectoryTool::new(&path).list().unwrap();

    for record in listing.values() {
        match record.manager_id {
            Some(manager_id) => {
                assert_eq!(
                    record.manager_name.as_deref(),
                    Some(listing[&manager_id].name.as_str())
                );
            }
            None => assert_eq!(record.manager_name, None),
        }
    }
    assert_eq!(listing[&5].manager_name.as_deref(), Some("Bob"));
    assert_eq!(listing[&6].manager_name.as_deref(), Some("Charlie"));
}

#[test]
fn three_employees_report_to_alice() {
    let (_tmp, path) = helpers::seeded_store();
    let listing = DirectoryTool::new(&path).list().unwrap();

    let mut reports: Vec<&str> = listing
        .values()
        .filter(|r| r.manager_name.as_deref() == Some("Alice"))
        .map(|r| r.name.as_str())
        .collect();
    reports.sort();
    assert_eq!(reports, ["Bob", "Charlie", "David"]);
}

#[test]
fn reseeding_fails_and_leaves_data_unchanged() {
    let (_tmp, path) = helpers::seeded_store();
    let mut conn = db::open_database(&path).unwrap();

    let err = directory::seed(&mut conn).unwrap_err();
    assert!(matches!(err, StoreError::AlreadySeeded { id: 1 }));

    let listing = query_directory(&conn).unwrap();
    assert_eq!(listing.len(), 6);
    let edges: i64 = conn
        .query_row("SELECT COUNT(*) FROM reporting", [], |row| row.get(0))
        .unwrap();
    assert_eq!(edges, 5);
}

#[test]
fn ensure_seeded_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let mut conn = db::open_database(tmp.path().join("org.db")).unwrap();

    assert!(directory::ensure_seeded(&mut conn).unwrap());
    assert!(!directory::ensure_seeded(&mut conn).unwrap());
    assert_eq!(query_directory(&conn).unwrap().len(), 6);
}

#[tokio::test]
async fn tool_output_is_keyed_by_id() {
    let (_tmp, path) = helpers::seeded_store();
    let tool = DirectoryTool::new(&path);

    let value = tool.call(serde_json::json!({})).await.unwrap();

    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 6);
    assert_eq!(value["1"]["name"], "Alice");
    assert_eq!(value["1"]["manager_id"], serde_json::Value::Null);
    assert_eq!(value["1"]["manager_name"], serde_json::Value::Null);
    assert_eq!(value["5"]["designation"], "Head of Data & Analytics");
    assert_eq!(value["5"]["manager_id"], 2);
    assert_eq!(value["5"]["manager_name"], "Bob");
}

#[tokio::test]
async fn empty_store_returns_empty_listing() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("empty.db");
    db::open_database(&path).unwrap();

    let value = DirectoryTool::new(&path).call(serde_json::json!({})).await.unwrap();
    assert_eq!(value, serde_json::json!({}));
}

#[test]
fn missing_store_is_an_error_and_is_not_created() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing").join("org.db");

    let result = DirectoryTool::new(&path).list();

    assert!(matches!(result, Err(StoreError::Sqlite(_))));
    assert!(!path.exists());
    assert!(!tmp.path().join("missing").exists());
}

#[test]
fn uninitialized_store_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("blank.db");
    rusqlite::Connection::open(&path).unwrap();

    let result = DirectoryTool::new(&path).list();
    assert!(matches!(result, Err(StoreError::Sqlite(_))));
}

#[tokio::test]
async fn unreachable_store_is_an_error_not_an_empty_listing() {
    let tmp = TempDir::new().unwrap();
    // A directory cannot be opened as a database file.
    let tool = DirectoryTool::new(tmp.path());

    let err = tool.call(serde_json::json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::Store(_)));

    let registry = ToolRegistry::new().with(tool);
    let observation = registry
        .invoke(&ToolCall {
            id: "call_1".into(),
            name: "get_employees".into(),
            arguments: serde_json::json!({}),
        })
        .await;
    let value: serde_json::Value = serde_json::from_str(&observation.content).unwrap();
    assert!(value.get("error").is_some());
    assert_ne!(value, serde_json::json!({}));
}
