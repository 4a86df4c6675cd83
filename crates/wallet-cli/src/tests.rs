//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use wallet_core::db::Database;
use wallet_core::models::{ChatRole, TransactionKind};

use crate::commands;

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

// ========== Ledger Command Tests ==========

#[test]
fn test_cmd_add_expense() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        "coffee",
        4.5,
        Some("2024-11-07"),
        None,
        false,
        Some("Food"),
        Some("happy"),
        None,
    );
    assert!(result.is_ok());

    let entries = db.list_transactions(None, None).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].description, "coffee");
    assert_eq!(entries[0].kind, TransactionKind::Expense);
    // Categories are bucketed lowercase
    assert_eq!(entries[0].category, "food");
}

#[test]
fn test_cmd_add_income() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        "paycheck",
        2500.0,
        Some("2024-11-01"),
        None,
        true,
        None,
        None,
        None,
    );
    assert!(result.is_ok());

    let entries = db.list_transactions(None, None).unwrap();
    assert_eq!(entries[0].kind, TransactionKind::Income);
    assert_eq!(entries[0].category, "other");
}

#[test]
fn test_cmd_add_defaults_date_to_today() {
    let db = setup_test_db();

    commands::cmd_add(&db, "snack", 3.0, None, None, false, None, None, None).unwrap();

    let entries = db.list_transactions(None, None).unwrap();
    let today = chrono::Local::now().date_naive();
    assert_eq!(entries[0].date, today.format("%Y-%m-%d").to_string());
}

#[test]
fn test_cmd_add_unparseable_date_still_stored() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        "mystery",
        9.0,
        Some("sometime last week"),
        None,
        false,
        None,
        None,
        None,
    );
    assert!(result.is_ok());

    let entries = db.list_transactions(None, None).unwrap();
    assert_eq!(entries[0].date, "sometime last week");
}

#[test]
fn test_cmd_add_invalid_mood() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        "snack",
        3.0,
        None,
        None,
        false,
        None,
        Some("ecstatic"),
        None,
    );
    assert!(result.is_err());
    assert_eq!(db.transaction_count().unwrap(), 0);
}

#[test]
fn test_cmd_list_empty() {
    let db = setup_test_db();
    let result = commands::cmd_list(&db, None, 20, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_list_with_kind_filter() {
    let db = setup_test_db();
    commands::cmd_add(&db, "coffee", 4.5, None, None, false, None, None, None).unwrap();
    commands::cmd_add(&db, "paycheck", 2500.0, None, None, true, None, None, None).unwrap();

    assert!(commands::cmd_list(&db, Some("expense"), 20, false).is_ok());
    assert!(commands::cmd_list(&db, Some("income"), 20, true).is_ok());
    assert!(commands::cmd_list(&db, Some("loans"), 20, false).is_err());
}

#[test]
fn test_cmd_delete() {
    let db = setup_test_db();
    commands::cmd_add(&db, "coffee", 4.5, None, None, false, None, None, None).unwrap();
    let id = db.list_transactions(None, None).unwrap()[0].id;

    let result = commands::cmd_delete(&db, id);
    assert!(result.is_ok());
    assert_eq!(db.transaction_count().unwrap(), 0);
}

#[test]
fn test_cmd_delete_not_found() {
    let db = setup_test_db();
    let result = commands::cmd_delete(&db, 9999);
    assert!(result.is_err());
}

// ========== Tracker Command Tests ==========

#[tokio::test]
async fn test_cmd_tracker_current_month() {
    let db = setup_test_db();
    commands::cmd_add(&db, "coffee", 4.5, None, None, false, None, None, None).unwrap();

    let result = commands::cmd_tracker(&db, None).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_tracker_explicit_month() {
    let db = setup_test_db();
    let result = commands::cmd_tracker(&db, Some("2024-11")).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cmd_tracker_invalid_month() {
    let db = setup_test_db();
    assert!(commands::cmd_tracker(&db, Some("2024-13")).await.is_err());
    assert!(commands::cmd_tracker(&db, Some("november")).await.is_err());
}

// ========== Report Command Tests ==========

#[test]
fn test_cmd_monthly_empty() {
    let db = setup_test_db();
    let result = commands::cmd_monthly(&db);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_monthly_with_data() {
    let db = setup_test_db();
    commands::cmd_add(
        &db,
        "groceries",
        85.0,
        Some("2024-11-05"),
        None,
        false,
        None,
        None,
        None,
    )
    .unwrap();

    let result = commands::cmd_monthly(&db);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_monthly_breakdown() {
    let db = setup_test_db();
    commands::cmd_add(
        &db,
        "groceries",
        85.0,
        Some("2024-11-05"),
        None,
        false,
        Some("food"),
        None,
        None,
    )
    .unwrap();

    assert!(commands::cmd_monthly_breakdown(&db, "2024-11").is_ok());
    assert!(commands::cmd_monthly_breakdown(&db, "november").is_err());
}

#[test]
fn test_cmd_moods() {
    let db = setup_test_db();
    // Empty first
    assert!(commands::cmd_moods(&db).is_ok());

    commands::cmd_add(
        &db,
        "ice cream",
        6.0,
        None,
        None,
        false,
        None,
        Some("happy"),
        None,
    )
    .unwrap();
    assert!(commands::cmd_moods(&db).is_ok());
}

// ========== Chat Command Tests ==========

#[test]
fn test_cmd_chat_history_empty() {
    let db = setup_test_db();
    let result = commands::cmd_chat_history(&db, "catty");
    assert!(result.is_ok());
}

#[test]
fn test_cmd_chat_history_with_data() {
    let db = setup_test_db();
    db.insert_message(ChatRole::User, "catty", "can I buy ice cream?")
        .unwrap();
    db.insert_message(ChatRole::Coach, "catty", "Meow. No.")
        .unwrap();

    let result = commands::cmd_chat_history(&db, "catty");
    assert!(result.is_ok());
}

#[test]
fn test_cmd_chat_clear() {
    let db = setup_test_db();
    db.insert_message(ChatRole::User, "catty", "hi").unwrap();
    db.insert_message(ChatRole::User, "future_me", "hello").unwrap();

    let result = commands::cmd_chat_clear(&db, "catty");
    assert!(result.is_ok());
    assert!(db.list_messages("catty", None).unwrap().is_empty());
    assert_eq!(db.list_messages("future_me", None).unwrap().len(), 1);
}

#[test]
fn test_cmd_chat_unknown_persona() {
    let db = setup_test_db();
    let result = commands::cmd_chat_history(&db, "clippy");
    assert!(result.is_err());
}

// ========== Export Command Tests ==========

#[test]
fn test_cmd_export() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let output_path = dir.path().join("export.csv");

    let db = setup_test_db();
    commands::cmd_add(&db, "coffee", 4.5, None, None, false, None, None, None).unwrap();

    let result = commands::cmd_export(&db, &output_path);
    assert!(result.is_ok());
    assert!(output_path.exists());

    let contents = std::fs::read_to_string(&output_path).unwrap();
    assert!(contents.contains("coffee"));
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = commands::cmd_init(&db_path);
    assert!(result.is_ok());
    assert!(db_path.exists());
}

#[test]
fn test_open_db() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    // Create, then reopen
    assert!(commands::open_db(&db_path).is_ok());
    assert!(commands::open_db(&db_path).is_ok());
}
