#![allow(clippy::unwrap_used)]

use super::*;
use rust_decimal_macros::dec;

fn txn(title: &str, value: Decimal, kind: TransactionType, category_id: i64) -> Transaction {
    Transaction {
        id: None,
        title: title.into(),
        value,
        kind,
        category_id,
        created_at: "2024-01-10T00:00:00Z".into(),
    }
}

// ── Schema ────────────────────────────────────────────────────

#[test]
fn test_fresh_database_is_empty() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.get_categories().unwrap().is_empty());
    assert!(db.get_transactions().unwrap().is_empty());
}

#[test]
fn test_open_file_twice_keeps_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let db = Database::open(&path).unwrap();
        db.upsert_category("Food").unwrap();
    }
    let db = Database::open(&path).unwrap();
    let cats = db.get_categories().unwrap();
    assert_eq!(cats.len(), 1);
    assert_eq!(cats[0].title, "Food");
}

#[test]
fn test_empty_version_table_is_version_zero() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let db = Database::open(&path).unwrap();
        db.upsert_category("Food").unwrap();
        db.conn.execute("DELETE FROM schema_version", []).unwrap();
    }
    let db = Database::open(&path).unwrap();
    assert_eq!(db.get_categories().unwrap().len(), 1);
}

#[test]
fn test_unreadable_version_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ledger.db");
    {
        let db = Database::open(&path).unwrap();
        db.conn
            .execute("UPDATE schema_version SET version = 'v1'", [])
            .unwrap();
    }
    assert!(Database::open(&path).is_err());
}

// ── Categories ────────────────────────────────────────────────

#[test]
fn test_upsert_category_creates_once() {
    let db = Database::open_in_memory().unwrap();
    let first = db.upsert_category("Education").unwrap();
    let second = db.upsert_category("Education").unwrap();
    assert_eq!(first, second);
    assert_eq!(db.get_categories().unwrap().len(), 1);
}

#[test]
fn test_upsert_category_is_case_sensitive() {
    let db = Database::open_in_memory().unwrap();
    let upper = db.upsert_category("Work").unwrap();
    let lower = db.upsert_category("work").unwrap();
    assert_ne!(upper.id, lower.id);
    assert_eq!(db.get_categories().unwrap().len(), 2);
}

#[test]
fn test_duplicate_title_rejected_by_schema() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_category("Food").unwrap();
    let result = db.conn.execute(
        "INSERT INTO categories (title, created_at) VALUES ('Food', '')",
        [],
    );
    assert!(result.is_err());
}

#[test]
fn test_find_categories_by_titles() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_category("Food").unwrap();
    db.upsert_category("Work").unwrap();
    db.upsert_category("Travel").unwrap();

    let found = db
        .find_categories_by_titles(&["Work".into(), "Food".into(), "Missing".into()])
        .unwrap();
    let mut titles: Vec<&str> = found.iter().map(|c| c.title.as_str()).collect();
    titles.sort();
    assert_eq!(titles, vec!["Food", "Work"]);
}

#[test]
fn test_find_categories_by_titles_tolerates_repeats() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_category("Food").unwrap();
    let found = db
        .find_categories_by_titles(&["Food".into(), "Food".into()])
        .unwrap();
    assert_eq!(found.len(), 1);
}

#[test]
fn test_find_categories_by_titles_beyond_one_statement() {
    let mut db = Database::open_in_memory().unwrap();
    let stored: Vec<String> = (0..TITLE_LOOKUP_CHUNK * 2 + 100)
        .map(|i| format!("C{i}"))
        .collect();
    db.create_categories(&stored).unwrap();

    let mut wanted = stored.clone();
    wanted.push("Missing".into());
    wanted.push("C0".into());
    let found = db.find_categories_by_titles(&wanted).unwrap();

    assert_eq!(found.len(), stored.len());
    assert!(found.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_find_categories_by_titles_empty_input() {
    let db = Database::open_in_memory().unwrap();
    assert!(db.find_categories_by_titles(&[]).unwrap().is_empty());
}

#[test]
fn test_create_categories_returns_existing_rows() {
    let mut db = Database::open_in_memory().unwrap();
    let existing = db.upsert_category("Food").unwrap();

    let created = db
        .create_categories(&["Food".into(), "Work".into()])
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0], existing);
    assert_eq!(created[1].title, "Work");
    assert_eq!(db.get_categories().unwrap().len(), 2);
}

#[test]
fn test_get_categories_sorted_by_title() {
    let db = Database::open_in_memory().unwrap();
    db.upsert_category("Work").unwrap();
    db.upsert_category("Education").unwrap();
    let titles: Vec<String> = db
        .get_categories()
        .unwrap()
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles, vec!["Education", "Work"]);
}

// ── Transactions ──────────────────────────────────────────────

#[test]
fn test_transaction_insert_and_query() {
    let db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Food").unwrap();

    let saved = db
        .create_transaction(&txn("Lunch", dec!(12.34), TransactionType::Outcome, cat.id))
        .unwrap();
    assert!(saved.id.is_some());

    let all = db.get_transactions().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], saved);
    assert_eq!(all[0].value, dec!(12.34));
    assert_eq!(all[0].kind, TransactionType::Outcome);
}

#[test]
fn test_transaction_requires_existing_category() {
    let db = Database::open_in_memory().unwrap();
    let result = db.create_transaction(&txn("Orphan", dec!(1), TransactionType::Income, 999));
    assert!(result.is_err());
}

#[test]
fn test_batch_insert_keeps_order() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    let batch = vec![
        txn("First", dec!(1), TransactionType::Income, cat.id),
        txn("Second", dec!(2), TransactionType::Income, cat.id),
        txn("Third", dec!(3), TransactionType::Outcome, cat.id),
    ];

    let saved = db.create_transactions(&batch).unwrap();
    let titles: Vec<&str> = saved.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert!(saved.windows(2).all(|w| w[0].id < w[1].id));
}

#[test]
fn test_batch_insert_is_all_or_nothing() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    let batch = vec![
        txn("Good", dec!(1), TransactionType::Income, cat.id),
        txn("Bad", dec!(2), TransactionType::Income, 999),
    ];

    assert!(db.create_transactions(&batch).is_err());
    assert!(db.get_transactions().unwrap().is_empty());
}

#[test]
fn test_delete_transaction() {
    let db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    let saved = db
        .create_transaction(&txn("Gone", dec!(5), TransactionType::Income, cat.id))
        .unwrap();

    assert!(db.delete_transaction(saved.id.unwrap()).unwrap());
    assert!(!db.delete_transaction(saved.id.unwrap()).unwrap());
    assert!(db.get_transactions().unwrap().is_empty());
}

// ── Balance ───────────────────────────────────────────────────

#[test]
fn test_balance_empty_ledger() {
    let db = Database::open_in_memory().unwrap();
    assert_eq!(db.compute_balance().unwrap(), Balance::default());
}

#[test]
fn test_balance_sums_by_type() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    db.create_transactions(&[
        txn("Salary", dec!(1000), TransactionType::Income, cat.id),
        txn("Rent", dec!(150.25), TransactionType::Outcome, cat.id),
        txn("Food", dec!(49.75), TransactionType::Outcome, cat.id),
    ])
    .unwrap();

    let balance = db.compute_balance().unwrap();
    assert_eq!(balance.income, dec!(1000));
    assert_eq!(balance.outcome, dec!(200.00));
    assert_eq!(balance.total, dec!(800));
}

#[test]
fn test_balance_overflow_is_an_error() {
    let mut db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    let huge = Decimal::MAX - Decimal::ONE;
    db.create_transactions(&[
        txn("Jackpot", huge, TransactionType::Income, cat.id),
        txn("Jackpot again", huge, TransactionType::Income, cat.id),
    ])
    .unwrap();

    assert!(matches!(
        db.compute_balance().unwrap_err(),
        LedgerError::BalanceOverflow
    ));
}

#[test]
fn test_corrupt_value_is_an_error() {
    let db = Database::open_in_memory().unwrap();
    let cat = db.upsert_category("Misc").unwrap();
    db.conn
        .execute(
            "INSERT INTO transactions (title, value, type, category_id, created_at)
             VALUES ('Bad', 'abc', 'income', ?1, '')",
            params![cat.id],
        )
        .unwrap();
    assert!(db.compute_balance().is_err());
    assert!(db.get_transactions().is_err());
}
