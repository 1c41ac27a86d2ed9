mod schema;

use rusqlite::{params, params_from_iter, types::Type, Connection, OptionalExtension, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::error::{LedgerError, Result};
use crate::models::*;
use crate::store::LedgerStore;

const UPSERT_CATEGORY: &str = "INSERT INTO categories (title, created_at) VALUES (?1, ?2)
     ON CONFLICT(title) DO UPDATE SET title = excluded.title
     RETURNING id, title";

/// Titles bound per `IN (...)` lookup, well under SQLite's variable limit.
const TITLE_LOOKUP_CHUNK: usize = 500;

const INSERT_TRANSACTION: &str =
    "INSERT INTO transactions (title, value, type, category_id, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)";

pub(crate) struct Database {
    conn: Connection,
}

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        tracing::debug!("Opened ledger database at {}", path.display());
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        // Check if schema_version table exists
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            // Fresh database - apply full schema
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        // An empty version table counts as version 0.
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .optional()?
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!("Applying schema migration from version {from_version}");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }
}

impl LedgerStore for Database {
    // ── Categories ────────────────────────────────────────────

    fn find_categories_by_titles(&self, titles: &[String]) -> Result<Vec<Category>> {
        let mut found = Vec::new();
        for chunk in titles.chunks(TITLE_LOOKUP_CHUNK) {
            let placeholders: String = (0..chunk.len())
                .map(|i| format!("?{}", i + 1))
                .collect::<Vec<_>>()
                .join(",");
            let sql = format!("SELECT id, title FROM categories WHERE title IN ({placeholders})");

            let mut stmt = self.conn.prepare(&sql)?;
            let rows = stmt.query_map(params_from_iter(chunk.iter()), map_category)?;
            for row in rows {
                found.push(row?);
            }
        }
        // A title repeated across chunks matches the same row twice.
        found.sort_by_key(|c| c.id);
        found.dedup_by_key(|c| c.id);
        Ok(found)
    }

    fn upsert_category(&self, title: &str) -> Result<Category> {
        let now = chrono::Utc::now().to_rfc3339();
        Ok(self
            .conn
            .query_row(UPSERT_CATEGORY, params![title, now], map_category)?)
    }

    fn create_categories(&mut self, titles: &[String]) -> Result<Vec<Category>> {
        let now = chrono::Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut created = Vec::with_capacity(titles.len());
        for title in titles {
            created.push(tx.query_row(UPSERT_CATEGORY, params![title, now], map_category)?);
        }
        tx.commit()?;
        Ok(created)
    }

    fn get_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title FROM categories ORDER BY title")?;
        let rows = stmt.query_map([], map_category)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    // ── Transactions ──────────────────────────────────────────

    fn create_transaction(&self, txn: &Transaction) -> Result<Transaction> {
        self.conn.execute(
            INSERT_TRANSACTION,
            params![
                txn.title,
                txn.value.to_string(),
                txn.kind.as_str(),
                txn.category_id,
                txn.created_at,
            ],
        )?;
        Ok(Transaction {
            id: Some(self.conn.last_insert_rowid()),
            ..txn.clone()
        })
    }

    fn create_transactions(&mut self, txns: &[Transaction]) -> Result<Vec<Transaction>> {
        let tx = self.conn.transaction()?;
        let mut saved = Vec::with_capacity(txns.len());
        for txn in txns {
            tx.execute(
                INSERT_TRANSACTION,
                params![
                    txn.title,
                    txn.value.to_string(),
                    txn.kind.as_str(),
                    txn.category_id,
                    txn.created_at,
                ],
            )?;
            saved.push(Transaction {
                id: Some(tx.last_insert_rowid()),
                ..txn.clone()
            });
        }
        tx.commit()?;
        Ok(saved)
    }

    fn get_transactions(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, value, type, category_id, created_at
             FROM transactions ORDER BY id",
        )?;
        let rows = stmt.query_map([], map_transaction)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    fn delete_transaction(&self, id: i64) -> Result<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        Ok(deleted > 0)
    }

    // ── Balance ───────────────────────────────────────────────

    /// Sums in `Decimal` rather than SQL, since values are stored as text.
    fn compute_balance(&self) -> Result<Balance> {
        let mut stmt = self.conn.prepare("SELECT type, value FROM transactions")?;
        let rows = stmt.query_map([], |row| Ok((type_column(row, 0)?, decimal_column(row, 1)?)))?;
        let values = rows.collect::<std::result::Result<Vec<_>, _>>()?;
        Balance::from_values(values).ok_or(LedgerError::BalanceOverflow)
    }
}

fn map_category(row: &Row) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        title: row.get(1)?,
    })
}

fn map_transaction(row: &Row) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        value: decimal_column(row, 2)?,
        kind: type_column(row, 3)?,
        category_id: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn decimal_column(row: &Row, idx: usize) -> rusqlite::Result<Decimal> {
    let raw: String = row.get(idx)?;
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn type_column(row: &Row, idx: usize) -> rusqlite::Result<TransactionType> {
    let raw: String = row.get(idx)?;
    TransactionType::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("unknown transaction type '{raw}'").into(),
        )
    })
}

#[cfg(test)]
mod tests;
