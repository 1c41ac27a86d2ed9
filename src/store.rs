//! The persistence seam the services are written against.

use crate::error::Result;
use crate::models::{Balance, Category, Transaction};

/// Relational access to transactions and categories.
///
/// Writes are visible to every later read made through the same store.
pub(crate) trait LedgerStore {
    /// All categories whose title is in `titles`, in one query.
    fn find_categories_by_titles(&self, titles: &[String]) -> Result<Vec<Category>>;

    /// Insert a category, or return the existing row if the title is taken.
    fn upsert_category(&self, title: &str) -> Result<Category>;

    /// Upsert every title inside a single SQL transaction.
    fn create_categories(&mut self, titles: &[String]) -> Result<Vec<Category>>;

    fn create_transaction(&self, txn: &Transaction) -> Result<Transaction>;

    /// Insert all transactions or none of them.
    fn create_transactions(&mut self, txns: &[Transaction]) -> Result<Vec<Transaction>>;

    fn compute_balance(&self) -> Result<Balance>;

    fn get_categories(&self) -> Result<Vec<Category>>;

    fn get_transactions(&self) -> Result<Vec<Transaction>>;

    /// Returns `false` when no transaction has this id.
    fn delete_transaction(&self, id: i64) -> Result<bool>;
}
