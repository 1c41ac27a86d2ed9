use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::files::FileStore;
use crate::import::{CsvDecoder, CsvRow};
use crate::models::{Category, Transaction};
use crate::store::LedgerStore;

/// What to do with a row whose category cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) enum UnresolvedPolicy {
    /// Fail the import before any transaction is written.
    #[default]
    Abort,
    /// Leave the row out and report it in [`ImportOutcome::unresolved`].
    Skip,
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ImportOptions {
    pub(crate) on_unresolved: UnresolvedPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnresolvedRow {
    pub(crate) line: u64,
    pub(crate) category: String,
}

impl From<UnresolvedRow> for LedgerError {
    fn from(row: UnresolvedRow) -> Self {
        LedgerError::CategoryResolutionFailure {
            line: row.line,
            category: row.category,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ImportOutcome {
    /// Persisted transactions, in file order.
    pub(crate) transactions: Vec<Transaction>,
    /// Rows without a title, type or value.
    pub(crate) skipped_rows: usize,
    pub(crate) unresolved: Vec<UnresolvedRow>,
    pub(crate) new_categories: usize,
}

/// Loads transactions from an uploaded CSV file, then removes the file.
///
/// Unlike [`super::TransactionCreator`], outcomes are not checked against
/// the balance.
pub(crate) struct TransactionImporter<'a, S, F> {
    store: &'a mut S,
    files: &'a F,
}

impl<'a, S: LedgerStore, F: FileStore> TransactionImporter<'a, S, F> {
    pub(crate) fn new(store: &'a mut S, files: &'a F) -> Self {
        Self { store, files }
    }

    pub(crate) fn import(&mut self, reference: &str, options: ImportOptions) -> Result<ImportOutcome> {
        let path = self.files.resolve(reference);
        if !self.files.exists(&path)? {
            return Err(LedgerError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        // The whole file is decoded before any category lookup, so the
        // lookup sees every title the file mentions.
        let decoded = CsvDecoder::decode(self.files.open(&path)?)?;

        if options.on_unresolved == UnresolvedPolicy::Abort {
            if let Some(row) = decoded.rows.iter().find(|r| r.category.is_empty()) {
                return Err(unresolved(row).into());
            }
        }

        let titles = decoded.category_titles();
        let existing = self.store.find_categories_by_titles(&titles)?;
        let missing: Vec<String> = titles
            .into_iter()
            .filter(|t| Category::find_by_title(&existing, t).is_none())
            .collect();
        let created = if missing.is_empty() {
            Vec::new()
        } else {
            self.store.create_categories(&missing)?
        };

        let lookup: HashMap<&str, i64> = existing
            .iter()
            .chain(created.iter())
            .map(|c| (c.title.as_str(), c.id))
            .collect();

        let mut pending = Vec::with_capacity(decoded.rows.len());
        let mut unresolved_rows = Vec::new();
        for row in &decoded.rows {
            match lookup.get(row.category.as_str()) {
                Some(&category_id) => pending.push(Transaction::new(
                    row.title.clone(),
                    row.value,
                    row.kind,
                    category_id,
                )),
                None => match options.on_unresolved {
                    UnresolvedPolicy::Abort => return Err(unresolved(row).into()),
                    UnresolvedPolicy::Skip => {
                        tracing::warn!(
                            "Skipping row {}: unresolved category '{}'",
                            row.line,
                            row.category
                        );
                        unresolved_rows.push(unresolved(row));
                    }
                },
            }
        }

        let transactions = self.store.create_transactions(&pending)?;

        if let Err(e) = self.files.delete(&path) {
            tracing::warn!("Imported {} but could not delete it: {e}", path.display());
        }

        tracing::info!(
            "Imported {} transactions from {} ({} skipped, {} unresolved, {} new categories)",
            transactions.len(),
            path.display(),
            decoded.skipped,
            unresolved_rows.len(),
            created.len()
        );

        Ok(ImportOutcome {
            transactions,
            skipped_rows: decoded.skipped,
            unresolved: unresolved_rows,
            new_categories: created.len(),
        })
    }
}

fn unresolved(row: &CsvRow) -> UnresolvedRow {
    UnresolvedRow {
        line: row.line,
        category: row.category.clone(),
    }
}
