use crate::error::{LedgerError, Result};
use crate::store::LedgerStore;

pub(crate) struct TransactionDeleter<'a, S> {
    store: &'a S,
}

impl<'a, S: LedgerStore> TransactionDeleter<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub(crate) fn delete(&self, id: i64) -> Result<()> {
        if !self.store.delete_transaction(id)? {
            return Err(LedgerError::TransactionNotFound(id));
        }
        tracing::debug!("Deleted transaction {id}");
        Ok(())
    }
}
