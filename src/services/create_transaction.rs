use rust_decimal::Decimal;

use crate::error::{LedgerError, Result};
use crate::models::{Transaction, TransactionType};
use crate::store::LedgerStore;

#[derive(Debug, Clone)]
pub(crate) struct CreateTransactionRequest {
    pub(crate) title: String,
    pub(crate) value: Decimal,
    pub(crate) kind: TransactionType,
    pub(crate) category: String,
}

impl CreateTransactionRequest {
    fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(LedgerError::InvalidInput("title must not be empty".into()));
        }
        if self.category.trim().is_empty() {
            return Err(LedgerError::InvalidInput("category must not be empty".into()));
        }
        if self.value <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "value must be positive, got {}",
                self.value
            )));
        }
        Ok(())
    }
}

/// Records a single transaction, creating its category on first use.
pub(crate) struct TransactionCreator<'a, S> {
    store: &'a S,
}

impl<'a, S: LedgerStore> TransactionCreator<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Outcomes may not exceed the current balance total. Nothing is written
    /// when the request is rejected.
    pub(crate) fn create(&self, request: CreateTransactionRequest) -> Result<Transaction> {
        request.validate()?;

        if request.kind == TransactionType::Outcome {
            let balance = self.store.compute_balance()?;
            if request.value > balance.total {
                tracing::info!(
                    "Rejected outcome '{}' of {}: balance total is {}",
                    request.title,
                    request.value,
                    balance.total
                );
                return Err(LedgerError::InsufficientBalance {
                    total: balance.total,
                });
            }
        }

        let category = self.store.upsert_category(request.category.trim())?;
        let transaction = self.store.create_transaction(&Transaction::new(
            request.title.trim().to_string(),
            request.value,
            request.kind,
            category.id,
        ))?;

        tracing::debug!(
            "Created {} transaction {:?} in category '{}'",
            transaction.kind,
            transaction.id,
            category.title
        );
        Ok(transaction)
    }
}
