use crate::error::Result;
use crate::models::{Balance, Category, Transaction};
use crate::store::LedgerStore;

#[derive(Debug, Clone)]
pub(crate) struct ListedTransaction {
    pub(crate) transaction: Transaction,
    pub(crate) category: Option<Category>,
}

/// Every transaction, oldest first, with the balance they add up to.
#[derive(Debug, Clone)]
pub(crate) struct Listing {
    pub(crate) transactions: Vec<ListedTransaction>,
    pub(crate) balance: Balance,
}

pub(crate) struct TransactionLister<'a, S> {
    store: &'a S,
}

impl<'a, S: LedgerStore> TransactionLister<'a, S> {
    pub(crate) fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub(crate) fn list(&self) -> Result<Listing> {
        let categories = self.store.get_categories()?;
        let transactions = self
            .store
            .get_transactions()?
            .into_iter()
            .map(|transaction| ListedTransaction {
                category: Category::find_by_id(&categories, transaction.category_id).cloned(),
                transaction,
            })
            .collect();
        let balance = self.store.compute_balance()?;
        Ok(Listing {
            transactions,
            balance,
        })
    }
}
