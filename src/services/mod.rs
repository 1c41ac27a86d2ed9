mod create_transaction;
mod delete_transaction;
mod import_transactions;
mod list_transactions;

pub(crate) use create_transaction::{CreateTransactionRequest, TransactionCreator};
pub(crate) use delete_transaction::TransactionDeleter;
pub(crate) use import_transactions::{ImportOptions, TransactionImporter, UnresolvedPolicy};
pub(crate) use list_transactions::TransactionLister;
