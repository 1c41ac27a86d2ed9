mod balance;
mod category;
mod transaction;

pub(crate) use balance::Balance;
pub(crate) use category::Category;
pub(crate) use transaction::{Transaction, TransactionType};
