use rust_decimal::Decimal;

use super::TransactionType;

/// Totals derived from every stored transaction. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Balance {
    pub(crate) income: Decimal,
    pub(crate) outcome: Decimal,
    pub(crate) total: Decimal,
}

impl Balance {
    /// `None` when a sum leaves the range `Decimal` can represent.
    pub(crate) fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = (TransactionType, Decimal)>,
    {
        let mut balance = Self::default();
        for (kind, value) in values {
            match kind {
                TransactionType::Income => balance.income = balance.income.checked_add(value)?,
                TransactionType::Outcome => balance.outcome = balance.outcome.checked_add(value)?,
            }
        }
        balance.total = balance.income.checked_sub(balance.outcome)?;
        Some(balance)
    }
}
