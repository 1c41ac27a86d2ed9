use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransactionType {
    Income,
    Outcome,
}

impl TransactionType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Outcome => "outcome",
        }
    }

    /// Exact, lowercase match. Anything else is not a transaction type.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s {
            "income" => Some(Self::Income),
            "outcome" => Some(Self::Outcome),
            _ => None,
        }
    }

    pub(crate) fn all() -> &'static [TransactionType] {
        &[Self::Income, Self::Outcome]
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Transaction {
    pub(crate) id: Option<i64>,
    pub(crate) title: String,
    pub(crate) value: Decimal,
    pub(crate) kind: TransactionType,
    pub(crate) category_id: i64,
    pub(crate) created_at: String,
}

impl Transaction {
    pub(crate) fn new(title: String, value: Decimal, kind: TransactionType, category_id: i64) -> Self {
        Self {
            id: None,
            title,
            value,
            kind,
            category_id,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Signed effect of this transaction on the balance total.
    pub(crate) fn signed_value(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.value,
            TransactionType::Outcome => -self.value,
        }
    }
}
