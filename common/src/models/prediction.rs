use rust_decimal::Decimal;

/// Answer of a prediction source for one item.
///
/// `Missing` means the source has no estimate for the item; `Failed` means
/// asking went wrong. The engine treats both the same way, adapters may not.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionResult {
    Available(Decimal),
    Missing,
    Failed(String),
}

impl PredictionResult {
    pub fn failed(cause: impl ToString) -> Self {
        Self::Failed(cause.to_string())
    }

    pub fn value(&self) -> Option<Decimal> {
        match self {
            Self::Available(value) => Some(*value),
            Self::Missing | Self::Failed(_) => None,
        }
    }
}

impl From<Option<Decimal>> for PredictionResult {
    fn from(value: Option<Decimal>) -> Self {
        match value {
            Some(value) => Self::Available(value),
            None => Self::Missing,
        }
    }
}
