use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Identifier of a priced listing.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Snapshot of a listing at evaluation time.
///
/// The engine only reads it. Where it came from (database, file, API) is
/// decided by whoever builds it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub current_price: Decimal,
    #[serde(default)]
    pub last_cut_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, current_price: Decimal) -> Self {
        Self {
            id: id.into(),
            current_price,
            last_cut_at: None,
        }
    }

    pub fn with_last_cut_at(mut self, last_cut_at: DateTime<Utc>) -> Self {
        self.last_cut_at = Some(last_cut_at);
        self
    }
}
