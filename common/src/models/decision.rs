//! # Price-Cut Decision
//!
//! The result of one evaluation. Every evaluation produces exactly one
//! [`Decision`]; why no cut happened is told by its [`Reason`], never by an error.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::item::{Item, ItemId};

/// Why a decision came out the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    /// The full difference to the prediction was applied.
    Ok,
    /// The difference exceeded the band limit and was cut down to it.
    Capped,
    /// The last cut is too recent for the band's cooldown.
    Cooldown,
    /// The prediction was missing or could not be obtained.
    NoPrediction,
    /// The prediction is at or above the current price.
    NonPositiveCut,
    /// No band covers the current price.
    OutOfRange,
}

impl Reason {
    pub const ALL: [Reason; 6] = [
        Reason::Ok,
        Reason::Capped,
        Reason::Cooldown,
        Reason::NoPrediction,
        Reason::NonPositiveCut,
        Reason::OutOfRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::Ok => "ok",
            Reason::Capped => "capped",
            Reason::Cooldown => "cooldown",
            Reason::NoPrediction => "no_prediction",
            Reason::NonPositiveCut => "non_positive_cut",
            Reason::OutOfRange => "out_of_range",
        }
    }

    /// Whether this reason belongs to a decision that lowers the price.
    pub fn is_cut(&self) -> bool {
        matches!(self, Reason::Ok | Reason::Capped)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Only built by [`Decision::cut`] and [`Decision::no_cut`]. A stored
/// decision is checked against the same invariants when read back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDecision")]
pub struct Decision {
    item_id: ItemId,
    previous_price: Decimal,
    predicted_value: Option<Decimal>,
    cut_amount: Decimal,
    new_price: Decimal,
    reason: Reason,
    evaluated_at: DateTime<Utc>,
}

impl Decision {
    /// A decision that leaves the price untouched.
    pub fn no_cut(
        item: &Item,
        predicted_value: Option<Decimal>,
        reason: Reason,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            item_id: item.id.clone(),
            previous_price: item.current_price,
            predicted_value,
            cut_amount: Decimal::ZERO,
            new_price: item.current_price,
            reason,
            evaluated_at,
        }
    }

    /// A decision lowering the price by `cut_amount`.
    pub fn cut(
        item: &Item,
        predicted_value: Decimal,
        cut_amount: Decimal,
        reason: Reason,
        evaluated_at: DateTime<Utc>,
    ) -> Self {
        debug_assert!(cut_amount >= Decimal::ZERO, "cut amount must not be negative");
        Self {
            item_id: item.id.clone(),
            previous_price: item.current_price,
            predicted_value: Some(predicted_value),
            cut_amount,
            new_price: item.current_price - cut_amount,
            reason,
            evaluated_at,
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn previous_price(&self) -> Decimal {
        self.previous_price
    }

    pub fn predicted_value(&self) -> Option<Decimal> {
        self.predicted_value
    }

    pub fn cut_amount(&self) -> Decimal {
        self.cut_amount
    }

    pub fn new_price(&self) -> Decimal {
        self.new_price
    }

    pub fn reason(&self) -> Reason {
        self.reason
    }

    pub fn evaluated_at(&self) -> DateTime<Utc> {
        self.evaluated_at
    }
}

#[derive(Deserialize)]
struct StoredDecision {
    item_id: ItemId,
    previous_price: Decimal,
    predicted_value: Option<Decimal>,
    cut_amount: Decimal,
    new_price: Decimal,
    reason: Reason,
    evaluated_at: DateTime<Utc>,
}

impl TryFrom<StoredDecision> for Decision {
    type Error = String;

    fn try_from(stored: StoredDecision) -> Result<Self, Self::Error> {
        let item_id = &stored.item_id;
        if stored.cut_amount < Decimal::ZERO {
            return Err(format!("decision for {item_id}: negative cut_amount"));
        }
        if !stored.reason.is_cut() && !stored.cut_amount.is_zero() {
            return Err(format!(
                "decision for {item_id}: reason `{}` cannot carry a cut",
                stored.reason
            ));
        }
        if stored.previous_price.checked_sub(stored.cut_amount) != Some(stored.new_price) {
            return Err(format!(
                "decision for {item_id}: new_price must be previous_price - cut_amount"
            ));
        }

        Ok(Self {
            item_id: stored.item_id,
            previous_price: stored.previous_price,
            predicted_value: stored.predicted_value,
            cut_amount: stored.cut_amount,
            new_price: stored.new_price,
            reason: stored.reason,
            evaluated_at: stored.evaluated_at,
        })
    }
}
