//! # Decision Engine
//!
//! Composes the band lookup, the cooldown gate and the prediction gate into a
//! single [`Decision`]. The steps run in a fixed order and stop at the first
//! one that rules a cut out:
//!
//! 1. no band for the price        -> [`Reason::OutOfRange`]
//! 2. cooldown not elapsed         -> [`Reason::Cooldown`]
//! 3. prediction missing or failed -> [`Reason::NoPrediction`]
//! 4. prediction >= current price  -> [`Reason::NonPositiveCut`]
//! 5. difference above the cap     -> [`Reason::Capped`], otherwise [`Reason::Ok`]
//!
//! None of these is an error. [`decide`] is total over valid inputs and always
//! returns a decision.

use chrono::{DateTime, Utc};
use pricecut_common::config::{Config, CutUnit, Defaults, PriceBand, Rounding};
use pricecut_common::models::decision::{Decision, Reason};
use pricecut_common::models::item::Item;
use pricecut_common::models::prediction::PredictionResult;
use rayon::prelude::*;
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::debug;

use crate::pricing::band;
use crate::pricing::cooldown::{self, Cooldown};
use crate::pricing::prediction::{self, UsablePrediction};

/// Decides whether and by how much to cut `item`'s price.
pub fn decide(
    config: &Config,
    item: &Item,
    prediction: &PredictionResult,
    now: DateTime<Utc>,
) -> Decision {
    let decision = evaluate(config, item, prediction, now);
    debug!(
        item_id = %item.id,
        reason = %decision.reason(),
        cut_amount = %decision.cut_amount(),
        "price evaluated"
    );
    decision
}

/// Runs [`decide`] over pre-fetched inputs in parallel, keeping input order.
pub fn decide_batch(
    config: &Config,
    inputs: &[(Item, PredictionResult)],
    now: DateTime<Utc>,
) -> Vec<Decision> {
    inputs
        .par_iter()
        .map(|(item, prediction)| decide(config, item, prediction, now))
        .collect()
}

/// Whether the outcome for `item` still depends on its prediction.
///
/// `false` when the item is out of range or cooling down, so callers can skip
/// asking the prediction source altogether.
pub fn needs_prediction(config: &Config, item: &Item, now: DateTime<Utc>) -> bool {
    band::resolve(config, item.current_price)
        .is_some_and(|band| cooldown::check(band, item.last_cut_at, now).is_eligible())
}

fn evaluate(
    config: &Config,
    item: &Item,
    prediction: &PredictionResult,
    now: DateTime<Utc>,
) -> Decision {
    let Some(band) = band::resolve(config, item.current_price) else {
        return Decision::no_cut(item, None, Reason::OutOfRange, now);
    };

    if let Cooldown::NotElapsed { .. } = cooldown::check(band, item.last_cut_at, now) {
        return Decision::no_cut(item, None, Reason::Cooldown, now);
    }

    let UsablePrediction::Available(predicted) = prediction::normalize(prediction) else {
        return Decision::no_cut(item, None, Reason::NoPrediction, now);
    };

    if predicted >= item.current_price {
        return Decision::no_cut(item, Some(predicted), Reason::NonPositiveCut, now);
    }

    let cap = effective_cap(band, config.defaults(), item.current_price);
    debug_assert!(cap >= Decimal::ZERO, "validated band produced a negative cap: {cap}");

    // a difference too large for `Decimal` is above any cap
    let (cut, reason) = match item.current_price.checked_sub(predicted) {
        Some(raw_cut) if raw_cut <= cap => (raw_cut, Reason::Ok),
        _ => (cap, Reason::Capped),
    };

    let cut = round_within_cap(cut, cap, config.defaults());
    Decision::cut(item, predicted, cut, reason, now)
}

/// Maximum cut in money for this band and price.
fn effective_cap(band: &PriceBand, defaults: &Defaults, price: Decimal) -> Decimal {
    match defaults.cut_unit {
        CutUnit::Absolute => band.max_cut(),
        CutUnit::Ratio => band.max_cut() * price.max(Decimal::ZERO),
    }
}

fn round(amount: Decimal, precision: u32, rounding: Rounding) -> Decimal {
    let strategy = match rounding {
        Rounding::Down => RoundingStrategy::ToZero,
        Rounding::Nearest => RoundingStrategy::MidpointNearestEven,
    };
    amount.round_dp_with_strategy(precision, strategy)
}

/// Rounds to the configured precision without ever exceeding `cap`.
fn round_within_cap(cut: Decimal, cap: Decimal, defaults: &Defaults) -> Decimal {
    let rounded = round(cut, defaults.cut_precision, defaults.rounding);
    if rounded > cap {
        round(cap, defaults.cut_precision, Rounding::Down)
    } else {
        rounded.max(Decimal::ZERO)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
