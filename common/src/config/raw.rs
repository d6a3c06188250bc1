//! Unvalidated shape of the pricing document.
//!
//! Every field is optional here so that a missing field becomes a reported
//! violation instead of a parse error that hides the rest of the problems.

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::duration::RawDuration;
use crate::config::{CutUnit, Rounding};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub defaults: RawDefaults,
    #[serde(default)]
    pub bands: Vec<RawBand>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawDefaults {
    pub cut_unit: Option<CutUnit>,
    pub cut_precision: Option<u32>,
    pub rounding: Option<Rounding>,
    pub max_cut: Option<Decimal>,
    pub cooldown_duration: Option<RawDuration>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawBand {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub max_cut: Option<Decimal>,
    pub cooldown_duration: Option<RawDuration>,
}

impl RawBand {
    /// A fully specified band.
    pub fn new(
        min_price: Decimal,
        max_price: Decimal,
        max_cut: Decimal,
        cooldown: Duration,
    ) -> Self {
        Self {
            min_price: Some(min_price),
            max_price: Some(max_price),
            max_cut: Some(max_cut),
            cooldown_duration: Some(cooldown.into()),
        }
    }
}

impl RawConfig {
    pub fn with_bands(bands: Vec<RawBand>) -> Self {
        Self {
            defaults: RawDefaults::default(),
            bands,
        }
    }
}
