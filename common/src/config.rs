//! # Pricing Configuration
//!
//! The ordered list of price bands plus deployment-wide defaults.
//!
//! A [`Config`] can only be obtained through [`Config::load`] (or
//! [`Config::from_toml_str`], which parses and then loads). Loading checks every
//! invariant and either returns a value that holds them for its whole lifetime
//! or fails with **all** violations found:
//! * bands sorted ascending by `min_price`;
//! * adjacent bands contiguous (`bands[i].max_price == bands[i + 1].min_price`);
//! * `max_cut >= 0` and `cooldown_duration >= 0` for every band;
//! * every required field present, directly or through `[defaults]`.

use std::fmt;
use std::path::PathBuf;

use chrono::Duration;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub mod duration;
pub mod raw;

use raw::{RawBand, RawConfig, RawDefaults};

/// Largest scale a [`Decimal`] can carry.
pub const MAX_CUT_PRECISION: u32 = 28;
pub const DEFAULT_CUT_PRECISION: u32 = 2;

/// Unit in which every band's `max_cut` is expressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CutUnit {
    /// `max_cut` is an amount of money.
    #[default]
    Absolute,
    /// `max_cut` is a fraction of the current price (`0.05` = 5%).
    Ratio,
}

impl fmt::Display for CutUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutUnit::Absolute => f.write_str("absolute"),
            CutUnit::Ratio => f.write_str("ratio"),
        }
    }
}

/// How a fractional cut is brought to `cut_precision` decimal places.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rounding {
    /// Toward zero. Never cuts more than computed.
    #[default]
    Down,
    /// To the nearest value, ties to even.
    Nearest,
}

impl fmt::Display for Rounding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rounding::Down => f.write_str("down"),
            Rounding::Nearest => f.write_str("nearest"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Defaults {
    pub cut_unit: CutUnit,
    pub cut_precision: u32,
    pub rounding: Rounding,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            cut_unit: CutUnit::default(),
            cut_precision: DEFAULT_CUT_PRECISION,
            rounding: Rounding::default(),
        }
    }
}

/// A half-open price interval `[min_price, max_price)` with its own cut limit and cooldown.
#[derive(Clone, Debug, PartialEq)]
pub struct PriceBand {
    min_price: Decimal,
    max_price: Decimal,
    max_cut: Decimal,
    cooldown: Duration,
}

impl PriceBand {
    pub fn min_price(&self) -> Decimal {
        self.min_price
    }

    pub fn max_price(&self) -> Decimal {
        self.max_price
    }

    pub fn max_cut(&self) -> Decimal {
        self.max_cut
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn contains(&self, price: Decimal) -> bool {
        self.min_price <= price && price < self.max_price
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pricing config has {} violation(s): {}", .violations.len(), .violations.join("; "))]
pub struct ConfigValidationError {
    violations: Vec<String>,
}

impl ConfigValidationError {
    pub fn violations(&self) -> &[String] {
        &self.violations
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read pricing config {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse pricing config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] ConfigValidationError),
}

/// Validated, immutable pricing configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    bands: Vec<PriceBand>,
    defaults: Defaults,
}

impl Config {
    /// Parses a TOML document and validates it.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Ok(Self::load(raw)?)
    }

    /// Validates a parsed document, collecting every violation.
    pub fn load(raw: RawConfig) -> Result<Self, ConfigValidationError> {
        let mut violations: Vec<String> = Vec::new();
        let defaults = validate_defaults(&raw.defaults, &mut violations);

        if raw.bands.is_empty() {
            violations.push("at least one band is required".to_string());
        }

        let mut bands: Vec<PriceBand> = Vec::with_capacity(raw.bands.len());
        let mut previous: Option<&RawBand> = None;

        for (idx, band) in raw.bands.iter().enumerate() {
            if let Some(prev) = previous {
                check_neighbours(idx, prev, band, &mut violations);
            }
            let valid = validate_band(idx, band, &raw.defaults, &defaults, &mut violations);
            if let Some(valid) = valid {
                bands.push(valid);
            }
            previous = Some(band);
        }

        if !violations.is_empty() {
            return Err(ConfigValidationError { violations });
        }

        debug!(bands = bands.len(), cut_unit = %defaults.cut_unit, "pricing config loaded");
        Ok(Self { bands, defaults })
    }

    pub fn bands(&self) -> &[PriceBand] {
        &self.bands
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// `[lowest min_price, highest max_price)` covered by the bands.
    pub fn covered_range(&self) -> (Decimal, Decimal) {
        let low = self.bands.first().map(PriceBand::min_price).unwrap_or_default();
        let high = self.bands.last().map(PriceBand::max_price).unwrap_or_default();
        (low, high)
    }
}

fn validate_defaults(raw: &RawDefaults, violations: &mut Vec<String>) -> Defaults {
    let mut defaults = Defaults::default();

    if let Some(unit) = raw.cut_unit {
        defaults.cut_unit = unit;
    }
    if let Some(rounding) = raw.rounding {
        defaults.rounding = rounding;
    }
    if let Some(precision) = raw.cut_precision {
        if precision > MAX_CUT_PRECISION {
            violations.push(format!(
                "defaults: cut_precision {precision} exceeds {MAX_CUT_PRECISION}"
            ));
        } else {
            defaults.cut_precision = precision;
        }
    }

    if let Some(max_cut) = raw.max_cut {
        check_max_cut("defaults", max_cut, &defaults, violations);
    }
    if let Some(cooldown) = &raw.cooldown_duration {
        match cooldown.to_duration() {
            Ok(duration) => check_cooldown("defaults", duration, violations),
            Err(e) => violations.push(format!("defaults: invalid cooldown_duration: {e}")),
        }
    }

    defaults
}

fn validate_band(
    idx: usize,
    band: &RawBand,
    raw_defaults: &RawDefaults,
    defaults: &Defaults,
    violations: &mut Vec<String>,
) -> Option<PriceBand> {
    let label = format!("bands[{idx}]");

    let min_price = band.min_price;
    if min_price.is_none() {
        violations.push(format!("{label}: missing required field `min_price`"));
    }
    let max_price = band.max_price;
    if max_price.is_none() {
        violations.push(format!("{label}: missing required field `max_price`"));
    }
    if let (Some(min), Some(max)) = (min_price, max_price) {
        if min >= max {
            violations.push(format!(
                "{label}: min_price {min} must be below max_price {max}"
            ));
        }
    }

    let max_cut = match band.max_cut {
        Some(max_cut) => {
            check_max_cut(&label, max_cut, defaults, violations);
            Some(max_cut)
        }
        None if raw_defaults.max_cut.is_some() => raw_defaults.max_cut,
        None => {
            violations.push(format!(
                "{label}: missing required field `max_cut` and no default is set"
            ));
            None
        }
    };

    let cooldown = match &band.cooldown_duration {
        Some(raw) => match raw.to_duration() {
            Ok(duration) => {
                check_cooldown(&label, duration, violations);
                Some(duration)
            }
            Err(e) => {
                violations.push(format!("{label}: invalid cooldown_duration: {e}"));
                None
            }
        },
        // An unparseable default has already been reported.
        None if raw_defaults.cooldown_duration.is_some() => raw_defaults
            .cooldown_duration
            .as_ref()
            .and_then(|raw| raw.to_duration().ok()),
        None => {
            violations.push(format!(
                "{label}: missing required field `cooldown_duration` and no default is set"
            ));
            None
        }
    };

    Some(PriceBand {
        min_price: min_price?,
        max_price: max_price?,
        max_cut: max_cut?,
        cooldown: cooldown?,
    })
}

fn check_neighbours(idx: usize, prev: &RawBand, band: &RawBand, violations: &mut Vec<String>) {
    let before = idx - 1;

    if let (Some(prev_min), Some(min)) = (prev.min_price, band.min_price) {
        if min <= prev_min {
            violations.push(format!(
                "bands[{idx}]: min_price {min} must be greater than bands[{before}].min_price {prev_min} (bands must be sorted ascending)"
            ));
        }
    }

    if let (Some(prev_max), Some(min)) = (prev.max_price, band.min_price) {
        if prev_max < min {
            violations.push(format!(
                "bands[{before}].max_price {prev_max} leaves a gap before bands[{idx}].min_price {min}"
            ));
        } else if prev_max > min {
            violations.push(format!(
                "bands[{before}].max_price {prev_max} overlaps bands[{idx}].min_price {min}"
            ));
        }
    }
}

fn check_max_cut(
    label: &str,
    max_cut: Decimal,
    defaults: &Defaults,
    violations: &mut Vec<String>,
) {
    if max_cut < Decimal::ZERO {
        violations.push(format!("{label}: max_cut {max_cut} must not be negative"));
    }
    match defaults.cut_unit {
        CutUnit::Ratio if max_cut > Decimal::ONE => violations.push(format!(
            "{label}: max_cut {max_cut} must not exceed 1 when cut_unit is ratio"
        )),
        // an absolute cap must be a cut the engine can actually produce
        CutUnit::Absolute if max_cut.normalize().scale() > defaults.cut_precision => {
            violations.push(format!(
                "{label}: max_cut {max_cut} has more than {} decimal place(s)",
                defaults.cut_precision
            ))
        }
        _ => {}
    }
}

fn check_cooldown(label: &str, cooldown: Duration, violations: &mut Vec<String>) {
    if cooldown < Duration::zero() {
        violations.push(format!(
            "{label}: cooldown_duration of {}s must not be negative",
            cooldown.num_seconds()
        ));
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
