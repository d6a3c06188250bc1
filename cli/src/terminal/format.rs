use chrono::Duration;
use colored::*;
use pricecut_common::config::{CutUnit, PriceBand};
use pricecut_common::models::decision::{Decision, Reason};
use rust_decimal::Decimal;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn money(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// `90061` seconds -> `1d 1h 1m 1s`. Zero units are left out.
pub fn duration(duration: Duration) -> String {
    let total = duration.num_seconds();
    if total == 0 {
        return "0s".to_string();
    }

    let sign = if total < 0 { "-" } else { "" };
    let mut rest = total.unsigned_abs();
    let mut parts: Vec<String> = Vec::new();

    for (unit, secs) in [("d", 86_400u64), ("h", 3_600), ("m", 60), ("s", 1)] {
        if rest >= secs {
            parts.push(format!("{}{}", rest / secs, unit));
            rest %= secs;
        }
    }

    format!("{sign}{}", parts.join(" "))
}

pub fn reason(reason: Reason) -> ColoredString {
    let color = match reason {
        Reason::Ok | Reason::Capped => colors::CUT,
        Reason::OutOfRange => colors::OUT_OF_RANGE,
        Reason::Cooldown | Reason::NoPrediction | Reason::NonPositiveCut => colors::NO_CUT,
    };
    reason.as_str().color(color).bold()
}

pub fn max_cut(amount: Decimal, unit: CutUnit) -> String {
    match unit {
        CutUnit::Absolute => money(amount),
        CutUnit::Ratio => format!("{}%", money(amount * Decimal::ONE_HUNDRED)),
    }
}

pub fn band_title(band: &PriceBand) -> String {
    format!("[{}, {})", money(band.min_price()), money(band.max_price()))
}

pub fn band_to_details(band: &PriceBand, unit: CutUnit) -> Vec<Detail> {
    vec![
        ("Max cut".to_string(), max_cut(band.max_cut(), unit).color(colors::PRICE)),
        ("Cooldown".to_string(), duration(band.cooldown()).color(colors::TEXT_DEFAULT)),
    ]
}

pub fn decision_to_details(decision: &Decision) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![(
        "Price".to_string(),
        money(decision.previous_price()).color(colors::PRICE),
    )];

    if let Some(predicted) = decision.predicted_value() {
        details.push(("Predicted".to_string(), money(predicted).color(colors::PRICE)));
    }

    if decision.reason().is_cut() {
        details.push((
            "Cut".to_string(),
            format!("-{}", money(decision.cut_amount())).color(colors::CUT),
        ));
        details.push((
            "New price".to_string(),
            money(decision.new_price()).color(colors::PRICE).bold(),
        ));
    }

    details.push(("Reason".to_string(), reason(decision.reason())));
    details
}
