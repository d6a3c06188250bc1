use chrono::{DateTime, Duration, Utc};
use pricecut_common::config::PriceBand;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cooldown {
    Eligible,
    /// The band's cooldown has not passed yet; `remaining` is how long is left.
    NotElapsed { remaining: Duration },
}

impl Cooldown {
    pub fn is_eligible(&self) -> bool {
        matches!(self, Cooldown::Eligible)
    }
}

/// Eligible iff the item was never cut or `now - last_cut_at >= cooldown`.
///
/// `now` comes from the caller's clock, never from the system.
pub fn check(band: &PriceBand, last_cut_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Cooldown {
    let Some(last_cut_at) = last_cut_at else {
        return Cooldown::Eligible;
    };

    let elapsed = now.signed_duration_since(last_cut_at);
    if elapsed >= band.cooldown() {
        Cooldown::Eligible
    } else {
        Cooldown::NotElapsed {
            remaining: band.cooldown() - elapsed,
        }
    }
}
