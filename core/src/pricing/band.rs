use pricecut_common::config::{Config, PriceBand};
use rust_decimal::Decimal;

/// Finds the band whose `[min_price, max_price)` contains `price`.
///
/// Bands are sorted and contiguous, so a binary search on `min_price` is
/// enough. `None` means the price lies outside every band, which is an
/// ordinary outcome: the bands are not required to cover every price.
pub fn resolve(config: &Config, price: Decimal) -> Option<&PriceBand> {
    let bands = config.bands();
    let idx = bands.partition_point(|band| band.min_price() <= price);
    if idx == 0 {
        return None;
    }
    let band = &bands[idx - 1];
    band.contains(price).then_some(band)
}
