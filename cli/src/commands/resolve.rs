use std::path::Path;

use colored::*;
use pricecut_adapters::config_file::TomlConfigFile;
use pricecut_core::pricing::band;
use rust_decimal::Decimal;

use crate::terminal::{colors, format, print};

pub fn resolve(path: &Path, price: Decimal) -> anyhow::Result<()> {
    let config = TomlConfigFile::new(path).load()?;

    match band::resolve(&config, price) {
        Some(band) => {
            let idx = config
                .bands()
                .iter()
                .position(|candidate| candidate == band)
                .unwrap_or_default();
            print::tree_head(idx, &format::band_title(band));
            print::as_tree_one_level(format::band_to_details(band, config.defaults().cut_unit));
        }
        None => {
            let (low, high) = config.covered_range();
            print::print_status(format!(
                "{} is {} (bands cover [{}, {}))",
                format::money(price).color(colors::PRICE),
                "out of range".color(colors::OUT_OF_RANGE).bold(),
                format::money(low),
                format::money(high)
            ));
        }
    }
    Ok(())
}
