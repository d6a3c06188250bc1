use std::path::Path;

use colored::*;
use pricecut_adapters::config_file::TomlConfigFile;
use pricecut_common::config::{Config, ConfigError};

use crate::terminal::{colors, format, print};

pub fn check(path: &Path) -> anyhow::Result<()> {
    let config = match TomlConfigFile::new(path).load() {
        Ok(config) => config,
        Err(ConfigError::Invalid(invalid)) => {
            print::header("config rejected");
            for violation in invalid.violations() {
                print::print_violation(violation);
            }
            print::end_of_program();
            anyhow::bail!(
                "{} has {} violation(s)",
                path.display(),
                invalid.violations().len()
            );
        }
        Err(e) => return Err(e.into()),
    };

    print_config(&config);
    Ok(())
}

fn print_config(config: &Config) {
    let defaults = config.defaults();
    print::print_status(format!(
        "cut unit {}, {} decimal place(s), rounding {}",
        defaults.cut_unit.to_string().color(colors::ACCENT),
        defaults.cut_precision.to_string().color(colors::ACCENT),
        defaults.rounding.to_string().color(colors::ACCENT),
    ));

    print::header("price bands");
    for (idx, band) in config.bands().iter().enumerate() {
        print::tree_head(idx, &format::band_title(band));
        print::as_tree_one_level(format::band_to_details(band, defaults.cut_unit));
    }

    let (low, high) = config.covered_range();
    print::fat_separator();
    print::centerln(&format!(
        "Config OK: {} band(s) covering [{}, {})",
        config.bands().len().to_string().bold().green(),
        format::money(low),
        format::money(high)
    ));
}
