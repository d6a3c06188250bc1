use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use clap::Args;
use colored::*;
use rust_decimal::Decimal;
use tracing::{Instrument, info_span};

use pricecut_adapters::clock::{FixedClock, SystemClock};
use pricecut_adapters::config_file::TomlConfigFile;
use pricecut_adapters::items::JsonItemFile;
use pricecut_adapters::notifier::{BestEffortNotifier, LogNotifier};
use pricecut_adapters::predictions::JsonPredictionFile;
use pricecut_adapters::repository::{InMemoryRepository, JsonLinesRepository};
use pricecut_adapters::timeout::TimeoutPredictions;
use pricecut_common::models::decision::{Decision, Reason};
use pricecut_core::application::config_store::ConfigStore;
use pricecut_core::application::pricing::PricingService;
use pricecut_core::ports::clock::Clock;
use pricecut_core::ports::items::ItemSource;
use pricecut_core::ports::repository::DecisionRepository;

use crate::terminal::{colors, format, print, progress};

pub const DEFAULT_TIMEOUT_MS: u64 = 2_000;

#[derive(Args)]
pub struct DecideArgs {
    /// Pricing config (TOML)
    #[arg(short, long)]
    pub config: PathBuf,
    /// Items to evaluate (JSON array)
    #[arg(short, long)]
    pub items: PathBuf,
    /// Predictions by item id (JSON object)
    #[arg(short, long)]
    pub predictions: PathBuf,
    /// Evaluate as of this instant (RFC 3339) instead of now
    #[arg(long)]
    pub now: Option<DateTime<Utc>>,
    /// Append decisions to this JSON-lines file
    #[arg(short, long)]
    pub out: Option<PathBuf>,
    /// Give up on a prediction after this many milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

pub async fn decide(args: DecideArgs) -> anyhow::Result<()> {
    // 1. Build every collaborator once
    let config = TomlConfigFile::new(&args.config).load()?;
    let store = Arc::new(ConfigStore::new(config));

    let items = JsonItemFile::new(&args.items).items().await?;
    if items.is_empty() {
        print::no_results();
        print::end_of_program();
        return Ok(());
    }

    let predictions = TimeoutPredictions::new(
        JsonPredictionFile::new(&args.predictions),
        Duration::from_millis(args.timeout_ms),
    );
    let clock: Box<dyn Clock> = match args.now {
        Some(now) => Box::new(FixedClock(now)),
        None => Box::new(SystemClock),
    };
    let repository: Box<dyn DecisionRepository> = match &args.out {
        Some(path) => Box::new(JsonLinesRepository::new(path)),
        None => Box::new(InMemoryRepository::new()),
    };

    let service = PricingService::new(
        store,
        Box::new(predictions),
        clock,
        repository,
        Box::new(BestEffortNotifier::new(LogNotifier)),
    );

    // 2. Evaluate
    let bar = progress::start(items.len());
    let on_evaluated = {
        let bar = bar.clone();
        move |count: usize| bar.set_position(count as u64)
    };

    let start_time: Instant = Instant::now();
    let result = service
        .evaluate_all(&items, Some(&on_evaluated))
        .instrument(info_span!("decide", items = items.len()))
        .await;
    bar.finish_and_clear();
    let decisions = result?;

    // 3. Present
    print_decisions(&decisions);
    print_summary(&decisions, start_time.elapsed());
    if let Some(path) = &args.out {
        print::print_status(format!("Decisions appended to {}", path.display()));
    }
    print::end_of_program();
    Ok(())
}

fn print_decisions(decisions: &[Decision]) {
    print::header("decisions");
    for (idx, decision) in decisions.iter().enumerate() {
        print::tree_head(idx, decision.item_id().as_str());
        print::as_tree_one_level(format::decision_to_details(decision));
        if idx + 1 != decisions.len() {
            print::print("");
        }
    }
}

fn print_summary(decisions: &[Decision], total_time: Duration) {
    let mut by_reason: BTreeMap<Reason, usize> = BTreeMap::new();
    for decision in decisions {
        *by_reason.entry(decision.reason()).or_default() += 1;
    }

    print::header("summary");
    for (reason, count) in &by_reason {
        print::print_status(format!("{:<18} {}", format::reason(*reason), count));
    }

    let total_cut: Decimal = decisions.iter().map(Decision::cut_amount).sum();
    let cuts: usize = decisions.iter().filter(|d| d.reason().is_cut()).count();

    let cuts: ColoredString = format!("{cuts} cut(s)").bold().green();
    let total_cut: ColoredString = format::money(total_cut).bold().color(colors::PRICE);
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();

    print::fat_separator();
    print::centerln(&format!(
        "{} items evaluated: {cuts} totalling {total_cut} in {total_time}",
        decisions.len()
    ));
}
