#![cfg(test)]
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use pricecut_adapters::clock::FixedClock;
use pricecut_adapters::config_file::TomlConfigFile;
use pricecut_adapters::items::JsonItemFile;
use pricecut_adapters::notifier::{BestEffortNotifier, LogNotifier};
use pricecut_adapters::predictions::{JsonPredictionFile, StaticPredictions};
use pricecut_adapters::repository::{InMemoryRepository, JsonLinesRepository};
use pricecut_adapters::timeout::TimeoutPredictions;
use pricecut_common::config::Config;
use pricecut_common::models::decision::{Decision, Reason};
use pricecut_common::models::item::Item;
use pricecut_common::models::prediction::PredictionResult;
use pricecut_core::application::config_store::ConfigStore;
use pricecut_core::application::pricing::PricingService;
use pricecut_core::ports::items::ItemSource;
use pricecut_core::ports::notification::NotificationPort;
use rust_decimal::Decimal;

const PRICING_TOML: &str = r#"
[[bands]]
min_price = 0
max_price = 2000
max_cut = 100
cooldown_duration = "24h"
"#;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
}

fn dec(value: i64) -> Decimal {
    Decimal::from(value)
}

fn service(predictions: StaticPredictions, repository: Arc<InMemoryRepository>) -> PricingService {
    let config = Config::from_toml_str(PRICING_TOML).unwrap();
    PricingService::new(
        Arc::new(ConfigStore::new(config)),
        Box::new(predictions),
        Box::new(FixedClock(now())),
        Box::new(repository),
        Box::new(LogNotifier),
    )
}

async fn evaluate_one(item: Item, prediction: PredictionResult) -> (Decision, Vec<Decision>) {
    let repository = Arc::new(InMemoryRepository::new());
    let predictions = StaticPredictions::new().with(item.id.clone(), prediction);
    let decision = service(predictions, repository.clone())
        .evaluate(&item)
        .await
        .unwrap();
    (decision, repository.decisions())
}

/*************************************************************
                  Single item, in-memory adapters
**************************************************************/

#[tokio::test]
async fn raw_cut_above_band_limit_is_capped() {
    let item = Item::new("car-a", dec(1000)).with_last_cut_at(now() - Duration::hours(48));

    let (decision, recorded) = evaluate_one(item, PredictionResult::Available(dec(800))).await;

    assert_eq!(decision.cut_amount(), dec(100));
    assert_eq!(decision.new_price(), dec(900));
    assert_eq!(decision.reason(), Reason::Capped);
    assert_eq!(recorded, vec![decision]);
}

#[tokio::test]
async fn raw_cut_within_limit_is_applied() {
    let item = Item::new("car-b", dec(1000));

    let (decision, _) = evaluate_one(item, PredictionResult::Available(dec(950))).await;

    assert_eq!(decision.cut_amount(), dec(50));
    assert_eq!(decision.new_price(), dec(950));
    assert_eq!(decision.reason(), Reason::Ok);
}

#[tokio::test]
async fn recent_cut_blocks_another() {
    let item = Item::new("car-c", dec(1000)).with_last_cut_at(now() - Duration::hours(2));

    let (decision, recorded) = evaluate_one(item, PredictionResult::Available(dec(800))).await;

    assert_eq!(decision.cut_amount(), Decimal::ZERO);
    assert_eq!(decision.new_price(), dec(1000));
    assert_eq!(decision.reason(), Reason::Cooldown);
    assert_eq!(recorded.len(), 1);
}

#[tokio::test]
async fn missing_prediction_means_no_cut() {
    let item = Item::new("car-d", dec(1000));

    let (decision, _) = evaluate_one(item, PredictionResult::Missing).await;

    assert_eq!(decision.cut_amount(), Decimal::ZERO);
    assert_eq!(decision.reason(), Reason::NoPrediction);
    assert_eq!(decision.predicted_value(), None);
}

#[tokio::test]
async fn price_outside_every_band_is_out_of_range() {
    let item = Item::new("car-e", dec(2500));

    let (decision, _) = evaluate_one(item, PredictionResult::Available(dec(2000))).await;

    assert_eq!(decision.cut_amount(), Decimal::ZERO);
    assert_eq!(decision.new_price(), dec(2500));
    assert_eq!(decision.reason(), Reason::OutOfRange);
}

/*************************************************************
                   Batch run through file adapters
**************************************************************/

fn write(dir: &Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn batch_from_files_appends_json_lines() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write(dir.path(), "pricing.toml", PRICING_TOML);
    let items_path = write(
        dir.path(),
        "items.json",
        r#"[
            {"id": "car-a", "current_price": 1000, "last_cut_at": "2026-10-17T12:00:00Z"},
            {"id": "car-b", "current_price": 1000},
            {"id": "car-c", "current_price": 1000, "last_cut_at": "2026-10-19T10:00:00Z"},
            {"id": "car-d", "current_price": 1000},
            {"id": "car-e", "current_price": 2500},
            {"id": "car-f", "current_price": 1000}
        ]"#,
    );
    let predictions_path = write(
        dir.path(),
        "predictions.json",
        r#"{
            "car-a": 800,
            "car-b": "950",
            "car-c": 800,
            "car-d": null,
            "car-e": 2000,
            "car-f": {"error": "model not trained for this segment"}
        }"#,
    );
    let out_path = dir.path().join("decisions.jsonl");

    let config = TomlConfigFile::new(&config_path).load().unwrap();
    let items = JsonItemFile::new(&items_path).items().await.unwrap();
    let service = PricingService::new(
        Arc::new(ConfigStore::new(config)),
        Box::new(TimeoutPredictions::new(
            JsonPredictionFile::new(&predictions_path),
            std::time::Duration::from_secs(5),
        )),
        Box::new(FixedClock(now())),
        Box::new(JsonLinesRepository::new(&out_path)),
        Box::new(LogNotifier),
    );

    let decisions = service.evaluate_all(&items, None).await.unwrap();

    let reasons: Vec<Reason> = decisions.iter().map(Decision::reason).collect();
    assert_eq!(
        reasons,
        vec![
            Reason::Capped,
            Reason::Ok,
            Reason::Cooldown,
            Reason::NoPrediction,
            Reason::OutOfRange,
            Reason::NoPrediction,
        ]
    );

    let text = std::fs::read_to_string(&out_path).unwrap();
    let stored: Vec<Decision> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(stored, decisions);
}

#[tokio::test]
async fn unreadable_predictions_fail_every_item_without_aborting() {
    let dir = tempfile::tempdir().unwrap();
    let repository = Arc::new(InMemoryRepository::new());
    let service = PricingService::new(
        Arc::new(ConfigStore::new(Config::from_toml_str(PRICING_TOML).unwrap())),
        Box::new(JsonPredictionFile::new(dir.path().join("absent.json"))),
        Box::new(FixedClock(now())),
        Box::new(repository.clone()),
        Box::new(LogNotifier),
    );
    let items = vec![Item::new("a", dec(1000)), Item::new("b", dec(1500))];

    let decisions = service.evaluate_all(&items, None).await.unwrap();

    assert!(decisions.iter().all(|d| d.reason() == Reason::NoPrediction));
    assert_eq!(repository.decisions().len(), 2);
}

struct Unreachable;

#[async_trait::async_trait]
impl NotificationPort for Unreachable {
    async fn notify(&self, _decision: &Decision) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[tokio::test]
async fn failed_notification_does_not_stop_the_batch() {
    let repository = Arc::new(InMemoryRepository::new());
    let predictions = StaticPredictions::new()
        .with("a", PredictionResult::Available(dec(800)))
        .with("b", PredictionResult::Available(dec(1450)));
    let service = PricingService::new(
        Arc::new(ConfigStore::new(Config::from_toml_str(PRICING_TOML).unwrap())),
        Box::new(predictions),
        Box::new(FixedClock(now())),
        Box::new(repository.clone()),
        Box::new(BestEffortNotifier::new(Unreachable)),
    );
    let items = vec![Item::new("a", dec(1000)), Item::new("b", dec(1500))];

    let decisions = service.evaluate_all(&items, None).await.unwrap();

    let reasons: Vec<Reason> = decisions.iter().map(Decision::reason).collect();
    assert_eq!(reasons, vec![Reason::Capped, Reason::Ok]);
    assert_eq!(repository.decisions(), decisions);
}

#[tokio::test]
async fn reloaded_config_applies_to_next_evaluation() {
    let store = Arc::new(ConfigStore::new(Config::from_toml_str(PRICING_TOML).unwrap()));
    let repository = Arc::new(InMemoryRepository::new());
    let service = PricingService::new(
        store.clone(),
        Box::new(StaticPredictions::new().with("a", PredictionResult::Available(dec(800)))),
        Box::new(FixedClock(now())),
        Box::new(repository),
        Box::new(LogNotifier),
    );
    let item = Item::new("a", dec(1000));

    assert_eq!(service.evaluate(&item).await.unwrap().cut_amount(), dec(100));

    store
        .reload_from_toml(
            r#"
            [[bands]]
            min_price = 0
            max_price = 2000
            max_cut = 150
            cooldown_duration = "24h"
        "#,
        )
        .unwrap();

    assert_eq!(service.evaluate(&item).await.unwrap().cut_amount(), dec(150));
}
