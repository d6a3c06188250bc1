//! # Prediction Sources
//!
//! * [`StaticPredictions`]: answers from a map held in memory.
//! * [`JsonPredictionFile`]: answers from a JSON document read on first use.
//!
//! The JSON document maps item ids to entries:
//!
//! ```json
//! {
//!   "car-1": 800,
//!   "car-2": null,
//!   "car-3": {"error": "model not trained for this segment"}
//! }
//! ```
//!
//! A number (or numeric string) is `Available`, `null` or an absent id is
//! `Missing`, and an `{"error": ...}` object is `Failed`. If the document
//! itself cannot be read, every answer is `Failed` with the reason.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use pricecut_common::models::item::ItemId;
use pricecut_common::models::prediction::PredictionResult;
use pricecut_core::ports::prediction::PredictionPort;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::OnceCell;
use tracing::{debug, error};

#[derive(Clone, Debug, Default)]
pub struct StaticPredictions {
    values: HashMap<ItemId, PredictionResult>,
}

impl StaticPredictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, item_id: impl Into<ItemId>, prediction: PredictionResult) -> Self {
        self.values.insert(item_id.into(), prediction);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(ItemId, PredictionResult)> for StaticPredictions {
    fn from_iter<T: IntoIterator<Item = (ItemId, PredictionResult)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[async_trait::async_trait]
impl PredictionPort for StaticPredictions {
    async fn predict(&self, item_id: &ItemId) -> PredictionResult {
        self.values
            .get(item_id)
            .cloned()
            .unwrap_or(PredictionResult::Missing)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Entry {
    Failure { error: String },
    Value(Option<Decimal>),
}

impl From<Entry> for PredictionResult {
    fn from(entry: Entry) -> Self {
        match entry {
            Entry::Failure { error } => PredictionResult::Failed(error),
            Entry::Value(value) => PredictionResult::from(value),
        }
    }
}

/// Parses a prediction document into a source.
pub fn parse_predictions(text: &str) -> anyhow::Result<StaticPredictions> {
    let entries: HashMap<ItemId, Entry> =
        serde_json::from_str(text).context("prediction document is not a valid id -> entry map")?;
    Ok(entries
        .into_iter()
        .map(|(id, entry)| (id, PredictionResult::from(entry)))
        .collect())
}

pub struct JsonPredictionFile {
    path: PathBuf,
    loaded: OnceCell<Result<StaticPredictions, String>>,
}

impl JsonPredictionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceCell::new(),
        }
    }

    async fn load(&self) -> Result<StaticPredictions, String> {
        let loaded: anyhow::Result<StaticPredictions> = async {
            let text = tokio::fs::read_to_string(&self.path)
                .await
                .with_context(|| format!("failed to read {}", self.path.display()))?;
            parse_predictions(&text)
        }
        .await;

        match loaded {
            Ok(predictions) => {
                debug!(
                    path = %self.path.display(),
                    entries = predictions.len(),
                    "predictions loaded"
                );
                Ok(predictions)
            }
            Err(e) => {
                error!(
                    path = %self.path.display(),
                    error = %format!("{e:#}"),
                    "prediction source unavailable"
                );
                Err(format!("{e:#}"))
            }
        }
    }
}

#[async_trait::async_trait]
impl PredictionPort for JsonPredictionFile {
    async fn predict(&self, item_id: &ItemId) -> PredictionResult {
        match self.loaded.get_or_init(|| self.load()).await {
            Ok(predictions) => predictions.predict(item_id).await,
            Err(cause) => PredictionResult::Failed(cause.clone()),
        }
    }
}
