use std::path::PathBuf;

use anyhow::Context;
use pricecut_common::models::item::Item;
use pricecut_core::ports::items::ItemSource;

/// Item snapshots stored as a JSON array.
///
/// ```json
/// [{"id": "car-1", "current_price": 1000, "last_cut_at": "2026-10-17T09:00:00Z"}]
/// ```
pub struct JsonItemFile {
    path: PathBuf,
}

impl JsonItemFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl ItemSource for JsonItemFile {
    async fn items(&self) -> anyhow::Result<Vec<Item>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read items from {}", self.path.display()))?;
        let items: Vec<Item> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse items in {}", self.path.display()))?;
        Ok(items)
    }
}
