use pricecut_common::models::item::Item;

/// Supplies the item snapshots to evaluate.
#[async_trait::async_trait]
pub trait ItemSource: Send + Sync {
    async fn items(&self) -> anyhow::Result<Vec<Item>>;
}
