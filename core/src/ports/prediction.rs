use pricecut_common::models::item::ItemId;
use pricecut_common::models::prediction::PredictionResult;

/// Defines the contract for obtaining a fair-value estimate of an item.
#[async_trait::async_trait]
pub trait PredictionPort: Send + Sync {
    /// Asks for the prediction of `item_id`.
    ///
    /// # Returns
    /// * `Available(value)` - The estimated fair value.
    /// * `Missing` - The source has no estimate for this item.
    /// * `Failed(cause)` - The source could not be asked (timeout, transport, decoding).
    async fn predict(&self, item_id: &ItemId) -> PredictionResult;
}
