use std::time::Duration;

use pricecut_common::models::item::ItemId;
use pricecut_common::models::prediction::PredictionResult;
use pricecut_core::ports::prediction::PredictionPort;
use tracing::warn;

/// Bounds how long any prediction source may take.
///
/// A source that does not answer in time yields `Failed`, which the engine
/// treats like any other unusable prediction.
pub struct TimeoutPredictions<P> {
    inner: P,
    timeout: Duration,
}

impl<P: PredictionPort> TimeoutPredictions<P> {
    pub fn new(inner: P, timeout: Duration) -> Self {
        Self { inner, timeout }
    }
}

#[async_trait::async_trait]
impl<P: PredictionPort> PredictionPort for TimeoutPredictions<P> {
    async fn predict(&self, item_id: &ItemId) -> PredictionResult {
        match tokio::time::timeout(self.timeout, self.inner.predict(item_id)).await {
            Ok(prediction) => prediction,
            Err(_) => {
                warn!(
                    %item_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "prediction timed out"
                );
                PredictionResult::Failed(format!(
                    "no answer within {}ms",
                    self.timeout.as_millis()
                ))
            }
        }
    }
}
