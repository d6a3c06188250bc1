use pricecut_common::models::decision::Decision;
use pricecut_core::ports::notification::NotificationPort;
use tracing::{info, warn};

/// Announces price cuts as `tracing` events.
///
/// Decisions that leave the price unchanged are not announced.
pub struct LogNotifier;

#[async_trait::async_trait]
impl NotificationPort for LogNotifier {
    async fn notify(&self, decision: &Decision) -> anyhow::Result<()> {
        if !decision.reason().is_cut() {
            return Ok(());
        }
        info!(
            item_id = %decision.item_id(),
            previous_price = %decision.previous_price(),
            new_price = %decision.new_price(),
            cut_amount = %decision.cut_amount(),
            reason = %decision.reason(),
            "price cut"
        );
        Ok(())
    }
}

/// Wraps a notifier whose failures must not fail the evaluation.
///
/// A failed delivery is logged with the item id and dropped.
pub struct BestEffortNotifier<N> {
    inner: N,
}

impl<N: NotificationPort> BestEffortNotifier<N> {
    pub fn new(inner: N) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl<N: NotificationPort> NotificationPort for BestEffortNotifier<N> {
    async fn notify(&self, decision: &Decision) -> anyhow::Result<()> {
        if let Err(e) = self.inner.notify(decision).await {
            warn!(item_id = %decision.item_id(), error = %e, "notification failed");
        }
        Ok(())
    }
}
