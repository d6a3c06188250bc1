use pricecut_common::models::decision::Decision;

/// Delivers word of a price cut.
///
/// A delivery failure comes back as an `Err`. Adapters that must not fail
/// the evaluation are wrapped in `BestEffortNotifier`, which logs and drops it.
#[async_trait::async_trait]
pub trait NotificationPort: Send + Sync {
    async fn notify(&self, decision: &Decision) -> anyhow::Result<()>;
}
