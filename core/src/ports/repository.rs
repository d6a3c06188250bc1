use std::sync::Arc;

use pricecut_common::models::decision::Decision;

#[async_trait::async_trait]
pub trait DecisionRepository: Send + Sync {
    async fn record(&self, decision: &Decision) -> anyhow::Result<()>;
}

/// Lets one repository be shared between the service and whoever reads it back.
#[async_trait::async_trait]
impl<R: DecisionRepository + ?Sized> DecisionRepository for Arc<R> {
    async fn record(&self, decision: &Decision) -> anyhow::Result<()> {
        self.as_ref().record(decision).await
    }
}
