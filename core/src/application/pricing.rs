//! # Pricing Service
//!
//! Implements the "evaluate an item" use case.
//!
//! The service is built once at the composition root with every collaborator
//! already constructed, and only ever talks to them through their ports.

use std::sync::Arc;

use anyhow::Context;
use pricecut_common::models::decision::Decision;
use pricecut_common::models::item::Item;
use pricecut_common::models::prediction::PredictionResult;
use tracing::debug;

use crate::application::config_store::ConfigStore;
use crate::ports::clock::Clock;
use crate::ports::notification::NotificationPort;
use crate::ports::prediction::PredictionPort;
use crate::ports::repository::DecisionRepository;
use crate::pricing::engine;

pub struct PricingService {
    config: Arc<ConfigStore>,
    predictions: Box<dyn PredictionPort>,
    clock: Box<dyn Clock>,
    repository: Box<dyn DecisionRepository>,
    notifier: Box<dyn NotificationPort>,
}

impl PricingService {
    pub fn new(
        config: Arc<ConfigStore>,
        predictions: Box<dyn PredictionPort>,
        clock: Box<dyn Clock>,
        repository: Box<dyn DecisionRepository>,
        notifier: Box<dyn NotificationPort>,
    ) -> Self {
        Self {
            config,
            predictions,
            clock,
            repository,
            notifier,
        }
    }

    /// Evaluates one item.
    ///
    /// The process involves:
    /// 1. **Snapshot**: current config and time, read once.
    /// 2. **Prediction**: asked only if band and cooldown still allow a cut.
    /// 3. **Decision**: the pure engine.
    /// 4. **Record**: a failure here is returned to the caller.
    /// 5. **Notify**: cuts only; a failure is returned after the decision is recorded.
    pub async fn evaluate(&self, item: &Item) -> anyhow::Result<Decision> {
        let config = self.config.current();
        let now = self.clock.now();

        let prediction = if engine::needs_prediction(&config, item, now) {
            self.predictions.predict(&item.id).await
        } else {
            debug!(item_id = %item.id, "prediction skipped");
            PredictionResult::Missing
        };

        let decision = engine::decide(&config, item, &prediction, now);

        self.repository
            .record(&decision)
            .await
            .with_context(|| format!("failed to record decision for item {}", item.id))?;

        if decision.reason().is_cut() {
            self.notifier
                .notify(&decision)
                .await
                .with_context(|| format!("failed to notify cut for item {}", item.id))?;
        }

        Ok(decision)
    }

    /// Evaluates `items` one after another, calling `on_evaluated` with the
    /// running count after each.
    pub async fn evaluate_all(
        &self,
        items: &[Item],
        on_evaluated: Option<&(dyn Fn(usize) + Send + Sync)>,
    ) -> anyhow::Result<Vec<Decision>> {
        let mut decisions = Vec::with_capacity(items.len());
        for item in items {
            decisions.push(self.evaluate(item).await?);
            if let Some(callback) = on_evaluated {
                callback(decisions.len());
            }
        }
        Ok(decisions)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
