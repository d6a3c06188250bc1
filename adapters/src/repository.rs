//! # Decision Storage
//!
//! * [`JsonLinesRepository`]: appends one JSON object per decision to a file.
//! * [`InMemoryRepository`]: keeps decisions in a vector, for tests and dry runs.

use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use pricecut_common::models::decision::Decision;
use pricecut_core::ports::repository::DecisionRepository;
use tokio::io::AsyncWriteExt;

pub struct JsonLinesRepository {
    path: PathBuf,
    // serializes appends so lines from concurrent evaluations never interleave
    write_lock: tokio::sync::Mutex<()>,
}

impl JsonLinesRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }
}

#[async_trait::async_trait]
impl DecisionRepository for JsonLinesRepository {
    async fn record(&self, decision: &Decision) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(decision).context("failed to serialize decision")?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .await
            .with_context(|| format!("failed to append to {}", self.path.display()))?;
        file.flush().await?;
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryRepository {
    decisions: Mutex<Vec<Decision>>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decisions(&self) -> Vec<Decision> {
        self.decisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl DecisionRepository for InMemoryRepository {
    async fn record(&self, decision: &Decision) -> anyhow::Result<()> {
        self.decisions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(decision.clone());
        Ok(())
    }
}
