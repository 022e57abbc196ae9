//! Sink appending submissions to a JSON-lines file

use super::traits::SubmissionSink;
use crate::state::FieldDefinition;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

/// One line of the submission log
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLine {
    pub submitted_at: DateTime<Utc>,
    pub record: FieldDefinition,
}

#[derive(Debug, Clone)]
pub struct JsonLinesSink {
    path: PathBuf,
}

impl JsonLinesSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SubmissionSink for JsonLinesSink {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn submit(&mut self, record: FieldDefinition) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let line = SubmissionLine {
            submitted_at: Utc::now(),
            record,
        };
        let mut json = serde_json::to_string(&line)?;
        json.push('\n');

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(json.as_bytes()).await?;
        file.flush().await?;

        tracing::info!(path = %self.path.display(), "field definition appended");
        Ok(())
    }
}
