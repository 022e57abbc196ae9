//! Sink that records submissions in the tracing log

use super::traits::SubmissionSink;
use crate::state::FieldDefinition;
use anyhow::Result;
use async_trait::async_trait;

#[derive(Debug, Default)]
pub struct LogSink {
    submitted: usize,
}

impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubmissionSink for LogSink {
    fn describe(&self) -> String {
        "log".to_string()
    }

    async fn submit(&mut self, record: FieldDefinition) -> Result<()> {
        let json = serde_json::to_string(&record)?;
        self.submitted += 1;
        tracing::info!(
            code = %record.code,
            field_type = %record.field_type,
            count = self.submitted,
            "field definition submitted: {json}"
        );
        Ok(())
    }
}
