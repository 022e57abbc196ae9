//! Trait abstraction for submission sinks to enable mocking in tests

use crate::state::FieldDefinition;
use anyhow::Result;
use async_trait::async_trait;

/// Consumer of submitted field definitions. The form hands the record over
/// and does not interpret anything beyond success or failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Short description shown in the status bar
    fn describe(&self) -> String;

    /// Hand a submitted definition to the sink
    async fn submit(&mut self, record: FieldDefinition) -> Result<()>;
}
