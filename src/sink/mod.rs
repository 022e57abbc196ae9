//! Submission sinks receiving completed field definitions

mod json_lines;
mod log_sink;
mod traits;

pub use json_lines::JsonLinesSink;
pub use log_sink::LogSink;
pub use traits::SubmissionSink;

#[cfg(test)]
pub use traits::MockSubmissionSink;

use crate::config::TuiConfig;

/// Build the sink selected by the configuration
pub fn from_config(config: &TuiConfig) -> Box<dyn SubmissionSink> {
    match &config.submission_log {
        Some(path) => Box::new(JsonLinesSink::new(path)),
        None => Box::new(LogSink::new()),
    }
}
