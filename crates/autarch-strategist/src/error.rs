//! Errors from the LLM adapter boundary. Every variant is recoverable: a
//! failed request logs and leaves the previous doctrine running.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no LLM adapter configured")]
    NotConfigured,

    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    #[error("LLM response did not parse as a doctrine: {0}")]
    InvalidResponse(String),

    #[error("LLM request cancelled")]
    Cancelled,
}
