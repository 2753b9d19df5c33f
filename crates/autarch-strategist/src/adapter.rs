//! The LLM advisor boundary. The concrete HTTP-backed implementation is an
//! external collaborator this crate never ships; it owns only the trait,
//! a `NullAdapter` fallback, and (test-only) a canned adapter for the
//! scheduler's own unit tests.

use async_trait::async_trait;
use autarch_core::doctrine::Doctrine;

use crate::error::LlmError;
use crate::summary::StrategySummary;

/// The doctrine as returned by an LLM response, before `Doctrine::validate`
/// clamps it into range. Same shape as the compiled doctrine; kept as a
/// distinct name at this boundary so "has this been validated yet" is
/// legible from the type alone.
pub type RawDoctrine = Doctrine;

#[async_trait]
pub trait LlmAdapter: Send + Sync {
    async fn request_doctrine(
        &self,
        directive: &str,
        summary: &StrategySummary,
        faction: &str,
    ) -> Result<RawDoctrine, LlmError>;
}

/// Used when no adapter is configured: every request fails immediately, so
/// the strategist logs and keeps running the previous rule set forever
/// rather than ever blocking on a request that can't succeed.
pub struct NullAdapter;

#[async_trait]
impl LlmAdapter for NullAdapter {
    async fn request_doctrine(
        &self,
        _directive: &str,
        _summary: &StrategySummary,
        _faction: &str,
    ) -> Result<RawDoctrine, LlmError> {
        Err(LlmError::NotConfigured)
    }
}

#[cfg(test)]
pub struct DeterministicAdapter {
    pub doctrine: RawDoctrine,
}

#[cfg(test)]
#[async_trait]
impl LlmAdapter for DeterministicAdapter {
    async fn request_doctrine(
        &self,
        _directive: &str,
        _summary: &StrategySummary,
        _faction: &str,
    ) -> Result<RawDoctrine, LlmError> {
        Ok(self.doctrine.clone())
    }
}
