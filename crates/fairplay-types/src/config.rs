//! Engine configuration.

use serde::{Deserialize, Serialize};

use crate::{FairplayError, Result, constants};

/// Configuration for a FairPlay engine instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Storage name prefix for match records (`prefix || be_u64(id)`).
    pub record_prefix: String,
    /// Reject `join`, `commit` and `reveal` once a match is resolved.
    ///
    /// Off by default: resolved records stay callable, and `resolve` is
    /// idempotent either way.
    pub close_after_resolve: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            record_prefix: constants::DEFAULT_RECORD_PREFIX.to_string(),
            close_after_resolve: false,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// # Errors
    /// Returns `Configuration` if the record prefix is empty.
    pub fn validate(&self) -> Result<()> {
        if self.record_prefix.is_empty() {
            return Err(FairplayError::Configuration(
                "record_prefix must not be empty".into(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn record_prefix_bytes(&self) -> &[u8] {
        self.record_prefix.as_bytes()
    }
}
