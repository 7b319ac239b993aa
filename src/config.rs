//!
//! Engine configuration.
//!
//! Every field has a default, so an empty JSON object (or `EngineConfig::default()`)
//! yields a fully enforcing engine.

use std::collections::BTreeMap;

use crate::error::{AuthorizationError, Result};
use crate::types::AuthorizationPolicyType;

/// How a policy type treats the anonymous-read flag during reset and inherit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymousReadMode {
    /// Reset to `false`, then take the parent's value.
    #[default]
    Inherit,
    /// Always publicly readable, whatever the parent says.
    Always,
    /// Never publicly readable, whatever the parent says.
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// When false every privilege check passes. Only for local development.
    pub authentication_enabled: bool,
    /// Number of policies written per batch by `store::save_all`.
    pub save_chunk_size: usize,
    /// Bulk saves larger than this are logged at warn level.
    pub save_warn_threshold: usize,
    /// Per-type anonymous read overrides; absent types use `Inherit`.
    pub anonymous_read: BTreeMap<AuthorizationPolicyType, AnonymousReadMode>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            authentication_enabled: true,
            save_chunk_size: 100,
            save_warn_threshold: 500,
            anonymous_read: BTreeMap::new(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        if config.save_chunk_size == 0 {
            return Err(AuthorizationError::Validation(
                "save_chunk_size must be greater than zero".into(),
            ));
        }
        Ok(config)
    }

    pub fn anonymous_read_mode(&self, policy_type: AuthorizationPolicyType) -> AnonymousReadMode {
        self.anonymous_read.get(&policy_type).copied().unwrap_or_default()
    }

    /// Value of the anonymous-read flag right after `reset`.
    pub fn default_anonymous_read(&self, policy_type: AuthorizationPolicyType) -> bool {
        matches!(self.anonymous_read_mode(policy_type), AnonymousReadMode::Always)
    }

    pub fn with_anonymous_read(
        mut self,
        policy_type: AuthorizationPolicyType,
        mode: AnonymousReadMode,
    ) -> Self {
        self.anonymous_read.insert(policy_type, mode);
        self
    }
}
