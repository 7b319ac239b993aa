//!
//! The authorization engine: stateless policy computation parameterized only
//! by its configuration.
//!
//! Evaluation lives in `evaluator.rs`, reset/inherit/append in
//! `inheritance.rs`; both extend [`AuthorizationEngine`].

use crate::config::EngineConfig;

/// Entry point for evaluating and recomputing authorization policies.
///
/// The engine keeps no state between calls. Every operation takes the
/// policies it works on as arguments and returns new values, so one engine
/// can be shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct AuthorizationEngine {
    config: EngineConfig,
}

impl AuthorizationEngine {
    pub fn new(config: EngineConfig) -> Self {
        AuthorizationEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_engine_is_shareable() {
        assert_send_sync::<AuthorizationEngine>();
        let engine = AuthorizationEngine::default();
        assert!(engine.config().authentication_enabled);
    }
}
