//! Local rule providers for the resource types the platform ships with.
//!
//! Each provider only describes the rules its resource adds; reset,
//! inheritance and the walk over children are the engine's job.

pub mod account;
pub mod ai;

pub use account::AccountRules;
pub use ai::{AiPersonaServiceRules, AiServerRules};

use crate::engine::adapter::{
    AdapterRegistry, LocalRuleSet, LocalRules, ResourceNode, ScopeResolver,
};
use crate::error::Result;
use crate::types::AuthorizationPolicyType;

/// Provider for resources that only carry what they inherit.
#[derive(Debug, Default, Clone, Copy)]
pub struct InheritOnly;

impl LocalRules for InheritOnly {
    fn local_rules(
        &self,
        _node: &ResourceNode,
        _scopes: &dyn ScopeResolver,
    ) -> Result<LocalRuleSet> {
        Ok(LocalRuleSet::default())
    }
}

/// Registry wiring every built-in provider to its policy type.
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new()
        .with(AuthorizationPolicyType::Account, AccountRules)
        .with(AuthorizationPolicyType::AiServer, AiServerRules)
        .with(AuthorizationPolicyType::AiPersonaService, AiPersonaServiceRules);
    for policy_type in [
        AuthorizationPolicyType::Classification,
        AuthorizationPolicyType::Tagset,
        AuthorizationPolicyType::Profile,
        AuthorizationPolicyType::KnowledgeBase,
        AuthorizationPolicyType::StorageAggregator,
    ] {
        registry.register(policy_type, InheritOnly);
    }
    registry
}
