pub mod adapter;
pub mod core;
pub mod evaluator;
pub mod inheritance;
pub mod propagator;


// Re-export the primary types so callers can use `crate::engine::*`.
pub use self::adapter::{
    AdapterRegistry, LocalRuleSet, LocalRules, NoScopes, ResourceLoader, ResourceNode,
    ScopeRelation, ScopeResolver,
};
pub use self::core::AuthorizationEngine;
pub use self::propagator::PolicyPropagator;
