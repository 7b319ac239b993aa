//! Resource adapter abstraction.
//!
//! The propagator knows nothing about concrete resource kinds. Callers plug
//! in three capabilities:
//!
//! - a [`ResourceLoader`] that returns a resource with its policy and owned
//!   children already hydrated,
//! - a [`ScopeResolver`] answering cross-links that are not direct ownership
//!   (e.g. which account owns an AI persona service through its virtual
//!   contributor),
//! - one [`LocalRules`] provider per policy type, contributing the rules a
//!   resource adds on top of what it inherits.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::{AuthorizationError, Result};
use crate::primitives::{AuthorizationPolicy, CredentialRule, PrivilegeRule};
use crate::types::AuthorizationPolicyType;

/// One resource as seen by the propagator.
///
/// `None` in `authorization` or `children` means the relation was not loaded,
/// which is distinct from a resource that genuinely has no children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub id: String,
    pub resource_type: AuthorizationPolicyType,
    pub authorization: Option<AuthorizationPolicy>,
    pub children: Option<Vec<String>>,
}

impl ResourceNode {
    /// A hydrated node with a fresh empty policy and no children.
    pub fn new(id: impl Into<String>, resource_type: AuthorizationPolicyType) -> Self {
        ResourceNode {
            id: id.into(),
            resource_type,
            authorization: Some(AuthorizationPolicy::new(resource_type)),
            children: Some(Vec::new()),
        }
    }

    pub fn authorization_or_fail(&self) -> Result<&AuthorizationPolicy> {
        self.authorization.as_ref().ok_or_else(|| {
            AuthorizationError::entity_not_initialized(
                &self.id,
                format!("authorization policy of {} not loaded", self.resource_type),
            )
        })
    }

    pub fn children_or_fail(&self) -> Result<&[String]> {
        self.children.as_deref().ok_or_else(|| {
            AuthorizationError::relationship_not_found(
                &self.id,
                format!("owned children of {} not loaded", self.resource_type),
            )
        })
    }
}

/// Reads resources for the propagator. Implementations perform the I/O.
pub trait ResourceLoader {
    fn get_resource_or_fail(&self, resource_id: &str) -> Result<ResourceNode>;
}

/// Cross-links used only to scope a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScopeRelation {
    /// The account that ultimately owns the resource.
    OwningAccount,
}

impl fmt::Display for ScopeRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeRelation::OwningAccount => f.write_str("owning account"),
        }
    }
}

pub trait ScopeResolver {
    /// Id of the resource reached from `resource_id` through `relation`.
    fn resolve(&self, resource_id: &str, relation: ScopeRelation) -> Result<String>;
}

/// Resolver for trees whose rules never need a cross-link.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoScopes;

impl ScopeResolver for NoScopes {
    fn resolve(&self, resource_id: &str, relation: ScopeRelation) -> Result<String> {
        Err(AuthorizationError::relationship_not_found(
            resource_id,
            format!("no resolver configured for {}", relation),
        ))
    }
}

/// The rules a resource adds after inheriting from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalRuleSet {
    pub credential_rules: Vec<CredentialRule>,
    pub verified_credential_rules: Vec<CredentialRule>,
    pub privilege_rules: Vec<PrivilegeRule>,
    /// Overrides the inherited anonymous-read flag when set.
    pub anonymous_read_access: Option<bool>,
}

impl LocalRuleSet {
    pub fn is_empty(&self) -> bool {
        self.credential_rules.is_empty()
            && self.verified_credential_rules.is_empty()
            && self.privilege_rules.is_empty()
            && self.anonymous_read_access.is_none()
    }
}

/// Trait implemented by per-resource-type rule providers.
///
/// `local_rules` must be deterministic for a given node and resolver answers,
/// so that re-running a propagation yields identical policies.
pub trait LocalRules: Send + Sync {
    fn local_rules(&self, node: &ResourceNode, scopes: &dyn ScopeResolver) -> Result<LocalRuleSet>;
}

/// Maps each policy type to its local rule provider. Types without a provider
/// contribute no local rules.
#[derive(Default)]
pub struct AdapterRegistry {
    providers: BTreeMap<AuthorizationPolicyType, Box<dyn LocalRules>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        policy_type: AuthorizationPolicyType,
        provider: impl LocalRules + 'static,
    ) {
        self.providers.insert(policy_type, Box::new(provider));
    }

    pub fn with(
        mut self,
        policy_type: AuthorizationPolicyType,
        provider: impl LocalRules + 'static,
    ) -> Self {
        self.register(policy_type, provider);
        self
    }

    pub fn contains(&self, policy_type: AuthorizationPolicyType) -> bool {
        self.providers.contains_key(&policy_type)
    }

    pub fn local_rules(
        &self,
        node: &ResourceNode,
        scopes: &dyn ScopeResolver,
    ) -> Result<LocalRuleSet> {
        match self.providers.get(&node.resource_type) {
            Some(provider) => provider.local_rules(node, scopes),
            None => Ok(LocalRuleSet::default()),
        }
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("types", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
