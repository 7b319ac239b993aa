//! Fixtures for tests and benchmarks (feature `test-utils`).

use std::collections::HashMap;

use crate::engine::adapter::{ResourceLoader, ResourceNode, ScopeRelation, ScopeResolver};
use crate::error::{AuthorizationError, Result};
use crate::primitives::{ActorContext, AuthorizationPolicy, CredentialDefinition};
use crate::types::{AuthorizationPolicyType, CredentialType};

/// Installs a test-friendly `tracing` subscriber honouring `RUST_LOG`.
/// Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn global_admin(actor_id: &str) -> ActorContext {
    ActorContext::authenticated(
        actor_id,
        vec![CredentialDefinition::type_only(CredentialType::GlobalAdmin)],
    )
}

pub fn account_admin(actor_id: &str, account_id: &str) -> ActorContext {
    ActorContext::authenticated(
        actor_id,
        vec![
            CredentialDefinition::type_only(CredentialType::GlobalRegistered),
            CredentialDefinition::scoped(CredentialType::AccountAdmin, account_id),
        ],
    )
}

pub fn registered(actor_id: &str) -> ActorContext {
    ActorContext::authenticated(
        actor_id,
        vec![CredentialDefinition::type_only(CredentialType::GlobalRegistered)],
    )
}

/// An in-memory resource tree standing in for the persistence layer.
///
/// Implements both [`ResourceLoader`] and [`ScopeResolver`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryResourceTree {
    nodes: HashMap<String, ResourceNode>,
    scopes: HashMap<(String, ScopeRelation), String>,
}

impl InMemoryResourceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a resource with an empty policy, owned by `parent` when given.
    pub fn add(
        &mut self,
        id: &str,
        resource_type: AuthorizationPolicyType,
        parent: Option<&str>,
    ) -> &mut Self {
        self.nodes.insert(id.to_string(), ResourceNode::new(id, resource_type));
        if let Some(parent_id) = parent {
            let parent_node = self.nodes.get_mut(parent_id);
            if let Some(children) = parent_node.and_then(|n| n.children.as_mut()) {
                children.push(id.to_string());
            }
        }
        self
    }

    pub fn set_scope(&mut self, id: &str, relation: ScopeRelation, target: &str) -> &mut Self {
        self.scopes.insert((id.to_string(), relation), target.to_string());
        self
    }

    /// Simulates a caller that forgot to load the policy relation.
    pub fn drop_policy(&mut self, id: &str) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(id) {
            node.authorization = None;
        }
        self
    }

    /// Simulates a caller that forgot to load the children relation.
    pub fn drop_children(&mut self, id: &str) -> &mut Self {
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = None;
        }
        self
    }

    pub fn policy(&self, id: &str) -> Option<&AuthorizationPolicy> {
        self.nodes.get(id).and_then(|n| n.authorization.as_ref())
    }

    /// Writes recomputed policies back onto their resources, as a caller
    /// persisting a propagation result would.
    pub fn persist(&mut self, policies: &[AuthorizationPolicy]) {
        for node in self.nodes.values_mut() {
            if let Some(current) = node.authorization.as_mut() {
                if let Some(updated) = policies.iter().find(|p| p.id == current.id) {
                    *current = updated.clone();
                }
            }
        }
    }
}

impl ResourceLoader for InMemoryResourceTree {
    fn get_resource_or_fail(&self, resource_id: &str) -> Result<ResourceNode> {
        self.nodes.get(resource_id).cloned().ok_or_else(|| {
            AuthorizationError::relationship_not_found(resource_id, "resource not found")
        })
    }
}

impl ScopeResolver for InMemoryResourceTree {
    fn resolve(&self, resource_id: &str, relation: ScopeRelation) -> Result<String> {
        self.scopes
            .get(&(resource_id.to_string(), relation))
            .cloned()
            .ok_or_else(|| {
                let reason = format!("{} not recorded", relation);
                AuthorizationError::relationship_not_found(resource_id, reason)
            })
    }
}
