//!
//! Top-down recomputation of every policy in a resource's owned sub-tree.
//!
//! Each node is reset, inherits from its freshly recomputed parent, receives
//! its local rules, and then becomes the parent of its own children. Because a
//! node depends on its parent's new policy the walk is depth-first; separate
//! top-level calls on disjoint sub-trees may run concurrently.

use std::collections::HashSet;

use super::adapter::{AdapterRegistry, ResourceLoader, ResourceNode, ScopeResolver};
use super::core::AuthorizationEngine;
use crate::error::{AuthorizationError, Result};
use crate::primitives::AuthorizationPolicy;

/// Recomputes policies across an owned resource tree.
///
/// The propagator only reads (through its loader and resolver). The policies
/// it returns are for the caller to persist, ideally in one transaction.
pub struct PolicyPropagator<'a, L: ResourceLoader, S: ScopeResolver> {
    engine: &'a AuthorizationEngine,
    registry: &'a AdapterRegistry,
    loader: &'a L,
    scopes: &'a S,
}

impl<'a, L, S> PolicyPropagator<'a, L, S>
where
    L: ResourceLoader,
    S: ScopeResolver,
{
    pub fn new(
        engine: &'a AuthorizationEngine,
        registry: &'a AdapterRegistry,
        loader: &'a L,
        scopes: &'a S,
    ) -> Self {
        PolicyPropagator {
            engine,
            registry,
            loader,
            scopes,
        }
    }

    /// Recomputes the policy of `resource_id` from `parent` and then every
    /// descendant from its recomputed parent.
    ///
    /// Returns the updated policies in visiting order (the resource first).
    /// The first failure aborts the pass; nothing is returned for it.
    pub fn apply_authorization_policy(
        &self,
        resource_id: &str,
        parent: Option<&AuthorizationPolicy>,
    ) -> Result<Vec<AuthorizationPolicy>> {
        let node = self.loader.get_resource_or_fail(resource_id)?;
        let mut updated = Vec::new();
        let mut visited = HashSet::new();
        self.apply_node(&node, parent, &mut visited, &mut updated)?;
        tracing::debug!(
            resource_id,
            resource_type = %node.resource_type,
            policies = updated.len(),
            "authorization policy applied to sub-tree"
        );
        Ok(updated)
    }

    /// reset -> inherit -> append local rules, for one node.
    pub fn recompute(
        &self,
        node: &ResourceNode,
        parent: Option<&AuthorizationPolicy>,
    ) -> Result<AuthorizationPolicy> {
        let current = node.authorization_or_fail()?.clone();
        let baseline = self.engine.reset(current);
        let inherited = self.engine.inherit_parent_authorization(baseline, parent);
        let local = self.registry.local_rules(node, self.scopes)?;
        Ok(self.engine.append_local_rules(inherited, local))
    }

    fn apply_node(
        &self,
        node: &ResourceNode,
        parent: Option<&AuthorizationPolicy>,
        visited: &mut HashSet<String>,
        updated: &mut Vec<AuthorizationPolicy>,
    ) -> Result<()> {
        if !visited.insert(node.id.clone()) {
            return Err(AuthorizationError::relationship_not_found(
                &node.id,
                "resource reached twice while walking owned children",
            ));
        }
        // Both relations are checked before any work so a half-loaded node
        // never produces a policy.
        node.authorization_or_fail()?;
        let children = node.children_or_fail()?;

        let policy = self.recompute(node, parent)?;
        tracing::debug!(
            resource_id = %node.id,
            resource_type = %node.resource_type,
            credential_rules = policy.credential_rules.len(),
            children = children.len(),
            "recomputed authorization policy"
        );
        updated.push(policy.clone());

        for child_id in children {
            let child = self.loader.get_resource_or_fail(child_id)?;
            self.apply_node(&child, Some(&policy), visited, updated)?;
        }
        Ok(())
    }
}
