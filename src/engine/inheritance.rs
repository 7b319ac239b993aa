//!
//! Deriving a policy from its parent.
//!
//! A recompute always walks the same sequence: `reset` to the baseline,
//! `inherit_parent_authorization` to pull in cascading parent rules, then the
//! resource's own rules through the `append_*` upserts. Skipping the reset
//! lets stale grants survive a credential or hierarchy change.
//!
//! Every operation takes the policy by value and returns the new value.

use super::adapter::LocalRuleSet;
use super::core::AuthorizationEngine;
use crate::access::{self, names};
use crate::config::AnonymousReadMode;
use crate::error::Result;
use crate::primitives::{AuthorizationPolicy, CredentialRule, PrivilegeRule};
use crate::types::{AuthorizationPolicyType, CredentialType, GlobalRole, Privilege};

impl AuthorizationEngine {
    /// Clears every rule collection and restores the type's default
    /// anonymous-read flag. `id` and `policy_type` are kept.
    pub fn reset(&self, policy: AuthorizationPolicy) -> AuthorizationPolicy {
        let anonymous_read_access = self.config().default_anonymous_read(policy.policy_type);
        AuthorizationPolicy {
            credential_rules: Vec::new(),
            privilege_rules: Vec::new(),
            verified_credential_rules: Vec::new(),
            anonymous_read_access,
            ..policy
        }
    }

    /// Copies the parent's cascading credential rules into `child`.
    ///
    /// With no parent the child is returned unchanged. The anonymous-read flag
    /// follows the parent unless the child's type pins it in configuration.
    pub fn inherit_parent_authorization(
        &self,
        child: AuthorizationPolicy,
        parent: Option<&AuthorizationPolicy>,
    ) -> AuthorizationPolicy {
        let Some(parent) = parent else {
            return child;
        };
        let mut child = child;
        for rule in parent.credential_rules.iter().filter(|r| r.cascade) {
            child.upsert_credential_rule(rule.clone());
        }
        child.anonymous_read_access = match self.config().anonymous_read_mode(child.policy_type) {
            AnonymousReadMode::Inherit => parent.anonymous_read_access,
            AnonymousReadMode::Always => true,
            AnonymousReadMode::Never => false,
        };
        child
    }

    pub fn append_credential_authorization_rules(
        &self,
        policy: AuthorizationPolicy,
        rules: impl IntoIterator<Item = CredentialRule>,
    ) -> AuthorizationPolicy {
        let mut policy = policy;
        for rule in rules {
            policy.upsert_credential_rule(rule);
        }
        policy
    }

    pub fn append_verified_credential_rules(
        &self,
        policy: AuthorizationPolicy,
        rules: impl IntoIterator<Item = CredentialRule>,
    ) -> AuthorizationPolicy {
        let mut policy = policy;
        for rule in rules {
            policy.upsert_verified_credential_rule(rule);
        }
        policy
    }

    pub fn append_privilege_authorization_rules(
        &self,
        policy: AuthorizationPolicy,
        rules: impl IntoIterator<Item = PrivilegeRule>,
    ) -> AuthorizationPolicy {
        let mut policy = policy;
        for rule in rules {
            policy.upsert_privilege_rule(rule);
        }
        policy
    }

    /// Appends everything a resource contributes on top of what it inherited.
    pub fn append_local_rules(
        &self,
        policy: AuthorizationPolicy,
        local: LocalRuleSet,
    ) -> AuthorizationPolicy {
        let LocalRuleSet {
            credential_rules,
            verified_credential_rules,
            privilege_rules,
            anonymous_read_access,
        } = local;
        let policy = self.append_credential_authorization_rules(policy, credential_rules);
        let policy = self.append_verified_credential_rules(policy, verified_credential_rules);
        let policy = self.append_privilege_authorization_rules(policy, privilege_rules);
        match anonymous_read_access {
            Some(value) => self.set_anonymous_access(policy, value),
            None => policy,
        }
    }

    pub fn set_anonymous_access(
        &self,
        policy: AuthorizationPolicy,
        value: bool,
    ) -> AuthorizationPolicy {
        AuthorizationPolicy {
            anonymous_read_access: value,
            ..policy
        }
    }

    /// Grants `privilege` to holders of the anonymous credential.
    pub fn append_credential_rule_anonymous_access(
        &self,
        policy: AuthorizationPolicy,
        privilege: Privilege,
        cascade: bool,
    ) -> Result<AuthorizationPolicy> {
        self.append_type_rule(
            policy,
            privilege,
            &[CredentialType::GlobalAnonymous],
            names::CREDENTIAL_RULE_ANONYMOUS_ACCESS,
            cascade,
        )
    }

    /// Grants `privilege` to every registered actor.
    pub fn append_credential_rule_registered_access(
        &self,
        policy: AuthorizationPolicy,
        privilege: Privilege,
        cascade: bool,
    ) -> Result<AuthorizationPolicy> {
        self.append_type_rule(
            policy,
            privilege,
            &[CredentialType::GlobalRegistered],
            names::CREDENTIAL_RULE_REGISTERED_ACCESS,
            cascade,
        )
    }

    pub fn append_credential_rule_anonymous_registered_access(
        &self,
        policy: AuthorizationPolicy,
        privilege: Privilege,
        cascade: bool,
    ) -> Result<AuthorizationPolicy> {
        self.append_type_rule(
            policy,
            privilege,
            &[CredentialType::GlobalAnonymous, CredentialType::GlobalRegistered],
            names::CREDENTIAL_RULE_ANONYMOUS_REGISTERED_ACCESS,
            cascade,
        )
    }

    // One rule per privilege, so the name carries the privilege.
    fn append_type_rule(
        &self,
        policy: AuthorizationPolicy,
        privilege: Privilege,
        types: &[CredentialType],
        base_name: &str,
        cascade: bool,
    ) -> Result<AuthorizationPolicy> {
        let name = format!("{}-{}", base_name, privilege);
        let mut rule = access::create_credential_rule_using_types_only(&[privilege], types, &name)?;
        rule.cascade = cascade;
        Ok(self.append_credential_authorization_rules(policy, [rule]))
    }

    /// A throwaway policy granting `privileges` to the given global roles,
    /// for platform-level checks that have no owning resource.
    pub fn create_global_roles_authorization_policy(
        &self,
        roles: &[GlobalRole],
        privileges: &[Privilege],
        name: &str,
    ) -> Result<AuthorizationPolicy> {
        let rule = access::create_credential_rule_global_roles(privileges, roles, name)?;
        let policy = AuthorizationPolicy::new(AuthorizationPolicyType::InMemory);
        Ok(self.append_credential_authorization_rules(policy, [rule]))
    }
}
