//!
//! Request-time privilege checks.
//!
//! Access is granted if any of the following holds, in this order:
//! the privilege is READ and the policy allows anonymous reads; a credential
//! rule grants it and the actor holds one of the rule's credentials; a
//! verified credential rule grants it and the actor holds a matching verified
//! credential; or a privilege rule maps it from a privilege the actor already
//! holds. Rules combine with OR, and when rule kinds disagree the most
//! permissive answer wins.

use std::collections::BTreeSet;

use super::core::AuthorizationEngine;
use crate::error::{AuditContext, AuthorizationError, Result};
use crate::primitives::{ActorContext, AuthorizationPolicy, CredentialDefinition, CredentialRule};
use crate::privileges;
use crate::types::Privilege;

/// The first rule in `rules` that grants `required` to a holder of `held`.
fn find_granting_rule<'r>(
    rules: &'r [CredentialRule],
    held: &[CredentialDefinition],
    required: Privilege,
) -> Option<&'r CredentialRule> {
    if held.is_empty() {
        return None;
    }
    rules
        .iter()
        .find(|rule| rule.grants(required) && rule.matching_credential(held).is_some())
}

impl AuthorizationEngine {
    /// Fails with `Forbidden` unless `actor` holds `required` on `policy`.
    /// `message` describes the attempted operation and ends up in the audit
    /// context of the error.
    pub fn grant_access_or_fail(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
        required: Privilege,
        message: &str,
    ) -> Result<()> {
        if self.is_access_granted(actor, policy, required) {
            return Ok(());
        }
        let context = AuditContext {
            message: message.to_string(),
            policy_id: policy.id,
            policy_type: policy.policy_type,
            actor_id: actor.actor_id.clone(),
        };
        self.log_credential_check_fail_details(actor, policy, required, &context);
        Err(AuthorizationError::Forbidden {
            privilege: required,
            context,
        })
    }

    pub fn grant_read_access_or_fail(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
        message: &str,
    ) -> Result<()> {
        self.grant_access_or_fail(actor, policy, Privilege::Read, message)
    }

    pub fn is_access_granted(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
        required: Privilege,
    ) -> bool {
        if !self.config().authentication_enabled {
            return true;
        }

        if required == Privilege::Read && policy.anonymous_read_access {
            tracing::trace!(
                policy_id = %policy.id,
                anonymous = actor.anonymous,
                "granted READ through anonymous read access"
            );
            return true;
        }

        if let Some(rule) =
            find_granting_rule(&policy.credential_rules, &actor.credentials, required)
        {
            tracing::trace!(
                policy_id = %policy.id,
                privilege = %required,
                rule = %rule.name,
                "granted privilege using rule"
            );
            return true;
        }

        if let Some(rule) = find_granting_rule(
            &policy.verified_credential_rules,
            &actor.verified_credentials,
            required,
        ) {
            tracing::debug!(
                policy_id = %policy.id,
                privilege = %required,
                rule = %rule.name,
                "granted privilege using verified credential rule"
            );
            return true;
        }

        let direct = self.credential_privileges(actor, policy);
        if privileges::sufficient(&direct, &policy.privilege_rules, required) {
            tracing::trace!(
                policy_id = %policy.id,
                privilege = %required,
                "granted privilege through PrivilegeRule"
            );
            return true;
        }

        false
    }

    /// Every privilege `actor` holds on `policy`, with privilege rules applied.
    pub fn granted_privileges(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
    ) -> BTreeSet<Privilege> {
        if !self.config().authentication_enabled {
            return Privilege::ALL.iter().copied().collect();
        }
        let direct = self.credential_privileges(actor, policy);
        privileges::expand(&direct, &policy.privilege_rules)
    }

    /// Privileges granted directly, before privilege rules are applied.
    fn credential_privileges(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
    ) -> BTreeSet<Privilege> {
        let mut granted = BTreeSet::new();
        if policy.anonymous_read_access {
            granted.insert(Privilege::Read);
        }
        let pools = [
            (&policy.credential_rules, &actor.credentials),
            (&policy.verified_credential_rules, &actor.verified_credentials),
        ];
        for (rules, held) in pools {
            for rule in rules.iter() {
                if rule.matching_credential(held).is_some() {
                    granted.extend(rule.granted_privileges.iter().copied());
                }
            }
        }
        granted
    }

    fn log_credential_check_fail_details(
        &self,
        actor: &ActorContext,
        policy: &AuthorizationPolicy,
        required: Privilege,
        context: &AuditContext,
    ) {
        let held: Vec<String> = actor
            .credentials
            .iter()
            .map(|c| match &c.resource_id {
                Some(scope) => format!("{}:{}", c.credential_type, scope),
                None => c.credential_type.to_string(),
            })
            .collect();
        let rules: Vec<&str> = policy.credential_rules.iter().map(|r| r.name.as_str()).collect();
        tracing::debug!(
            privilege = %required,
            actor = actor.actor_id.as_deref().unwrap_or("<anonymous>"),
            credentials = ?held,
            anonymous_read_access = policy.anonymous_read_access,
            rules = ?rules,
            "{}",
            context
        );
    }
}
