//! Rules for the AI server and the persona services it hosts.
//!
//! A persona service is owned by the AI server, but it is managed by the
//! account behind the virtual contributor that uses it. That account is not
//! on the ownership path, so it is looked up through the scope resolver.

use crate::access::{self, names};
use crate::engine::adapter::{LocalRuleSet, LocalRules, ResourceNode, ScopeRelation, ScopeResolver};
use crate::error::Result;
use crate::primitives::CredentialDefinition;
use crate::types::{CredentialType, Privilege};

#[derive(Debug, Default, Clone, Copy)]
pub struct AiServerRules;

impl LocalRules for AiServerRules {
    fn local_rules(
        &self,
        _node: &ResourceNode,
        _scopes: &dyn ScopeResolver,
    ) -> Result<LocalRuleSet> {
        let global_admin = access::create_credential_rule_using_types_only(
            &[
                Privilege::Create,
                Privilege::Read,
                Privilege::Update,
                Privilege::Delete,
                Privilege::AuthorizationReset,
            ],
            &[CredentialType::GlobalAdmin],
            names::CREDENTIAL_RULE_TYPES_GLOBAL_ADMIN_MANAGE,
        )?;
        let global_support = access::create_credential_rule_using_types_only(
            &[Privilege::Read, Privilege::Update],
            &[CredentialType::GlobalSupport],
            names::CREDENTIAL_RULE_TYPES_GLOBAL_SUPPORT_MANAGE,
        )?;
        // Any registered user may look at the server, not at what it hosts.
        let registered_read = access::create_credential_rule(
            &[Privilege::Read],
            vec![CredentialDefinition::type_only(CredentialType::GlobalRegistered)],
            names::CREDENTIAL_RULE_AI_SERVER_REGISTERED_READ,
            false,
        )?;

        Ok(LocalRuleSet {
            credential_rules: vec![global_admin, global_support, registered_read],
            ..Default::default()
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AiPersonaServiceRules;

impl LocalRules for AiPersonaServiceRules {
    fn local_rules(&self, node: &ResourceNode, scopes: &dyn ScopeResolver) -> Result<LocalRuleSet> {
        let account_id = scopes.resolve(&node.id, ScopeRelation::OwningAccount)?;

        let account_host_manage = access::create_credential_rule(
            &[Privilege::Read, Privilege::Update, Privilege::Delete],
            vec![
                CredentialDefinition::scoped(CredentialType::AccountAdmin, account_id.as_str()),
                CredentialDefinition::scoped(CredentialType::AccountHost, account_id.as_str()),
            ],
            names::CREDENTIAL_RULE_ACCOUNT_HOST_MANAGE,
            true,
        )?;

        // Campaign participants reach the persona only with an attested credential.
        let campaign_access = access::create_credential_rule(
            &[Privilege::AccessVirtualContributor],
            vec![CredentialDefinition::type_only(CredentialType::VcCampaign)],
            names::CREDENTIAL_RULE_VC_CAMPAIGN_ACCESS,
            false,
        )?;

        let access_vc = access::create_privilege_rule(
            Privilege::Read,
            &[Privilege::AccessVirtualContributor],
            names::POLICY_RULE_ACCESS_VIRTUAL_CONTRIBUTOR,
        )?;

        Ok(LocalRuleSet {
            credential_rules: vec![account_host_manage],
            verified_credential_rules: vec![campaign_access],
            privilege_rules: vec![access_vc],
            anonymous_read_access: None,
        })
    }
}
