//! Rules contributed by an account.
//!
//! The account is where account-admin credentials enter the tree: its
//! cascading "account manage" rule is scoped to the account's own id and
//! flows down to every resource the account owns.

use crate::access::{self, names};
use crate::engine::adapter::{LocalRuleSet, LocalRules, ResourceNode, ScopeResolver};
use crate::error::Result;
use crate::primitives::CredentialDefinition;
use crate::types::{CredentialType, GlobalRole, Privilege};

#[derive(Debug, Default, Clone, Copy)]
pub struct AccountRules;

impl LocalRules for AccountRules {
    fn local_rules(
        &self,
        node: &ResourceNode,
        _scopes: &dyn ScopeResolver,
    ) -> Result<LocalRuleSet> {
        let account_admin = CredentialDefinition::scoped(CredentialType::AccountAdmin, &node.id);

        // Platform staff manage the account itself, not what it owns.
        let global_roles = [GlobalRole::GlobalAdmin, GlobalRole::GlobalSupport]
            .iter()
            .map(|role| CredentialDefinition::type_only(role.credential_type()))
            .collect();
        let global_manage = access::create_credential_rule(
            &[
                Privilege::Create,
                Privilege::Read,
                Privilege::Update,
                Privilege::Delete,
                Privilege::Grant,
                Privilege::AuthorizationReset,
            ],
            global_roles,
            names::CREDENTIAL_RULE_TYPES_ACCOUNT_MANAGE_GLOBAL_ROLES,
            false,
        )?;

        let account_manage = access::create_credential_rule(
            &[
                Privilege::Create,
                Privilege::Read,
                Privilege::Update,
                Privilege::Delete,
                Privilege::Grant,
                Privilege::TransferResourceOffer,
            ],
            vec![account_admin.clone()],
            names::CREDENTIAL_RULE_TYPES_ACCOUNT_MANAGE,
            true,
        )?;

        // Creating things inside the account is not meaningful further down.
        let child_entities = access::create_credential_rule(
            &[
                Privilege::CreateSpace,
                Privilege::CreateVirtual,
                Privilege::CreateInnovationPack,
                Privilege::TransferResourceAccept,
            ],
            vec![account_admin],
            names::CREDENTIAL_RULE_TYPES_ACCOUNT_CHILD_ENTITIES,
            false,
        )?;

        let license_manage = access::create_credential_rule(
            &[Privilege::Read, Privilege::AccountLicenseManage],
            vec![CredentialDefinition::type_only(CredentialType::GlobalLicenseManager)],
            names::CREDENTIAL_RULE_TYPES_ACCOUNT_LICENSE_MANAGE,
            false,
        )?;

        // Stays on the account itself; owned resources decide their own visibility.
        let public_about = access::create_credential_rule(
            &[Privilege::ReadAbout],
            access::anonymous_registered_definitions(),
            names::CREDENTIAL_RULE_ANONYMOUS_REGISTERED_ACCESS,
            false,
        )?;

        let read_about = access::create_privilege_rule(
            Privilege::Read,
            &[Privilege::ReadAbout],
            names::POLICY_RULE_READ_ABOUT,
        )?;

        Ok(LocalRuleSet {
            credential_rules: vec![
                global_manage,
                account_manage,
                child_entities,
                license_manage,
                public_about,
            ],
            privilege_rules: vec![read_about],
            ..Default::default()
        })
    }
}
