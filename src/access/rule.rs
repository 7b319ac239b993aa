use std::collections::BTreeSet;

use crate::error::{AuthorizationError, Result};
use crate::primitives::{CredentialDefinition, CredentialRule, PrivilegeRule};
use crate::types::{CredentialType, GlobalRole, Privilege};

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AuthorizationError::Validation("rule name must not be empty".into()));
    }
    Ok(())
}

fn collect_privileges(privileges: &[Privilege], name: &str) -> Result<BTreeSet<Privilege>> {
    if privileges.is_empty() {
        return Err(AuthorizationError::Validation(format!(
            "rule '{}' grants no privileges",
            name
        )));
    }
    Ok(privileges.iter().copied().collect())
}

/// Builds a credential rule granting `privileges` to holders of any of
/// `credentials`.
///
/// # Errors
/// `Validation` if `privileges` or `credentials` is empty, or `name` is blank.
pub fn create_credential_rule(
    privileges: &[Privilege],
    credentials: Vec<CredentialDefinition>,
    name: &str,
    cascade: bool,
) -> Result<CredentialRule> {
    validate_name(name)?;
    let granted_privileges = collect_privileges(privileges, name)?;
    if credentials.is_empty() {
        return Err(AuthorizationError::Validation(format!(
            "rule '{}' names no credentials",
            name
        )));
    }
    Ok(CredentialRule {
        granted_privileges,
        credentials,
        name: name.to_string(),
        cascade,
    })
}

/// Builds a cascading rule whose credentials carry no resource scope, so any
/// holder of one of `credential_types` matches. Used for platform-wide roles.
pub fn create_credential_rule_using_types_only(
    privileges: &[Privilege],
    credential_types: &[CredentialType],
    name: &str,
) -> Result<CredentialRule> {
    let credentials = credential_types
        .iter()
        .map(|t| CredentialDefinition::type_only(*t))
        .collect();
    create_credential_rule(privileges, credentials, name, true)
}

/// Like [`create_credential_rule_using_types_only`], expressed in global roles.
pub fn create_credential_rule_global_roles(
    privileges: &[Privilege],
    roles: &[GlobalRole],
    name: &str,
) -> Result<CredentialRule> {
    let types: Vec<CredentialType> = roles.iter().map(GlobalRole::credential_type).collect();
    create_credential_rule_using_types_only(privileges, &types, name)
}

/// Builds a rule granting `granted` to whoever already holds `source`.
pub fn create_privilege_rule(
    source: Privilege,
    granted: &[Privilege],
    name: &str,
) -> Result<PrivilegeRule> {
    validate_name(name)?;
    Ok(PrivilegeRule {
        source_privilege: source,
        granted_privileges: collect_privileges(granted, name)?,
        name: name.to_string(),
    })
}

/// The credentials every anonymous and every registered actor holds.
pub fn anonymous_registered_definitions() -> Vec<CredentialDefinition> {
    vec![
        CredentialDefinition::type_only(CredentialType::GlobalAnonymous),
        CredentialDefinition::type_only(CredentialType::GlobalRegistered),
    ]
}
