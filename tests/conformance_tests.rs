#![cfg(test)]

use authz_engine::access::{self, names};
use authz_engine::config::{AnonymousReadMode, EngineConfig};
use authz_engine::error::AuthorizationError;
use authz_engine::testkit;
use authz_engine::types::{AuthorizationPolicyType, CredentialType, Privilege};
use authz_engine::{ActorContext, AuthorizationEngine, AuthorizationPolicy, CredentialDefinition};

// --- Helpers ---

fn account_policy(engine: &AuthorizationEngine, account_id: &str) -> AuthorizationPolicy {
    let manage = access::create_credential_rule(
        &[Privilege::Read, Privilege::Update, Privilege::Delete],
        vec![CredentialDefinition::scoped(CredentialType::AccountAdmin, account_id)],
        names::CREDENTIAL_RULE_TYPES_ACCOUNT_MANAGE,
        true,
    )
    .unwrap();
    let global = access::create_credential_rule_using_types_only(
        &[Privilege::Read, Privilege::Update, Privilege::Delete, Privilege::Grant],
        &[CredentialType::GlobalAdmin],
        names::CREDENTIAL_RULE_TYPES_GLOBAL_ADMIN_MANAGE,
    )
    .unwrap();
    engine.append_credential_authorization_rules(
        AuthorizationPolicy::new(AuthorizationPolicyType::Account),
        [manage, global],
    )
}

fn derive_child(
    engine: &AuthorizationEngine,
    parent: &AuthorizationPolicy,
    policy_type: AuthorizationPolicyType,
) -> AuthorizationPolicy {
    let child = engine.reset(AuthorizationPolicy::new(policy_type));
    engine.inherit_parent_authorization(child, Some(parent))
}

// --- Evaluation ---

#[test]
fn test_account_admin_allowed_on_own_account_only() {
    testkit::init_tracing();
    let engine = AuthorizationEngine::default();
    let parent = account_policy(&engine, "acct-1");
    let child = derive_child(&engine, &parent, AuthorizationPolicyType::Profile);

    let own = testkit::account_admin("user-1", "acct-1");
    let other = testkit::account_admin("user-2", "acct-2");

    assert!(engine.grant_access_or_fail(&own, &child, Privilege::Update, "update profile").is_ok());
    let err = engine
        .grant_access_or_fail(&other, &child, Privilege::Update, "update profile")
        .unwrap_err();
    assert!(matches!(err, AuthorizationError::Forbidden { privilege: Privilege::Update, .. }));
    assert!(err.to_string().contains("UPDATE"));
    assert!(err.to_string().contains("update profile"));
}

#[test]
fn test_global_admin_type_only_rule_matches_any_scope() {
    let engine = AuthorizationEngine::default();
    let policy = account_policy(&engine, "acct-1");
    let admin = testkit::global_admin("root");
    let scoped_admin = ActorContext::authenticated(
        "root-2",
        vec![CredentialDefinition::scoped(CredentialType::GlobalAdmin, "some-other-resource")],
    );
    for actor in [&admin, &scoped_admin] {
        assert!(engine.grant_access_or_fail(actor, &policy, Privilege::Grant, "grant").is_ok());
    }
}

#[test]
fn test_registered_user_without_rule_is_denied() {
    let engine = AuthorizationEngine::default();
    let policy = account_policy(&engine, "acct-1");
    let user = testkit::registered("user-3");
    assert!(engine.grant_read_access_or_fail(&user, &policy, "read account").is_err());
}

#[test]
fn test_anonymous_read_reaches_authenticated_actors() {
    let engine = AuthorizationEngine::default();
    let policy = engine.set_anonymous_access(account_policy(&engine, "acct-1"), true);
    let user = testkit::registered("user-3");
    assert!(engine.grant_read_access_or_fail(&user, &policy, "read account").is_ok());
    assert!(engine.grant_access_or_fail(&user, &policy, Privilege::Update, "update").is_err());
}

// --- Inheritance ---

#[test]
fn test_reset_policy_with_three_rules() {
    let engine = AuthorizationEngine::default();
    let policy = account_policy(&engine, "acct-1");
    let policy = engine
        .append_credential_rule_registered_access(policy, Privilege::ReadAbout, false)
        .unwrap();
    let policy = engine.set_anonymous_access(policy, true);
    assert_eq!(policy.credential_rules.len(), 3);

    let reset = engine.reset(policy.clone());
    assert!(reset.credential_rules.is_empty());
    assert!(reset.privilege_rules.is_empty());
    assert!(reset.verified_credential_rules.is_empty());
    assert!(!reset.anonymous_read_access);
    assert_eq!(reset.id, policy.id);
}

#[test]
fn test_non_cascading_rule_stays_on_parent() {
    let engine = AuthorizationEngine::default();
    let parent = engine
        .append_credential_rule_registered_access(
            account_policy(&engine, "acct-1"),
            Privilege::ReadAbout,
            false,
        )
        .unwrap();
    let child = derive_child(&engine, &parent, AuthorizationPolicyType::Classification);

    assert_eq!(child.credential_rules.len(), 2);
    let user = testkit::registered("user-3");
    assert!(engine.is_access_granted(&user, &parent, Privilege::ReadAbout));
    assert!(!engine.is_access_granted(&user, &child, Privilege::ReadAbout));
}

#[test]
fn test_configured_anonymous_read_defaults() {
    let config = EngineConfig::from_json_str(
        r#"{ "anonymous_read": { "PROFILE": "always", "LICENSE": "never" } }"#,
    )
    .unwrap();
    let engine = AuthorizationEngine::new(config);

    let closed_parent = account_policy(&engine, "acct-1");
    let open_parent = engine.set_anonymous_access(closed_parent.clone(), true);

    let profile = derive_child(&engine, &closed_parent, AuthorizationPolicyType::Profile);
    let license = derive_child(&engine, &open_parent, AuthorizationPolicyType::License);
    let tagset = derive_child(&engine, &open_parent, AuthorizationPolicyType::Tagset);

    assert!(profile.anonymous_read_access);
    assert!(!license.anonymous_read_access);
    assert!(tagset.anonymous_read_access);
    assert_eq!(
        engine.config().anonymous_read_mode(AuthorizationPolicyType::Tagset),
        AnonymousReadMode::Inherit
    );
}
