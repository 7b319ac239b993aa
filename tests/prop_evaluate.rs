use proptest::prelude::*;
use authz_engine::{
    access,
    config::EngineConfig,
    error::AuthorizationError,
    types::{AuthorizationPolicyType, CredentialType, Privilege},
    ActorContext, AuthorizationEngine, AuthorizationPolicy, CredentialDefinition, CredentialRule,
    PrivilegeRule,
};

// --- Strategies ---

fn arb_privilege() -> impl Strategy<Value = Privilege> {
    prop::sample::select(Privilege::ALL.to_vec())
}

fn arb_credential() -> impl Strategy<Value = CredentialDefinition> {
    (
        prop::sample::select(vec![
            CredentialType::GlobalAdmin,
            CredentialType::GlobalRegistered,
            CredentialType::AccountAdmin,
            CredentialType::SpaceMember,
        ]),
        prop::option::of(prop::sample::select(vec!["acct-1", "acct-2"])),
    )
        .prop_map(|(credential_type, scope)| match scope {
            Some(scope) => CredentialDefinition::scoped(credential_type, scope),
            None => CredentialDefinition::type_only(credential_type),
        })
}

fn arb_rule(index: usize) -> impl Strategy<Value = CredentialRule> {
    (
        prop::collection::vec(arb_privilege(), 1..4),
        prop::collection::vec(arb_credential(), 1..3),
        any::<bool>(),
    )
        .prop_map(move |(privileges, credentials, cascade)| {
            let name = format!("rule-{}", index);
            access::create_credential_rule(&privileges, credentials, &name, cascade).unwrap()
        })
}

fn arb_credential_rules() -> impl Strategy<Value = Vec<CredentialRule>> {
    (0usize..5).prop_flat_map(|n| (0..n).map(arb_rule).collect::<Vec<_>>())
}

fn arb_privilege_rules() -> impl Strategy<Value = Vec<PrivilegeRule>> {
    prop::collection::vec((arb_privilege(), arb_privilege()), 0..3).prop_map(|pairs| {
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (source, granted))| {
                let name = format!("privilege-{}", i);
                access::create_privilege_rule(source, &[granted], &name).unwrap()
            })
            .collect()
    })
}

fn arb_policy() -> impl Strategy<Value = AuthorizationPolicy> {
    (arb_credential_rules(), arb_privilege_rules(), any::<bool>()).prop_map(
        |(credential_rules, privilege_rules, anonymous_read_access)| {
            let engine = AuthorizationEngine::default();
            let policy = AuthorizationPolicy::new(AuthorizationPolicyType::Space);
            let policy = engine.append_credential_authorization_rules(policy, credential_rules);
            let policy = engine.append_privilege_authorization_rules(policy, privilege_rules);
            engine.set_anonymous_access(policy, anonymous_read_access)
        },
    )
}

fn arb_actor() -> impl Strategy<Value = ActorContext> {
    prop::collection::vec(arb_credential(), 0..4)
        .prop_map(|credentials| ActorContext::authenticated("actor", credentials))
}

proptest! {
    /// An anonymous actor reads iff the policy allows anonymous reads.
    #[test]
    fn prop_anonymous_read_iff_flag(policy in arb_policy()) {
        let engine = AuthorizationEngine::default();
        let anonymous = ActorContext::anonymous();
        let granted = engine.is_access_granted(&anonymous, &policy, Privilege::Read);
        prop_assert_eq!(granted, policy.anonymous_read_access);
    }

    /// The boolean check and the listed privileges agree.
    #[test]
    fn prop_check_matches_granted_privileges(
        policy in arb_policy(),
        actor in arb_actor(),
        required in arb_privilege(),
    ) {
        let engine = AuthorizationEngine::default();
        let listed = engine.granted_privileges(&actor, &policy);
        let granted = engine.is_access_granted(&actor, &policy, required);
        prop_assert_eq!(granted, listed.contains(&required));
    }

    /// Adding a rule never takes access away.
    #[test]
    fn prop_more_rules_never_deny(
        policy in arb_policy(),
        extra in arb_rule(99),
        actor in arb_actor(),
        required in arb_privilege(),
    ) {
        let engine = AuthorizationEngine::default();
        let before = engine.is_access_granted(&actor, &policy, required);
        let widened = engine.append_credential_authorization_rules(policy, [extra]);
        if before {
            prop_assert!(engine.is_access_granted(&actor, &widened, required));
        }
    }

    /// A denial always carries the policy and the requested privilege.
    #[test]
    fn prop_denial_reports_context(
        policy in arb_policy(),
        actor in arb_actor(),
        required in arb_privilege(),
    ) {
        let engine = AuthorizationEngine::default();
        match engine.grant_access_or_fail(&actor, &policy, required, "check") {
            Ok(()) => prop_assert!(engine.is_access_granted(&actor, &policy, required)),
            Err(AuthorizationError::Forbidden { privilege, context }) => {
                prop_assert_eq!(privilege, required);
                prop_assert_eq!(context.policy_id, policy.id);
                prop_assert_eq!(context.actor_id.as_deref(), Some("actor"));
            }
            Err(other) => prop_assert!(false, "unexpected error: {:?}", other),
        }
    }

    /// With authentication disabled nothing is denied.
    #[test]
    fn prop_disabled_authentication_grants_all(
        policy in arb_policy(),
        required in arb_privilege()
    ) {
        let engine = AuthorizationEngine::new(EngineConfig {
            authentication_enabled: false,
            ..EngineConfig::default()
        });
        let anonymous = ActorContext::anonymous();
        prop_assert!(engine.grant_access_or_fail(&anonymous, &policy, required, "check").is_ok());
    }
}
