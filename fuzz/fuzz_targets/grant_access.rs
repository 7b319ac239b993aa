#![no_main]

// Harness: grant_access
// Focus: evaluation never panics, agrees with granted_privileges, and the
// anonymous actor reads exactly when the flag or an anonymous rule allows it.

use std::collections::BTreeSet;

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use authz_engine::{
    access, privileges,
    types::{AuthorizationPolicyType, CredentialType, Privilege},
    ActorContext, AuthorizationEngine, AuthorizationPolicy, CredentialDefinition,
};

#[derive(Arbitrary, Debug, Clone)]
struct RawCredential {
    credential_type: u8,
    scope: Option<u8>,
}

#[derive(Arbitrary, Debug, Clone)]
struct RawRule {
    privileges: Vec<u8>,
    credentials: Vec<RawCredential>,
    name: u8,
    cascade: bool,
}

#[derive(Arbitrary, Debug, Clone)]
struct EvalFrame {
    rules: Vec<RawRule>,
    privilege_rules: Vec<(u8, u8)>,
    anonymous_read_access: bool,
    held: Vec<RawCredential>,
    required: u8,
}

fn privilege(raw: u8) -> Privilege {
    Privilege::ALL[raw as usize % Privilege::ALL.len()]
}

fn credential(raw: &RawCredential) -> CredentialDefinition {
    let index = raw.credential_type as usize % CredentialType::ALL.len();
    let credential_type = CredentialType::ALL[index];
    match raw.scope {
        Some(scope) => CredentialDefinition::scoped(credential_type, format!("r-{}", scope % 4)),
        None => CredentialDefinition::type_only(credential_type),
    }
}

fuzz_target!(|frame: EvalFrame| {
    let engine = AuthorizationEngine::default();
    let mut policy = AuthorizationPolicy::new(AuthorizationPolicyType::Space);

    for raw in frame.rules.iter().take(16) {
        let granted: Vec<Privilege> =
            raw.privileges.iter().take(8).copied().map(privilege).collect();
        let credentials = raw.credentials.iter().take(4).map(credential).collect();
        let name = format!("rule-{}", raw.name % 8);
        // Empty privileges or credentials are rejected by the builder.
        let rule = access::create_credential_rule(&granted, credentials, &name, raw.cascade);
        if let Ok(rule) = rule {
            policy = engine.append_credential_authorization_rules(policy, [rule]);
        }
    }
    for (i, (source, granted)) in frame.privilege_rules.iter().take(8).enumerate() {
        let name = format!("p-{}", i);
        let rule = access::create_privilege_rule(privilege(*source), &[privilege(*granted)], &name);
        if let Ok(rule) = rule {
            policy = engine.append_privilege_authorization_rules(policy, [rule]);
        }
    }
    policy = engine.set_anonymous_access(policy, frame.anonymous_read_access);

    let held = frame.held.iter().take(8).map(credential).collect();
    let actor = ActorContext::authenticated("fuzz", held);
    let required = privilege(frame.required);

    let granted = engine.is_access_granted(&actor, &policy, required);
    assert_eq!(granted, engine.granted_privileges(&actor, &policy).contains(&required));
    let checked = engine.grant_access_or_fail(&actor, &policy, required, "fuzz");
    assert_eq!(granted, checked.is_ok());

    // The anonymous actor reads whenever the flag is set; without it only a
    // rule naming the anonymous credential lets it read.
    let anonymous = ActorContext::anonymous();
    let anonymous_read = engine.is_access_granted(&anonymous, &policy, Privilege::Read);
    let from_rules: BTreeSet<Privilege> = policy
        .credential_rules
        .iter()
        .filter(|r| r.matching_credential(&anonymous.credentials).is_some())
        .flat_map(|r| r.granted_privileges.iter().copied())
        .collect();
    let by_rule = privileges::sufficient(&from_rules, &policy.privilege_rules, Privilege::Read);
    assert_eq!(anonymous_read, policy.anonymous_read_access || by_rule);

    // A child derived from this policy holds exactly the cascading rules.
    let child = engine.inherit_parent_authorization(
        engine.reset(AuthorizationPolicy::new(AuthorizationPolicyType::Tagset)),
        Some(&policy),
    );
    assert_eq!(
        child.credential_rules.len(),
        policy.credential_rules.iter().filter(|r| r.cascade).count()
    );
});
