use std::collections::BTreeSet;

use uuid::Uuid;

use crate::types::{AuthorizationPolicyType, CredentialType, Privilege};

// --- Credentials -------------------------------------------------------------

/// A credential as referenced by a rule, or as held by an actor.
///
/// On the rule side an unset `resource_id` matches every held credential of
/// the same type. On the actor side it is simply an unscoped credential.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct CredentialDefinition {
    pub credential_type: CredentialType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
}

impl CredentialDefinition {
    /// A credential scoped to one resource.
    pub fn scoped(credential_type: CredentialType, resource_id: impl Into<String>) -> Self {
        CredentialDefinition {
            credential_type,
            resource_id: Some(resource_id.into()),
        }
    }

    /// A credential that only names its type.
    pub fn type_only(credential_type: CredentialType) -> Self {
        CredentialDefinition {
            credential_type,
            resource_id: None,
        }
    }

    /// Whether a `held` credential satisfies this rule-side definition: the
    /// types must agree, and the scope must agree unless this one is unset.
    pub fn matches(&self, held: &CredentialDefinition) -> bool {
        if self.credential_type != held.credential_type {
            return false;
        }
        match &self.resource_id {
            None => true,
            Some(scope) => held.resource_id.as_deref() == Some(scope.as_str()),
        }
    }
}

// --- Rules -------------------------------------------------------------------

/// Grants a set of privileges to any actor holding one of `credentials`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CredentialRule {
    pub granted_privileges: BTreeSet<Privilege>,
    pub credentials: Vec<CredentialDefinition>,
    /// Rule type name; unique within one policy.
    pub name: String,
    /// Copied into descendant policies during inheritance.
    #[serde(default)]
    pub cascade: bool,
}

impl CredentialRule {
    pub fn grants(&self, privilege: Privilege) -> bool {
        self.granted_privileges.contains(&privilege)
    }

    /// The first of `held` that satisfies one of this rule's credentials.
    pub fn matching_credential<'a>(
        &self,
        held: &'a [CredentialDefinition],
    ) -> Option<&'a CredentialDefinition> {
        held.iter().find(|h| self.credentials.iter().any(|c| c.matches(h)))
    }
}

/// Grants `granted_privileges` to whoever already holds `source_privilege`
/// on the same policy.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PrivilegeRule {
    pub source_privilege: Privilege,
    pub granted_privileges: BTreeSet<Privilege>,
    pub name: String,
}

// --- Policy ------------------------------------------------------------------

/// The authorization policy owned by exactly one resource.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuthorizationPolicy {
    pub id: Uuid,
    pub policy_type: AuthorizationPolicyType,
    pub credential_rules: Vec<CredentialRule>,
    pub privilege_rules: Vec<PrivilegeRule>,
    pub verified_credential_rules: Vec<CredentialRule>,
    pub anonymous_read_access: bool,
}

impl AuthorizationPolicy {
    /// An empty policy for a freshly created resource.
    pub fn new(policy_type: AuthorizationPolicyType) -> Self {
        Self::with_id(Uuid::new_v4(), policy_type)
    }

    pub fn with_id(id: Uuid, policy_type: AuthorizationPolicyType) -> Self {
        AuthorizationPolicy {
            id,
            policy_type,
            credential_rules: Vec::new(),
            privilege_rules: Vec::new(),
            verified_credential_rules: Vec::new(),
            anonymous_read_access: false,
        }
    }

    pub fn rule_count(&self) -> usize {
        self.credential_rules.len()
            + self.privilege_rules.len()
            + self.verified_credential_rules.len()
    }

    pub fn credential_rule(&self, name: &str) -> Option<&CredentialRule> {
        self.credential_rules.iter().find(|r| r.name == name)
    }

    /// Inserts `rule`, replacing any existing credential rule with the same
    /// name in place so that rule order stays stable across recomputes.
    pub fn upsert_credential_rule(&mut self, rule: CredentialRule) {
        upsert_by_name(&mut self.credential_rules, rule, |r| &r.name);
    }

    pub fn upsert_verified_credential_rule(&mut self, rule: CredentialRule) {
        upsert_by_name(&mut self.verified_credential_rules, rule, |r| &r.name);
    }

    pub fn upsert_privilege_rule(&mut self, rule: PrivilegeRule) {
        upsert_by_name(&mut self.privilege_rules, rule, |r| &r.name);
    }
}

fn upsert_by_name<T>(rules: &mut Vec<T>, rule: T, name: impl Fn(&T) -> &String) {
    match rules.iter().position(|r| name(r) == name(&rule)) {
        Some(idx) => rules[idx] = rule,
        None => rules.push(rule),
    }
}

// --- Actor -------------------------------------------------------------------

/// Who is asking: the credentials resolved upstream for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ActorContext {
    pub actor_id: Option<String>,
    pub credentials: Vec<CredentialDefinition>,
    /// Credentials that passed attestation; only these satisfy verified rules.
    #[serde(default)]
    pub verified_credentials: Vec<CredentialDefinition>,
    #[serde(default)]
    pub anonymous: bool,
}

impl ActorContext {
    /// An unauthenticated actor. It holds only the global anonymous
    /// credential, so rules naming that credential apply to it.
    pub fn anonymous() -> Self {
        ActorContext {
            credentials: vec![CredentialDefinition::type_only(CredentialType::GlobalAnonymous)],
            anonymous: true,
            ..Default::default()
        }
    }

    pub fn authenticated(
        actor_id: impl Into<String>,
        credentials: Vec<CredentialDefinition>,
    ) -> Self {
        ActorContext {
            actor_id: Some(actor_id.into()),
            credentials,
            verified_credentials: Vec::new(),
            anonymous: false,
        }
    }

    pub fn with_credential(mut self, credential: CredentialDefinition) -> Self {
        self.credentials.push(credential);
        self
    }

    pub fn with_verified_credential(mut self, credential: CredentialDefinition) -> Self {
        self.verified_credentials.push(credential);
        self
    }
}
