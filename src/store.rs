//!
//! Policy persistence seam.
//!
//! A persisted policy is a flat record: the three rule collections as JSON
//! text plus the anonymous-read flag. The engine never writes on its own;
//! callers hand the output of a propagation to [`save_all`].

use std::collections::HashMap;

use uuid::Uuid;

use crate::config::EngineConfig;
use crate::error::{AuthorizationError, Result};
use crate::primitives::AuthorizationPolicy;
use crate::types::AuthorizationPolicyType;

/// Storage form of an [`AuthorizationPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PolicyRecord {
    pub id: Uuid,
    pub policy_type: AuthorizationPolicyType,
    pub credential_rules: String,
    pub privilege_rules: String,
    pub verified_credential_rules: String,
    pub anonymous_read_access: bool,
}

// An empty column reads as no rules.
fn decode_rules<T: serde::de::DeserializeOwned>(column: &str) -> Result<Vec<T>> {
    if column.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(column)?)
}

impl AuthorizationPolicy {
    pub fn to_record(&self) -> Result<PolicyRecord> {
        Ok(PolicyRecord {
            id: self.id,
            policy_type: self.policy_type,
            credential_rules: serde_json::to_string(&self.credential_rules)?,
            privilege_rules: serde_json::to_string(&self.privilege_rules)?,
            verified_credential_rules: serde_json::to_string(&self.verified_credential_rules)?,
            anonymous_read_access: self.anonymous_read_access,
        })
    }

    pub fn try_from_record(record: &PolicyRecord) -> Result<Self> {
        Ok(AuthorizationPolicy {
            id: record.id,
            policy_type: record.policy_type,
            credential_rules: decode_rules(&record.credential_rules)?,
            privilege_rules: decode_rules(&record.privilege_rules)?,
            verified_credential_rules: decode_rules(&record.verified_credential_rules)?,
            anonymous_read_access: record.anonymous_read_access,
        })
    }
}

/// Idempotent storage keyed by policy id.
pub trait PolicyStore {
    /// Inserts or overwrites the policy with the same id.
    fn save(&mut self, policy: &AuthorizationPolicy) -> Result<()>;

    /// Removes the policy; removing an absent id succeeds.
    fn delete(&mut self, policy_id: Uuid) -> Result<()>;

    fn get_or_fail(&self, policy_id: Uuid) -> Result<AuthorizationPolicy>;

    /// Writes one batch. Stores with a native bulk write should override this.
    fn save_batch(&mut self, batch: &[AuthorizationPolicy]) -> Result<()> {
        for policy in batch {
            self.save(policy)?;
        }
        Ok(())
    }
}

/// Saves `policies` in batches of `config.save_chunk_size`, returning the
/// number of batches written.
pub fn save_all<S: PolicyStore + ?Sized>(
    store: &mut S,
    config: &EngineConfig,
    policies: &[AuthorizationPolicy],
) -> Result<usize> {
    let Some(first) = policies.first() else {
        return Ok(0);
    };
    if policies.len() > config.save_warn_threshold {
        tracing::warn!(
            count = policies.len(),
            policy_type = %first.policy_type,
            "saving a large number of authorization policies"
        );
    } else {
        tracing::debug!(count = policies.len(), "saving authorization policies");
    }

    let mut batches = 0;
    for batch in policies.chunks(config.save_chunk_size.max(1)) {
        store.save_batch(batch)?;
        batches += 1;
    }
    Ok(batches)
}

/// Map-backed store holding encoded records, mainly for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPolicyStore {
    records: HashMap<Uuid, PolicyRecord>,
}

impl InMemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn record(&self, policy_id: Uuid) -> Option<&PolicyRecord> {
        self.records.get(&policy_id)
    }

    /// Stores a raw record as-is, bypassing encoding.
    pub fn insert_record(&mut self, record: PolicyRecord) {
        self.records.insert(record.id, record);
    }
}

impl PolicyStore for InMemoryPolicyStore {
    fn save(&mut self, policy: &AuthorizationPolicy) -> Result<()> {
        let record = policy.to_record()?;
        self.records.insert(record.id, record);
        Ok(())
    }

    fn delete(&mut self, policy_id: Uuid) -> Result<()> {
        self.records.remove(&policy_id);
        Ok(())
    }

    fn get_or_fail(&self, policy_id: Uuid) -> Result<AuthorizationPolicy> {
        let record = self
            .records
            .get(&policy_id)
            .ok_or(AuthorizationError::EntityNotFound { policy_id })?;
        AuthorizationPolicy::try_from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access;
    use crate::primitives::CredentialDefinition;
    use crate::types::{CredentialType, Privilege};

    fn sample_policy() -> AuthorizationPolicy {
        let mut policy = AuthorizationPolicy::new(AuthorizationPolicyType::Classification);
        policy.upsert_credential_rule(
            access::create_credential_rule(
                &[Privilege::Read, Privilege::Update],
                vec![CredentialDefinition::scoped(CredentialType::AccountAdmin, "acct-1")],
                "account",
                true,
            )
            .unwrap(),
        );
        let about =
            access::create_privilege_rule(Privilege::Read, &[Privilege::ReadAbout], "about");
        policy.upsert_privilege_rule(about.unwrap());
        policy.anonymous_read_access = true;
        policy
    }

    #[test]
    fn test_record_preserves_policy() {
        let policy = sample_policy();
        let record = policy.to_record().unwrap();
        assert!(record.credential_rules.contains("ACCOUNT_ADMIN"));
        assert_eq!(record.verified_credential_rules, "[]");
        assert_eq!(AuthorizationPolicy::try_from_record(&record).unwrap(), policy);
    }

    #[test]
    fn test_empty_columns_read_as_no_rules() {
        let record = PolicyRecord {
            id: Uuid::new_v4(),
            policy_type: AuthorizationPolicyType::Tagset,
            credential_rules: String::new(),
            privilege_rules: String::new(),
            verified_credential_rules: "  ".into(),
            anonymous_read_access: false,
        };
        let policy = AuthorizationPolicy::try_from_record(&record).unwrap();
        assert_eq!(policy.rule_count(), 0);
    }

    #[test]
    fn test_corrupt_record_is_a_serialization_error() {
        let mut record = sample_policy().to_record().unwrap();
        record.credential_rules = "{not json".into();
        assert!(matches!(
            AuthorizationPolicy::try_from_record(&record),
            Err(AuthorizationError::Serialization(_))
        ));
    }

    #[test]
    fn test_corrupt_stored_record_fails_on_load() {
        let mut store = InMemoryPolicyStore::new();
        let mut record = sample_policy().to_record().unwrap();
        record.privilege_rules = "[{\"source_privilege\":\"NOT_A_PRIVILEGE\"}]".into();
        let policy_id = record.id;
        store.insert_record(record);

        assert_eq!(store.len(), 1);
        assert!(store.record(policy_id).is_some());
        assert!(matches!(
            store.get_or_fail(policy_id),
            Err(AuthorizationError::Serialization(_))
        ));
    }

    #[test]
    fn test_save_and_delete_are_idempotent() {
        let mut store = InMemoryPolicyStore::new();
        let policy = sample_policy();
        store.save(&policy).unwrap();
        store.save(&policy).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_or_fail(policy.id).unwrap(), policy);

        store.delete(policy.id).unwrap();
        store.delete(policy.id).unwrap();
        assert!(store.is_empty());
        assert_eq!(
            store.get_or_fail(policy.id),
            Err(AuthorizationError::EntityNotFound { policy_id: policy.id })
        );
    }

    #[test]
    fn test_save_all_chunks() {
        let config = EngineConfig {
            save_chunk_size: 3,
            ..EngineConfig::default()
        };
        let policies: Vec<_> = (0..7)
            .map(|_| AuthorizationPolicy::new(AuthorizationPolicyType::Tagset))
            .collect();
        let mut store = InMemoryPolicyStore::new();
        assert_eq!(save_all(&mut store, &config, &policies).unwrap(), 3);
        assert_eq!(store.len(), 7);
        assert_eq!(save_all(&mut store, &config, &[]).unwrap(), 0);
    }
}
