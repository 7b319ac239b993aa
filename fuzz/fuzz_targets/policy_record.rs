#![no_main]

// Harness: policy_record
// Focus: decoding arbitrary stored rule columns returns an error instead of
// panicking, and anything that decodes re-encodes to an equal policy.

use libfuzzer_sys::fuzz_target;
use arbitrary::Arbitrary;
use authz_engine::{
    store::PolicyRecord,
    types::AuthorizationPolicyType,
    AuthorizationPolicy,
};

#[derive(Arbitrary, Debug, Clone)]
struct RecordFrame {
    id: [u8; 16],
    credential_rules: String,
    privilege_rules: String,
    verified_credential_rules: String,
    anonymous_read_access: bool,
}

fuzz_target!(|frame: RecordFrame| {
    let record = PolicyRecord {
        id: uuid::Uuid::from_bytes(frame.id),
        policy_type: AuthorizationPolicyType::Profile,
        credential_rules: frame.credential_rules,
        privilege_rules: frame.privilege_rules,
        verified_credential_rules: frame.verified_credential_rules,
        anonymous_read_access: frame.anonymous_read_access,
    };

    if let Ok(policy) = AuthorizationPolicy::try_from_record(&record) {
        let encoded = policy.to_record().expect("decoded policy must encode");
        let decoded =
            AuthorizationPolicy::try_from_record(&encoded).expect("encoded policy must decode");
        assert_eq!(policy, decoded);
    }
});
