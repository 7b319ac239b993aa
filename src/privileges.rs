//!
//! Privilege algebra.
//! A policy's privilege rules map a source privilege onto further privileges.
//! The helpers here close a set of directly granted privileges under those
//! mappings and answer whether a required privilege is covered.

use std::collections::BTreeSet;

use crate::primitives::PrivilegeRule;
use crate::types::Privilege;

/// Canonicalizes a granted privilege set by adding everything implied through
/// `rules`, until no rule adds anything new.
///
/// Rules may chain (`READ -> READ_ABOUT`, `UPDATE -> READ`) and may form cycles;
/// the loop terminates because the set only grows and `Privilege` is finite.
pub fn expand(granted: &BTreeSet<Privilege>, rules: &[PrivilegeRule]) -> BTreeSet<Privilege> {
    let mut closed = granted.clone();
    loop {
        let before = closed.len();
        for rule in rules {
            if closed.contains(&rule.source_privilege) {
                closed.extend(rule.granted_privileges.iter().copied());
            }
        }
        if closed.len() == before {
            return closed;
        }
    }
}

/// Checks whether the privileges in `granted` cover `required`, once
/// implied privileges from `rules` are added.
#[inline]
pub fn sufficient(
    granted: &BTreeSet<Privilege>,
    rules: &[PrivilegeRule],
    required: Privilege,
) -> bool {
    if granted.contains(&required) {
        return true;
    }
    // Nothing can imply `required` without a rule that lists it.
    if !rules.iter().any(|r| r.granted_privileges.contains(&required)) {
        return false;
    }
    expand(granted, rules).contains(&required)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(source: Privilege, granted: &[Privilege]) -> PrivilegeRule {
        PrivilegeRule {
            source_privilege: source,
            granted_privileges: granted.iter().copied().collect(),
            name: format!("{}-mapping", source),
        }
    }

    fn set(privileges: &[Privilege]) -> BTreeSet<Privilege> {
        privileges.iter().copied().collect()
    }

    #[test]
    fn test_expand_without_rules_is_identity() {
        let granted = set(&[Privilege::Read, Privilege::Update]);
        assert_eq!(expand(&granted, &[]), granted);
        assert_eq!(expand(&BTreeSet::new(), &[]), BTreeSet::new());
    }

    #[test]
    fn test_expand_follows_chains() {
        let rules = vec![
            mapping(Privilege::Update, &[Privilege::Read]),
            mapping(Privilege::Read, &[Privilege::ReadAbout]),
        ];
        let closed = expand(&set(&[Privilege::Update]), &rules);
        assert_eq!(closed, set(&[Privilege::Read, Privilege::ReadAbout, Privilege::Update]));
    }

    #[test]
    fn test_expand_terminates_on_cycles() {
        let rules = vec![
            mapping(Privilege::Read, &[Privilege::ReadAbout]),
            mapping(Privilege::ReadAbout, &[Privilege::Read]),
        ];
        let closed = expand(&set(&[Privilege::ReadAbout]), &rules);
        assert_eq!(closed, set(&[Privilege::Read, Privilege::ReadAbout]));
    }

    #[test]
    fn test_sufficient_with_mapping() {
        let rules = vec![mapping(Privilege::Update, &[Privilege::Delete])];
        assert!(sufficient(&set(&[Privilege::Update]), &rules, Privilege::Delete));
        assert!(!sufficient(&set(&[Privilege::Read]), &rules, Privilege::Delete));
        assert!(sufficient(&set(&[Privilege::Read]), &rules, Privilege::Read));
        assert!(!sufficient(&BTreeSet::new(), &rules, Privilege::Update));
    }
}
