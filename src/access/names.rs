//! Rule type names.
//!
//! A rule's name is its identity inside a policy: appending a rule whose name
//! is already present replaces the old one.

pub const CREDENTIAL_RULE_TYPES_GLOBAL_ADMIN_MANAGE: &str = "credentialRuleTypes-globalAdminManage";
pub const CREDENTIAL_RULE_TYPES_GLOBAL_SUPPORT_MANAGE: &str =
    "credentialRuleTypes-globalSupportManage";
pub const CREDENTIAL_RULE_TYPES_GLOBAL_ROLES: &str = "credentialRuleTypes-globalRoles";
pub const CREDENTIAL_RULE_TYPES_ACCOUNT_MANAGE: &str = "credentialRuleTypes-accountManage";
pub const CREDENTIAL_RULE_TYPES_ACCOUNT_MANAGE_GLOBAL_ROLES: &str =
    "credentialRuleTypes-accountManageGlobalRoles";
pub const CREDENTIAL_RULE_TYPES_ACCOUNT_LICENSE_MANAGE: &str =
    "credentialRuleTypes-accountLicenseManage";
pub const CREDENTIAL_RULE_TYPES_ACCOUNT_CHILD_ENTITIES: &str =
    "credentialRuleTypes-accountChildEntities";
pub const CREDENTIAL_RULE_ACCOUNT_HOST_MANAGE: &str = "credentialRule-accountHostManage";
pub const CREDENTIAL_RULE_AI_SERVER_REGISTERED_READ: &str = "credentialRule-aiServerRegisteredRead";
pub const CREDENTIAL_RULE_ANONYMOUS_ACCESS: &str = "credentialRule-anonymousAccess";
pub const CREDENTIAL_RULE_REGISTERED_ACCESS: &str = "credentialRule-registeredAccess";
pub const CREDENTIAL_RULE_ANONYMOUS_REGISTERED_ACCESS: &str =
    "credentialRule-anonymousRegisteredAccess";
pub const CREDENTIAL_RULE_VC_CAMPAIGN_ACCESS: &str = "credentialRule-vcCampaignAccess";

pub const POLICY_RULE_READ_ABOUT: &str = "policyRule-readAbout";
pub const POLICY_RULE_ACCESS_VIRTUAL_CONTRIBUTOR: &str = "policyRule-accessVirtualContributor";
