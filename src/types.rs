//!
//! Closed enumerations shared across the engine: privileges, credential types,
//! global roles and the policy type discriminator.
//!
//! Each enum serializes as its SCREAMING_SNAKE_CASE name, which is also the
//! form used in persisted policy records and in log output.

use std::fmt;
use std::str::FromStr;

use crate::error::AuthorizationError;

/// Generates `as_str`, `ALL`, `Display` and `FromStr` for a fieldless enum.
macro_rules! named_enum {
    ($ty:ident, $label:literal, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$ty] = &[$($ty::$variant),+];

            /// Canonical wire name of this variant.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name),+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = AuthorizationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok($ty::$variant),)+
                    other => Err(AuthorizationError::Validation(format!(
                        "unknown {}: '{}'",
                        $label, other
                    ))),
                }
            }
        }
    };
}

/// An action category exercisable on a resource.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Privilege {
    Create,
    Read,
    /// Read the public "about" surface of a resource only.
    ReadAbout,
    Update,
    Delete,
    Grant,
    GrantGlobalAdmins,
    AuthorizationReset,
    PlatformAdmin,
    Contribute,
    CreateSpace,
    CreateVirtual,
    CreateInnovationPack,
    AccountLicenseManage,
    AccessVirtualContributor,
    AccessInteractiveGuidance,
    FileUpload,
    ReadUsers,
    TransferResourceOffer,
    TransferResourceAccept,
}

named_enum!(Privilege, "privilege", {
    Create => "CREATE",
    Read => "READ",
    ReadAbout => "READ_ABOUT",
    Update => "UPDATE",
    Delete => "DELETE",
    Grant => "GRANT",
    GrantGlobalAdmins => "GRANT_GLOBAL_ADMINS",
    AuthorizationReset => "AUTHORIZATION_RESET",
    PlatformAdmin => "PLATFORM_ADMIN",
    Contribute => "CONTRIBUTE",
    CreateSpace => "CREATE_SPACE",
    CreateVirtual => "CREATE_VIRTUAL",
    CreateInnovationPack => "CREATE_INNOVATION_PACK",
    AccountLicenseManage => "ACCOUNT_LICENSE_MANAGE",
    AccessVirtualContributor => "ACCESS_VIRTUAL_CONTRIBUTOR",
    AccessInteractiveGuidance => "ACCESS_INTERACTIVE_GUIDANCE",
    FileUpload => "FILE_UPLOAD",
    ReadUsers => "READ_USERS",
    TransferResourceOffer => "TRANSFER_RESOURCE_OFFER",
    TransferResourceAccept => "TRANSFER_RESOURCE_ACCEPT",
});

/// The kind of claim an actor can hold. Whether the claim is scoped to a
/// particular resource is decided by the `resource_id` of the credential
/// definition, not by the type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CredentialType {
    GlobalAdmin,
    GlobalSupport,
    GlobalLicenseManager,
    GlobalCommunityRead,
    GlobalSpacesReader,
    GlobalRegistered,
    GlobalAnonymous,
    GlobalGuest,
    AccountAdmin,
    AccountHost,
    SpaceAdmin,
    SpaceMember,
    SpaceLead,
    OrganizationAdmin,
    OrganizationAssociate,
    UserSelfManagement,
    BetaTester,
    VcCampaign,
}

named_enum!(CredentialType, "credential type", {
    GlobalAdmin => "GLOBAL_ADMIN",
    GlobalSupport => "GLOBAL_SUPPORT",
    GlobalLicenseManager => "GLOBAL_LICENSE_MANAGER",
    GlobalCommunityRead => "GLOBAL_COMMUNITY_READ",
    GlobalSpacesReader => "GLOBAL_SPACES_READER",
    GlobalRegistered => "GLOBAL_REGISTERED",
    GlobalAnonymous => "GLOBAL_ANONYMOUS",
    GlobalGuest => "GLOBAL_GUEST",
    AccountAdmin => "ACCOUNT_ADMIN",
    AccountHost => "ACCOUNT_HOST",
    SpaceAdmin => "SPACE_ADMIN",
    SpaceMember => "SPACE_MEMBER",
    SpaceLead => "SPACE_LEAD",
    OrganizationAdmin => "ORGANIZATION_ADMIN",
    OrganizationAssociate => "ORGANIZATION_ASSOCIATE",
    UserSelfManagement => "USER_SELF_MANAGEMENT",
    BetaTester => "BETA_TESTER",
    VcCampaign => "VC_CAMPAIGN",
});

/// Platform-wide roles that map one-to-one onto a global credential type.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GlobalRole {
    GlobalAdmin,
    GlobalSupport,
    GlobalCommunityRead,
}

named_enum!(GlobalRole, "global role", {
    GlobalAdmin => "GLOBAL_ADMIN",
    GlobalSupport => "GLOBAL_SUPPORT",
    GlobalCommunityRead => "GLOBAL_COMMUNITY_READ",
});

impl GlobalRole {
    /// The credential an actor must hold to act in this role.
    pub const fn credential_type(&self) -> CredentialType {
        match self {
            GlobalRole::GlobalAdmin => CredentialType::GlobalAdmin,
            GlobalRole::GlobalSupport => CredentialType::GlobalSupport,
            GlobalRole::GlobalCommunityRead => CredentialType::GlobalCommunityRead,
        }
    }
}

/// Discriminator recording which kind of resource owns a policy.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthorizationPolicyType {
    #[default]
    Unknown,
    /// Built on the fly for a check, never persisted.
    InMemory,
    Platform,
    Account,
    Space,
    VirtualContributor,
    AiServer,
    AiPersonaService,
    Classification,
    Tagset,
    Profile,
    KnowledgeBase,
    License,
    StorageAggregator,
}

named_enum!(AuthorizationPolicyType, "authorization policy type", {
    Unknown => "UNKNOWN",
    InMemory => "IN_MEMORY",
    Platform => "PLATFORM",
    Account => "ACCOUNT",
    Space => "SPACE",
    VirtualContributor => "VIRTUAL_CONTRIBUTOR",
    AiServer => "AI_SERVER",
    AiPersonaService => "AI_PERSONA_SERVICE",
    Classification => "CLASSIFICATION",
    Tagset => "TAGSET",
    Profile => "PROFILE",
    KnowledgeBase => "KNOWLEDGE_BASE",
    License => "LICENSE",
    StorageAggregator => "STORAGE_AGGREGATOR",
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_serde_name() {
        for privilege in Privilege::ALL {
            let json = serde_json::to_string(privilege).unwrap();
            assert_eq!(json, format!("\"{}\"", privilege));
        }
        for credential_type in CredentialType::ALL {
            let json = serde_json::to_string(credential_type).unwrap();
            assert_eq!(json, format!("\"{}\"", credential_type));
        }
        for policy_type in AuthorizationPolicyType::ALL {
            let json = serde_json::to_string(policy_type).unwrap();
            assert_eq!(json, format!("\"{}\"", policy_type));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown_names() {
        assert_eq!("READ".parse::<Privilege>().unwrap(), Privilege::Read);
        assert_eq!(
            "ACCOUNT_ADMIN".parse::<CredentialType>().unwrap(),
            CredentialType::AccountAdmin
        );
        let err = "read".parse::<Privilege>().unwrap_err();
        assert!(matches!(err, AuthorizationError::Validation(_)));
        assert!("SUPER_USER".parse::<GlobalRole>().is_err());
    }

    #[test]
    fn test_global_role_credential_mapping() {
        assert_eq!(GlobalRole::GlobalAdmin.credential_type(), CredentialType::GlobalAdmin);
        assert_eq!(GlobalRole::GlobalSupport.credential_type(), CredentialType::GlobalSupport);
        assert_eq!(
            GlobalRole::GlobalCommunityRead.credential_type(),
            CredentialType::GlobalCommunityRead
        );
    }
}
