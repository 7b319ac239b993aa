#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(deprecated)]

//!
//! Authz-Engine is the access-control core of a resource platform.
//!
//! Every domain object owns exactly one authorization policy. This crate
//! derives policies from a parent, recomputes them across an owned resource
//! tree when the hierarchy or held credentials change, and evaluates them at
//! request time to grant or deny a single privilege.
//!
//! ```
//! use authz_engine::{access, ActorContext, AuthorizationEngine, AuthorizationPolicy};
//! use authz_engine::types::{AuthorizationPolicyType, CredentialType, Privilege};
//! use authz_engine::CredentialDefinition;
//!
//! let engine = AuthorizationEngine::default();
//! let rule = access::create_credential_rule(
//!     &[Privilege::Read, Privilege::Update],
//!     vec![CredentialDefinition::scoped(CredentialType::AccountAdmin, "acct-1")],
//!     "account-manage",
//!     true,
//! )?;
//! let policy = engine.append_credential_authorization_rules(
//!     AuthorizationPolicy::new(AuthorizationPolicyType::Account),
//!     [rule],
//! );
//!
//! let admin = ActorContext::authenticated(
//!     "user-1",
//!     vec![CredentialDefinition::scoped(CredentialType::AccountAdmin, "acct-1")],
//! );
//! engine.grant_access_or_fail(&admin, &policy, Privilege::Update, "update account")?;
//! # Ok::<(), authz_engine::error::AuthorizationError>(())
//! ```

// Module for closed enumerations (Privilege, CredentialType, policy types).
pub mod types;

// Module for the policy data model (policies, rules, credentials, actors).
pub mod primitives;

// Re-export the data model at the crate root.
pub use primitives::*;

// Module for the privilege algebra.
pub mod privileges;

// Rule builders and well-known rule names.
pub mod access;

pub mod config;

pub mod error;

// Evaluation, inheritance and propagation.
pub mod engine;

pub use engine::{AuthorizationEngine, PolicyPropagator};

pub mod adapters;

pub mod store;

#[cfg(feature = "test-utils")]
pub mod testkit;
