//! `inmokit-auth` — authentication/authorization core (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage: it consumes a
//! [`Directory`] (read-mostly user/role/permission lookups) and exposes
//! credential issuance/validation plus a per-request access decision.

pub mod authenticator;
pub mod claims;
pub mod config;
pub mod directory;
pub mod engine;
pub mod exempt;
pub mod hasher;
pub mod pipeline;
pub mod requirement;
pub mod token;

#[cfg(test)]
pub(crate) mod testutil;

pub use authenticator::{Authenticator, LoginOutcome, PublicUser, Registration};
pub use claims::IdentityClaim;
pub use config::{AuthConfig, ConfigError};
pub use directory::{
    Directory, DirectoryError, NewUser, PermissionRecord, RoleGrants, RoleRecord, UserRecord,
    UserUpdate,
};
pub use engine::{AccessEngine, DenyReason, Decision};
pub use exempt::ExemptionRegistry;
pub use pipeline::{GuardPipeline, RequestIdentity};
pub use requirement::{AccessRequirement, RequirementToken};
pub use token::{TokenCodec, TokenError};
