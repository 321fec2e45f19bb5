//! Access decision engine.
//!
//! Given a validated identity claim and an operation's declared requirement,
//! produce exactly one allow/deny decision. The subject's role and
//! permissions are re-resolved from the directory at decision time; nothing
//! but the subject id is trusted from the token.

use std::sync::Arc;

use inmokit_core::{CoreError, CoreResult};

use crate::claims::IdentityClaim;
use crate::directory::{Directory, RoleGrants};
use crate::requirement::{AccessRequirement, RequirementToken};

/// Why a request was denied.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// No valid identity (failed or missing authentication).
    Unauthorized,
    /// Valid identity, insufficient role/permissions — or the authenticated
    /// subject no longer exists.
    Forbidden,
}

/// Outcome of one access decision.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenyReason),
}

impl From<DenyReason> for CoreError {
    fn from(reason: DenyReason) -> Self {
        match reason {
            DenyReason::Unauthorized => CoreError::Unauthorized,
            DenyReason::Forbidden => CoreError::Forbidden,
        }
    }
}

/// Pure matching over a resolved role.
///
/// Allow iff any declared token matches: role-name equality, role-id
/// equality, or membership of a permission name in the role's effective set.
/// No token kind is ever guessed; an unmatched set denies.
pub fn matches(requirement: &AccessRequirement, grants: &RoleGrants) -> bool {
    requirement.tokens().iter().any(|token| match token {
        RequirementToken::Role(name) => grants.name == *name,
        RequirementToken::RoleId(id) => grants.id == *id,
        RequirementToken::Permission(name) => grants.permission_names.contains(name.as_ref()),
    })
}

/// Decides allow/deny for authenticated identities.
pub struct AccessEngine {
    directory: Arc<dyn Directory>,
}

impl AccessEngine {
    pub fn new(directory: Arc<dyn Directory>) -> Self {
        Self { directory }
    }

    /// Run the decision for one request.
    ///
    /// `claim` has already passed authentication, so every denial from here
    /// on is `Forbidden` — including a subject that has disappeared from the
    /// directory since the token was minted.
    pub fn decide(
        &self,
        claim: &IdentityClaim,
        requirement: &AccessRequirement,
    ) -> CoreResult<Decision> {
        if requirement.is_empty() {
            return Ok(Decision::Allow);
        }

        let Some(user) = self.directory.find_user_by_id(claim.subject_id)? else {
            tracing::warn!(subject_id = %claim.subject_id, "authenticated subject not in directory");
            return Ok(Decision::Deny(DenyReason::Forbidden));
        };

        let Some(grants) = self.directory.find_role_with_permissions(user.role_id)? else {
            tracing::warn!(role_id = %user.role_id, "subject role not in directory");
            return Ok(Decision::Deny(DenyReason::Forbidden));
        };

        if matches(requirement, &grants) {
            Ok(Decision::Allow)
        } else {
            tracing::debug!(
                subject_id = %claim.subject_id,
                role = %grants.name,
                "requirement not satisfied"
            );
            Ok(Decision::Deny(DenyReason::Forbidden))
        }
    }
}
