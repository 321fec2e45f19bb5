//! Ordered guard pipeline.
//!
//! The three stages run in one fixed, explicit order — exemption check,
//! authentication, access decision — as a single call per request. This
//! replaces the original deployment's pair of process-wide guards, whose
//! effective order depended on container registration order.

use std::sync::Arc;

use inmokit_core::{CoreError, CoreResult};

use crate::authenticator::Authenticator;
use crate::claims::IdentityClaim;
use crate::engine::{AccessEngine, Decision};
use crate::exempt::ExemptionRegistry;
use crate::requirement::AccessRequirement;

/// What the pipeline hands to the operation once it is allowed to run.
#[derive(Debug, Clone)]
pub enum RequestIdentity {
    /// The operation is exempt; no authentication was attempted.
    Exempt,
    /// The caller's validated claim.
    Authenticated(IdentityClaim),
}

impl RequestIdentity {
    pub fn claim(&self) -> Option<&IdentityClaim> {
        match self {
            RequestIdentity::Exempt => None,
            RequestIdentity::Authenticated(claim) => Some(claim),
        }
    }
}

/// Exemption → authentication → access decision.
pub struct GuardPipeline {
    exemptions: ExemptionRegistry,
    authenticator: Arc<Authenticator>,
    engine: AccessEngine,
}

impl GuardPipeline {
    pub fn new(
        exemptions: ExemptionRegistry,
        authenticator: Arc<Authenticator>,
        engine: AccessEngine,
    ) -> Self {
        Self {
            exemptions,
            authenticator,
            engine,
        }
    }

    pub fn authenticator(&self) -> &Authenticator {
        &self.authenticator
    }

    /// Authorize one request. At most one decision is made, and every
    /// denial path is side-effect-free.
    pub fn authorize(
        &self,
        controller: &str,
        operation: &str,
        requirement: &AccessRequirement,
        bearer: Option<&str>,
    ) -> CoreResult<RequestIdentity> {
        // Exemption is a full bypass: neither authentication nor the
        // decision engine runs, whatever the declared requirement says.
        if self.exemptions.is_exempt(controller, operation) {
            tracing::debug!(operation, "exempt operation, bypassing authentication");
            return Ok(RequestIdentity::Exempt);
        }

        let token = bearer.ok_or(CoreError::Unauthorized)?;
        let claim = self.authenticator.authenticate(token)?;

        match self.engine.decide(&claim, requirement)? {
            Decision::Allow => Ok(RequestIdentity::Authenticated(claim)),
            Decision::Deny(reason) => Err(reason.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthConfig;
    use crate::directory::RoleGrants;
    use crate::requirement::RequirementToken;
    use crate::testutil::StaticDirectory;
    use chrono::Duration;
    use inmokit_core::RoleId;
    use std::collections::BTreeSet;

    fn pipeline() -> (GuardPipeline, Arc<StaticDirectory>) {
        let dir = Arc::new(StaticDirectory::default());
        dir.insert_role(RoleGrants {
            id: RoleId::new(1),
            name: "Admin".to_string(),
            permission_names: BTreeSet::from(["CREATE_PROJECT".to_string()]),
        });
        dir.insert_role(RoleGrants {
            id: RoleId::new(2),
            name: "User".to_string(),
            permission_names: BTreeSet::new(),
        });

        let config =
            AuthConfig::new("unit-test-signing-secret-at-least-32-bytes", Duration::minutes(10))
                .unwrap();
        let authenticator = Arc::new(Authenticator::new(dir.clone(), &config));
        let engine = AccessEngine::new(dir.clone());

        let mut exemptions = ExemptionRegistry::new();
        exemptions.mark_operation("auth.login", true);

        (
            GuardPipeline::new(exemptions, authenticator, engine),
            dir,
        )
    }

    fn admin_requirement() -> AccessRequirement {
        AccessRequirement::any_of([RequirementToken::role("Admin")])
    }

    #[test]
    fn exempt_operation_bypasses_everything() {
        let (pipeline, _dir) = pipeline();
        // No bearer token, and a requirement that could never be satisfied:
        // exemption wins unconditionally.
        let outcome = pipeline
            .authorize("auth", "auth.login", &admin_requirement(), None)
            .unwrap();
        assert!(matches!(outcome, RequestIdentity::Exempt));
    }

    #[test]
    fn missing_token_is_unauthorized() {
        let (pipeline, _dir) = pipeline();
        let err = pipeline
            .authorize("users", "users.list", &admin_requirement(), None)
            .unwrap_err();
        assert_eq!(err, CoreError::Unauthorized);
    }

    #[test]
    fn invalid_token_is_unauthorized() {
        let (pipeline, _dir) = pipeline();
        let err = pipeline
            .authorize("users", "users.list", &admin_requirement(), Some("garbage"))
            .unwrap_err();
        assert_eq!(err, CoreError::Unauthorized);
    }

    #[test]
    fn authenticated_admin_is_allowed() {
        let (pipeline, dir) = pipeline();
        dir.insert_user("root@example.com", "secret", RoleId::new(1));
        let outcome = pipeline.authenticator().login("root@example.com", "secret").unwrap();

        let identity = pipeline
            .authorize(
                "users",
                "users.list",
                &admin_requirement(),
                Some(&outcome.token),
            )
            .unwrap();
        assert_eq!(identity.claim().unwrap().identifier, "root@example.com");
    }

    #[test]
    fn insufficient_role_is_forbidden() {
        let (pipeline, dir) = pipeline();
        dir.insert_user("plain@example.com", "secret", RoleId::new(2));
        let outcome = pipeline.authenticator().login("plain@example.com", "secret").unwrap();

        let err = pipeline
            .authorize(
                "users",
                "users.list",
                &admin_requirement(),
                Some(&outcome.token),
            )
            .unwrap_err();
        assert_eq!(err, CoreError::Forbidden);
    }

    #[test]
    fn empty_requirement_allows_any_authenticated_caller() {
        let (pipeline, dir) = pipeline();
        dir.insert_user("plain@example.com", "secret", RoleId::new(2));
        let outcome = pipeline.authenticator().login("plain@example.com", "secret").unwrap();

        let identity = pipeline
            .authorize(
                "auth",
                "auth.me",
                &AccessRequirement::none(),
                Some(&outcome.token),
            )
            .unwrap();
        assert!(identity.claim().is_some());
    }

    #[test]
    fn token_for_vanished_subject_is_forbidden() {
        // A structurally valid, unexpired token whose subject is gone from
        // the directory: authentication succeeds, the decision denies with
        // Forbidden (not Unauthorized, not Allow).
        let (pipeline, _empty_dir) = pipeline();

        let other_dir = Arc::new(StaticDirectory::default());
        let user = other_dir.insert_user("ghost@example.com", "secret", RoleId::new(1));
        let config =
            AuthConfig::new("unit-test-signing-secret-at-least-32-bytes", Duration::minutes(10))
                .unwrap();
        let other_auth = Authenticator::new(other_dir, &config);
        let token = other_auth.login("ghost@example.com", "secret").unwrap().token;
        assert_eq!(user.id.as_i64(), 1);

        let err = pipeline
            .authorize("users", "users.list", &admin_requirement(), Some(&token))
            .unwrap_err();
        assert_eq!(err, CoreError::Forbidden);
    }
}
