//! Credential issuance and token validation.

use std::sync::Arc;

use serde::Serialize;

use inmokit_core::{CoreError, CoreResult, RoleId, UserId};

use crate::claims::IdentityClaim;
use crate::config::AuthConfig;
use crate::directory::{Directory, NewUser, UserRecord};
use crate::hasher;
use crate::token::TokenCodec;

/// Profile view of a user, safe to return to callers.
///
/// Built from [`UserRecord`] by dropping the secret hash; there is no other
/// way to construct one from a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicUser {
    pub id: UserId,
    pub identifier: String,
    pub display_name: Option<String>,
    pub role_id: RoleId,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            identifier: record.identifier.clone(),
            display_name: record.display_name.clone(),
            role_id: record.role_id,
        }
    }
}

/// Input to [`Authenticator::register`]. The secret arrives raw and is
/// hashed before it touches the directory.
#[derive(Debug, Clone)]
pub struct Registration {
    pub identifier: String,
    pub secret: String,
    pub display_name: Option<String>,
    pub role_id: RoleId,
}

/// Successful login: a bearer token plus the profile view.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: PublicUser,
}

/// Turns credentials into signed tokens and tokens into validated claims.
pub struct Authenticator {
    directory: Arc<dyn Directory>,
    codec: TokenCodec,
    token_ttl: chrono::Duration,
}

impl Authenticator {
    pub fn new(directory: Arc<dyn Directory>, config: &AuthConfig) -> Self {
        Self {
            codec: TokenCodec::new(config.signing_secret.as_bytes()),
            token_ttl: config.token_ttl,
            directory,
        }
    }

    /// Create a user record with a hashed secret.
    ///
    /// Fails with `Conflict` when the identifier is already registered. The
    /// returned profile excludes the hash.
    pub fn register(&self, registration: Registration) -> CoreResult<PublicUser> {
        if self
            .directory
            .find_user_by_identifier(&registration.identifier)?
            .is_some()
        {
            return Err(CoreError::conflict("identifier already registered"));
        }

        let secret_hash = hasher::hash_secret(&registration.secret)?;
        let record = self.directory.create_user(NewUser {
            identifier: registration.identifier,
            secret_hash,
            display_name: registration.display_name,
            role_id: registration.role_id,
        })?;

        tracing::info!(user_id = %record.id, "user registered");
        Ok(PublicUser::from(&record))
    }

    /// Verify credentials and mint a session token.
    ///
    /// An unknown identifier and a wrong secret produce the identical
    /// `Unauthorized` value, so callers cannot enumerate identifiers.
    pub fn login(&self, identifier: &str, secret: &str) -> CoreResult<LoginOutcome> {
        let Some(user) = self.directory.find_user_by_identifier(identifier)? else {
            tracing::debug!("login rejected");
            return Err(CoreError::Unauthorized);
        };

        if !hasher::verify_secret(secret, &user.secret_hash)? {
            tracing::debug!("login rejected");
            return Err(CoreError::Unauthorized);
        }

        let token = self
            .codec
            .mint(user.id, &user.identifier, user.role_id, self.token_ttl)
            .map_err(|e| {
                tracing::error!(error = %e, "token minting failed");
                CoreError::Internal
            })?;

        tracing::info!(user_id = %user.id, "login succeeded");
        Ok(LoginOutcome {
            token,
            user: PublicUser::from(&user),
        })
    }

    /// Validate a bearer token into an identity claim.
    ///
    /// Every codec-level failure (bad signature, expiry, malformed payload)
    /// maps to the same `Unauthorized`; no decoding detail crosses the
    /// boundary.
    pub fn authenticate(&self, token: &str) -> CoreResult<IdentityClaim> {
        self.codec.verify(token).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            CoreError::Unauthorized
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::StaticDirectory;
    use chrono::Duration;

    fn config() -> AuthConfig {
        AuthConfig::new("unit-test-signing-secret-at-least-32-bytes", Duration::minutes(10)).unwrap()
    }

    fn directory_with_alice() -> Arc<StaticDirectory> {
        let dir = StaticDirectory::default();
        dir.insert_user("alice@example.com", "correct horse", RoleId::new(1));
        Arc::new(dir)
    }

    #[test]
    fn register_then_login() {
        let auth = Authenticator::new(Arc::new(StaticDirectory::default()), &config());

        let user = auth
            .register(Registration {
                identifier: "bob@example.com".to_string(),
                secret: "battery staple".to_string(),
                display_name: Some("Bob".to_string()),
                role_id: RoleId::new(2),
            })
            .unwrap();
        assert_eq!(user.identifier, "bob@example.com");

        let outcome = auth.login("bob@example.com", "battery staple").unwrap();
        assert_eq!(outcome.user.id, user.id);

        let claim = auth.authenticate(&outcome.token).unwrap();
        assert_eq!(claim.subject_id, user.id);
        assert_eq!(claim.role_id, RoleId::new(2));
    }

    #[test]
    fn register_duplicate_identifier_conflicts() {
        let auth = Authenticator::new(directory_with_alice(), &config());

        let result = auth.register(Registration {
            identifier: "alice@example.com".to_string(),
            secret: "whatever".to_string(),
            display_name: None,
            role_id: RoleId::new(1),
        });
        assert!(matches!(result, Err(CoreError::Conflict(_))));
    }

    #[test]
    fn login_failures_are_indistinguishable() {
        let auth = Authenticator::new(directory_with_alice(), &config());

        let unknown = auth.login("nobody@example.com", "correct horse");
        let wrong_secret = auth.login("alice@example.com", "wrong");

        assert_eq!(unknown.unwrap_err(), CoreError::Unauthorized);
        assert_eq!(wrong_secret.unwrap_err(), CoreError::Unauthorized);
        // Same variant, same message: nothing to enumerate on.
        assert_eq!(
            CoreError::Unauthorized.to_string(),
            "invalid credentials"
        );
    }

    #[test]
    fn authenticate_maps_codec_errors_to_unauthorized() {
        let auth = Authenticator::new(directory_with_alice(), &config());
        assert_eq!(
            auth.authenticate("garbage").unwrap_err(),
            CoreError::Unauthorized
        );

        let expired_config =
            AuthConfig::new("unit-test-signing-secret-at-least-32-bytes", Duration::seconds(-60))
                .unwrap();
        let expired_auth = Authenticator::new(directory_with_alice(), &expired_config);
        let outcome = expired_auth.login("alice@example.com", "correct horse").unwrap();
        assert_eq!(
            expired_auth.authenticate(&outcome.token).unwrap_err(),
            CoreError::Unauthorized
        );
    }

    #[test]
    fn profile_view_has_no_hash_field() {
        let dir = directory_with_alice();
        let auth = Authenticator::new(dir, &config());
        let outcome = auth.login("alice@example.com", "correct horse").unwrap();

        let json = serde_json::to_value(&outcome.user).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.get("secret_hash").is_none());
        assert!(object.get("password").is_none());
        assert_eq!(object.len(), 4);
    }
}
