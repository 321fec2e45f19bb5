//! Identity claims extracted from a verified token.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use inmokit_core::{RoleId, UserId};

use crate::token::TokenError;

/// The identity facts carried by a session token.
///
/// Created once at mint time, reconstructed by verification, never mutated.
/// Holders of this value have already passed signature and expiry checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Subject (user) identifier.
    pub subject_id: UserId,

    /// Login identifier (email).
    pub identifier: String,

    /// Role held at mint time.
    ///
    /// Access decisions re-resolve the role from the directory; this field
    /// is informational once the token is minted.
    pub role_id: RoleId,

    /// Issued-at timestamp.
    pub issued_at: DateTime<Utc>,

    /// Expiration timestamp.
    pub expires_at: DateTime<Utc>,
}

/// Deterministically validate claim timestamps.
///
/// The codec's signature check has already run by the time this is called;
/// this covers the time window only, so it can be tested without a clock.
pub fn validate_claims(claim: &IdentityClaim, now: DateTime<Utc>) -> Result<(), TokenError> {
    if now >= claim.expires_at {
        return Err(TokenError::Expired);
    }
    if claim.expires_at <= claim.issued_at {
        return Err(TokenError::Malformed("expires_at <= issued_at".into()));
    }
    Ok(())
}
