//! Signed session token codec (HS256).
//!
//! A token is an opaque bearer string embedding the subject id, login
//! identifier, and role id, plus issued-at/expiry timestamps. Any
//! modification invalidates the signature, and no embedded field is trusted
//! before the signature has been verified.

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use inmokit_core::{RoleId, UserId};

use crate::claims::{IdentityClaim, validate_claims};

/// Codec-internal failure. Callers outside the core never see this type;
/// the authenticator maps it to the boundary taxonomy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token signature is invalid")]
    Signature,

    #[error("token has expired")]
    Expired,

    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("token encoding failed: {0}")]
    Encode(String),
}

/// Compact wire form of [`IdentityClaim`].
///
/// Uses the conventional JWT claim names; timestamps are Unix seconds.
#[derive(Debug, Serialize, Deserialize)]
struct WireClaims {
    sub: i64,
    email: String,
    role_id: i64,
    iat: i64,
    exp: i64,
}

/// Mints and verifies session tokens with a process-wide secret.
///
/// The secret is loaded once at startup (see [`crate::config::AuthConfig`]);
/// there is no fallback default.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenCodec {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }

    /// Mint a signed token for the given subject, valid for `ttl` from now.
    pub fn mint(
        &self,
        subject_id: UserId,
        identifier: &str,
        role_id: RoleId,
        ttl: Duration,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let wire = WireClaims {
            sub: subject_id.as_i64(),
            email: identifier.to_string(),
            role_id: role_id.as_i64(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &wire, &self.encoding)
            .map_err(|e| TokenError::Encode(e.to_string()))
    }

    /// Verify a token and reconstruct its claim.
    ///
    /// Order: signature integrity first (short-circuits everything else),
    /// then expiry, then structural validity of the embedded fields. No
    /// field is interpreted before the signature has been verified, and
    /// expiry is checked without leeway.
    pub fn verify(&self, token: &str) -> Result<IdentityClaim, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is enforced by `validate_claims` below (exact, no leeway).
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data = decode::<WireClaims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::Signature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        let claim = claim_from_wire(data.claims)?;
        validate_claims(&claim, Utc::now())?;
        Ok(claim)
    }
}

fn claim_from_wire(wire: WireClaims) -> Result<IdentityClaim, TokenError> {
    Ok(IdentityClaim {
        subject_id: UserId::new(wire.sub),
        identifier: wire.email,
        role_id: RoleId::new(wire.role_id),
        issued_at: timestamp(wire.iat)?,
        expires_at: timestamp(wire.exp)?,
    })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, TokenError> {
    Utc.timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| TokenError::Malformed(format!("timestamp out of range: {secs}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn codec() -> TokenCodec {
        TokenCodec::new(b"unit-test-signing-secret-at-least-32-bytes")
    }

    fn mint(codec: &TokenCodec, ttl: Duration) -> String {
        codec
            .mint(UserId::new(7), "alice@example.com", RoleId::new(2), ttl)
            .unwrap()
    }

    #[test]
    fn mint_then_verify_roundtrips() {
        let codec = codec();
        let token = mint(&codec, Duration::minutes(10));

        let claim = codec.verify(&token).unwrap();
        assert_eq!(claim.subject_id, UserId::new(7));
        assert_eq!(claim.identifier, "alice@example.com");
        assert_eq!(claim.role_id, RoleId::new(2));
        assert!(claim.expires_at > claim.issued_at);
    }

    #[test]
    fn expired_token_is_rejected() {
        let codec = codec();
        // Issued in the past relative to verification time.
        let token = mint(&codec, Duration::seconds(-60));
        assert_eq!(codec.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn wrong_secret_fails_signature() {
        let token = mint(&codec(), Duration::minutes(10));
        let other = TokenCodec::new(b"a-completely-different-signing-secret!!");
        assert_eq!(other.verify(&token), Err(TokenError::Signature));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            codec().verify("not.a.token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn payload_tamper_fails_signature_even_when_expired() {
        // Signature integrity must short-circuit the expiry check: an
        // expired token with a flipped payload byte reports Signature,
        // not Expired.
        let codec = codec();
        let token = mint(&codec, Duration::seconds(-60));

        let payload_start = token.find('.').unwrap() + 1;
        let mut bytes = token.into_bytes();
        bytes[payload_start] = if bytes[payload_start] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert_eq!(codec.verify(&tampered), Err(TokenError::Signature));
    }

    proptest! {
        #[test]
        fn any_single_byte_tamper_is_rejected(idx in 0usize..200) {
            let codec = codec();
            let token = mint(&codec, Duration::minutes(10));
            prop_assume!(idx < token.len());

            let mut bytes = token.clone().into_bytes();
            bytes[idx] = if bytes[idx] == b'x' { b'y' } else { b'x' };
            prop_assume!(bytes != token.as_bytes());

            let tampered = String::from_utf8(bytes).unwrap();
            prop_assert!(codec.verify(&tampered).is_err());
        }
    }
}
