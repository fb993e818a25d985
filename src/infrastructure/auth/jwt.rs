//! JWT encoding and verification with a rotating set of HMAC secrets

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use std::fmt::Debug;
use tracing::debug;

use crate::domain::token::{AuthError, TokenClaims};
use crate::domain::DomainError;

struct SigningKey {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

/// HS256 token codec
///
/// Holds the accepted secrets newest first. Tokens are always signed with the
/// newest secret; verification tries each secret in order so tokens signed
/// before a rotation stay valid while their secret is retained.
#[derive(Clone)]
pub struct JwtCodec {
    keys: std::sync::Arc<Vec<SigningKey>>,
    validation: Validation,
}

impl Debug for JwtCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtCodec")
            .field("key_count", &self.keys.len())
            .field("keys", &"[hidden]")
            .finish()
    }
}

impl JwtCodec {
    /// Create a codec from secrets ordered newest first
    pub fn new<S: AsRef<[u8]>>(secrets: &[S]) -> Result<Self, DomainError> {
        if secrets.is_empty() {
            return Err(DomainError::configuration(
                "At least one signing secret is required",
            ));
        }

        let keys = secrets
            .iter()
            .map(|secret| {
                let secret = secret.as_ref();
                if secret.is_empty() {
                    return Err(DomainError::configuration("Signing secrets cannot be empty"));
                }

                Ok(SigningKey {
                    encoding_key: EncodingKey::from_secret(secret),
                    decoding_key: DecodingKey::from_secret(secret),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Expiry is checked by the caller against an injected clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            keys: std::sync::Arc::new(keys),
            validation,
        })
    }

    /// Number of secrets accepted for verification
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Sign claims with the newest secret
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, AuthError> {
        let key = &self.keys[0];

        encode(&Header::new(Algorithm::HS256), claims, &key.encoding_key)
            .map_err(|e| AuthError::internal(format!("Failed to encode token: {}", e)))
    }

    /// Verify the signature and decode the claims; expiry is not checked here
    pub fn decode(&self, token: &str) -> Result<TokenClaims, AuthError> {
        for key in self.keys.iter() {
            match decode::<TokenClaims>(token, &key.decoding_key, &self.validation) {
                Ok(data) => return Ok(data.claims),
                Err(e) if matches!(e.kind(), ErrorKind::InvalidSignature) => continue,
                Err(e) => {
                    debug!(reason = ?e.kind(), "Rejecting malformed token");
                    return Err(AuthError::InvalidSignature);
                }
            }
        }

        debug!("Token signature matched none of the accepted secrets");
        Err(AuthError::InvalidSignature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::identity::Role;
    use crate::domain::token::TokenKind;
    use chrono::{Duration, Utc};

    fn claims(kind: TokenKind) -> TokenClaims {
        TokenClaims::new("john", Role::User, kind, Utc::now(), Duration::minutes(30)).unwrap()
    }

    fn codec(secrets: &[&str]) -> JwtCodec {
        JwtCodec::new(secrets).unwrap()
    }

    #[test]
    fn test_encode_and_decode() {
        let codec = codec(&["test-secret-key-12345"]);
        let original = claims(TokenKind::Access);

        let token = codec.encode(&original).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded = codec.decode(&token).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_invalid_token() {
        let codec = codec(&["secret"]);

        assert_eq!(codec.decode("invalid-token"), Err(AuthError::InvalidSignature));
        assert_eq!(codec.decode(""), Err(AuthError::InvalidSignature));
        assert_eq!(codec.decode("a.b.c"), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_wrong_secret() {
        let signer = codec(&["secret-1"]);
        let verifier = codec(&["secret-2"]);

        let token = signer.encode(&claims(TokenKind::Access)).unwrap();

        assert_eq!(verifier.decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_retired_secret_still_verifies() {
        let before_rotation = codec(&["old-secret"]);
        let after_rotation = codec(&["new-secret", "old-secret"]);

        let old_token = before_rotation.encode(&claims(TokenKind::Refresh)).unwrap();
        assert!(after_rotation.decode(&old_token).is_ok());

        // New tokens are signed with the newest secret only
        let new_token = after_rotation.encode(&claims(TokenKind::Access)).unwrap();
        assert_eq!(before_rotation.decode(&new_token), Err(AuthError::InvalidSignature));
        assert!(codec(&["new-secret"]).decode(&new_token).is_ok());
    }

    #[test]
    fn test_expired_claims_still_decode() {
        let codec = codec(&["secret"]);
        let past = Utc::now() - Duration::days(2);
        let expired =
            TokenClaims::new("john", Role::User, TokenKind::Access, past, Duration::hours(1))
                .unwrap();

        let token = codec.encode(&expired).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert!(decoded.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let codec = codec(&["secret"]);
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims(TokenKind::Access),
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(codec.decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_missing_fields_rejected() {
        #[derive(serde::Serialize)]
        struct Partial {
            sub: String,
            exp: i64,
        }

        let codec = codec(&["secret"]);
        let token = encode(
            &Header::new(Algorithm::HS256),
            &Partial {
                sub: "john".to_string(),
                exp: Utc::now().timestamp() + 60,
            },
            &EncodingKey::from_secret(b"secret"),
        )
        .unwrap();

        assert_eq!(codec.decode(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_requires_a_secret() {
        let empty: [&str; 0] = [];
        assert!(JwtCodec::new(&empty).is_err());
        assert!(JwtCodec::new(&[""]).is_err());
    }

    #[test]
    fn test_debug_hides_keys() {
        let output = format!("{:?}", codec(&["super-secret-value"]));
        assert!(!output.contains("super-secret-value"));
    }
}
