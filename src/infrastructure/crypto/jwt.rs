//! Session token (JWT) handling

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::domain::TokenError;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token lifetime in days
    pub expiration_days: i64,
    /// Issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            expiration_days: std::env::var("JWT_EXPIRATION_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(90),
            issuer: "tours-service".to_string(),
        }
    }
}

/// JWT claims. Only the subject identity is trusted from the token;
/// role and account state are always reloaded from storage by the
/// access-control middleware.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    pub fn new(user_id: &str, config: &JwtConfig) -> Self {
        let now = Utc::now();
        let exp = now + Duration::days(config.expiration_days);

        Self {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: config.issuer.clone(),
        }
    }
}

/// Create a signed session token for a user
pub fn create_token(user_id: &str, config: &JwtConfig) -> Result<String, TokenError> {
    let claims = Claims::new(user_id, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|_| TokenError::Malformed)
}

/// Verify and decode a session token.
///
/// The signature is checked before any claim is read; client-supplied
/// claims are never trusted on their own.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature => TokenError::SignatureInvalid,
        _ => TokenError::Malformed,
    })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "unit-test-secret".to_string(),
            expiration_days: 90,
            issuer: "tours-service".to_string(),
        }
    }

    #[test]
    fn test_create_and_verify_token() {
        let config = test_config();
        let token = create_token("user-123", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.iss, "tours-service");
    }

    #[test]
    fn test_garbage_token_is_malformed() {
        let config = test_config();
        assert_eq!(
            verify_token("not-a-token", &config),
            Err(TokenError::Malformed)
        );
    }

    #[test]
    fn test_tampered_token_fails_signature_check() {
        let config = test_config();
        let token = create_token("user-123", &config).unwrap();

        // Flip a character in the signature segment
        let mut bytes: Vec<char> = token.chars().collect();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == 'A' { 'B' } else { 'A' };
        let tampered: String = bytes.into_iter().collect();

        assert!(verify_token(&tampered, &config).is_err());
    }

    #[test]
    fn test_wrong_secret_is_signature_invalid() {
        let config = test_config();
        let token = create_token("user-123", &config).unwrap();

        let other = JwtConfig {
            secret: "a-different-secret".to_string(),
            ..test_config()
        };
        assert_eq!(
            verify_token(&token, &other),
            Err(TokenError::SignatureInvalid)
        );
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = JwtConfig {
            expiration_days: -1,
            ..test_config()
        };
        let token = create_token("user-123", &config).unwrap();
        assert_eq!(verify_token(&token, &config), Err(TokenError::Expired));
    }
}
