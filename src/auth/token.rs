//! Session token issuance: HS256 JWTs signed with the application's secret.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Application, User};

/// Claims embedded in every session token.
///
/// The user's biometric reference sequences ride inside the token on
/// purpose: a downstream verifier holding the application secret can re-check
/// a keystroke sample without a store round trip. Anyone who can read an
/// unencrypted token can read the reference vectors — the token itself must
/// be treated as confidential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Issued-at (Unix timestamp).
    pub iat: i64,
    /// Expiration (Unix timestamp). Always `iat + ttl`.
    pub exp: i64,
    /// Subject user id.
    pub uid: i64,
    /// Subject email.
    pub email: String,
    /// Target application id.
    pub app_id: i64,
    /// Reference key-press durations.
    pub times: Vec<f32>,
    /// Reference inter-key intervals.
    pub intervals: Vec<f32>,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),
    #[error("token has expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Issue a signed session token bound to the identity and application.
///
/// # Errors
///
/// Signing failure is always an internal condition (bad secret material),
/// never a credentials problem.
pub fn issue(user: &User, app: &Application, ttl: Duration) -> Result<String, TokenError> {
    let now = Utc::now().timestamp();
    let claims = SessionClaims {
        iat: now,
        // An absurd TTL saturates to a far-future expiry rather than overflow.
        exp: now.saturating_add(i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)),
        uid: user.id,
        email: user.email.clone(),
        app_id: app.id,
        times: user.press_times.clone(),
        intervals: user.press_intervals.clone(),
    };

    let key = EncodingKey::from_secret(app.secret.expose_secret().as_bytes());
    jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &key).map_err(TokenError::Sign)
}

/// Decode and verify a session token with an application secret.
///
/// A token signed for application A fails verification against application
/// B's secret.
///
/// # Errors
///
/// Returns [`TokenError::Expired`] past `exp`, [`TokenError::Invalid`] for a
/// bad signature or malformed token.
pub fn decode(token: &str, secret: &str) -> Result<SessionClaims, TokenError> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_required_spec_claims(&["exp"]);

    jsonwebtoken::decode::<SessionClaims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid(err),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn test_user() -> User {
        User {
            id: 42,
            email: "alice@example.com".to_string(),
            pass_hash: String::new(),
            press_times: vec![0.1, 0.2, 0.3],
            press_intervals: vec![0.4, 0.5, 0.6],
            is_admin: false,
        }
    }

    fn test_app(secret: &str) -> Application {
        Application {
            id: 7,
            name: "test".to_string(),
            secret: SecretString::from(secret.to_string()),
        }
    }

    #[test]
    fn token_round_trips_with_correct_secret() -> Result<(), TokenError> {
        let user = test_user();
        let app = test_app("app-secret");

        let token = issue(&user, &app, Duration::from_secs(3600))?;
        let claims = decode(&token, "app-secret")?;

        assert_eq!(claims.uid, 42);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, 7);
        assert_eq!(claims.times, vec![0.1, 0.2, 0.3]);
        assert_eq!(claims.intervals, vec![0.4, 0.5, 0.6]);
        Ok(())
    }

    #[test]
    fn expiry_is_issuance_plus_ttl() -> Result<(), TokenError> {
        let token = issue(&test_user(), &test_app("s"), Duration::from_secs(86400))?;
        let claims = decode(&token, "s")?;
        assert_eq!(claims.exp - claims.iat, 86400);

        let delta = (Utc::now().timestamp() - claims.iat).abs();
        assert!(delta <= 1, "iat should be within 1s of now, was off by {delta}");
        Ok(())
    }

    #[test]
    fn huge_ttl_saturates_instead_of_overflowing() -> Result<(), TokenError> {
        let token = issue(&test_user(), &test_app("s"), Duration::from_secs(u64::MAX))?;
        let claims = decode(&token, "s")?;
        assert_eq!(claims.exp, i64::MAX);
        Ok(())
    }

    #[test]
    fn wrong_application_secret_is_rejected() -> Result<(), TokenError> {
        let token = issue(&test_user(), &test_app("secret-a"), Duration::from_secs(3600))?;
        let result = decode(&token, "secret-b");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
        Ok(())
    }

    #[test]
    fn garbage_token_is_invalid() {
        let result = decode("not.a.token", "secret");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }
}
