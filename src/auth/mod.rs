//! Authentication orchestration: credential verification, keystroke-dynamics
//! verification, and session token issuance.
//!
//! The service holds no mutable state. Its collaborators (store handle,
//! matcher thresholds, token TTL) are injected once and read-only, so any
//! number of requests can run through it concurrently without locking.

pub mod biometrics;
pub mod error;
pub mod password;
pub mod token;

use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::domain::BiometricSample;
use crate::storage::{AppStore, NewUser, StoreError, UserStore};

pub use biometrics::{BiometricMatcher, BiometricMismatch};
pub use error::AuthError;

pub struct AuthService<S> {
    store: S,
    matcher: BiometricMatcher,
    token_ttl: Duration,
}

impl<S> AuthService<S>
where
    S: UserStore + AppStore,
{
    pub fn new(store: S, matcher: BiometricMatcher, token_ttl: Duration) -> Self {
        Self {
            store,
            matcher,
            token_ttl,
        }
    }

    /// Authenticate a user and issue a session token bound to the target
    /// application.
    ///
    /// The pipeline is strictly ordered and short-circuits on the first
    /// failure: identity lookup, password check, biometric check, application
    /// lookup, token issuance.
    ///
    /// # Errors
    ///
    /// An unknown email and a wrong password both return
    /// [`AuthError::InvalidCredentials`]; a behavioral mismatch returns
    /// [`AuthError::InvalidBiometrics`]; an unknown application returns
    /// [`AuthError::InvalidAppId`]. Store and signing failures are wrapped as
    /// [`AuthError::Internal`].
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        sample: &BiometricSample,
        app_id: i64,
    ) -> Result<String, AuthError> {
        let user = match self.store.find_by_email(email).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // Collapsed into invalid credentials to prevent enumeration.
                warn!(op = "auth.login", email, "user not found");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!(op = "auth.login", error = %err, "failed to look up user");
                return Err(AuthError::Internal(err.into()));
            }
        };

        // Hard gate: a password mismatch terminates the flow here. The
        // biometric stage must never run for a caller who failed the
        // password check.
        match password::verify_password(&user.pass_hash, password) {
            Ok(true) => {}
            Ok(false) => {
                warn!(op = "auth.login", email, "invalid credentials");
                return Err(AuthError::InvalidCredentials);
            }
            Err(err) => {
                error!(op = "auth.login", error = %err, "password verification failed");
                return Err(AuthError::Internal(err.into()));
            }
        }

        if let Err(reason) = self.matcher.matches(
            &user.press_times,
            &user.press_intervals,
            &sample.press_times,
            &sample.press_intervals,
        ) {
            warn!(op = "auth.login", email, reason = ?reason, "invalid biometrics");
            return Err(AuthError::InvalidBiometrics(reason));
        }

        let app = match self.store.find_app(app_id).await {
            Ok(app) => app,
            Err(StoreError::NotFound) => {
                warn!(op = "auth.login", app_id, "application not found");
                return Err(AuthError::InvalidAppId);
            }
            Err(err) => {
                error!(op = "auth.login", error = %err, "failed to look up application");
                return Err(AuthError::Internal(err.into()));
            }
        };

        let signed = token::issue(&user, &app, self.token_ttl).map_err(|err| {
            error!(op = "auth.login", error = %err, "failed to create token");
            AuthError::Internal(err.into())
        })?;

        info!(op = "auth.login", user_id = user.id, app_id = app.id, "user logged in");

        Ok(signed)
    }

    /// Register a new identity. The submitted samples become the immutable
    /// biometric reference for all future logins.
    ///
    /// # Errors
    ///
    /// A duplicate email returns [`AuthError::UserAlreadyExists`]; hashing or
    /// store failures are wrapped as [`AuthError::Internal`].
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        sample: &BiometricSample,
    ) -> Result<i64, AuthError> {
        let pass_hash = password::hash_password(password).map_err(|err| {
            error!(op = "auth.register", error = %err, "failed to hash password");
            AuthError::Internal(err.into())
        })?;

        let new_user = NewUser {
            email,
            pass_hash: &pass_hash,
            press_times: &sample.press_times,
            press_intervals: &sample.press_intervals,
        };

        let user_id = match self.store.create(new_user).await {
            Ok(id) => id,
            Err(StoreError::Duplicate) => {
                warn!(op = "auth.register", email, "user already exists");
                return Err(AuthError::UserAlreadyExists);
            }
            Err(err) => {
                error!(op = "auth.register", error = %err, "failed to save user");
                return Err(AuthError::Internal(err.into()));
            }
        };

        info!(op = "auth.register", user_id, "user registered");

        Ok(user_id)
    }

    /// Check the administrator flag for an identity.
    ///
    /// # Errors
    ///
    /// A missing identity is [`AuthError::UserNotFound`], reported distinctly
    /// from `Ok(false)`.
    pub async fn is_admin(&self, user_id: i64) -> Result<bool, AuthError> {
        match self.store.is_admin(user_id).await {
            Ok(is_admin) => {
                debug!(op = "auth.is_admin", user_id, is_admin, "checked admin flag");
                Ok(is_admin)
            }
            Err(StoreError::NotFound) => {
                warn!(op = "auth.is_admin", user_id, "user not found");
                Err(AuthError::UserNotFound)
            }
            Err(err) => {
                error!(op = "auth.is_admin", error = %err, "failed to check admin flag");
                Err(AuthError::Internal(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Application, User};
    use anyhow::Result;
    use secrecy::SecretString;
    use std::collections::HashMap;
    use std::sync::Mutex;

    const APP_ID: i64 = 1;
    const APP_SECRET: &str = "test-secret";

    /// In-memory store standing in for `PostgreSQL` in orchestrator tests.
    struct MemStore {
        users: Mutex<Vec<User>>,
        apps: HashMap<i64, Application>,
    }

    impl MemStore {
        fn new() -> Self {
            let mut apps = HashMap::new();
            apps.insert(
                APP_ID,
                Application {
                    id: APP_ID,
                    name: "test".to_string(),
                    secret: SecretString::from(APP_SECRET),
                },
            );
            Self {
                users: Mutex::new(Vec::new()),
                apps,
            }
        }
    }

    impl UserStore for MemStore {
        async fn find_by_email(&self, email: &str) -> Result<User, StoreError> {
            let users = self.users.lock().map_err(|_| StoreError::Backend(anyhow::anyhow!("poisoned")))?;
            users
                .iter()
                .find(|user| user.email == email)
                .cloned()
                .ok_or(StoreError::NotFound)
        }

        async fn create(&self, user: NewUser<'_>) -> Result<i64, StoreError> {
            let mut users = self.users.lock().map_err(|_| StoreError::Backend(anyhow::anyhow!("poisoned")))?;
            if users.iter().any(|existing| existing.email == user.email) {
                return Err(StoreError::Duplicate);
            }
            let id = i64::try_from(users.len()).map_err(|err| StoreError::Backend(err.into()))? + 1;
            users.push(User {
                id,
                email: user.email.to_string(),
                pass_hash: user.pass_hash.to_string(),
                press_times: user.press_times.to_vec(),
                press_intervals: user.press_intervals.to_vec(),
                is_admin: false,
            });
            Ok(id)
        }

        async fn is_admin(&self, user_id: i64) -> Result<bool, StoreError> {
            let users = self.users.lock().map_err(|_| StoreError::Backend(anyhow::anyhow!("poisoned")))?;
            users
                .iter()
                .find(|user| user.id == user_id)
                .map(|user| user.is_admin)
                .ok_or(StoreError::NotFound)
        }
    }

    impl AppStore for MemStore {
        async fn find_app(&self, app_id: i64) -> Result<Application, StoreError> {
            self.apps.get(&app_id).cloned().ok_or(StoreError::NotFound)
        }
    }

    fn service() -> AuthService<MemStore> {
        AuthService::new(
            MemStore::new(),
            BiometricMatcher::new(0.5, 1.5),
            Duration::from_secs(3600),
        )
    }

    fn sample() -> BiometricSample {
        BiometricSample {
            press_times: vec![0.11, 0.22, 0.33, 0.44],
            press_intervals: vec![0.55, 0.66, 0.77, 0.88],
        }
    }

    /// A sample whose deltas all land inside the divergence band.
    fn divergent_sample() -> BiometricSample {
        let base = sample();
        BiometricSample {
            press_times: base.press_times.iter().map(|t| t + 1.0).collect(),
            press_intervals: base.press_intervals.iter().map(|t| t + 1.0).collect(),
        }
    }

    #[tokio::test]
    async fn register_then_login_issues_decodable_token() -> Result<()> {
        let auth = service();
        let user_id = auth.register("alice@example.com", "hunter2", &sample()).await?;

        let signed = auth
            .login("alice@example.com", "hunter2", &sample(), APP_ID)
            .await?;
        let claims = token::decode(&signed, APP_SECRET)?;

        assert_eq!(claims.uid, user_id);
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.app_id, APP_ID);
        assert_eq!(claims.times, sample().press_times);
        assert_eq!(claims.intervals, sample().press_intervals);
        assert_eq!(claims.exp - claims.iat, 3600);
        Ok(())
    }

    #[tokio::test]
    async fn token_is_bound_to_the_application_secret() -> Result<()> {
        let auth = service();
        auth.register("alice@example.com", "hunter2", &sample()).await?;
        let signed = auth
            .login("alice@example.com", "hunter2", &sample(), APP_ID)
            .await?;

        assert!(token::decode(&signed, "another-app-secret").is_err());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials_not_user_not_found() {
        let auth = service();
        let result = auth
            .login("nobody@example.com", "hunter2", &sample(), APP_ID)
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn wrong_password_gates_before_biometrics() -> Result<()> {
        let auth = service();
        auth.register("alice@example.com", "hunter2", &sample()).await?;

        // Matching biometrics must not rescue a failed password check.
        let result = auth
            .login("alice@example.com", "wrong", &sample(), APP_ID)
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn mismatched_biometrics_rejected() -> Result<()> {
        let auth = service();
        auth.register("alice@example.com", "hunter2", &sample()).await?;

        let result = auth
            .login("alice@example.com", "hunter2", &divergent_sample(), APP_ID)
            .await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidBiometrics(BiometricMismatch::Interval))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn press_only_mismatch_reports_press() -> Result<()> {
        let auth = service();
        auth.register("alice@example.com", "hunter2", &sample()).await?;

        let input = BiometricSample {
            press_times: divergent_sample().press_times,
            press_intervals: sample().press_intervals,
        };
        let result = auth.login("alice@example.com", "hunter2", &input, APP_ID).await;
        assert!(matches!(
            result,
            Err(AuthError::InvalidBiometrics(BiometricMismatch::Press))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn unknown_application_rejected() -> Result<()> {
        let auth = service();
        auth.register("alice@example.com", "hunter2", &sample()).await?;

        let result = auth.login("alice@example.com", "hunter2", &sample(), 999).await;
        assert!(matches!(result, Err(AuthError::InvalidAppId)));
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts_and_keeps_first_identity() -> Result<()> {
        let auth = service();
        let first = auth.register("alice@example.com", "hunter2", &sample()).await?;

        let second = auth.register("alice@example.com", "other", &sample()).await;
        assert!(matches!(second, Err(AuthError::UserAlreadyExists)));

        // First registration still logs in with its original credentials.
        let signed = auth
            .login("alice@example.com", "hunter2", &sample(), APP_ID)
            .await?;
        let claims = token::decode(&signed, APP_SECRET)?;
        assert_eq!(claims.uid, first);
        Ok(())
    }

    #[tokio::test]
    async fn email_lookup_is_case_sensitive() -> Result<()> {
        let auth = service();
        auth.register("Alice@example.com", "hunter2", &sample()).await?;

        let result = auth
            .login("alice@example.com", "hunter2", &sample(), APP_ID)
            .await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
        Ok(())
    }

    #[tokio::test]
    async fn is_admin_reports_missing_user_distinctly() -> Result<()> {
        let auth = service();
        let user_id = auth.register("alice@example.com", "hunter2", &sample()).await?;

        assert!(!auth.is_admin(user_id).await?);
        assert!(matches!(auth.is_admin(999).await, Err(AuthError::UserNotFound)));
        Ok(())
    }
}
