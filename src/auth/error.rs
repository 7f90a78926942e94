//! Authentication error taxonomy.
//!
//! Callers only ever see these variants; storage and signing failures are
//! wrapped as [`AuthError::Internal`] at the orchestrator boundary and never
//! leak backend detail, stack traces, or key material.

use thiserror::Error;

use super::biometrics::BiometricMismatch;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong email or wrong password — intentionally indistinguishable to
    /// prevent user enumeration.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Behavioral mismatch. The component reason is internal diagnostics; the
    /// display form stays generic.
    #[error("invalid biometrics")]
    InvalidBiometrics(BiometricMismatch),

    #[error("invalid app")]
    InvalidAppId,

    #[error("user already exists")]
    UserAlreadyExists,

    /// Only reported on the admin-flag path, where enumeration protection
    /// does not apply.
    #[error("user not found")]
    UserNotFound,

    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_never_leaks_internal_detail() {
        let err = AuthError::Internal(anyhow::anyhow!("pg: connection refused to 10.0.0.5"));
        assert_eq!(err.to_string(), "internal error");
    }

    #[test]
    fn biometric_reason_is_not_in_display() {
        let err = AuthError::InvalidBiometrics(BiometricMismatch::Interval);
        assert_eq!(err.to_string(), "invalid biometrics");
    }
}
