//! Domain model: identities, applications, and biometric samples.

use secrecy::SecretString;

/// A registered user account.
///
/// The reference biometric samples are captured once at registration and are
/// never updated afterwards. If a user's typing behavior drifts over time,
/// false rejections will increase; compensating for drift would require a
/// security review and is intentionally not done here.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    /// Lookup key. Case-sensitive: `Alice@example.com` and
    /// `alice@example.com` are distinct identities.
    pub email: String,
    /// Argon2id hash in PHC string format.
    pub pass_hash: String,
    /// Reference key-press durations.
    pub press_times: Vec<f32>,
    /// Reference inter-key intervals.
    pub press_intervals: Vec<f32>,
    pub is_admin: bool,
}

/// A client application (tenant) of the SSO service.
///
/// The signing secret is confidential: it is never logged and never returned
/// to callers. Application rows are provisioned externally; this service only
/// reads them.
#[derive(Debug, Clone)]
pub struct Application {
    pub id: i64,
    pub name: String,
    pub secret: SecretString,
}

/// Paired keystroke-timing sequences submitted with every login and
/// registration attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BiometricSample {
    pub press_times: Vec<f32>,
    pub press_intervals: Vec<f32>,
}
