//! # Cadence (Keystroke-Dynamics SSO)
//!
//! `cadence` is a single sign-on service that authenticates users with three
//! independent signals before minting a session token:
//!
//! 1. **Password** — Argon2id hash comparison.
//! 2. **Identity** — per-application lookup; tokens are signed with the
//!    target application's secret, so a token minted for one application is
//!    useless against any other.
//! 3. **Keystroke dynamics** — a behavioral check comparing the key-press
//!    durations and inter-key intervals submitted with the login against the
//!    immutable reference sample captured at registration.
//!
//! ## Biometric matching
//!
//! The matcher is a fixed statistical heuristic, not a trainable model: a
//! per-index delta is *divergent* when it falls strictly inside a configured
//! band, and a component passes only when fewer than half of the reference
//! indices diverge. See [`auth::biometrics`] for the exact policy.
//!
//! ## Enumeration protection
//!
//! Login failures collapse to `invalid credentials` whether the email is
//! unknown or the password is wrong. Only the admin-flag lookup reports
//! `user not found` distinctly, since that path is not enumeration-sensitive.
//!
//! ## Database
//!
//! `PostgreSQL` via `sqlx`. Bootstrap SQL lives under `db/sql/`; the service
//! never creates or mutates application rows (provisioning is external).

pub mod api;
pub mod auth;
pub mod cli;
pub mod domain;
pub mod storage;
