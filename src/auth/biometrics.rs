//! Keystroke-dynamics matching.
//!
//! The matcher compares a freshly submitted timing sample against the user's
//! stored reference sample. It is a pure function of its inputs and the
//! configured thresholds: no I/O, no shared mutable state, safe to call from
//! any number of concurrent requests.
//!
//! ## Divergence band
//!
//! For each index `i` the delta `|input[i] - reference[i]|` counts as
//! *divergent* only when it falls strictly inside the `(lower, upper)` band.
//! A near-zero delta is the user typing as usual; a very large delta is
//! treated as a timing artifact (device lag, sampling glitch) rather than a
//! different typist. Small-to-moderate deviations are the signal that counts
//! against a match.
//!
//! ## Majority rule
//!
//! A component (presses or intervals) passes only when fewer than half of
//! the reference indices diverge: `divergent_count * 2 < reference_len`.
//! Both components must pass for an overall match.

/// Which component of the sample failed the match. Internal diagnostic only;
/// callers see a single `invalid biometrics` failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiometricMismatch {
    Press,
    Interval,
}

/// Stateless matcher with read-only thresholds injected at construction.
#[derive(Debug, Clone, Copy)]
pub struct BiometricMatcher {
    lower_threshold: f64,
    upper_threshold: f64,
}

impl BiometricMatcher {
    #[must_use]
    pub fn new(lower_threshold: f64, upper_threshold: f64) -> Self {
        Self {
            lower_threshold,
            upper_threshold,
        }
    }

    /// Compare submitted press/interval sequences against the reference.
    ///
    /// Comparison is position-indexed over the overlapping index range, so a
    /// length mismatch between input and reference never indexes out of
    /// bounds. An empty input or reference sequence rejects outright: the
    /// transport boundary already refuses empty samples, but the matcher must
    /// not fail open if reached directly.
    ///
    /// # Errors
    ///
    /// Returns the failing component; when both components fail, the interval
    /// failure takes precedence in reporting.
    pub fn matches(
        &self,
        reference_presses: &[f32],
        reference_intervals: &[f32],
        input_presses: &[f32],
        input_intervals: &[f32],
    ) -> Result<(), BiometricMismatch> {
        let presses_ok = self.component_matches(reference_presses, input_presses);
        let intervals_ok = self.component_matches(reference_intervals, input_intervals);

        if !intervals_ok {
            return Err(BiometricMismatch::Interval);
        }
        if !presses_ok {
            return Err(BiometricMismatch::Press);
        }
        Ok(())
    }

    fn component_matches(&self, reference: &[f32], input: &[f32]) -> bool {
        if reference.is_empty() || input.is_empty() {
            return false;
        }

        let overlap = reference.len().min(input.len());
        let divergent = (0..overlap)
            .filter(|&i| self.is_divergent(f64::from(input[i]), f64::from(reference[i])))
            .count();

        // Majority rule against the reference length, not the overlap.
        divergent * 2 < reference.len()
    }

    fn is_divergent(&self, input: f64, reference: f64) -> bool {
        let delta = (input - reference).abs();
        delta > self.lower_threshold && delta < self.upper_threshold
    }
}
