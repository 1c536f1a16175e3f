//! Default prompt cadence.
//!
//! The policy prompts when the cumulative positive-event count is greater
//! than five and its base-3 logarithm, rounded to four decimal places, is a
//! whole number.  Prompts therefore land on (or within rounding distance of)
//! powers of three: 9, 27, 81, 243, ...  The gap between prompts triples each
//! time, so a user who keeps choosing "Maybe Later" is asked less and less.
//!
//! The four-decimal rounding is part of the policy.  For large counts it
//! widens each prompt point into a short run: every count in `59046..=59052`
//! rounds to `log3 = 10.0000` and qualifies.

/// Number of decimal places `log3(count)` is rounded to before the integer test.
const LOG3_DECIMALS: i32 = 4;

/// Counts at or below this value never prompt.
const MIN_EXCLUSIVE_COUNT: u64 = 5;

/// Returns `true` when `count` is a prompt point under the default cadence.
///
/// ```
/// use rating_core::default_timing_function;
///
/// assert!(!default_timing_function(5));
/// assert!(default_timing_function(9));
/// assert!(!default_timing_function(10));
/// assert!(default_timing_function(27));
/// ```
pub fn default_timing_function(count: u64) -> bool {
    if count <= MIN_EXCLUSIVE_COUNT {
        return false;
    }

    // Round at the fixed decimal scale and test divisibility there, so the
    // comparison never goes through a lossy divide-back.
    let scale = 10f64.powi(LOG3_DECIMALS);
    let scaled = ((count as f64).ln() / 3f64.ln() * scale).round();
    scaled % scale == 0.0
}

// ── Tests ─────────────────────────────────────────────────────────────────────
