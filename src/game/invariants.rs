//! Roster invariants - sanity checks that detect bugs.
//!
//! In a correctly implemented game these never trigger: the command and
//! battle paths maintain them. If one fires, it indicates a bug, not a
//! gameplay limit being hit.

use std::fmt;

use crate::game::General;

/// Sanity bound: experience per soldier should never exceed this.
/// Promotion resets experience to 1, so only a terminal-rank soldier
/// accumulates at all, one point per battle won or training bout. A
/// million is far beyond any plausible campaign.
pub const SANITY_MAX_EXPERIENCE: u32 = 1_000_000;

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all invariants of a general's state.
///
/// Returns a list of violations found, or empty if all invariants hold.
/// These are bug detectors, not gameplay limits.
#[must_use]
pub fn check_invariants(general: &General) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for (index, soldier) in general.army().iter().enumerate() {
        // Dead soldiers are buried before the battle resolver returns.
        if !soldier.is_alive() {
            violations.push(InvariantViolation {
                message: format!("{soldier} at roster index {index} is dead but still enrolled"),
            });
        }

        // Crossing the threshold promotes immediately, so a non-terminal
        // soldier can never be observed at or past it.
        if soldier.rank().successor().is_some()
            && soldier.experience() >= soldier.rank().promotion_threshold()
        {
            violations.push(InvariantViolation {
                message: format!(
                    "{soldier} at roster index {index} sits at or past its promotion threshold {}",
                    soldier.rank().promotion_threshold()
                ),
            });
        }

        if soldier.experience() > SANITY_MAX_EXPERIENCE {
            violations.push(InvariantViolation {
                message: format!(
                    "{soldier} at roster index {index} exceeds sanity max experience {SANITY_MAX_EXPERIENCE}"
                ),
            });
        }
    }

    violations
}

/// Assert all invariants hold for a general, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with a detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(general: &General) {
    let violations = check_invariants(general);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!(
            "Invariant violations for {general}:\n  - {}",
            messages.join("\n  - ")
        );
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_general: &General) {}
