//! Error types for layout state transitions using `thiserror`.
//!
//! Both precondition failures are programmer-contract violations surfaced as
//! errors and never recovered internally: callers are expected to register a
//! view before switching to its state, and to structure the container with
//! exactly one inline child plus any already-registered state views before
//! content-state initialization runs.

use thiserror::Error;

use crate::layout::state_id::StateId;

/// Layout state errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StateError {
    /// A state transition referenced a state with no registered view.
    #[error("cannot switch to state \"{state}\": no view was registered for this state")]
    UnknownState { state: StateId },
    /// The container did not hold exactly one inline content child plus the
    /// already-registered state views at content-state initialization.
    #[error(
        "invalid child count: the layout must hold exactly one inline content child \
         plus its registered state views (expected {expected} children, found {actual})"
    )]
    InvalidChildCount { expected: usize, actual: usize },
    /// The instance store held no saved layout state to restore.
    #[error("no saved layout state in the instance store")]
    NoSavedState,
}

#[cfg(test)]
mod tests {
    use crate::{error::StateError, layout::state_id::StateId};

    #[test]
    fn test_unknown_state_names_the_state() {
        let error = StateError::UnknownState {
            state: StateId::named("loading"),
        };
        assert_eq!(
            error.to_string(),
            "cannot switch to state \"loading\": no view was registered for this state"
        );
    }

    #[test]
    fn test_invalid_child_count_reports_both_counts() {
        let error = StateError::InvalidChildCount {
            expected: 3,
            actual: 5,
        };
        let message = error.to_string();
        assert!(message.contains("expected 3 children"));
        assert!(message.contains("found 5"));
    }
}
