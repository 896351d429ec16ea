//! State machine trait for lifecycle enums.
//!
//! Gives wizard phases and transition stages one shared vocabulary for
//! checking and performing transitions.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// Implementors define the legal edges; checked transitions and
/// terminal detection come for free.
///
/// # Example
///
/// ```ignore
/// impl StateMachine for WizardPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         matches!((self, target), (Welcome, Question { .. }) | (Review, Celebration))
///     }
///
///     fn is_terminal(&self) -> bool {
///         matches!(self, Completed)
///     }
/// }
///
/// let phase = current.transition_to(WizardPhase::Review)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns true if no transition leaves this state.
    fn is_terminal(&self) -> bool;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Door {
        Closed,
        Open,
        Locked,
        Removed,
    }

    impl StateMachine for Door {
        fn can_transition_to(&self, target: &Self) -> bool {
            use Door::*;
            matches!(
                (self, target),
                (Closed, Open) | (Open, Closed) | (Closed, Locked) | (Locked, Closed) | (_, Removed)
            ) && *self != Removed
        }

        fn is_terminal(&self) -> bool {
            matches!(self, Door::Removed)
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Door::Closed.transition_to(Door::Open), Ok(Door::Open));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Door::Open.transition_to(Door::Locked).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Open to Locked"));
    }

    #[test]
    fn terminal_state_rejects_everything() {
        assert!(Door::Removed.is_terminal());
        assert!(Door::Removed.transition_to(Door::Closed).is_err());
        assert!(Door::Removed.transition_to(Door::Removed).is_err());
    }
}
