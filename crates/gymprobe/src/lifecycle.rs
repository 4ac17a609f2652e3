//! Workout lifecycle as observed through the UI.
//!
//! ```text
//! NotStarted ──start──▶ Active{0} ──add──▶ Active{n+1} ──complete──▶ Completed
//! ```
//!
//! Completed is terminal. Every transition not drawn above is an error.

use serde::Serialize;

use crate::result::{GymError, GymResult};

/// Where the workout under test is in its life
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WorkoutLifecycle {
    /// No workout started in this page object yet
    #[default]
    NotStarted,
    /// Workout screen is open
    Active {
        /// Exercises attached so far
        exercise_count: usize,
    },
    /// Confirmed complete
    Completed,
}

impl WorkoutLifecycle {
    /// `NotStarted → Active { 0 }`
    ///
    /// # Errors
    ///
    /// [`GymError::InvalidState`] from any other state
    pub fn start(self) -> GymResult<Self> {
        match self {
            Self::NotStarted => Ok(Self::Active { exercise_count: 0 }),
            other => Err(other.illegal("start")),
        }
    }

    /// `Active { n } → Active { n + 1 }`
    ///
    /// # Errors
    ///
    /// [`GymError::InvalidState`] unless active
    pub fn exercise_added(self) -> GymResult<Self> {
        match self {
            Self::Active { exercise_count } => Ok(Self::Active {
                exercise_count: exercise_count + 1,
            }),
            other => Err(other.illegal("add an exercise")),
        }
    }

    /// `Active { _ } → Completed`
    ///
    /// # Errors
    ///
    /// [`GymError::InvalidState`] unless active
    pub fn complete(self) -> GymResult<Self> {
        match self {
            Self::Active { .. } => Ok(Self::Completed),
            other => Err(other.illegal("complete")),
        }
    }

    /// Guard for operations that need an open workout
    ///
    /// # Errors
    ///
    /// [`GymError::InvalidState`] unless active
    pub fn require_active(self, action: &str) -> GymResult<()> {
        if self.is_active() {
            Ok(())
        } else {
            Err(self.illegal(action))
        }
    }

    /// Workout screen is open
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }

    /// Workout was confirmed complete
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Exercises attached (zero unless active)
    #[must_use]
    pub const fn exercise_count(&self) -> usize {
        match self {
            Self::Active { exercise_count } => *exercise_count,
            Self::NotStarted | Self::Completed => 0,
        }
    }

    fn illegal(self, action: &str) -> GymError {
        GymError::invalid_state(format!("cannot {action} a workout that is {self}"))
    }
}

impl std::fmt::Display for WorkoutLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Active { exercise_count } => {
                write!(f, "active with {exercise_count} exercise(s)")
            }
            Self::Completed => f.write_str("completed"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let state = WorkoutLifecycle::default()
            .start()
            .unwrap()
            .exercise_added()
            .unwrap()
            .exercise_added()
            .unwrap();
        assert_eq!(state, WorkoutLifecycle::Active { exercise_count: 2 });
        assert_eq!(state.exercise_count(), 2);
        let done = state.complete().unwrap();
        assert!(done.is_completed());
        assert_eq!(done.exercise_count(), 0);
    }

    #[test]
    fn test_complete_empty_workout() {
        let done = WorkoutLifecycle::NotStarted.start().unwrap().complete().unwrap();
        assert_eq!(done, WorkoutLifecycle::Completed);
    }

    #[test]
    fn test_completed_is_terminal() {
        let done = WorkoutLifecycle::Completed;
        assert!(done.start().is_err());
        assert!(done.exercise_added().is_err());
        assert!(done.complete().is_err());
    }

    #[test]
    fn test_cannot_act_before_start() {
        let err = WorkoutLifecycle::NotStarted.complete().unwrap_err();
        assert!(err.to_string().contains("not started"));
        assert!(WorkoutLifecycle::NotStarted.exercise_added().is_err());
        assert!(WorkoutLifecycle::NotStarted.require_active("open the exercise picker").is_err());
    }

    #[test]
    fn test_cannot_restart_active() {
        let active = WorkoutLifecycle::NotStarted.start().unwrap();
        assert!(active.start().is_err());
        assert!(active.require_active("add").is_ok());
    }
}
