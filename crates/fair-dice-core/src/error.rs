//! Error type shared by the dice model, the roller and the commitment engine.

use thiserror::Error;

/// Errors from parsing dice, drawing randomness or resolving a selection
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiceError {
    #[error("Invalid face value '{token}' in die \"{die}\"")]
    MalformedDieSpec { die: String, token: String },

    #[error("Die \"{die}\" has {found} faces, expected exactly {expected}")]
    WrongFaceCount {
        die: String,
        expected: usize,
        found: usize,
    },

    #[error("At least {required} dice are required, got {found}")]
    InsufficientDice { found: usize, required: usize },

    #[error("Secure random source unavailable: {0}")]
    RandomSourceUnavailable(String),

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Empty range [{low}, {high})")]
    EmptyRange { low: i64, high: i64 },
}

impl DiceError {
    /// Entropy failures void the commitment; the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, DiceError::RandomSourceUnavailable(_))
    }

    /// Errors the caller handles by asking again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DiceError::InvalidSelection(_))
    }
}

pub type Result<T> = std::result::Result<T, DiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_entropy_failure_is_fatal() {
        assert!(DiceError::RandomSourceUnavailable("closed".into()).is_fatal());
        assert!(!DiceError::InsufficientDice {
            found: 2,
            required: 3
        }
        .is_fatal());
        assert!(!DiceError::InvalidSelection("9".into()).is_fatal());
    }

    #[test]
    fn test_selection_errors_are_recoverable() {
        assert!(DiceError::InvalidSelection("abc".into()).is_recoverable());
        assert!(!DiceError::MalformedDieSpec {
            die: "1,x".into(),
            token: "x".into()
        }
        .is_recoverable());
    }

    #[test]
    fn test_messages_are_single_line() {
        let err = DiceError::WrongFaceCount {
            die: "1,2,3,4,5".into(),
            expected: 6,
            found: 5,
        };
        let message = err.to_string();
        assert!(!message.contains('\n'));
        assert_eq!(message, "Die \"1,2,3,4,5\" has 5 faces, expected exactly 6");
    }
}
