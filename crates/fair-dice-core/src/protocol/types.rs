//! Protocol types.

use crate::crypto::Secret;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique session identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for SessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl fmt::Debug for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionId({})", self.0)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two sides at the table
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Participant {
    User,
    Computer,
}

impl Participant {
    /// Who picks a die first: secret 0 means the user
    pub fn first_mover(secret: Secret) -> Participant {
        if secret.value() == 0 {
            Participant::User
        } else {
            Participant::Computer
        }
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Participant::User => write!(f, "You"),
            Participant::Computer => write!(f, "Computer"),
        }
    }
}

/// Round result from the user's side
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    Win,
    Loss,
    Tie,
}

impl RoundResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundResult::Win => "You win!",
            RoundResult::Loss => "Computer wins.",
            RoundResult::Tie => "It's a tie.",
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Both rolls and the result they produce
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub user_roll: i32,
    pub computer_roll: i32,
    pub result: RoundResult,
}

impl RoundOutcome {
    /// Higher roll wins, equal rolls tie
    pub fn judge(user_roll: i32, computer_roll: i32) -> Self {
        let result = match user_roll.cmp(&computer_roll) {
            Ordering::Greater => RoundResult::Win,
            Ordering::Less => RoundResult::Loss,
            Ordering::Equal => RoundResult::Tie,
        };
        Self {
            user_roll,
            computer_roll,
            result,
        }
    }
}
