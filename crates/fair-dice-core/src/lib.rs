//! Fair Dice Core Library
//!
//! This crate provides the commitment protocol, secure die rolling, and
//! odds evaluation for a provably fair game of non-transitive dice played
//! against the computer.

pub mod crypto;
pub mod dice;
pub mod error;
pub mod protocol;
pub mod rng;

pub use crypto::{keyed_hash, CommitDigest, HmacKey, Reveal, SealedCommitment, Secret};
pub use dice::{DiceRules, DiceSet, Die, DieIndex, ProbabilityMatrix, WinOdds};
pub use error::{DiceError, Result};
pub use protocol::{Participant, RoundOutcome, RoundResult, Session, SessionId, Transcript};
pub use rng::{EntropySource, FairRoller, OsEntropy, RngEntropy, ScriptedEntropy};
