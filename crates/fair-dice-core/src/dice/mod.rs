//! Dice model and win-probability evaluation.

mod die;
mod probability;

pub use die::{DiceRules, DiceSet, Die, DieIndex, DEFAULT_FACES, MIN_DICE};
pub use probability::{ProbabilityMatrix, WinOdds};
