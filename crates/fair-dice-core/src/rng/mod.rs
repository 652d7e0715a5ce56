//! Secure randomness: byte sources and the unbiased roller built on them.

mod entropy;
mod roller;

pub use entropy::{EntropySource, OsEntropy, RngEntropy, ScriptedEntropy};
pub use roller::FairRoller;
