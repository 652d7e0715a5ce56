//! Secure random sources.
//!
//! Every random draw in a session (the commitment secret and key, the
//! computer's die, each face roll) is read through one [`EntropySource`]
//! owned by the roller. A source either fills the whole buffer or fails;
//! there is no fallback to a non-cryptographic generator.

use crate::error::{DiceError, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::collections::VecDeque;
use std::fmt;

/// Trait for the byte source behind all draws
pub trait EntropySource {
    /// Fill `dest` completely, or fail with `RandomSourceUnavailable`
    fn fill(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating-system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl OsEntropy {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| DiceError::RandomSourceUnavailable(e.to_string()))
    }
}

/// Any cryptographically secure `rand` generator, e.g. a seeded `StdRng`
pub struct RngEntropy<R>(R);

impl<R: RngCore + CryptoRng> RngEntropy<R> {
    pub fn new(rng: R) -> Self {
        Self(rng)
    }
}

impl<R: RngCore + CryptoRng> EntropySource for RngEntropy<R> {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        self.0
            .try_fill_bytes(dest)
            .map_err(|e| DiceError::RandomSourceUnavailable(e.to_string()))
    }
}

impl<R> fmt::Debug for RngEntropy<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RngEntropy(..)")
    }
}

/// Replays a fixed byte script, then fails as an exhausted source would
///
/// Reads are all-or-nothing: a request larger than what is left consumes
/// nothing and returns `RandomSourceUnavailable`.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    bytes: VecDeque<u8>,
}

impl ScriptedEntropy {
    pub fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            bytes: bytes.into_iter().collect(),
        }
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.bytes.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill(&mut self, dest: &mut [u8]) -> Result<()> {
        if dest.len() > self.bytes.len() {
            return Err(DiceError::RandomSourceUnavailable(format!(
                "script exhausted: wanted {} bytes, {} left",
                dest.len(),
                self.bytes.len()
            )));
        }
        let n = dest.len();
        for (slot, byte) in dest.iter_mut().zip(self.bytes.drain(..n)) {
            *slot = byte;
        }
        Ok(())
    }
}
