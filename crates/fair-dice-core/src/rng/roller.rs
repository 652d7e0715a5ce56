//! Unbiased integer draws over a secure byte stream.
//!
//! A draw over a range of size `n` reads the fewest whole bytes that can
//! represent `n - 1`, and rejects values in the final partial block of the
//! byte domain so every residue is equally likely.

use super::{EntropySource, OsEntropy};
use crate::dice::{DiceSet, Die, DieIndex};
use crate::error::{DiceError, Result};

/// Fair die roller owning the session's entropy source
#[derive(Debug)]
pub struct FairRoller<E> {
    source: E,
}

impl FairRoller<OsEntropy> {
    /// Roller backed by the operating-system CSPRNG
    pub fn os() -> Self {
        Self::new(OsEntropy::new())
    }
}

impl<E: EntropySource> FairRoller<E> {
    pub fn new(source: E) -> Self {
        Self { source }
    }

    /// Hand back the entropy source
    pub fn into_inner(self) -> E {
        self.source
    }

    /// Fill `dest` from the secure source in one read
    pub fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        self.source.fill(dest)
    }

    /// Uniform integer in `[low, high)`
    pub fn uniform_int(&mut self, low: i64, high: i64) -> Result<i64> {
        if low >= high {
            return Err(DiceError::EmptyRange { low, high });
        }
        let offset = self.uniform_below(high.abs_diff(low))?;
        // Two's-complement wrap lands inside [low, high)
        Ok(low.wrapping_add(offset as i64))
    }

    /// Uniform index in `[0, len)`
    pub fn uniform_index(&mut self, len: usize) -> Result<usize> {
        if len == 0 {
            return Err(DiceError::EmptyRange { low: 0, high: 0 });
        }
        Ok(self.uniform_below(len as u64)? as usize)
    }

    /// Roll `die` and return the face value that comes up
    pub fn roll_face(&mut self, die: &Die) -> Result<i32> {
        let index = self.uniform_index(die.len())?;
        Ok(die.faces()[index])
    }

    /// Pick one of the dice for the computer
    pub fn pick_die(&mut self, dice: &DiceSet) -> Result<DieIndex> {
        let index = self.uniform_index(dice.len())?;
        Ok(DieIndex::new(index))
    }

    fn uniform_below(&mut self, bound: u64) -> Result<u64> {
        debug_assert!(bound > 0);
        let width = byte_width(bound - 1);
        let domain = 1u128 << (8 * width);
        let zone = domain - domain % u128::from(bound);

        loop {
            let mut buf = [0u8; 8];
            self.source.fill(&mut buf[8 - width..])?;
            let value = u128::from(u64::from_be_bytes(buf));
            if value < zone {
                return Ok((value % u128::from(bound)) as u64);
            }
        }
    }
}

/// Whole bytes needed to hold `max`, at least one
fn byte_width(max: u64) -> usize {
    let bits = (u64::BITS - max.leading_zeros()) as usize;
    ((bits + 7) / 8).max(1)
}
