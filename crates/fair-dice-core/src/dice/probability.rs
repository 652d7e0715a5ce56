//! Pairwise win probabilities.
//!
//! `P(i beats j) = wins / (faces(i) * faces(j))` where `wins` counts face
//! pairs with a strictly greater face on `i`. Ties count toward the
//! denominator only, so `P(i beats j) + P(j beats i)` is below 1 whenever
//! the two dice share a face value.

use super::{DiceSet, Die};
use serde::{Deserialize, Serialize};

/// Exact win count over the full cross product of faces
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinOdds {
    pub wins: usize,
    pub total: usize,
}

impl WinOdds {
    pub fn between(a: &Die, b: &Die) -> Self {
        let wins = a
            .faces()
            .iter()
            .map(|fa| b.faces().iter().filter(|&fb| fa > fb).count())
            .sum();
        Self {
            wins,
            total: a.len() * b.len(),
        }
    }

    pub fn probability(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.wins as f64 / self.total as f64
    }

    /// Lowest-terms fraction
    pub fn reduced(&self) -> (usize, usize) {
        let g = gcd(self.wins, self.total).max(1);
        (self.wins / g, self.total / g)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Win odds for every ordered pair of distinct dice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    size: usize,
    cells: Vec<Option<WinOdds>>,
}

impl ProbabilityMatrix {
    pub fn compute(dice: &DiceSet) -> Self {
        let size = dice.len();
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in dice.dice().iter().enumerate() {
            for (j, col) in dice.dice().iter().enumerate() {
                cells.push((i != j).then(|| WinOdds::between(row, col)));
            }
        }
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Odds that die `row` beats die `col`; `None` on the diagonal
    pub fn get(&self, row: usize, col: usize) -> Option<WinOdds> {
        if row >= self.size || col >= self.size {
            return None;
        }
        self.cells[row * self.size + col]
    }

    /// All odds for die `row` against each column; `None` past the last die
    pub fn row(&self, row: usize) -> Option<&[Option<WinOdds>]> {
        if row >= self.size {
            return None;
        }
        Some(&self.cells[row * self.size..(row + 1) * self.size])
    }
}
