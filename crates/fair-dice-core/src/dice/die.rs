//! Dice parsed from comma-separated face lists.

use crate::error::{DiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Faces each die must have unless configured otherwise
pub const DEFAULT_FACES: usize = 6;

/// Fewest dice a game can be played with
pub const MIN_DICE: usize = 3;

/// Validation rules applied while parsing dice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiceRules {
    pub faces_per_die: usize,
    pub min_dice: usize,
}

impl DiceRules {
    pub fn with_faces(faces_per_die: usize) -> Self {
        Self {
            faces_per_die,
            ..Self::default()
        }
    }
}

impl Default for DiceRules {
    fn default() -> Self {
        Self {
            faces_per_die: DEFAULT_FACES,
            min_dice: MIN_DICE,
        }
    }
}

/// A die: ordered face values, immutable once built
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Die {
    faces: Vec<i32>,
}

impl Die {
    /// Build a die without validating the face count
    pub fn new(faces: Vec<i32>) -> Self {
        Self { faces }
    }

    /// Parse `"2,2,4,4,9,9"`. Whitespace around each value is ignored.
    pub fn parse(spec: &str, rules: &DiceRules) -> Result<Self> {
        let faces = spec
            .split(',')
            .map(|token| {
                token
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| DiceError::MalformedDieSpec {
                        die: spec.to_string(),
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        if faces.len() != rules.faces_per_die {
            return Err(DiceError::WrongFaceCount {
                die: spec.to_string(),
                expected: rules.faces_per_die,
                found: faces.len(),
            });
        }

        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i32] {
        &self.faces
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", face)?;
        }
        Ok(())
    }
}

/// Zero-based position of a die in its set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DieIndex(usize);

impl DieIndex {
    pub(crate) fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(&self) -> usize {
        self.0
    }

    /// One-based number shown in menus
    pub fn number(&self) -> usize {
        self.0 + 1
    }
}

impl fmt::Display for DieIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Die #{}", self.number())
    }
}

/// The dice on the table
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    /// Parse one die per argument. The count is checked before any die.
    pub fn parse<S: AsRef<str>>(specs: &[S], rules: &DiceRules) -> Result<Self> {
        if specs.len() < rules.min_dice {
            return Err(DiceError::InsufficientDice {
                found: specs.len(),
                required: rules.min_dice,
            });
        }

        let dice = specs
            .iter()
            .map(|spec| Die::parse(spec.as_ref(), rules))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { dice })
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn get(&self, index: DieIndex) -> Option<&Die> {
        self.dice.get(index.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (DieIndex, &Die)> {
        self.dice.iter().enumerate().map(|(i, d)| (DieIndex(i), d))
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    /// Resolve a one-based menu number
    pub fn select(&self, number: usize) -> Result<DieIndex> {
        if number == 0 || number > self.dice.len() {
            return Err(DiceError::InvalidSelection(format!(
                "{} is not between 1 and {}",
                number,
                self.dice.len()
            )));
        }
        Ok(DieIndex(number - 1))
    }
}
