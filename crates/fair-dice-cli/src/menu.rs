//! Prompt commands and the text shown around them.

use fair_dice_core::{DiceError, DiceSet, ProbabilityMatrix};
use std::io::{self, Write};
use std::str::FromStr;

/// Command typed at the selection prompt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuCommand {
    /// One-based die number, range-checked by the session
    Select(usize),
    Help,
    Table,
    Exit,
}

impl FromStr for MenuCommand {
    type Err = DiceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        match trimmed.to_ascii_uppercase().as_str() {
            "H" | "HELP" | "?" => Ok(MenuCommand::Help),
            "T" | "TABLE" => Ok(MenuCommand::Table),
            "X" | "EXIT" | "Q" | "QUIT" => Ok(MenuCommand::Exit),
            other => other
                .parse::<usize>()
                .map(MenuCommand::Select)
                .map_err(|_| DiceError::InvalidSelection(trimmed.to_string())),
        }
    }
}

pub fn render_menu<W: Write>(out: &mut W, dice: &DiceSet) -> io::Result<()> {
    writeln!(out, "Available dice:")?;
    for (index, die) in dice.iter() {
        writeln!(out, "  {}. {} [{}]", index.number(), index, die)?;
    }
    writeln!(out, "  H. Help")?;
    writeln!(out, "  T. Probability table")?;
    writeln!(out, "  X. Exit")
}

pub fn render_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "Select a die by entering its number (e.g., 1).")?;
    writeln!(out, "H -> display this help.")?;
    writeln!(out, "T -> show the chance of each die beating every other die.")?;
    writeln!(out, "X -> quit the game.")?;
    writeln!(
        out,
        "The commitment shown at the start is HMAC-SHA256(key, secret). After you choose,"
    )?;
    writeln!(
        out,
        "the key and secret are revealed so you can recompute it (see `fair-dice verify`)."
    )
}

/// Row die beats column die with the probability shown
pub fn render_table<W: Write>(
    out: &mut W,
    dice: &DiceSet,
    matrix: &ProbabilityMatrix,
) -> io::Result<()> {
    let labels: Vec<String> = dice.iter().map(|(index, _)| index.to_string()).collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0).max(6);

    writeln!(out, "Probability that the row die beats the column die:")?;
    write!(out, "{:<width$}", "", width = width)?;
    for label in &labels {
        write!(out, " | {:>width$}", label, width = width)?;
    }
    writeln!(out)?;
    writeln!(out, "{}", "-".repeat(width + labels.len() * (width + 3)))?;

    for (row, label) in labels.iter().enumerate() {
        write!(out, "{:<width$}", label, width = width)?;
        for cell in matrix.row(row).unwrap_or_default() {
            let text = match cell {
                Some(odds) => format!("{:.4}", odds.probability()),
                None => "-".to_string(),
            };
            write!(out, " | {:>width$}", text, width = width)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "Ties count as a win for neither die.")
}
