//! Errors surfaced by the command-line front end.

use fair_dice_core::DiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Dice(#[from] DiceError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Transcript encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid hex in --{field}: {source}")]
    InvalidHex {
        field: &'static str,
        source: hex::FromHexError,
    },

    #[error("--{field} must be {expected} bytes, got {found}")]
    WrongLength {
        field: &'static str,
        expected: usize,
        found: usize,
    },
}

impl CliError {
    /// 2 when randomness failed, 1 for everything else
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Dice(e) if e.is_fatal() => 2,
            _ => 1,
        }
    }
}
