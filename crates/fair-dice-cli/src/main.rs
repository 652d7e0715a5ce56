//! Fair Dice
//!
//! Console game of non-transitive dice against the computer. Who picks a
//! die first is committed with HMAC-SHA256 before the player chooses, and
//! revealed afterwards so the player can check it.
//!
//! Usage:
//! - `fair-dice 2,2,4,4,9,9 1,1,6,6,8,8 3,3,5,5,7,7` - play one round
//! - `fair-dice verify --digest <HEX> --key <HEX> --secret <N>` - check a commitment

mod error;
mod game;
mod menu;
mod verify;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};
use error::CliError;
use fair_dice_core::dice::DEFAULT_FACES;
use fair_dice_core::{DiceError, DiceRules, DiceSet, FairRoller};
use game::PlayOptions;
use std::io;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use verify::VerifyArgs;

const EXAMPLE: &str = "  fair-dice 2,2,4,4,9,9 6,8,1,1,8,6 7,5,3,7,5,3";

#[derive(Parser, Debug)]
#[command(name = "fair-dice", version, about, args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Recompute a commitment from the revealed key and secret
    Verify(VerifyArgs),
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// One die per argument, faces separated by commas
    #[arg(value_name = "DIE", allow_hyphen_values = true)]
    dice: Vec<String>,

    /// Faces every die must have
    #[arg(long, env = "FAIR_DICE_FACES", default_value_t = DEFAULT_FACES)]
    faces: usize,

    /// Show the win-probability table before the first prompt
    #[arg(long)]
    table: bool,

    /// Print the finished round as JSON
    #[arg(long)]
    transcript: bool,
}

impl PlayArgs {
    fn rules(&self) -> DiceRules {
        DiceRules::with_faces(self.faces)
    }

    fn options(&self) -> PlayOptions {
        PlayOptions {
            show_table: self.table,
            print_transcript: self.transcript,
        }
    }
}

/// Help and version requests succeed; any other usage error is a validation error
fn usage_exit_code(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => 0,
        _ => 1,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Logging disabled: {}", e);
    }
}

fn run_play(args: PlayArgs) -> Result<(), CliError> {
    let rules = args.rules();
    let dice = DiceSet::parse(&args.dice, &rules)?;
    info!(dice = dice.len(), faces = rules.faces_per_die, "dice parsed");

    let options = args.options();
    let mut roller = FairRoller::os();
    let stdin = io::stdin();
    let stdout = io::stdout();
    game::play(
        dice,
        &mut roller,
        &mut stdin.lock(),
        &mut stdout.lock(),
        options,
    )?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if let Err(print_err) = e.print() {
                eprintln!("{}", print_err);
            }
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    let result = match cli.command {
        Some(Command::Verify(args)) => verify::run(&args, &mut io::stdout().lock()),
        None => run_play(cli.play).map(|()| true),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            debug!(error = %e, "aborted");
            eprintln!("Error: {}", e);
            if matches!(e, CliError::Dice(DiceError::InsufficientDice { .. })) {
                eprintln!("Example:");
                eprintln!("{}", EXAMPLE);
            }
            ExitCode::from(e.exit_code())
        }
    }
}
