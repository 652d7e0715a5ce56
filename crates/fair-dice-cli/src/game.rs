//! Interactive round: commitment, die choice, reveal, roll.

use crate::error::CliError;
use crate::menu::{render_help, render_menu, render_table, MenuCommand};
use fair_dice_core::protocol::{Committed, Finished};
use fair_dice_core::{
    DiceSet, DieIndex, EntropySource, FairRoller, Participant, ProbabilityMatrix, Session,
};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// Presentation switches for a round
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayOptions {
    /// Print the probability table before the first prompt
    pub show_table: bool,
    /// Print the finished round as JSON
    pub print_transcript: bool,
}

/// Play one round. Returns `None` if the user quits before choosing.
pub fn play<E, R, W>(
    dice: DiceSet,
    roller: &mut FairRoller<E>,
    input: &mut R,
    out: &mut W,
    options: PlayOptions,
) -> Result<Option<Session<Finished>>, CliError>
where
    E: EntropySource,
    R: BufRead,
    W: Write,
{
    let matrix = ProbabilityMatrix::compute(&dice);
    writeln!(out, "Parsed {} dice successfully.", dice.len())?;

    let session = Session::start(dice, roller)?;
    writeln!(out, "HMAC commit: {}", session.digest())?;
    if options.show_table {
        render_table(out, session.dice(), &matrix)?;
    }

    match session.first_mover() {
        Participant::User => writeln!(out, "Your turn to choose a die first.")?,
        Participant::Computer => {
            writeln!(out, "Computer chooses its die first.")?;
            if let Some(index) = session.computer_die() {
                announce_computer_die(out, session.dice(), index)?;
            }
        }
    }

    let Some(user_die) = prompt_for_die(&session, &matrix, input, out)? else {
        info!(session = %session.id(), "player left before choosing");
        writeln!(out, "Goodbye.")?;
        return Ok(None);
    };
    writeln!(out, "You selected {}.", user_die)?;

    let locked = session.lock_in(user_die, roller)?;
    if locked.first_mover() == Participant::User {
        announce_computer_die(out, locked.dice(), locked.computer_die())?;
    }

    let revealed = locked.reveal();
    let reveal = revealed.reveal();
    writeln!(out)?;
    writeln!(out, "HMAC key reveal: {}", reveal.key)?;
    writeln!(out, "First-move secret: {}", reveal.secret)?;
    let verdict = if reveal.matches(revealed.digest()) {
        "matches"
    } else {
        "DOES NOT match"
    };
    writeln!(out, "HMAC-SHA256(key, \"{}\") {} the commit.", reveal.secret, verdict)?;
    writeln!(out)?;

    let finished = revealed.roll(roller)?;
    let outcome = finished.outcome();
    writeln!(out, "You rolled: {}", outcome.user_roll)?;
    writeln!(out, "Computer rolled: {}", outcome.computer_roll)?;
    writeln!(out, "{}", outcome.result)?;

    if options.print_transcript {
        writeln!(out, "{}", finished.transcript().to_json()?)?;
    }
    Ok(Some(finished))
}

fn announce_computer_die<W: Write>(
    out: &mut W,
    dice: &DiceSet,
    index: DieIndex,
) -> Result<(), CliError> {
    let faces = dice.get(index).map(ToString::to_string).unwrap_or_default();
    writeln!(out, "Computer selects {} [{}].", index, faces)?;
    Ok(())
}

/// Loop until a valid die is chosen. `None` on exit or end of input.
fn prompt_for_die<R: BufRead, W: Write>(
    session: &Session<Committed>,
    matrix: &ProbabilityMatrix,
    input: &mut R,
    out: &mut W,
) -> Result<Option<DieIndex>, CliError> {
    loop {
        render_menu(out, session.dice())?;
        write!(out, "Enter choice: ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(None);
        }

        let selection = match line.parse::<MenuCommand>() {
            Ok(MenuCommand::Help) => {
                render_help(out)?;
                continue;
            }
            Ok(MenuCommand::Table) => {
                render_table(out, session.dice(), matrix)?;
                continue;
            }
            Ok(MenuCommand::Exit) => return Ok(None),
            Ok(MenuCommand::Select(number)) => session.select(number),
            Err(err) => Err(err),
        };

        match selection {
            Ok(index) => return Ok(Some(index)),
            Err(err) => {
                debug!(%err, "input rejected");
                writeln!(out, "Invalid input. Try again.")?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fair_dice_core::crypto::KEY_LEN;
    use fair_dice_core::{DiceRules, RoundResult, ScriptedEntropy};
    use std::io::Cursor;

    const KEY_HEX_PREFIX: &str = "a5a5a5a5a5a5a5a5";

    fn classic() -> DiceSet {
        DiceSet::parse(
            &["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"],
            &DiceRules::default(),
        )
        .unwrap()
    }

    fn roller(secret: u8, rest: &[u8]) -> FairRoller<ScriptedEntropy> {
        let mut bytes = vec![secret];
        bytes.extend([0xA5u8; KEY_LEN]);
        bytes.extend_from_slice(rest);
        FairRoller::new(ScriptedEntropy::new(bytes))
    }

    fn run(
        roller: &mut FairRoller<ScriptedEntropy>,
        input: &str,
        options: PlayOptions,
    ) -> (Result<Option<Session<Finished>>, CliError>, String) {
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let mut out = Vec::new();
        let result = play(classic(), roller, &mut input, &mut out, options);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_user_first_round_with_bad_input() {
        // computer takes die 3, user rolls face 0, computer rolls face 5
        let mut roller = roller(0, &[2, 0, 5]);
        let (result, text) = run(&mut roller, "h\nt\nfoo\n9\n2\n", PlayOptions::default());
        let finished = result.unwrap().unwrap();

        let outcome = finished.outcome();
        assert_eq!(outcome.user_roll, 1);
        assert_eq!(outcome.computer_roll, 7);
        assert_eq!(outcome.result, RoundResult::Loss);

        assert!(text.contains(
            "HMAC commit: 8675d1deab355afc0ad77d6639c1d794887d2bb57a46293c1a4148c9df9851bb"
        ));
        assert!(text.contains("Your turn to choose a die first."));
        assert!(text.contains("Select a die by entering its number"));
        assert!(text.contains("0.5556"));
        assert_eq!(text.matches("Invalid input. Try again.").count(), 2);
        assert!(text.contains("You selected Die #2."));
        assert!(text.contains("Computer selects Die #3 [3,3,5,5,7,7]."));
        assert!(text.contains("First-move secret: 0"));
        assert!(text.contains("matches the commit."));
        assert!(text.contains("You rolled: 1\nComputer rolled: 7\nComputer wins.\n"));
    }

    #[test]
    fn test_nothing_secret_before_reveal() {
        let mut roller = roller(0, &[1, 1, 1]);
        let (result, text) = run(&mut roller, "1\n", PlayOptions::default());
        result.unwrap().unwrap();

        let reveal_at = text.find("HMAC key reveal:").unwrap();
        let (before, after) = text.split_at(reveal_at);
        let commit_at = before.find("HMAC commit:").unwrap();
        let choice_at = before.find("You selected").unwrap();

        assert!(commit_at < choice_at);
        assert!(!before.contains(KEY_HEX_PREFIX));
        assert!(!before.contains("secret"));
        assert!(after.contains(&KEY_HEX_PREFIX.repeat(4)));
    }

    #[test]
    fn test_computer_first_round() {
        // computer takes die 1 up front, user rolls face 5, computer rolls face 0
        let mut roller = roller(1, &[0, 5, 0]);
        let (result, text) = run(&mut roller, "3\n", PlayOptions::default());
        let outcome = result.unwrap().unwrap().outcome();

        assert_eq!(outcome.result, RoundResult::Win);
        let computer_at = text.find("Computer selects Die #1 [2,2,4,4,9,9].").unwrap();
        let prompt_at = text.find("Enter choice:").unwrap();
        assert!(computer_at < prompt_at);
        assert!(text.contains("First-move secret: 1"));
        assert!(text.contains("You win!"));
    }

    #[test]
    fn test_exit_before_choosing_reveals_nothing() {
        let mut roller = roller(0, &[]);
        let (result, text) = run(&mut roller, "x\n", PlayOptions::default());

        assert!(result.unwrap().is_none());
        assert!(text.contains("Goodbye."));
        assert!(!text.contains("HMAC key reveal"));
        assert!(!text.contains(KEY_HEX_PREFIX));
    }

    #[test]
    fn test_end_of_input_exits() {
        let mut roller = roller(0, &[]);
        let (result, _) = run(&mut roller, "", PlayOptions::default());

        assert!(result.unwrap().is_none());
    }

    #[test]
    fn test_entropy_failure_aborts() {
        // Script ends before the computer can pick
        let mut roller = roller(0, &[]);
        let (result, text) = run(&mut roller, "1\n", PlayOptions::default());
        let err = result.unwrap_err();

        assert_eq!(err.exit_code(), 2);
        assert!(!text.contains("HMAC key reveal"));
    }

    #[test]
    fn test_table_and_transcript_options() {
        let mut roller = roller(0, &[0, 0, 0]);
        let options = PlayOptions {
            show_table: true,
            print_transcript: true,
        };
        let (result, text) = run(&mut roller, "1\n", options);
        let finished = result.unwrap().unwrap();

        let table_at = text.find("Probability that the row die beats").unwrap();
        assert!(table_at < text.find("Enter choice:").unwrap());

        let json = text.lines().last().unwrap();
        let transcript = fair_dice_core::Transcript::from_json(json).unwrap();
        assert!(transcript.verify());
        assert_eq!(transcript, finished.transcript());
    }
}
