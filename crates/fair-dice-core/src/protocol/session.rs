//! One round of the game as a type-state machine.
//!
//! ```text
//! start ──> Committed ──lock_in──> Locked ──reveal──> Revealed ──roll──> Finished
//! ```
//!
//! The digest exists from `start` on. The secret and key only leave the
//! session through [`Session::<Locked>::reveal`], and a `Locked` session
//! can only be built once the user's die is fixed, so the reveal cannot
//! precede the user's choice.

use super::{Participant, RoundOutcome, SessionId, Transcript};
use crate::crypto::{CommitDigest, Reveal, SealedCommitment};
use crate::dice::{DiceSet, Die, DieIndex};
use crate::error::{DiceError, Result};
use crate::rng::{EntropySource, FairRoller};
use tracing::{debug, info};

/// Digest published, user has not chosen yet
#[derive(Debug)]
pub struct Committed {
    sealed: SealedCommitment,
    computer_die: Option<DieIndex>,
}

/// Both dice fixed, secret still sealed
#[derive(Debug)]
pub struct Locked {
    sealed: SealedCommitment,
    user_die: DieIndex,
    computer_die: DieIndex,
}

/// Secret and key disclosed
#[derive(Debug)]
pub struct Revealed {
    reveal: Reveal,
    user_die: DieIndex,
    computer_die: DieIndex,
}

/// Dice rolled
#[derive(Debug)]
pub struct Finished {
    reveal: Reveal,
    user_die: DieIndex,
    computer_die: DieIndex,
    outcome: RoundOutcome,
}

/// Game session in state `S`
#[derive(Debug)]
pub struct Session<S> {
    id: SessionId,
    dice: DiceSet,
    digest: CommitDigest,
    first_mover: Participant,
    state: S,
}

impl<S> Session<S> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// The commitment published at start
    pub fn digest(&self) -> &CommitDigest {
        &self.digest
    }

    pub fn first_mover(&self) -> Participant {
        self.first_mover
    }

    fn die(&self, index: DieIndex) -> Result<&Die> {
        self.dice
            .get(index)
            .ok_or_else(|| DiceError::InvalidSelection(format!("no {} on the table", index)))
    }
}

impl Session<Committed> {
    /// Commit to the first-move secret. When the computer moves first its
    /// die is picked here, before the user is asked.
    pub fn start<E: EntropySource>(dice: DiceSet, roller: &mut FairRoller<E>) -> Result<Self> {
        let (digest, sealed) = SealedCommitment::commit(roller)?;
        let first_mover = Participant::first_mover(sealed.secret());
        let computer_die = match first_mover {
            Participant::Computer => Some(roller.pick_die(&dice)?),
            Participant::User => None,
        };

        let id = SessionId::new();
        info!(session = %id, %digest, dice = dice.len(), "session committed");

        Ok(Self {
            id,
            dice,
            digest,
            first_mover,
            state: Committed {
                sealed,
                computer_die,
            },
        })
    }

    /// Computer's die, if it has already picked
    pub fn computer_die(&self) -> Option<DieIndex> {
        self.state.computer_die
    }

    /// Resolve a one-based menu number against this session's dice
    pub fn select(&self, number: usize) -> Result<DieIndex> {
        self.dice.select(number)
    }

    /// Fix the user's die. If the user moved first the computer picks now.
    pub fn lock_in<E: EntropySource>(
        self,
        user_die: DieIndex,
        roller: &mut FairRoller<E>,
    ) -> Result<Session<Locked>> {
        self.die(user_die)?;
        let computer_die = match self.state.computer_die {
            Some(index) => index,
            None => roller.pick_die(&self.dice)?,
        };
        debug!(session = %self.id, user = %user_die, computer = %computer_die, "choices locked");

        let Committed { sealed, .. } = self.state;
        let state = Locked {
            sealed,
            user_die,
            computer_die,
        };
        Ok(Session {
            id: self.id,
            dice: self.dice,
            digest: self.digest,
            first_mover: self.first_mover,
            state,
        })
    }
}

impl Session<Locked> {
    pub fn user_die(&self) -> DieIndex {
        self.state.user_die
    }

    pub fn computer_die(&self) -> DieIndex {
        self.state.computer_die
    }

    /// Disclose secret and key
    pub fn reveal(self) -> Session<Revealed> {
        let Locked {
            sealed,
            user_die,
            computer_die,
        } = self.state;
        let reveal = sealed.reveal();
        info!(session = %self.id, key = %reveal.key, secret = %reveal.secret, "commitment revealed");

        Session {
            id: self.id,
            dice: self.dice,
            digest: self.digest,
            first_mover: self.first_mover,
            state: Revealed {
                reveal,
                user_die,
                computer_die,
            },
        }
    }
}

impl Session<Revealed> {
    pub fn reveal(&self) -> &Reveal {
        &self.state.reveal
    }

    pub fn user_die(&self) -> DieIndex {
        self.state.user_die
    }

    pub fn computer_die(&self) -> DieIndex {
        self.state.computer_die
    }

    /// Roll both chosen dice once, user's first
    pub fn roll<E: EntropySource>(self, roller: &mut FairRoller<E>) -> Result<Session<Finished>> {
        let user_roll = roller.roll_face(self.die(self.state.user_die)?)?;
        let computer_roll = roller.roll_face(self.die(self.state.computer_die)?)?;
        let outcome = RoundOutcome::judge(user_roll, computer_roll);
        info!(
            session = %self.id,
            user_roll,
            computer_roll,
            result = ?outcome.result,
            "round finished"
        );

        let Revealed {
            reveal,
            user_die,
            computer_die,
        } = self.state;
        Ok(Session {
            id: self.id,
            dice: self.dice,
            digest: self.digest,
            first_mover: self.first_mover,
            state: Finished {
                reveal,
                user_die,
                computer_die,
                outcome,
            },
        })
    }
}

impl Session<Finished> {
    pub fn outcome(&self) -> RoundOutcome {
        self.state.outcome
    }

    pub fn reveal(&self) -> &Reveal {
        &self.state.reveal
    }

    pub fn transcript(&self) -> Transcript {
        Transcript {
            session_id: self.id,
            dice: self.dice.dice().to_vec(),
            digest: self.digest,
            key: self.state.reveal.key.clone(),
            secret: self.state.reveal.secret,
            first_mover: self.first_mover,
            user_die: self.state.user_die,
            computer_die: self.state.computer_die,
            outcome: self.state.outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::{keyed_hash, KEY_LEN};
    use crate::dice::DiceRules;
    use crate::protocol::RoundResult;
    use crate::rng::{OsEntropy, ScriptedEntropy};

    fn classic() -> DiceSet {
        DiceSet::parse(
            &["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"],
            &DiceRules::default(),
        )
        .unwrap()
    }

    fn script(secret: u8, rest: &[u8]) -> FairRoller<ScriptedEntropy> {
        let mut bytes = vec![secret];
        bytes.extend([0x11u8; KEY_LEN]);
        bytes.extend_from_slice(rest);
        FairRoller::new(ScriptedEntropy::new(bytes))
    }

    #[test]
    fn test_user_moves_first() {
        // secret 0, computer picks die 3 after the user, rolls: faces 0 and 5
        let mut roller = script(0, &[2, 0, 5]);
        let session = Session::start(classic(), &mut roller).unwrap();

        assert_eq!(session.first_mover(), Participant::User);
        assert_eq!(session.computer_die(), None);

        let user_die = session.select(2).unwrap();
        let locked = session.lock_in(user_die, &mut roller).unwrap();
        assert_eq!(locked.computer_die().number(), 3);

        let finished = locked.reveal().roll(&mut roller).unwrap();
        let outcome = finished.outcome();
        assert_eq!(outcome.user_roll, 1);
        assert_eq!(outcome.computer_roll, 7);
        assert_eq!(outcome.result, RoundResult::Loss);
        assert_eq!(roller.into_inner().remaining(), 0);
    }

    #[test]
    fn test_computer_moves_first() {
        // secret 1, computer picks die 1 up front, rolls: faces 5 and 0
        let mut roller = script(1, &[0, 5, 0]);
        let session = Session::start(classic(), &mut roller).unwrap();

        assert_eq!(session.first_mover(), Participant::Computer);
        assert_eq!(session.computer_die().map(|d| d.number()), Some(1));

        let user_die = session.select(3).unwrap();
        let revealed = session.lock_in(user_die, &mut roller).unwrap().reveal();
        assert_eq!(revealed.reveal().secret.value(), 1);

        let outcome = revealed.roll(&mut roller).unwrap().outcome();
        assert_eq!(outcome.user_roll, 7);
        assert_eq!(outcome.computer_roll, 2);
        assert_eq!(outcome.result, RoundResult::Win);
    }

    #[test]
    fn test_reveal_matches_digest_shown_at_start() {
        let mut roller = FairRoller::new(OsEntropy::new());
        let session = Session::start(classic(), &mut roller).unwrap();
        let shown = *session.digest();

        let user_die = session.select(1).unwrap();
        let revealed = session.lock_in(user_die, &mut roller).unwrap().reveal();
        let reveal = revealed.reveal();

        assert_eq!(shown, keyed_hash(&reveal.key, reveal.secret));
        assert_eq!(
            revealed.first_mover(),
            Participant::first_mover(reveal.secret)
        );
    }

    #[test]
    fn test_out_of_range_selection_keeps_session() {
        let mut roller = script(0, &[]);
        let session = Session::start(classic(), &mut roller).unwrap();

        assert!(session.select(0).unwrap_err().is_recoverable());
        assert!(session.select(4).unwrap_err().is_recoverable());
        assert!(session.select(2).is_ok());
    }

    #[test]
    fn test_entropy_failure_during_start_is_fatal() {
        let mut roller = FairRoller::new(ScriptedEntropy::new([0u8]));
        let err = Session::start(classic(), &mut roller).unwrap_err();

        assert!(err.is_fatal());
    }

    #[test]
    fn test_transcript_verifies() {
        let mut roller = script(0, &[1, 2, 3]);
        let session = Session::start(classic(), &mut roller).unwrap();
        let user_die = session.select(1).unwrap();
        let finished = session
            .lock_in(user_die, &mut roller)
            .unwrap()
            .reveal()
            .roll(&mut roller)
            .unwrap();
        let transcript = finished.transcript();

        assert!(transcript.verify());
        assert_eq!(transcript.user_die.number(), 1);
        assert_eq!(transcript.computer_die.number(), 2);
        assert_eq!(transcript.outcome, finished.outcome());
    }
}
