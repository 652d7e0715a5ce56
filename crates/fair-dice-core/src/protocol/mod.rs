//! Session flow, round outcome and transcript.

mod session;
mod transcript;
mod types;

pub use session::{Committed, Finished, Locked, Revealed, Session};
pub use transcript::Transcript;
pub use types::{Participant, RoundOutcome, RoundResult, SessionId};
