//! Everything an outside verifier needs to check a finished round.

use super::{Participant, RoundOutcome, SessionId};
use crate::crypto::{CommitDigest, HmacKey, Secret};
use crate::dice::{Die, DieIndex};
use serde::{Deserialize, Serialize};

/// Record of one finished round
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub session_id: SessionId,
    pub dice: Vec<Die>,
    /// Digest shown before the user chose
    pub digest: CommitDigest,
    pub key: HmacKey,
    pub secret: Secret,
    pub first_mover: Participant,
    /// Zero-based
    pub user_die: DieIndex,
    /// Zero-based
    pub computer_die: DieIndex,
    pub outcome: RoundOutcome,
}

impl Transcript {
    /// Recompute HMAC(key, secret) and compare with the digest
    pub fn verify(&self) -> bool {
        self.digest.verify(&self.key, self.secret)
            && Participant::first_mover(self.secret) == self.first_mover
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
