//! Keyed-hash commitment for the first-move secret.
//!
//! digest = HMAC-SHA256(key, decimal(secret))
//!
//! The digest is published before the player chooses a die. The secret and
//! key stay inside [`SealedCommitment`] until [`SealedCommitment::reveal`]
//! consumes it, after which anyone can recompute the digest.

use crate::error::Result;
use crate::rng::{EntropySource, FairRoller};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Key length in bytes
pub const KEY_LEN: usize = 32;

/// Digest length in bytes
pub const DIGEST_LEN: usize = 32;

/// Number of values the secret is drawn from
pub const SECRET_DOMAIN: u8 = 2;

/// The committed value: which side picks a die first
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(u8);

impl Secret {
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Bytes fed to the keyed hash: the decimal ASCII digits of the value
    pub fn encode(&self) -> Vec<u8> {
        self.0.to_string().into_bytes()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 256-bit HMAC key
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HmacKey(#[serde(with = "super::hex_serde")] [u8; KEY_LEN]);

impl HmacKey {
    /// Draw a fresh key from the roller's secure source
    pub fn random<E: EntropySource>(roller: &mut FairRoller<E>) -> Result<Self> {
        let mut bytes = [0u8; KEY_LEN];
        roller.fill_bytes(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HmacKey(..)")
    }
}

impl fmt::Display for HmacKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Published digest = HMAC-SHA256(key, secret)
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommitDigest(#[serde(with = "super::hex_serde")] [u8; DIGEST_LEN]);

impl CommitDigest {
    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Check a revealed key and secret against this digest in constant time
    pub fn verify(&self, key: &HmacKey, secret: Secret) -> bool {
        let mut mac = keyed_mac(key);
        mac.update(&secret.encode());
        mac.verify_slice(&self.0).is_ok()
    }
}

impl fmt::Debug for CommitDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CommitDigest({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for CommitDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

fn keyed_mac(key: &HmacKey) -> HmacSha256 {
    match HmacSha256::new_from_slice(key.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => unreachable!("HMAC accepts keys of any length"),
    }
}

/// HMAC-SHA256 of the encoded secret under `key`
pub fn keyed_hash(key: &HmacKey, secret: Secret) -> CommitDigest {
    let mut mac = keyed_mac(key);
    mac.update(&secret.encode());
    CommitDigest(mac.finalize().into_bytes().into())
}

/// Secret and key disclosed at reveal time
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub secret: Secret,
    pub key: HmacKey,
}

impl Reveal {
    /// Recompute the keyed hash and compare with the published digest
    pub fn matches(&self, digest: &CommitDigest) -> bool {
        digest.verify(&self.key, self.secret)
    }
}

/// Secret and key held back until reveal
pub struct SealedCommitment {
    secret: Secret,
    key: HmacKey,
    digest: CommitDigest,
}

impl SealedCommitment {
    /// Draw a secret from `{0, .., SECRET_DOMAIN - 1}` and an independent key,
    /// then publish only the digest.
    pub fn commit<E: EntropySource>(roller: &mut FairRoller<E>) -> Result<(CommitDigest, Self)> {
        let value = roller.uniform_index(usize::from(SECRET_DOMAIN))?;
        let secret = Secret(value as u8);
        let key = HmacKey::random(roller)?;
        let digest = keyed_hash(&key, secret);
        debug!(%digest, "commitment sealed");
        Ok((
            digest,
            Self {
                secret,
                key,
                digest,
            },
        ))
    }

    pub fn digest(&self) -> &CommitDigest {
        &self.digest
    }

    /// Secret for deciding turn order inside the session, never exported
    pub(crate) fn secret(&self) -> Secret {
        self.secret
    }

    /// Disclose the secret and key. The commitment is consumed.
    pub fn reveal(self) -> Reveal {
        Reveal {
            secret: self.secret,
            key: self.key,
        }
    }
}

impl fmt::Debug for SealedCommitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SealedCommitment")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}
