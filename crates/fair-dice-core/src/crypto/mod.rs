//! Cryptographic commitment for the fair dice protocol.
//!
//! This module provides:
//! - Secret, HmacKey and CommitDigest for the commit-reveal scheme
//! - SealedCommitment, the handle that withholds secret and key until reveal
//! - keyed_hash, the HMAC-SHA256 verifiers recompute

mod commitment;
mod hex_serde;

pub use commitment::{
    keyed_hash, CommitDigest, HmacKey, Reveal, SealedCommitment, Secret, DIGEST_LEN, KEY_LEN,
    SECRET_DOMAIN,
};
