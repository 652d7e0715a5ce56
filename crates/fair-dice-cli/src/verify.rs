//! `fair-dice verify`: recompute a commitment from its revealed parts.

use crate::error::CliError;
use clap::Args;
use fair_dice_core::crypto::{DIGEST_LEN, KEY_LEN};
use fair_dice_core::{keyed_hash, CommitDigest, HmacKey, Secret};
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Commit digest shown before the choice (hex)
    #[arg(long)]
    pub digest: String,

    /// Revealed HMAC key (hex)
    #[arg(long)]
    pub key: String,

    /// Revealed first-move secret
    #[arg(long)]
    pub secret: u8,
}

/// Returns whether the digest matches
pub fn run<W: Write>(args: &VerifyArgs, out: &mut W) -> Result<bool, CliError> {
    let digest = CommitDigest::from_bytes(decode_hex::<DIGEST_LEN>("digest", &args.digest)?);
    let key = HmacKey::from_bytes(decode_hex::<KEY_LEN>("key", &args.key)?);
    let secret = Secret::new(args.secret);

    let verified = digest.verify(&key, secret);
    info!(%digest, verified, "commitment checked");
    if verified {
        writeln!(out, "OK: HMAC-SHA256(key, \"{}\") = {}", secret, digest)?;
    } else {
        writeln!(
            out,
            "MISMATCH: HMAC-SHA256(key, \"{}\") = {}, commit was {}",
            secret,
            keyed_hash(&key, secret),
            digest
        )?;
    }
    Ok(verified)
}

fn decode_hex<const N: usize>(field: &'static str, text: &str) -> Result<[u8; N], CliError> {
    let bytes = hex::decode(text.trim()).map_err(|source| CliError::InvalidHex { field, source })?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CliError::WrongLength {
            field,
            expected: N,
            found: bytes.len(),
        })
}
