//! Serialize fixed-size byte arrays as hex strings.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub fn serialize<S: Serializer, const N: usize>(bytes: &[u8; N], s: S) -> Result<S::Ok, S::Error> {
    hex::encode(bytes).serialize(s)
}

pub fn deserialize<'de, D: Deserializer<'de>, const N: usize>(d: D) -> Result<[u8; N], D::Error> {
    let hex_str = String::deserialize(d)?;
    let bytes = hex::decode(&hex_str).map_err(serde::de::Error::custom)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| serde::de::Error::custom(format!("expected {} bytes", N)))
}
