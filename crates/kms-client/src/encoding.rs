//! Tezos base58check renderings for secp256k1 key material.

use blake2::{
    digest::consts::{U20, U32},
    Blake2b, Digest,
};

/// Prefix of a base58check-rendered secp256k1 public key (`sppk…`).
pub const PUBLIC_KEY_PREFIX: [u8; 4] = [3, 254, 226, 86];

/// Prefix of a base58check-rendered secp256k1 public key hash (`tz2…`).
pub const PUBLIC_KEY_HASH_PREFIX: [u8; 3] = [6, 161, 161];

/// Base58check rendering of `prefix || payload`.
pub fn base58check(prefix: &[u8], payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(prefix.len() + payload.len());
    data.extend_from_slice(prefix);
    data.extend_from_slice(payload);
    bs58::encode(data).with_check().into_string()
}

/// The 20-byte blake2b digest a public key hash is derived from.
pub fn public_key_hash_digest(compressed_key: &[u8]) -> [u8; 20] {
    Blake2b::<U20>::digest(compressed_key).into()
}

/// The 32-byte blake2b digest signed in place of the raw operation bytes.
pub fn operation_digest(bytes: &[u8]) -> [u8; 32] {
    Blake2b::<U32>::digest(bytes).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_key_rendering_carries_sppk_prefix() {
        for payload in [[0u8; 33], [0xff; 33]] {
            let encoded = base58check(&PUBLIC_KEY_PREFIX, &payload);
            assert!(encoded.starts_with("sppk"), "got {encoded}");
        }
    }

    #[test]
    fn public_key_hash_rendering_carries_tz2_prefix() {
        for payload in [[0u8; 20], [0xff; 20]] {
            let encoded = base58check(&PUBLIC_KEY_HASH_PREFIX, &payload);
            assert!(encoded.starts_with("tz2"), "got {encoded}");
        }
    }

    #[test]
    fn base58check_round_trips_through_checked_decode() {
        let payload = [7u8; 33];
        let encoded = base58check(&PUBLIC_KEY_PREFIX, &payload);

        let decoded = bs58::decode(&encoded).with_check(None).into_vec().unwrap();
        assert_eq!(&decoded[..4], &PUBLIC_KEY_PREFIX);
        assert_eq!(&decoded[4..], &payload);
    }

    #[test]
    fn operation_digest_is_input_sensitive() {
        assert_eq!(operation_digest(b"tx-1"), operation_digest(b"tx-1"));
        assert_ne!(operation_digest(b"tx-1"), operation_digest(b"tx-2"));
    }

    #[test]
    fn public_key_hash_digest_differs_from_operation_digest_domain() {
        let key = [2u8; 33];
        let pkh = public_key_hash_digest(&key);
        let op = operation_digest(&key);
        assert_ne!(&op[..20], &pkh[..]);
    }
}
