#![doc = include_str!("../README.md")]
#![warn(
    clippy::checked_conversions,
    clippy::panic,
    clippy::panic_in_result_fn,
    trivial_casts,
    trivial_numeric_casts,
    rust_2018_idioms,
    unused_lifetimes,
    unused_import_braces,
    unused_qualifications
)]

use std::error::Error as StdError;

pub use aws::AwsKmsClient;
pub use error::Error;

pub mod aws;
pub mod encoding;
pub mod error;

/// Abstraction over a remote service holding a secp256k1 key-pair.
///
/// This trait defines the operations needed against a remotely held Tezos key:
/// resolving its public identity (public key and public key hash) and signing
/// pre-serialized operation bytes. The secret key is never exposed through any
/// of these operations.
///
/// Implementations are stateless per call; concurrent invocations are
/// independent round-trips with no shared mutable state.
#[async_trait::async_trait]
pub trait KmsKeyClient: Send + Sync {
    /// The error type returned by remote key operations.
    type Error: StdError + Send + Sync + 'static;

    /// Fetches the public key in its base58check rendering (`sppk…`).
    async fn public_key(&self) -> Result<String, Self::Error>;

    /// Fetches the public key hash (`tz2…`), the base58check rendering of the
    /// 20-byte blake2b digest of the compressed public key.
    async fn public_key_hash(&self) -> Result<String, Self::Error>;

    /// Signs the 32-byte blake2b digest of `bytes` and returns the raw 64-byte
    /// `r || s` signature. The payload is never inspected locally.
    async fn sign_operation(&self, bytes: &[u8]) -> Result<Vec<u8>, Self::Error>;
}
