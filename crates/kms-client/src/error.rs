use displaydoc::Display;
use thiserror::Error;

#[derive(Debug, Display, Error)]
pub enum Error {
    /// KMS GetPublicKey request failed: {0}
    KeyFetch(String),
    /// KMS Sign request failed: {0}
    Sign(String),
    /// KMS response carried no public key
    MissingPublicKey,
    /// KMS response carried no signature
    MissingSignature,
    /// malformed public key in KMS response: {0}
    InvalidPublicKey(String),
    /// malformed signature in KMS response: {0}
    InvalidSignature(String),
}
