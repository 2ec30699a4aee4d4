use std::error::Error as StdError;

use tezos_kms_client::{AwsKmsClient, KmsKeyClient};

use crate::SignerError;

/// Curve identifier reported by a [`Signer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignerCurve {
    Secp256k1,
}

/// Signing capability in the shape a Tezos client expects.
///
/// Backends differ in what they can sign: a software key supports every
/// operation, while a hardware- or remote-held key may only support a strict
/// subset and reports the rest as unsupported errors instead of attempting
/// them.
#[async_trait::async_trait]
pub trait Signer: Send + Sync {
    type Error: StdError + Send + Sync + 'static;

    /// The curve this signer produces signatures over.
    fn curve(&self) -> SignerCurve;

    /// Signs a pre-serialized operation byte sequence.
    async fn sign_operation(&self, bytes: &[u8]) -> Result<Vec<u8>, Self::Error>;

    /// Signs a human-readable message.
    async fn sign_text(&self, message: &str) -> Result<Vec<u8>, Self::Error>;

    /// Signs the hash of a human-readable message.
    async fn sign_text_hash(&self, message: &str) -> Result<Vec<u8>, Self::Error>;
}

/// A [`Signer`] backed by a secp256k1 key-pair held in AWS KMS.
///
/// `sign_operation` forwards the bytes unchanged to the remote service and
/// returns the signature bytes unchanged; one remote call per invocation.
/// `sign_text` and `sign_text_hash` fail immediately with
/// [`SignerError::Unsupported`] without touching the service: a KMS-held key
/// only signs pre-built operation byte sequences.
///
/// Holds no per-call state, so one instance can sign concurrently issued
/// operations; completions are unordered.
#[derive(Clone, Debug)]
pub struct KmsSigner<C = AwsKmsClient> {
    client: C,
}

impl KmsSigner {
    /// Builds a signer for a KMS key in `region`, with a private
    /// [`AwsKmsClient`] scoped to `key_id`.
    pub async fn from_key(key_id: impl Into<String>, region: impl Into<String>) -> Self {
        Self::new(AwsKmsClient::connect(key_id, region).await)
    }
}

impl<C> KmsSigner<C> {
    /// Wraps an existing remote key client.
    pub fn new(client: C) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl<C: KmsKeyClient> Signer for KmsSigner<C> {
    type Error = SignerError<C::Error>;

    fn curve(&self) -> SignerCurve {
        SignerCurve::Secp256k1
    }

    async fn sign_operation(&self, bytes: &[u8]) -> Result<Vec<u8>, Self::Error> {
        self.client
            .sign_operation(bytes)
            .await
            .map_err(SignerError::Client)
    }

    async fn sign_text(&self, _message: &str) -> Result<Vec<u8>, Self::Error> {
        Err(SignerError::Unsupported("sign_text"))
    }

    async fn sign_text_hash(&self, _message: &str) -> Result<Vec<u8>, Self::Error> {
        Err(SignerError::Unsupported("sign_text_hash"))
    }
}
