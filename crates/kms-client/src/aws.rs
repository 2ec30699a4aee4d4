use aws_config::{BehaviorVersion, Region};
use aws_sdk_kms::{
    primitives::Blob,
    types::{MessageType, SigningAlgorithmSpec},
    Client,
};
use k256::{
    ecdsa::{Signature, VerifyingKey},
    pkcs8::DecodePublicKey,
};
use tracing::debug;

use crate::{encoding, Error, KmsKeyClient};

/// A [`KmsKeyClient`] backed by a secp256k1 key-pair held in AWS KMS.
///
/// The key must have been created with `ECC_SECG_P256K1` key spec and
/// `SIGN_VERIFY` usage. Every operation is a single KMS request; nothing is
/// cached or retried here, so each call re-queries the service.
#[derive(Clone, Debug)]
pub struct AwsKmsClient {
    client: Client,
    key_id: String,
}

impl AwsKmsClient {
    /// Wrap an already-configured SDK client.
    pub fn new(client: Client, key_id: impl Into<String>) -> Self {
        Self {
            client,
            key_id: key_id.into(),
        }
    }

    /// Load the default AWS config chain for `region` and build a client
    /// scoped to `key_id`.
    pub async fn connect(key_id: impl Into<String>, region: impl Into<String>) -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;
        Self::new(Client::new(&config), key_id)
    }

    /// The KMS key id this client is scoped to.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    async fn fetch_public_key_der(&self) -> Result<Vec<u8>, Error> {
        debug!(key_id = %self.key_id, "fetching public key from KMS");
        let output = self
            .client
            .get_public_key()
            .key_id(&self.key_id)
            .send()
            .await
            .map_err(|e| Error::KeyFetch(e.to_string()))?;
        let der = output.public_key.ok_or(Error::MissingPublicKey)?;
        Ok(der.into_inner())
    }
}

#[async_trait::async_trait]
impl KmsKeyClient for AwsKmsClient {
    type Error = Error;

    async fn public_key(&self) -> Result<String, Error> {
        let der = self.fetch_public_key_der().await?;
        let compressed = compressed_public_key(&der)?;
        Ok(encoding::base58check(
            &encoding::PUBLIC_KEY_PREFIX,
            &compressed,
        ))
    }

    async fn public_key_hash(&self) -> Result<String, Error> {
        let der = self.fetch_public_key_der().await?;
        let compressed = compressed_public_key(&der)?;
        Ok(encoding::base58check(
            &encoding::PUBLIC_KEY_HASH_PREFIX,
            &encoding::public_key_hash_digest(&compressed),
        ))
    }

    async fn sign_operation(&self, bytes: &[u8]) -> Result<Vec<u8>, Error> {
        let digest = encoding::operation_digest(bytes);
        debug!(key_id = %self.key_id, digest = %hex::encode(digest), "signing operation digest");
        let output = self
            .client
            .sign()
            .key_id(&self.key_id)
            .signing_algorithm(SigningAlgorithmSpec::EcdsaSha256)
            .message_type(MessageType::Digest)
            .message(Blob::new(digest.to_vec()))
            .send()
            .await
            .map_err(|e| Error::Sign(e.to_string()))?;
        let der = output.signature.ok_or(Error::MissingSignature)?;
        raw_signature(der.as_ref())
    }
}

/// Compresses the DER/SPKI public key returned by KMS to its 33-byte SEC1 form.
fn compressed_public_key(der: &[u8]) -> Result<Vec<u8>, Error> {
    let key = VerifyingKey::from_public_key_der(der)
        .map_err(|e| Error::InvalidPublicKey(e.to_string()))?;
    Ok(key.to_encoded_point(true).as_bytes().to_vec())
}

/// Converts the DER signature returned by KMS to its raw 64-byte `r || s`
/// form, normalizing `s` to the low half of the curve order.
fn raw_signature(der: &[u8]) -> Result<Vec<u8>, Error> {
    let signature =
        Signature::from_der(der).map_err(|e| Error::InvalidSignature(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    Ok(signature.to_bytes().to_vec())
}
