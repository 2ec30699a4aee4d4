use tezos_kms_client::{AwsKmsClient, KmsKeyClient};
use tracing::debug;

/// Sentinel held by the fields a KMS-backed key can never populate.
pub const NOT_AVAILABLE: &str = "NOT AVAILABLE";

/// Where the secret half of a key-pair lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyStoreType {
    /// The secret key is held by a hardware-backed remote service.
    Hardware,
}

/// Curve a key-pair was generated over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyStoreCurve {
    Secp256k1,
}

/// The public identity of a key-pair, in the shape a Tezos client expects.
pub trait KeyStore {
    /// Base58check rendering of the public key.
    fn public_key(&self) -> &str;

    /// Base58check rendering of the public key hash.
    fn public_key_hash(&self) -> &str;

    fn store_type(&self) -> KeyStoreType;

    fn curve(&self) -> KeyStoreCurve;

    /// Derivation path, for stores that derive keys from a seed.
    fn derivation_path(&self) -> Option<&str>;

    /// The secret key, for stores that can reveal it.
    fn secret_key(&self) -> &str;

    /// The seed, for stores that can reveal it.
    fn seed(&self) -> &str;
}

/// A [`KeyStore`] wrapping a secp256k1 key-pair held in AWS KMS.
///
/// Constructed exclusively through the asynchronous factories
/// ([`KmsKeyStore::from_key`], [`KmsKeyStore::resolve`]) so that `public_key`
/// and `public_key_hash` always originate from the remote service; there is
/// no way to assemble one from arbitrary values. Immutable once built.
///
/// `secret_key` and `seed` permanently hold the [`NOT_AVAILABLE`] sentinel.
/// They never contain key material, and treating them as real keys is a
/// caller bug.
#[derive(Clone, Debug)]
pub struct KmsKeyStore {
    public_key: String,
    public_key_hash: String,
}

impl KmsKeyStore {
    /// Resolves a KMS key in `region` into a `KmsKeyStore`.
    ///
    /// Builds a private [`AwsKmsClient`] scoped to `key_id` and performs the
    /// remote fetches through it. Each invocation re-queries the service;
    /// nothing is cached.
    pub async fn from_key(
        key_id: impl Into<String>,
        region: impl Into<String>,
    ) -> Result<Self, tezos_kms_client::Error> {
        let client = AwsKmsClient::connect(key_id, region).await;
        Self::resolve(&client).await
    }

    /// Resolves the key `client` is scoped to into a `KmsKeyStore`.
    ///
    /// Performs two remote fetches (public key, then public key hash). Any
    /// client error propagates unchanged as the factory's failure.
    pub async fn resolve<C: KmsKeyClient>(client: &C) -> Result<Self, C::Error> {
        debug!("resolving public identity from remote key client");
        let public_key = client.public_key().await?;
        let public_key_hash = client.public_key_hash().await?;
        Ok(Self::new(public_key, public_key_hash))
    }

    // Only reachable with values fetched by the factories above.
    fn new(public_key: String, public_key_hash: String) -> Self {
        Self {
            public_key,
            public_key_hash,
        }
    }
}

impl KeyStore for KmsKeyStore {
    fn public_key(&self) -> &str {
        &self.public_key
    }

    fn public_key_hash(&self) -> &str {
        &self.public_key_hash
    }

    fn store_type(&self) -> KeyStoreType {
        KeyStoreType::Hardware
    }

    fn curve(&self) -> KeyStoreCurve {
        KeyStoreCurve::Secp256k1
    }

    fn derivation_path(&self) -> Option<&str> {
        None
    }

    fn secret_key(&self) -> &str {
        NOT_AVAILABLE
    }

    fn seed(&self) -> &str {
        NOT_AVAILABLE
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq, Eq)]
    #[error("stub remote failure: {0}")]
    struct StubError(&'static str);

    #[derive(Default)]
    struct StubClient {
        fail: Option<&'static str>,
        fail_hash_only: bool,
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl KmsKeyClient for StubClient {
        type Error = StubError;

        async fn public_key(&self) -> Result<String, StubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.fail {
                Some(msg) => Err(StubError(msg)),
                None => Ok("sppk-from-remote".to_string()),
            }
        }

        async fn public_key_hash(&self) -> Result<String, StubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_hash_only {
                return Err(StubError("hash fetch failed"));
            }
            match self.fail {
                Some(msg) => Err(StubError(msg)),
                None => Ok("tz2-from-remote".to_string()),
            }
        }

        async fn sign_operation(&self, bytes: &[u8]) -> Result<Vec<u8>, StubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(bytes.to_vec())
        }
    }

    #[tokio::test]
    async fn resolve_uses_remote_values_verbatim() {
        let client = StubClient::default();
        let keystore = KmsKeyStore::resolve(&client).await.unwrap();

        assert_eq!(keystore.public_key(), "sppk-from-remote");
        assert_eq!(keystore.public_key_hash(), "tz2-from-remote");
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn resolve_never_caches() {
        let client = StubClient::default();
        KmsKeyStore::resolve(&client).await.unwrap();
        KmsKeyStore::resolve(&client).await.unwrap();

        assert_eq!(client.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn secret_fields_stay_sentinels() {
        let keystore = KmsKeyStore::resolve(&StubClient::default()).await.unwrap();

        assert_eq!(keystore.secret_key(), NOT_AVAILABLE);
        assert_eq!(keystore.seed(), NOT_AVAILABLE);
        assert_eq!(keystore.derivation_path(), None);
    }

    #[tokio::test]
    async fn classification_is_fixed() {
        let keystore = KmsKeyStore::resolve(&StubClient::default()).await.unwrap();

        assert_eq!(keystore.store_type(), KeyStoreType::Hardware);
        assert_eq!(keystore.curve(), KeyStoreCurve::Secp256k1);
    }

    #[tokio::test]
    async fn remote_errors_propagate_unchanged() {
        let client = StubClient {
            fail: Some("key not found"),
            ..Default::default()
        };

        let err = KmsKeyStore::resolve(&client).await.unwrap_err();
        assert_eq!(err, StubError("key not found"));
    }

    #[tokio::test]
    async fn hash_fetch_errors_propagate_after_key_fetch_succeeds() {
        let client = StubClient {
            fail_hash_only: true,
            ..Default::default()
        };

        let err = KmsKeyStore::resolve(&client).await.unwrap_err();
        assert_eq!(err, StubError("hash fetch failed"));
        assert_eq!(client.calls.load(Ordering::SeqCst), 2);
    }
}
