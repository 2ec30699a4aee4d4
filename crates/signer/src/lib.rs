//! Tezos keystore and signer adapters for keys held in AWS KMS.
//!
//! Two independent adapters over the same remote key:
//!
//! - [`KmsKeyStore`] resolves a KMS key into an immutable public identity in
//!   the shape a Tezos client expects ([`KeyStore`]).
//! - [`KmsSigner`] signs pre-serialized operation bytes by forwarding them to
//!   the remote service ([`Signer`]).
//!
//! Neither adapter ever sees private key material; both are stateless per
//! call and safe to use from concurrent tasks.

pub use error::SignerError;
pub use keystore::{KeyStore, KeyStoreCurve, KeyStoreType, KmsKeyStore, NOT_AVAILABLE};
pub use signer::{KmsSigner, Signer, SignerCurve};
pub use tezos_kms_client::{AwsKmsClient, KmsKeyClient};

pub mod error;
pub mod keystore;
pub mod signer;
