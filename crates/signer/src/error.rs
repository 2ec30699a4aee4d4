use thiserror::Error;

/// Errors produced by the KMS-backed adapters.
///
/// Remote failures pass through the `Client` variant unchanged; the adapters
/// perform no retries, no recovery and no further classification.
#[derive(Debug, Error)]
pub enum SignerError<E> {
    /// A failure reported by the remote key client.
    #[error(transparent)]
    Client(E),
    /// The requested capability is not available for a KMS-held key.
    #[error("unsupported operation: cannot use `{0}` with a KMS-held key")]
    Unsupported(&'static str),
}
