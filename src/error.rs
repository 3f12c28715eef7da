//! Error kinds for the mixing pipeline and seed acquisition.

use thiserror::Error;

/// Errors surfaced by the pipeline, its configuration, and seed acquisition.
///
/// Every kind is fatal to the invocation that produced it; nothing is
/// retried internally.
#[derive(Debug, Error)]
pub enum MixError {
    /// Rejected configuration, caught before any entropy is consumed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A non-hex or empty string reached the hex parser. Internal
    /// invariant; the empty-string-to-zero guard in the deletion step
    /// keeps this unreachable in a correct build.
    #[error("malformed digest: {0}")]
    MalformedDigest(String),

    /// The seed endpoint rejected the shared key. Never retried.
    #[error("seed endpoint rejected the API key")]
    Authentication,

    /// Network, timeout, or protocol failure while acquiring a seed.
    #[error("failed to fetch seed: {0}")]
    SeedFetch(String),
}

impl MixError {
    /// Process exit code for the CLI; each kind maps to a distinct code.
    pub fn exit_code(&self) -> i32 {
        match self {
            MixError::InvalidConfig(_) => 2,
            MixError::SeedFetch(_) => 3,
            MixError::Authentication => 4,
            MixError::MalformedDigest(_) => 5,
        }
    }
}
