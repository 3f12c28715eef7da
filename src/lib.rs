//! # Shakemix
//!
//! A SHAKE-based entropy mixing pipeline that reduces an integer seed to a
//! single byte in `[0, 255]`.
//!
//! The pipeline threads one arbitrary-precision value through a fixed
//! sequence of randomized arithmetic, variable-length SHAKE digests, and
//! lossy string reductions (hex reversal, shuffling, truncation, character
//! deletion). Fresh randomness is injected at several steps, so runs are
//! deliberately non-reproducible unless a deterministic [`EntropySource`]
//! is supplied.
//!
//! # Features
//!
//! - **Injected randomness**: the [`EntropySource`] trait lets tests drive
//!   the pipeline with a scripted source while production uses the OS CSPRNG
//! - **Variable-length digests**: SHAKE-128 and SHAKE-256 behind one wrapper
//!   with hex-character-length requests
//! - **Seed endpoint**: a localhost HTTP endpoint hands out fresh 64-bit
//!   seeds to callers presenting a shared key
//!
//! # Example
//!
//! ```rust
//! use num_bigint::BigUint;
//! use shakemix::{mix, OsEntropy, PipelineConfig};
//!
//! let cfg = PipelineConfig {
//!     hash1_len: 64,
//!     hash1_loops: 2,
//!     hash2_len: 32,
//!     hash4_len: 64,
//!     ..PipelineConfig::default()
//! };
//! let byte = mix(BigUint::from(7u32), &cfg, &mut OsEntropy).unwrap();
//! println!("derived byte: {byte}");
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod random;
pub mod rpc;
pub mod xof;

// Convenience re-exports
pub use config::PipelineConfig;
pub use error::MixError;
pub use pipeline::mix;
pub use random::{EntropySource, OsEntropy};
pub use xof::{xof_hex, XofVariant};

#[cfg(test)]
mod tests;
