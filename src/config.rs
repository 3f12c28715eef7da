//! Pipeline parameters and eager validation.

use serde::{Deserialize, Serialize};

use crate::error::MixError;

/// Parameters for one full run of the mixing pipeline.
///
/// Hex-length fields count hex characters (two per byte) and must be even.
/// `final_div` is kept from the reference parameterization and must be
/// non-zero even though the division it feeds is dead work (see
/// [`crate::pipeline::mix`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of full passes.
    pub loops: u32,
    /// Repetitions of the randomized multiply step.
    pub mul_times: u32,
    /// Repetitions of the randomized add step.
    pub add_times: u32,
    /// Hex length of the SHAKE-256 digests.
    pub hash1_len: usize,
    /// Iterations of the repeated-hashing step.
    pub hash1_loops: u32,
    /// Hex length of the SHAKE-128 digests.
    pub hash2_len: usize,
    /// Characters deleted from the penultimate digest.
    pub remove_chars: usize,
    /// Hex length of the final SHAKE-256 digest.
    pub hash4_len: usize,
    /// Final divisor; must be non-zero.
    pub final_div: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            loops: 1,
            mul_times: 1,
            add_times: 1,
            hash1_len: 1024,
            hash1_loops: 10,
            hash2_len: 512,
            remove_chars: 10,
            hash4_len: 2048,
            final_div: 8,
        }
    }
}

impl PipelineConfig {
    /// Validate the configuration.
    ///
    /// Called by [`crate::pipeline::mix`] before any random draw, so a bad
    /// configuration never consumes entropy.
    pub fn validate(&self) -> Result<(), MixError> {
        if self.loops == 0 {
            return Err(MixError::InvalidConfig("loops must be at least 1".into()));
        }
        if self.hash1_loops == 0 {
            return Err(MixError::InvalidConfig(
                "hash1_loops must be at least 1".into(),
            ));
        }
        for (name, len) in [
            ("hash1_len", self.hash1_len),
            ("hash2_len", self.hash2_len),
            ("hash4_len", self.hash4_len),
        ] {
            if len < 2 || len % 2 != 0 {
                return Err(MixError::InvalidConfig(format!(
                    "{name} must be an even number of hex characters, got {len}"
                )));
            }
        }
        if self.final_div == 0 {
            return Err(MixError::InvalidConfig("final_div must be non-zero".into()));
        }
        Ok(())
    }
}
