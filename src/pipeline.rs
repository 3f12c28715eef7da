//! The mixing pipeline.
//!
//! One arbitrary-precision value is threaded through ten ordered sub-steps
//! per pass: randomized multiply/add, repeated SHAKE-256 hashing, a single
//! SHAKE-128 hash, integer square root, hex reversal, character shuffling,
//! random character deletion, and a final truncate-and-reduce. Before every
//! hash the value is encoded as its minimal big-endian byte string (one
//! zero byte for zero), which fixes the digest input exactly.

use num_bigint::BigUint;
use num_integer::Roots;
use num_traits::{ToPrimitive, Zero};

use crate::config::PipelineConfig;
use crate::error::MixError;
use crate::random::EntropySource;
use crate::xof::{xof_hex, XofVariant};

/// Hard ceiling on the hex characters kept from the final digest.
const FINAL_HEX_CEILING: usize = 4096;

/// Parse a non-empty hex string into an unsigned big integer.
fn parse_hex(digest: &str) -> Result<BigUint, MixError> {
    if digest.is_empty() {
        return Err(MixError::MalformedDigest("empty hex string".into()));
    }
    BigUint::parse_bytes(digest.as_bytes(), 16)
        .ok_or_else(|| MixError::MalformedDigest(format!("non-hex digest {digest:?}")))
}

/// Multiply by a uniform 32-bit value plus one, `times` times.
///
/// The `+ 1` keeps every multiplier non-zero.
fn multiply_by_random(mut value: BigUint, times: u32, rng: &mut dyn EntropySource) -> BigUint {
    for _ in 0..times {
        value *= rng.below(1u64 << 32) + 1;
    }
    value
}

/// Add a uniform 32-bit value, `times` times.
fn add_random(mut value: BigUint, times: u32, rng: &mut dyn EntropySource) -> BigUint {
    for _ in 0..times {
        value += rng.below(1u64 << 32);
    }
    value
}

/// Encode, digest, reparse; repeated `loops` times.
fn repeated_hashing(
    mut value: BigUint,
    hash_len_chars: usize,
    loops: u32,
    variant: XofVariant,
) -> Result<BigUint, MixError> {
    for _ in 0..loops {
        let digest = xof_hex(variant, &value.to_bytes_be(), hash_len_chars);
        value = parse_hex(&digest)?;
    }
    Ok(value)
}

/// Delete `n` uniformly chosen characters from `s`, one at a time from the
/// shrinking sequence. Deleting `len(s)` or more characters yields the
/// empty string, never an error.
pub(crate) fn remove_random_chars(s: &str, n: usize, rng: &mut dyn EntropySource) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    for _ in 0..n.min(chars.len()) {
        let idx = rng.index(chars.len());
        chars.remove(idx);
    }
    chars.into_iter().collect()
}

/// Run the full mixing pipeline: `cfg.loops` passes over `initial`,
/// returning a value in `[0, 255]`.
///
/// The configuration is validated before any entropy is consumed. True
/// randomness is injected at several steps, so two runs only agree when
/// `rng` is deterministic.
pub fn mix(
    initial: BigUint,
    cfg: &PipelineConfig,
    rng: &mut dyn EntropySource,
) -> Result<u8, MixError> {
    cfg.validate()?;

    let mut value = initial;
    for _ in 0..cfg.loops {
        // Randomized multiply and add.
        value = multiply_by_random(value, cfg.mul_times, rng);
        value = add_random(value, cfg.add_times, rng);

        // Repeated SHAKE-256, then a single SHAKE-128.
        value = repeated_hashing(value, cfg.hash1_len, cfg.hash1_loops, XofVariant::Shake256)?;
        value = repeated_hashing(value, cfg.hash2_len, 1, XofVariant::Shake128)?;

        // Integer square root, then truncating division by four.
        value = value.sqrt() / 4u32;

        // Hash, reverse the hex characters, reparse.
        let h3 = xof_hex(XofVariant::Shake256, &value.to_bytes_be(), cfg.hash1_len);
        let reversed: String = h3.chars().rev().collect();
        value = parse_hex(&reversed)?;

        // Hash once more with SHAKE-256.
        let h4 = xof_hex(XofVariant::Shake256, &value.to_bytes_be(), cfg.hash1_len);
        value = parse_hex(&h4)?;

        // Shuffle the characters of h4 and rehash a prefix of them.
        // The prefix is 2 * hash2_len hex characters, decoding to exactly
        // hash2_len bytes; the length parameter acts as a byte count here,
        // unlike everywhere else. Kept as the reference behaves.
        let mut shuffled = h4.into_bytes();
        rng.shuffle(&mut shuffled);
        let keep = (2 * cfg.hash2_len).min(shuffled.len());
        let shuffled_bytes =
            hex::decode(&shuffled[..keep]).map_err(|e| MixError::MalformedDigest(e.to_string()))?;
        let h5 = xof_hex(XofVariant::Shake128, &shuffled_bytes, cfg.hash2_len);
        value = parse_hex(&h5)?;

        // Delete random characters, then scale by a random 16-bit value.
        let trimmed = remove_random_chars(&h5, cfg.remove_chars, rng);
        value = if trimmed.is_empty() {
            // Deleting every character is legal and means zero.
            BigUint::zero()
        } else {
            parse_hex(&trimmed)?
        };
        value *= rng.below(1u64 << 16) + 1;

        // Final digest, truncated to the hex ceiling, reduced mod 256.
        // The reference also divides by final_div at this point, but that
        // quotient is discarded by the truncation below; the division is
        // elided (final_div stays validated for compatibility).
        let h6 = xof_hex(XofVariant::Shake256, &value.to_bytes_be(), cfg.hash4_len);
        let truncated = &h6[..h6.len().min(FINAL_HEX_CEILING)];
        value = parse_hex(truncated)? % 256u32;
    }

    value
        .to_u8()
        .ok_or_else(|| MixError::MalformedDigest("reduced value exceeds one byte".into()))
}
