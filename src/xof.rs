//! SHAKE extendable-output digests with hex-character-length requests.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

/// The two SHAKE variants used by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XofVariant {
    /// SHAKE-128 (higher rate, 128-bit security level).
    Shake128,
    /// SHAKE-256 (lower rate, 256-bit security level).
    Shake256,
}

/// SHAKE digest of `input`, returned as `out_chars` lowercase hex characters.
///
/// `out_chars` counts hex characters, two per byte; an odd request floors
/// to the next even count, silently dropping the fractional half-byte.
/// Deterministic for fixed variant and input.
pub fn xof_hex(variant: XofVariant, input: &[u8], out_chars: usize) -> String {
    let mut out = vec![0u8; out_chars / 2];
    match variant {
        XofVariant::Shake128 => {
            let mut hasher = Shake128::default();
            Update::update(&mut hasher, input);
            XofReader::read(&mut hasher.finalize_xof(), &mut out);
        }
        XofVariant::Shake256 => {
            let mut hasher = Shake256::default();
            Update::update(&mut hasher, input);
            XofReader::read(&mut hasher.finalize_xof(), &mut out);
        }
    }
    hex::encode(out)
}
