//! State Hashing for Verification
//!
//! FNV-1a-32 over explicit little-endian byte serialisations. The
//! per-tick hash feeds a running chain hash; the chain value after
//! the terminating tick (plus the result record) is the battle's
//! anti-cheat signature. Field order is part of the wire contract:
//! any re-ordering is a rule-set change.

use serde::{Deserialize, Serialize};

use super::fixed::Fixed;
use super::vec2::FixedVec2;

/// FNV-1a 32-bit offset basis.
pub const FNV1A_OFFSET_BASIS: u32 = 0x811c9dc5;

/// FNV-1a 32-bit prime.
pub const FNV1A_PRIME: u32 = 0x01000193;

/// Incremental FNV-1a-32 hasher with typed little-endian updates.
///
/// Update order is critical: the same fields in a different order
/// produce a different hash, which the verifier treats as a forgery.
#[derive(Clone, Debug)]
pub struct Fnv1a32 {
    state: u32,
}

impl Default for Fnv1a32 {
    fn default() -> Self {
        Self::new()
    }
}

impl Fnv1a32 {
    /// Fresh hasher at the offset basis.
    pub fn new() -> Self {
        Self {
            state: FNV1A_OFFSET_BASIS,
        }
    }

    /// Update with raw bytes.
    #[inline]
    pub fn update(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.state ^= u32::from(byte);
            self.state = self.state.wrapping_mul(FNV1A_PRIME);
        }
    }

    /// Update with a u8 value.
    #[inline]
    pub fn update_u8(&mut self, value: u8) {
        self.update(&[value]);
    }

    /// Update with a u32 value (little-endian).
    #[inline]
    pub fn update_u32(&mut self, value: u32) {
        self.update(&value.to_le_bytes());
    }

    /// Update with an i32 value (little-endian).
    #[inline]
    pub fn update_i32(&mut self, value: i32) {
        self.update(&value.to_le_bytes());
    }

    /// Update with a Fixed value.
    #[inline]
    pub fn update_fixed(&mut self, value: Fixed) {
        self.update_i32(value);
    }

    /// Update with a FixedVec2 (x then y).
    #[inline]
    pub fn update_vec2(&mut self, value: FixedVec2) {
        self.update_fixed(value.x);
        self.update_fixed(value.y);
    }

    /// Update with a boolean.
    #[inline]
    pub fn update_bool(&mut self, value: bool) {
        self.update_u8(value as u8);
    }

    /// Finalize and return the 32-bit hash.
    #[inline]
    pub fn finish(self) -> u32 {
        self.state
    }
}

/// Running chain hash over per-tick hashes.
///
/// The chain is itself an FNV-1a-32 stream: it absorbs the rule-set
/// version first, then each tick hash in order, then the result
/// record after termination. Re-running the same inputs reproduces
/// the identical chain value or the claim is rejected.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainHash {
    state: u32,
}

impl ChainHash {
    /// Start a chain bound to a rule-set version.
    pub fn new(ruleset_version: u32) -> Self {
        let mut hasher = Fnv1a32::new();
        hasher.update_u32(ruleset_version);
        Self {
            state: hasher.finish(),
        }
    }

    /// Fold a 32-bit word (e.g. a tick hash) into the chain.
    #[inline]
    pub fn absorb(&mut self, word: u32) {
        let mut hasher = Fnv1a32 { state: self.state };
        hasher.update_u32(word);
        self.state = hasher.finish();
    }

    /// Fold a single byte into the chain. Tag fields (winner, win
    /// reason) are one byte on the wire, not a widened word.
    #[inline]
    pub fn absorb_u8(&mut self, byte: u8) {
        let mut hasher = Fnv1a32 { state: self.state };
        hasher.update_u8(byte);
        self.state = hasher.finish();
    }

    /// Current chain value.
    #[inline]
    pub fn value(&self) -> u32 {
        self.state
    }
}

/// One-shot FNV-1a-32 of a byte slice.
pub fn hash_bytes(data: &[u8]) -> u32 {
    let mut hasher = Fnv1a32::new();
    hasher.update(data);
    hasher.finish()
}

// =============================================================================
// TESTS
// =============================================================================
