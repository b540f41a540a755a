//! Key hashing for [`HashTable`](crate::HashTable).
//!
//! Keys are `u32`, so the default hasher is a fixed three-round
//! multiply/xorshift mix rather than a general purpose byte hasher. It is
//! deterministic and unseeded: the same key always lands on the same hash,
//! across growth and across tables. It makes no claim of resistance to
//! adversarial input.

use core::hash::BuildHasher;
use core::hash::Hasher;
use core::num::NonZeroU32;

const MIX_CONSTANT: u32 = 0x045d_9f3b;

/// Avalanche-mixes a 32-bit key.
///
/// Note that `mix32(0) == 0`; the table remaps that result through
/// [`fix_hash`] before storing it.
///
/// # Examples
///
/// ```rust
/// use robin_hash::hash::mix32;
///
/// assert_eq!(mix32(0), 0);
/// assert_ne!(mix32(1), mix32(2));
/// ```
#[inline(always)]
pub const fn mix32(key: u32) -> u32 {
    let mut k = key;
    k = ((k >> 16) ^ k).wrapping_mul(MIX_CONSTANT);
    k = ((k >> 16) ^ k).wrapping_mul(MIX_CONSTANT);
    k = ((k >> 16) ^ k).wrapping_mul(MIX_CONSTANT);
    k
}

/// Folds a hasher's 64-bit output to the 32-bit slot hash, remapping zero to
/// one.
///
/// A stored hash is never zero, which is what lets an empty slot be told
/// apart from a real entry whose key happened to hash to zero.
#[inline(always)]
pub const fn fix_hash(hash: u64) -> NonZeroU32 {
    let folded = (hash ^ (hash >> 32)) as u32;
    match NonZeroU32::new(folded) {
        Some(hash) => hash,
        None => NonZeroU32::MIN,
    }
}

/// The default [`BuildHasher`] for [`HashTable`](crate::HashTable).
///
/// Produces [`mix32`] of the key, widened to `u64`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyMix;

impl BuildHasher for KeyMix {
    type Hasher = KeyMixHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        KeyMixHasher { state: 0 }
    }
}

/// The [`Hasher`] built by [`KeyMix`].
///
/// Intended for a single `write_u32`. Other writes are folded into the state
/// four bytes at a time so the hasher stays usable with any `Hash` type.
#[derive(Debug, Clone)]
pub struct KeyMixHasher {
    state: u32,
}

impl Hasher for KeyMixHasher {
    #[inline(always)]
    fn finish(&self) -> u64 {
        self.state as u64
    }

    #[inline(always)]
    fn write_u32(&mut self, i: u32) {
        self.state = mix32(self.state ^ i);
    }

    fn write(&mut self, bytes: &[u8]) {
        for chunk in bytes.chunks(4) {
            let mut word = [0u8; 4];
            word[..chunk.len()].copy_from_slice(chunk);
            self.write_u32(u32::from_le_bytes(word));
        }
    }
}

/// Deterministic foldhash state, usable in place of [`KeyMix`].
#[cfg(feature = "foldhash")]
pub type FoldState = foldhash::fast::FixedState;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_key_mixes_to_zero_and_is_fixed_up() {
        assert_eq!(mix32(0), 0);
        assert_eq!(fix_hash(KeyMix.hash_one(0u32)).get(), 1);
    }

    #[test]
    fn key_mix_matches_mix32() {
        for key in [1u32, 2, 3, 42, 0xdead_beef, u32::MAX] {
            assert_eq!(KeyMix.hash_one(key), mix32(key) as u64);
            assert_eq!(fix_hash(KeyMix.hash_one(key)).get(), mix32(key).max(1));
        }
    }

    #[test]
    fn mix_is_deterministic() {
        let a = KeyMix.hash_one(12345u32);
        let mut b = KeyMix.build_hasher();
        b.write_u32(12345);
        assert_eq!(a, b.finish());
    }

    #[test]
    fn mix_spreads_sequential_keys() {
        // Sequential keys must not all collide on the low bits used for
        // the home slot of a small table.
        let mut homes = [0usize; 16];
        for key in 0..1024u32 {
            homes[(mix32(key) & 15) as usize] += 1;
        }
        assert!(homes.iter().all(|&n| n > 0), "{homes:?}");
    }

    #[test]
    fn fold_keeps_low_half_when_high_is_zero() {
        assert_eq!(fix_hash(0x1234).get(), 0x1234);
        assert_eq!(fix_hash(0x0000_0001_0000_0001).get(), 1);
        assert_eq!(fix_hash(0xffff_ffff_ffff_ffff).get(), 1);
    }

    #[test]
    fn byte_writes_are_accepted() {
        let mut h = KeyMix.build_hasher();
        h.write(&[1, 2, 3, 4, 5]);
        assert_ne!(h.finish(), 0);
    }

    #[cfg(feature = "foldhash")]
    #[test]
    fn fold_state_is_deterministic() {
        let a = FoldState::default().hash_one(7u32);
        let b = FoldState::default().hash_one(7u32);
        assert_eq!(a, b);
    }
}
