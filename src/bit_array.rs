use alloc::collections::TryReserveError;
use alloc::vec;
use alloc::vec::Vec;

const WORD_BITS: usize = u64::BITS as usize;

/// Fixed-length array of flags, one per table slot.
///
/// The table keeps its tombstone marks here instead of inside the slots so
/// a deleted entry keeps its hash (and therefore its probe distance) while
/// being skipped by lookups.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct BitArray {
    words: Vec<u64>,
    len: usize,
}

impl BitArray {
    /// Allocates `len` bits, all clear.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    pub(crate) fn try_new(len: usize) -> Result<Self, TryReserveError> {
        let n_words = len.div_ceil(WORD_BITS);
        let mut words = Vec::new();
        words.try_reserve_exact(n_words)?;
        words.resize(n_words, 0);
        Ok(Self { words, len })
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: usize) -> bool {
        debug_assert!(index < self.len);
        self.words[index / WORD_BITS] & (1 << (index % WORD_BITS)) != 0
    }

    #[inline(always)]
    pub(crate) fn set(&mut self, index: usize, value: bool) {
        debug_assert!(index < self.len);
        let word = &mut self.words[index / WORD_BITS];
        let bit = 1 << (index % WORD_BITS);
        if value {
            *word |= bit;
        } else {
            *word &= !bit;
        }
    }

    pub(crate) fn clear_all(&mut self) {
        self.words.fill(0);
    }

    #[cfg(test)]
    pub(crate) fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl core::fmt::Debug for BitArray {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list()
            .entries((0..self.len).filter(|&i| self.get(i)))
            .finish()
    }
}
