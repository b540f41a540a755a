use alloc::collections::TryReserveError;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::iter::FusedIterator;
use core::mem;
use core::num::NonZeroU32;

use crate::bit_array::BitArray;
use crate::hash::KeyMix;
use crate::hash::fix_hash;

/// Number of slots allocated by [`HashTable::new`].
pub const INITIAL_CAPACITY: usize = 16;

/// Percentage of slots that may hold live entries before the table doubles.
pub const LOAD_FACTOR_PERCENT: usize = 90;

#[inline(always)]
fn resize_threshold(capacity: usize) -> usize {
    ((capacity as u128 * LOAD_FACTOR_PERCENT as u128) / 100) as usize
}

/// Smallest power-of-two capacity, at least [`INITIAL_CAPACITY`], that holds
/// `len` entries without growing.
///
/// Saturates at the largest power of two, which no allocator can satisfy.
fn capacity_for(len: usize) -> usize {
    let mut capacity = INITIAL_CAPACITY;
    while resize_threshold(capacity) <= len {
        match capacity.checked_mul(2) {
            Some(next) => capacity = next,
            None => break,
        }
    }
    capacity
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

#[derive(Clone)]
struct Bucket<V> {
    hash: NonZeroU32,
    key: u32,
    value: V,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Empty,
    Tombstoned,
    Occupied,
}

/// Slot array plus its tombstone flags.
///
/// A tombstoned slot keeps its bucket so the probe distance of everything
/// placed after it stays correct. Only a rehash or `clear` discards it.
#[derive(Clone)]
struct Storage<V> {
    slots: Vec<Option<Bucket<V>>>,
    tombstones: BitArray,
    tombstoned: usize,
    mask: usize,
}

impl<V> Storage<V> {
    fn new(capacity: usize) -> Self {
        debug_assert!(capacity.is_power_of_two());
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            tombstones: BitArray::new(capacity),
            tombstoned: 0,
            mask: capacity - 1,
        }
    }

    fn try_new(capacity: usize) -> Result<Self, TryReserveError> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        let tombstones = BitArray::try_new(capacity)?;
        debug_assert!(capacity.is_power_of_two());
        slots.resize_with(capacity, || None);
        Ok(Self {
            slots,
            tombstones,
            tombstoned: 0,
            mask: capacity - 1,
        })
    }

    /// Fallible allocation of twice `capacity` slots.
    fn try_doubled(capacity: usize) -> Result<Self, TryReserveError> {
        // An unrepresentable slot count fails the reservation in `try_new`.
        Self::try_new(capacity.checked_mul(2).unwrap_or(usize::MAX))
    }

    #[inline(always)]
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline(always)]
    fn home(&self, hash: NonZeroU32) -> usize {
        hash.get() as usize & self.mask
    }

    /// Number of slots between `idx` and the home slot of `hash`.
    #[inline(always)]
    fn probe_distance(&self, hash: NonZeroU32, idx: usize) -> usize {
        (self.capacity() + idx - self.home(hash)) & self.mask
    }

    fn state(&self, idx: usize) -> SlotState {
        match self.slots[idx] {
            None => SlotState::Empty,
            Some(_) if self.tombstones.get(idx) => SlotState::Tombstoned,
            Some(_) => SlotState::Occupied,
        }
    }

    fn bucket(&self, idx: usize) -> &Bucket<V> {
        match &self.slots[idx] {
            Some(bucket) => bucket,
            None => unreachable!("slot {idx} is empty"),
        }
    }

    fn bucket_mut(&mut self, idx: usize) -> &mut Bucket<V> {
        match &mut self.slots[idx] {
            Some(bucket) => bucket,
            None => unreachable!("slot {idx} is empty"),
        }
    }

    /// Robin-hood placement of `incoming`, returning the slot it ends up in.
    ///
    /// An entry that has travelled further than the resident of a slot takes
    /// that slot: a tombstoned resident is overwritten, a live one is swapped
    /// out and carried forward. The caller must have ensured there is room.
    fn place(&mut self, mut incoming: Bucket<V>) -> usize {
        let capacity = self.capacity();
        let mask = self.mask;
        let mut idx = self.home(incoming.hash);
        let mut probes = 0;
        let mut landed = None;

        loop {
            let slot = &mut self.slots[idx];
            match slot {
                None => {
                    *slot = Some(incoming);
                    return landed.unwrap_or(idx);
                }
                Some(resident) => {
                    let resident_probes =
                        (capacity + idx - (resident.hash.get() as usize & mask)) & mask;

                    if resident_probes < probes {
                        if self.tombstones.get(idx) {
                            self.tombstones.set(idx, false);
                            self.tombstoned -= 1;
                            *resident = incoming;
                            return landed.unwrap_or(idx);
                        }

                        mem::swap(resident, &mut incoming);
                        probes = resident_probes;
                        if landed.is_none() {
                            landed = Some(idx);
                        }
                    }
                }
            }

            idx = (idx + 1) & mask;
            probes += 1;
        }
    }

    fn bury(&mut self, idx: usize) {
        self.tombstones.set(idx, true);
        self.tombstoned += 1;
    }

    /// Bounded probe for the live slot holding `key`.
    fn find_index(&self, hash: NonZeroU32, key: u32) -> Option<usize> {
        let mut idx = self.home(hash);
        let mut probes = 0;

        loop {
            let resident = self.slots[idx].as_ref()?;

            // Had the key been stored past this slot, it would have displaced
            // this resident on the way.
            if probes > self.probe_distance(resident.hash, idx) {
                return None;
            }

            let live = self.state(idx) == SlotState::Occupied;
            if live && resident.hash == hash && resident.key == key {
                return Some(idx);
            }

            idx = (idx + 1) & self.mask;
            probes += 1;
        }
    }

    fn into_live(self) -> impl Iterator<Item = Bucket<V>> {
        let Storage {
            slots, tombstones, ..
        } = self;
        slots
            .into_iter()
            .enumerate()
            .filter_map(move |(idx, slot)| slot.filter(|_| !tombstones.get(idx)))
    }

    fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.tombstones.clear_all();
        self.tombstoned = 0;
    }
}

/// An open-addressing hash table keyed by `u32`, using robin-hood hashing.
///
/// Collisions are resolved by linear probing where an entry that has
/// travelled further from its home slot takes priority over one sitting
/// closer to home. Removal marks the slot with a tombstone instead of
/// clearing it; tombstoned slots are reclaimed by later insertions or
/// dropped on the next rehash. The table doubles once the number of live
/// entries reaches 90% of the slot count and never shrinks; when live and
/// tombstoned slots together reach that mark it is rebuilt at the same
/// size instead.
///
/// Keys are hashed with `S` (by default the [`KeyMix`] avalanche mix).
///
/// ## Duplicate keys
///
/// [`insert`](Self::insert) always adds an entry; it does not look for an
/// existing one. Inserting a key that is already present leaves two live
/// entries for it, and lookups return whichever is reached first. Use
/// [`get_or_insert_with`](Self::get_or_insert_with) or
/// [`get_mut`](Self::get_mut) to update in place.
///
/// ## Example
///
/// ```rust
/// use robin_hash::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert(5, "five");
/// table.insert(7, "seven");
///
/// assert_eq!(table.get(5), Some(&"five"));
/// assert!(table.remove(5));
/// assert_eq!(table.get(5), None);
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<V, S = KeyMix> {
    storage: Storage<V>,
    populated: usize,
    max_pop: usize,
    hash_builder: S,
}

impl<V, S> Debug for HashTable<V, S>
where
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Entries<'a, V, S>(&'a HashTable<V, S>);

        impl<V: Debug, S> Debug for Entries<'_, V, S> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_map().entries(self.0.iter()).finish()
            }
        }

        f.debug_struct("HashTable")
            .field("entries", &Entries(self))
            .field("populated", &self.populated)
            .field("capacity", &self.storage.capacity())
            .field("tombstones", &self.storage.tombstones)
            .finish()
    }
}

impl<V, S> Default for HashTable<V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<V> HashTable<V, KeyMix> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let table: HashTable<u64> = HashTable::new();
    /// assert_eq!(table.capacity(), 16);
    /// assert!(table.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(KeyMix)
    }

    /// Creates an empty table that holds at least `capacity` entries before
    /// it grows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(100);
    /// let slots = table.capacity();
    /// for key in 0..100 {
    ///     table.insert(key, key);
    /// }
    /// assert_eq!(table.capacity(), slots);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, KeyMix)
    }

    /// Fallible version of [`with_capacity`](Self::with_capacity).
    pub fn try_with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        Self::try_with_capacity_and_hasher(capacity, KeyMix)
    }
}

impl<V, S> HashTable<V, S> {
    /// Creates an empty table with [`INITIAL_CAPACITY`] slots that hashes
    /// keys with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::from_storage(Storage::new(INITIAL_CAPACITY), hash_builder)
    }

    /// Creates an empty table that holds at least `capacity` entries before
    /// it grows, hashing keys with `hash_builder`.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self::from_storage(Storage::new(capacity_for(capacity)), hash_builder)
    }

    /// Fallible version of
    /// [`with_capacity_and_hasher`](Self::with_capacity_and_hasher).
    pub fn try_with_capacity_and_hasher(
        capacity: usize,
        hash_builder: S,
    ) -> Result<Self, TryReserveError> {
        Ok(Self::from_storage(
            Storage::try_new(capacity_for(capacity))?,
            hash_builder,
        ))
    }

    fn from_storage(storage: Storage<V>, hash_builder: S) -> Self {
        Self {
            max_pop: resize_threshold(storage.capacity()),
            storage,
            populated: 0,
            hash_builder,
        }
    }

    /// Returns the number of live entries.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table holds no live entries.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots. Always a power of two.
    ///
    /// The table grows once [`len`](Self::len) reaches 90% of this value.
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry and tombstone, keeping the allocated slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table: HashTable<i32> = (0..50).map(|k| (k, 0)).collect();
    /// let slots = table.capacity();
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), slots);
    /// ```
    pub fn clear(&mut self) {
        self.storage.clear();
        self.populated = 0;
    }

    /// Makes sure `additional` more entries fit without growing.
    ///
    /// # Panics
    ///
    /// Panics if the new slot count overflows. Use
    /// [`try_reserve`](Self::try_reserve) to handle that case.
    pub fn reserve(&mut self, additional: usize) {
        let capacity = capacity_for(self.populated.saturating_add(additional));
        if capacity > self.storage.capacity() {
            self.rehash_into(Storage::new(capacity));
        }
    }

    /// Fallible version of [`reserve`](Self::reserve).
    ///
    /// On error the table is left untouched.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        let capacity = capacity_for(self.populated.saturating_add(additional));
        if capacity > self.storage.capacity() {
            self.rehash_into(Storage::try_new(capacity)?);
        }
        Ok(())
    }

    /// Visits every live entry exactly once, in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, 10);
    /// table.insert(2, 20);
    /// table.for_each(|key, value| *value += key as i32);
    ///
    /// assert_eq!(table.get(1), Some(&11));
    /// assert_eq!(table.get(2), Some(&22));
    /// ```
    pub fn for_each(&mut self, mut visit: impl FnMut(u32, &mut V)) {
        for (key, value) in self.iter_mut() {
            visit(key, value);
        }
    }

    /// Returns an iterator over live `(key, &value)` pairs in slot order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    /// table.remove(1);
    ///
    /// let entries: Vec<_> = table.iter().collect();
    /// assert_eq!(entries, vec![(2, &"b")]);
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.storage.slots.iter().enumerate(),
            tombstones: &self.storage.tombstones,
            remaining: self.populated,
        }
    }

    /// Returns an iterator over live `(key, &mut value)` pairs in slot order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.storage.slots.iter_mut().enumerate(),
            tombstones: &self.storage.tombstones,
            remaining: self.populated,
        }
    }

    /// Returns an iterator over the live keys.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the live values.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let capacity = self
            .storage
            .capacity()
            .checked_mul(2)
            .unwrap_or_else(|| capacity_overflow());
        self.rehash_into(Storage::new(capacity));
    }

    #[cold]
    #[inline(never)]
    fn try_grow(&mut self) -> Result<(), TryReserveError> {
        self.rehash_into(Storage::try_doubled(self.storage.capacity())?);
        Ok(())
    }

    /// Rebuilds the slots at the current capacity, dropping every tombstone.
    #[cold]
    #[inline(never)]
    fn purge_tombstones(&mut self) {
        self.rehash_into(Storage::new(self.storage.capacity()));
    }

    #[cold]
    #[inline(never)]
    fn try_purge_tombstones(&mut self) -> Result<(), TryReserveError> {
        self.rehash_into(Storage::try_new(self.storage.capacity())?);
        Ok(())
    }

    /// Counts one more live entry ahead of placing it.
    ///
    /// The table doubles once the live count reaches the threshold. Below
    /// that, live plus tombstoned slots reaching the threshold rebuilds the
    /// table at the same capacity, so placement always finds an empty slot.
    fn claim_slot(&mut self) {
        self.populated += 1;
        if self.populated >= self.max_pop {
            self.grow();
        } else if self.populated + self.storage.tombstoned >= self.max_pop {
            self.purge_tombstones();
        }
    }

    /// Fallible version of [`claim_slot`](Self::claim_slot). On error the
    /// table is left untouched.
    fn try_claim_slot(&mut self) -> Result<(), TryReserveError> {
        let populated = self.populated + 1;
        if populated >= self.max_pop {
            self.try_grow()?;
        } else if populated + self.storage.tombstoned >= self.max_pop {
            self.try_purge_tombstones()?;
        }
        self.populated = populated;
        Ok(())
    }

    /// Moves every live entry into `fresh`, reusing the stored hashes.
    /// Tombstoned entries are dropped along with the old slots.
    fn rehash_into(&mut self, fresh: Storage<V>) {
        debug_assert!(resize_threshold(fresh.capacity()) > self.populated);

        let old = mem::replace(&mut self.storage, fresh);
        for bucket in old.into_live() {
            self.storage.place(bucket);
        }
        self.max_pop = resize_threshold(self.storage.capacity());
    }
}

impl<V, S> HashTable<V, S>
where
    S: BuildHasher,
{
    #[inline(always)]
    fn hash_key(&self, key: u32) -> NonZeroU32 {
        fix_hash(self.hash_builder.hash_one(key))
    }

    /// Adds an entry for `key`.
    ///
    /// The live count is bumped first; if it reaches the resize threshold
    /// the table doubles before the entry is placed. When tombstones have
    /// used up the remaining headroom the slots are rebuilt at the same
    /// capacity instead. Either rehash moves every entry, which is why no
    /// reference obtained from [`get`](Self::get) may outlive a call to
    /// `insert`.
    ///
    /// This does not check for an existing entry with the same key. See the
    /// [type-level docs](HashTable#duplicate-keys).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// for key in 0..100 {
    ///     table.insert(key, key * 10);
    /// }
    /// assert_eq!(table.len(), 100);
    /// assert_eq!(table.get(42), Some(&420));
    /// ```
    pub fn insert(&mut self, key: u32, value: V) {
        let hash = self.hash_key(key);
        self.claim_slot();
        self.storage.place(Bucket { hash, key, value });
    }

    /// Fallible version of [`insert`](Self::insert).
    ///
    /// Returns an error if rehashing the table fails to allocate, in which case
    /// the table is left untouched and `value` is dropped.
    pub fn try_insert(&mut self, key: u32, value: V) -> Result<(), TryReserveError> {
        let hash = self.hash_key(key);
        self.try_claim_slot()?;
        self.storage.place(Bucket { hash, key, value });
        Ok(())
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// The reference borrows the table, so it cannot be held across any
    /// mutation: growth reallocates every slot.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(3, "three");
    /// assert_eq!(table.get(3), Some(&"three"));
    /// assert_eq!(table.get(4), None);
    /// ```
    pub fn get(&self, key: u32) -> Option<&V> {
        let idx = self.storage.find_index(self.hash_key(key), key)?;
        Some(&self.storage.bucket(idx).value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: u32) -> Option<&mut V> {
        let idx = self.storage.find_index(self.hash_key(key), key)?;
        Some(&mut self.storage.bucket_mut(idx).value)
    }

    /// Returns `true` if a live entry exists for `key`.
    pub fn contains_key(&self, key: u32) -> bool {
        self.storage.find_index(self.hash_key(key), key).is_some()
    }

    /// Returns the value for `key`, inserting `default()` first if there is
    /// no live entry for it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut counts = HashTable::new();
    /// for key in [1, 2, 1, 1] {
    ///     *counts.get_or_insert_with(key, || 0) += 1;
    /// }
    /// assert_eq!(counts.get(1), Some(&3));
    /// assert_eq!(counts.get(2), Some(&1));
    /// assert_eq!(counts.len(), 2);
    /// ```
    pub fn get_or_insert_with(&mut self, key: u32, default: impl FnOnce() -> V) -> &mut V {
        let hash = self.hash_key(key);
        let idx = match self.storage.find_index(hash, key) {
            Some(idx) => idx,
            None => {
                let value = default();
                self.claim_slot();
                self.storage.place(Bucket { hash, key, value })
            }
        };

        &mut self.storage.bucket_mut(idx).value
    }

    /// Removes the entry for `key`, returning whether one was found.
    ///
    /// The slot is tombstoned rather than cleared: its hash stays in place
    /// so entries probed past it are still found. The value itself is
    /// dropped when the slot is reused or the table is rehashed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use robin_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(5, 50);
    /// assert!(table.remove(5));
    /// assert!(!table.remove(5));
    /// assert_eq!(table.get(5), None);
    ///
    /// table.insert(5, 99);
    /// assert_eq!(table.get(5), Some(&99));
    /// ```
    pub fn remove(&mut self, key: u32) -> bool {
        match self.storage.find_index(self.hash_key(key), key) {
            Some(idx) => {
                self.storage.bury(idx);
                self.populated -= 1;
                true
            }
            None => false,
        }
    }
}

impl<V, S> Extend<(u32, V)> for HashTable<V, S>
where
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (u32, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V, S> FromIterator<(u32, V)> for HashTable<V, S>
where
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (u32, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut table = Self::with_capacity_and_hasher(iter.size_hint().0, S::default());
        table.extend(iter);
        table
    }
}

impl<'a, V, S> IntoIterator for &'a HashTable<V, S> {
    type IntoIter = Iter<'a, V>;
    type Item = (u32, &'a V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, S> IntoIterator for &'a mut HashTable<V, S> {
    type IntoIter = IterMut<'a, V>;
    type Item = (u32, &'a mut V);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<V, S> IntoIterator for HashTable<V, S> {
    type IntoIter = IntoIter<V>;
    type Item = (u32, V);

    fn into_iter(self) -> Self::IntoIter {
        let Storage {
            slots, tombstones, ..
        } = self.storage;
        IntoIter {
            slots: slots.into_iter().enumerate(),
            tombstones,
            remaining: self.populated,
        }
    }
}

#[cfg(any(test, feature = "stats"))]
impl<V, S> HashTable<V, S> {
    /// Counts live entries by probe distance.
    ///
    /// Test-only unless the `stats` feature is enabled.
    pub fn probe_histogram(&self) -> crate::stats::ProbeHistogram {
        let mut counts = alloc::vec![0usize; 1];
        for idx in 0..self.storage.capacity() {
            if self.storage.state(idx) != SlotState::Occupied {
                continue;
            }
            let distance = self
                .storage
                .probe_distance(self.storage.bucket(idx).hash, idx);
            if distance >= counts.len() {
                counts.resize(distance + 1, 0);
            }
            counts[distance] += 1;
        }

        crate::stats::ProbeHistogram { counts }
    }

    /// Returns slot usage and probe length statistics.
    ///
    /// Test-only unless the `stats` feature is enabled.
    pub fn debug_stats(&self) -> crate::stats::DebugStats {
        let capacity = self.storage.capacity();
        let tombstoned_slots = self.storage.tombstoned;
        let empty_slots = self.storage.slots.iter().filter(|s| s.is_none()).count();
        let histogram = self.probe_histogram();

        crate::stats::DebugStats {
            populated: self.populated,
            capacity,
            resize_threshold: self.max_pop,
            occupied_slots: capacity - tombstoned_slots - empty_slots,
            tombstoned_slots,
            empty_slots,
            load_factor: self.populated as f64 / capacity as f64,
            max_probe_distance: histogram.max_probe_distance(),
            mean_probe_distance: histogram.mean_probe_distance(),
            total_bytes: capacity * mem::size_of::<Option<Bucket<V>>>()
                + capacity.div_ceil(u64::BITS as usize) * mem::size_of::<u64>(),
        }
    }
}

/// An iterator over the live entries of a [`HashTable`].
///
/// Created by [`HashTable::iter`].
pub struct Iter<'a, V> {
    slots: core::iter::Enumerate<core::slice::Iter<'a, Option<Bucket<V>>>>,
    tombstones: &'a BitArray,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            tombstones: self.tombstones,
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u32, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, slot) in self.slots.by_ref() {
            if let Some(bucket) = slot {
                if !self.tombstones.get(idx) {
                    self.remaining -= 1;
                    return Some((bucket.key, &bucket.value));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the live entries of a [`HashTable`].
///
/// Created by [`HashTable::iter_mut`].
pub struct IterMut<'a, V> {
    slots: core::iter::Enumerate<core::slice::IterMut<'a, Option<Bucket<V>>>>,
    tombstones: &'a BitArray,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (u32, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, slot) in self.slots.by_ref() {
            if let Some(bucket) = slot {
                if !self.tombstones.get(idx) {
                    self.remaining -= 1;
                    return Some((bucket.key, &mut bucket.value));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// An owning iterator over the live entries of a [`HashTable`].
///
/// Tombstoned values are dropped as the iterator passes them.
pub struct IntoIter<V> {
    slots: core::iter::Enumerate<alloc::vec::IntoIter<Option<Bucket<V>>>>,
    tombstones: BitArray,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (u32, V);

    fn next(&mut self) -> Option<Self::Item> {
        for (idx, slot) in self.slots.by_ref() {
            if let Some(bucket) = slot {
                if !self.tombstones.get(idx) {
                    self.remaining -= 1;
                    return Some((bucket.key, bucket.value));
                }
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}
