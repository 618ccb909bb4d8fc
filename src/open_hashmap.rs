use std::{
    borrow::Borrow,
    collections::hash_map::RandomState,
    hash::{BuildHasher, Hash},
    iter::FusedIterator,
    mem,
    ops::Index,
};

use crate::{error::AccessError, slot::Slot};

/// Smallest capacity requested when a probe saturates an empty or tiny
/// table
const MIN_GROW_CAPACITY: usize = 4;

/// Default fraction of the slot array that may be consumed by live
/// entries plus tombstones before a rehash is forced
const DEFAULT_MAX_LOAD_FACTOR: f64 = 0.7;

/// Bounds accepted by [`OpenHashMap::set_max_load_factor`]; a limit of
/// 1.0 would let the table fill completely and probe chains degenerate
const LOAD_FACTOR_RANGE: (f64, f64) = (0.05, 0.95);

/// Outcome of a probe over the slot array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// A live entry with a matching key sits at this index
    Found(usize),
    /// The key is absent; an insert should write at this index
    Vacant(usize),
    /// A full cycle completed without an open slot or a match
    Saturated,
}

/// Raw result of one scan over a probe chain
#[derive(Debug, Clone, Copy)]
struct Scan {
    /// How the scan terminated
    probe: Probe,
    /// Index of the first tombstone crossed, if any
    first_tombstone: Option<usize>,
}

/// A hash table mapping unique keys to values with open addressing.
///
/// Collisions are resolved by linear probing into a single contiguous
/// slot array rather than by chaining. Erased entries leave tombstones
/// behind so probe chains stay intact; tombstones are reclaimed by
/// later inserts and swept out by a compacting rehash once they are
/// dense enough to degrade lookups.
///
/// Unlike `std::collections::HashMap`, [`insert`] never overwrites an
/// existing value; use [`insert_or_assign`] for overwrite semantics.
///
/// Note: this implementation is not thread-safe; concurrent access
/// requires external synchronization.
///
/// [`insert`]: Self::insert
/// [`insert_or_assign`]: Self::insert_or_assign
#[derive(Debug, Clone)]
pub struct OpenHashMap<K, V, S = RandomState> {
    /// The slot array; its length is the table capacity
    slots: Vec<Slot<K, V>>,
    /// Count of slots currently live or tombstoned, i.e. every slot
    /// written since the last rehash
    occupied: usize,
    /// Count of slots currently tombstoned
    tombstoned: usize,
    /// Limit on `occupied / capacity` enforced after every insert
    max_load_factor: f64,
    /// Hash builder, stored by value
    hash_builder: S,
}

impl<K, V> OpenHashMap<K, V, RandomState> {
    /// Creates an empty map. No slots are allocated until the first
    /// insert.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates a map with exactly `capacity` open slots
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, RandomState::new())
    }
}

impl<K, V, S> OpenHashMap<K, V, S> {
    /// Creates an empty map using the given hash builder
    #[must_use]
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            slots: Vec::new(),
            occupied: 0,
            tombstoned: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash_builder,
        }
    }

    /// Creates a map with exactly `capacity` open slots using the
    /// given hash builder
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            slots: Self::open_slots(capacity),
            occupied: 0,
            tombstoned: 0,
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
            hash_builder,
        }
    }

    /// Builds an all-open slot array of the requested capacity
    fn open_slots(capacity: usize) -> Vec<Slot<K, V>> {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || Slot::Open);
        slots
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.occupied.saturating_sub(self.tombstoned)
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the fraction of slots consumed by live entries plus
    /// tombstones
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() {
            0.0
        } else {
            self.occupied as f64 / self.slots.len() as f64
        }
    }

    /// Returns the load factor limit enforced after every insert
    #[must_use]
    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    /// Returns a reference to the map's hash builder
    #[must_use]
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the length of the longest run of contiguous live slots.
    ///
    /// Together with [`mean_chain`](Self::mean_chain) this measures how
    /// far probe chains have degraded, which is the signal to tune
    /// [`set_max_load_factor`](Self::set_max_load_factor) against.
    #[must_use]
    pub fn max_chain(&self) -> usize {
        let mut longest = 0usize;
        let mut run = 0usize;
        for slot in &self.slots {
            if slot.is_used() {
                run = run.saturating_add(1);
                longest = longest.max(run);
            } else {
                run = 0;
            }
        }
        longest
    }

    /// Returns the mean length of the runs of contiguous live slots,
    /// or 0.0 for a table with no live entries
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn mean_chain(&self) -> f64 {
        let mut runs = 0usize;
        let mut used = 0usize;
        let mut in_run = false;
        for slot in &self.slots {
            if slot.is_used() {
                used = used.saturating_add(1);
                if !in_run {
                    runs = runs.saturating_add(1);
                    in_run = true;
                }
            } else {
                in_run = false;
            }
        }
        if runs == 0 { 0.0 } else { used as f64 / runs as f64 }
    }

    /// Removes every entry, keeping the allocated capacity
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Open;
        }
        self.occupied = 0;
        self.tombstoned = 0;
    }

    /// Returns an iterator over the live entries in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { slots: self.live_span().iter(), remaining: self.len() }
    }

    /// Returns an iterator over the live entries with mutable access
    /// to the values
    #[must_use]
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.len();
        IterMut { slots: self.live_span_mut().iter_mut(), remaining }
    }

    /// Subslice spanning the first through last live slots. Leading and
    /// trailing non-live slots never enter the iteration range;
    /// interior tombstones are skipped during advancement.
    fn live_span(&self) -> &[Slot<K, V>] {
        let first = self.slots.iter().position(Slot::is_used);
        let last = self.slots.iter().rposition(Slot::is_used);
        match (first, last) {
            (Some(first), Some(last)) => self.slots.get(first..=last).unwrap_or(&[]),
            _ => &[],
        }
    }

    /// Mutable variant of [`live_span`](Self::live_span)
    fn live_span_mut(&mut self) -> &mut [Slot<K, V>] {
        let first = self.slots.iter().position(Slot::is_used);
        let last = self.slots.iter().rposition(Slot::is_used);
        match (first, last) {
            (Some(first), Some(last)) => self.slots.get_mut(first..=last).unwrap_or(&mut []),
            _ => &mut [],
        }
    }
}

impl<K, V, S> OpenHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Hashes a key with the map's hash builder
    fn hash_of<Q: ?Sized + Hash>(&self, key: &Q) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Maps a hash to the slot where its probe chain starts
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn slot_index(&self, hash: u64) -> usize {
        (hash % self.slots.len() as u64) as usize
    }

    /// Walks the probe chain starting at `hash`, recording the first
    /// tombstone crossed. Terminates at the first open slot, at a key
    /// for which `eq` holds, or after visiting every slot once.
    #[allow(clippy::arithmetic_side_effects)]
    fn scan<F>(&self, hash: u64, mut eq: F) -> Scan
    where
        F: FnMut(&K) -> bool,
    {
        let capacity = self.slots.len();
        let mut first_tombstone = None;
        if capacity == 0 {
            return Scan { probe: Probe::Saturated, first_tombstone };
        }
        let mut index = self.slot_index(hash);
        for _ in 0..capacity {
            match self.slots.get(index) {
                None | Some(Slot::Open) => {
                    return Scan { probe: Probe::Vacant(index), first_tombstone };
                }
                Some(Slot::Deleted) => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(index);
                    }
                }
                Some(Slot::Used { key, .. }) => {
                    if eq(key) {
                        return Scan { probe: Probe::Found(index), first_tombstone };
                    }
                }
            }
            index = (index + 1) % capacity;
        }
        Scan { probe: Probe::Saturated, first_tombstone }
    }

    /// Read-only probe: reports the terminating index without touching
    /// the slot array
    fn probe_with<F>(&self, hash: u64, eq: F) -> Probe
    where
        F: FnMut(&K) -> bool,
    {
        self.scan(hash, eq).probe
    }

    /// Mutating probe. A key found past a tombstone is swapped into
    /// that earlier slot, shortening its chain for future lookups; an
    /// absent key reports the first tombstone as the insertion point
    /// so inserts reclaim tombstones before consuming open capacity.
    fn probe_mut_with<F>(&mut self, hash: u64, eq: F) -> Probe
    where
        F: FnMut(&K) -> bool,
    {
        let Scan { probe, first_tombstone } = self.scan(hash, eq);
        match (probe, first_tombstone) {
            (Probe::Found(index), Some(tombstone)) => {
                self.slots.swap(tombstone, index);
                Probe::Found(tombstone)
            }
            (Probe::Vacant(_), Some(tombstone)) => Probe::Vacant(tombstone),
            (resolved, _) => resolved,
        }
    }

    /// Locates `key` for an insert, forcing a growth rehash when the
    /// scan finds no open slot. Returns `(index, found)`.
    #[allow(clippy::unreachable)]
    fn locate_for_insert(&mut self, hash: u64, key: &K) -> (usize, bool) {
        match self.probe_mut_with(hash, |stored| stored == key) {
            Probe::Found(index) => return (index, true),
            Probe::Vacant(index) => return (index, false),
            Probe::Saturated => {}
        }
        // Every chain is saturated; grow by at least doubling so the
        // retried probe must terminate at an open slot. Growing by the
        // live-count formula instead could repeat the same capacity
        // and loop forever.
        self.rehash(self.slots.len().saturating_mul(2).max(MIN_GROW_CAPACITY));
        match self.probe_mut_with(hash, |stored| stored == key) {
            Probe::Found(index) => (index, true),
            Probe::Vacant(index) => (index, false),
            Probe::Saturated => unreachable!("growth rehash left no open slot"),
        }
    }

    /// Resolves the final write position for a fresh key, growing
    /// first when filling an open slot would push the load factor to
    /// its limit. Reusing a tombstone never moves the load factor, so
    /// it never grows.
    #[allow(clippy::unreachable)]
    fn vacant_for_write(&mut self, hash: u64, index: usize, key: &K) -> usize {
        let fills_open_slot = !matches!(self.slots.get(index), Some(Slot::Deleted));
        if !(fills_open_slot && self.would_overload()) {
            return index;
        }
        self.rehash(self.grown_capacity());
        match self.probe_with(hash, |stored| stored == key) {
            Probe::Vacant(fresh) => fresh,
            Probe::Found(_) | Probe::Saturated => {
                unreachable!("grown table rejected a fresh key")
            }
        }
    }

    /// Returns true if writing one more open slot would reach the load
    /// factor limit
    #[allow(clippy::cast_precision_loss)]
    fn would_overload(&self) -> bool {
        let occupied_after = self.occupied.saturating_add(1);
        occupied_after as f64 / self.slots.len() as f64 >= self.max_load_factor
    }

    /// Capacity requested when an insert reaches the load limit, sized
    /// so the table lands near half the limit afterwards
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn grown_capacity(&self) -> usize {
        let live = self.len().saturating_add(1);
        (live.saturating_mul(2) as f64 / self.max_load_factor).ceil() as usize
    }

    /// Smallest capacity that holds `live` entries without exceeding
    /// the load factor limit
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    fn min_capacity_for(&self, live: usize) -> usize {
        (live as f64 / self.max_load_factor).ceil() as usize
    }

    /// Writes a fresh entry into a vacant slot and updates the
    /// occupancy counters
    fn write_vacant(&mut self, index: usize, key: K, value: V) {
        if let Some(slot) = self.slots.get_mut(index) {
            if slot.is_deleted() {
                self.tombstoned = self.tombstoned.saturating_sub(1);
            } else {
                self.occupied = self.occupied.saturating_add(1);
            }
            *slot = Slot::Used { key, value };
        }
    }

    /// Mutable reference to the value in a slot the probe engine just
    /// reported as live
    #[allow(clippy::unreachable)]
    fn live_value_mut(&mut self, index: usize) -> &mut V {
        match self.slots.get_mut(index) {
            Some(Slot::Used { value, .. }) => value,
            _ => unreachable!("probe reported a non-live slot as a match"),
        }
    }

    /// Inserts a key-value pair.
    ///
    /// If the key already has a live entry, the stored value is left
    /// untouched and `(existing, false)` is returned. Otherwise the
    /// pair is written, the table grows if the write would reach the
    /// load factor limit, and `(new, true)` is returned.
    pub fn insert(&mut self, key: K, value: V) -> (&mut V, bool) {
        let hash = self.hash_of(&key);
        let (index, found) = self.locate_for_insert(hash, &key);
        if found {
            return (self.live_value_mut(index), false);
        }
        let index = self.vacant_for_write(hash, index, &key);
        self.write_vacant(index, key, value);
        (self.live_value_mut(index), true)
    }

    /// Inserts a key-value pair, overwriting the value of an existing
    /// entry. Returns the previous value if there was one.
    pub fn insert_or_assign(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_of(&key);
        let (index, found) = self.locate_for_insert(hash, &key);
        if found {
            return Some(mem::replace(self.live_value_mut(index), value));
        }
        let index = self.vacant_for_write(hash, index, &key);
        self.write_vacant(index, key, value);
        None
    }

    /// Returns a reference to the value stored for `key`
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key-value pair for `key`
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        match self.probe_with(hash, |stored| stored.borrow() == key) {
            Probe::Found(index) => match self.slots.get(index) {
                Some(Slot::Used { key, value }) => Some((key, value)),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Returns a mutable reference to the value stored for `key`
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        match self.probe_mut_with(hash, |stored| stored.borrow() == key) {
            Probe::Found(index) => match self.slots.get_mut(index) {
                Some(Slot::Used { value, .. }) => Some(value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Heterogeneous lookup: probes with a caller-supplied equality
    /// predicate so the query need not be converted into a stored key.
    ///
    /// The query is hashed with the map's hash builder, so it must
    /// hash identically to the key it is meant to match.
    #[must_use]
    pub fn get_with<Q, F>(&self, query: &Q, mut eq: F) -> Option<(&K, &V)>
    where
        Q: Hash + ?Sized,
        F: FnMut(&K, &Q) -> bool,
    {
        let hash = self.hash_of(query);
        match self.probe_with(hash, |stored| eq(stored, query)) {
            Probe::Found(index) => match self.slots.get(index) {
                Some(Slot::Used { key, value }) => Some((key, value)),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns the number of live entries for `key`: 0 or 1, since
    /// keys are unique
    #[must_use]
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        usize::from(self.contains_key(key))
    }

    /// Checked access to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::KeyNotFound`] if the key has no live
    /// entry.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, AccessError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(AccessError::KeyNotFound)
    }

    /// Checked mutable access to the value stored for `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::KeyNotFound`] if the key has no live
    /// entry.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, AccessError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get_mut(key).ok_or(AccessError::KeyNotFound)
    }

    /// Removes the entry for `key` and returns its value.
    ///
    /// The slot is tombstoned, not reopened, so a later insert can
    /// reclaim it without growing the table. Tombstones left by
    /// single-key removals accumulate until a batch removal or
    /// [`compress`](Self::compress) sweeps them out.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry for `key` and returns the stored pair
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let hash = self.hash_of(key);
        match self.probe_with(hash, |stored| stored.borrow() == key) {
            Probe::Found(index) => {
                let pair = self.slots.get_mut(index).and_then(Slot::take);
                if pair.is_some() {
                    self.tombstoned = self.tombstoned.saturating_add(1);
                }
                pair
            }
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Keeps only the entries for which `keep` returns true. Dropped
    /// entries are tombstoned; the tombstone density check runs once
    /// after the sweep.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        let mut dropped = 0usize;
        for slot in &mut self.slots {
            let evict = match slot {
                Slot::Used { key, value } => !keep(key, value),
                Slot::Open | Slot::Deleted => false,
            };
            if evict {
                drop(slot.take());
                dropped = dropped.saturating_add(1);
            }
        }
        self.tombstoned = self.tombstoned.saturating_add(dropped);
        if dropped > 0 {
            self.compact_if_stale();
        }
    }

    /// Rebuilds the table when tombstones outnumber live entries
    /// enough to degrade probe chains. The trigger is tombstone
    /// density rather than raw count: tombstones lengthen probe chains
    /// exactly as live entries do.
    #[allow(clippy::cast_precision_loss)]
    fn compact_if_stale(&mut self) {
        if self.occupied > 0
            && self.tombstoned as f64 / self.occupied as f64 > self.max_load_factor
        {
            self.rehash(0);
        }
    }

    /// Rebuilds the slot array at
    /// `max(requested_capacity, ceil(len / max_load_factor))`,
    /// discarding every tombstone and reinserting every live entry in
    /// old slot order. Relative entry order is not preserved.
    pub fn rehash(&mut self, requested_capacity: usize) {
        let capacity = requested_capacity.max(self.min_capacity_for(self.len()));
        let retired = mem::replace(&mut self.slots, Self::open_slots(capacity));
        self.occupied = 0;
        self.tombstoned = 0;
        for slot in retired {
            if let Slot::Used { key, value } = slot {
                let hash = self.hash_of(&key);
                // The fresh array is sized for every live entry and
                // the old keys were unique, so the probe terminates at
                // an open slot.
                if let Probe::Vacant(index) = self.probe_with(hash, |stored| *stored == key) {
                    self.write_vacant(index, key, value);
                }
            }
        }
    }

    /// Grows the table, if needed, so at least `min_live` live entries
    /// fit without another rehash. Never shrinks.
    pub fn reserve(&mut self, min_live: usize) {
        let wanted = self.min_capacity_for(min_live);
        if wanted > self.slots.len() {
            self.rehash(wanted);
        }
    }

    /// Forces a tombstone compaction: the capacity shrinks to exactly
    /// `ceil(len / max_load_factor)`
    pub fn compress(&mut self) {
        self.rehash(0);
    }

    /// Sets the load factor limit, clamped to [0.05, 0.95]. A table
    /// already past the new limit compacts immediately.
    pub fn set_max_load_factor(&mut self, factor: f64) {
        self.max_load_factor = factor.clamp(LOAD_FACTOR_RANGE.0, LOAD_FACTOR_RANGE.1);
        if !self.slots.is_empty() && self.load_factor() > self.max_load_factor {
            self.rehash(0);
        }
    }
}

impl<K, V, S> Default for OpenHashMap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Extend<(K, V)> for OpenHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        let iter = iter.into_iter();
        self.reserve(self.len().saturating_add(iter.size_hint().0));
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for OpenHashMap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for OpenHashMap<K, V>
where
    K: Eq + Hash,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K, V, S, Q> Index<&Q> for OpenHashMap<K, V, S>
where
    K: Borrow<Q> + Eq + Hash,
    Q: Hash + Eq + ?Sized,
    S: BuildHasher,
{
    type Output = V;

    /// Unchecked access to the value stored for `key`. The entry must
    /// have been inserted beforehand; use [`at`](OpenHashMap::at) or
    /// [`insert_or_assign`](OpenHashMap::insert_or_assign) when that
    /// is not guaranteed.
    ///
    /// # Panics
    ///
    /// Panics if the key has no live entry.
    #[allow(clippy::panic)]
    fn index(&self, key: &Q) -> &V {
        self.get(key)
            .map_or_else(|| panic!("no entry found for key"), |value| value)
    }
}

impl<'a, K, V, S> IntoIterator for &'a OpenHashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut OpenHashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for OpenHashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let remaining = self.len();
        IntoIter { slots: self.slots.into_iter(), remaining }
    }
}

/// Iterator over the live entries of an [`OpenHashMap`].
///
/// The range is trimmed to the first through last live slots when the
/// iterator is created; tombstones inside the range are skipped as the
/// cursor advances.
#[derive(Debug, Clone)]
pub struct Iter<'a, K, V> {
    /// Slots between the first and last live entries, inclusive
    slots: std::slice::Iter<'a, Slot<K, V>>,
    /// Live entries not yet yielded from either end
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the live entries of an [`OpenHashMap`] with mutable
/// access to the values
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    /// Slots between the first and last live entries, inclusive
    slots: std::slice::IterMut<'a, Slot<K, V>>,
    /// Live entries not yet yielded from either end
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&*key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((&*key, value));
            }
        }
        None
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the entries of an [`OpenHashMap`]
#[derive(Debug)]
pub struct IntoIter<K, V> {
    /// The retired slot array
    slots: std::vec::IntoIter<Slot<K, V>>,
    /// Live entries not yet yielded from either end
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.next_back() {
            if let Slot::Used { key, value } = slot {
                self.remaining = self.remaining.saturating_sub(1);
                return Some((key, value));
            }
        }
        None
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}
