//! An insertion-ordered keyed collection.
//!
//! [`Collection`] wraps [`IndexMap`] and layers query, structural, and
//! random-sampling operations over its iteration contract: keys are unique,
//! iteration order is insertion order, and removal keeps the remaining
//! entries in order.
//!
//! None of the operations here mutate the collection except the explicit
//! CRUD methods; everything else borrows it immutably. Exclusive ownership
//! during mutation is enforced by the borrow checker.

use std::fmt;
use std::hash::Hash;
use std::ptr;

use indexmap::{Equivalent, IndexMap};
use rand::prelude::*;

use crate::error::CollectionError;
use crate::sample;

/// A deep-equality function, installed via [`Collection::with_deep_equal`]
/// and consumed by [`Collection::equal_deep`].
pub type DeepEqualFn<V> = fn(&V, &V) -> bool;

/// Chunk length used by [`Collection::into_chunks`] when `0` is passed.
pub const DEFAULT_CHUNK_LEN: usize = 16;

/// An insertion-ordered map with uniform random sampling.
///
/// # Examples
///
/// ```
/// use tombola::Collection;
///
/// let deck: Collection<u32, &str> = Collection::from([(1, "2"), (3, "4"), (5, "6")]);
///
/// assert_eq!(deck.first(), Some(&"2"));
/// assert_eq!(deck.find(|_, v| *v == "4"), Some(&"4"));
///
/// let spread = deck.random_values(2, true).unwrap();
/// assert_eq!(spread.len(), 2);
/// ```
#[derive(Clone)]
pub struct Collection<K, V> {
    entries: IndexMap<K, V>,
    deep_equal: Option<DeepEqualFn<V>>,
}

impl<K, V> Collection<K, V> {
    /// Makes a new, empty collection.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            deep_equal: None,
        }
    }

    /// Makes a new, empty collection with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            deep_equal: None,
        }
    }

    /// Installs a deep-equality function for [`equal_deep`](Self::equal_deep).
    ///
    /// The function is carried over to every same-kind collection this one
    /// produces (`clone`, `concat`, `filter_to_collection`, `into_chunks`).
    #[must_use]
    pub fn with_deep_equal(mut self, eq: DeepEqualFn<V>) -> Self {
        self.deep_equal = Some(eq);
        self
    }

    /// Empty collection of the same kind: installed capabilities carried over.
    fn empty_like(&self, capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
            deep_equal: self.deep_equal,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the collection holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(&key, &value)` pairs in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Iterates over keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Iterates over values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    /// First inserted value, if any.
    pub fn first(&self) -> Option<&V> {
        self.entries.first().map(|(_, v)| v)
    }

    /// First inserted key, if any.
    pub fn first_key(&self) -> Option<&K> {
        self.entries.first().map(|(k, _)| k)
    }

    /// Most recently inserted value, if any.
    pub fn last(&self) -> Option<&V> {
        self.entries.last().map(|(_, v)| v)
    }

    /// Most recently inserted key, if any.
    pub fn last_key(&self) -> Option<&K> {
        self.entries.last().map(|(k, _)| k)
    }

    /// The first `n` values in insertion order; `n` is clamped to `len`.
    pub fn first_values(&self, n: usize) -> Vec<&V> {
        self.values().take(n).collect()
    }

    /// The first `n` keys in insertion order; `n` is clamped to `len`.
    pub fn first_keys(&self, n: usize) -> Vec<&K> {
        self.keys().take(n).collect()
    }

    /// The last `n` values, still in insertion order; `n` is clamped to `len`.
    pub fn last_values(&self, n: usize) -> Vec<&V> {
        self.values().skip(self.len().saturating_sub(n)).collect()
    }

    /// The last `n` keys, still in insertion order; `n` is clamped to `len`.
    pub fn last_keys(&self, n: usize) -> Vec<&K> {
        self.keys().skip(self.len().saturating_sub(n)).collect()
    }

    /// First value matching `pred`, in insertion order. Short-circuits.
    pub fn find<F>(&self, mut pred: F) -> Option<&V>
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in &self.entries {
            if pred(k, v) {
                return Some(v);
            }
        }
        None
    }

    /// First key matching `pred`, in insertion order. Short-circuits.
    pub fn find_key<F>(&self, mut pred: F) -> Option<&K>
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in &self.entries {
            if pred(k, v) {
                return Some(k);
            }
        }
        None
    }

    /// Whether any entry matches `pred`. Short-circuits on the first match.
    pub fn any<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in &self.entries {
            if pred(k, v) {
                return true;
            }
        }
        false
    }

    /// Whether every entry matches `pred`. Short-circuits on the first
    /// mismatch; vacuously `true` when empty.
    pub fn all<F>(&self, mut pred: F) -> bool
    where
        F: FnMut(&K, &V) -> bool,
    {
        for (k, v) in &self.entries {
            if !pred(k, v) {
                return false;
            }
        }
        true
    }

    /// Applies `f` to every entry in insertion order; the result has exactly
    /// `len` elements.
    pub fn map<T, F>(&self, mut f: F) -> Vec<T>
    where
        F: FnMut(&K, &V) -> T,
    {
        let mut out = Vec::with_capacity(self.len());
        for (k, v) in &self.entries {
            out.push(f(k, v));
        }
        out
    }

    /// Entries matching `pred`, in insertion order.
    pub fn filter<F>(&self, mut pred: F) -> Vec<(&K, &V)>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut hits = Vec::new();
        for (k, v) in &self.entries {
            if pred(k, v) {
                hits.push((k, v));
            }
        }
        hits
    }

    /// Left fold over `(key, value)` pairs in insertion order.
    pub fn fold<B, F>(&self, init: B, mut f: F) -> B
    where
        F: FnMut(B, (&K, &V)) -> B,
    {
        let mut acc = init;
        for entry in &self.entries {
            acc = f(acc, entry);
        }
        acc
    }

    /// Fold seeded by the first entry's value.
    ///
    /// The fold function is not applied to the seed itself; folding starts
    /// from the second entry. A single-entry collection returns that value
    /// unchanged.
    pub fn reduce<F>(&self, mut f: F) -> Result<V, CollectionError>
    where
        V: Clone,
        F: FnMut(V, (&K, &V)) -> V,
    {
        let mut iter = self.entries.iter();
        let (_, seed) = iter.next().ok_or(CollectionError::EmptyCollection)?;
        let mut acc = seed.clone();
        for entry in iter {
            acc = f(acc, entry);
        }
        Ok(acc)
    }
}

impl<K, V> Collection<K, V>
where
    K: Hash + Eq,
{
    /// Gets the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.get(key)
    }

    /// Whether an entry exists for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.contains_key(key)
    }

    /// Inserts a `key -> value` entry, returning the previous value if the
    /// key was present.
    ///
    /// A re-inserted key keeps its original position; a new key goes last.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.entries.insert(key, value)
    }

    /// Removes the entry for `key`, preserving the order of the remaining
    /// entries. O(len).
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized + Hash + Equivalent<K>,
    {
        self.entries.shift_remove(key)
    }

    /// Entry-set equality with `==` on values.
    ///
    /// Lengths are compared first; a mismatch returns `false` without
    /// touching any entry. Entry order does not participate.
    pub fn equal(&self, other: &Self) -> bool
    where
        V: PartialEq,
    {
        self.equal_by(other, |theirs, ours| theirs == ours)
    }

    /// Entry-set equality with the installed deep-equality function.
    ///
    /// Length mismatch and identity resolve before the function is needed;
    /// past those, fails with [`CollectionError::MissingDeepEqual`] if none
    /// was installed on `self`.
    pub fn equal_deep(&self, other: &Self) -> Result<bool, CollectionError> {
        if self.len() != other.len() {
            return Ok(false);
        }
        if ptr::eq(self, other) {
            return Ok(true);
        }
        let deep = self.deep_equal.ok_or(CollectionError::MissingDeepEqual)?;
        Ok(self.equal_by(other, deep))
    }

    fn equal_by<F>(&self, other: &Self, mut eq: F) -> bool
    where
        F: FnMut(&V, &V) -> bool,
    {
        if self.len() != other.len() {
            return false;
        }
        if ptr::eq(self, other) {
            return true;
        }
        for (k, v) in &self.entries {
            match other.entries.get(k) {
                Some(theirs) => {
                    if !eq(theirs, v) {
                        return false;
                    }
                }
                None => return false,
            }
        }
        true
    }
}

impl<K, V> Collection<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Entries matching `pred`, cloned into a plain [`IndexMap`].
    pub fn filter_to_map<F>(&self, mut pred: F) -> IndexMap<K, V>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut hits = IndexMap::new();
        for (k, v) in &self.entries {
            if pred(k, v) {
                hits.insert(k.clone(), v.clone());
            }
        }
        hits
    }

    /// Entries matching `pred`, cloned into a same-kind collection.
    pub fn filter_to_collection<F>(&self, mut pred: F) -> Self
    where
        F: FnMut(&K, &V) -> bool,
    {
        let mut hits = self.empty_like(0);
        for (k, v) in &self.entries {
            if pred(k, v) {
                hits.entries.insert(k.clone(), v.clone());
            }
        }
        hits
    }

    /// Merges `self` and `others` into a new collection.
    ///
    /// Entries are inserted in listed order, so a key occurring several
    /// times ends up with the value of the last collection that carries it.
    pub fn concat(&self, others: &[Self]) -> Self {
        let mut merged = self.clone();
        for other in others {
            for (k, v) in &other.entries {
                merged.entries.insert(k.clone(), v.clone());
            }
        }
        merged
    }

    /// Splits the entries, in insertion order, into same-kind collections of
    /// at most `chunk_len` entries each. The last chunk may be smaller.
    ///
    /// `chunk_len == 0` falls back to [`DEFAULT_CHUNK_LEN`].
    pub fn into_chunks(&self, chunk_len: usize) -> Vec<Self> {
        let chunk_len = if chunk_len == 0 {
            DEFAULT_CHUNK_LEN
        } else {
            chunk_len
        };

        let snapshot: Vec<(&K, &V)> = self.iter().collect();
        snapshot
            .chunks(chunk_len)
            .map(|chunk| {
                let mut part = self.empty_like(chunk.len());
                for &(k, v) in chunk {
                    part.entries.insert(k.clone(), v.clone());
                }
                part
            })
            .collect()
    }
}

/// Random sampling.
///
/// Every method errors with [`CollectionError::EmptyCollection`] on an
/// empty collection, before any index is drawn. The plural methods clamp
/// `amount` to `1..=len`; with `unique` they return pairwise distinct
/// entries, picked by the algorithm the density heuristic selects (see
/// [`crate::sample`]).
///
/// The plain methods draw from `rand::rng()` and are not deterministic
/// across processes; the `*_with_rng` forms exist for deterministic
/// testing.
impl<K, V> Collection<K, V> {
    fn pick_entries<R: Rng + ?Sized>(
        &self,
        amount: usize,
        unique: bool,
        rng: &mut R,
    ) -> Result<Vec<(&K, &V)>, CollectionError> {
        if self.is_empty() {
            return Err(CollectionError::EmptyCollection);
        }
        let amount = amount.clamp(1, self.len());

        Ok(sample::pick_indices_with_rng(self.len(), amount, unique, rng)
            .into_iter()
            .map(|i| self.entries.get_index(i).expect("picked index in bounds"))
            .collect())
    }

    /// One uniformly random value.
    pub fn random_value(&self) -> Result<&V, CollectionError> {
        self.random_value_with_rng(&mut rand::rng())
    }

    /// [`random_value`](Self::random_value) with a caller-supplied RNG.
    pub fn random_value_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&V, CollectionError> {
        self.random_entry_with_rng(rng).map(|(_, v)| v)
    }

    /// One uniformly random key.
    pub fn random_key(&self) -> Result<&K, CollectionError> {
        self.random_key_with_rng(&mut rand::rng())
    }

    /// [`random_key`](Self::random_key) with a caller-supplied RNG.
    pub fn random_key_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&K, CollectionError> {
        self.random_entry_with_rng(rng).map(|(k, _)| k)
    }

    /// One uniformly random `(key, value)` entry.
    pub fn random_entry(&self) -> Result<(&K, &V), CollectionError> {
        self.random_entry_with_rng(&mut rand::rng())
    }

    /// [`random_entry`](Self::random_entry) with a caller-supplied RNG.
    pub fn random_entry_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(&K, &V), CollectionError> {
        self.pick_entries(1, false, rng).map(|entries| entries[0])
    }

    /// `amount` uniformly random values; `amount` is clamped to `1..=len`.
    pub fn random_values(&self, amount: usize, unique: bool) -> Result<Vec<&V>, CollectionError> {
        self.random_values_with_rng(amount, unique, &mut rand::rng())
    }

    /// [`random_values`](Self::random_values) with a caller-supplied RNG.
    pub fn random_values_with_rng<R: Rng + ?Sized>(
        &self,
        amount: usize,
        unique: bool,
        rng: &mut R,
    ) -> Result<Vec<&V>, CollectionError> {
        let picked = self.pick_entries(amount, unique, rng)?;
        Ok(picked.into_iter().map(|(_, v)| v).collect())
    }

    /// `amount` uniformly random keys; `amount` is clamped to `1..=len`.
    pub fn random_keys(&self, amount: usize, unique: bool) -> Result<Vec<&K>, CollectionError> {
        self.random_keys_with_rng(amount, unique, &mut rand::rng())
    }

    /// [`random_keys`](Self::random_keys) with a caller-supplied RNG.
    pub fn random_keys_with_rng<R: Rng + ?Sized>(
        &self,
        amount: usize,
        unique: bool,
        rng: &mut R,
    ) -> Result<Vec<&K>, CollectionError> {
        let picked = self.pick_entries(amount, unique, rng)?;
        Ok(picked.into_iter().map(|(k, _)| k).collect())
    }

    /// `amount` uniformly random `(key, value)` entries; `amount` is clamped
    /// to `1..=len`.
    pub fn random_entries(
        &self,
        amount: usize,
        unique: bool,
    ) -> Result<Vec<(&K, &V)>, CollectionError> {
        self.random_entries_with_rng(amount, unique, &mut rand::rng())
    }

    /// [`random_entries`](Self::random_entries) with a caller-supplied RNG.
    pub fn random_entries_with_rng<R: Rng + ?Sized>(
        &self,
        amount: usize,
        unique: bool,
        rng: &mut R,
    ) -> Result<Vec<(&K, &V)>, CollectionError> {
        self.pick_entries(amount, unique, rng)
    }
}

impl<K, V> Default for Collection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Collection<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Hash + Eq, V: PartialEq> PartialEq for Collection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl<K: Hash + Eq, V: Eq> Eq for Collection<K, V> {}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for Collection<K, V> {
    /// Collects `(key, value)` pairs; for duplicate keys the last value wins.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: IndexMap::from_iter(iter),
            deep_equal: None,
        }
    }
}

impl<K: Hash + Eq, V, const N: usize> From<[(K, V); N]> for Collection<K, V> {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for Collection<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.entries.extend(iter);
    }
}

impl<K, V> IntoIterator for Collection<K, V> {
    type Item = (K, V);
    type IntoIter = indexmap::map::IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Collection<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = indexmap::map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
