//! Bounded memoization of expensive primitives.
//!
//! [`MathCache`] remembers square roots, factorials and trigonometric values in
//! least-recently-used maps. Only successful results are stored, and every
//! domain check runs before a lookup, so an evaluator behaves identically with
//! and without a cache.

use std::{
    collections::{BTreeMap, HashMap},
    hash::Hash,
};

use num_bigint::BigInt;
use ordered_float::OrderedFloat;

use crate::{
    interpreter::evaluator::core::EvalResult,
    primitives::{factorial::factorial_u64, roots::real_sqrt, trig::TrigFunction},
};

/// Default number of entries kept per memoized function.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;
/// Factorials `0!` through this value are stored when a cache is created.
pub const PRECOMPUTED_FACTORIALS: u64 = 20;

/// A hashable angle or operand. The sign flag keeps `-0.0` apart from `0.0`,
/// which `OrderedFloat` alone treats as equal.
type FloatKey = (OrderedFloat<f64>, bool);

fn float_key(value: f64) -> FloatKey {
    (OrderedFloat(value), value.is_sign_negative())
}

/// A least-recently-used map.
///
/// Recency is tracked with a monotonically increasing tick; `order` maps each
/// entry's last-use tick back to its key so the oldest entry is the first key
/// of the `BTreeMap`.
#[derive(Debug, Clone)]
struct LruMap<K, V> {
    capacity: usize,
    tick:     u64,
    entries:  HashMap<K, (V, u64)>,
    order:    BTreeMap<u64, K>,
}

impl<K, V> LruMap<K, V>
    where K: Eq + Hash + Clone,
          V: Clone
{
    fn new(capacity: usize) -> Self {
        Self { capacity,
               tick: 0,
               entries: HashMap::new(),
               order: BTreeMap::new() }
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn next_tick(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    fn get(&mut self, key: &K) -> Option<V> {
        let tick = self.next_tick();
        let (value, last_used) = self.entries.get_mut(key)?;
        self.order.remove(&*last_used);
        *last_used = tick;
        self.order.insert(tick, key.clone());
        Some(value.clone())
    }

    fn insert(&mut self, key: K, value: V) {
        if self.capacity == 0 {
            return;
        }
        let tick = self.next_tick();
        if let Some((_, last_used)) = self.entries.insert(key.clone(), (value, tick)) {
            self.order.remove(&last_used);
        }
        self.order.insert(tick, key);

        while self.entries.len() > self.capacity {
            let Some((_, oldest)) = self.order.pop_first() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Hit and miss counters for one memoized function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    /// Entries currently stored.
    pub entries: usize,
    /// Lookups answered from the cache.
    pub hits:    u64,
    /// Lookups that had to compute the value.
    pub misses:  u64,
}

/// A snapshot of cache usage, as returned by [`MathCache::stats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Maximum entries per memoized function.
    pub capacity:  usize,
    /// Square root cache usage.
    pub sqrt:      CacheCounters,
    /// Factorial cache usage.
    pub factorial: CacheCounters,
    /// Trigonometry cache usage.
    pub trig:      CacheCounters,
}

impl CacheStats {
    /// Total hits across all memoized functions.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.sqrt.hits + self.factorial.hits + self.trig.hits
    }

    /// Total misses across all memoized functions.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.sqrt.misses + self.factorial.misses + self.trig.misses
    }
}

impl std::fmt::Display for CacheStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f,
               "capacity {}: sqrt {}/{} hits, factorial {}/{} hits, trig {}/{} hits ({} + {} + {} entries)",
               self.capacity,
               self.sqrt.hits,
               self.sqrt.hits + self.sqrt.misses,
               self.factorial.hits,
               self.factorial.hits + self.factorial.misses,
               self.trig.hits,
               self.trig.hits + self.trig.misses,
               self.sqrt.entries,
               self.factorial.entries,
               self.trig.entries)
    }
}

/// A memoizing layer over [`LruMap`] that counts hits and misses.
#[derive(Debug, Clone)]
struct Memo<K, V> {
    map:    LruMap<K, V>,
    hits:   u64,
    misses: u64,
}

impl<K, V> Memo<K, V>
    where K: Eq + Hash + Clone,
          V: Clone
{
    fn new(capacity: usize) -> Self {
        Self { map:    LruMap::new(capacity),
               hits:   0,
               misses: 0, }
    }

    /// Returns the cached value for `key`, or computes it and caches it on
    /// success. Errors are returned without being stored.
    fn get_or_try_insert_with(&mut self,
                              key: K,
                              compute: impl FnOnce() -> EvalResult<V>)
                              -> EvalResult<V> {
        if let Some(value) = self.map.get(&key) {
            self.hits += 1;
            return Ok(value);
        }
        self.misses += 1;
        let value = compute()?;
        self.map.insert(key, value.clone());
        Ok(value)
    }

    fn get_or_insert_with(&mut self, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.map.get(&key) {
            self.hits += 1;
            return value;
        }
        self.misses += 1;
        let value = compute();
        self.map.insert(key, value.clone());
        value
    }

    fn counters(&self) -> CacheCounters {
        CacheCounters { entries: self.map.len(),
                        hits:    self.hits,
                        misses:  self.misses, }
    }

    fn clear(&mut self) {
        self.map.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Memoizes square roots, factorials and trigonometric values.
///
/// # Example
/// ```
/// use safecalc::cache::MathCache;
///
/// let mut cache = MathCache::new(16);
/// assert_eq!(cache.sqrt(144.0).unwrap(), 12.0);
/// assert_eq!(cache.sqrt(144.0).unwrap(), 12.0);
///
/// let stats = cache.stats();
/// assert_eq!(stats.sqrt.hits, 1);
/// assert_eq!(stats.sqrt.misses, 1);
///
/// // Failures are reported but never stored.
/// assert!(cache.sqrt(-1.0).is_err());
/// assert_eq!(cache.stats().sqrt.entries, 1);
/// ```
#[derive(Debug, Clone)]
pub struct MathCache {
    capacity:  usize,
    sqrt:      Memo<FloatKey, f64>,
    factorial: Memo<u64, BigInt>,
    trig:      Memo<(TrigFunction, FloatKey), f64>,
}

impl MathCache {
    /// Creates a cache holding up to `capacity` entries per function, with
    /// small factorials precomputed.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let mut cache = Self { capacity,
                               sqrt: Memo::new(capacity),
                               factorial: Memo::new(capacity),
                               trig: Memo::new(capacity) };
        cache.precompute();
        cache
    }

    fn precompute(&mut self) {
        let mut value = BigInt::from(1);
        self.factorial.map.insert(0, value.clone());
        for n in 1..=PRECOMPUTED_FACTORIALS {
            value *= n;
            self.factorial.map.insert(n, value.clone());
        }
    }

    /// Square root of `value`.
    ///
    /// # Errors
    /// Negative inputs, as for [`real_sqrt`].
    pub fn sqrt(&mut self, value: f64) -> EvalResult<f64> {
        self.sqrt
            .get_or_try_insert_with(float_key(value), || real_sqrt(value))
    }

    /// Exact factorial of an already validated argument.
    pub fn factorial(&mut self, n: u64) -> BigInt {
        self.factorial.get_or_insert_with(n, || factorial_u64(n))
    }

    /// A trigonometric function of an angle in degrees.
    ///
    /// # Errors
    /// Poles of the tangent, as for [`TrigFunction::apply_degrees`].
    pub fn trig(&mut self, function: TrigFunction, degrees: f64) -> EvalResult<f64> {
        self.trig
            .get_or_try_insert_with((function, float_key(degrees)), || {
                function.apply_degrees(degrees)
            })
    }

    /// Returns usage statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats { capacity:  self.capacity,
                     sqrt:      self.sqrt.counters(),
                     factorial: self.factorial.counters(),
                     trig:      self.trig.counters(), }
    }

    /// Empties every map and resets the counters, then restores the
    /// precomputed factorials.
    pub fn clear(&mut self) {
        self.sqrt.clear();
        self.factorial.clear();
        self.trig.clear();
        self.precompute();
    }
}

impl Default for MathCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
