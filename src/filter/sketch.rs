// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::f64::consts::LN_2;

use crate::error::Error;
use crate::filter::BloomFilterBuilder;
use crate::filter::FilterState;
use crate::filter::bit_vector::BitVector;
use crate::filter::builder::MAX_NUM_BITS;
use crate::filter::builder::MAX_NUM_HASHES;
use crate::filter::builder::MIN_NUM_BITS;
use crate::filter::builder::MIN_NUM_HASHES;
use crate::filter::cache::HashCache;
use crate::hash;
use crate::hash::HashStrategy;

/// A Bloom filter for probabilistic set-membership tests over byte keys.
///
/// Recording a key sets `k` bit positions in a vector of `m` bits; a
/// membership test checks those same positions. Recorded keys always
/// test `true` (no false negatives), while unrecorded keys test `true`
/// with a probability that grows as the filter fills.
///
/// Parameters stay adjustable until the first key is recorded, after
/// which the filter freezes its shape for good. Use
/// [`BloomFilterBuilder`] to construct instances.
///
/// # Examples
///
/// ```
/// use bloomy::filter::BloomFilter;
///
/// let mut filter = BloomFilter::builder().n(1_000).p(0.01).build();
/// filter.add("apple");
///
/// assert!(filter.test("apple"));
/// assert!(!filter.test("grape"));
/// ```
#[derive(Debug, Clone)]
pub struct BloomFilter {
    /// Estimated number of distinct keys (n)
    pub(super) n: u64,
    /// Bit-vector length (m)
    pub(super) m: u64,
    /// Target false-positive rate (p)
    pub(super) p: f64,
    /// Number of hash functions (k)
    pub(super) k: u16,
    /// Parameter lifecycle state
    pub(super) state: FilterState,
    /// Ordered hash functions, recomposed whenever k changes
    pub(super) hashes: Vec<HashStrategy>,
    /// FIFO cache of per-key bit positions
    pub(super) cache: HashCache,
    /// Bit storage of logical length m
    pub(super) bits: BitVector,
}

impl BloomFilter {
    /// Returns a [`BloomFilterBuilder`] to create a `BloomFilter`.
    pub fn builder() -> BloomFilterBuilder {
        BloomFilterBuilder::default()
    }

    /// Records a key in the filter.
    ///
    /// The first recorded key freezes `m`, `k`, `n` and `p` for the
    /// lifetime of the filter. Recording a key again changes nothing.
    pub fn add<K: AsRef<[u8]>>(&mut self, key: K) {
        let positions = self.positions(key.as_ref());
        for position in positions {
            self.bits.set(position);
        }
        self.state = FilterState::Immutable;
    }

    /// Tests whether a key was possibly recorded.
    ///
    /// Returns `false` only for keys that were definitely never
    /// recorded; a `true` result may be a false positive. Takes
    /// `&mut self` because a miss populates the shared position cache;
    /// answers are identical with caching disabled.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// assert!(!filter.test("apple"));
    ///
    /// filter.add("apple");
    /// assert!(filter.test("apple"));
    /// ```
    pub fn test<K: AsRef<[u8]>>(&mut self, key: K) -> bool {
        let positions = self.positions(key.as_ref());
        positions.iter().all(|&position| self.bits.get(position))
    }

    /// Re-sizes the filter for `n` expected keys at false-positive rate
    /// `p`, applying [`optimize_m`](Self::optimize_m) and
    /// [`optimize_k`](Self::optimize_k) through the regular setters. The
    /// supplied `n` and `p` themselves are not stored.
    ///
    /// # Errors
    ///
    /// Returns an `InvalidParameter` error if `n` is 0 or `p` lies
    /// outside (0.0, 1.0), and an `ImmutableViolation` error once a key
    /// has been recorded.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// filter.optimize(10_000, 0.01)?;
    /// assert_eq!(filter.m(), 95_851);
    /// assert_eq!(filter.k(), 7);
    /// # Ok::<(), bloomy::error::Error>(())
    /// ```
    pub fn optimize(&mut self, n: u64, p: f64) -> Result<(), Error> {
        if n == 0 {
            return Err(Error::invalid_parameter("n must be greater than 0"));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(
                Error::invalid_parameter("p must be between 0.0 and 1.0 (exclusive)")
                    .with_context("p", p),
            );
        }
        let m = Self::optimize_m(n, p);
        let k = Self::optimize_k(m, n);
        self.set_m(m)?;
        self.set_k(k)
    }

    /// Sets the bit-vector length, replacing the still-empty bit
    /// storage and clearing the position cache.
    ///
    /// # Errors
    ///
    /// Returns an `ImmutableViolation` error once a key has been
    /// recorded, and an `InvalidParameter` error if `m` is 0 or exceeds
    /// [`MAX_NUM_BITS`](super::MAX_NUM_BITS).
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::error::ErrorKind;
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// filter.set_m(95_851)?;
    /// assert_eq!(filter.m(), 95_851);
    ///
    /// filter.add("first");
    /// let err = filter.set_m(1_000).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::ImmutableViolation);
    /// # Ok::<(), bloomy::error::Error>(())
    /// ```
    pub fn set_m(&mut self, m: u64) -> Result<(), Error> {
        if self.state == FilterState::Immutable {
            return Err(Error::immutable("m"));
        }
        if !(MIN_NUM_BITS..=MAX_NUM_BITS).contains(&m) {
            return Err(Error::invalid_parameter("m out of supported range")
                .with_context("m", m)
                .with_context("max", MAX_NUM_BITS));
        }
        self.m = m;
        self.bits = BitVector::new(m);
        self.cache.clear();
        self.recompute_state();
        Ok(())
    }

    /// Sets the number of hash functions, recomposing the hash list and
    /// clearing the position cache.
    ///
    /// # Errors
    ///
    /// Returns an `ImmutableViolation` error once a key has been
    /// recorded, and an `InvalidParameter` error if `k` is 0 or exceeds
    /// [`MAX_NUM_HASHES`](super::MAX_NUM_HASHES).
    pub fn set_k(&mut self, k: u16) -> Result<(), Error> {
        if self.state == FilterState::Immutable {
            return Err(Error::immutable("k"));
        }
        if !(MIN_NUM_HASHES..=MAX_NUM_HASHES).contains(&k) {
            return Err(Error::invalid_parameter("k out of supported range")
                .with_context("k", k)
                .with_context("max", MAX_NUM_HASHES));
        }
        self.k = k;
        self.hashes = hash::compose(k);
        self.cache.clear();
        self.recompute_state();
        Ok(())
    }

    /// Sets the estimated number of distinct keys. Advisory only; the
    /// bit vector and hash list are untouched.
    ///
    /// # Errors
    ///
    /// Returns an `ImmutableViolation` error once a key has been
    /// recorded, and an `InvalidParameter` error if `n` is 0.
    pub fn set_n(&mut self, n: u64) -> Result<(), Error> {
        if self.state == FilterState::Immutable {
            return Err(Error::immutable("n"));
        }
        if n == 0 {
            return Err(Error::invalid_parameter("n must be greater than 0"));
        }
        self.n = n;
        self.recompute_state();
        Ok(())
    }

    /// Sets the target false-positive rate. Advisory only; the bit
    /// vector and hash list are untouched.
    ///
    /// # Errors
    ///
    /// Returns an `ImmutableViolation` error once a key has been
    /// recorded, and an `InvalidParameter` error if `p` lies outside
    /// (0.0, 1.0).
    pub fn set_p(&mut self, p: f64) -> Result<(), Error> {
        if self.state == FilterState::Immutable {
            return Err(Error::immutable("p"));
        }
        if !(p > 0.0 && p < 1.0) {
            return Err(
                Error::invalid_parameter("p must be between 0.0 and 1.0 (exclusive)")
                    .with_context("p", p),
            );
        }
        self.p = p;
        self.recompute_state();
        Ok(())
    }

    /// Optimal bit-vector length for `n` keys at false-positive rate
    /// `p`: `ceil(-n * ln(p) / ln(2)^2)`, clamped to the supported
    /// range.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0 or `p` is not in (0.0, 1.0).
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// assert_eq!(BloomFilter::optimize_m(10_000, 0.01), 95_851);
    /// ```
    pub fn optimize_m(n: u64, p: f64) -> u64 {
        assert!(n > 0, "n must be greater than 0");
        assert!(
            p > 0.0 && p < 1.0,
            "p must be between 0.0 and 1.0 (exclusive)"
        );

        let bits = (-(n as f64) * p.ln() / (LN_2 * LN_2)).ceil() as u64;
        bits.clamp(MIN_NUM_BITS, MAX_NUM_BITS)
    }

    /// Optimal number of hash functions for a filter of `m` bits
    /// holding `n` keys: `ceil((m / n) * ln(2))`, clamped to the
    /// supported range. Rounds up, never down.
    ///
    /// # Panics
    ///
    /// Panics if `m` or `n` is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// assert_eq!(BloomFilter::optimize_k(95_851, 10_000), 7);
    /// assert_eq!(BloomFilter::optimize_k(50_000, 10_000), 4);
    /// ```
    pub fn optimize_k(m: u64, n: u64) -> u16 {
        assert!(m > 0, "m must be greater than 0");
        assert!(n > 0, "n must be greater than 0");

        let hashes = (m as f64 / n as f64 * LN_2).ceil();
        hashes.clamp(f64::from(MIN_NUM_HASHES), f64::from(MAX_NUM_HASHES)) as u16
    }

    /// Estimates how many distinct keys have been recorded, from the
    /// count of set bits: `-(m * ln(1 - X/m)) / k` where `X` is the
    /// number of set bits.
    ///
    /// Returns `0.0` for an empty filter and [`f64::INFINITY`] once
    /// every bit is set, where the estimate diverges.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
    /// assert_eq!(filter.estimate_cardinality(), 0.0);
    ///
    /// for fruit in ["apple", "banana", "cherry"] {
    ///     filter.add(fruit);
    /// }
    /// let estimate = filter.estimate_cardinality();
    /// assert!(estimate > 2.0 && estimate < 4.0);
    /// ```
    pub fn estimate_cardinality(&self) -> f64 {
        let set = self.bits.count();
        if set == self.bits.len() {
            return f64::INFINITY;
        }
        let m = self.m as f64;
        -(m * (1.0 - set as f64 / m).ln()) / f64::from(self.k)
    }

    /// Returns the bit-vector length (m).
    pub fn m(&self) -> u64 {
        self.m
    }

    /// Returns the number of hash functions (k).
    pub fn k(&self) -> u16 {
        self.k
    }

    /// Returns the estimated number of distinct keys (n).
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Returns the target false-positive rate (p).
    pub fn p(&self) -> f64 {
        self.p
    }

    /// Returns the parameter lifecycle state.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    /// use bloomy::filter::FilterState;
    ///
    /// let mut filter = BloomFilter::default();
    /// assert_eq!(filter.state(), FilterState::Ready);
    ///
    /// filter.add("key");
    /// assert_eq!(filter.state(), FilterState::Immutable);
    /// ```
    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Returns the ordered hash functions currently in use.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let filter = BloomFilter::default();
    /// assert_eq!(filter.hashes().len(), 7);
    /// assert_eq!(filter.hashes()[0].to_string(), "fnv1a");
    /// ```
    pub fn hashes(&self) -> &[HashStrategy] {
        &self.hashes
    }

    /// Returns true if no key has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.bits.count() == 0
    }

    /// Returns the number of bits currently set to 1.
    pub fn bits_used(&self) -> u64 {
        self.bits.count()
    }

    /// Returns the fraction of bits set to 1. Values above 0.5 signal a
    /// badly degraded false-positive rate.
    pub fn load_factor(&self) -> f64 {
        self.bits.count() as f64 / self.m as f64
    }

    /// Estimates the false-positive probability at the current fill,
    /// as the chance that k independently drawn positions are all set:
    /// `load_factor ^ k`.
    pub fn estimated_fpp(&self) -> f64 {
        self.load_factor().powf(f64::from(self.k))
    }

    /// Returns the number of entries held by the position cache.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Derives the k bit positions for a key, going through the cache.
    fn positions(&mut self, key: &[u8]) -> Vec<u64> {
        if let Some(cached) = self.cache.get(key) {
            return cached.to_vec();
        }
        let positions: Vec<u64> = self
            .hashes
            .iter()
            .map(|strategy| strategy.hash(key) % self.m)
            .collect();
        self.cache.insert(key, positions.clone());
        positions
    }

    /// Recomputes the lifecycle state after a parameter change. The
    /// frozen state is terminal and never recomputed away.
    pub(super) fn recompute_state(&mut self) {
        if self.state == FilterState::Immutable {
            return;
        }
        self.state = if self.m > 0 && self.k > 0 {
            FilterState::Ready
        } else {
            FilterState::Created
        };
    }
}

impl Default for BloomFilter {
    fn default() -> Self {
        BloomFilter::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_test() {
        let mut filter = BloomFilter::default();
        filter.add("apple");
        filter.add(b"banana".as_slice());
        assert!(filter.test("apple"));
        assert!(filter.test("banana"));
        assert!(!filter.test("cherry"));
    }

    #[test]
    fn test_add_is_idempotent_on_bits() {
        let mut filter = BloomFilter::default();
        filter.add("apple");
        let used = filter.bits_used();
        filter.add("apple");
        assert_eq!(filter.bits_used(), used);
    }

    #[test]
    fn test_answers_match_with_caching_disabled() {
        let mut cached = BloomFilter::builder().cache(1000).build();
        let mut uncached = BloomFilter::builder().cache(0).build();
        for i in 0..100u32 {
            let key = format!("key-{i}");
            cached.add(&key);
            uncached.add(&key);
        }
        for i in 0..200u32 {
            let key = format!("key-{i}");
            assert_eq!(cached.test(&key), uncached.test(&key), "key {key}");
        }
    }

    #[test]
    fn test_state_flow() {
        let mut filter = BloomFilter::default();
        assert_eq!(filter.state(), FilterState::Ready);

        filter.set_n(500).unwrap();
        filter.set_p(0.001).unwrap();
        filter.set_m(10_000).unwrap();
        filter.set_k(5).unwrap();
        assert_eq!(filter.state(), FilterState::Ready);

        filter.add("key");
        assert_eq!(filter.state(), FilterState::Immutable);
        assert!(filter.set_m(20_000).is_err());
        assert!(filter.set_k(3).is_err());
        assert!(filter.set_n(1).is_err());
        assert!(filter.set_p(0.5).is_err());
        assert!(filter.optimize(100, 0.1).is_err());
        assert_eq!(filter.state(), FilterState::Immutable);
    }

    #[test]
    fn test_set_k_recomposes_hashes() {
        let mut filter = BloomFilter::default();
        assert_eq!(filter.hashes().len(), 7);

        filter.set_k(2).unwrap();
        assert_eq!(filter.hashes().len(), 2);

        filter.set_k(9).unwrap();
        assert_eq!(filter.hashes().len(), 9);
    }

    #[test]
    fn test_set_m_resets_bit_storage() {
        let mut filter = BloomFilter::default();
        assert!(!filter.test("apple"));
        filter.set_m(4_096).unwrap();
        assert_eq!(filter.m(), 4_096);
        assert_eq!(filter.bits_used(), 0);
        assert!(!filter.test("apple"));
    }

    #[test]
    fn test_resize_clears_position_cache() {
        let mut filter = BloomFilter::default();
        assert!(!filter.test("apple"));
        assert_eq!(filter.cache_len(), 1);

        filter.set_m(4_096).unwrap();
        assert_eq!(filter.cache_len(), 0);

        assert!(!filter.test("apple"));
        assert_eq!(filter.cache_len(), 1);
    }

    #[test]
    fn test_estimate_cardinality_empty() {
        let filter = BloomFilter::default();
        assert_eq!(filter.estimate_cardinality(), 0.0);
    }

    #[test]
    fn test_estimate_cardinality_saturated() {
        let mut filter = BloomFilter::builder().m(8).k(1).build();
        for i in 0..1_000u32 {
            filter.add(format!("key-{i}"));
        }
        assert_eq!(filter.bits_used(), 8);
        assert!(filter.estimate_cardinality().is_infinite());
    }

    #[test]
    fn test_fill_statistics() {
        let mut filter = BloomFilter::builder().n(1_000).p(0.01).build();
        assert!(filter.is_empty());
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.estimated_fpp(), 0.0);

        for i in 0..1_000u32 {
            filter.add(format!("key-{i}"));
        }
        assert!(!filter.is_empty());
        assert!(filter.load_factor() > 0.0 && filter.load_factor() < 1.0);
        assert!(filter.estimated_fpp() > 0.0 && filter.estimated_fpp() < 0.05);
    }
}
