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

use super::BloomFilter;
use super::bit_vector::BitVector;
use super::cache::HashCache;
use super::state::FilterState;
use crate::hash;

/// Default number of hash functions.
pub const DEFAULT_K: u16 = 7;
/// Default bit-vector length.
pub const DEFAULT_M: u64 = 220_705;
/// Default target false-positive rate.
pub const DEFAULT_P: f64 = 0.01;
/// Default estimated number of distinct keys.
pub const DEFAULT_N: u64 = 10_000;
/// Default position-cache entry limit.
pub const DEFAULT_CACHE: usize = 1000;

/// Smallest supported bit-vector length.
pub const MIN_NUM_BITS: u64 = 1;
/// Largest supported bit-vector length.
pub const MAX_NUM_BITS: u64 = (1u64 << 35) - 64;
/// Smallest supported number of hash functions.
pub const MIN_NUM_HASHES: u16 = 1;
/// Largest supported number of hash functions.
pub const MAX_NUM_HASHES: u16 = i16::MAX as u16;

/// Builder for creating [`BloomFilter`] instances.
///
/// Every parameter is optional and falls back to the filter defaults.
/// When both `n` and `p` are supplied and `m` (resp. `k`) is not, the
/// missing sizes are derived with [`BloomFilter::optimize_m`] and
/// [`BloomFilter::optimize_k`]; explicitly supplied values always win,
/// and an explicit `m` participates in the derivation of `k`.
///
/// # Examples
///
/// ```
/// use bloomy::filter::BloomFilterBuilder;
///
/// // Sized from an accuracy target.
/// let filter = BloomFilterBuilder::default().n(10_000).p(0.01).build();
/// assert_eq!(filter.m(), 95_851);
/// assert_eq!(filter.k(), 7);
///
/// // All defaults.
/// let filter = BloomFilterBuilder::default().build();
/// assert_eq!(filter.m(), 220_705);
/// assert_eq!(filter.k(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BloomFilterBuilder {
    n: Option<u64>,
    m: Option<u64>,
    p: Option<f64>,
    k: Option<u16>,
    cache: Option<usize>,
}

impl BloomFilterBuilder {
    /// Sets the estimated number of distinct keys.
    ///
    /// # Panics
    ///
    /// Panics if `n` is 0.
    pub fn n(mut self, n: u64) -> Self {
        assert!(n > 0, "n must be greater than 0");
        self.n = Some(n);
        self
    }

    /// Sets the bit-vector length.
    ///
    /// # Panics
    ///
    /// Panics if `m` is 0 or exceeds [`MAX_NUM_BITS`].
    pub fn m(mut self, m: u64) -> Self {
        assert!(m >= MIN_NUM_BITS, "m must be at least {}", MIN_NUM_BITS);
        assert!(m <= MAX_NUM_BITS, "m must not exceed {}", MAX_NUM_BITS);
        self.m = Some(m);
        self
    }

    /// Sets the target false-positive rate.
    ///
    /// # Panics
    ///
    /// Panics if `p` is not in (0.0, 1.0).
    pub fn p(mut self, p: f64) -> Self {
        assert!(
            p > 0.0 && p < 1.0,
            "p must be between 0.0 and 1.0 (exclusive)"
        );
        self.p = Some(p);
        self
    }

    /// Sets the number of hash functions.
    ///
    /// # Panics
    ///
    /// Panics if `k` is 0 or exceeds [`MAX_NUM_HASHES`].
    pub fn k(mut self, k: u16) -> Self {
        assert!(k >= MIN_NUM_HASHES, "k must be at least {}", MIN_NUM_HASHES);
        assert!(k <= MAX_NUM_HASHES, "k must not exceed {}", MAX_NUM_HASHES);
        self.k = Some(k);
        self
    }

    /// Sets the position-cache entry limit. A limit of zero disables
    /// caching; results are unaffected either way.
    pub fn cache(mut self, limit: usize) -> Self {
        self.cache = Some(limit);
        self
    }

    /// Builds the Bloom filter.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilterBuilder;
    ///
    /// // An explicit m wins over derivation and feeds the derived k.
    /// let filter = BloomFilterBuilder::default()
    ///     .n(10_000)
    ///     .p(0.01)
    ///     .m(50_000)
    ///     .build();
    /// assert_eq!(filter.m(), 50_000);
    /// assert_eq!(filter.k(), 4);
    /// ```
    pub fn build(self) -> BloomFilter {
        let n = self.n.unwrap_or(DEFAULT_N);
        let p = self.p.unwrap_or(DEFAULT_P);

        // Derivation engages only when the caller stated both an element
        // estimate and an accuracy target.
        let (m, k) = if self.n.is_some() && self.p.is_some() {
            let m = self.m.unwrap_or_else(|| BloomFilter::optimize_m(n, p));
            let k = self.k.unwrap_or_else(|| BloomFilter::optimize_k(m, n));
            (m, k)
        } else {
            (self.m.unwrap_or(DEFAULT_M), self.k.unwrap_or(DEFAULT_K))
        };

        let mut filter = BloomFilter {
            n,
            m,
            p,
            k,
            state: FilterState::default(),
            hashes: hash::compose(k),
            cache: HashCache::new(self.cache.unwrap_or(DEFAULT_CACHE)),
            bits: BitVector::new(m),
        };
        filter.recompute_state();
        filter
    }
}
