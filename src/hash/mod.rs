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

//! Hash strategies for position derivation.
//!
//! A filter with `k` hash functions draws the first entries from
//! [`HASH_ORDER`] and fills any remaining slots with derived strategies
//! stacked over the first entry of the order. Every strategy maps
//! arbitrary bytes to a `u64` through a single `hash` capability;
//! strategies are selected once at configuration time and never
//! re-resolved per call.

mod crc32;
mod fnv;
mod jenkins;
mod murmur;
mod pearson;

/// A named, self-contained hash function over byte input.
///
/// All strategies are total: any byte sequence, including the empty one,
/// hashes to a deterministic `u64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeHash {
    /// FNV-1a, 64-bit.
    Fnv1a,
    /// Jenkins one-at-a-time, 32-bit result widened to 64.
    Jenkins,
    /// Eight-lane Pearson hashing over a fixed permutation table.
    Pearson16,
    /// CRC-32 (reflected polynomial 0xEDB88320), widened to 64.
    Crc32,
    /// MurmurHash3 x64-128, low half, fixed seed.
    Murmur3,
}

impl NativeHash {
    /// Hash `bytes` with this strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::hash::NativeHash;
    ///
    /// assert_eq!(NativeHash::Crc32.hash(b"123456789"), 0xcbf43926);
    /// assert_eq!(NativeHash::Fnv1a.hash(b""), 0xcbf29ce484222325);
    /// ```
    pub fn hash(&self, bytes: &[u8]) -> u64 {
        match self {
            NativeHash::Fnv1a => fnv::hash(bytes),
            NativeHash::Jenkins => jenkins::hash(bytes),
            NativeHash::Pearson16 => pearson::hash(bytes),
            NativeHash::Crc32 => crc32::hash(bytes),
            NativeHash::Murmur3 => murmur::hash(bytes),
        }
    }

    /// The strategy's registry name.
    pub const fn name(&self) -> &'static str {
        match self {
            NativeHash::Fnv1a => "fnv1a",
            NativeHash::Jenkins => "jenkins",
            NativeHash::Pearson16 => "pearson16",
            NativeHash::Crc32 => "crc32",
            NativeHash::Murmur3 => "murmur3",
        }
    }
}

impl std::fmt::Display for NativeHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The fixed order in which native strategies are assigned to hash slots.
///
/// The order is observable through
/// [`BloomFilter::hashes`](crate::filter::BloomFilter::hashes) and is part
/// of the filter's deterministic contract. [`NativeHash::Murmur3`] is not
/// part of the default order.
pub const HASH_ORDER: [NativeHash; 4] = [
    NativeHash::Fnv1a,
    NativeHash::Jenkins,
    NativeHash::Pearson16,
    NativeHash::Crc32,
];

/// One slot in a filter's hash-function list: either a native strategy or
/// a derived strategy stacked over a native base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashStrategy {
    /// A native strategy used directly.
    Native(NativeHash),
    /// A strategy derived from a native base by a fixed combination
    /// formula: `base(x) + base(x) * index` in wrapping arithmetic.
    Derived {
        /// The native strategy the derivation stacks over.
        base: NativeHash,
        /// The derivation index; each index yields a distinct function.
        index: u64,
        /// Optional range reduction applied to the combined value.
        modulus: Option<u64>,
    },
}

impl HashStrategy {
    /// A derived strategy over `base` with the given index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is zero (the combination would collapse into
    /// `base` itself).
    pub fn derived(base: NativeHash, index: u64) -> Self {
        assert!(index > 0, "derivation index must be positive");
        HashStrategy::Derived {
            base,
            index,
            modulus: None,
        }
    }

    /// A derived strategy whose combined value is reduced modulo
    /// `modulus`.
    ///
    /// # Panics
    ///
    /// Panics if `index` or `modulus` is zero.
    pub fn derived_with_modulus(base: NativeHash, index: u64, modulus: u64) -> Self {
        assert!(index > 0, "derivation index must be positive");
        assert!(modulus > 0, "modulus must be positive");
        HashStrategy::Derived {
            base,
            index,
            modulus: Some(modulus),
        }
    }

    /// Hash `bytes` with this strategy.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::hash::HashStrategy;
    /// use bloomy::hash::NativeHash;
    ///
    /// let base = NativeHash::Fnv1a.hash(b"key");
    /// let stacked = HashStrategy::derived(NativeHash::Fnv1a, 2);
    /// assert_eq!(stacked.hash(b"key"), base.wrapping_add(base.wrapping_mul(2)));
    /// ```
    pub fn hash(&self, bytes: &[u8]) -> u64 {
        match self {
            HashStrategy::Native(native) => native.hash(bytes),
            HashStrategy::Derived {
                base,
                index,
                modulus,
            } => {
                let h = base.hash(bytes);
                let combined = h.wrapping_add(h.wrapping_mul(*index));
                match modulus {
                    Some(modulus) => combined % modulus,
                    None => combined,
                }
            }
        }
    }
}

impl std::fmt::Display for HashStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashStrategy::Native(native) => write!(f, "{native}"),
            HashStrategy::Derived {
                base,
                index,
                modulus: None,
            } => write!(f, "{base}[{index}]"),
            HashStrategy::Derived {
                base,
                index,
                modulus: Some(modulus),
            } => write!(f, "{base}[{index}]%{modulus}"),
        }
    }
}

/// Assemble the ordered hash-function list for a filter with `k` slots:
/// the first `min(k, 4)` slots take the natives in [`HASH_ORDER`], the
/// rest stack the first strategy of the order, highest index first.
pub(crate) fn compose(k: u16) -> Vec<HashStrategy> {
    let native = HASH_ORDER.len().min(k as usize);
    let mut strategies: Vec<HashStrategy> = HASH_ORDER[..native]
        .iter()
        .copied()
        .map(HashStrategy::Native)
        .collect();

    let mut index = (k as usize - native) as u64;
    while index > 0 {
        strategies.push(HashStrategy::derived(HASH_ORDER[0], index));
        index -= 1;
    }
    strategies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_uses_native_order_first() {
        assert_eq!(
            compose(3),
            vec![
                HashStrategy::Native(NativeHash::Fnv1a),
                HashStrategy::Native(NativeHash::Jenkins),
                HashStrategy::Native(NativeHash::Pearson16),
            ]
        );
    }

    #[test]
    fn test_compose_full_native_complement() {
        let strategies = compose(4);
        assert_eq!(strategies.len(), 4);
        for (strategy, native) in strategies.iter().zip(HASH_ORDER) {
            assert_eq!(*strategy, HashStrategy::Native(native));
        }
    }

    #[test]
    fn test_compose_stacks_beyond_native_order() {
        let strategies = compose(7);
        assert_eq!(strategies.len(), 7);
        assert_eq!(
            &strategies[4..],
            &[
                HashStrategy::derived(NativeHash::Fnv1a, 3),
                HashStrategy::derived(NativeHash::Fnv1a, 2),
                HashStrategy::derived(NativeHash::Fnv1a, 1),
            ]
        );
    }

    #[test]
    fn test_compose_is_pure() {
        assert_eq!(compose(7), compose(7));
        // A wide composition does not disturb a later narrow one.
        let _ = compose(12);
        assert_eq!(
            compose(2),
            vec![
                HashStrategy::Native(NativeHash::Fnv1a),
                HashStrategy::Native(NativeHash::Jenkins),
            ]
        );
    }

    #[test]
    fn test_derived_combination_formula() {
        let key = b"combination";
        let base = NativeHash::Jenkins.hash(key);
        let derived = HashStrategy::derived(NativeHash::Jenkins, 5);
        assert_eq!(derived.hash(key), base.wrapping_add(base.wrapping_mul(5)));
    }

    #[test]
    fn test_derived_with_modulus_bounds_output() {
        let derived = HashStrategy::derived_with_modulus(NativeHash::Fnv1a, 3, 1000);
        for key in [&b"one"[..], b"two", b"three", b""] {
            assert!(derived.hash(key) < 1000);
        }
    }

    #[test]
    fn test_distinct_indices_give_distinct_functions() {
        let key = b"index-probe";
        let first = HashStrategy::derived(NativeHash::Fnv1a, 1).hash(key);
        let second = HashStrategy::derived(NativeHash::Fnv1a, 2).hash(key);
        assert_ne!(first, second);
    }

    #[test]
    fn test_native_strategies_disagree() {
        let key = b"collision-probe";
        let digests: Vec<u64> = HASH_ORDER.iter().map(|h| h.hash(key)).collect();
        for i in 0..digests.len() {
            for j in i + 1..digests.len() {
                assert_ne!(digests[i], digests[j]);
            }
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(NativeHash::Pearson16.to_string(), "pearson16");
        assert_eq!(
            HashStrategy::derived(NativeHash::Fnv1a, 3).to_string(),
            "fnv1a[3]"
        );
        assert_eq!(
            HashStrategy::derived_with_modulus(NativeHash::Crc32, 2, 64).to_string(),
            "crc32[2]%64"
        );
    }

    #[test]
    #[should_panic(expected = "derivation index must be positive")]
    fn test_derived_rejects_zero_index() {
        let _ = HashStrategy::derived(NativeHash::Fnv1a, 0);
    }
}
