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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a key is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was recorded, `test()` will always return `true`
//! - **Possible false positives**: `test()` may return `true` for keys never recorded
//! - **Fixed size**: The filter does not resize once keys have been recorded
//! - **Frozen shape**: The first recorded key locks m, k, n and p permanently
//!
//! # Usage
//!
//! ```rust
//! use bloomy::filter::BloomFilter;
//!
//! // Create a filter sized for 10,000 keys with a 1% false positive rate
//! let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
//!
//! // Record keys
//! filter.add("apple");
//! filter.add("banana");
//! filter.add(b"raw-bytes".as_slice());
//!
//! // Check membership
//! assert!(filter.test("apple")); // true - definitely recorded
//! assert!(!filter.test("grape")); // false - never recorded (probably)
//!
//! // Inspect statistics
//! println!("Bits: {}", filter.m());
//! println!("Bits used: {}", filter.bits_used());
//! println!("Est. FPP: {:.4}%", filter.estimated_fpp() * 100.0);
//! ```
//!
//! # Creating Filters
//!
//! Each parameter can be supplied on its own; any left unset falls back
//! to a default. Supplying **both** `n` and `p` derives the missing
//! `m`/`k` for that accuracy target:
//!
//! ```rust
//! # use bloomy::filter::BloomFilter;
//! let filter = BloomFilter::builder()
//!     .n(10_000) // Expected distinct keys
//!     .p(0.01)   // Target false positive probability (1%)
//!     .build();
//! assert_eq!(filter.m(), 95_851);
//! assert_eq!(filter.k(), 7);
//! ```
//!
//! Explicit sizes always win over derivation:
//!
//! ```rust
//! # use bloomy::filter::BloomFilter;
//! let filter = BloomFilter::builder()
//!     .m(50_000) // Number of bits
//!     .k(4)      // Number of hash functions
//!     .build();
//! assert_eq!(filter.m(), 50_000);
//! ```
//!
//! # Parameter Lifecycle
//!
//! A built filter stays reconfigurable (`set_m`, `set_k`, `set_n`,
//! `set_p`, `optimize`) until the first key is recorded. From then on
//! the shape is frozen and every setter fails, because recorded
//! positions are only meaningful for the m and k they were derived
//! with:
//!
//! ```rust
//! # use bloomy::filter::BloomFilter;
//! # use bloomy::filter::FilterState;
//! let mut filter = BloomFilter::default();
//! filter.set_m(4_096).unwrap();
//!
//! filter.add("first key");
//! assert_eq!(filter.state(), FilterState::Immutable);
//! assert!(filter.set_m(8_192).is_err());
//! ```
//!
//! # Implementation Details
//!
//! - Composes FNV-1a, Jenkins one-at-a-time, an 8-lane Pearson variant
//!   and CRC-32 hashes, extending past four with derived variants
//! - Bits packed in `u64` words
//! - Derived positions are memoized in a bounded FIFO cache
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod bit_vector;
mod builder;
mod cache;
mod sketch;
mod state;

pub use self::builder::BloomFilterBuilder;
pub use self::builder::DEFAULT_CACHE;
pub use self::builder::DEFAULT_K;
pub use self::builder::DEFAULT_M;
pub use self::builder::DEFAULT_N;
pub use self::builder::DEFAULT_P;
pub use self::builder::MAX_NUM_BITS;
pub use self::builder::MAX_NUM_HASHES;
pub use self::builder::MIN_NUM_BITS;
pub use self::builder::MIN_NUM_HASHES;
pub use self::sketch::BloomFilter;
pub use self::state::FilterState;
