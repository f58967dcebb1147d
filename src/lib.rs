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

//! A probabilistic set-membership filter (Bloom filter) for streaming
//! keys.
//!
//! The filter answers "was this key recorded?" in constant space with
//! no false negatives and a tunable false-positive rate. Keys are
//! arbitrary byte strings; positions are derived from a configurable
//! stack of hash functions and memoized in a bounded FIFO cache.
//!
//! # Quick start
//!
//! ```rust
//! use bloomy::filter::BloomFilter;
//!
//! // Sized for 10,000 keys at a 1% false-positive rate.
//! let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
//! assert_eq!(filter.m(), 95_851);
//! assert_eq!(filter.k(), 7);
//!
//! filter.add("apple");
//! assert!(filter.test("apple"));
//! assert!(!filter.test("grape"));
//!
//! // Split a stream by membership.
//! let unseen: Vec<&str> = filter.diff(["apple", "pear"]).collect();
//! assert_eq!(unseen, ["pear"]);
//! ```
//!
//! # Modules
//!
//! - [`filter`]: the Bloom filter, its builder and parameter lifecycle
//! - [`hash`]: the native hash registry and derived-hash composition
//! - [`stream`]: lazy iterator adapters routing key streams through a
//!   filter
//! - [`error`]: the error type shared by all fallible operations

#![deny(missing_docs)]

pub mod error;
pub mod filter;
pub mod hash;
pub mod stream;
