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

use bloomy::filter::BloomFilter;
use googletest::assert_that;
use googletest::prelude::le;
use googletest::prelude::near;

#[test]
fn test_empty_filter() {
    let mut filter = BloomFilter::default();
    assert!(filter.is_empty());
    assert_eq!(filter.bits_used(), 0);
    assert_eq!(filter.estimate_cardinality(), 0.0);
    assert!(!filter.test("anything"));
    assert!(!filter.test(""));
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::builder().n(1_000).p(0.01).build();
    for i in 0..1_000u32 {
        filter.add(format!("key-{i}"));
    }
    for i in 0..1_000u32 {
        assert!(filter.test(format!("key-{i}")), "key-{i} must be present");
    }
}

#[test]
fn test_membership_lifecycle() {
    let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
    assert_eq!(filter.m(), 95_851);
    assert_eq!(filter.k(), 7);

    filter.add("foo");
    filter.add("bar");
    filter.add("baz");

    assert!(filter.test("foo"));
    assert!(filter.test("bar"));
    assert!(filter.test("baz"));
    assert!(!filter.test("fizz"));

    // Shape is frozen from the first add onward.
    assert!(filter.set_k(1).is_err());
    assert!(filter.set_m(1_000).is_err());
}

#[test]
fn test_false_positive_rate_meets_target() {
    const N: usize = 10_000;
    const TARGET_P: f64 = 0.01;

    let mut filter = BloomFilter::builder().n(N as u64).p(TARGET_P).build();
    assert_eq!(filter.m(), 95_851);
    assert_eq!(filter.k(), 7);

    for i in 0..N {
        filter.add(format!("member-{i}"));
    }

    let false_positives = (0..N)
        .filter(|i| filter.test(format!("outsider-{i}")))
        .count();
    let observed = false_positives as f64 / N as f64;
    assert_that!(observed, le(2.0 * TARGET_P));
}

#[test]
fn test_add_is_idempotent() {
    let mut filter = BloomFilter::default();
    for key in ["foo", "bar", "baz"] {
        filter.add(key);
    }
    let used = filter.bits_used();
    let estimate = filter.estimate_cardinality();

    for _ in 0..10 {
        for key in ["foo", "bar", "baz"] {
            filter.add(key);
        }
    }
    assert_eq!(filter.bits_used(), used);
    assert_eq!(filter.estimate_cardinality(), estimate);
}

#[test]
fn test_estimate_cardinality_small() {
    let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
    filter.add("foo");
    filter.add("bar");
    filter.add("baz");
    assert_that!(filter.estimate_cardinality(), near(3.0, 0.5));
}

#[test]
fn test_estimate_cardinality_under_load() {
    const N: usize = 1_000;

    let mut filter = BloomFilter::builder().n(10_000).p(0.01).build();
    for i in 0..N {
        filter.add(format!("key-{i}"));
    }
    assert_that!(filter.estimate_cardinality(), near(N as f64, 60.0));
}

#[test]
fn test_estimate_diverges_at_saturation() {
    let mut filter = BloomFilter::builder().m(64).k(1).build();
    for i in 0..5_000u32 {
        filter.add(format!("key-{i}"));
    }
    assert_eq!(filter.bits_used(), 64);
    assert_eq!(filter.load_factor(), 1.0);

    let estimate = filter.estimate_cardinality();
    assert!(estimate.is_infinite());
    assert!(estimate.is_sign_positive());
}

#[test]
fn test_keys_are_byte_views() {
    let mut filter = BloomFilter::default();
    filter.add("apple");
    filter.add(String::from("banana"));
    filter.add(b"cherry".as_slice());
    filter.add(vec![0x00, 0xff, 0x80]);

    // The same bytes match regardless of the owning type.
    assert!(filter.test(b"apple".as_slice()));
    assert!(filter.test("banana"));
    assert!(filter.test(String::from("cherry")));
    assert!(filter.test([0x00u8, 0xff, 0x80]));
    assert!(!filter.test("durian"));
}

#[test]
fn test_fill_statistics_track_adds() {
    let mut filter = BloomFilter::builder().n(1_000).p(0.01).build();
    assert_eq!(filter.load_factor(), 0.0);
    assert_eq!(filter.estimated_fpp(), 0.0);

    for i in 0..1_000u32 {
        filter.add(format!("key-{i}"));
    }

    // At design capacity the plug-in estimate lands near the target.
    assert!(filter.load_factor() > 0.4 && filter.load_factor() < 0.6);
    assert_that!(filter.estimated_fpp(), near(0.01, 0.008));
    assert_that!(filter.bits_used(), le(filter.m()));
}

#[test]
fn test_clone_is_independent() {
    let mut original = BloomFilter::default();
    original.add("shared");

    let mut fork = original.clone();
    fork.add("fork-only");

    assert!(fork.test("shared"));
    assert!(fork.test("fork-only"));
    assert!(original.test("shared"));
    assert!(!original.test("fork-only"));
}
