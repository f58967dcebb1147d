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

//! Iterator adapters that route streams of keys through a Bloom filter.
//!
//! All adapters are lazy, preserve input order and accept any
//! `IntoIterator` whose items can be viewed as bytes. They borrow the
//! filter mutably for as long as they live.
//!
//! ```rust
//! use bloomy::filter::BloomFilter;
//!
//! let mut filter = BloomFilter::default();
//! filter.add("a");
//! filter.add("c");
//!
//! let absent: Vec<&str> = filter.diff(["a", "b", "c", "d"]).collect();
//! assert_eq!(absent, ["b", "d"]);
//! ```

use crate::filter::BloomFilter;

/// Iterator returned by [`BloomFilter::record`]. Forwards every key,
/// recording the ones not seen before.
pub struct Record<'a, I, F> {
    filter: &'a mut BloomFilter,
    keys: I,
    on_first_seen: F,
}

impl<I, F> Iterator for Record<'_, I, F>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
    F: FnMut(&I::Item),
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        let key = self.keys.next()?;
        if !self.filter.test(key.as_ref()) {
            (self.on_first_seen)(&key);
            self.filter.add(key.as_ref());
        }
        Some(key)
    }
}

/// Iterator returned by [`BloomFilter::intersect`]. Yields only keys
/// the filter reports as present.
pub struct Intersect<'a, I> {
    filter: &'a mut BloomFilter,
    keys: I,
}

impl<I> Iterator for Intersect<'_, I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for key in self.keys.by_ref() {
            if self.filter.test(key.as_ref()) {
                return Some(key);
            }
        }
        None
    }
}

/// Iterator returned by [`BloomFilter::diff`]. Yields only keys the
/// filter reports as absent.
pub struct Diff<'a, I> {
    filter: &'a mut BloomFilter,
    keys: I,
}

impl<I> Iterator for Diff<'_, I>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for key in self.keys.by_ref() {
            if !self.filter.test(key.as_ref()) {
                return Some(key);
            }
        }
        None
    }
}

impl BloomFilter {
    /// Forwards every key of a stream unchanged and in order, recording
    /// the ones not seen before. For each newly recorded key the
    /// `on_first_seen` callback fires once; keys already in the filter
    /// pass through silently.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// let mut fresh = Vec::new();
    /// let forwarded: Vec<&str> = filter
    ///     .record(["a", "b", "a", "c"], |key| fresh.push(*key))
    ///     .collect();
    ///
    /// assert_eq!(forwarded, ["a", "b", "a", "c"]);
    /// assert_eq!(fresh, ["a", "b", "c"]);
    /// ```
    pub fn record<I, F>(&mut self, keys: I, on_first_seen: F) -> Record<'_, I::IntoIter, F>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
        F: FnMut(&I::Item),
    {
        Record {
            filter: self,
            keys: keys.into_iter(),
            on_first_seen,
        }
    }

    /// Filters a stream down to the keys this filter reports as
    /// present. Nothing is recorded; false positives may slip through
    /// at the filter's usual rate.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// filter.add("a");
    /// filter.add("c");
    ///
    /// let present: Vec<&str> = filter.intersect(["a", "b", "c", "d"]).collect();
    /// assert_eq!(present, ["a", "c"]);
    /// ```
    pub fn intersect<I>(&mut self, keys: I) -> Intersect<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Intersect {
            filter: self,
            keys: keys.into_iter(),
        }
    }

    /// Filters a stream down to the keys this filter reports as
    /// absent. Nothing is recorded, so a repeated absent key is yielded
    /// every time it appears.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomy::filter::BloomFilter;
    ///
    /// let mut filter = BloomFilter::default();
    /// filter.add("a");
    ///
    /// let absent: Vec<&str> = filter.diff(["a", "b", "b"]).collect();
    /// assert_eq!(absent, ["b", "b"]);
    /// ```
    pub fn diff<I>(&mut self, keys: I) -> Diff<'_, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Diff {
            filter: self,
            keys: keys.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::BloomFilter;

    #[test]
    fn test_record_forwards_all_keys_in_order() {
        let mut filter = BloomFilter::default();
        let forwarded: Vec<&str> = filter.record(["x", "y", "x", "z"], |_| {}).collect();
        assert_eq!(forwarded, ["x", "y", "x", "z"]);
    }

    #[test]
    fn test_record_fires_callback_once_per_distinct_key() {
        let mut filter = BloomFilter::default();
        let mut fresh = Vec::new();
        filter
            .record(["x", "y", "x", "z", "y"], |key| fresh.push(*key))
            .for_each(drop);
        assert_eq!(fresh, ["x", "y", "z"]);
    }

    #[test]
    fn test_record_skips_keys_already_in_filter() {
        let mut filter = BloomFilter::default();
        filter.add("x");
        let mut fresh = Vec::new();
        filter
            .record(["x", "y"], |key| fresh.push(*key))
            .for_each(drop);
        assert_eq!(fresh, ["y"]);
    }

    #[test]
    fn test_record_is_lazy() {
        let mut filter = BloomFilter::default();
        let mut count = 0u32;
        {
            let mut stream = filter.record(["x", "y", "z"], |_| count += 1);
            assert_eq!(stream.next(), Some("x"));
        }
        assert_eq!(count, 1);
        assert!(filter.test("x"));
        assert!(!filter.test("y"));
    }

    #[test]
    fn test_intersect_keeps_recorded_keys() {
        let mut filter = BloomFilter::default();
        filter.add("a");
        filter.add("c");
        let present: Vec<&str> = filter.intersect(["a", "b", "c", "d"]).collect();
        assert_eq!(present, ["a", "c"]);
    }

    #[test]
    fn test_intersect_does_not_record() {
        let mut filter = BloomFilter::default();
        filter.add("a");
        let _ = filter.intersect(["b"]).count();
        assert!(!filter.test("b"));
    }

    #[test]
    fn test_diff_keeps_unrecorded_keys() {
        let mut filter = BloomFilter::default();
        filter.add("a");
        filter.add("c");
        let absent: Vec<&str> = filter.diff(["a", "b", "c", "d"]).collect();
        assert_eq!(absent, ["b", "d"]);
    }

    #[test]
    fn test_diff_yields_repeated_absent_keys() {
        let mut filter = BloomFilter::default();
        filter.add("a");
        let absent: Vec<&str> = filter.diff(["b", "a", "b"]).collect();
        assert_eq!(absent, ["b", "b"]);
        assert!(!filter.test("b"));
    }

    #[test]
    fn test_adapters_accept_owned_strings() {
        let mut filter = BloomFilter::default();
        let keys: Vec<String> = (0..4).map(|i| format!("key-{i}")).collect();
        let forwarded: Vec<String> = filter.record(keys.clone(), |_| {}).collect();
        assert_eq!(forwarded, keys);

        let present: Vec<String> = filter.intersect(keys.clone()).collect();
        assert_eq!(present, keys);

        let absent: Vec<String> = filter.diff(keys).collect();
        assert!(absent.is_empty());
    }
}
