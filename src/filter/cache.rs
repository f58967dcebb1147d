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

use std::collections::HashMap;
use std::collections::VecDeque;

/// FIFO cache of derived bit positions, keyed by raw key bytes.
///
/// Eviction follows strict insertion order: a hit does not refresh
/// recency. A limit of zero disables caching entirely.
#[derive(Debug, Clone)]
pub(crate) struct HashCache {
    limit: usize,
    entries: HashMap<Vec<u8>, Vec<u64>>,
    order: VecDeque<Vec<u8>>,
}

impl HashCache {
    pub fn new(limit: usize) -> Self {
        HashCache {
            limit,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    pub fn get(&self, key: &[u8]) -> Option<&[u64]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Stores positions for a key, then evicts the single oldest entry if
    /// the entry count has reached the limit.
    pub fn insert(&mut self, key: &[u8], positions: Vec<u64>) {
        if self.limit == 0 {
            return;
        }

        self.entries.insert(key.to_vec(), positions);
        self.order.push_back(key.to_vec());

        if self.entries.len() >= self.limit {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}
