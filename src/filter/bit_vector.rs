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

/// Fixed-size bit array packed into u64 words, with a maintained count of
/// set bits. Bits only ever transition from 0 to 1.
#[derive(Debug, Clone)]
pub(crate) struct BitVector {
    num_bits: u64,
    num_set: u64,
    words: Box<[u64]>,
}

impl BitVector {
    /// An all-zero bit vector of logical length `num_bits`.
    pub fn new(num_bits: u64) -> Self {
        let num_words = num_bits.div_ceil(64) as usize;
        BitVector {
            num_bits,
            num_set: 0,
            words: vec![0u64; num_words].into_boxed_slice(),
        }
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    pub fn set(&mut self, index: u64) {
        debug_assert!(index < self.num_bits);
        let word_index = (index / 64) as usize;
        let mask = 1u64 << (index % 64);
        if (self.words[word_index] & mask) == 0 {
            self.words[word_index] |= mask;
            self.num_set += 1;
        }
    }

    /// Gets the value of a single bit.
    pub fn get(&self, index: u64) -> bool {
        debug_assert!(index < self.num_bits);
        let word_index = (index / 64) as usize;
        let mask = 1u64 << (index % 64);
        (self.words[word_index] & mask) != 0
    }

    /// Count of bits set to 1.
    pub fn count(&self) -> u64 {
        self.num_set
    }

    /// Logical length in bits.
    pub fn len(&self) -> u64 {
        self.num_bits
    }
}
