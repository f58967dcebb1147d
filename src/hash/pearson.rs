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

//! Pearson hashing widened to 64 bits: eight 8-bit lanes chained through a
//! fixed permutation table, assembled big-endian into one value.

use byteorder::BE;
use byteorder::ByteOrder;

// Seed for the table shuffle. Changing it changes every digest.
const TABLE_SEED: u64 = 0x9E3779B97F4A7C15;

// A fixed permutation of 0..=255, shuffled at compile time by a
// splitmix64-driven Fisher-Yates pass.
const TABLE: [u8; 256] = build_table();

const fn build_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }

    let mut state = TABLE_SEED;
    let mut i = 255;
    while i > 0 {
        state = state.wrapping_add(0x9E3779B97F4A7C15);
        let mut z = state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
        z ^= z >> 31;

        let j = (z % (i as u64 + 1)) as usize;
        let swapped = table[i];
        table[i] = table[j];
        table[j] = swapped;
        i -= 1;
    }
    table
}

/// Each lane seeds from the first input byte offset by the lane number,
/// then chains the remaining bytes through the table.
pub(crate) fn hash(bytes: &[u8]) -> u64 {
    let first = bytes.first().copied().unwrap_or(0);
    let mut lanes = [0u8; 8];
    for (lane, slot) in lanes.iter_mut().enumerate() {
        let mut h = TABLE[first.wrapping_add(lane as u8) as usize];
        for &byte in bytes.iter().skip(1) {
            h = TABLE[(h ^ byte) as usize];
        }
        *slot = h;
    }
    BE::read_u64(&lanes)
}
