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

//! MurmurHash3, x64 128-bit variant: fast, non-cryptographic, with
//! excellent avalanche and 2-way bit independence properties. The
//! strategy surface uses the low 64 bits.

use byteorder::ByteOrder;
use byteorder::LE;

const DEFAULT_SEED: u64 = 9001;
const C1: u64 = 0x87c37b91114253d5;
const C2: u64 = 0x4cf5ad432745937f;

/// Low half of the 128-bit digest under the default seed.
#[inline]
pub(crate) fn hash(bytes: &[u8]) -> u64 {
    hash128(bytes, DEFAULT_SEED).0
}

/// Full 128-bit digest of `bytes` under `seed`.
pub(crate) fn hash128(bytes: &[u8], seed: u64) -> (u64, u64) {
    let mut h1 = seed;
    let mut h2 = seed;

    // Number of full 128-bit blocks of 16 bytes.
    // Possible exclusion of a remainder of up to 15 bytes.
    let blocks = bytes.len() >> 4;

    // Process the 128-bit blocks (the body) into the hash
    for i in 0..blocks {
        let lo = i << 4;
        let mi = lo + 8;
        let hi = mi + 8;
        let mut k1 = LE::read_u64(&bytes[lo..mi]);
        let mut k2 = LE::read_u64(&bytes[mi..hi]);

        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;

        h1 = h1.rotate_left(27);
        h1 = h1.wrapping_add(h2);
        h1 = h1.wrapping_mul(5).wrapping_add(0x52dce729);

        k2 = k2.wrapping_mul(C2);
        k2 = k2.rotate_left(33);
        k2 = k2.wrapping_mul(C1);
        h2 ^= k2;

        h2 = h2.rotate_left(31);
        h2 = h2.wrapping_add(h1);
        h2 = h2.wrapping_mul(5).wrapping_add(0x38495ab5);
    }

    // tail
    let tail = &bytes[blocks << 4..];
    let rem = tail.len();
    if rem > 0 {
        if rem > 8 {
            // read k2 little endian
            let mut buf = [0u8; 8];
            buf[..rem - 8].copy_from_slice(&tail[8..]);
            // mix k2
            let mut k2 = u64::from_le_bytes(buf);
            k2 = k2.wrapping_mul(C2);
            k2 = k2.rotate_left(33);
            k2 = k2.wrapping_mul(C1);
            h2 ^= k2;
        }

        // read k1 little endian
        let mut buf = [0u8; 8];
        let k1_len = rem.min(8);
        buf[..k1_len].copy_from_slice(&tail[..k1_len]);
        // mix k1
        let mut k1 = u64::from_le_bytes(buf);
        k1 = k1.wrapping_mul(C1);
        k1 = k1.rotate_left(31);
        k1 = k1.wrapping_mul(C2);
        h1 ^= k1;
    }

    h1 ^= bytes.len() as u64;
    h2 ^= bytes.len() as u64;
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    h1 = fmix64(h1);
    h2 = fmix64(h2);
    h1 = h1.wrapping_add(h2);
    h2 = h2.wrapping_add(h1);
    (h1, h2)
}

/// Finalization mix: force all bits of a hash block to avalanche.
#[inline]
fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51afd7ed558ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ceb9fe1a85ec53);
    k ^ (k >> 33)
}
