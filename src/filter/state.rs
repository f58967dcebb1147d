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

/// Lifecycle of a filter's parameter set.
///
/// A filter starts unconfigured, becomes [`Ready`](FilterState::Ready)
/// once the bit count and hash count are both positive, and freezes
/// permanently on the first recorded key. The frozen state is terminal:
/// parameter mutation fails from then on, while `add` and `test` remain
/// available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterState {
    /// Parameters have not been validated yet.
    #[default]
    Created,
    /// The bit count and hash count are both positive; no key has been
    /// recorded.
    Ready,
    /// At least one key has been recorded; m, k, n, and p are frozen.
    Immutable,
}
