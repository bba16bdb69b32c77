// Copyright 2019 The Grin Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Small shared helpers that don't belong to any one module.

use rand::{thread_rng, Rng};

/// Fill a vec of length `n` with cryptographically random bytes
pub fn fill_vec_rand(n: usize) -> Vec<u8> {
	(0..n).map(|_| thread_rng().gen()).collect()
}
