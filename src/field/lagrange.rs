// Derived from RustySecrets Project at
// https://github.com/SpinResearch/RustySecrets.git
//
// BSD 3-Clause License
//
// Copyright (c) 2016-2018, Spin Research
// All rights reserved.
//
// Redistribution and use in source and binary forms, with or without
// modification, are permitted provided that the following conditions are met:
//
// * Redistributions of source code must retain the above copyright notice, this
//   list of conditions and the following disclaimer.
//
// * Redistributions in binary form must reproduce the above copyright notice,
//   this list of conditions and the following disclaimer in the documentation
//   and/or other materials provided with the distribution.
//
// * Neither the name of the copyright holder nor the names of its
//   contributors may be used to endorse or promote products derived from
//   this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
//
// Modifications Copyright 2019 The Grin Developers
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

//! Evaluates the Lagrange polynomial through a set of `(x, y)` points at
//! an arbitrary abscissa, working entirely in the discrete-log domain of
//! `Gf256` rather than building explicit polynomial coefficients. One
//! call interpolates a single byte position; the `shamir` module calls
//! this once per byte of the share value.

use crate::error::{Error, ErrorKind};
use crate::field::gf256::TABLES;

#[inline]
fn log(b: u8) -> i64 {
	i64::from(TABLES.log[b as usize])
}

/// Evaluates the polynomial determined by `points` at `x`.
///
/// `points` must not contain two entries with the same x-coordinate, and
/// none of its x-coordinates need equal `x` (if one does, its y-value is
/// returned directly with no field arithmetic at all, matching the plain
/// share-lookup case).
pub fn interpolate(points: &[(u8, u8)], x: u8) -> Result<u8, Error> {
	if points.is_empty() {
		return Err(ErrorKind::ShareSet(
			"cannot interpolate an empty set of shares".to_string(),
		))?;
	}

	if let Some(&(_, y)) = points.iter().find(|&&(xi, _)| xi == x) {
		return Ok(y);
	}

	// log of the product of (x_i - x) for every point i.
	let log_prod: i64 = points.iter().map(|&(xi, _)| log(xi ^ x)).sum();

	let mut acc: u8 = 0;
	for &(xi, yi) in points {
		if yi == 0 {
			continue;
		}
		// log of the product of (x_j - x) for j != i.
		let log_numerator = log_prod - log(xi ^ x);
		// log of the product of (x_i - x_j) for j != i.
		let log_denominator: i64 = points
			.iter()
			.filter(|&&(xj, _)| xj != xi)
			.map(|&(xj, _)| log(xi ^ xj))
			.sum();
		let log_term = (log(yi) + log_numerator - log_denominator).rem_euclid(255);
		acc ^= TABLES.exp[log_term as usize];
	}

	Ok(acc)
}

#[cfg(test)]
mod tests {
	use super::*;
	use quickcheck::*;

	fn naive_secret(points: &[(u8, u8)]) -> u8 {
		// Reference byte-at-a-time evaluation built from independent
		// divisions rather than the accumulated log-domain sums above,
		// used only to cross-check `interpolate` in tests.
		use crate::field::gf256::Gf256;
		let k = points.len();
		let mut w = vec![Gf256::zero(); k];
		w[0] = Gf256::one();
		let xs: Vec<Gf256> = points.iter().map(|&(x, _)| Gf256::from_byte(x)).collect();
		for i in 1..k {
			for j in 0..i {
				let delta = xs[j] - xs[i];
				w[j] /= delta;
				w[i] -= w[j];
			}
		}
		let (mut num, mut denom) = (Gf256::zero(), Gf256::zero());
		for i in 0..k {
			let diff = w[i] / xs[i];
			num += diff * Gf256::from_byte(points[i].1);
			denom += diff;
		}
		(num / denom).to_byte()
	}

	#[test]
	fn interpolate_at_known_point_returns_its_value() {
		let points = [(1u8, 10u8), (2, 20), (3, 30)];
		assert_eq!(interpolate(&points, 2).unwrap(), 20);
	}

	#[test]
	fn interpolate_empty_is_an_error() {
		assert!(interpolate(&[], 0).is_err());
	}

	quickcheck! {
		fn interpolate_at_zero_matches_barycentric(ys: Vec<u8>) -> TestResult {
			if ys.len() < 2 || ys.len() > 250 {
				return TestResult::discard();
			}
			let points: Vec<(u8, u8)> = ys.into_iter().zip(1u8..).collect();
			let want = naive_secret(&points);
			let got = interpolate(&points, 0).unwrap();
			TestResult::from_bool(got == want)
		}
	}
}
