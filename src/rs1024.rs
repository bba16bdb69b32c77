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

//! RS1024, the Reed-Solomon-derived BCH checksum protecting each mnemonic.
//! The customization string is `"shamir"` or `"shamir_extendable"` depending
//! on the backup's extendable flag; callers get it from
//! `Slip39Config::customization_string`.

use crate::error::{Error, ErrorKind};

const GEN: [u32; 10] = [
	0xe0e040, 0x1c1c080, 0x3838100, 0x7070200, 0xe0e0009, 0x1c0c2412, 0x38086c24, 0x3090fc48,
	0x21b1f890, 0x3f3f120,
];

/// values interpreted as a list of 10 bit integers
fn polymod(values: &[u32]) -> u32 {
	let mut chk: u32 = 1;
	for &v in values {
		let b = chk >> 20;
		chk = ((chk & 0xfffff) << 10) ^ v;
		for (i, gen) in GEN.iter().enumerate() {
			if (b >> i) & 1 == 1 {
				chk ^= gen;
			}
		}
	}
	chk
}

/// Computes the trailing checksum words for `data`, given the customization
/// string implied by the extendable-backup flag.
pub fn create_checksum(custom_string: &[u8], data: &[u32], checksum_length_words: u8) -> Vec<u32> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	values.extend(std::iter::repeat(0).take(checksum_length_words as usize));

	let polymod = polymod(&values) ^ 1;
	let n = checksum_length_words as usize;
	(0..n)
		.map(|i| (polymod >> (10 * (n - 1 - i))) & 1023)
		.collect()
}

/// Verifies that `data` (words plus their trailing checksum) checks out
/// against the given customization string.
pub fn verify_checksum(custom_string: &[u8], data: &[u32]) -> Result<(), Error> {
	let mut values: Vec<u32> = custom_string.iter().map(|d| u32::from(*d)).collect();
	values.extend_from_slice(data);
	if polymod(&values) != 1 {
		return Err(ErrorKind::ShareFormat(
			"mnemonic checksum is invalid".to_string(),
		))?;
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn checksum() -> Result<(), Error> {
		let mut test_vec = vec![
			663, 96, 0, 66, 132, 27, 234, 28, 191, 405, 992, 848, 257, 36, 858, 1012, 858,
		];
		let expected = vec![1001, 340, 369];
		let checksum = create_checksum(b"shamir", &test_vec, 3);
		assert_eq!(checksum, expected);
		test_vec.extend_from_slice(&checksum);
		verify_checksum(b"shamir", &test_vec)?;
		assert!(verify_checksum(b"fhamir", &test_vec).is_err());
		test_vec[0] = 23;
		assert!(verify_checksum(b"shamir", &test_vec).is_err());
		Ok(())
	}

	#[test]
	fn extendable_customization_string_changes_checksum() {
		let data = vec![663, 96, 0, 66, 132, 27, 234, 28, 191, 405, 992, 848, 257];
		let a = create_checksum(b"shamir", &data, 3);
		let b = create_checksum(b"shamir_extendable", &data, 3);
		assert_ne!(a, b);
	}
}
