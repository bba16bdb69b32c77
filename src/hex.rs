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

//! Minimal hex codec for master secrets, used by tests and by callers that
//! want to pass secrets around as hex strings rather than raw bytes.

use crate::error::{Error, ErrorKind};

/// Encode bytes as a lowercase hex string
pub fn to_hex(data: &[u8]) -> String {
	data.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Decode a hex string into bytes
pub fn from_hex(s: &str) -> Result<Vec<u8>, Error> {
	if s.len() % 2 != 0 {
		return Err(ErrorKind::Policy(
			"hex string must have an even number of characters".to_string(),
		))?;
	}
	(0..s.len())
		.step_by(2)
		.map(|i| {
			u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| {
				Error::from(ErrorKind::Policy(format!(
					"invalid hex digit pair '{}'",
					&s[i..i + 2]
				)))
			})
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn round_trip() {
		let bytes = [0x00, 0x0c, 0x94, 0x90, 0xbc, 0xff];
		assert_eq!(from_hex(&to_hex(&bytes)).unwrap(), bytes);
	}

	#[test]
	fn rejects_odd_length() {
		assert!(from_hex("abc").is_err());
	}

	#[test]
	fn rejects_non_hex() {
		assert!(from_hex("zz").is_err());
	}
}
