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

//! An implementation of SLIP-0039, Shamir's Secret-Sharing for Mnemonic
//! Codes: split a master secret into a two-tier tree of groups and
//! members, each recoverable as a list of checksummed mnemonic words, and
//! recombine a sufficient subset of mnemonics back into the original
//! secret.

#[macro_use]
extern crate lazy_static;

pub mod bitpacker;
pub mod config;
pub mod error;
pub mod feistel;
pub mod field;
pub mod hex;
pub mod mnemonic;
pub mod rs1024;
pub mod scheme;
pub mod shamir;
mod util;

pub use crate::config::Slip39Config;
pub use crate::error::{Error, ErrorKind};
pub use crate::hex::{from_hex, to_hex};
pub use crate::mnemonic::Share;
pub use crate::scheme::GroupShare;

/// Split `master_secret` into a tree of mnemonic shares.
///
/// `groups` is a list of `(member_threshold, member_count)` pairs, one per
/// group; `group_threshold` groups are required to recombine. Pass
/// `identifier` to pin the shared backup identifier instead of letting one
/// be generated at random, and `group_descs` (one entry per group, if
/// given) to attach a caller-chosen, purely cosmetic label to each
/// `GroupShare`.
#[allow(clippy::too_many_arguments)]
pub fn generate(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: &str,
	iteration_exponent: u8,
	extendable_backup_flag: bool,
	identifier: Option<u16>,
	group_descs: Option<&[String]>,
) -> Result<Vec<GroupShare>, Error> {
	scheme::generate_mnemonics(
		group_threshold,
		groups,
		master_secret,
		passphrase,
		iteration_exponent,
		extendable_backup_flag,
		identifier,
		group_descs,
	)
}

/// Generate a tree of mnemonic shares for a freshly generated random
/// master secret of `strength_bits` bits.
pub fn generate_random(
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase: &str,
	iteration_exponent: u8,
	extendable_backup_flag: bool,
) -> Result<Vec<GroupShare>, Error> {
	scheme::generate_mnemonics_random(
		group_threshold,
		groups,
		strength_bits,
		passphrase,
		iteration_exponent,
		extendable_backup_flag,
	)
}

/// Recombine a sufficient subset of mnemonics back into the master secret.
/// `mnemonics` is a flat list; each mnemonic is itself a list of words.
pub fn recover(mnemonics: &[Vec<String>], passphrase: &str) -> Result<Vec<u8>, Error> {
	scheme::combine_mnemonics(mnemonics, passphrase)
}

/// Whether a single mnemonic decodes cleanly: right word count, every word
/// in the word list, and a valid RS1024 checksum. Does not check it
/// against any other mnemonic in its set (that requires `recover`).
pub fn validate_mnemonic(mnemonic: &[String]) -> bool {
	Share::from_mnemonic(mnemonic).is_ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn end_to_end_round_trip() -> Result<(), Error> {
		let master_secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups = generate(1, &[(3, 5)], &master_secret, "", 0, false, None, None)?;
		let mnemonics: Vec<Vec<String>> = groups[0].mnemonic_list()?[..3].to_vec();
		let recovered = recover(&mnemonics, "")?;
		assert_eq!(recovered, master_secret);
		Ok(())
	}

	#[test]
	fn validate_mnemonic_rejects_garbage() {
		let words: Vec<String> = vec!["not".into(), "a".into(), "mnemonic".into()];
		assert!(!validate_mnemonic(&words));
	}

	#[test]
	fn validate_mnemonic_accepts_a_real_share() -> Result<(), Error> {
		let master_secret = b"\x0c\x94\x90\xbcn\xd6\xbc\xbf\xac>\xbe}\xeeV\xf2P".to_vec();
		let groups = generate(1, &[(3, 5)], &master_secret, "", 0, false, None, None)?;
		let m = groups[0].mnemonic_list()?[0].clone();
		assert!(validate_mnemonic(&m));
		Ok(())
	}
}
