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

//! Definition of a share, and the word-list codec that turns one into a
//! mnemonic (and back).
//!
//! Bit layout of a share, high bit first:
//! `identifier(15) . extendable_flag(1) . iteration_exponent(4)` (2 words),
//! then `group_index(4) . group_threshold-1(4) . group_count-1(4) .
//! member_index(4) . member_threshold-1(4)` (2 words), then the zero-padded
//! share value, then the RS1024 checksum (3 words).

use crate::bitpacker::BitPacker;
use crate::config::Slip39Config;
use crate::error::{Error, ErrorKind};
use crate::rs1024;

use rand::{thread_rng, Rng};
use std::collections::HashMap;

lazy_static! {
	/// The 1024-word list shares are encoded against. Index in this list is
	/// the 10-bit value of the corresponding mnemonic word.
	pub static ref WORDLIST: Vec<String> = include_str!("wordlists/en.txt")
		.split_whitespace()
		.map(|s| s.into())
		.collect();
	/// Reverse lookup from word to its index in `WORDLIST`
	pub static ref WORD_INDEX_MAP: HashMap<String, usize> = {
		let mut retval = HashMap::new();
		for (i, item) in WORDLIST.iter().enumerate() {
			retval.insert(item.to_owned(), i);
		}
		retval
	};
}

/// A single share: either a group share (its value is itself a Shamir
/// share of the master secret) or a member share (its value is a share of
/// a group share), distinguished only by which level of `generate`/
/// `recover` is looking at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
	/// Random 15 bit value common to every share in a set; also folded into
	/// the Feistel salt.
	pub identifier: u16,
	/// Whether this backup may be extended with additional groups/members
	/// later without invalidating already-issued shares.
	pub extendable_backup_flag: bool,
	/// log2(iterations / min_iteration_count) for the PBKDF2 round function (4 bits)
	pub iteration_exponent: u8,
	/// The x value of the group share (4 bits)
	pub group_index: u8,
	/// Number of group shares needed to reconstruct the master secret,
	/// stored on the wire as `group_threshold - 1` (4 bits)
	pub group_threshold: u8,
	/// Total number of groups, stored on the wire as `group_count - 1` (4 bits)
	pub group_count: u8,
	/// The x value of the member share within its group (4 bits)
	pub member_index: u8,
	/// Number of member shares needed to reconstruct the group share,
	/// stored on the wire as `member_threshold - 1` (4 bits)
	pub member_threshold: u8,
	/// The share's y-values, one byte per byte of the secret being shared
	pub share_value: Vec<u8>,
	/// Configuration this share was built or parsed against
	pub config: Slip39Config,
}

impl Default for Share {
	fn default() -> Self {
		Share {
			identifier: 0,
			extendable_backup_flag: false,
			iteration_exponent: 0,
			group_index: 0,
			group_threshold: 0,
			group_count: 0,
			member_index: 0,
			member_threshold: 0,
			share_value: vec![],
			config: Slip39Config::new(),
		}
	}
}

impl Share {
	/// Create a new share with a freshly generated identifier
	pub fn new() -> Result<Share, Error> {
		let mut s = Share::default();
		s.identifier = s.generate_random_identifier();
		if WORDLIST.len() != s.config.radix as usize {
			return Err(ErrorKind::Config(format!(
				"the word list should contain {} words, but it contains {} words",
				s.config.radix,
				WORDLIST.len()
			)))?;
		}
		Ok(s)
	}

	/// Parse a share from its mnemonic word list
	pub fn from_mnemonic(mn: &[String]) -> Result<Self, Error> {
		let mut s = Share::new()?;
		s.fill_with_mnemonic(mn)?;
		Ok(s)
	}

	fn pack_bits(&self) -> Result<BitPacker, Error> {
		let mut padding_bit_count = self.config.radix_bits
			- (self.share_value.len() * 8 % self.config.radix_bits as usize) as u8;
		if padding_bit_count == self.config.radix_bits {
			padding_bit_count = 0;
		}
		let mut bp = BitPacker::new();

		bp.append_u16(self.identifier, self.config.id_length_bits)?;
		bp.append_u8(
			u8::from(self.extendable_backup_flag),
			self.config.extendable_flag_length_bits,
		)?;
		bp.append_u8(
			self.iteration_exponent,
			self.config.iteration_exp_length_bits,
		)?;
		bp.append_u8(self.group_index, 4)?;
		bp.append_u8(self.group_threshold - 1, 4)?;
		bp.append_u8(self.group_count - 1, 4)?;
		bp.append_u8(self.member_index, 4)?;
		bp.append_u8(self.member_threshold - 1, 4)?;
		bp.append_padding(padding_bit_count);
		bp.append_vec_u8(&self.share_value)?;

		if bp.len() % self.config.radix_bits as usize != 0 {
			return Err(ErrorKind::ShareFormat(format!(
				"incorrect share bit length, must be a multiple of {} but was {}",
				self.config.radix_bits,
				bp.len(),
			)))?;
		}

		let mut sum_data: Vec<u32> = vec![];
		for i in (0..bp.len()).step_by(self.config.radix_bits as usize) {
			sum_data.push(bp.get_u32(i, self.config.radix_bits as usize)?);
		}

		let checksum = rs1024::create_checksum(
			self.config.customization_string(self.extendable_backup_flag),
			&sum_data,
			self.config.checksum_length_words,
		);

		for c in checksum {
			bp.append_u32(c, self.config.radix_bits)?;
		}

		Ok(bp)
	}

	/// Render this share as its list of mnemonic words
	pub fn to_mnemonic(&self) -> Result<Vec<String>, Error> {
		let bp = self.pack_bits()?;
		let mut ret_vec: Vec<u32> = vec![];
		for i in (0..bp.len()).step_by(self.config.radix_bits as usize) {
			ret_vec.push(bp.get_u32(i, self.config.radix_bits as usize)?);
		}
		Ok(ret_vec
			.iter()
			.map(|d| WORDLIST[*d as usize].to_owned())
			.collect())
	}

	fn fill_with_mnemonic(&mut self, mn: &[String]) -> Result<(), Error> {
		if mn.len() < self.config.min_mnemonic_length_words as usize {
			return Err(ErrorKind::ShareFormat(format!(
				"invalid mnemonic length, each mnemonic must be at least {} words",
				self.config.min_mnemonic_length_words,
			)))?;
		}
		let mut bp = BitPacker::new();
		for s in mn {
			let idx = WORD_INDEX_MAP
				.get(s)
				.ok_or_else(|| ErrorKind::ShareFormat(format!("'{}' is not a valid word", s)))?;
			bp.append_u16(*idx as u16, self.config.radix_bits)?;
		}
		self.parse_bp(&mut bp)
	}

	fn parse_bp(&mut self, bp: &mut BitPacker) -> Result<(), Error> {
		let mut sum_data: Vec<u32> = vec![];
		for i in (0..bp.len()).step_by(self.config.radix_bits as usize) {
			sum_data.push(bp.get_u32(i, self.config.radix_bits as usize)?);
		}

		if (self.config.radix_bits as usize
			* (sum_data.len() - self.config.metadata_length_words as usize))
			% 16
			> 8
		{
			return Err(ErrorKind::ShareFormat("invalid mnemonic length".to_string()))?;
		}

		self.identifier = bp.get_u16(0, self.config.id_length_bits as usize)?;
		let flag_offset = self.config.id_length_bits as usize;
		self.extendable_backup_flag =
			bp.get_u8(flag_offset, self.config.extendable_flag_length_bits as usize)? != 0;
		let exp_offset = flag_offset + self.config.extendable_flag_length_bits as usize;
		self.iteration_exponent =
			bp.get_u8(exp_offset, self.config.iteration_exp_length_bits as usize)?;

		rs1024::verify_checksum(
			self.config.customization_string(self.extendable_backup_flag),
			&sum_data,
		)?;

		self.group_index = bp.get_u8(20, 4)?;
		self.group_threshold = bp.get_u8(24, 4)? + 1;
		self.group_count = bp.get_u8(28, 4)? + 1;
		self.member_index = bp.get_u8(32, 4)?;
		self.member_threshold = bp.get_u8(36, 4)? + 1;

		if self.group_count < self.group_threshold {
			return Err(ErrorKind::ShareFormat(
				"group threshold cannot be greater than group count".to_string(),
			))?;
		}

		bp.split_out(
			40,
			bp.len() - self.config.radix_bits as usize * self.config.checksum_length_words as usize,
		);
		bp.remove_padding(bp.len() % 16)?;
		self.share_value = bp.get_vec_u8(0, bp.len() / 8)?;

		Ok(())
	}

	fn generate_random_identifier(&self) -> u16 {
		let retval: u16 = thread_rng().gen();
		retval & ((1 << self.config.id_length_bits) - 1)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn share_round_trip_non_extendable() -> Result<(), Error> {
		let share = Share {
			identifier: 21219,
			extendable_backup_flag: false,
			iteration_exponent: 0,
			group_index: 0,
			group_threshold: 1,
			group_count: 1,
			member_index: 4,
			member_threshold: 3,
			share_value: b"\x84\x06\xce\xa0p\xbfe~\rA\x01\t5\xaf\xd3Z".to_vec(),
			..Default::default()
		};
		let m = share.to_mnemonic()?;
		assert_eq!(m.len(), share.config.min_mnemonic_length_words as usize);
		let dec_share = Share::from_mnemonic(&m)?;
		assert_eq!(share, dec_share);
		Ok(())
	}

	#[test]
	fn share_round_trip_extendable() -> Result<(), Error> {
		let share = Share {
			identifier: 512,
			extendable_backup_flag: true,
			iteration_exponent: 2,
			group_index: 1,
			group_threshold: 2,
			group_count: 3,
			member_index: 0,
			member_threshold: 2,
			share_value: b"0123456789abcdef".to_vec(),
			..Default::default()
		};
		let m = share.to_mnemonic()?;
		let dec_share = Share::from_mnemonic(&m)?;
		assert_eq!(share, dec_share);
		Ok(())
	}

	#[test]
	fn mismatched_extendable_flag_fails_checksum() -> Result<(), Error> {
		let share = Share {
			identifier: 512,
			extendable_backup_flag: true,
			iteration_exponent: 0,
			group_index: 0,
			group_threshold: 1,
			group_count: 1,
			member_index: 0,
			member_threshold: 1,
			share_value: b"0123456789abcdef".to_vec(),
			..Default::default()
		};
		let mut m = share.to_mnemonic()?;
		// word 1 covers bits 10..20; the flag lives at overall bit 15, i.e.
		// local (MSB-first) bit 5 of that word, value bit mask 1 << 4.
		let bad_word_index = WORD_INDEX_MAP[&m[1]] ^ 16;
		m[1] = WORDLIST[bad_word_index].clone();
		assert!(Share::from_mnemonic(&m).is_err());
		Ok(())
	}

	#[test]
	fn unknown_word_is_rejected() {
		let words: Vec<String> = vec!["notaword".to_string(); 20];
		assert!(Share::from_mnemonic(&words).is_err());
	}
}
