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

//! The two-tier group/member pipeline: `generate_mnemonics` turns a master
//! secret into a tree of mnemonics, `combine_mnemonics` walks that tree
//! back to the secret.

use crate::error::{Error, ErrorKind};
use crate::feistel::MasterSecretEnc;
use crate::mnemonic::Share;
use crate::shamir::Splitter;
use crate::util;

use std::collections::BTreeMap;
use std::fmt;

/// One group's worth of member shares, as returned by `generate_mnemonics`
/// or reassembled by `combine_mnemonics`/`decode_mnemonics`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupShare {
	/// Identifier shared by every share in the backup
	pub group_id: u16,
	/// Whether the backup is extendable
	pub extendable_backup_flag: bool,
	/// PBKDF2 iteration exponent
	pub iteration_exponent: u8,
	/// This group's index
	pub group_index: u8,
	/// Number of groups required to recover the master secret
	pub group_threshold: u8,
	/// Total number of groups
	pub group_count: u8,
	/// Number of member shares required to recover this group's share
	pub member_threshold: u8,
	/// The member shares belonging to this group
	pub member_shares: Vec<Share>,
	/// Caller-supplied label, purely cosmetic: never encoded into a
	/// mnemonic, never required to round-trip.
	pub desc: Option<String>,
}

impl fmt::Display for GroupShare {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		writeln!(
			f,
			"Group {} of {} - {} of {} shares required: ",
			self.group_index + 1,
			self.group_count,
			self.member_threshold,
			self.member_shares.len()
		)?;
		for s in &self.member_shares {
			for w in s.to_mnemonic().map_err(|_| fmt::Error)? {
				write!(f, "{} ", w)?;
			}
			writeln!(f)?;
		}
		Ok(())
	}
}

impl GroupShare {
	/// List of mnemonics, one per member share
	pub fn mnemonic_list(&self) -> Result<Vec<Vec<String>>, Error> {
		self.member_shares.iter().map(|s| s.to_mnemonic()).collect()
	}

	/// List of mnemonics, one per member share, each flattened to a single
	/// space-separated string
	pub fn mnemonic_list_flat(&self) -> Result<Vec<String>, Error> {
		Ok(self
			.mnemonic_list()?
			.into_iter()
			.map(|words| words.join(" "))
			.collect())
	}

	/// Recover this group's own share from its member shares
	pub fn decode_shares(&mut self) -> Result<Share, Error> {
		let sp = Splitter::new(None);
		sp.recover_secret(&self.member_shares, self.member_threshold)
	}
}

/// Split a master secret into mnemonic shares.
///
/// `groups` is a list of `(member_threshold, member_count)` pairs, one per
/// group. `identifier` lets a caller pin the shared identifier instead of
/// generating a fresh random one (useful for tests and for re-deriving a
/// backup deterministically); `group_descs`, if given, must have the same
/// length as `groups` and becomes `GroupShare::desc`.
#[allow(clippy::too_many_arguments)]
pub fn generate_mnemonics(
	group_threshold: u8,
	groups: &[(u8, u8)],
	master_secret: &[u8],
	passphrase: &str,
	iteration_exponent: u8,
	extendable_backup_flag: bool,
	identifier: Option<u16>,
	group_descs: Option<&[String]>,
) -> Result<Vec<GroupShare>, Error> {
	log::debug!(
		"generate_mnemonics: {} groups, group_threshold={}, extendable={}",
		groups.len(),
		group_threshold,
		extendable_backup_flag
	);

	let mut proto_share = Share::new()?;
	if let Some(id) = identifier {
		proto_share.identifier = id & ((1 << proto_share.config.id_length_bits) - 1);
	}
	proto_share.extendable_backup_flag = extendable_backup_flag;
	proto_share.group_threshold = group_threshold;
	proto_share.group_count = groups.len() as u8;

	if let Some(descs) = group_descs {
		if descs.len() != groups.len() {
			return Err(ErrorKind::Policy(
				"group_descs must have one entry per group".to_string(),
			))?;
		}
	}

	if master_secret.len() * 8 < proto_share.config.min_strength_bits as usize {
		return Err(ErrorKind::Policy(format!(
			"the master secret ({} bytes) must be at least {} bytes",
			master_secret.len(),
			(f64::from(proto_share.config.min_strength_bits) / 8f64).ceil(),
		)))?;
	}
	if master_secret.len() % 2 != 0 {
		return Err(ErrorKind::Policy(
			"the master secret's length in bytes must be even".to_string(),
		))?;
	}
	if group_threshold as usize > groups.len() {
		return Err(ErrorKind::Policy(format!(
			"the group threshold ({}) must not exceed the number of groups ({})",
			group_threshold,
			groups.len()
		)))?;
	}
	if groups.iter().any(|&(t, n)| t == 1 && n > 1) {
		return Err(ErrorKind::Policy(
			"a group with member_threshold 1 must have exactly one member".to_string(),
		))?;
	}

	let encoder = MasterSecretEnc::new()?;
	let encrypted_master_secret = encoder.encrypt(
		master_secret,
		passphrase,
		iteration_exponent,
		proto_share.identifier,
		extendable_backup_flag,
	)?;

	let sp = Splitter::new(None);
	let group_shares = sp.split_secret(
		&proto_share,
		group_threshold,
		groups.len() as u8,
		&encrypted_master_secret,
	)?;

	let gs_len = group_shares.len();
	let mut retval: Vec<GroupShare> = vec![];
	for (i, elem) in group_shares.into_iter().enumerate() {
		proto_share.group_index = i as u8;
		proto_share.group_threshold = group_threshold;
		proto_share.group_count = gs_len as u8;
		let (member_threshold, member_count) = groups[i];
		let member_shares = sp.split_secret(&proto_share, member_threshold, member_count, &elem.share_value)?;
		log::trace!(
			"generated group {}: {} of {} members required",
			i,
			member_threshold,
			member_count
		);
		retval.push(GroupShare {
			group_id: proto_share.identifier,
			extendable_backup_flag,
			iteration_exponent,
			group_index: i as u8,
			group_threshold,
			group_count: gs_len as u8,
			member_threshold,
			member_shares,
			desc: group_descs.map(|d| d[i].clone()),
		});
	}

	Ok(retval)
}

/// As `generate_mnemonics`, but generates a random master secret of the
/// requested strength instead of taking one from the caller.
pub fn generate_mnemonics_random(
	group_threshold: u8,
	groups: &[(u8, u8)],
	strength_bits: u16,
	passphrase: &str,
	iteration_exponent: u8,
	extendable_backup_flag: bool,
) -> Result<Vec<GroupShare>, Error> {
	let proto_share = Share::new()?;
	if strength_bits < proto_share.config.min_strength_bits {
		return Err(ErrorKind::Policy(format!(
			"the requested strength ({} bits) must be at least {} bits",
			strength_bits, proto_share.config.min_strength_bits,
		)))?;
	}
	if strength_bits % 16 != 0 {
		return Err(ErrorKind::Policy(format!(
			"the requested strength ({} bits) must be a multiple of 16 bits",
			strength_bits,
		)))?;
	}
	generate_mnemonics(
		group_threshold,
		groups,
		&util::fill_vec_rand(strength_bits as usize / 8),
		passphrase,
		iteration_exponent,
		extendable_backup_flag,
		None,
		None,
	)
}

/// Combine mnemonic shares back into the master secret they were split
/// from.
pub fn combine_mnemonics(mnemonics: &[Vec<String>], passphrase: &str) -> Result<Vec<u8>, Error> {
	log::debug!("combine_mnemonics: {} mnemonics supplied", mnemonics.len());
	let group_shares = decode_mnemonics(mnemonics)?;
	let mut shares = vec![];
	for mut gs in group_shares {
		shares.push(gs.decode_shares()?);
	}
	let sp = Splitter::new(None);
	let shares = shares
		.into_iter()
		.map(|mut s| {
			s.member_index = s.group_index;
			s
		})
		.collect::<Vec<_>>();
	let ems = sp.recover_secret(&shares, shares[0].group_threshold)?;
	let encoder = MasterSecretEnc::new()?;
	encoder.decrypt(
		&ems.share_value,
		passphrase,
		ems.iteration_exponent,
		ems.identifier,
		ems.extendable_backup_flag,
	)
}

/// Decode every mnemonic to a `Share`, validate the resulting set, and
/// bucket the shares by group.
fn decode_mnemonics(mnemonics: &[Vec<String>]) -> Result<Vec<GroupShare>, Error> {
	if mnemonics.is_empty() {
		return Err(ErrorKind::ShareSet("list of mnemonics is empty".to_string()))?;
	}
	let check_len = mnemonics[0].len();
	let mut shares = vec![];
	for m in mnemonics {
		if m.len() != check_len {
			return Err(ErrorKind::ShareSet(
				"all mnemonics in a set must have the same length".to_string(),
			))?;
		}
		shares.push(Share::from_mnemonic(m)?);
	}

	let check_share = shares[0].clone();
	for s in &shares {
		if s.identifier != check_share.identifier
			|| s.extendable_backup_flag != check_share.extendable_backup_flag
			|| s.iteration_exponent != check_share.iteration_exponent
		{
			return Err(ErrorKind::ShareSet(
				"all mnemonics must share the same identifier, extendable flag and iteration exponent"
					.to_string(),
			))?;
		}
		if s.group_threshold != check_share.group_threshold {
			return Err(ErrorKind::ShareSet(
				"all mnemonics must have the same group threshold".to_string(),
			))?;
		}
		if s.group_count != check_share.group_count {
			return Err(ErrorKind::ShareSet(
				"all mnemonics must have the same group count".to_string(),
			))?;
		}
	}

	// bucket by group, recording each group's member threshold the first
	// time we see it and rejecting any share that disagrees afterwards
	let mut group_index_map: BTreeMap<u8, GroupShare> = BTreeMap::new();
	for s in shares {
		match group_index_map.get_mut(&s.group_index) {
			None => {
				let group_share = GroupShare {
					group_id: s.identifier,
					extendable_backup_flag: s.extendable_backup_flag,
					group_index: s.group_index,
					group_threshold: s.group_threshold,
					iteration_exponent: s.iteration_exponent,
					group_count: s.group_count,
					member_threshold: s.member_threshold,
					member_shares: vec![s],
					desc: None,
				};
				group_index_map.insert(group_share.group_index, group_share);
			}
			Some(existing) => {
				if existing.member_threshold != s.member_threshold {
					return Err(ErrorKind::ShareSet(format!(
						"group {} has mnemonics with mismatched member thresholds",
						s.group_index
					)))?;
				}
				existing.member_shares.push(s);
			}
		}
	}

	for g in group_index_map.values() {
		if g.member_shares.len() != g.member_threshold as usize {
			return Err(ErrorKind::ShareSet(format!(
				"group {} has {} mnemonics, but its member threshold is {}",
				g.group_index,
				g.member_shares.len(),
				g.member_threshold
			)))?;
		}
	}

	if group_index_map.len() != check_share.group_threshold as usize {
		return Err(ErrorKind::ShareSet(format!(
			"wrong number of mnemonic groups ({}); exactly {} are required",
			group_index_map.len(),
			check_share.group_threshold,
		)))?;
	}

	Ok(group_index_map.into_values().collect())
}
