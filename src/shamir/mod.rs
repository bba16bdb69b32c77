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

//! Shamir split/recover over byte strings, plus the digest-share layer
//! that lets `recover_secret` detect a wrong or incomplete share set
//! before returning garbage.

use crate::config::Slip39Config;
use crate::error::{Error, ErrorKind};
use crate::field::lagrange;
use crate::mnemonic::Share;
use crate::util;

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Main struct, holds the config a splitter/recoverer runs with
pub struct Splitter {
	config: Slip39Config,
}

impl Splitter {
	/// Create new
	pub fn new(config: Option<&Slip39Config>) -> Splitter {
		Splitter {
			config: match config {
				Some(c) => c.to_owned(),
				None => Slip39Config::new(),
			},
		}
	}

	/// Split `shared_secret` into `share_count` shares, `threshold` of
	/// which are required to recover it. `proto_share` supplies every
	/// field of the resulting shares except `member_index`/
	/// `member_threshold`/`share_value`.
	pub fn split_secret(
		&self,
		proto_share: &Share,
		threshold: u8,
		share_count: u8,
		shared_secret: &[u8],
	) -> Result<Vec<Share>, Error> {
		if threshold == 0 || threshold > self.config.max_share_count {
			return Err(ErrorKind::Policy(format!(
				"threshold must be between 1 and {}",
				self.config.max_share_count
			)))?;
		}
		if share_count < threshold || share_count > self.config.max_share_count {
			return Err(ErrorKind::Policy(format!(
				"share count with given threshold must be between {} and {}",
				threshold, self.config.max_share_count
			)))?;
		}
		if shared_secret.len() < 16 || shared_secret.len() % 2 != 0 {
			return Err(ErrorKind::Policy(
				"secret must be at least 16 bytes in length and a multiple of 2".to_string(),
			))?;
		}

		let mut shares = vec![];
		// T=1 is the no-digest special case: every share is a plain copy
		if threshold == 1 {
			for i in 0..share_count {
				let mut s = proto_share.clone();
				s.member_index = i;
				s.member_threshold = threshold;
				s.share_value = shared_secret.to_owned();
				shares.push(s);
			}
			return Ok(shares);
		}

		let random_share_count = threshold - 2;

		for i in 0..random_share_count {
			let mut s = proto_share.clone();
			s.member_index = i;
			s.member_threshold = threshold;
			s.share_value = util::fill_vec_rand(shared_secret.len());
			shares.push(s);
		}

		let random_part =
			util::fill_vec_rand(shared_secret.len() - self.config.digest_length_bytes as usize);
		let mut digest = self.create_digest(&random_part, shared_secret);
		digest.extend_from_slice(&random_part);

		let mut base_shares = shares.clone();
		let mut s = proto_share.clone();
		s.member_index = self.config.digest_index;
		s.member_threshold = threshold;
		s.share_value = digest;
		base_shares.push(s);

		let mut s = proto_share.clone();
		s.member_index = self.config.secret_index;
		s.member_threshold = threshold;
		s.share_value = shared_secret.to_owned();
		base_shares.push(s);

		for i in random_share_count..share_count {
			let mut r = self.interpolate(&base_shares, i, proto_share)?;
			r.member_index = i;
			r.member_threshold = threshold;
			shares.push(r);
		}

		Ok(shares)
	}

	/// Recover the secret shared by `shares`, verifying the digest unless
	/// `threshold == 1`.
	pub fn recover_secret(&self, shares: &[Share], threshold: u8) -> Result<Share, Error> {
		if shares.is_empty() {
			return Err(ErrorKind::ShareSet("share set must not be empty".to_string()))?;
		}
		let mut proto_share = shares[0].clone();
		proto_share.share_value = vec![];

		let shared_secret = self.interpolate(shares, self.config.secret_index, &proto_share)?;

		if threshold != 1 {
			self.check_digest(shares, &shared_secret, &proto_share)?;
		}

		Ok(shared_secret)
	}

	fn interpolate(&self, shares: &[Share], x: u8, proto_share: &Share) -> Result<Share, Error> {
		let x_coords: Vec<u8> = shares.iter().map(|s| s.member_index).collect();

		if x_coords.contains(&x) {
			if let Some(s) = shares.iter().find(|s| s.member_index == x) {
				let mut ret_s = proto_share.clone();
				ret_s.member_index = x;
				ret_s.share_value = s.share_value.clone();
				return Ok(ret_s);
			}
		}

		let share_value_lengths = shares[0].share_value.len();
		for s in shares {
			if s.share_value.len() != share_value_lengths {
				return Err(ErrorKind::ShareSet(
					"all share values in a set must have the same length".to_string(),
				))?;
			}
		}

		let mut ret_share = proto_share.clone();
		ret_share.member_index = x;

		for i in 0..share_value_lengths {
			let points: Vec<(u8, u8)> = shares
				.iter()
				.map(|s| (s.member_index, s.share_value[i]))
				.collect();
			ret_share.share_value.push(lagrange::interpolate(&points, x)?);
		}

		Ok(ret_share)
	}

	fn create_digest(&self, random_data: &[u8], shared_secret: &[u8]) -> Vec<u8> {
		let mut mac = HmacSha256::new_from_slice(random_data).expect("HMAC accepts any key length");
		mac.update(shared_secret);
		let result = mac.finalize().into_bytes();
		result[..self.config.digest_length_bytes as usize].to_vec()
	}

	fn check_digest(
		&self,
		shares: &[Share],
		shared_secret: &Share,
		proto_share: &Share,
	) -> Result<(), Error> {
		let digest_share = self.interpolate(shares, self.config.digest_index, proto_share)?;
		let mut digest = digest_share.share_value;
		let random_part = digest.split_off(self.config.digest_length_bytes as usize);
		if digest != self.create_digest(&random_part, &shared_secret.share_value) {
			return Err(ErrorKind::Integrity(
				"digest of the recovered secret does not match".to_string(),
			))?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::{thread_rng, Rng};

	fn split_recover_impl(
		secret_length_bytes: usize,
		threshold: u8,
		total_shares: u8,
	) -> Result<(), Error> {
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(secret_length_bytes);
		let proto_share = Share::new()?;
		let mut shares = sp.split_secret(&proto_share, threshold, total_shares, &secret)?;
		for _ in threshold..total_shares {
			let recovered_secret = sp.recover_secret(&shares, threshold)?;
			assert_eq!(secret, recovered_secret.share_value);
			if threshold == 1 {
				return Ok(());
			}
			let remove_index = thread_rng().gen_range(0..shares.len());
			shares.remove(remove_index);
		}
		if shares.len() > 1 {
			let remove_index = thread_rng().gen_range(0..shares.len());
			shares.remove(remove_index);
			assert!(sp.recover_secret(&shares, threshold).is_err());
		}
		Ok(())
	}

	#[test]
	fn split_recover() -> Result<(), Error> {
		assert!(split_recover_impl(14, 3, 5).is_err());
		assert!(split_recover_impl(2047, 10, 12).is_err());
		assert!(split_recover_impl(16, 0, 5).is_err());
		assert!(split_recover_impl(16, 5, 3).is_err());
		assert!(split_recover_impl(16, 5, 0).is_err());

		let config = Slip39Config::new();
		for sc in 1..=config.max_share_count {
			for t in 1..=sc {
				split_recover_impl(16, t, sc)?;
			}
		}
		for sl in (16..32).step_by(2) {
			split_recover_impl(sl, 3, 5)?;
			split_recover_impl(sl, 2, 3)?;
		}
		split_recover_impl(2048, 3, 5)?;
		split_recover_impl(4096, 10, 16)?;
		Ok(())
	}

	#[test]
	fn digest_mismatch_is_rejected() -> Result<(), Error> {
		let sp = Splitter::new(None);
		let secret = util::fill_vec_rand(16);
		let proto_share = Share::new()?;
		let mut shares = sp.split_secret(&proto_share, 3, 5, &secret)?;
		shares[0].share_value[0] ^= 0xFF;
		assert!(sp.recover_secret(&shares[..3], 3).is_err());
		Ok(())
	}
}
