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

//! Four-round Feistel network that hides the master secret behind a
//! passphrase before it is split. Round keys come from PBKDF2-HMAC-SHA256;
//! the `ring_pbkdf2`/`rust_crypto_pbkdf2` features pick the backend.

use crate::error::{Error, ErrorKind};

#[cfg(feature = "ring_pbkdf2")]
use ring::{digest, pbkdf2};
#[cfg(feature = "ring_pbkdf2")]
use std::num::NonZeroU32;

#[cfg(feature = "rust_crypto_pbkdf2")]
use hmac::Hmac;
#[cfg(feature = "rust_crypto_pbkdf2")]
use pbkdf2::pbkdf2;
#[cfg(feature = "rust_crypto_pbkdf2")]
use sha2::Sha256;

/// Config struct
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterSecretEncConfig {
	/// The minimum number of iterations to use in PBKDF2
	pub min_iteration_count: u16,
	/// The number of rounds to use in the Feistel cipher
	pub round_count: u8,
	/// The customization string used in the PBKDF2 salt (non-extendable backups only)
	pub customization_string: Vec<u8>,
	/// The maximum allowed iteration exponent
	pub max_iteration_exponent: u8,
}

impl Default for MasterSecretEncConfig {
	fn default() -> Self {
		MasterSecretEncConfig {
			min_iteration_count: 10000,
			round_count: 4,
			customization_string: b"shamir".to_vec(),
			max_iteration_exponent: 16,
		}
	}
}

impl MasterSecretEncConfig {
	/// Just use defaults for now
	pub fn new() -> Self {
		Self::default()
	}
}

/// Holds config values so they need not be threaded through every call
pub struct MasterSecretEnc {
	pub config: MasterSecretEncConfig,
}

impl Default for MasterSecretEnc {
	fn default() -> Self {
		MasterSecretEnc {
			config: MasterSecretEncConfig::new(),
		}
	}
}

impl MasterSecretEnc {
	/// Create a new encoder with all defaults
	pub fn new() -> Result<MasterSecretEnc, Error> {
		Ok(MasterSecretEnc::default())
	}

	fn validate(&self, passphrase: &str, iteration_exponent: u8) -> Result<(), Error> {
		if iteration_exponent > self.config.max_iteration_exponent {
			return Err(ErrorKind::Policy(format!(
				"iteration exponent must be between 0 and {}",
				self.config.max_iteration_exponent
			)))?;
		}
		if !passphrase.bytes().all(|b| (32..=126).contains(&b)) {
			return Err(ErrorKind::Policy(
				"passphrase must consist of printable ASCII characters only".to_string(),
			))?;
		}
		Ok(())
	}

	pub fn encrypt(
		&self,
		master_secret: &[u8],
		passphrase: &str,
		iteration_exponent: u8,
		identifier: u16,
		extendable_backup_flag: bool,
	) -> Result<Vec<u8>, Error> {
		self.validate(passphrase, iteration_exponent)?;
		let mut l = master_secret.to_owned();
		let mut r = l.split_off(l.len() / 2);
		let salt = self.get_salt(identifier, extendable_backup_flag);
		for i in 0..self.config.round_count {
			let tmp_r = r.clone();
			r = self.xor(
				&l,
				&self.round_function(i, passphrase, iteration_exponent, &salt, &r),
			);
			l = tmp_r;
		}
		r.append(&mut l);
		Ok(r)
	}

	pub fn decrypt(
		&self,
		enc_master_secret: &[u8],
		passphrase: &str,
		iteration_exponent: u8,
		identifier: u16,
		extendable_backup_flag: bool,
	) -> Result<Vec<u8>, Error> {
		self.validate(passphrase, iteration_exponent)?;
		let mut l = enc_master_secret.to_owned();
		let mut r = l.split_off(l.len() / 2);
		let salt = self.get_salt(identifier, extendable_backup_flag);
		for i in (0..self.config.round_count).rev() {
			let tmp_r = r.clone();
			r = self.xor(
				&l,
				&self.round_function(i, passphrase, iteration_exponent, &salt, &r),
			);
			l = tmp_r;
		}
		r.append(&mut l);
		Ok(r)
	}

	/// An extendable backup carries no identifier-derived salt: the PBKDF2
	/// call is fed an empty salt instead, so the flag bit can't itself leak
	/// into the encryption by way of a salt that encodes it.
	fn get_salt(&self, identifier: u16, extendable_backup_flag: bool) -> Vec<u8> {
		if extendable_backup_flag {
			return vec![];
		}
		let mut retval = self.config.customization_string.clone();
		retval.extend_from_slice(&identifier.to_be_bytes());
		retval
	}

	/// the round function used internally by the Feistel cipher
	fn round_function(&self, i: u8, passphrase: &str, e: u8, salt: &[u8], r: &[u8]) -> Vec<u8> {
		let iterations = (u32::from(self.config.min_iteration_count) << e)
			/ u32::from(self.config.round_count);
		let out_length = r.len();
		let mut salt = salt.to_owned();
		salt.extend_from_slice(r);
		let mut password = vec![i];
		password.extend_from_slice(passphrase.as_bytes());
		self.pbkdf2_derive(iterations, &salt, &password, out_length)
	}

	#[cfg(feature = "rust_crypto_pbkdf2")]
	fn pbkdf2_derive(&self, iterations: u32, salt: &[u8], password: &[u8], out_length: usize) -> Vec<u8> {
		let mut out = vec![0; out_length];
		let _ = pbkdf2::<Hmac<Sha256>>(password, salt, iterations as usize, &mut out);
		out
	}

	#[cfg(feature = "ring_pbkdf2")]
	fn pbkdf2_derive(&self, iterations: u32, salt: &[u8], password: &[u8], out_length: usize) -> Vec<u8> {
		let mut out = vec![0; out_length];
		pbkdf2::derive(
			&digest::SHA256,
			NonZeroU32::new(iterations).unwrap(),
			salt,
			password,
			&mut out,
		);
		out
	}

	// xor values in both arrays, up to length of b
	fn xor(&self, a: &[u8], b: &[u8]) -> Vec<u8> {
		let mut retval = vec![0; b.len()];
		for i in 0..b.len() {
			retval[i] = a[i] ^ b[i];
		}
		retval
	}
}
