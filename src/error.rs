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

//! Error types for the slip39 crate

use failure::{Backtrace, Context, Fail};
use std::env;
use std::fmt::{self, Display};

/// Error definition
#[derive(Debug, Fail)]
pub struct Error {
	inner: Context<ErrorKind>,
}

/// Errors are grouped the way SLIP-0039 implementations typically
/// distinguish them: bad caller input vs. a malformed/inconsistent share
/// set vs. a digest that doesn't check out.
#[derive(Clone, Eq, PartialEq, Debug, Fail)]
pub enum ErrorKind {
	/// Configuration error, with details (should not occur with `Slip39Config::default()`)
	#[fail(display = "Configuration Error: {}", _0)]
	Config(String),

	/// Bad caller-supplied policy: short/odd-length secret, non-ASCII
	/// passphrase, threshold exceeding count, a (1, N>1) group, iteration
	/// exponent out of range.
	#[fail(display = "Policy Error: {}", _0)]
	Policy(String),

	/// A single mnemonic fails to decode: unknown word, bad length, bad
	/// padding, bad checksum, or group count < group threshold.
	#[fail(display = "Share Format Error: {}", _0)]
	ShareFormat(String),

	/// A set of otherwise-valid mnemonics is inconsistent: mismatched
	/// identifier/flag/exponent, wrong group or member counts, mismatched
	/// per-group member threshold, differing share lengths.
	#[fail(display = "Share Set Error: {}", _0)]
	ShareSet(String),

	/// Assembling the full master secret resulted in an incorrect digest
	#[fail(display = "Integrity Error: {}", _0)]
	Integrity(String),

	/// Invalid usage of BitPacker.append_uX (num_bits longer than the size of uX)
	#[fail(display = "BitVec Error: {}", _0)]
	BitVec(String),

	/// Invalid usage of BitPacker.remove_padding (num_bits contained set bits)
	#[fail(display = "Padding Error: all padding bits must be 0")]
	Padding,
}

impl Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let show_bt = match env::var("RUST_BACKTRACE") {
			Ok(r) => r == "1",
			Err(_) => false,
		};
		let backtrace = match self.backtrace() {
			Some(b) => format!("{}", b),
			None => String::from("Unknown"),
		};
		let inner_output = format!("{}", self.inner,);
		let backtrace_output = format!("\n Backtrace: {}", backtrace);
		let mut output = inner_output;
		if show_bt {
			output.push_str(&backtrace_output);
		}
		Display::fmt(&output, f)
	}
}

impl Error {
	/// get kind
	pub fn kind(&self) -> ErrorKind {
		self.inner.get_context().clone()
	}
	/// get cause string
	pub fn cause_string(&self) -> String {
		match self.cause() {
			Some(k) => format!("{}", k),
			None => "Unknown".to_string(),
		}
	}
	/// get cause
	pub fn cause(&self) -> Option<&dyn Fail> {
		self.inner.cause()
	}
	/// get backtrace
	pub fn backtrace(&self) -> Option<&Backtrace> {
		self.inner.backtrace()
	}
}

impl From<ErrorKind> for Error {
	fn from(kind: ErrorKind) -> Error {
		Error {
			inner: Context::new(kind),
		}
	}
}

impl From<Context<ErrorKind>> for Error {
	fn from(inner: Context<ErrorKind>) -> Error {
		Error { inner }
	}
}
