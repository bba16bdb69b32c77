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

//! Operations that allow packing bits from primitives into a bitvec.
//! Slower, but easier to follow and modify than a lot of bit twiddling.
//! Big-endian throughout: the first bit pushed is the most significant
//! bit of the value it came from.

use bitvec::order::Msb0;
use bitvec::vec::BitVec;

use crate::error::{Error, ErrorKind};

/// Wraps a bitvec and defines the packing/unpacking operations the
/// mnemonic codec needs on top of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitPacker {
	bv: BitVec<u8, Msb0>,
}

impl Default for BitPacker {
	fn default() -> Self {
		Self::new()
	}
}

impl BitPacker {
	/// Create a new, empty bitpacker
	pub fn new() -> Self {
		BitPacker { bv: BitVec::new() }
	}

	/// Append num_bits of zero padding to the internal bitvec
	pub fn append_padding(&mut self, num_bits: u8) {
		for _ in 0..num_bits {
			self.bv.push(false);
		}
	}

	/// Append each element of a u8 slice to the bitvec, 8 bits apiece
	pub fn append_vec_u8(&mut self, data: &[u8]) -> Result<(), Error> {
		for &b in data {
			self.append_u8(b, 8)?;
		}
		Ok(())
	}

	/// Append the low num_bits of a u32 to the bitvec. num_bits must be <= 32
	pub fn append_u32(&mut self, val: u32, num_bits: u8) -> Result<(), Error> {
		if num_bits > 32 {
			return Err(ErrorKind::BitVec(
				"number of bits to pack must be <= 32".to_string(),
			))?;
		}
		for i in (0u8..num_bits).rev() {
			self.bv.push(val & (1u32 << i) != 0);
		}
		Ok(())
	}

	/// Append the low num_bits of a u16 to the bitvec. num_bits must be <= 16
	pub fn append_u16(&mut self, val: u16, num_bits: u8) -> Result<(), Error> {
		if num_bits > 16 {
			return Err(ErrorKind::BitVec(
				"number of bits to pack must be <= 16".to_string(),
			))?;
		}
		for i in (0u8..num_bits).rev() {
			self.bv.push(val & (1u16 << i) != 0);
		}
		Ok(())
	}

	/// Append the low num_bits of a u8 to the bitvec. num_bits must be <= 8
	pub fn append_u8(&mut self, val: u8, num_bits: u8) -> Result<(), Error> {
		if num_bits > 8 {
			return Err(ErrorKind::BitVec(
				"number of bits to pack must be <= 8".to_string(),
			))?;
		}
		for i in (0u8..num_bits).rev() {
			self.bv.push(val & (1u8 << i) != 0);
		}
		Ok(())
	}

	/// Length, in bits, of the internal bitvec
	pub fn len(&self) -> usize {
		self.bv.len()
	}

	/// Whether the internal bitvec is empty
	pub fn is_empty(&self) -> bool {
		self.bv.is_empty()
	}

	fn read_bits(&self, start: usize, num_bits: usize, max_bits: usize) -> Result<u32, Error> {
		if num_bits > max_bits {
			return Err(ErrorKind::BitVec(format!(
				"number of bits to read must be <= {}",
				max_bits
			)))?;
		}
		let mut val: u32 = 0;
		for bit in &self.bv[start..start + num_bits] {
			val = (val << 1) | u32::from(*bit);
		}
		Ok(val)
	}

	/// Read num_bits starting at bit offset start as a u8
	pub fn get_u8(&self, start: usize, num_bits: usize) -> Result<u8, Error> {
		Ok(self.read_bits(start, num_bits, 8)? as u8)
	}

	/// Read num_bits starting at bit offset start as a u16
	pub fn get_u16(&self, start: usize, num_bits: usize) -> Result<u16, Error> {
		Ok(self.read_bits(start, num_bits, 16)? as u16)
	}

	/// Read num_bits starting at bit offset start as a u32
	pub fn get_u32(&self, start: usize, num_bits: usize) -> Result<u32, Error> {
		self.read_bits(start, num_bits, 32)
	}

	/// Read num_bytes worth of whole bytes starting at bit offset start
	pub fn get_vec_u8(&self, start: usize, num_bytes: usize) -> Result<Vec<u8>, Error> {
		let mut ret = Vec::with_capacity(num_bytes);
		for i in 0..num_bytes {
			ret.push(self.get_u8(start + i * 8, 8)?);
		}
		Ok(ret)
	}

	/// Discard everything outside the `[start, end)` bit range
	pub fn split_out(&mut self, start: usize, end: usize) {
		self.bv = self.bv[start..end].to_bitvec();
	}

	/// Strip num_bits of padding from the front. All of them must be zero,
	/// since a set padding bit means the mnemonic was tampered with or
	/// mistyped.
	pub fn remove_padding(&mut self, num_bits: usize) -> Result<(), Error> {
		if self.bv[0..num_bits].count_ones() != 0 {
			return Err(ErrorKind::Padding)?;
		}
		self.bv = self.bv[num_bits..].to_bitvec();
		Ok(())
	}

	/// Left-pad with zero bits until the length is a multiple of radix_bits
	pub fn normalize(&mut self, radix_bits: usize) {
		let rem = self.bv.len() % radix_bits;
		if rem == 0 {
			return;
		}
		let mut padded: BitVec<u8, Msb0> = BitVec::new();
		for _ in 0..(radix_bits - rem) {
			padded.push(false);
		}
		padded.extend(self.bv.iter().map(|b| *b));
		self.bv = padded;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pack_and_read_back() -> Result<(), Error> {
		let mut bp = BitPacker::new();
		bp.append_u16(21219, 15)?;
		bp.append_u8(1, 1)?;
		bp.append_u8(5, 4)?;
		assert_eq!(bp.len(), 20);
		assert_eq!(bp.get_u16(0, 15)?, 21219);
		assert_eq!(bp.get_u8(15, 1)?, 1);
		assert_eq!(bp.get_u8(16, 4)?, 5);
		Ok(())
	}

	#[test]
	fn remove_padding_rejects_set_bits() {
		let mut bp = BitPacker::new();
		bp.append_u8(1, 4).unwrap();
		bp.append_vec_u8(&[0xAB]).unwrap();
		assert!(bp.remove_padding(4).is_err());
	}

	#[test]
	fn normalize_left_pads_to_radix() {
		let mut bp = BitPacker::new();
		bp.append_u8(0xFF, 8).unwrap();
		bp.normalize(10);
		assert_eq!(bp.len(), 10);
		assert_eq!(bp.get_u16(0, 10).unwrap(), 0x0FF);
	}
}
