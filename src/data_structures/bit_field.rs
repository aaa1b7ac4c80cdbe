use std::cmp::Ordering;
use std::iter::repeat;

const BITS: usize = 32;
const FIRST_BIT: u32 = 1 << (BITS - 1);

/// A dynamically sized bit-field.
#[derive(Default, Clone, Debug)]
pub struct BitField {
	values: Vec<u32>,
}

impl BitField {
	/// Create a new [BitField].
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the value of the bit at index `i`.
	///
	/// # Arguments
	/// * `i` - The index of the element to retrieve
	#[inline(always)]
	pub fn get(&self, i: usize) -> bool {
		let (position, shift) = Self::pos_shift(i);
		match self.values.get(position) {
			Some(bits) => (bits & (FIRST_BIT >> shift)) != 0,
			None => false,
		}
	}

	/// Set the value of the bit at index `i`.
	/// Returns the previous value of the bit.
	///
	/// # Arguments
	/// * `i` - The index of the element to modify
	#[inline(always)]
	pub fn set(&mut self, i: usize, value: bool) -> bool {
		let (position, shift) = Self::pos_shift(i);
		let bit = FIRST_BIT >> shift;

		match value {
			true => {
				if self.values.len() <= position {
					self.extend_to_position(position);
				}
				let bits = &mut self.values[position];
				let previous = (*bits & bit) != 0;
				*bits |= bit;
				previous
			},

			false => match self.values.get_mut(position) {
				None => false,
				Some(bits) => {
					let previous = (*bits & bit) != 0;
					*bits &= !bit;
					previous
				},
			},
		}
	}

	/// Returns `true` if no bit is set.
	pub fn is_empty(&self) -> bool {
		self.values.iter().all(|bits| *bits == 0)
	}

	/// Count the number of set bits.
	pub fn count_ones(&self) -> usize {
		self.values.iter().map(|bits| bits.count_ones() as usize).sum()
	}

	/// Iterate over the indices of the set bits, in ascending order.
	pub fn iter(&self) -> BitFieldIterator {
		BitFieldIterator {
			index: 0,
			remaining: self.values.first().copied().unwrap_or(0),
			values: &self.values,
		}
	}

	#[inline(never)]
	fn extend_to_position(&mut self, position: usize) {
		let count = position - self.values.len() + 1;
		self.values.extend(repeat(0).take(count));
	}

	#[inline(always)]
	fn pos_shift(a: usize) -> (usize, usize) {
		(a / BITS, a % BITS)
	}
}

impl From<&[usize]> for BitField {
	fn from(indices: &[usize]) -> Self {
		let mut bitfield = BitField::new();
		for i in indices {
			bitfield.set(*i, true);
		}
		bitfield
	}
}

impl Eq for BitField {}

impl PartialEq<Self> for BitField {
	fn eq(&self, other: &Self) -> bool {
		match self.values.len().cmp(&other.values.len()) {
			Ordering::Equal => self.values.eq(&other.values),
			Ordering::Less => {
				self.values.eq(&other.values[0..self.values.len()])
					&& other.values[self.values.len()..].iter().all(|i| *i == 0)
			},
			Ordering::Greater => {
				self.values[0..other.values.len()].eq(&other.values)
					&& self.values[other.values.len()..].iter().all(|i| *i == 0)
			},
		}
	}
}

/// Iterates over the indices of the set bits of a [BitField].
pub struct BitFieldIterator<'l> {
	index: usize,
	remaining: u32,
	values: &'l [u32],
}

impl Iterator for BitFieldIterator<'_> {
	type Item = usize;

	fn next(&mut self) -> Option<Self::Item> {
		while self.remaining == 0 {
			self.index += 1;
			self.remaining = *self.values.get(self.index)?;
		}

		let shift = self.remaining.leading_zeros() as usize;
		self.remaining &= !(FIRST_BIT >> shift);
		Some(self.index * BITS + shift)
	}
}

#[cfg(test)]
mod tests {
	use super::BitField;

	#[test]
	fn set_returns_previous_value() {
		let mut bits = BitField::new();
		assert!(!bits.set(70, true), "Bit 70 should not have been set");
		assert!(bits.set(70, true), "Bit 70 should have been set");
		assert!(bits.get(70));
		assert!(bits.set(70, false));
		assert!(!bits.get(70));
		assert!(!bits.set(1000, false), "Clearing past capacity must be a no-op");
		assert_eq!(bits, BitField::new());
	}

	#[test]
	fn iterates_set_bits_in_order() {
		let bits = BitField::from([0, 5, 31, 32, 64, 95].as_slice());
		assert_eq!(bits.iter().collect::<Vec<_>>(), vec![0, 5, 31, 32, 64, 95]);
		assert_eq!(bits.count_ones(), 6);
		assert!(BitField::new().iter().next().is_none());
	}

	#[test]
	fn equality_ignores_trailing_zeroes() {
		let mut a = BitField::new();
		let mut b = BitField::new();
		a.set(200, true);
		a.set(200, false);
		assert!(a.is_empty());
		assert_eq!(a, b);

		a.set(3, true);
		b.set(3, true);
		assert_eq!(a, b);

		a.set(3, false);
		assert_ne!(a, b);
	}
}
