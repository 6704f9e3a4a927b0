use std::fmt;
use std::iter::FusedIterator;
use std::ops::{BitAnd, BitOr, BitOrAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The number of distinct values a [`BitMask`] can hold.
pub const BITMASK_CAPACITY: u8 = u64::BITS as u8;

/// A set of small integers in the range `0..64`, stored in a single machine word.
///
/// All operations return new values; a `BitMask` is never mutated through a shared reference.
/// Setting, clearing or testing an index of 64 or more is a programming error.
///
/// ```
/// use wordle_sieve::BitMask;
///
/// let mask = BitMask::EMPTY.set(3).set(1).set(3);
///
/// assert_eq!(mask.count(), 2);
/// assert_eq!(mask.iter().collect::<Vec<u8>>(), vec![1, 3]);
/// assert!(!mask.clear(1).is_set(1));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BitMask(u64);

impl BitMask {
    /// A mask with no bits set.
    pub const EMPTY: BitMask = BitMask(0);

    /// Returns a mask with the given index added.
    #[inline]
    pub fn set(self, index: u8) -> BitMask {
        BitMask(self.0 | bit(index))
    }

    /// Returns a mask with the given index removed.
    #[inline]
    pub fn clear(self, index: u8) -> BitMask {
        BitMask(self.0 & !bit(index))
    }

    /// Returns whether the given index is in the mask.
    #[inline]
    pub fn is_set(self, index: u8) -> bool {
        self.0 & bit(index) != 0
    }

    /// Returns the number of indices in the mask.
    #[inline]
    pub fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the indices in this mask that are not in `other`.
    #[inline]
    pub fn difference(self, other: BitMask) -> BitMask {
        BitMask(self.0 & !other.0)
    }

    /// Iterates over the set indices in ascending order.
    pub fn iter(self) -> BitMaskIter {
        BitMaskIter { remaining: self.0 }
    }

    /// Counts the set indices that satisfy `predicate`.
    pub fn count_where<P>(self, mut predicate: P) -> usize
    where
        P: FnMut(u8) -> bool,
    {
        self.iter().filter(|index| predicate(*index)).count()
    }
}

#[inline]
fn bit(index: u8) -> u64 {
    debug_assert!(
        index < BITMASK_CAPACITY,
        "BitMask index {} is out of range",
        index
    );
    1u64 << index
}

impl BitOr for BitMask {
    type Output = BitMask;

    fn bitor(self, rhs: BitMask) -> BitMask {
        BitMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for BitMask {
    fn bitor_assign(&mut self, rhs: BitMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for BitMask {
    type Output = BitMask;

    fn bitand(self, rhs: BitMask) -> BitMask {
        BitMask(self.0 & rhs.0)
    }
}

impl FromIterator<u8> for BitMask {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        iter.into_iter().fold(BitMask::EMPTY, BitMask::set)
    }
}

impl IntoIterator for BitMask {
    type Item = u8;
    type IntoIter = BitMaskIter;

    fn into_iter(self) -> BitMaskIter {
        self.iter()
    }
}

impl IntoIterator for &BitMask {
    type Item = u8;
    type IntoIter = BitMaskIter;

    fn into_iter(self) -> BitMaskIter {
        self.iter()
    }
}

impl fmt::Debug for BitMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Ascending iterator over the indices in a [`BitMask`].
#[derive(Clone, Debug)]
pub struct BitMaskIter {
    remaining: u64,
}

impl Iterator for BitMaskIter {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.remaining.trailing_zeros() as u8;
        // Drop the lowest set bit.
        self.remaining &= self.remaining - 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let count = self.remaining.count_ones() as usize;
        (count, Some(count))
    }
}

impl ExactSizeIterator for BitMaskIter {}

impl FusedIterator for BitMaskIter {}
