//! Fixed-size bit-set backing entity signatures and aspects.

use std::borrow::Borrow;

/// The number of 64-bit words in a `BitSet`. Bounds the total number of
/// component types a `World` can register.
const WORDS: usize = 2;

/// The maximum number of distinct component types.
pub const MAX_COMPONENT_TYPES: usize = WORDS * 64;

/// Fixed size bit-set.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitSet {
    bits: [u64; WORDS],
}

impl BitSet {
    /// Create a new `BitSet` with *ZERO* bit.
    pub fn new() -> Self {
        BitSet { bits: [0; WORDS] }
    }

    /// Adds a value to the set.
    #[inline]
    pub fn insert(&mut self, index: usize) {
        let (word, bit) = Self::split(index);
        self.bits[word] |= 1 << bit;
    }

    /// Removes a value from the set.
    #[inline]
    pub fn remove(&mut self, index: usize) {
        let (word, bit) = Self::split(index);
        self.bits[word] &= !(1 << bit);
    }

    /// Returns `true` if this set contains the specified integer.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        let (word, bit) = Self::split(index);
        ((1 << bit) & self.bits[word]) > 0
    }

    /// Clears all bits in this set.
    #[inline]
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Returns whether there are no bits set in this set.
    #[inline]
    pub fn is_empty(&self) -> bool {
        *self == Self::new()
    }

    /// Returns a bit-set that intersects self with `rhs`.
    #[inline]
    pub fn intersect_with<T>(&self, rhs: T) -> Self
    where
        T: Borrow<Self>,
    {
        let mut bs = BitSet::new();
        let rhs = rhs.borrow();
        for i in 0..WORDS {
            bs.bits[i] = self.bits[i] & rhs.bits[i];
        }
        bs
    }

    /// Returns a bit-set that unions self with `rhs`.
    #[inline]
    pub fn union_with<T>(&self, rhs: T) -> Self
    where
        T: Borrow<Self>,
    {
        let mut bs = BitSet::new();
        let rhs = rhs.borrow();
        for i in 0..WORDS {
            bs.bits[i] = self.bits[i] | rhs.bits[i];
        }
        bs
    }

    /// Returns an iterator over the set bits.
    #[inline]
    pub fn iter(&self) -> BitSetIter {
        BitSetIter {
            bitset: *self,
            cursor: 0,
        }
    }

    #[inline]
    fn split(index: usize) -> (usize, usize) {
        assert!(
            index < MAX_COMPONENT_TYPES,
            "Too many component types. (MAX_COMPONENT_TYPES: {:?})",
            MAX_COMPONENT_TYPES
        );
        (index / 64, index % 64)
    }
}

pub struct BitSetIter {
    bitset: BitSet,
    cursor: usize,
}

impl Iterator for BitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.cursor < MAX_COMPONENT_TYPES {
            self.cursor += 1;

            if self.bitset.contains(self.cursor - 1) {
                return Some(self.cursor - 1);
            }
        }

        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let mut bits = BitSet::new();

        assert!(!bits.contains(5));

        bits.insert(5);
        assert!(bits.contains(5));

        bits.insert(9);
        assert!(bits.contains(9));
        assert!(!bits.contains(12));

        bits.insert(12);
        assert!(bits.contains(12));

        bits.remove(5);
        assert!(!bits.contains(5));
        assert!(bits.contains(9));
        assert!(bits.contains(12));

        bits.clear();
        assert!(bits == BitSet::new());
    }

    #[test]
    fn across_words() {
        let mut bits = BitSet::new();
        bits.insert(3);
        bits.insert(63);
        bits.insert(64);
        bits.insert(127);

        assert!(bits.contains(63));
        assert!(bits.contains(64));
        assert!(!bits.contains(65));

        bits.remove(64);
        assert!(!bits.contains(64));
        assert!(bits.contains(127));

        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![3, 63, 127]);
    }

    #[test]
    fn intersect() {
        let mut lhs = BitSet::new();
        lhs.insert(1);
        lhs.insert(3);
        lhs.insert(9);

        let mut rhs = BitSet::new();
        rhs.insert(2);
        rhs.insert(3);
        rhs.insert(10);

        let v = lhs.intersect_with(&rhs);
        assert!(!v.contains(1));
        assert!(!v.contains(2));
        assert!(v.contains(3));
        assert!(!v.contains(9));
        assert!(!v.contains(10));
    }
}
