//! Fixed-size sets over a [`Category`] enumeration, stored as a bit mask.

use crate::play::{Category, Characteristic, PlayType};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct CategorySet<T: Category> {
    bits: u32,
    _marker: PhantomData<T>,
}

pub type PlayTypeSet = CategorySet<PlayType>;
pub type CharacteristicSet = CategorySet<Characteristic>;

impl<T: Category> CategorySet<T> {
    // Evaluated per instantiation; an enumeration that outgrows the mask fails to compile.
    const FITS: () = assert!(T::COUNT <= u32::BITS as usize, "enumeration too large for CategorySet");

    const MASK: u32 = if T::COUNT == u32::BITS as usize {
        u32::MAX
    } else {
        (1u32 << T::COUNT) - 1
    };

    pub fn empty() -> Self {
        let () = Self::FITS;
        Self {
            bits: 0,
            _marker: PhantomData,
        }
    }

    pub fn full() -> Self {
        let () = Self::FITS;
        Self {
            bits: Self::MASK,
            _marker: PhantomData,
        }
    }

    pub fn insert(&mut self, value: T) {
        self.bits |= 1 << value.index();
    }

    pub fn remove(&mut self, value: T) {
        self.bits &= !(1 << value.index());
    }

    pub fn contains(&self, value: T) -> bool {
        self.bits & (1 << value.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Lowest member in enumeration order.
    pub fn first(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            T::from_index(self.bits.trailing_zeros() as usize)
        }
    }

    /// Members in enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        T::ALL.iter().copied().filter(move |v| self.contains(*v))
    }

    pub fn union(self, other: Self) -> Self {
        self | other
    }

    pub fn intersection(self, other: Self) -> Self {
        self & other
    }

    pub fn complement(self) -> Self {
        !self
    }

    /// Members of `self` that are not in `other`.
    pub fn difference(self, other: Self) -> Self {
        self & !other
    }
}

impl<T: Category> Default for CategorySet<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: Category> FromIterator<T> for CategorySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::empty();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl<T: Category> BitOr for CategorySet<T> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            bits: self.bits | rhs.bits,
            _marker: PhantomData,
        }
    }
}

impl<T: Category> BitOrAssign for CategorySet<T> {
    fn bitor_assign(&mut self, rhs: Self) {
        self.bits |= rhs.bits;
    }
}

impl<T: Category> BitAnd for CategorySet<T> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self {
            bits: self.bits & rhs.bits,
            _marker: PhantomData,
        }
    }
}

impl<T: Category> BitAndAssign for CategorySet<T> {
    fn bitand_assign(&mut self, rhs: Self) {
        self.bits &= rhs.bits;
    }
}

impl<T: Category> Not for CategorySet<T> {
    type Output = Self;

    fn not(self) -> Self {
        Self {
            bits: !self.bits & Self::MASK,
            _marker: PhantomData,
        }
    }
}

impl<T: Category> fmt::Debug for CategorySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
