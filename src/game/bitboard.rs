//! Bitboards represent sets of up to 64 squares, and are used extensively in the
//! board representation and as the answer to destination queries.

use std::iter::FusedIterator;

use super::square::{Rank, Square};

#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
/// A set of squares, as an augmented u64 (bit `i` set means square index `i`
/// is in the set).
pub struct Bitboard(pub u64);
impl std::fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::iter().rev() {
            for square in Square::rank_squares_iter(rank) {
                let mark = if self.is_set(square) { '1' } else { '.' };
                write!(f, "{mark} ")?
            }
            if rank != Rank::One {
                writeln!(f)?
            }
        }
        Ok(())
    }
}
impl Bitboard {
    /// The set with no square.
    #[inline(always)]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The set of all 64 squares.
    #[inline(always)]
    pub const fn universal() -> Self {
        Self(u64::MAX)
    }

    #[inline(always)]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline(always)]
    pub const fn is_not_empty(self) -> bool {
        self.0 != 0
    }

    /// Membership test.
    #[inline(always)]
    pub const fn is_set(self, square: Square) -> bool {
        self.0 & square.bitboard().0 != 0
    }

    /// True for sets of two squares or more.
    #[inline(always)]
    pub const fn has_more_than_one(self) -> bool {
        self.0.count_ones() > 1
    }

    /// Number of squares in the set.
    #[inline(always)]
    pub const fn cardinality(self) -> u8 {
        self.0.count_ones() as u8
    }

    /// Square with the smallest index, `None` for the empty set.
    #[inline(always)]
    pub const fn lowest_set_square(self) -> Option<Square> {
        Square::from_index(self.0.trailing_zeros() as u8)
    }

    /// Removes and returns the square with the smallest index.
    #[inline(always)]
    pub fn pop_lowest_set_square(&mut self) -> Option<Square> {
        let square = self.lowest_set_square()?;
        self.0 ^= square.bitboard().0;
        Some(square)
    }

    /// Square with the largest index, `None` for the empty set.
    #[inline(always)]
    pub const fn highest_set_square(self) -> Option<Square> {
        if self.is_empty() {
            None
        } else {
            Square::from_index(63 - self.0.leading_zeros() as u8)
        }
    }

    #[inline(always)]
    pub fn pop_highest_set_square(&mut self) -> Option<Square> {
        let square = self.highest_set_square()?;
        *self &= !square.bitboard();
        Some(square)
    }

    /// Squares of the bitboard that are light squares.
    #[inline(always)]
    pub const fn light_squares(self) -> Self {
        Self(self.0 & 0x55AA55AA55AA55AA)
    }

    /// Squares of the bitboard that are dark squares.
    #[inline(always)]
    pub const fn dark_squares(self) -> Self {
        Self(self.0 & !0x55AA55AA55AA55AA)
    }
}
impl std::ops::BitAnd for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}
impl std::ops::BitAndAssign for Bitboard {
    #[inline(always)]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0
    }
}
impl std::ops::BitOr for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}
impl std::ops::BitOrAssign for Bitboard {
    #[inline(always)]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0
    }
}
impl std::ops::Not for Bitboard {
    type Output = Self;

    #[inline(always)]
    fn not(self) -> Self::Output {
        Self(!self.0)
    }
}
impl FromIterator<Square> for Bitboard {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |bb, square| bb | square.bitboard())
    }
}

impl Iterator for Bitboard {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        self.pop_lowest_set_square()
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len(), Some(self.len()))
    }
}
impl DoubleEndedIterator for Bitboard {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.pop_highest_set_square()
    }
}
impl FusedIterator for Bitboard {}
impl ExactSizeIterator for Bitboard {
    #[inline(always)]
    fn len(&self) -> usize {
        self.cardinality() as usize
    }
}
