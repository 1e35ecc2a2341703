//! # Castling rights
//! Stored as four flags, written in FEN as a subset of `KQkq`.

use std::str::FromStr;

use thiserror::Error;

use super::{bitboard::Bitboard, colour::Colour, square::Square};

/// The four castling flags. They record whether the king and the matching rook
/// have moved, not whether castling is currently possible.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const WHITE_SHORT: u8 = 1 << 0;
    const WHITE_LONG: u8 = 1 << 1;
    const BLACK_SHORT: u8 = 1 << 2;
    const BLACK_LONG: u8 = 1 << 3;

    /// FEN letters with their flag, in the order FEN writes them.
    const LETTERS: [(char, u8); 4] = [
        ('K', Self::WHITE_SHORT),
        ('Q', Self::WHITE_LONG),
        ('k', Self::BLACK_SHORT),
        ('q', Self::BLACK_LONG),
    ];

    /// Squares whose king or rook leaving (or being captured on) removes a right.
    pub(crate) const TOUCHED_SQUARES: Bitboard = Bitboard(0x9100000000000091);

    /// Every right, as in the starting position.
    pub const fn full() -> Self {
        Self(Self::WHITE_SHORT | Self::WHITE_LONG | Self::BLACK_SHORT | Self::BLACK_LONG)
    }

    pub const fn none() -> Self {
        Self(0)
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }

    const fn short_flag(colour: Colour) -> u8 {
        if colour.is_white() {
            Self::WHITE_SHORT
        } else {
            Self::BLACK_SHORT
        }
    }

    const fn long_flag(colour: Colour) -> u8 {
        if colour.is_white() {
            Self::WHITE_LONG
        } else {
            Self::BLACK_LONG
        }
    }

    /// Whether `colour` keeps the right to castle on the king's side.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        self.0 & Self::short_flag(colour) != 0
    }

    /// Whether `colour` keeps the right to castle on the queen's side.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        self.0 & Self::long_flag(colour) != 0
    }

    /// Removes the rights tied to a square that a piece left or was captured on.
    pub(crate) fn update_on_square(&mut self, square: Square) {
        if !Self::TOUCHED_SQUARES.is_set(square) {
            return;
        }
        self.0 &= !match square {
            Square::E1 => Self::WHITE_SHORT | Self::WHITE_LONG,
            Square::E8 => Self::BLACK_SHORT | Self::BLACK_LONG,
            Square::A1 => Self::WHITE_LONG,
            Square::H1 => Self::WHITE_SHORT,
            Square::A8 => Self::BLACK_LONG,
            Square::H8 => Self::BLACK_SHORT,
            _ => 0,
        }
    }
}

/// Errors that may arise when parsing the castling field of a FEN string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CastlingRightsParseError {
    #[error("Empty castling field")]
    Empty,
    #[error("{0:?} is not a castling letter (expected a subset of KQkq or '-')")]
    InvalidLetter(char),
    #[error("Castling letters must appear at most once, in KQkq order")]
    Unordered,
}

impl FromStr for CastlingRights {
    type Err = CastlingRightsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Self::none());
        }
        if s.is_empty() {
            return Err(CastlingRightsParseError::Empty);
        }
        let mut rights = 0;
        let mut letters = Self::LETTERS.iter();
        for c in s.chars() {
            if !Self::LETTERS.iter().any(|&(letter, _)| letter == c) {
                return Err(CastlingRightsParseError::InvalidLetter(c));
            }
            // Letters are consumed in order, so a repeated or misplaced one is
            // not found in what remains.
            let &(_, flag) = letters
                .find(|&&(letter, _)| letter == c)
                .ok_or(CastlingRightsParseError::Unordered)?;
            rights |= flag;
        }
        Ok(Self(rights))
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }
        for (letter, flag) in Self::LETTERS {
            if self.0 & flag != 0 {
                write!(f, "{letter}")?
            }
        }
        Ok(())
    }
}
