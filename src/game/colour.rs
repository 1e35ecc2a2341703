//! Colours for each players and their pieces.

use thiserror::Error;

use super::square::{Delta, Rank};

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Returns the inverse of this colour.
    #[inline]
    pub const fn inverse(self) -> Self {
        match self {
            Colour::White => Colour::Black,
            Colour::Black => Colour::White,
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(self) -> bool {
        matches!(self, Colour::Black)
    }

    /// Direction in which pawns of this colour advance.
    #[inline]
    pub const fn pawn_push(self) -> Delta {
        match self {
            Colour::White => Delta::North,
            Colour::Black => Delta::South,
        }
    }

    /// Rank on which pawns of this colour start.
    #[inline]
    pub const fn pawn_start_rank(self) -> Rank {
        match self {
            Colour::White => Rank::Two,
            Colour::Black => Rank::Seven,
        }
    }

    /// Rank a pawn of this colour reaches when it promotes.
    #[inline]
    pub const fn promotion_rank(self) -> Rank {
        match self {
            Colour::White => Rank::Eight,
            Colour::Black => Rank::One,
        }
    }

    /// Rank on which the king and rooks of this colour start.
    #[inline]
    pub const fn back_rank(self) -> Rank {
        match self {
            Colour::White => Rank::One,
            Colour::Black => Rank::Eight,
        }
    }
}
impl std::ops::Not for Colour {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.inverse()
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::White => "white",
                Self::Black => "black",
            }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Side to move should be 'w' or 'b', found {0:?}")]
pub struct ColourParseError(pub String);

/// Parses the side to move field of a FEN string.
impl std::str::FromStr for Colour {
    type Err = ColourParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "w" => Ok(Colour::White),
            "b" => Ok(Colour::Black),
            other => Err(ColourParseError(other.to_string())),
        }
    }
}
