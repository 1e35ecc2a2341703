//! # Pieces
//! A piece is a kind paired with a colour.

use thiserror::Error;

use super::colour::Colour;

pub const NUM_PIECES: usize = 6;

pub type Piece = (PieceKind, Colour);

/// Kind of a piece, regardless of its colour. The discriminant indexes the
/// per-kind bitboards of a position.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}
impl PieceKind {
    /// All piece kinds, ordered by their index.
    pub const ALL: [Self; NUM_PIECES] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Kinds a pawn may promote to, strongest first.
    pub const PROMOTIONS: [Self; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    /// Bishops and queens.
    #[inline(always)]
    pub fn is_diagonal_slider(self) -> bool {
        matches!(self, Self::Bishop | Self::Queen)
    }
    /// Rooks and queens.
    #[inline(always)]
    pub fn is_orthogonal_slider(self) -> bool {
        matches!(self, Self::Rook | Self::Queen)
    }

    /// Checks if a pawn may promote to this kind.
    #[inline(always)]
    pub fn is_promotion_target(self) -> bool {
        !matches!(self, Self::Pawn | Self::King)
    }

    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// Lowercase letter used for this kind in FEN and coordinate notation.
    pub const fn symbol(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Reads a piece from its FEN letter: uppercase for white, lowercase for black.
    pub fn from_fen_char(c: char) -> Result<Piece, PieceParseError> {
        let kind = match c.to_ascii_lowercase() {
            'p' => Self::Pawn,
            'n' => Self::Knight,
            'b' => Self::Bishop,
            'r' => Self::Rook,
            'q' => Self::Queen,
            'k' => Self::King,
            _ => return Err(PieceParseError(c)),
        };
        let colour = if c.is_ascii_uppercase() {
            Colour::White
        } else {
            Colour::Black
        };
        Ok((kind, colour))
    }

    /// FEN letter of a piece of this kind and the given colour.
    pub const fn fen_char(self, colour: Colour) -> char {
        match colour {
            Colour::White => self.symbol().to_ascii_uppercase(),
            Colour::Black => self.symbol(),
        }
    }
}
impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{0:?} is not a piece letter")]
pub struct PieceParseError(pub char);

/// Parses a lowercase piece letter, as found in coordinate notation suffixes.
impl std::str::FromStr for PieceKind {
    type Err = PieceParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => {
                Self::from_fen_char(c).map(|(kind, _)| kind)
            }
            (Some(c), _) => Err(PieceParseError(c)),
            (None, _) => Err(PieceParseError(' ')),
        }
    }
}
