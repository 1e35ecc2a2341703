//! # Actions (or moves)
//! Two representations of a move coexist:
//! - [`Action`] is produced by the move generator. It is packed into 16 bits and
//!   carries a tag (quiet, capture, en passant, castle, double push, promotion)
//!   that move application uses to update the rest of the position.
//! - [`PcnMove`] is what a player asks for, in pure coordinate notation
//!   (`e2e4`, `a7a8q`). A [`Position`](super::position::Position) resolves it
//!   against its legal actions.

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::{
    colour::Colour,
    piece::PieceKind,
    square::{Square, SquareParseError},
};

/// A generated move, packed in 16 bits: origin in bits 0-5, target in bits
/// 6-11 and a four bit tag (promotion, capture, two special bits) on top.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct Action(u16);
impl Action {
    const ORIGIN_MASK: u16 = 0x003F;
    const TARGET_MASK: u16 = Self::ORIGIN_MASK << 6;
    const PROMOTION: u16 = 1 << 15;
    const CAPTURE: u16 = 1 << 14;
    const SPECIAL_0: u16 = 1 << 12;
    const SPECIAL_1: u16 = 1 << 13;
    const PROMOTING_PIECE: u16 = Self::SPECIAL_0 | Self::SPECIAL_1;

    #[inline(always)]
    const fn from_squares(origin: Square, target: Square) -> u16 {
        origin as u16 | (target as u16) << 6
    }

    #[inline(always)]
    pub const fn new_quiet(origin: Square, target: Square) -> Self {
        Self(Self::from_squares(origin, target))
    }

    #[inline(always)]
    pub const fn new_capture(origin: Square, target: Square) -> Self {
        Self(Self::from_squares(origin, target) | Self::CAPTURE)
    }

    /// A pawn advancing two squares from its start rank.
    #[inline(always)]
    pub const fn new_double_push(origin: Square, target: Square) -> Self {
        Self(Self::from_squares(origin, target) | Self::SPECIAL_0)
    }

    /// Returns a new promoting move, capturing or not.
    pub const fn new_promotion(
        origin: Square,
        target: Square,
        promoting_to: PieceKind,
        capture: bool,
    ) -> Self {
        let piece_bits: u16 = match promoting_to {
            PieceKind::Bishop => 1,
            PieceKind::Rook => 2,
            PieceKind::Queen => 3,
            _ => 0,
        };
        let capture_bit = if capture { Self::CAPTURE } else { 0 };
        Self(Self::from_squares(origin, target) | Self::PROMOTION | capture_bit | piece_bits << 12)
    }

    #[inline(always)]
    pub const fn new_en_passant(origin: Square, target: Square) -> Self {
        Self(Self::from_squares(origin, target) | Self::CAPTURE | Self::SPECIAL_0)
    }

    /// Creates a queenside castle move (the king goes from the E file to the C file).
    #[inline(always)]
    pub const fn new_queenside_castle(side: Colour) -> Self {
        let bits = if side.is_black() {
            Self::from_squares(Square::E8, Square::C8)
        } else {
            Self::from_squares(Square::E1, Square::C1)
        };
        Self(bits | Self::SPECIAL_0 | Self::SPECIAL_1)
    }

    /// Creates a kingside castle move (the king goes from the E file to the G file).
    #[inline(always)]
    pub const fn new_kingside_castle(side: Colour) -> Self {
        let bits = if side.is_black() {
            Self::from_squares(Square::E8, Square::G8)
        } else {
            Self::from_squares(Square::E1, Square::G1)
        };
        Self(bits | Self::SPECIAL_1)
    }

    #[inline(always)]
    pub const fn origin(self) -> Square {
        Square::ALL[(self.0 & Self::ORIGIN_MASK) as usize]
    }
    /// Destination square. For castling moves, this is the king's destination.
    #[inline(always)]
    pub const fn target(self) -> Square {
        Square::ALL[((self.0 & Self::TARGET_MASK) >> 6) as usize]
    }

    /// Checks if this move is a capture (en passant included).
    #[inline(always)]
    pub const fn is_capture(self) -> bool {
        self.0 & Self::CAPTURE != 0
    }

    /// The kind a pawn turns into, for promotions.
    #[inline(always)]
    pub const fn promotion_target(self) -> Option<PieceKind> {
        if self.0 & Self::PROMOTION == 0 {
            return None;
        }
        Some(match (self.0 & Self::PROMOTING_PIECE) >> 12 {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            _ => PieceKind::Queen,
        })
    }

    /// Decodes the tag of this move.
    pub const fn kind(self) -> ActionKind {
        if let Some(kind) = self.promotion_target() {
            return ActionKind::Promotion {
                kind,
                capture: self.is_capture(),
            };
        }
        match (self.is_capture(), self.special_1_is_set(), self.special_0_is_set()) {
            (false, false, false) => ActionKind::Quiet,
            (false, false, true) => ActionKind::DoublePush,
            (false, true, false) => ActionKind::KingsideCastle,
            (false, true, true) => ActionKind::QueensideCastle,
            (true, _, false) => ActionKind::Capture,
            (true, _, true) => ActionKind::EnPassant,
        }
    }

    /// The coordinate notation equivalent of this move.
    pub const fn to_pcn(self) -> PcnMove {
        PcnMove {
            from: self.origin(),
            to: self.target(),
            promoting_to: self.promotion_target(),
        }
    }

    #[inline(always)]
    const fn special_0_is_set(self) -> bool {
        self.0 & Self::SPECIAL_0 != 0
    }
    #[inline(always)]
    const fn special_1_is_set(self) -> bool {
        self.0 & Self::SPECIAL_1 != 0
    }
}
impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_pcn())
    }
}

/// Tag of a generated move, used when applying it.
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub enum ActionKind {
    Quiet,
    DoublePush,
    KingsideCastle,
    QueensideCastle,
    Capture,
    EnPassant,
    Promotion { kind: PieceKind, capture: bool },
}

/// Pure coordinate notation move: origin, target and optional promotion kind.
///
/// These can be passed to a [`Position`](super::position::Position) to be
/// checked and played.
/// # Example
/// ```
/// # use chesslink::game::{action::PcnMove, piece::PieceKind, square::Square};
/// let mv: PcnMove = "a7a8q".parse().unwrap();
/// assert_eq!(mv, PcnMove::promoting(Square::A7, Square::A8, PieceKind::Queen));
/// assert_eq!(mv.to_string(), "a7a8q");
/// ```
#[derive(Clone, Copy, Hash, Eq, PartialEq, Debug)]
pub struct PcnMove {
    pub from: Square,
    pub to: Square,
    pub promoting_to: Option<PieceKind>,
}
impl PcnMove {
    /// A move without promotion.
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promoting_to: None,
        }
    }

    /// A pawn move promoting to the given kind.
    pub const fn promoting(from: Square, to: Square, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promoting_to: Some(kind),
        }
    }
}
impl std::fmt::Display for PcnMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promoting_to {
            write!(f, "{kind}")?
        }
        Ok(())
    }
}

/// Errors that may arise when parsing a move in coordinate notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum PcnParseError {
    #[error("Invalid origin square: {0}")]
    InvalidOrigin(SquareParseError),
    #[error("Invalid target square: {0}")]
    InvalidTarget(SquareParseError),
    #[error("{0:?} is not a promotion piece (expected one of q, r, b, n)")]
    InvalidPromotion(char),
    #[error("Trailing characters after the move")]
    TrailingInput,
}

impl PartialFromStr for PcnMove {
    type Err = PcnParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let (from, s) = Square::partial_from_str(s).map_err(PcnParseError::InvalidOrigin)?;
        let (to, s) = Square::partial_from_str(s).map_err(PcnParseError::InvalidTarget)?;
        let mut chars = s.chars();
        let (promoting_to, rest) = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => {
                let kind = s[..1]
                    .parse::<PieceKind>()
                    .ok()
                    .filter(|kind| kind.is_promotion_target())
                    .ok_or(PcnParseError::InvalidPromotion(c))?;
                (Some(kind), chars.as_str())
            }
            _ => (None, s),
        };
        Ok((
            Self {
                from,
                to,
                promoting_to,
            },
            rest,
        ))
    }
}
impl std::str::FromStr for PcnMove {
    type Err = PcnParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (mv, rest) = Self::partial_from_str(s)?;
        if rest.is_empty() {
            Ok(mv)
        } else {
            Err(PcnParseError::TrailingInput)
        }
    }
}
