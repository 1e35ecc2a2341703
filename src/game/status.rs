//! # Game status
//! Classifies a position as ongoing, check, checkmate or one of the draws. The
//! status is always derived from the position and never stored.

use thiserror::Error;

use super::{
    bitboard::Bitboard, colour::Colour, piece::PieceKind, position::Position, square::Square,
};

/// Ways a game can end in a draw from a single position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum DrawKind {
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// Neither side has the material to deliver checkmate.
    InsufficientMaterial,
    /// 100 halfmoves without a capture or a pawn move.
    FiftyMoveRule,
}
impl std::fmt::Display for DrawKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Stalemate => "stalemate",
                Self::InsufficientMaterial => "insufficient material",
                Self::FiftyMoveRule => "fifty move rule",
            }
        )
    }
}

/// Status of a position, from the point of view of the side to move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameStatus {
    InProgress,
    Check,
    Checkmate { winner: Colour },
    Draw(DrawKind),
}
impl GameStatus {
    /// Checks if no more moves can be played.
    pub const fn is_over(self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Draw(_))
    }

    /// The winning side, if the game ended in checkmate.
    pub const fn winner(self) -> Option<Colour> {
        match self {
            Self::Checkmate { winner } => Some(winner),
            _ => None,
        }
    }

    /// Checks if the game ended in a draw.
    pub const fn is_draw(self) -> bool {
        matches!(self, Self::Draw(_))
    }
}
impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InProgress => write!(f, "in progress"),
            Self::Check => write!(f, "check"),
            Self::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            Self::Draw(kind) => write!(f, "draw by {kind}"),
        }
    }
}

/// A position reached the classifier in a state no legal game can produce.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("Found {count} {colour} kings on the board")]
    KingCount { colour: Colour, count: u8 },
    #[error("Two pieces share the square {0}")]
    OverlappingPieces(Square),
}

impl Position {
    fn check_invariants(&self) -> Result<(), InvariantViolation> {
        let white = self.pieces_of_colour(Colour::White);
        let black = self.pieces_of_colour(Colour::Black);
        if let Some(square) = (white & black).lowest_set_square() {
            return Err(InvariantViolation::OverlappingPieces(square));
        }
        let mut kinds = Bitboard::empty();
        for kind in PieceKind::iter() {
            let pieces = self.pieces_of_kind(kind);
            if let Some(square) = (kinds & pieces).lowest_set_square() {
                return Err(InvariantViolation::OverlappingPieces(square));
            }
            kinds |= pieces;
        }
        for colour in [Colour::White, Colour::Black] {
            let count = self.pieces_of(PieceKind::King, colour).cardinality();
            if count != 1 {
                return Err(InvariantViolation::KingCount { colour, count });
            }
        }
        Ok(())
    }

    /// Checks if neither side can possibly deliver checkmate.
    ///
    /// This is the case when the only pieces besides the kings are a single
    /// minor piece, or bishops all standing on squares of the same colour.
    /// Any pawn, rook or queen is enough material, as are two minor pieces
    /// when one of them is a knight.
    pub fn is_insufficient_material(&self) -> bool {
        let heavy = self.pieces_of_kind(PieceKind::Pawn)
            | self.pieces_of_kind(PieceKind::Rook)
            | self.pieces_of_kind(PieceKind::Queen);
        if heavy.is_not_empty() {
            return false;
        }
        let knights = self.pieces_of_kind(PieceKind::Knight);
        let bishops = self.pieces_of_kind(PieceKind::Bishop);
        if !(knights | bishops).has_more_than_one() {
            return true;
        }
        knights.is_empty()
            && (bishops.light_squares().is_empty() || bishops.dark_squares().is_empty())
    }

    /// Classifies the position.
    /// # Errors
    /// Fails if the position breaks one of the board invariants (one king per
    /// side, one piece per square), which only a defect can cause.
    pub fn try_status(&self) -> Result<GameStatus, InvariantViolation> {
        self.check_invariants()?;

        let in_check = self.in_check();
        let status = match (in_check, self.has_legal_action()) {
            (true, true) => GameStatus::Check,
            (true, false) => GameStatus::Checkmate {
                winner: !self.side_to_move(),
            },
            (false, false) => GameStatus::Draw(DrawKind::Stalemate),
            (false, true) if self.is_insufficient_material() => {
                GameStatus::Draw(DrawKind::InsufficientMaterial)
            }
            (false, true) if self.halfmove_clock() >= 100 => {
                GameStatus::Draw(DrawKind::FiftyMoveRule)
            }
            (false, true) => GameStatus::InProgress,
        };
        Ok(status)
    }

    /// Classifies the position.
    /// # Panics
    /// Panics on an [`InvariantViolation`], see [`Position::try_status`].
    pub fn status(&self) -> GameStatus {
        match self.try_status() {
            Ok(status) => status,
            Err(violation) => panic!("{violation}"),
        }
    }
}
