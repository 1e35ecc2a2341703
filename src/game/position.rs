//! Main API to represent and interact with a chess position.
//!
//! This includes generating and playing moves, defining positions from FEN
//! strings and querying which squares are attacked. A [`Position`] is a value:
//! playing a move returns a new position and leaves the original untouched.

use thiserror::Error;

use super::{
    action::{Action, ActionKind, PcnMove},
    attacks::{bishop_attacks, king_attacks, knight_attacks, pawn_attacks, queen_attacks, rook_attacks},
    bitboard::Bitboard,
    castling_rights::CastlingRights,
    colour::Colour,
    fen::{Fen, FenParseError},
    piece::{Piece, PieceKind},
    square::{File, Rank, Square},
};

/// Legal moves of a position.
///
/// A position holds at most 16 pieces per colour, 15 of them besides the king.
/// None of those has more than 27 moves (a queen in the open; a pawn tops out at
/// 12 with promotions) and the king adds at most 8 steps and 2 castles, hence
/// the capacity.
pub type ActionList = heapless::Vec<Action, 512>;

/// Moves of a single piece, before the legality filter.
type PieceActions = heapless::Vec<Action, 32>;

/// Reasons for which a requested move can not be played.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum IllegalMoveError {
    #[error("There is no piece on {0}")]
    EmptyOrigin(Square),
    #[error("The piece on {0} belongs to the side not to move")]
    OpponentPiece(Square),
    #[error("The piece on {from} can not reach {to}")]
    Unreachable { from: Square, to: Square },
    #[error("Moving from {from} to {to} leaves the king in check")]
    LeavesKingInCheck { from: Square, to: Square },
    #[error("Moving from {from} to {to} requires a promotion piece")]
    MissingPromotion { from: Square, to: Square },
    #[error("Moving from {from} to {to} is not a promotion")]
    UnexpectedPromotion { from: Square, to: Square },
    #[error("Pawns can not promote to a {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Represents a valid chess position and defines an API to interact with said
/// position (generating and playing moves, serializing, etc).
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Position {
    // 8x8 array to find which piece sits on which square.
    pieces: [Option<PieceKind>; 64],
    // Bitboards are indexed by piece kind.
    piece_bitboards: [Bitboard; 6],
    // Bitboards containing occupancy information by color.
    color_bitboards: [Bitboard; 2],

    side_to_move: Colour,
    castling_rights: CastlingRights,
    en_passant: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}
impl Default for Position {
    /// The initial position of chess.
    fn default() -> Self {
        Self::initial()
    }
}
impl Position {
    /// A position with no pieces, white to move.
    fn empty() -> Self {
        Self {
            pieces: [None; 64],
            piece_bitboards: [Bitboard::empty(); 6],
            color_bitboards: [Bitboard::empty(); 2],
            side_to_move: Colour::White,
            castling_rights: CastlingRights::none(),
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The initial position of chess.
    pub fn initial() -> Self {
        let mut position = Self::empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in File::iter().zip(back_rank) {
            position.add_piece(Square::new(file, Rank::One), kind, Colour::White);
            position.add_piece(Square::new(file, Rank::Two), PieceKind::Pawn, Colour::White);
            position.add_piece(Square::new(file, Rank::Seven), PieceKind::Pawn, Colour::Black);
            position.add_piece(Square::new(file, Rank::Eight), kind, Colour::Black);
        }
        position.castling_rights = CastlingRights::full();
        position
    }

    /// Creates a position from a parsed FEN record.
    /// # Errors
    /// Fails if the record describes a position that can not occur in a game:
    /// - each side must have exactly one king, and at most 16 pieces
    /// - no pawn stands on the first or last rank
    /// - the en passant target, if any, must be the square a pawn of the side
    ///   that just moved skipped over with a double push
    /// - the side that just moved must not be in check
    pub fn from_fen(fen: &Fen) -> Result<Self, FenParseError> {
        let mut position = Self::empty();
        for square in Square::iter() {
            if let Some((kind, colour)) = fen.piece_on(square) {
                if kind == PieceKind::Pawn && matches!(square.rank(), Rank::One | Rank::Eight) {
                    return Err(FenParseError::PawnOnBackRank(square));
                }
                position.add_piece(square, kind, colour);
            }
        }

        for colour in [Colour::White, Colour::Black] {
            let kings = position.pieces_of(PieceKind::King, colour).cardinality();
            if kings != 1 {
                return Err(FenParseError::KingCount {
                    colour,
                    count: kings,
                });
            }
            let count = position.color_bitboards[colour as usize].cardinality();
            if count > 16 {
                return Err(FenParseError::TooManyPieces { colour, count });
            }
        }

        position.side_to_move = fen.side_to_move;
        position.castling_rights = fen.castling_rights;
        position.halfmove_clock = fen.halfmove_clock;
        position.fullmove_number = fen.fullmove_number;

        if let Some(target) = fen.en_passant {
            let mover = !fen.side_to_move;
            let (target_rank, pawn_rank) = match mover {
                Colour::White => (Rank::Three, Rank::Four),
                Colour::Black => (Rank::Six, Rank::Five),
            };
            let pushed_pawn = Square::new(target.file(), pawn_rank);
            if target.rank() != target_rank
                || position.piece_on(target).is_some()
                || position.piece_on(pushed_pawn) != Some((PieceKind::Pawn, mover))
            {
                return Err(FenParseError::EnPassantTarget(target));
            }
            position.en_passant = Some(target);
        }

        let waiting = !position.side_to_move;
        if position.is_in_check(waiting) {
            return Err(FenParseError::OpponentInCheck(waiting));
        }

        Ok(position)
    }

    /// The FEN record of this position.
    pub fn fen(&self) -> Fen {
        let mut board = [None; 64];
        for square in Square::iter() {
            board[square as usize] = self.piece_on(square);
        }
        Fen {
            board,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    /// The FEN string of this position.
    /// # Example
    /// ```
    /// # use chesslink::game::position::Position;
    /// assert_eq!(
    ///     Position::initial().to_fen_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    pub fn to_fen_string(&self) -> String {
        self.fen().to_string()
    }

    /// Adds a piece on an empty square.
    pub(super) fn add_piece(&mut self, on: Square, kind: PieceKind, colour: Colour) {
        debug_assert!(self.pieces[on as usize].is_none());
        let bb = on.bitboard();
        self.pieces[on as usize] = Some(kind);
        self.piece_bitboards[kind as usize] |= bb;
        self.color_bitboards[colour as usize] |= bb;
    }

    /// Removes whatever piece stands on a square.
    pub(super) fn remove_piece(&mut self, on: Square) -> Option<Piece> {
        let piece = self.piece_on(on)?;
        let bb = !on.bitboard();
        self.pieces[on as usize] = None;
        self.piece_bitboards[piece.0 as usize] &= bb;
        self.color_bitboards[piece.1 as usize] &= bb;
        Some(piece)
    }

    /// Moves a piece to an empty square.
    fn move_piece(&mut self, from: Square, to: Square) {
        if let Some((kind, colour)) = self.remove_piece(from) {
            self.add_piece(to, kind, colour)
        }
    }

    /// Returns the piece kind and colour on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        let kind = self.pieces[square as usize]?;
        let colour = if self.color_bitboards[Colour::White as usize].is_set(square) {
            Colour::White
        } else {
            Colour::Black
        };
        Some((kind, colour))
    }

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the castling flags of the position.
    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Returns the en passant target square, set right after a double pawn push.
    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Moves played since the last capture or pawn advance.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Number of the current move, starting at 1 and increasing after each black move.
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// All squares holding a piece.
    #[inline]
    pub fn occupancy(&self) -> Bitboard {
        self.color_bitboards[0] | self.color_bitboards[1]
    }

    /// Squares holding a piece of the given colour.
    #[inline]
    pub fn pieces_of_colour(&self, colour: Colour) -> Bitboard {
        self.color_bitboards[colour as usize]
    }

    /// Squares holding a piece of the given kind, any colour.
    #[inline]
    pub fn pieces_of_kind(&self, kind: PieceKind) -> Bitboard {
        self.piece_bitboards[kind as usize]
    }

    /// Squares holding a piece of the given kind and colour.
    #[inline]
    pub fn pieces_of(&self, kind: PieceKind, colour: Colour) -> Bitboard {
        self.piece_bitboards[kind as usize] & self.color_bitboards[colour as usize]
    }

    /// Square of the king of the given colour.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.pieces_of(PieceKind::King, colour).lowest_set_square()
    }

    /// Pieces of the given colour attacking a square, given an occupancy.
    pub fn attackers(&self, square: Square, by: Colour, occupancy: Bitboard) -> Bitboard {
        let sliders = |moves_along: fn(PieceKind) -> bool| -> Bitboard {
            PieceKind::iter()
                .filter(|&kind| moves_along(kind))
                .map(|kind| self.pieces_of_kind(kind))
                .fold(Bitboard::empty(), |all, bb| all | bb)
        };
        let diagonal = sliders(PieceKind::is_diagonal_slider);
        let orthogonal = sliders(PieceKind::is_orthogonal_slider);
        (knight_attacks(square) & self.pieces_of_kind(PieceKind::Knight)
            | king_attacks(square) & self.pieces_of_kind(PieceKind::King)
            | pawn_attacks(square, !by) & self.pieces_of_kind(PieceKind::Pawn)
            | bishop_attacks(square, occupancy) & diagonal
            | rook_attacks(square, occupancy) & orthogonal)
            & self.pieces_of_colour(by)
    }

    /// Checks if a square is attacked by any piece of the given colour.
    #[inline]
    pub fn is_attacked(&self, square: Square, by: Colour) -> bool {
        self.attackers(square, by, self.occupancy()).is_not_empty()
    }

    /// Checks if the king of the given colour is attacked.
    pub fn is_in_check(&self, colour: Colour) -> bool {
        self.king_square(colour)
            .is_some_and(|king| self.is_attacked(king, !colour))
    }

    /// Checks if the side to move is in check.
    #[inline]
    pub fn in_check(&self) -> bool {
        self.is_in_check(self.side_to_move)
    }

    /// Moves of the piece on `origin` that follow its movement rules, whether or
    /// not they leave the own king attacked.
    fn pseudo_legal_actions_from(&self, origin: Square) -> PieceActions {
        let mut actions = PieceActions::new();
        let Some((kind, colour)) = self.piece_on(origin) else {
            return actions;
        };
        if colour != self.side_to_move {
            return actions;
        }

        let us = self.pieces_of_colour(colour);
        let them = self.pieces_of_colour(!colour);
        let occupancy = us | them;
        let mut push = |action: Action| {
            // SAFETY: a single piece has at most 27 moves (a queen in the open).
            unsafe { actions.push_unchecked(action) }
        };

        let targets = match kind {
            PieceKind::Pawn => {
                self.pawn_actions(origin, colour, occupancy, them, &mut push);
                Bitboard::empty()
            }
            PieceKind::Knight => knight_attacks(origin),
            PieceKind::Bishop => bishop_attacks(origin, occupancy),
            PieceKind::Rook => rook_attacks(origin, occupancy),
            PieceKind::Queen => queen_attacks(origin, occupancy),
            PieceKind::King => {
                self.castling_actions(origin, colour, occupancy, &mut push);
                king_attacks(origin)
            }
        };
        for target in targets & !us {
            push(if them.is_set(target) {
                Action::new_capture(origin, target)
            } else {
                Action::new_quiet(origin, target)
            })
        }

        actions
    }

    fn pawn_actions(
        &self,
        origin: Square,
        colour: Colour,
        occupancy: Bitboard,
        them: Bitboard,
        push: &mut impl FnMut(Action),
    ) {
        let promotes = |target: Square| target.rank() == colour.promotion_rank();

        if let Some(single) = origin.translate(colour.pawn_push()) {
            if !occupancy.is_set(single) {
                if promotes(single) {
                    for kind in PieceKind::PROMOTIONS {
                        push(Action::new_promotion(origin, single, kind, false))
                    }
                } else {
                    push(Action::new_quiet(origin, single));
                    if origin.rank() == colour.pawn_start_rank() {
                        if let Some(double) = single.translate(colour.pawn_push()) {
                            if !occupancy.is_set(double) {
                                push(Action::new_double_push(origin, double))
                            }
                        }
                    }
                }
            }
        }

        for target in pawn_attacks(origin, colour) {
            if them.is_set(target) {
                if promotes(target) {
                    for kind in PieceKind::PROMOTIONS {
                        push(Action::new_promotion(origin, target, kind, true))
                    }
                } else {
                    push(Action::new_capture(origin, target))
                }
            } else if self.en_passant == Some(target) {
                push(Action::new_en_passant(origin, target))
            }
        }
    }

    /// Castles require the right, the king and rook on their original squares,
    /// empty squares between them, and a king that is not in check and does not
    /// cross an attacked square.
    fn castling_actions(
        &self,
        origin: Square,
        colour: Colour,
        occupancy: Bitboard,
        push: &mut impl FnMut(Action),
    ) {
        let rank = colour.back_rank();
        if origin != Square::new(File::E, rank) {
            return;
        }
        let them = !colour;
        let rook_on = |file| self.piece_on(Square::new(file, rank)) == Some((PieceKind::Rook, colour));
        let empty = |files: &[File]| {
            files
                .iter()
                .all(|&file| !occupancy.is_set(Square::new(file, rank)))
        };
        let safe = |files: &[File]| {
            files
                .iter()
                .all(|&file| !self.is_attacked(Square::new(file, rank), them))
        };

        if self.castling_rights.kingside_castle_allowed(colour)
            && rook_on(File::H)
            && empty(&[File::F, File::G])
            && safe(&[File::E, File::F, File::G])
        {
            push(Action::new_kingside_castle(colour))
        }
        if self.castling_rights.queenside_castle_allowed(colour)
            && rook_on(File::A)
            && empty(&[File::B, File::C, File::D])
            && safe(&[File::E, File::D, File::C])
        {
            push(Action::new_queenside_castle(colour))
        }
    }

    /// Checks if a pseudo-legal action keeps the mover's king safe.
    fn is_legal(&self, action: Action) -> bool {
        let mover = self.side_to_move;
        let mut scratch = self.clone();
        scratch.apply(action);
        !scratch.is_in_check(mover)
    }

    /// Legal moves from a single square. Empty if the square does not hold a
    /// piece of the side to move.
    pub fn actions_from(&self, origin: Square) -> ActionList {
        let mut actions = ActionList::new();
        for action in self.pseudo_legal_actions_from(origin) {
            if self.is_legal(action) {
                // SAFETY: a single piece has fewer moves than the list capacity.
                unsafe { actions.push_unchecked(action) }
            }
        }
        actions
    }

    /// All legal moves of the side to move.
    pub fn actions(&self) -> ActionList {
        let mut actions = ActionList::new();
        for origin in self.pieces_of_colour(self.side_to_move) {
            for action in self.pseudo_legal_actions_from(origin) {
                if self.is_legal(action) {
                    // SAFETY: see the capacity bound on `ActionList`.
                    unsafe { actions.push_unchecked(action) }
                }
            }
        }
        actions
    }

    /// Checks if the side to move has at least one legal move, stopping at the
    /// first one found.
    pub fn has_legal_action(&self) -> bool {
        self.pieces_of_colour(self.side_to_move).any(|origin| {
            self.pseudo_legal_actions_from(origin)
                .into_iter()
                .any(|action| self.is_legal(action))
        })
    }

    /// Squares the piece on `origin` can legally move to.
    ///
    /// Promotions to different pieces share the same destination, so a pawn about
    /// to promote yields each target once.
    pub fn legal_destinations(&self, origin: Square) -> Bitboard {
        self.actions_from(origin)
            .iter()
            .map(|action| action.target())
            .collect()
    }

    /// Plays a move in place, assuming it was produced by the move generator of
    /// this position.
    fn apply(&mut self, action: Action) {
        let origin = action.origin();
        let target = action.target();
        let mover = self.side_to_move;
        let moved_pawn = self.pieces[origin as usize] == Some(PieceKind::Pawn);

        self.en_passant = None;
        match action.kind() {
            ActionKind::Quiet => self.move_piece(origin, target),
            ActionKind::DoublePush => {
                self.move_piece(origin, target);
                self.en_passant = origin.translate(mover.pawn_push());
            }
            ActionKind::Capture => {
                self.remove_piece(target);
                self.move_piece(origin, target);
            }
            ActionKind::EnPassant => {
                self.remove_piece(Square::new(target.file(), origin.rank()));
                self.move_piece(origin, target);
            }
            ActionKind::KingsideCastle => {
                let rank = mover.back_rank();
                self.move_piece(origin, target);
                self.move_piece(Square::new(File::H, rank), Square::new(File::F, rank));
            }
            ActionKind::QueensideCastle => {
                let rank = mover.back_rank();
                self.move_piece(origin, target);
                self.move_piece(Square::new(File::A, rank), Square::new(File::D, rank));
            }
            ActionKind::Promotion { kind, capture } => {
                if capture {
                    self.remove_piece(target);
                }
                self.remove_piece(origin);
                self.add_piece(target, kind, mover);
            }
        }

        self.castling_rights.update_on_square(origin);
        self.castling_rights.update_on_square(target);

        if moved_pawn || action.is_capture() {
            self.halfmove_clock = 0
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1)
        }
        if mover.is_black() {
            self.fullmove_number = self.fullmove_number.saturating_add(1)
        }
        self.side_to_move = !mover;
    }

    /// Returns the position reached by playing a generated legal action.
    pub fn play(&self, action: Action) -> Self {
        let mut next = self.clone();
        next.apply(action);
        next
    }

    /// Checks a requested move against the legal moves of the position and
    /// returns the resulting position.
    /// # Errors
    /// The error names why the move was refused. The position is left untouched
    /// either way.
    /// # Example
    /// ```
    /// # use chesslink::game::{position::Position, action::PcnMove, square::Square};
    /// let position = Position::initial();
    /// let next = position.make(PcnMove::new(Square::E2, Square::E4)).unwrap();
    /// assert_eq!(
    ///     next.to_fen_string(),
    ///     "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    /// );
    /// ```
    pub fn make(&self, mv: PcnMove) -> Result<Self, IllegalMoveError> {
        let PcnMove {
            from,
            to,
            promoting_to,
        } = mv;
        match self.piece_on(from) {
            None => return Err(IllegalMoveError::EmptyOrigin(from)),
            Some((_, colour)) if colour != self.side_to_move => {
                return Err(IllegalMoveError::OpponentPiece(from))
            }
            _ => {}
        }
        if let Some(kind) = promoting_to.filter(|kind| !kind.is_promotion_target()) {
            return Err(IllegalMoveError::InvalidPromotion(kind));
        }

        let candidates = self
            .pseudo_legal_actions_from(from)
            .into_iter()
            .filter(|action| action.target() == to)
            .collect::<PieceActions>();
        let action = match (candidates.first(), promoting_to) {
            (None, _) => return Err(IllegalMoveError::Unreachable { from, to }),
            (Some(action), None) if action.promotion_target().is_some() => {
                return Err(IllegalMoveError::MissingPromotion { from, to })
            }
            (Some(action), Some(_)) if action.promotion_target().is_none() => {
                return Err(IllegalMoveError::UnexpectedPromotion { from, to })
            }
            (Some(&action), None) => action,
            (Some(_), Some(kind)) => candidates
                .iter()
                .copied()
                .find(|action| action.promotion_target() == Some(kind))
                .ok_or(IllegalMoveError::InvalidPromotion(kind))?,
        };

        if self.is_legal(action) {
            Ok(self.play(action))
        } else {
            Err(IllegalMoveError::LeavesKingInCheck { from, to })
        }
    }
}
impl std::str::FromStr for Position {
    type Err = FenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(&s.parse()?)
    }
}
impl TryFrom<&Fen> for Position {
    type Error = FenParseError;

    fn try_from(fen: &Fen) -> Result<Self, Self::Error> {
        Self::from_fen(fen)
    }
}
impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{} ", rank)?;
            for square in Square::rank_squares_iter(rank) {
                write!(
                    f,
                    "{} ",
                    match self.piece_on(square) {
                        None => '.',
                        Some((kind, colour)) => kind.fen_char(colour),
                    }
                )?
            }
            match rank {
                Rank::Eight => writeln!(f, "  {} to move", self.side_to_move),
                Rank::Seven => writeln!(f, "  castling rights: {}", self.castling_rights),
                Rank::Six => writeln!(
                    f,
                    "  en passant: {}",
                    self.en_passant
                        .map(|square| square.to_string())
                        .unwrap_or_else(|| "-".to_string())
                ),
                Rank::Five => writeln!(f, "  halfmove clock: {}", self.halfmove_clock),
                Rank::Four => writeln!(f, "  move: {}", self.fullmove_number),
                _ => writeln!(f),
            }?
        }
        write!(f, "  a b c d e f g h")
    }
}
impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::fen::START_FEN;

    fn load(fen: &str) -> Position {
        fen.parse().unwrap()
    }

    fn pcn(s: &str) -> PcnMove {
        s.parse().unwrap()
    }

    fn play_all(moves: &[&str]) -> Position {
        moves.iter().fold(Position::initial(), |position, mv| {
            position.make(pcn(mv)).unwrap()
        })
    }

    #[test]
    fn initial_position_matches_its_fen() {
        assert_eq!(Position::initial(), load(START_FEN));
        assert_eq!(Position::initial().to_fen_string(), START_FEN);
    }

    #[test]
    fn twenty_moves_from_the_start() {
        let position = Position::initial();
        let actions = position.actions();
        assert_eq!(actions.len(), 20);
        let pawn_moves = actions
            .iter()
            .filter(|action| position.piece_on(action.origin()).map(|(kind, _)| kind) == Some(PieceKind::Pawn))
            .count();
        assert_eq!(pawn_moves, 16);
        assert_eq!(
            position.legal_destinations(Square::G1),
            Square::F3.bitboard() | Square::H3.bitboard()
        );
        assert!(position.legal_destinations(Square::E1).is_empty());
        assert!(position.legal_destinations(Square::E7).is_empty());
        assert!(position.legal_destinations(Square::E4).is_empty());
    }

    #[test]
    fn four_promotions_to_the_same_square() {
        let position = load("7k/P7/8/8/8/8/8/K7 w - - 0 1");
        let promotions = position.actions_from(Square::A7);
        assert_eq!(promotions.len(), 4);
        for kind in PieceKind::PROMOTIONS {
            assert!(promotions
                .iter()
                .any(|action| action.target() == Square::A8 && action.promotion_target() == Some(kind)));
        }
        assert_eq!(position.legal_destinations(Square::A7), Square::A8.bitboard());

        let knight = position
            .make(PcnMove::promoting(Square::A7, Square::A8, PieceKind::Knight))
            .unwrap();
        assert_eq!(knight.piece_on(Square::A8), Some((PieceKind::Knight, Colour::White)));
        assert_eq!(knight.piece_on(Square::A7), None);
        assert_eq!(
            position.make(pcn("a7a8")),
            Err(IllegalMoveError::MissingPromotion {
                from: Square::A7,
                to: Square::A8
            })
        );
        assert_eq!(
            position.make(PcnMove::promoting(Square::A7, Square::A8, PieceKind::King)),
            Err(IllegalMoveError::InvalidPromotion(PieceKind::King))
        );
        assert_eq!(
            position.make(pcn("a1a2q")),
            Err(IllegalMoveError::UnexpectedPromotion {
                from: Square::A1,
                to: Square::A2
            })
        );
    }

    #[test]
    fn en_passant_window() {
        let before = play_all(&["e2e4", "a7a6", "e4e5", "d7d5"]);
        assert_eq!(before.en_passant(), Some(Square::D6));
        assert!(before.legal_destinations(Square::E5).is_set(Square::D6));

        let taken = before.make(pcn("e5d6")).unwrap();
        assert_eq!(taken.piece_on(Square::D5), None);
        assert_eq!(taken.piece_on(Square::D6), Some((PieceKind::Pawn, Colour::White)));
        assert_eq!(taken.halfmove_clock(), 0);

        let waited = before.make(pcn("g1f3")).unwrap().make(pcn("a6a5")).unwrap();
        assert_eq!(waited.en_passant(), None);
        assert!(!waited.legal_destinations(Square::E5).is_set(Square::D6));
        assert_eq!(
            waited.make(pcn("e5d6")),
            Err(IllegalMoveError::Unreachable {
                from: Square::E5,
                to: Square::D6
            })
        );
    }

    #[test]
    fn en_passant_exposing_the_king_is_refused() {
        let position = load("8/8/8/K2pP2r/8/8/8/7k w - d6 0 1");
        assert!(!position.legal_destinations(Square::E5).is_set(Square::D6));
        assert_eq!(
            position.make(pcn("e5d6")),
            Err(IllegalMoveError::LeavesKingInCheck {
                from: Square::E5,
                to: Square::D6
            })
        );
    }

    #[test]
    fn pinned_piece_stays_on_its_line() {
        let position = load("4r2k/8/8/8/8/8/4B3/4K3 w - - 0 1");
        assert!(position.legal_destinations(Square::E2).is_empty());
        assert_eq!(
            position.make(pcn("e2d3")),
            Err(IllegalMoveError::LeavesKingInCheck {
                from: Square::E2,
                to: Square::D3
            })
        );

        let rook_pin = load("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
        assert_eq!(
            rook_pin.legal_destinations(Square::E2),
            [Square::E3, Square::E4, Square::E5, Square::E6, Square::E7, Square::E8]
                .into_iter()
                .collect()
        );
    }

    #[test]
    fn castling_rules() {
        let open = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let king_targets = open.legal_destinations(Square::E1);
        assert!(king_targets.is_set(Square::G1));
        assert!(king_targets.is_set(Square::C1));

        let castled = open.make(pcn("e1g1")).unwrap();
        assert_eq!(castled.piece_on(Square::G1), Some((PieceKind::King, Colour::White)));
        assert_eq!(castled.piece_on(Square::F1), Some((PieceKind::Rook, Colour::White)));
        assert_eq!(castled.piece_on(Square::H1), None);
        assert_eq!(castled.castling_rights().to_string(), "kq");
        assert_eq!(castled.halfmove_clock(), 1);

        let long = open.make(pcn("e1c1")).unwrap();
        assert_eq!(long.piece_on(Square::D1), Some((PieceKind::Rook, Colour::White)));

        // f1 is covered by the rook on f8.
        let through_check = load("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1");
        assert!(!through_check.legal_destinations(Square::E1).is_set(Square::G1));
        assert!(through_check.legal_destinations(Square::E1).is_set(Square::C1));
        assert!(through_check.make(pcn("e1g1")).is_err());

        let in_check = load("r3k2r/8/8/8/8/8/4r3/R3K2R w KQkq - 0 1");
        assert!(!in_check.legal_destinations(Square::E1).is_set(Square::G1));
        assert!(!in_check.legal_destinations(Square::E1).is_set(Square::C1));

        // b1 may be attacked, it is only crossed by the rook.
        let b_file = load("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1");
        assert!(b_file.legal_destinations(Square::E1).is_set(Square::C1));

        let blocked = load("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1");
        assert!(!blocked.legal_destinations(Square::E1).is_set(Square::G1));
        assert!(!blocked.legal_destinations(Square::E1).is_set(Square::C1));

        let no_rights = load("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1");
        assert!(!no_rights.legal_destinations(Square::E1).is_set(Square::G1));
    }

    #[test]
    fn rights_are_lost_when_pieces_move_or_are_captured() {
        let rook_moved = play_all(&["a2a4", "h7h5", "a1a3"]);
        assert_eq!(rook_moved.castling_rights().to_string(), "Kkq");

        let position = load("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let rook_taken = position.make(pcn("a1a8")).unwrap();
        assert_eq!(rook_taken.castling_rights().to_string(), "Kk");
    }

    #[test]
    fn clocks_and_counters() {
        let position = play_all(&["g1f3", "g8f6", "f3g1"]);
        assert_eq!(position.halfmove_clock(), 3);
        assert_eq!(position.fullmove_number(), 2);
        let position = position.make(pcn("e7e5")).unwrap();
        assert_eq!(position.halfmove_clock(), 0);
        assert_eq!(position.fullmove_number(), 3);
        assert_eq!(position.en_passant(), Some(Square::E6));
    }

    #[test]
    fn refused_moves_name_the_reason() {
        let position = Position::initial();
        assert_eq!(
            position.make(pcn("e4e5")),
            Err(IllegalMoveError::EmptyOrigin(Square::E4))
        );
        assert_eq!(
            position.make(pcn("e7e5")),
            Err(IllegalMoveError::OpponentPiece(Square::E7))
        );
        assert_eq!(
            position.make(pcn("a1a3")),
            Err(IllegalMoveError::Unreachable {
                from: Square::A1,
                to: Square::A3
            })
        );
        assert_eq!(
            position.make(pcn("e2e5")),
            Err(IllegalMoveError::Unreachable {
                from: Square::E2,
                to: Square::E5
            })
        );
    }

    #[test]
    fn in_check_positions_restrict_moves() {
        let position = play_all(&["e2e4", "d7d5", "f1b5"]);
        assert!(position.in_check());
        let actions = position.actions();
        assert!(!actions.is_empty());
        assert!(!position.legal_destinations(Square::E8).is_set(Square::D7));
        for action in &actions {
            assert!(!position.play(*action).is_in_check(Colour::Black));
        }
    }

    #[test]
    fn semantic_fen_errors() {
        assert_eq!(
            "8/8/8/8/8/8/8/7k w - - 0 1".parse::<Position>(),
            Err(FenParseError::KingCount {
                colour: Colour::White,
                count: 0
            })
        );
        assert_eq!(
            "KK6/8/8/8/8/8/8/7k w - - 0 1".parse::<Position>(),
            Err(FenParseError::KingCount {
                colour: Colour::White,
                count: 2
            })
        );
        assert_eq!(
            "P3k3/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(FenParseError::PawnOnBackRank(Square::A8))
        );
        assert_eq!(
            "qqqqkqqq/qqqqqqqq/qq6/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(FenParseError::TooManyPieces {
                colour: Colour::Black,
                count: 18
            })
        );
        assert_eq!(
            "4k2R/8/8/8/8/8/8/4K3 b - - 0 1".parse::<Position>().map(|p| p.in_check()),
            Ok(true)
        );
        assert_eq!(
            "4k2R/8/8/8/8/8/8/4K3 w - - 0 1".parse::<Position>(),
            Err(FenParseError::OpponentInCheck(Colour::Black))
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4R2K w - - 0 1".parse::<Position>(),
            Err(FenParseError::OpponentInCheck(Colour::Black))
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e6 0 1".parse::<Position>(),
            Err(FenParseError::EnPassantTarget(Square::E6))
        );
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq e3 0 1".parse::<Position>(),
            Err(FenParseError::EnPassantTarget(Square::E3))
        );
        assert!("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
            .parse::<Position>()
            .is_ok());
        assert_eq!(
            "not-a-fen".parse::<Position>(),
            Err(FenParseError::FieldCount(1))
        );
    }

    #[test]
    fn fen_round_trip_after_play() {
        let position = play_all(&["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7", "e1g1"]);
        let fen = position.to_fen_string();
        assert_eq!(
            fen,
            "rn1qkbnr/pp1bpppp/3p4/1Bp5/4P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 3 4"
        );
        assert_eq!(fen.parse::<Position>(), Ok(position));
    }

    #[test]
    fn overlapping_pieces_are_reported() {
        use crate::game::status::InvariantViolation;

        let mut position = Position::initial();
        position.color_bitboards[Colour::Black as usize] |= Square::E2.bitboard();
        assert_eq!(
            position.try_status(),
            Err(InvariantViolation::OverlappingPieces(Square::E2))
        );

        let mut position = Position::initial();
        position.piece_bitboards[PieceKind::Knight as usize] |= Square::C7.bitboard();
        assert_eq!(
            position.try_status(),
            Err(InvariantViolation::OverlappingPieces(Square::C7))
        );
    }
}
