//! # Game session
//! The game a player is currently looking at: the position loaded from a link
//! (or the starting position), the moves the interface may offer and the
//! policy applied on top of the engine rules. Pawns reaching the last rank
//! become queens unless another piece is asked for, and no move is accepted
//! once the game is over.

use thiserror::Error;

use crate::{
    game::{
        action::PcnMove,
        bitboard::Bitboard,
        piece::PieceKind,
        position::{IllegalMoveError, Position},
        square::Square,
        status::GameStatus,
    },
    link,
};

/// Reasons for which a session refuses a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlayError {
    #[error("The game is over ({0})")]
    GameOver(GameStatus),
    #[error(transparent)]
    Illegal(#[from] IllegalMoveError),
}

/// The current game of a player.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Game {
    position: Position,
}
impl Game {
    /// A new game from the starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resumes a game from a position.
    pub fn from_position(position: Position) -> Self {
        Self { position }
    }

    /// Resumes the game carried by a link, or starts a new one if the link
    /// holds no valid position.
    pub fn from_url(url: &str) -> Self {
        Self::from_position(link::position_from_url(url))
    }

    /// The current position.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Status of the current position.
    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    /// Squares the piece on `origin` may move to.
    ///
    /// Empty when the game is over, or when `origin` does not hold a piece of
    /// the side to move.
    pub fn destinations(&self, origin: Square) -> Bitboard {
        if self.status().is_over() {
            return Bitboard::empty();
        }
        self.position.legal_destinations(origin)
    }

    /// Plays a move, promoting to a queen if a pawn reaches the last rank.
    pub fn play(&mut self, origin: Square, target: Square) -> Result<GameStatus, PlayError> {
        let promotes = matches!(
            self.position.piece_on(origin),
            Some((PieceKind::Pawn, colour)) if target.rank() == colour.promotion_rank()
        );
        let mv = if promotes {
            PcnMove::promoting(origin, target, PieceKind::Queen)
        } else {
            PcnMove::new(origin, target)
        };
        self.play_move(mv)
    }

    /// Plays a pawn move to the last rank, promoting to the given kind.
    pub fn play_promoting(
        &mut self,
        origin: Square,
        target: Square,
        kind: PieceKind,
    ) -> Result<GameStatus, PlayError> {
        self.play_move(PcnMove::promoting(origin, target, kind))
    }

    /// Plays a move given in coordinate notation, taken as is.
    ///
    /// On success, returns the status of the new position. The game is left
    /// unchanged when the move is refused.
    pub fn play_move(&mut self, mv: PcnMove) -> Result<GameStatus, PlayError> {
        let status = self.status();
        if status.is_over() {
            return Err(PlayError::GameOver(status));
        }
        self.position = self.position.make(mv).inspect_err(|e| {
            log::debug!("Refused {mv}: {e}");
        })?;
        let status = self.status();
        log::info!("Played {mv}, {status}");
        Ok(status)
    }

    /// Link to share with the opponent, pointing at `base_url`.
    pub fn share_link(&self, base_url: &str) -> String {
        link::share_link(base_url, &self.position)
    }

    /// Throws the current game away and starts a new one.
    pub fn reset(&mut self) {
        self.position = Position::initial()
    }
}
