//! # Random playouts
//! Plays uniformly random legal moves from a position until the game ends or a
//! ply limit is reached. Seeded playouts are reproducible, which makes them a
//! convenient source of positions reachable by legal play.

use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{action::Action, position::Position, status::GameStatus};

/// A game of random legal moves, ending once the position is checkmate or a draw.
///
/// Each item is the move played and the position it leads to.
pub struct RandomGame<R> {
    position: Position,
    rng: R,
}
impl<R: Rng> RandomGame<R> {
    /// Starts a random game from the given position.
    pub fn new(position: Position, rng: R) -> Self {
        Self { position, rng }
    }

    /// The position reached so far.
    pub fn position(&self) -> &Position {
        &self.position
    }
}
impl<R: Rng> Iterator for RandomGame<R> {
    type Item = (Action, Position);

    fn next(&mut self) -> Option<Self::Item> {
        let actions = self.position.actions();
        if actions.is_empty() || self.position.status().is_over() {
            return None;
        }
        let action = actions[self.rng.gen_range(0..actions.len())];
        self.position = self.position.play(action);
        Some((action, self.position.clone()))
    }
}

/// Outcome of a random playout.
#[derive(Clone, Debug)]
pub struct Playout {
    pub moves: Vec<Action>,
    pub position: Position,
    pub status: GameStatus,
}

/// Plays at most `max_plies` random legal moves from `start`, seeding the
/// move choice with `seed`.
pub fn random_playout(start: &Position, seed: u64, max_plies: usize) -> Playout {
    let mut game = RandomGame::new(start.clone(), SmallRng::seed_from_u64(seed));
    let moves = game.by_ref().take(max_plies).map(|(action, _)| action).collect();
    let position = game.position().clone();
    let status = position.status();
    Playout {
        moves,
        position,
        status,
    }
}
