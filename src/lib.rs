//! # Chesslink
//! A chess position engine for games played without a server: the whole game
//! state travels as a FEN string inside a shared link, and each player's session
//! validates the position and computes the legal replies on its own.
//!
//! The [`game`] module holds the engine itself. [`link`] turns positions into
//! shareable URLs and back, and [`session`] keeps track of the game a player is
//! currently looking at.

pub mod game;
pub mod link;
pub mod parsing;
pub mod session;
