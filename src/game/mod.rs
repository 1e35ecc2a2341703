//! # Chess API
//! This module contains everything Chess related: the board state, move
//! generation, game status and the FEN transfer format.

pub mod action;
mod attacks;
pub mod bitboard;
pub mod castling_rights;
pub mod colour;
pub mod fen;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod playout;
pub mod position;
pub mod square;
pub mod status;
