//! # FEN string utilities
//! The transfer string of a position is a FEN record: six space-separated fields
//! holding the board, the side to move, castling rights, the en passant target
//! square, the halfmove clock and the fullmove number.
//!
//! Parsing a [`Fen`] only checks the syntax of each field. Checks involving the
//! whole position (king count, en passant target, checks) happen when a
//! [`Position`](super::position::Position) is built from it.

use thiserror::Error;

use super::{
    castling_rights::{CastlingRights, CastlingRightsParseError},
    colour::{Colour, ColourParseError},
    piece::{Piece, PieceKind},
    square::{File, Rank, Square, SquareParseError},
};

/// FEN string of the starting position.
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// FEN parsing errors, naming the rule the input breaks.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum FenParseError {
    #[error("Expected 6 space-separated fields, found {0}")]
    FieldCount(usize),
    #[error("Expected 8 ranks separated by '/', found {0}")]
    RankCount(usize),
    #[error("{0:?} is neither a piece letter nor an empty square count")]
    InvalidPiece(char),
    #[error("Rank {rank} describes {squares} squares instead of 8")]
    RankLength { rank: Rank, squares: u8 },
    #[error("Rank {0} has two consecutive empty square counts")]
    ConsecutiveDigits(Rank),
    #[error(transparent)]
    SideToMove(#[from] ColourParseError),
    #[error(transparent)]
    Castling(#[from] CastlingRightsParseError),
    #[error("Invalid en passant square: {0}")]
    EnPassantSquare(SquareParseError),
    #[error("En passant target {0} does not follow a double pawn push")]
    EnPassantTarget(Square),
    #[error("Halfmove clock should be a non-negative integer, found {0:?}")]
    HalfmoveClock(String),
    #[error("Fullmove number should be a positive integer, found {0:?}")]
    FullmoveNumber(String),
    #[error("Expected exactly one {colour} king, found {count}")]
    KingCount { colour: Colour, count: u8 },
    #[error("Pawn on the back rank at {0}")]
    PawnOnBackRank(Square),
    #[error("{colour} has {count} pieces, at most 16 are allowed")]
    TooManyPieces { colour: Colour, count: u8 },
    #[error("The side not to move ({0}) is in check")]
    OpponentInCheck(Colour),
}

/// A syntactically valid FEN record.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Fen {
    pub board: [Option<Piece>; 64],
    pub side_to_move: Colour,
    pub castling_rights: CastlingRights,
    pub en_passant: Option<Square>,
    pub halfmove_clock: u32,
    pub fullmove_number: u32,
}
impl Fen {
    /// Parses a FEN string.
    pub fn parse(fen: &str) -> Result<Self, FenParseError> {
        fen.parse()
    }

    /// Returns the piece kind and colour on a given square if any.
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.board[square as usize]
    }
}

fn parse_rank(
    rank: Rank,
    field: &str,
    board: &mut [Option<Piece>; 64],
) -> Result<(), FenParseError> {
    let mut file = 0u8;
    let mut previous_was_digit = false;
    for c in field.chars() {
        match c {
            '1'..='8' => {
                if previous_was_digit {
                    return Err(FenParseError::ConsecutiveDigits(rank));
                }
                previous_was_digit = true;
                file += c as u8 - b'0';
            }
            _ => {
                previous_was_digit = false;
                let piece =
                    PieceKind::from_fen_char(c).map_err(|_| FenParseError::InvalidPiece(c))?;
                if let Some(file) = File::from_index(file) {
                    board[Square::new(file, rank) as usize] = Some(piece);
                }
                file += 1;
            }
        }
        if file > 8 {
            break;
        }
    }
    if file != 8 {
        return Err(FenParseError::RankLength {
            rank,
            squares: file,
        });
    }
    Ok(())
}

/// Reads a move counter: ASCII digits only, no sign.
fn parse_counter(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

impl std::str::FromStr for Fen {
    type Err = FenParseError;

    fn from_str(fen_str: &str) -> Result<Self, Self::Err> {
        // Fields are separated by exactly one space.
        let fields = fen_str.split(' ').collect::<Vec<_>>();
        let &[pieces, side, castling, en_passant, halfmove, fullmove] = fields.as_slice() else {
            return Err(FenParseError::FieldCount(fields.len()));
        };

        let ranks = pieces.split('/').collect::<Vec<_>>();
        if ranks.len() != 8 {
            return Err(FenParseError::RankCount(ranks.len()));
        }
        let mut board = [None; 64];
        for (rank, field) in Rank::iter().rev().zip(ranks) {
            parse_rank(rank, field, &mut board)?;
        }

        let side_to_move = side.parse()?;
        let castling_rights = castling.parse()?;
        let en_passant = match en_passant {
            "-" => None,
            s => Some(s.parse().map_err(FenParseError::EnPassantSquare)?),
        };

        let halfmove_clock = parse_counter(halfmove)
            .ok_or_else(|| FenParseError::HalfmoveClock(halfmove.to_string()))?;
        let fullmove_number = parse_counter(fullmove)
            .filter(|&n| n > 0)
            .ok_or_else(|| FenParseError::FullmoveNumber(fullmove.to_string()))?;

        Ok(Self {
            board,
            side_to_move,
            castling_rights,
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }
}
impl std::fmt::Display for Fen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::iter().rev() {
            let mut skip = 0;
            for square in Square::rank_squares_iter(rank) {
                match self.piece_on(square) {
                    Some((kind, colour)) => {
                        if skip != 0 {
                            write!(f, "{skip}")?;
                            skip = 0
                        }
                        write!(f, "{}", kind.fen_char(colour))?
                    }
                    None => skip += 1,
                }
            }
            if skip != 0 {
                write!(f, "{skip}")?
            }
            if rank != Rank::One {
                write!(f, "/")?
            }
        }

        write!(
            f,
            " {} {} {} {} {}",
            if self.side_to_move.is_black() {
                'b'
            } else {
                'w'
            },
            self.castling_rights,
            if let Some(ep) = self.en_passant {
                ep.to_string()
            } else {
                String::from("-")
            },
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn start_position_fields() {
        let fen: Fen = START_FEN.parse().unwrap();
        assert_eq!(fen.piece_on(Square::E1), Some((PieceKind::King, Colour::White)));
        assert_eq!(fen.piece_on(Square::D8), Some((PieceKind::Queen, Colour::Black)));
        assert_eq!(fen.piece_on(Square::E4), None);
        assert_eq!(fen.side_to_move, Colour::White);
        assert_eq!(fen.castling_rights, CastlingRights::full());
        assert_eq!(fen.en_passant, None);
        assert_eq!(fen.halfmove_clock, 0);
        assert_eq!(fen.fullmove_number, 1);
        assert_eq!(fen.to_string(), START_FEN);
    }

    #[test]
    fn formatting_is_stable() {
        for fen in [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
            "8/8/8/8/8/8/8/K6k b - - 99 150",
        ] {
            assert_eq!(Fen::parse(fen).unwrap().to_string(), fen);
        }
    }

    #[test]
    fn classified_errors() {
        assert_eq!(Fen::parse("not-a-fen"), Err(FenParseError::FieldCount(1)));
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
            Err(FenParseError::FieldCount(4))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenParseError::RankCount(7))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBXKBNR w KQkq - 0 1"),
            Err(FenParseError::InvalidPiece('X'))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenParseError::RankLength {
                rank: Rank::Seven,
                squares: 7
            })
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenParseError::InvalidPiece('9'))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/44/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(FenParseError::ConsecutiveDigits(Rank::Six))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
            Err(FenParseError::SideToMove(ColourParseError("x".to_string())))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQha - 0 1"),
            Err(FenParseError::Castling(
                CastlingRightsParseError::InvalidLetter('h')
            ))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e9 0 1"),
            Err(FenParseError::EnPassantSquare(SquareParseError::InvalidRank(
                '9'
            )))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1"),
            Err(FenParseError::HalfmoveClock("-1".to_string()))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 0"),
            Err(FenParseError::FullmoveNumber("0".to_string()))
        );
        assert_eq!(
            Fen::parse("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 one"),
            Err(FenParseError::FullmoveNumber("one".to_string()))
        );
    }

    #[test]
    fn strict_separators_and_counters() {
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k w - - +5 1"),
            Err(FenParseError::HalfmoveClock("+5".to_string()))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k w - - 5 +1"),
            Err(FenParseError::FullmoveNumber("+1".to_string()))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k w - -  0 1"),
            Err(FenParseError::FieldCount(7))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k w - - 0 1 "),
            Err(FenParseError::FieldCount(7))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k\tw - - 0 1"),
            Err(FenParseError::FieldCount(5))
        );
        assert_eq!(
            Fen::parse("8/8/8/8/8/8/8/K6k w - - 99999999999 1"),
            Err(FenParseError::HalfmoveClock("99999999999".to_string()))
        );
        assert!(Fen::parse("8/8/8/8/8/8/8/K6k w - - 7 42").is_ok());
    }
}
