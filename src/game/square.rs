//! Enumerations of chessboard accessing constants, such as files, ranks and squares.

use thiserror::Error;

use crate::parsing::PartialFromStr;

use super::bitboard::Bitboard;

/// Files of a chessboard (A-H).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum File {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}
impl File {
    /// All files, from A to H.
    pub const ALL: [Self; 8] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
    ];

    /// A file from a given index.
    ///
    /// Fails if the index is more than 7.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Iterator over all files, from A to H.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// The lowercase letter of this file.
    pub const fn symbol(self) -> char {
        (b'a' + self as u8) as char
    }
}
impl std::fmt::Display for File {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Ranks of a chessboard (1-8).
#[repr(u8)]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Rank {
    One,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
}
impl Rank {
    /// All ranks, from 1 to 8.
    pub const ALL: [Self; 8] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
    ];

    /// Iterator over all ranks, from 1 to 8.
    pub fn iter() -> impl DoubleEndedIterator<Item = Self> {
        Self::ALL.into_iter()
    }
}
impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", 1 + *self as u8)
    }
}

/// General square indexing for 8x8 boards, A1 being 0 and H8 being 63.
#[repr(u8)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}
impl Square {
    /// All squares, ordered from A1 to H8.
    #[rustfmt::skip]
    pub const ALL: [Self; 64] = {
        use Square::*;
        [
            A1, B1, C1, D1, E1, F1, G1, H1,
            A2, B2, C2, D2, E2, F2, G2, H2,
            A3, B3, C3, D3, E3, F3, G3, H3,
            A4, B4, C4, D4, E4, F4, G4, H4,
            A5, B5, C5, D5, E5, F5, G5, H5,
            A6, B6, C6, D6, E6, F6, G6, H6,
            A7, B7, C7, D7, E7, F7, G7, H7,
            A8, B8, C8, D8, E8, F8, G8, H8,
        ]
    };

    /// Instantiates a new square based on file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self::ALL[((rank as usize) << 3) | file as usize]
    }

    /// Instantitates a new square from its index.
    ///
    /// Returns `None` if the index is more than 63.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Returns the rank of the square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self as usize) >> 3]
    }
    /// Returns the file of the square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self as usize) & 7]
    }

    /// Checks if the square is a light square (h1 is light, a1 is dark).
    #[inline]
    pub const fn is_light(self) -> bool {
        (self.rank() as u8 + self.file() as u8) % 2 == 1
    }

    /// Number of files separating two squares.
    #[inline]
    pub const fn file_distance(self, other: Self) -> u8 {
        (self.file() as u8).abs_diff(other.file() as u8)
    }

    /// Number of ranks separating two squares.
    #[inline]
    pub const fn rank_distance(self, other: Self) -> u8 {
        (self.rank() as u8).abs_diff(other.rank() as u8)
    }

    /// Number of king moves needed to go from one square to the other.
    /// # Example
    /// ```
    /// # use chesslink::game::square::*;
    /// assert_eq!(Square::A1.distance(Square::H8), 7);
    /// assert_eq!(Square::E4.distance(Square::F6), 2);
    /// ```
    #[inline]
    pub const fn distance(self, other: Self) -> u8 {
        let files = self.file_distance(other);
        let ranks = self.rank_distance(other);
        if files > ranks {
            files
        } else {
            ranks
        }
    }

    /// Number of rook steps of one square needed to go from one square to the other.
    #[inline]
    pub const fn manhattan_distance(self, other: Self) -> u8 {
        self.file_distance(other) + self.rank_distance(other)
    }

    /// Translates this square by a given delta.
    ///
    /// Returns `None` if the translation would go out of the board.
    #[inline]
    pub const fn translate(self, delta: Delta) -> Option<Self> {
        let (file_step, rank_step) = delta.steps();
        let file = self.file() as i8 + file_step;
        let rank = self.rank() as i8 + rank_step;
        if 0 <= file && file < 8 && 0 <= rank && rank < 8 {
            Some(Self::ALL[(rank as usize) << 3 | file as usize])
        } else {
            None
        }
    }

    /// An iterator over all squares, ordered from A1 to H8.
    pub fn iter() -> impl Iterator<Item = Self> {
        Self::ALL.into_iter()
    }

    /// An iterator over the squares of a rank, from the A file to the H file.
    pub fn rank_squares_iter(rank: Rank) -> impl Iterator<Item = Self> {
        File::iter().map(move |file| Square::new(file, rank))
    }

    /// Returns a bitboard containing only this square.
    #[inline]
    pub const fn bitboard(self) -> Bitboard {
        Bitboard(1 << (self as u8))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

/// Errors that may arise when parsing a square from its algebraic name.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SquareParseError {
    #[error("Empty input")]
    EmptyInput,
    #[error("{0:?} is not a file (expected a-h)")]
    InvalidFile(char),
    #[error("Missing rank after the file")]
    MissingRank,
    #[error("{0:?} is not a rank (expected 1-8)")]
    InvalidRank(char),
    #[error("A square is exactly two characters long")]
    InputTooLong,
}

impl PartialFromStr for Square {
    type Err = SquareParseError;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err> {
        let mut chars = s.chars();
        let file = match chars.next().ok_or(SquareParseError::EmptyInput)? {
            c @ 'a'..='h' => File::ALL[(c as u8 - b'a') as usize],
            c => return Err(SquareParseError::InvalidFile(c)),
        };
        let rank = match chars.next().ok_or(SquareParseError::MissingRank)? {
            c @ '1'..='8' => Rank::ALL[(c as u8 - b'1') as usize],
            c => return Err(SquareParseError::InvalidRank(c)),
        };
        Ok((Square::new(file, rank), chars.as_str()))
    }
}
impl std::str::FromStr for Square {
    type Err = SquareParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::partial_from_str(s).and_then(|(square, rest)| {
            if rest.is_empty() {
                Ok(square)
            } else {
                Err(SquareParseError::InputTooLong)
            }
        })
    }
}

/// Deltas represent directions in which pieces can move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum Delta {
    North,
    South,
    East,
    West,

    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,

    KnightNorthEast,
    KnightNorthWest,
    KnightSouthEast,
    KnightSouthWest,
    KnightEastNorth,
    KnightWestNorth,
    KnightEastSouth,
    KnightWestSouth,
}
impl Delta {
    pub const KNIGHT_DELTAS: [Self; 8] = [
        Self::KnightNorthEast,
        Self::KnightNorthWest,
        Self::KnightSouthEast,
        Self::KnightSouthWest,
        Self::KnightEastNorth,
        Self::KnightWestNorth,
        Self::KnightEastSouth,
        Self::KnightWestSouth,
    ];
    pub const DIAGONAL_DELTAS: [Self; 4] = [
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];
    pub const ORTHOGONAL_DELTAS: [Self; 4] = [Self::North, Self::South, Self::East, Self::West];
    pub const QUEEN_DELTAS: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// The (file, rank) steps taken when following this delta.
    #[inline]
    pub const fn steps(self) -> (i8, i8) {
        match self {
            Self::North => (0, 1),
            Self::South => (0, -1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, 1),
            Self::NorthWest => (-1, 1),
            Self::SouthEast => (1, -1),
            Self::SouthWest => (-1, -1),
            Self::KnightNorthEast => (1, 2),
            Self::KnightNorthWest => (-1, 2),
            Self::KnightSouthEast => (1, -2),
            Self::KnightSouthWest => (-1, -2),
            Self::KnightEastNorth => (2, 1),
            Self::KnightWestNorth => (-2, 1),
            Self::KnightEastSouth => (2, -1),
            Self::KnightWestSouth => (-2, -1),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn algebraic_names_round_trip() {
        for square in Square::iter() {
            assert_eq!(square.to_string().parse(), Ok(square));
        }
        assert_eq!("a1".parse(), Ok(Square::A1));
        assert_eq!("h8".parse(), Ok(Square::H8));
        assert_eq!("e4".parse(), Ok(Square::E4));
    }

    #[test]
    fn out_of_range_squares_are_rejected() {
        assert_eq!("i1".parse::<Square>(), Err(SquareParseError::InvalidFile('i')));
        assert_eq!("a9".parse::<Square>(), Err(SquareParseError::InvalidRank('9')));
        assert_eq!("a0".parse::<Square>(), Err(SquareParseError::InvalidRank('0')));
        assert_eq!("".parse::<Square>(), Err(SquareParseError::EmptyInput));
        assert_eq!("e".parse::<Square>(), Err(SquareParseError::MissingRank));
        assert_eq!("e44".parse::<Square>(), Err(SquareParseError::InputTooLong));
        assert_eq!("E4".parse::<Square>(), Err(SquareParseError::InvalidFile('E')));
    }

    #[test]
    fn file_and_rank_decomposition() {
        assert_eq!(Square::G6.file(), File::G);
        assert_eq!(Square::G6.rank(), Rank::Six);
        assert_eq!(Square::new(File::C, Rank::Two), Square::C2);
        assert_eq!(Square::from_index(64), None);
    }

    #[test]
    fn translations_stay_on_board() {
        assert_eq!(Square::H4.translate(Delta::East), None);
        assert_eq!(Square::A4.translate(Delta::West), None);
        assert_eq!(Square::B1.translate(Delta::KnightSouthEast), None);
        assert_eq!(Square::B1.translate(Delta::KnightNorthEast), Some(Square::C3));
        assert_eq!(Square::E4.translate(Delta::NorthWest), Some(Square::D5));
    }

    #[test]
    fn distances() {
        assert_eq!(Square::B2.file_distance(Square::G3), 5);
        assert_eq!(Square::B2.rank_distance(Square::G3), 1);
        assert_eq!(Square::B2.distance(Square::G3), 5);
        assert_eq!(Square::B2.manhattan_distance(Square::G3), 6);
        assert_eq!(Square::D4.manhattan_distance(Square::D4), 0);
    }

    #[test]
    fn square_colours() {
        assert!(!Square::A1.is_light());
        assert!(Square::H1.is_light());
        assert!(Square::D1.is_light());
        assert!(!Square::E1.is_light());
    }
}
