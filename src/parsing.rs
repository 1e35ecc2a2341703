//! # Parsing
//! Squares, moves and positions are parsable from raw strings using the standard
//! Rust [`FromStr`](std::str::FromStr) trait.
//!
//! Small tokens additionally implement the [`PartialFromStr`] trait, a parser
//! combinator: the `Ok` variant contains the parsed value and the suffix of the
//! input that was not consumed. Parsing "d4rest" as a square returns
//! `Ok((Square::D4, "rest"))`, which is how a move like "e7e8q" is read as two
//! squares followed by an optional promotion letter.

/// Parses a value from the start of a string, returning the unparsed rest.
pub trait PartialFromStr: Sized {
    type Err;

    fn partial_from_str(s: &str) -> Result<(Self, &str), Self::Err>;
}

/// Parses whitespace-separated values until the input is exhausted.
///
/// # Example
/// ```
/// # use chesslink::{parsing::parse_sequence, game::{action::PcnMove, square::Square}};
/// let moves = parse_sequence::<PcnMove>("e2e4  e7e5\tg1f3").unwrap();
/// assert_eq!(moves[2], PcnMove::new(Square::G1, Square::F3));
/// ```
pub fn parse_sequence<T: PartialFromStr>(s: &str) -> Result<Vec<T>, T::Err> {
    let mut values = Vec::new();
    let mut rest = s.trim_start();
    while !rest.is_empty() {
        let (value, tail) = T::partial_from_str(rest)?;
        values.push(value);
        rest = tail.trim_start();
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::game::{
        action::{PcnMove, PcnParseError},
        square::{Square, SquareParseError},
    };

    #[test]
    fn squares_are_read_one_after_the_other() {
        let (first, rest) = Square::partial_from_str("d4d5h2").unwrap();
        let (second, rest) = Square::partial_from_str(rest).unwrap();
        let (third, rest) = Square::partial_from_str(rest).unwrap();
        assert_eq!((first, second, third), (Square::D4, Square::D5, Square::H2));
        assert!(rest.is_empty());
    }

    #[test]
    fn sequences_stop_at_the_first_error() {
        assert_eq!(parse_sequence::<PcnMove>("   "), Ok(vec![]));
        assert_eq!(
            parse_sequence::<PcnMove>("e2e4 e7x5"),
            Err(PcnParseError::InvalidTarget(SquareParseError::InvalidFile(
                'x'
            )))
        );
        // A move must be followed by whitespace or the end of input.
        assert_eq!(
            parse_sequence::<PcnMove>("e2e4e7e5"),
            Err(PcnParseError::InvalidPromotion('e'))
        );
    }
}
