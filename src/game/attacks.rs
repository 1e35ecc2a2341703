//! # Attack tables
//! Leaper attacks (knights, kings and pawns) are precomputed at compile time for
//! every square. Sliding pieces walk their rays against the board occupancy and
//! stop at the first occupied square, which is included as a potential capture.

use super::{
    bitboard::Bitboard,
    colour::Colour,
    square::{Delta, Square},
};

const fn leaper_table(deltas: &[Delta]) -> [Bitboard; 64] {
    let mut table = [Bitboard::empty(); 64];
    let mut index = 0;
    while index < 64 {
        let origin = Square::ALL[index];
        let mut attacks = 0u64;
        let mut i = 0;
        while i < deltas.len() {
            if let Some(target) = origin.translate(deltas[i]) {
                attacks |= 1u64 << target as u8;
            }
            i += 1;
        }
        table[index] = Bitboard(attacks);
        index += 1;
    }
    table
}

static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&Delta::KNIGHT_DELTAS);
static KING_ATTACKS: [Bitboard; 64] = leaper_table(&Delta::QUEEN_DELTAS);
static WHITE_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[Delta::NorthEast, Delta::NorthWest]);
static BLACK_PAWN_ATTACKS: [Bitboard; 64] = leaper_table(&[Delta::SouthEast, Delta::SouthWest]);

/// Squares attacked by a knight standing on the given square.
#[inline]
pub fn knight_attacks(square: Square) -> Bitboard {
    KNIGHT_ATTACKS[square as usize]
}

/// Squares attacked by a king standing on the given square.
#[inline]
pub fn king_attacks(square: Square) -> Bitboard {
    KING_ATTACKS[square as usize]
}

/// Squares attacked by a pawn of the given colour standing on the given square.
///
/// Pawns only ever attack diagonally forward.
#[inline]
pub fn pawn_attacks(square: Square, colour: Colour) -> Bitboard {
    match colour {
        Colour::White => WHITE_PAWN_ATTACKS[square as usize],
        Colour::Black => BLACK_PAWN_ATTACKS[square as usize],
    }
}

/// Walks each ray from the origin until it leaves the board or hits an occupied
/// square.
fn ray_attacks(square: Square, occupancy: Bitboard, deltas: &[Delta]) -> Bitboard {
    let mut attacks = Bitboard::empty();
    for &delta in deltas {
        let mut current = square;
        while let Some(next) = current.translate(delta) {
            attacks |= next.bitboard();
            if occupancy.is_set(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Squares attacked by a bishop on the given square, given the board occupancy.
#[inline]
pub fn bishop_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(square, occupancy, &Delta::DIAGONAL_DELTAS)
}

/// Squares attacked by a rook on the given square, given the board occupancy.
#[inline]
pub fn rook_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    ray_attacks(square, occupancy, &Delta::ORTHOGONAL_DELTAS)
}

/// Squares attacked by a queen on the given square, given the board occupancy.
#[inline]
pub fn queen_attacks(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks(square, occupancy) | rook_attacks(square, occupancy)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn leaper_counts() {
        assert_eq!(knight_attacks(Square::A1).cardinality(), 2);
        assert_eq!(knight_attacks(Square::E4).cardinality(), 8);
        assert_eq!(king_attacks(Square::H8).cardinality(), 3);
        assert_eq!(king_attacks(Square::D5).cardinality(), 8);
    }

    #[test]
    fn pawns_attack_diagonally_forward() {
        assert_eq!(
            pawn_attacks(Square::E4, Colour::White),
            Square::D5.bitboard() | Square::F5.bitboard()
        );
        assert_eq!(
            pawn_attacks(Square::A5, Colour::Black),
            Square::B4.bitboard()
        );
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let occupancy = Square::D6.bitboard() | Square::F4.bitboard();
        let attacks = rook_attacks(Square::D4, occupancy);
        assert!(attacks.is_set(Square::D6));
        assert!(!attacks.is_set(Square::D7));
        assert!(attacks.is_set(Square::F4));
        assert!(!attacks.is_set(Square::G4));
        assert!(attacks.is_set(Square::A4));
        assert!(attacks.is_set(Square::D1));
        assert_eq!(attacks.cardinality(), 2 + 2 + 3 + 3);

        assert_eq!(bishop_attacks(Square::A1, Bitboard::empty()).cardinality(), 7);
        assert_eq!(queen_attacks(Square::D4, Bitboard::empty()).cardinality(), 27);
    }
}
