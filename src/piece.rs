use shakmaty::Role;

/// Piece that played a half-move, read off the notation text alone.
///
/// Castling (`O-O`, `O-O-O`, also the zero-glyph `0-0` form) is a king
/// move; a leading piece letter names the piece; anything else is a pawn
/// move. The text is taken at face value, there is no legality checking.
pub fn classify_piece(half_move: Option<&str>) -> Option<Role> {
    match half_move?.chars().next()? {
        'O' | '0' | 'K' => Some(Role::King),
        'Q' => Some(Role::Queen),
        'R' => Some(Role::Rook),
        'B' => Some(Role::Bishop),
        'N' => Some(Role::Knight),
        _ => Some(Role::Pawn),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pawn_moves() {
        assert_eq!(classify_piece(Some("e4")), Some(Role::Pawn));
        assert_eq!(classify_piece(Some("exd5")), Some(Role::Pawn));
        assert_eq!(classify_piece(Some("a8=Q+")), Some(Role::Pawn));
    }

    #[test]
    fn test_piece_letter_moves() {
        assert_eq!(classify_piece(Some("Nf3")), Some(Role::Knight));
        assert_eq!(classify_piece(Some("Qh5")), Some(Role::Queen));
        assert_eq!(classify_piece(Some("Rxd1")), Some(Role::Rook));
        assert_eq!(classify_piece(Some("Bb5+")), Some(Role::Bishop));
        assert_eq!(classify_piece(Some("Kxe2")), Some(Role::King));
    }

    #[test]
    fn test_castling_is_a_king_move() {
        assert_eq!(classify_piece(Some("O-O")), Some(Role::King));
        assert_eq!(classify_piece(Some("O-O-O")), Some(Role::King));
        assert_eq!(classify_piece(Some("O-O+")), Some(Role::King));
        assert_eq!(classify_piece(Some("0-0")), Some(Role::King));
    }

    #[test]
    fn test_absent_move_is_unset() {
        assert_eq!(classify_piece(None), None);
        assert_eq!(classify_piece(Some("")), None);
    }
}
