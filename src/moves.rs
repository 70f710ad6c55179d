//! Half-move sequence utilities backing the tree builder: flattening a
//! game's move-pairs into plies and comparing ply sequences structurally.

use smallvec::SmallVec;

use crate::types::GameRecord;

/// Borrowed ply sequence; the inline capacity covers typical opening
/// prefixes without touching the heap.
pub type PlyList<'a> = SmallVec<[&'a str; 32]>;

/// Flat ordered half-move sequence of a game (white, black, white, ...).
///
/// `cutoff` is the zero-based index of the last ply to include; a game with
/// fewer plies yields what it has, without padding. A move-pair with no
/// black half-move ends the sequence.
pub fn ply_sequence<'a>(game: &'a GameRecord, cutoff: Option<usize>) -> PlyList<'a> {
    let limit = match cutoff {
        Some(cutoff) => cutoff.saturating_add(1),
        None => usize::MAX,
    };

    let mut plies = PlyList::new();
    for pair in &game.moves.list {
        if plies.len() >= limit {
            break;
        }
        plies.push(pair.white.as_str());

        if plies.len() >= limit {
            break;
        }
        match &pair.black {
            Some(black) => plies.push(black.as_str()),
            None => break,
        }
    }
    plies
}

/// Half-move at an absolute zero-based ply index, if the game got that far.
pub fn ply_at(game: &GameRecord, ply: usize) -> Option<&str> {
    let pair = game.moves.list.get(ply / 2)?;
    if ply.is_multiple_of(2) {
        Some(pair.white.as_str())
    } else {
        pair.black.as_deref()
    }
}

/// Element-wise sequence equality; unequal lengths never match.
pub fn sequences_match<L, R>(left: &[L], right: &[R]) -> bool
where
    L: AsRef<str>,
    R: AsRef<str>,
{
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(l, r)| l.as_ref() == r.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MovePair, RecordedMoves};

    fn game_with_plies(plies: &[&str]) -> GameRecord {
        let list = plies
            .chunks(2)
            .enumerate()
            .map(|(i, chunk)| MovePair {
                number: i as u32 + 1,
                white: chunk[0].to_string(),
                black: chunk.get(1).map(|s| s.to_string()),
            })
            .collect();

        GameRecord {
            moves: RecordedMoves {
                text: String::new(),
                list,
            },
            ..GameRecord::default()
        }
    }

    #[test]
    fn test_ply_sequence_full_game() {
        let game = game_with_plies(&["e4", "e5", "Nf3", "Nc6"]);
        let plies = ply_sequence(&game, None);
        assert_eq!(plies.as_slice(), ["e4", "e5", "Nf3", "Nc6"]);
    }

    #[test]
    fn test_ply_sequence_cutoff_is_inclusive() {
        let game = game_with_plies(&["e4", "e5", "Nf3", "Nc6"]);
        assert_eq!(ply_sequence(&game, Some(0)).as_slice(), ["e4"]);
        assert_eq!(ply_sequence(&game, Some(2)).as_slice(), ["e4", "e5", "Nf3"]);
    }

    #[test]
    fn test_ply_sequence_cutoff_beyond_game_length() {
        let game = game_with_plies(&["e4", "e5"]);
        assert_eq!(ply_sequence(&game, Some(10)).as_slice(), ["e4", "e5"]);
    }

    #[test]
    fn test_ply_sequence_stops_at_missing_black_half_move() {
        let game = game_with_plies(&["e4", "e5", "Qh5"]);
        assert_eq!(ply_sequence(&game, None).as_slice(), ["e4", "e5", "Qh5"]);
    }

    #[test]
    fn test_ply_sequence_empty_game() {
        let game = game_with_plies(&[]);
        assert!(ply_sequence(&game, None).is_empty());
        assert!(ply_sequence(&game, Some(3)).is_empty());
    }

    #[test]
    fn test_ply_at_alternates_players() {
        let game = game_with_plies(&["e4", "e5", "Nf3"]);
        assert_eq!(ply_at(&game, 0), Some("e4"));
        assert_eq!(ply_at(&game, 1), Some("e5"));
        assert_eq!(ply_at(&game, 2), Some("Nf3"));
    }

    #[test]
    fn test_ply_at_past_end_of_game() {
        let game = game_with_plies(&["e4", "e5", "Nf3"]);
        assert_eq!(ply_at(&game, 3), None);
        assert_eq!(ply_at(&game, 17), None);
    }

    #[test]
    fn test_sequences_match_elementwise() {
        assert!(sequences_match(&["e4", "e5"], &["e4", "e5"]));
        assert!(!sequences_match(&["e4", "e5"], &["e4", "c5"]));
    }

    #[test]
    fn test_sequences_match_is_length_sensitive() {
        assert!(!sequences_match(&["e4"], &["e4", "e5"]));
        assert!(!sequences_match(&["e4", "e5"], &["e4"]));
    }

    #[test]
    fn test_empty_sequences_match() {
        let empty: [&str; 0] = [];
        assert!(sequences_match(&empty, &empty));
    }
}
