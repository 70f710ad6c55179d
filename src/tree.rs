//! Recursive construction of the statistical opening tree.
//!
//! The tree is a prefix trie over half-moves: every node is one move text,
//! unique among its siblings, aggregating how often the move was played on
//! that branch, who won those games, and when the move was last seen.
//! Branches are keyed by the literal move-text sequence played so far, so
//! two move orders reaching the same position stay distinct branches.

use std::sync::LazyLock;

use chrono::NaiveDate;
use serde::Serialize;
use shakmaty::Role;

use crate::log;
use crate::moves::{PlyList, ply_at, ply_sequence, sequences_match};
use crate::piece::classify_piece;
use crate::types::{DATE_FORMAT, GameRecord, Winner};

/// Sorts before every real date; replaced as soon as a game is folded in.
static NEVER_PLAYED: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1, 1, 1).unwrap());

pub type NodeId = usize;

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub piece: Option<Role>,
    pub mv: String,
    pub winnings: Winnings,
    pub games_played: u64,
    pub last_played: NaiveDate,
    /// `None` once built means no game continues past this node.
    pub next_moves: Option<Vec<NodeId>>,
}

impl TreeNode {
    fn new(mv: &str) -> Self {
        Self {
            piece: None,
            mv: mv.to_string(),
            winnings: Winnings::default(),
            games_played: 0,
            last_played: *NEVER_PLAYED,
            next_moves: None,
        }
    }
}

/// Per-outcome totals at one node, with rates derived from `games_played`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Winnings {
    pub white: WinBucket,
    pub black: WinBucket,
    pub draw: WinBucket,
}

impl Winnings {
    fn bucket_mut(&mut self, winner: Winner) -> &mut WinBucket {
        match winner {
            Winner::White => &mut self.white,
            Winner::Black => &mut self.black,
            Winner::Draw => &mut self.draw,
        }
    }

    fn recompute_rates(&mut self, games_played: u64) {
        for bucket in [&mut self.white, &mut self.black, &mut self.draw] {
            bucket.rate = if games_played == 0 {
                0.0
            } else {
                bucket.total as f64 * 100.0 / games_played as f64
            };
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WinBucket {
    pub total: u64,
    pub rate: f64,
}

/// Arena-backed opening tree; children reference nodes by index, so the
/// whole structure is a flat `Vec` plus the root index list.
#[derive(Debug, Clone, PartialEq)]
pub struct OpeningTree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
}

impl OpeningTree {
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Recursive partitioning of a game collection by move prefix.
///
/// Each level filters the collection down to the games that genuinely
/// continue the branch prefix, groups them by the half-move they play at
/// the current ply, folds every game into its group's node, and descends
/// into each group. The eligible subset is re-derived from the full
/// collection at every level via whole-prefix comparison rather than
/// threaded down pre-filtered.
pub struct TreeBuilder<'a> {
    games: &'a [GameRecord],
    max_ply: Option<usize>,
    nodes: Vec<TreeNode>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(games: &'a [GameRecord]) -> Self {
        Self {
            games,
            max_ply: None,
            nodes: Vec::new(),
        }
    }

    /// Stop descending past this zero-based ply index; plies `0..=max_ply`
    /// are still aggregated.
    pub fn max_ply(mut self, max_ply: usize) -> Self {
        self.max_ply = Some(max_ply);
        self
    }

    pub fn build(mut self) -> OpeningTree {
        let mut prefix = Vec::new();
        let roots = self.expand(0, &mut prefix, true);
        OpeningTree {
            nodes: self.nodes,
            roots,
        }
    }

    /// One recursion level: children of the branch described by `prefix`,
    /// in first-seen order among the surviving games.
    fn expand(&mut self, ply: usize, prefix: &mut Vec<String>, is_root: bool) -> Vec<NodeId> {
        if self.max_ply.is_some_and(|max| ply > max) {
            return Vec::new();
        }

        let games = self.games;
        let mut children: Vec<NodeId> = Vec::new();

        for game in games {
            // Games over before this ply contribute nothing here.
            let Some(played) = ply_at(game, ply) else {
                continue;
            };

            if !is_root {
                // The game counts on this branch only if its own opening
                // retraces the prefix move for move; the same move text
                // reached through a different order stays elsewhere.
                let actual = ply_sequence(game, Some(ply));
                let mut expected: PlyList = prefix.iter().map(String::as_str).collect();
                expected.push(played);
                if !sequences_match(actual.as_slice(), expected.as_slice()) {
                    continue;
                }
            }

            let child = match children
                .iter()
                .copied()
                .find(|&id| self.nodes[id].mv == played)
            {
                Some(id) => id,
                None => {
                    let id = self.nodes.len();
                    self.nodes.push(TreeNode::new(played));
                    children.push(id);
                    id
                }
            };

            self.fold_game(child, game, played);
        }

        for &child in &children {
            prefix.push(self.nodes[child].mv.clone());
            let continuations = self.expand(ply + 1, prefix, false);
            prefix.pop();
            self.nodes[child].next_moves = (!continuations.is_empty()).then_some(continuations);
        }

        children
    }

    /// Fold one game's outcome into the node whose move it played here.
    ///
    /// Data-quality problems stay local: an unparsable date leaves
    /// `last_played` alone, an unresolved result leaves the winnings alone,
    /// and the game still counts toward `games_played`.
    fn fold_game(&mut self, id: NodeId, game: &GameRecord, played: &str) {
        let node = &mut self.nodes[id];
        node.games_played += 1;

        match game
            .date()
            .map(|raw| NaiveDate::parse_from_str(raw, DATE_FORMAT))
        {
            Some(Ok(date)) => {
                if date > node.last_played {
                    node.last_played = date;
                }
            }
            Some(Err(err)) => log::warn(format!(
                "game {}: unparsable Date tag ({err}), keeping lastPlayed",
                game.id
            )),
            None => log::warn(format!(
                "game {}: missing Date tag, keeping lastPlayed",
                game.id
            )),
        }

        match game.winner() {
            Some(winner) => node.winnings.bucket_mut(winner).total += 1,
            None => log::warn(format!(
                "game {}: unresolved result, not counted in winnings",
                game.id
            )),
        }
        node.winnings.recompute_rates(node.games_played);

        node.piece = classify_piece(Some(played));
    }
}
