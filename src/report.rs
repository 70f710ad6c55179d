//! Final aggregate document and JSON output.

use std::fs;
use std::io;
use std::path::Path;

use serde_json::{Value as JsonValue, json};

use crate::stats::{WinRates, win_rates};
use crate::tree::{NodeId, OpeningTree};
use crate::types::{DATE_FORMAT, GameRecord};

/// Everything the analyzer produces for one database: the verbatim game
/// records, the database-wide win rates, and the opening tree.
#[derive(Debug)]
pub struct DatabaseReport {
    pub games: Vec<GameRecord>,
    pub win_rates: WinRates,
    pub tree: OpeningTree,
}

impl DatabaseReport {
    pub fn new(games: Vec<GameRecord>, tree: OpeningTree) -> Self {
        let win_rates = win_rates(&games);
        Self {
            games,
            win_rates,
            tree,
        }
    }

    /// The output document. Field names are the wire format consumed
    /// downstream; `matches` carries the records verbatim.
    pub fn to_json(&self) -> JsonValue {
        let tree: Vec<JsonValue> = self
            .tree
            .roots()
            .iter()
            .map(|&id| node_to_json(&self.tree, id))
            .collect();

        json!({
            "n_match_played": self.games.len(),
            "matches": self.games,
            "win_rates": self.win_rates,
            "tree": tree,
        })
    }

    pub fn write_to_file(&self, path: &Path, pretty: bool) -> io::Result<()> {
        let doc = self.to_json();
        let payload = if pretty {
            serde_json::to_string_pretty(&doc)?
        } else {
            doc.to_string()
        };
        fs::write(path, payload)
    }
}

fn node_to_json(tree: &OpeningTree, id: NodeId) -> JsonValue {
    let node = tree.node(id);
    let next_moves = node.next_moves.as_ref().map(|children| {
        children
            .iter()
            .map(|&child| node_to_json(tree, child))
            .collect::<Vec<_>>()
    });

    json!({
        "piece": node.piece.map(|role| role.upper_char().to_string()),
        "move": node.mv,
        "winnings": node.winnings,
        "gamesPlayed": node.games_played,
        "lastPlayed": node.last_played.format(DATE_FORMAT).to_string(),
        "nextMoves": next_moves,
    })
}
