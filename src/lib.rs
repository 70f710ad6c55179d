//! Statistical opening-tree analyzer for PGN game databases.
//!
//! Parses every game of a PGN database into a structured record, then
//! aggregates the collection into a prefix tree over half-moves: per node
//! the number of games that passed through it, who won them, the derived
//! win/draw rates, and the most recent date the move was seen. The tree,
//! the verbatim records, and database-wide win rates are serialized into a
//! single JSON report.

mod error;
mod log;
mod moves;
mod piece;
mod reader;
mod report;
mod stats;
mod tree;
mod types;
mod visitor;

pub use error::ErrorAccumulator;
pub use moves::{PlyList, ply_at, ply_sequence, sequences_match};
pub use piece::classify_piece;
pub use reader::{ReadError, read_games};
pub use report::DatabaseReport;
pub use stats::{WinRates, WinShare, win_rates};
pub use tree::{NodeId, OpeningTree, TreeBuilder, TreeNode, WinBucket, Winnings};
pub use types::{DATE_FORMAT, GameRecord, GameResult, MovePair, RecordedMoves, Winner};
pub use visitor::GameVisitor;
