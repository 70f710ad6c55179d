//! Database input: path resolution, decompression, and game streaming.
//!
//! The input is one or more PGN files, named literally or via a glob
//! pattern; files ending in `.zst` are decompressed on the fly. Individual
//! malformed games surface as records with `parse_error` set, an unreadable
//! input is the one fatal condition.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use pgn_reader::Reader;
use thiserror::Error;
use zstd::stream::read::Decoder as ZstdDecoder;

use crate::log;
use crate::types::GameRecord;
use crate::visitor::GameVisitor;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("invalid input pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error("no input files match {0:?}")]
    NoInput(String),
    #[error("cannot open {path}: {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("error while reading {path}: {source}", path = .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

type PgnInput = Box<dyn Read + Send>;

/// Parse up to `max_games` games from the files matching `pattern`, with
/// ids assigned sequentially from 1 in file order.
pub fn read_games(pattern: &str, max_games: Option<usize>) -> Result<Vec<GameRecord>, ReadError> {
    let mut games = Vec::new();

    for path in resolve_paths(pattern)? {
        if max_games.is_some_and(|max| games.len() >= max) {
            break;
        }
        read_file(&path, max_games, &mut games)?;
    }

    Ok(games)
}

fn resolve_paths(pattern: &str) -> Result<Vec<PathBuf>, ReadError> {
    if !pattern.contains(['*', '?', '[']) {
        return Ok(vec![PathBuf::from(pattern)]);
    }

    let entries = glob::glob(pattern).map_err(|source| ReadError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = entries.filter_map(Result::ok).collect();
    paths.sort();
    if paths.is_empty() {
        return Err(ReadError::NoInput(pattern.to_string()));
    }
    Ok(paths)
}

fn open_input(path: &Path) -> Result<PgnInput, ReadError> {
    let file = File::open(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("zst")) {
        let decoder = ZstdDecoder::new(file).map_err(|source| ReadError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Box::new(decoder))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn read_file(
    path: &Path,
    max_games: Option<usize>,
    games: &mut Vec<GameRecord>,
) -> Result<(), ReadError> {
    let mut reader = Reader::new(open_input(path)?);
    let mut visitor = GameVisitor::new();

    loop {
        if max_games.is_some_and(|max| games.len() >= max) {
            return Ok(());
        }

        match reader.read_game(&mut visitor) {
            Ok(Some(())) => {
                if let Some(mut game) = visitor.current_game.take() {
                    game.id = games.len() + 1;
                    games.push(game);
                }
            }
            Ok(None) => return Ok(()),
            Err(source) => {
                log::error(format!("aborting {}: {source}", path.display()));
                return Err(ReadError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_pgn(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("opening-tree-{}-{name}", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    const TWO_GAMES: &str = r#"[Event "A"]
[Date "2021.05.01"]
[Result "1-0"]

1. e4 e5 1-0

[Event "B"]
[Date "2020.01.01"]
[Result "0-1"]

1. d4 d5 0-1
"#;

    #[test]
    fn test_literal_path_is_not_globbed() {
        let paths = resolve_paths("games/input.pgn").unwrap();
        assert_eq!(paths, vec![PathBuf::from("games/input.pgn")]);
    }

    #[test]
    fn test_glob_with_no_matches_is_an_error() {
        let missing = std::env::temp_dir().join("opening-tree-no-such-dir/*.pgn");
        let err = resolve_paths(missing.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ReadError::NoInput(_)));
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_games("/definitely/not/here.pgn", None).unwrap_err();
        assert!(matches!(err, ReadError::Open { .. }));
    }

    #[test]
    fn test_reads_games_with_sequential_ids() {
        let path = temp_pgn("two.pgn", TWO_GAMES);
        let games = read_games(path.to_str().unwrap(), None).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(games.len(), 2);
        assert_eq!(games[0].id, 1);
        assert_eq!(games[0].tags.get("Event").map(String::as_str), Some("A"));
        assert_eq!(games[1].id, 2);
        assert_eq!(games[1].moves.list[0].white, "d4");
    }

    #[test]
    fn test_max_games_caps_the_read() {
        let path = temp_pgn("capped.pgn", TWO_GAMES);
        let games = read_games(path.to_str().unwrap(), Some(1)).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, 1);
    }
}
