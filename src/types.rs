use std::collections::BTreeMap;

use serde::Serialize;

/// `Date` tags and node dates throughout the database use this form.
pub const DATE_FORMAT: &str = "%Y.%m.%d";

/// One parsed game, id assigned sequentially in file order starting at 1.
///
/// Header tags are kept verbatim except `Result`, which is lifted into
/// [`GameResult`] so the winner is resolved once at parse time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameRecord {
    pub id: usize,
    #[serde(flatten)]
    pub tags: BTreeMap<String, String>,
    #[serde(rename = "Result", skip_serializing_if = "Option::is_none")]
    pub result: Option<GameResult>,
    pub moves: RecordedMoves,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

impl GameRecord {
    /// Raw `Date` tag, expected in `YYYY.MM.DD` form.
    pub fn date(&self) -> Option<&str> {
        self.tags.get("Date").map(String::as_str)
    }

    pub fn winner(&self) -> Option<Winner> {
        match &self.result {
            Some(GameResult::Resolved { winner, .. }) => Some(*winner),
            _ => None,
        }
    }
}

/// A score string resolved to its winner, or carried raw when it is not one
/// of the three standard forms (e.g. `*` for an unfinished game).
///
/// Serializes as `{"winner": ..., "result": ...}` when resolved and as the
/// bare string otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GameResult {
    Resolved { winner: Winner, result: String },
    Raw(String),
}

impl GameResult {
    pub fn from_score(score: String) -> Self {
        match Winner::from_score(&score) {
            Some(winner) => GameResult::Resolved {
                winner,
                result: score,
            },
            None => GameResult::Raw(score),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    White,
    Black,
    Draw,
}

impl Winner {
    pub fn from_score(score: &str) -> Option<Self> {
        match score.trim() {
            "1-0" => Some(Self::White),
            "0-1" => Some(Self::Black),
            "1/2-1/2" => Some(Self::Draw),
            _ => None,
        }
    }
}

/// Mainline moves of one game: the normalized movetext plus the structured
/// move-pair list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordedMoves {
    #[serde(rename = "str")]
    pub text: String,
    pub list: Vec<MovePair>,
}

/// A numbered move: white's half-move and, unless the game ended before
/// black replied, black's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovePair {
    pub number: u32,
    pub white: String,
    pub black: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_winner_from_score() {
        assert_eq!(Winner::from_score("1-0"), Some(Winner::White));
        assert_eq!(Winner::from_score("0-1"), Some(Winner::Black));
        assert_eq!(Winner::from_score("1/2-1/2"), Some(Winner::Draw));
        assert_eq!(Winner::from_score("*"), None);
        assert_eq!(Winner::from_score("abandoned"), None);
    }

    #[test]
    fn test_winner_from_score_trims_whitespace() {
        assert_eq!(Winner::from_score(" 1-0 "), Some(Winner::White));
    }

    #[test]
    fn test_game_result_resolution() {
        assert_eq!(
            GameResult::from_score("0-1".to_string()),
            GameResult::Resolved {
                winner: Winner::Black,
                result: "0-1".to_string(),
            }
        );
        assert_eq!(
            GameResult::from_score("*".to_string()),
            GameResult::Raw("*".to_string())
        );
    }

    #[test]
    fn test_resolved_result_serializes_as_object() {
        let result = GameResult::from_score("1-0".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["winner"], "white");
        assert_eq!(json["result"], "1-0");
    }

    #[test]
    fn test_raw_result_serializes_as_string() {
        let result = GameResult::from_score("*".to_string());
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json, serde_json::json!("*"));
    }

    #[test]
    fn test_record_tags_flatten_into_object() {
        let mut record = GameRecord {
            id: 3,
            ..GameRecord::default()
        };
        record
            .tags
            .insert("Date".to_string(), "2021.05.01".to_string());
        record.tags.insert("White".to_string(), "Carlsen".to_string());
        record.result = Some(GameResult::from_score("1/2-1/2".to_string()));

        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["Date"], "2021.05.01");
        assert_eq!(json["White"], "Carlsen");
        assert_eq!(json["Result"]["winner"], "draw");
        assert!(json.get("parse_error").is_none());
    }

    #[test]
    fn test_winner_accessor_ignores_raw_results() {
        let mut record = GameRecord::default();
        record.result = Some(GameResult::Raw("*".to_string()));
        assert_eq!(record.winner(), None);

        record.result = Some(GameResult::from_score("1-0".to_string()));
        assert_eq!(record.winner(), Some(Winner::White));
    }
}
