//! Streaming PGN visitor turning one game into a [`GameRecord`].
//!
//! Only the mainline is kept: variations are skipped, comments and NAGs
//! are dropped. Header tags are stored verbatim, first value wins on
//! duplicates. Parse problems accumulate on the record instead of aborting
//! the read.

use std::collections::BTreeMap;
use std::fmt::Write;
use std::mem;
use std::ops::ControlFlow;

use chrono::NaiveDate;
use pgn_reader::{Nag, Outcome, RawComment, RawTag, SanPlus, Skip, Visitor};

use crate::error::ErrorAccumulator;
use crate::types::{DATE_FORMAT, GameRecord, GameResult, MovePair, RecordedMoves};

pub struct GameVisitor {
    tags: BTreeMap<String, String>,
    pairs: Vec<MovePair>,
    movetext: String,
    ply_count: u32,
    result_marker: Option<String>,
    parse_error: ErrorAccumulator,
    pub current_game: Option<GameRecord>,
}

impl GameVisitor {
    pub fn new() -> Self {
        Self {
            tags: BTreeMap::new(),
            pairs: Vec::new(),
            movetext: String::new(),
            ply_count: 0,
            result_marker: None,
            parse_error: ErrorAccumulator::default(),
            current_game: None,
        }
    }
}

impl Default for GameVisitor {
    fn default() -> Self {
        Self::new()
    }
}

impl Visitor for GameVisitor {
    type Tags = ();
    type Movetext = ();
    type Output = ();

    fn begin_tags(&mut self) -> ControlFlow<Self::Output, Self::Tags> {
        self.tags.clear();
        self.pairs.clear();
        self.movetext.clear();
        self.ply_count = 0;
        self.result_marker = None;
        self.parse_error = ErrorAccumulator::default();
        self.current_game = None;
        ControlFlow::Continue(())
    }

    fn tag(
        &mut self,
        _: &mut Self::Tags,
        key: &[u8],
        value: RawTag<'_>,
    ) -> ControlFlow<Self::Output> {
        let key = String::from_utf8_lossy(key).into_owned();
        let bytes = value.as_bytes();
        if bytes.is_empty() || self.tags.contains_key(&key) {
            return ControlFlow::Continue(());
        }

        let value = match std::str::from_utf8(bytes) {
            Ok(text) => text.to_string(),
            Err(_) => {
                self.parse_error
                    .record(format!("tag {key}: invalid UTF-8, decoded lossily"));
                String::from_utf8_lossy(bytes).into_owned()
            }
        };
        self.tags.insert(key, value);
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, _: Self::Tags) -> ControlFlow<Self::Output, Self::Movetext> {
        ControlFlow::Continue(())
    }

    fn san(&mut self, _: &mut Self::Movetext, san_plus: SanPlus) -> ControlFlow<Self::Output> {
        let san = san_plus.to_string();

        if !self.movetext.is_empty() {
            self.movetext.push(' ');
        }

        if self.ply_count.is_multiple_of(2) {
            let number = self.ply_count / 2 + 1;
            let _ = write!(self.movetext, "{number}. {san}");
            self.pairs.push(MovePair {
                number,
                white: san,
                black: None,
            });
        } else {
            self.movetext.push_str(&san);
            if let Some(pair) = self.pairs.last_mut() {
                pair.black = Some(san);
            }
        }

        self.ply_count += 1;
        ControlFlow::Continue(())
    }

    fn nag(&mut self, _: &mut Self::Movetext, _: Nag) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn comment(&mut self, _: &mut Self::Movetext, _: RawComment<'_>) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn partial_comment(
        &mut self,
        _: &mut Self::Movetext,
        _: RawComment<'_>,
    ) -> ControlFlow<Self::Output> {
        ControlFlow::Continue(())
    }

    fn begin_variation(&mut self, _: &mut Self::Movetext) -> ControlFlow<Self::Output, Skip> {
        ControlFlow::Continue(Skip(true))
    }

    fn outcome(&mut self, _: &mut Self::Movetext, outcome: Outcome) -> ControlFlow<Self::Output> {
        self.result_marker = Some(outcome.to_string());
        ControlFlow::Continue(())
    }

    fn end_game(&mut self, _: Self::Movetext) -> Self::Output {
        // The Result tag is authoritative; the movetext marker is the
        // fallback for headerless databases.
        let score = self
            .tags
            .remove("Result")
            .or_else(|| self.result_marker.take());

        if let Some(score) = &score {
            if !self.movetext.is_empty() {
                self.movetext.push(' ');
            }
            self.movetext.push_str(score);
        }

        if let Some(raw) = self.tags.get("Date")
            && let Err(err) = NaiveDate::parse_from_str(raw, DATE_FORMAT)
        {
            self.parse_error
                .record(format!("Conversion error: Date='{raw}' (chrono: {err})"));
        }

        self.current_game = Some(GameRecord {
            id: 0,
            tags: mem::take(&mut self.tags),
            result: score.map(GameResult::from_score),
            moves: RecordedMoves {
                text: mem::take(&mut self.movetext),
                list: mem::take(&mut self.pairs),
            },
            parse_error: self.parse_error.take(),
        });
    }
}
