//! Seed question/answer pairs supplied by an external generator.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::QuizError;
use crate::types::{AnswerText, Sentence};

/// A pair as it arrives from the generator; either side may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSeedPair {
    /// Question text, if the generator produced one.
    #[serde(default)]
    pub question: Option<String>,
    /// Answer text, if the generator produced one.
    #[serde(default)]
    pub answer: Option<String>,
}

impl RawSeedPair {
    /// Pair with both sides present.
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: Some(question.into()),
            answer: Some(answer.into()),
        }
    }
}

/// A usable pair: both sides present and non-blank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPair {
    /// Question text.
    pub question: Sentence,
    /// Answer text.
    pub answer: AnswerText,
}

impl TryFrom<RawSeedPair> for SeedPair {
    type Error = RawSeedPair;

    fn try_from(raw: RawSeedPair) -> Result<Self, Self::Error> {
        let question = raw.question.as_deref().map(str::trim).unwrap_or_default();
        let answer = raw.answer.as_deref().map(str::trim).unwrap_or_default();
        if question.is_empty() || answer.is_empty() {
            return Err(raw);
        }
        Ok(SeedPair {
            question: question.to_string(),
            answer: answer.to_string(),
        })
    }
}

/// Keep only complete pairs.
pub fn complete_pairs(raw: Vec<RawSeedPair>) -> Vec<SeedPair> {
    raw.into_iter()
        .filter_map(|pair| SeedPair::try_from(pair).ok())
        .collect()
}

/// External generator of seed pairs for a context.
pub trait SeedSource: Send + Sync {
    /// Up to `count` raw pairs for `context`.
    ///
    /// Failures are reported as [`QuizError::SeedSourceUnavailable`] so the
    /// caller can fall back to local sources.
    fn fetch(&self, context: &str, count: usize) -> Result<Vec<RawSeedPair>, QuizError>;
}

/// Seed source replaying previously captured generator output.
#[derive(Clone, Debug, Default)]
pub struct RecordedSeeds {
    content: String,
}

impl RecordedSeeds {
    /// Replay `content` as captured generator output.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl SeedSource for RecordedSeeds {
    fn fetch(&self, _context: &str, count: usize) -> Result<Vec<RawSeedPair>, QuizError> {
        let mut pairs = parse_seed_pairs(&self.content);
        pairs.truncate(count);
        Ok(pairs)
    }
}

static NUMBERED_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(?:^|\s)\d+\.\s").expect("numbered marker compiles"));
static ANSWER_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:a|answer)\s*:\s*").expect("answer label compiles"));

/// Parse generator output into raw pairs.
///
/// The primary format is `Q: ...` / `A: ...`, on separate lines or on one
/// line. When no such pair is found, numbered blocks of the form
/// `1. Question? Answer` are tried.
pub fn parse_seed_pairs(content: &str) -> Vec<RawSeedPair> {
    let pairs = parse_labelled(content);
    if pairs.is_empty() {
        parse_numbered(content)
    } else {
        pairs
    }
}

fn parse_labelled(content: &str) -> Vec<RawSeedPair> {
    let mut pairs = Vec::new();
    let mut question = String::new();
    for line in content.lines().map(str::trim) {
        if let Some(rest) = line.strip_prefix("Q:") {
            match rest.split_once("A:") {
                Some((q, a)) => push_pair(&mut pairs, q, a),
                None => question = rest.trim().to_string(),
            }
        } else if let Some(rest) = line.strip_prefix("A:") {
            push_pair(&mut pairs, &question, rest);
            question.clear();
        }
    }
    pairs
}

fn push_pair(pairs: &mut Vec<RawSeedPair>, question: &str, answer: &str) {
    let question = question.trim();
    let answer = answer.trim();
    if !question.is_empty() && !answer.is_empty() {
        pairs.push(RawSeedPair::new(question, answer));
    }
}

fn parse_numbered(content: &str) -> Vec<RawSeedPair> {
    let starts: Vec<(usize, usize)> = NUMBERED_MARKER
        .find_iter(content)
        .map(|marker| (marker.start(), marker.end()))
        .collect();
    let mut pairs = Vec::new();
    for (index, &(_, body_start)) in starts.iter().enumerate() {
        let body_end = starts
            .get(index + 1)
            .map_or(content.len(), |&(next_start, _)| next_start);
        let block = &content[body_start..body_end];
        let Some(mark) = block.find('?') else {
            continue;
        };
        let (question, answer) = block.split_at(mark + 1);
        let answer = ANSWER_LABEL.replace(answer.trim(), "");
        push_pair(&mut pairs, question, &answer);
    }
    pairs
}
