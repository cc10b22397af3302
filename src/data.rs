use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::constants::distractors::NEUTRAL_QUALITY;
use crate::errors::QuizError;

pub use crate::types::{AnswerText, OptionLetter, OptionText, Sentence, Subject};

/// Category assigned to an extracted entity span.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityCategory {
    /// A named person, e.g. `Marie Curie`.
    Person,
    /// A named place, e.g. `New York`.
    Place,
    /// An abstract concept, e.g. `Photosynthesis`.
    Concept,
    /// A year or calendar date.
    Date,
    /// A quantity, spelled out or with a unit.
    Number,
    /// An acronym or device name, e.g. `TCP`.
    TechnicalTerm,
}

impl EntityCategory {
    /// All categories in matching order.
    pub const ALL: [EntityCategory; 6] = [
        EntityCategory::Person,
        EntityCategory::Place,
        EntityCategory::Concept,
        EntityCategory::Date,
        EntityCategory::Number,
        EntityCategory::TechnicalTerm,
    ];

    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            EntityCategory::Person => "person",
            EntityCategory::Place => "place",
            EntityCategory::Concept => "concept",
            EntityCategory::Date => "date",
            EntityCategory::Number => "number",
            EntityCategory::TechnicalTerm => "technical_term",
        }
    }
}

/// A categorized span found in source text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSpan {
    /// Matched text.
    pub text: String,
    /// Category of the pattern family that matched.
    pub category: EntityCategory,
    /// Byte offset of the match in the scanned text.
    pub offset: usize,
}

/// Relation mined from a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnowledgeType {
    /// `X is Y`.
    Definition,
    /// `X enables Y`.
    Function,
    /// `X involves Y`.
    Process,
    /// `X has Y`.
    Characteristic,
    /// `X connects Y`.
    Relationship,
}

/// A (subject, relation, content) fact mined from one sentence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeItem {
    /// Relation that produced the match.
    pub kind: KnowledgeType,
    /// Left-hand side of the relation, e.g. `A router`.
    pub subject: Subject,
    /// Right-hand side of the relation.
    pub content: String,
    /// Sentence the fact was mined from.
    pub source_sentence: Sentence,
    /// Heuristic confidence in [0, 1].
    pub confidence: f32,
}

/// Strategy that proposed a distractor candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Embedding-ranked context phrase.
    Semantic,
    /// Domain vocabulary pool.
    Domain,
    /// Same-category context entity.
    Heuristic,
    /// Mutation of the answer.
    Pattern,
    /// Templated filler.
    Generic,
}

/// A proposed wrong answer before ranking and filtering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistractorCandidate {
    /// Candidate text.
    pub text: AnswerText,
    /// Strategy-specific score.
    pub score: f32,
    /// Strategy that produced the candidate.
    pub source: CandidateSource,
    /// Confidence used to order candidates from the same strategy.
    pub confidence: f32,
}

impl DistractorCandidate {
    /// Build a candidate.
    pub fn new(text: impl Into<String>, score: f32, source: CandidateSource, confidence: f32) -> Self {
        Self {
            text: text.into(),
            score,
            source,
            confidence,
        }
    }
}

/// How well a distractor set sits against its answer in embedding space.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistractorQuality {
    /// Blend of closeness to the ideal similarity and spread, in [0, 1].
    pub overall_quality: f32,
    /// Mean answer-to-distractor similarity, when a model judged the set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_similarity: Option<f32>,
    /// Sample variance of those similarities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diversity: Option<f32>,
    /// Similarity of each distractor to the answer, in input order.
    #[serde(default)]
    pub similarities: Vec<f32>,
}

impl DistractorQuality {
    /// Quality reported when no model could judge the set.
    pub fn neutral() -> Self {
        Self {
            overall_quality: NEUTRAL_QUALITY,
            avg_similarity: None,
            diversity: None,
            similarities: Vec::new(),
        }
    }
}

/// Stated or estimated difficulty of a question.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    /// Recall of a short fact.
    Easy,
    /// Moderate recall or understanding.
    #[default]
    Medium,
    /// Long or multi-part material.
    Hard,
}

impl Difficulty {
    /// Ordinal level (easy = 1, hard = 3).
    pub fn level(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Map an extraction confidence onto a difficulty label.
    pub fn from_confidence(confidence: f32) -> Self {
        if confidence >= 0.8 {
            Difficulty::Hard
        } else if confidence >= 0.6 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

/// Requested question shape.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Four lettered options, one correct.
    #[default]
    MultipleChoice,
    /// `A = True`, `B = False`.
    TrueFalse,
    /// Blanked sentence with lettered options.
    FillInBlank,
    /// Rendered as multiple choice.
    ShortAnswer,
    /// Rendered as multiple choice.
    Matching,
    /// Rotates multiple choice, true/false, and fill-in-the-blank.
    Mixed,
}

impl QuestionType {
    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "multiple_choice",
            QuestionType::TrueFalse => "true_false",
            QuestionType::FillInBlank => "fill_in_blank",
            QuestionType::ShortAnswer => "short_answer",
            QuestionType::Matching => "matching",
            QuestionType::Mixed => "mixed",
        }
    }

    /// Concrete shape used for the `index`-th question of a batch.
    ///
    /// `Mixed` rotates multiple choice, true/false, and fill-in-the-blank.
    /// Short-answer and matching render as multiple choice.
    pub fn resolve(self, index: usize) -> QuestionType {
        match self {
            QuestionType::Mixed => match index % 3 {
                0 => QuestionType::MultipleChoice,
                1 => QuestionType::TrueFalse,
                _ => QuestionType::FillInBlank,
            },
            QuestionType::ShortAnswer | QuestionType::Matching => QuestionType::MultipleChoice,
            other => other,
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = QuizError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "multiple_choice" | "mcq" => Ok(QuestionType::MultipleChoice),
            "true_false" => Ok(QuestionType::TrueFalse),
            "fill_in_blank" | "fill_in_the_blank" => Ok(QuestionType::FillInBlank),
            "short_answer" => Ok(QuestionType::ShortAnswer),
            "matching" => Ok(QuestionType::Matching),
            "mixed" => Ok(QuestionType::Mixed),
            _ => Err(QuizError::UnsupportedQuestionType(value.to_string())),
        }
    }
}

/// A finished question record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Question text without options.
    pub stem: String,
    /// Options keyed by letter, in letter order.
    pub options: IndexMap<OptionLetter, OptionText>,
    /// Letter of the single correct option.
    pub correct_letter: OptionLetter,
    /// Short explanation naming the correct option.
    pub explanation: String,
    /// Stated difficulty.
    pub difficulty: Difficulty,
    /// Subject category, e.g. `science` or `general`.
    pub category: String,
    /// Points awarded for a correct response (at least 1).
    pub points: u32,
    /// Shape of the question.
    pub kind: QuestionType,
}

impl Question {
    /// Text of the correct option.
    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(&self.correct_letter).map(String::as_str)
    }

    /// Option texts other than the correct one, in letter order.
    pub fn distractor_texts(&self) -> Vec<&str> {
        self.options
            .iter()
            .filter(|(letter, _)| **letter != self.correct_letter)
            .map(|(_, text)| text.as_str())
            .collect()
    }
}
