//! Question quality scoring.
//!
//! Each question is scored on five axes (grammar, clarity, educational value,
//! distractor quality, difficulty consistency) and the axes are blended with
//! [`ScoreWeights`](crate::config::ScoreWeights). Batches are aggregated into a
//! [`ValidationReport`].

mod clarity;
mod difficulty;
mod educational;
mod grammar;
mod options;
mod report;

use tracing::debug;

pub use clarity::{FleschReadability, ReadabilityScorer, ambiguous_pronoun, syllable_count};
pub use difficulty::{consistency as difficulty_consistency, estimate as estimate_difficulty};
pub use educational::BloomLevel;
pub use grammar::PosTagger;
pub use report::{
    AverageScores, IssueSummary, QualityRating, QuestionScore, Severity, ValidationIssue,
    ValidationReport, aggregate,
};

use crate::config::ValidatorConfig;
use crate::data::{Question, QuestionType};
use report::round1;

/// Scores questions and batches.
pub struct QualityValidator {
    config: ValidatorConfig,
    tagger: Option<Box<dyn PosTagger>>,
    readability: Option<Box<dyn ReadabilityScorer>>,
}

impl QualityValidator {
    /// Validator without part-of-speech or readability refinement.
    pub fn new(config: ValidatorConfig) -> Self {
        Self {
            config,
            tagger: None,
            readability: None,
        }
    }

    /// Average a part-of-speech check into the grammar score.
    pub fn with_tagger(mut self, tagger: Box<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Refine clarity with reading-ease and grade-level scores.
    pub fn with_readability(mut self, readability: Box<dyn ReadabilityScorer>) -> Self {
        self.readability = Some(readability);
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Score a single question.
    pub fn validate_one(&self, question: &Question) -> QuestionScore {
        let stem = question.stem.as_str();
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        let (grammar_score, grammar_issues) = grammar::validate(stem, self.tagger.as_deref());
        issues.extend(grammar_issues);

        let (clarity_score, clarity_issues) = clarity::validate(stem, self.readability.as_deref());
        issues.extend(clarity_issues);

        let (educational_score, educational_suggestions) = educational::validate(stem, question.kind);
        suggestions.extend(educational_suggestions);

        let has_distractors = matches!(
            question.kind,
            QuestionType::MultipleChoice | QuestionType::FillInBlank
        );
        let distractor_score = if has_distractors && !question.options.is_empty() {
            let (score, option_issues) =
                options::validate(stem, &question.options, question.correct_letter);
            issues.extend(option_issues);
            score
        } else {
            100.0
        };

        let difficulty_score = difficulty::consistency(question.difficulty, stem, question.kind);

        let weights = &self.config.weights;
        let overall = grammar_score * weights.grammar
            + clarity_score * weights.clarity
            + educational_score * weights.educational
            + distractor_score * weights.distractors
            + difficulty_score * weights.difficulty;

        if overall < 70.0 {
            suggestions.push("Consider revising this question to improve overall quality".to_string());
        }
        if grammar_score < 80.0 {
            suggestions.push("Review grammar and sentence structure".to_string());
        }
        if clarity_score < 70.0 {
            suggestions.push("Simplify language and improve clarity".to_string());
        }
        if educational_score < 60.0 {
            suggestions.push(
                "Enhance educational value with more specific learning objectives".to_string(),
            );
        }

        debug!(
            "[quizgen:validator] scored question overall={:.1} issues={}",
            overall,
            issues.len()
        );

        QuestionScore {
            overall_score: round1(overall),
            grammar_score: round1(grammar_score),
            clarity_score: round1(clarity_score),
            educational_score: round1(educational_score),
            distractor_score: round1(distractor_score),
            difficulty_consistency: round1(difficulty_score),
            issues,
            suggestions,
        }
    }

    /// Score every question and aggregate the batch.
    pub fn validate_batch(&self, questions: &[Question]) -> ValidationReport {
        let scores = questions
            .iter()
            .map(|question| self.validate_one(question))
            .collect();
        aggregate(scores, self.config.max_recommendations)
    }
}

impl Default for QualityValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}
