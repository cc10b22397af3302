use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

use super::report::{Severity, ValidationIssue};
use crate::constants::validator::{
    CAPITALIZATION_PENALTY, CATEGORY_GRAMMAR, GRAMMAR_PATTERN_PENALTY,
    MISSING_QUESTION_MARK_PENALTY,
};
use crate::errors::QuizError;

/// Part-of-speech collaborator; tags use Penn Treebank labels (`NN*`, `VB*`).
pub trait PosTagger: Send + Sync {
    /// `(token, tag)` pairs for `text`.
    fn tag(&self, text: &str) -> Result<Vec<(String, String)>, QuizError>;
}

/// Score used when the tagger is present but fails.
const TAGGER_FAILURE_SCORE: f32 = 80.0;

static GRAMMAR_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"(?i)\ba\s+[aeiou]", "Use \"an\" before words starting with vowels"),
        (
            r"(?i)\ban\s+[bcdfghjklmnpqrstvwxyz]",
            "Use \"a\" before words starting with consonants",
        ),
        (r"\?\?+|!!+", "Avoid multiple punctuation marks"),
        (r"\s{2,}", "Remove extra spaces"),
        (r"\.{3,}", "Use proper ellipsis (...)"),
        (
            r"(?i)\b(?:it's|its)\b",
            "Check if you mean \"it is\" (it's) or possessive (its)",
        ),
    ]
    .into_iter()
    .map(|(pattern, message)| (Regex::new(pattern).expect("grammar rule compiles"), message))
    .collect()
});

/// Regex grammar checks, optionally averaged with a part-of-speech score.
pub fn validate(stem: &str, tagger: Option<&dyn PosTagger>) -> (f32, Vec<ValidationIssue>) {
    let mut issues = Vec::new();
    let mut score = 100.0_f32;

    for (pattern, message) in GRAMMAR_RULES.iter() {
        for hit in pattern.find_iter(stem) {
            issues.push(
                ValidationIssue::new(Severity::Warning, CATEGORY_GRAMMAR, *message)
                    .at(format!("Position {}-{}", hit.start(), hit.end())),
            );
            score -= GRAMMAR_PATTERN_PENALTY;
        }
    }

    let lowered = stem.to_lowercase();
    if !stem.trim().ends_with('?')
        && !lowered.contains("true or false")
        && !lowered.contains("fill in the blank")
    {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                CATEGORY_GRAMMAR,
                "Question should end with a question mark",
            )
            .with_suggestion("Add '?' at the end of the question"),
        );
        score -= MISSING_QUESTION_MARK_PENALTY;
    }

    if stem.chars().next().is_some_and(|first| !first.is_uppercase()) {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                CATEGORY_GRAMMAR,
                "Question should start with a capital letter",
            )
            .with_suggestion("Capitalize the first word"),
        );
        score -= CAPITALIZATION_PENALTY;
    }

    if let Some(tagger) = tagger {
        score = (score + part_of_speech_score(stem, tagger)) / 2.0;
    }

    (score.max(0.0), issues)
}

fn part_of_speech_score(stem: &str, tagger: &dyn PosTagger) -> f32 {
    let tags = match tagger.tag(stem) {
        Ok(tags) => tags,
        Err(err) => {
            warn!("[quizgen:validator] part-of-speech tagging failed: {err}");
            return TAGGER_FAILURE_SCORE;
        }
    };
    let verbs = tags.iter().filter(|(_, tag)| tag.starts_with("VB")).count();
    let nouns = tags.iter().filter(|(_, tag)| tag.starts_with("NN")).count();
    let mut score = 100.0_f32;
    if verbs == 0 {
        score -= 20.0;
    }
    if nouns == 0 {
        score -= 15.0;
    }
    if nouns > 0 {
        let ratio = verbs as f32 / nouns as f32;
        if !(0.2..=1.0).contains(&ratio) {
            score -= 10.0;
        }
    }
    score.max(0.0)
}
