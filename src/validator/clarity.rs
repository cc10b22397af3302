use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

use super::report::{Severity, ValidationIssue};
use crate::constants::validator::{
    CATEGORY_CLARITY, CLARITY_PENALTY, CRITICAL_CLARITY_PENALTY, MAX_STEM_WORDS, MIN_STEM_WORDS,
    STEM_LENGTH_PENALTY,
};

/// Readability collaborator.
pub trait ReadabilityScorer: Send + Sync {
    /// Flesch reading ease; higher is easier.
    fn reading_ease(&self, text: &str) -> f32;
    /// Approximate U.S. school grade level.
    fn grade_level(&self, text: &str) -> f32;
}

/// Flesch reading ease and Flesch-Kincaid grade using a vowel-group syllable count.
#[derive(Clone, Copy, Debug, Default)]
pub struct FleschReadability;

impl FleschReadability {
    fn counts(text: &str) -> (f32, f32, f32) {
        let words: Vec<&str> = text
            .split_whitespace()
            .filter(|word| word.chars().any(char::is_alphanumeric))
            .collect();
        let sentences = text
            .split(['.', '!', '?'])
            .filter(|sentence| sentence.chars().any(char::is_alphanumeric))
            .count()
            .max(1);
        let syllables: usize = words.iter().map(|word| syllable_count(word)).sum();
        (
            words.len().max(1) as f32,
            sentences as f32,
            syllables.max(1) as f32,
        )
    }
}

impl ReadabilityScorer for FleschReadability {
    fn reading_ease(&self, text: &str) -> f32 {
        let (words, sentences, syllables) = Self::counts(text);
        206.835 - 1.015 * (words / sentences) - 84.6 * (syllables / words)
    }

    fn grade_level(&self, text: &str) -> f32 {
        let (words, sentences, syllables) = Self::counts(text);
        0.39 * (words / sentences) + 11.8 * (syllables / words) - 15.59
    }
}

/// Vowel groups in `word`, ignoring a silent trailing `e`; at least one.
pub fn syllable_count(word: &str) -> usize {
    let letters: Vec<char> = word
        .chars()
        .filter(|ch| ch.is_alphabetic())
        .flat_map(char::to_lowercase)
        .collect();
    if letters.is_empty() {
        return 0;
    }
    let is_vowel = |ch: char| matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
    let mut count = 0;
    let mut previous_vowel = false;
    for &ch in &letters {
        let vowel = is_vowel(ch);
        if vowel && !previous_vowel {
            count += 1;
        }
        previous_vowel = vowel;
    }
    let len = letters.len();
    if count > 1 && letters[len - 1] == 'e' && !(len >= 2 && letters[len - 2] == 'l') {
        count -= 1;
    }
    count.max(1)
}

/// A named clarity pattern and how it is reported.
struct ClarityRule {
    name: &'static str,
    pattern: Regex,
    critical: bool,
    suggestion: &'static str,
}

fn rule(name: &'static str, pattern: &str, critical: bool, suggestion: &'static str) -> ClarityRule {
    ClarityRule {
        name,
        pattern: RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .expect("clarity rule compiles"),
        critical,
        suggestion,
    }
}

static PRONOUN: LazyLock<ClarityRule> = LazyLock::new(|| {
    rule(
        "ambiguous pronouns",
        r"\b(?:this|that|these|those|it|they)\b",
        true,
        "Replace pronouns with specific nouns",
    )
});

/// A pronoun directly followed by a copula and another word has a clear referent.
static COPULA_FOLLOWS: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"^\s+(?:is|are|was|were)\s+\w+")
        .case_insensitive(true)
        .build()
        .expect("copula pattern compiles")
});

static RULES: LazyLock<Vec<ClarityRule>> = LazyLock::new(|| {
    vec![
        rule(
            "vague terms",
            r"\b(?:thing|stuff|something|anything|everything|nothing|some|many|few|several)\b",
            false,
            "Use specific, concrete terms instead",
        ),
        rule(
            "absolute terms",
            r"\b(?:always|never|all|none|every|any|only|just|must|cannot|impossible)\b",
            false,
            "Consider using more qualified language",
        ),
        rule(
            "leading questions",
            r"\b(?:obviously|clearly|of course|naturally|certainly|definitely)\b",
            false,
            "Remove biased language that leads to specific answers",
        ),
        rule(
            "double negative",
            r"\b(?:not\s+(?:un|in|im|il|ir|dis|mis|non)|\w*n't\s+(?:un|in|im|il|ir|dis|mis|non))",
            true,
            "Rephrase using positive language",
        ),
        rule(
            "complex sentence",
            r"^[^.!?]*[.!?]\s*[^.!?]*[.!?]",
            false,
            "Break into simpler sentences or clauses",
        ),
    ]
});

/// First pronoun in `stem` that is not followed by `is/are/was/were <word>`.
pub fn ambiguous_pronoun(stem: &str) -> Option<&str> {
    PRONOUN
        .pattern
        .find_iter(stem)
        .find(|hit| !COPULA_FOLLOWS.is_match(&stem[hit.end()..]))
        .map(|hit| hit.as_str())
}

fn report(rule: &ClarityRule, matched: &str, score: &mut f32) -> ValidationIssue {
    let severity = if rule.critical {
        *score -= CRITICAL_CLARITY_PENALTY;
        Severity::Critical
    } else {
        *score -= CLARITY_PENALTY;
        Severity::Warning
    };
    ValidationIssue::new(
        severity,
        CATEGORY_CLARITY,
        format!("Detected {}: {matched}", rule.name),
    )
    .with_suggestion(rule.suggestion)
}

/// Clarity checks, optionally refined with a readability scorer.
pub fn validate(
    stem: &str,
    readability: Option<&dyn ReadabilityScorer>,
) -> (f32, Vec<ValidationIssue>) {
    let mut issues = Vec::new();
    let mut score = 100.0_f32;

    if let Some(pronoun) = ambiguous_pronoun(stem) {
        issues.push(report(&PRONOUN, pronoun, &mut score));
    }
    for rule in RULES.iter() {
        if let Some(hit) = rule.pattern.find(stem) {
            issues.push(report(rule, hit.as_str(), &mut score));
        }
    }

    if let Some(scorer) = readability {
        let ease = scorer.reading_ease(stem);
        let grade = scorer.grade_level(stem);
        if ease < 30.0 {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    CATEGORY_CLARITY,
                    "Text may be too difficult to read",
                )
                .with_suggestion("Simplify vocabulary and sentence structure"),
            );
            score -= 10.0;
        } else if ease > 90.0 {
            issues.push(
                ValidationIssue::new(
                    Severity::Info,
                    CATEGORY_CLARITY,
                    "Text may be too simple for the target audience",
                )
                .with_suggestion("Consider using more precise academic vocabulary"),
            );
            score -= 5.0;
        }
        if grade > 16.0 {
            score -= 15.0;
        } else if grade > 12.0 {
            score -= 10.0;
        }
    }

    let words = stem.split_whitespace().count();
    if words > MAX_STEM_WORDS {
        issues.push(
            ValidationIssue::new(Severity::Warning, CATEGORY_CLARITY, "Question may be too long")
                .with_suggestion("Consider breaking into shorter, more focused questions"),
        );
        score -= STEM_LENGTH_PENALTY;
    } else if words < MIN_STEM_WORDS {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                CATEGORY_CLARITY,
                "Question may be too short or unclear",
            )
            .with_suggestion("Provide more context or detail"),
        );
        score -= STEM_LENGTH_PENALTY;
    }

    (score.max(0.0), issues)
}
