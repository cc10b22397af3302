use std::collections::HashSet;

use indexmap::IndexMap;

use super::report::{Severity, ValidationIssue};
use crate::constants::validator::{
    ARTICLE_MISMATCH_PENALTY, CATEGORY_DISTRACTORS, LENGTH_DISPARITY_PENALTY,
    LENGTH_DISPARITY_RATIO, OBVIOUS_DISTRACTOR_PENALTY, OVERLAP_PENALTY, OVERLAP_RATIO,
};
use crate::types::OptionLetter;
use crate::utils::{contains_word, lowercase_words};

const OBVIOUS_WORDS: [&str; 5] = ["obviously", "clearly", "never", "always", "impossible"];
const PREVIEW_CHARS: usize = 30;

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

fn starts_with_vowel(text: &str) -> bool {
    text.chars()
        .next()
        .is_some_and(|ch| matches!(ch.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
}

/// Distractor quality for a keyed option set.
pub fn validate(
    stem: &str,
    options: &IndexMap<OptionLetter, String>,
    correct_letter: OptionLetter,
) -> (f32, Vec<ValidationIssue>) {
    if options.len() < 2 {
        return (
            0.0,
            vec![ValidationIssue::new(
                Severity::Critical,
                CATEGORY_DISTRACTORS,
                "Multiple choice questions need at least 2 options",
            )],
        );
    }
    let correct = options
        .get(&correct_letter)
        .map(String::as_str)
        .unwrap_or_default();
    let distractors: Vec<&str> = options
        .iter()
        .filter(|(letter, _)| **letter != correct_letter)
        .map(|(_, text)| text.as_str())
        .collect();
    if distractors.is_empty() {
        return (
            0.0,
            vec![ValidationIssue::new(
                Severity::Critical,
                CATEGORY_DISTRACTORS,
                "No distractors found",
            )],
        );
    }

    let mut issues = Vec::new();
    let mut score = 100.0_f32;

    let correct_len = correct.split_whitespace().count() as f32;
    let average_len = distractors
        .iter()
        .map(|text| text.split_whitespace().count() as f32)
        .sum::<f32>()
        / distractors.len() as f32;
    let ratio = (correct_len - average_len).abs() / correct_len.max(average_len).max(1.0);
    if ratio > LENGTH_DISPARITY_RATIO {
        issues.push(
            ValidationIssue::new(
                Severity::Warning,
                CATEGORY_DISTRACTORS,
                "Significant length difference between correct answer and distractors",
            )
            .with_suggestion("Make options similar in length to avoid giving away the answer"),
        );
        score -= LENGTH_DISPARITY_PENALTY;
    }

    for distractor in &distractors {
        if OBVIOUS_WORDS.iter().any(|word| contains_word(distractor, word)) {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    CATEGORY_DISTRACTORS,
                    format!("Distractor may be obviously wrong: '{}...'", preview(distractor)),
                )
                .with_suggestion("Make distractors plausible but incorrect"),
            );
            score -= OBVIOUS_DISTRACTOR_PENALTY;
        }
    }

    if contains_word(stem, "a") || contains_word(stem, "an") {
        let correct_vowel = starts_with_vowel(correct);
        if distractors
            .iter()
            .any(|distractor| starts_with_vowel(distractor) != correct_vowel)
        {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    CATEGORY_DISTRACTORS,
                    "Grammatical inconsistency in options (a/an usage)",
                )
                .with_suggestion("Ensure all options work grammatically with the question stem"),
            );
            score -= ARTICLE_MISMATCH_PENALTY;
        }
    }

    let correct_words: HashSet<String> = lowercase_words(correct).into_iter().collect();
    let overlap_limit = correct_words.len() as f32 * OVERLAP_RATIO;
    for distractor in &distractors {
        let overlap = lowercase_words(distractor)
            .into_iter()
            .collect::<HashSet<_>>()
            .intersection(&correct_words)
            .count();
        if overlap as f32 > overlap_limit {
            issues.push(
                ValidationIssue::new(
                    Severity::Warning,
                    CATEGORY_DISTRACTORS,
                    format!(
                        "Distractor too similar to correct answer: '{}...'",
                        preview(distractor)
                    ),
                )
                .with_suggestion("Create more distinct distractors"),
            );
            score -= OVERLAP_PENALTY;
        }
    }

    (score.max(0.0), issues)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(texts: &[&str]) -> IndexMap<OptionLetter, String> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| ((b'A' + index as u8) as char, text.to_string()))
            .collect()
    }

    #[test]
    fn balanced_options_score_full() {
        let (score, issues) = validate(
            "Which device forwards packets?",
            &options(&["Router", "Switch", "Modem", "Hub"]),
            'A',
        );
        assert_eq!(score, 100.0);
        assert!(issues.is_empty());
    }

    #[test]
    fn too_few_options_is_critical() {
        let (score, issues) = validate("Which?", &options(&["Router"]), 'A');
        assert_eq!(score, 0.0);
        assert_eq!(issues[0].severity, Severity::Critical);
    }

    #[test]
    fn length_disparity_costs_fifteen() {
        let (score, issues) = validate(
            "Which device forwards packets?",
            &options(&[
                "Network router",
                "Switch",
                "A device that forwards frames within one local network segment",
            ]),
            'A',
        );
        assert_eq!(score, 85.0);
        assert_eq!(
            issues[0].message,
            "Significant length difference between correct answer and distractors"
        );
    }

    #[test]
    fn obvious_and_overlapping_distractors_are_flagged() {
        let (score, issues) = validate(
            "Which device forwards packets?",
            &options(&["Edge router", "Never router", "Core router"]),
            'A',
        );
        // "Never router": obvious. Neither shares more than 70% of the words.
        assert_eq!(issues.len(), 1);
        assert_eq!(score, 90.0);

        let (score, issues) = validate(
            "Which device forwards packets?",
            &options(&["Edge router", "Router edge", "Hub"]),
            'A',
        );
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.starts_with("Distractor too similar"));
        assert_eq!(score, 88.0);
    }

    #[test]
    fn article_mismatch_is_reported_once() {
        let (score, issues) = validate(
            "A router is an example of which category?",
            &options(&["Device", "Appliance", "Instrument", "Gadget"]),
            'A',
        );
        assert_eq!(issues.len(), 1);
        assert_eq!(score, 92.0);
    }
}
