//! Builds finished question records from a stem, an answer, and distractors.

use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::config::AssemblerConfig;
use crate::constants::assembler::{
    DEFAULT_CATEGORY, EMPTY_ANSWER_PLACEHOLDER, FALLBACK_TOKENS, VARIANT_MARKERS,
};
use crate::data::{Difficulty, OptionLetter, OptionText, Question, QuestionType};

static STRIPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"["'()\[\]{}]"#).expect("strip pattern compiles"));
static CLAUSE_DELIMITER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\n\r.;:,\x{2013}\x{2014}\-/]").expect("delimiter pattern compiles")
});
static ALPHA_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z\-]*$").expect("token pattern compiles"));

/// Upper bound on numeric variant suffixes tried before giving up.
const MAX_NUMERIC_VARIANTS: usize = 10_000;

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect::<String>().trim_end().to_string()
}

/// Shorten option text to a scannable phrase.
///
/// Quotes and brackets are removed and only the first clause is kept. A
/// phrase longer than `max_words` collapses to its most salient token
/// (longest capitalized word, else longest alphabetic word, else the first
/// token). The result never exceeds `max_chars` characters and is empty only
/// when `text` is blank.
pub fn normalize_option(text: &str, max_words: usize, max_chars: usize) -> OptionText {
    if text.trim().is_empty() {
        return String::new();
    }
    let stripped = STRIPPED.replace_all(text, "");
    let stripped = stripped.trim();
    let first_clause = CLAUSE_DELIMITER
        .split(stripped)
        .next()
        .unwrap_or_default()
        .trim();
    let phrase = if first_clause.is_empty() {
        text.trim()
    } else {
        first_clause
    };
    let mut tokens: Vec<&str> = phrase.split_whitespace().collect();
    if tokens.is_empty() {
        return String::new();
    }
    if tokens.len() > max_words {
        let alpha: Vec<&str> = tokens
            .iter()
            .copied()
            .filter(|token| ALPHA_TOKEN.is_match(token))
            .collect();
        let capitalized: Vec<&str> = alpha
            .iter()
            .copied()
            .filter(|token| token.starts_with(|ch: char| ch.is_ascii_uppercase()))
            .collect();
        let salient = longest(&capitalized)
            .or_else(|| longest(&alpha))
            .unwrap_or(tokens[0]);
        tokens = vec![salient];
    }
    let out = tokens.join(" ");
    if out.chars().count() > max_chars {
        return truncate_chars(&out, max_chars);
    }
    out
}

/// First longest token, matching `max_by_key` tie-breaking on the earliest.
fn longest<'a>(tokens: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<&'a str> = None;
    for token in tokens {
        if best.is_none_or(|current| token.len() > current.len()) {
            best = Some(token);
        }
    }
    best
}

/// Append `suffix` to `base`, truncating `base` so the result fits `max_chars`.
fn fit_variant(base: &str, suffix: &str, max_chars: usize) -> String {
    let suffix_chars = suffix.chars().count();
    if suffix_chars >= max_chars {
        return suffix.chars().take(max_chars).collect();
    }
    let head: String = base.chars().take(max_chars - suffix_chars).collect();
    format!("{head}{suffix}")
}

/// Letter for the option at `index` (0 → `A`).
pub fn option_letter(index: usize) -> OptionLetter {
    char::from(b'A' + (index % 26) as u8)
}

/// Assembles question records with exactly `option_count` unique options.
#[derive(Clone, Debug, Default)]
pub struct QuestionAssembler {
    config: AssemblerConfig,
}

impl QuestionAssembler {
    /// Assembler using `config`.
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Normalize with this assembler's word and character budgets.
    pub fn normalize(&self, text: &str) -> OptionText {
        normalize_option(text, self.config.max_words, self.config.max_chars)
    }

    /// Multiple-choice question with shuffled options and one correct letter.
    ///
    /// Options are normalized and deduplicated ignoring case. Missing slots
    /// are backfilled from a fixed token pool, then from suffixed variants of
    /// the correct answer, so the option count always matches the config.
    pub fn assemble<R: Rng + ?Sized>(
        &self,
        stem: &str,
        correct_answer: &str,
        distractors: &[String],
        rng: &mut R,
    ) -> Question {
        let wanted = self.config.option_count.clamp(2, 26);
        let max_chars = self.config.max_chars.max(1);

        let mut correct = self.normalize(correct_answer);
        if correct.is_empty() {
            correct = truncate_chars(correct_answer.trim(), max_chars);
        }
        if correct.is_empty() {
            correct = truncate_chars(EMPTY_ANSWER_PLACEHOLDER, max_chars);
        }

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(correct.to_lowercase());
        let mut options: Vec<(OptionText, bool)> = vec![(correct.clone(), true)];

        let mut push = |text: String, options: &mut Vec<(OptionText, bool)>| {
            if options.len() < wanted && !text.is_empty() && seen.insert(text.to_lowercase()) {
                options.push((text, false));
            }
        };

        for distractor in distractors {
            push(self.normalize(distractor), &mut options);
        }
        for token in FALLBACK_TOKENS {
            push(truncate_chars(token, max_chars), &mut options);
        }
        for marker in VARIANT_MARKERS {
            push(fit_variant(&correct, marker, max_chars), &mut options);
        }
        let mut suffix = 2;
        while options.len() < wanted && suffix < MAX_NUMERIC_VARIANTS {
            push(
                fit_variant(&correct, &suffix.to_string(), max_chars),
                &mut options,
            );
            suffix += 1;
        }

        options.shuffle(rng);
        let correct_index = options.iter().position(|(_, is_correct)| *is_correct).unwrap_or(0);
        let correct_letter = option_letter(correct_index);
        let options: IndexMap<OptionLetter, OptionText> = options
            .into_iter()
            .enumerate()
            .map(|(index, (text, _))| (option_letter(index), text))
            .collect();
        let explanation = format!(
            "The correct answer is {correct_letter}: {}",
            options.get(&correct_letter).map(String::as_str).unwrap_or_default()
        );

        Question {
            stem: stem.trim().to_string(),
            options,
            correct_letter,
            explanation,
            difficulty: Difficulty::default(),
            category: DEFAULT_CATEGORY.to_string(),
            points: 1,
            kind: QuestionType::MultipleChoice,
        }
    }

    /// True/false question with `A = True` and `B = False`.
    pub fn assemble_true_false(&self, statement: &str, is_true: bool) -> Question {
        let mut options = IndexMap::new();
        options.insert('A', "True".to_string());
        options.insert('B', "False".to_string());
        let correct_letter = if is_true { 'A' } else { 'B' };
        let verdict = if is_true { "True" } else { "False" };
        Question {
            stem: format!("True or False: {}", statement.trim()),
            options,
            correct_letter,
            explanation: format!("The correct answer is {correct_letter}: {verdict}"),
            difficulty: Difficulty::default(),
            category: DEFAULT_CATEGORY.to_string(),
            points: 1,
            kind: QuestionType::TrueFalse,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn assert_well_formed(question: &Question, option_count: usize, max_chars: usize) {
        assert_eq!(question.options.len(), option_count);
        assert!(question.options.contains_key(&question.correct_letter));
        let lowered: HashSet<String> = question
            .options
            .values()
            .map(|text| text.to_lowercase())
            .collect();
        assert_eq!(lowered.len(), option_count);
        for text in question.options.values() {
            assert!(!text.is_empty());
            assert!(text.chars().count() <= max_chars, "{text} exceeds cap");
        }
    }

    #[test]
    fn normalize_keeps_first_clause() {
        assert_eq!(normalize_option("Router; a device", 2, 24), "Router");
        assert_eq!(normalize_option("\"Data link\"", 2, 24), "Data link");
    }

    #[test]
    fn normalize_collapses_long_phrases_to_salient_token() {
        assert_eq!(
            normalize_option("the Internet Protocol suite", 2, 24),
            "Internet"
        );
        assert_eq!(
            normalize_option("a networking device that forwards packets", 2, 24),
            "networking"
        );
        assert_eq!(normalize_option("42 17 99", 2, 24), "42");
    }

    #[test]
    fn normalize_honors_a_wider_word_budget() {
        assert_eq!(
            normalize_option("Transmission Control Protocol", 3, 40),
            "Transmission Control Protocol"
        );
        assert_eq!(
            normalize_option("the Transmission Control Protocol", 3, 40),
            "Transmission"
        );
    }

    #[test]
    fn assemble_keeps_multi_word_answers_within_budget() {
        let assembler = QuestionAssembler::new(AssemblerConfig {
            max_words: 3,
            max_chars: 40,
            ..AssemblerConfig::default()
        });
        let distractors = vec![
            "User Datagram Protocol".to_string(),
            "Internet Protocol".to_string(),
            "Address Resolution Protocol".to_string(),
        ];
        let mut rng = StdRng::seed_from_u64(8);
        let question = assembler.assemble(
            "Which protocol guarantees ordered delivery?",
            "Transmission Control Protocol",
            &distractors,
            &mut rng,
        );
        assert_well_formed(&question, 4, 40);
        assert_eq!(question.correct_text(), Some("Transmission Control Protocol"));
        assert!(
            question
                .options
                .values()
                .any(|text| text == "User Datagram Protocol")
        );
    }

    #[test]
    fn normalize_caps_length() {
        let out = normalize_option("Pneumonoultramicroscopicsilicovolcanoconiosis", 2, 24);
        assert_eq!(out.chars().count(), 24);
    }

    #[test]
    fn normalize_is_empty_only_for_blank_text() {
        assert_eq!(normalize_option("   ", 2, 24), "");
        assert!(!normalize_option("...", 2, 24).is_empty());
        assert!(!normalize_option("()", 2, 24).is_empty());
        assert!(!normalize_option("- leading dash", 2, 24).is_empty());
    }

    #[test]
    fn assemble_keeps_the_correct_answer() {
        let assembler = QuestionAssembler::default();
        let distractors = vec!["Switch".to_string(), "Hub".to_string(), "Modem".to_string()];
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = assembler.assemble("Which device routes?", "Router", &distractors, &mut rng);
            assert_well_formed(&question, 4, 24);
            assert_eq!(question.correct_text(), Some("Router"));
            assert_eq!(
                question.explanation,
                format!("The correct answer is {}: Router", question.correct_letter)
            );
        }
    }

    #[test]
    fn assemble_backfills_when_distractors_collapse() {
        let assembler = QuestionAssembler::default();
        let distractors = vec!["router".to_string(), "ROUTER".to_string(), String::new()];
        let mut rng = StdRng::seed_from_u64(1);
        let question = assembler.assemble("Which?", "Router", &distractors, &mut rng);
        assert_well_formed(&question, 4, 24);
        let texts: Vec<&str> = question.options.values().map(String::as_str).collect();
        assert!(texts.contains(&"Alpha"));
    }

    #[test]
    fn assemble_survives_adversarial_inputs() {
        let distractors = vec!["Alpha".to_string(), "alpha".to_string()];
        for (answer, max_chars) in [("", 24), ("   ", 3), ("Beta", 1), ("x", 2)] {
            let assembler = QuestionAssembler::new(AssemblerConfig {
                max_chars,
                ..AssemblerConfig::default()
            });
            let mut rng = StdRng::seed_from_u64(4);
            let question = assembler.assemble("Pick one?", answer, &distractors, &mut rng);
            assert_well_formed(&question, 4, max_chars);
        }
    }

    #[test]
    fn assemble_truncates_surplus_without_losing_the_answer() {
        let assembler = QuestionAssembler::default();
        let distractors: Vec<String> = ["Switch", "Hub", "Modem", "Bridge", "Repeater", "Gateway"]
            .iter()
            .map(|text| text.to_string())
            .collect();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let question = assembler.assemble("Which?", "Router", &distractors, &mut rng);
            assert_well_formed(&question, 4, 24);
            assert_eq!(question.correct_text(), Some("Router"));
        }
    }

    #[test]
    fn true_false_maps_truth_to_letters() {
        let assembler = QuestionAssembler::default();
        let truthy = assembler.assemble_true_false("Routers forward packets.", true);
        assert_eq!(truthy.correct_letter, 'A');
        assert_eq!(truthy.stem, "True or False: Routers forward packets.");
        let falsy = assembler.assemble_true_false("Routers are not devices.", false);
        assert_eq!(falsy.correct_text(), Some("False"));
        assert_eq!(falsy.kind, QuestionType::TrueFalse);
    }
}
