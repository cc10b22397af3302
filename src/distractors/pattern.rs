use rand::Rng;
use rand::seq::IndexedRandom;

use crate::constants::distractors::{MIN_MUTATION_CHARS, PATTERN_CONFIDENCE, PATTERN_SCORE};
use crate::data::{CandidateSource, DistractorCandidate};
use crate::utils::ends_with_ignore_ascii_case;

/// Ending swaps that produce plausible misspellings.
const SPELLING_VARIATIONS: &[(&str, &[&str])] = &[
    ("tion", &["sion", "cion"]),
    ("ance", &["ence"]),
    ("ant", &["ent"]),
    ("ible", &["able"]),
    ("ize", &["ise"]),
    ("or", &["er"]),
    ("phy", &["fee", "fi"]),
    ("ly", &["ley", "li"]),
];

/// Near-homophone substitutions, tried in order.
const PHONETIC_SUBSTITUTIONS: &[(&str, &str)] = &[
    ("ph", "f"),
    ("f", "ph"),
    ("c", "k"),
    ("k", "c"),
    ("ei", "ie"),
    ("ie", "ei"),
    ("ou", "ow"),
    ("ow", "ou"),
    ("i", "y"),
    ("y", "i"),
    ("s", "z"),
    ("z", "s"),
];

/// Swap the first matching ending for one of its variations.
pub fn spelling_variation<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Option<String> {
    for (ending, variations) in SPELLING_VARIATIONS {
        if ends_with_ignore_ascii_case(word, ending) {
            let variation = variations.choose(rng)?;
            let stem = &word[..word.len() - ending.len()];
            return Some(format!("{stem}{variation}"));
        }
    }
    None
}

/// Apply the first applicable near-homophone substitution, keeping the
/// original word's per-position capitalization.
pub fn phonetic_variation(word: &str) -> Option<String> {
    let lowered = word.to_lowercase();
    PHONETIC_SUBSTITUTIONS
        .iter()
        .find(|(original, _)| lowered.contains(original))
        .map(|(original, replacement)| {
            let replaced = lowered.replacen(original, replacement, 1);
            match_capitalization(&replaced, word)
        })
}

/// Uppercase each character whose position is uppercase in `original`.
pub fn match_capitalization(word: &str, original: &str) -> String {
    let mut pattern = original.chars();
    word.chars()
        .map(|ch| match pattern.next() {
            Some(reference) if reference.is_uppercase() => ch.to_uppercase().collect::<String>(),
            _ => ch.to_lowercase().collect::<String>(),
        })
        .collect()
}

/// One random adjacent transpose, interior deletion, or letter duplication.
///
/// Words shorter than three characters are left alone.
pub fn orthographic_variation<R: Rng + ?Sized>(word: &str, rng: &mut R) -> Option<String> {
    let chars: Vec<char> = word.chars().collect();
    let len = chars.len();
    if len < MIN_MUTATION_CHARS {
        return None;
    }
    let mut variations: Vec<String> = Vec::new();
    if len > 3 {
        for i in 0..len - 1 {
            let mut swapped = chars.clone();
            swapped.swap(i, i + 1);
            variations.push(swapped.into_iter().collect());
        }
    }
    if len > 4 {
        for i in 1..len - 1 {
            let mut shortened = chars.clone();
            shortened.remove(i);
            variations.push(shortened.into_iter().collect());
        }
    }
    for i in 1..len {
        let mut doubled = chars.clone();
        doubled.insert(i, chars[i]);
        variations.push(doubled.into_iter().collect());
    }
    variations.retain(|variation| variation != word);
    variations.choose(rng).cloned()
}

/// At most one spelling, one phonetic, and one orthographic variant of `answer`.
pub fn generate<R: Rng + ?Sized>(answer: &str, rng: &mut R) -> Vec<DistractorCandidate> {
    let answer = answer.trim();
    let variants = [
        spelling_variation(answer, rng),
        phonetic_variation(answer),
        orthographic_variation(answer, rng),
    ];
    let mut candidates: Vec<DistractorCandidate> = Vec::new();
    for variant in variants.into_iter().flatten() {
        if variant == answer || candidates.iter().any(|seen| seen.text == variant) {
            continue;
        }
        candidates.push(DistractorCandidate::new(
            variant,
            PATTERN_SCORE,
            CandidateSource::Pattern,
            PATTERN_CONFIDENCE,
        ));
    }
    candidates
}
