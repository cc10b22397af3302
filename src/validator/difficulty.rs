use crate::constants::validator::DIFFICULTY_STEP_PENALTY;
use crate::data::{Difficulty, QuestionType};
use crate::utils::contains_word;

const LONG_WORD_CHARS: usize = 8;

const DEEP_VERBS: [&str; 4] = ["analyze", "evaluate", "create", "synthesize"];
const APPLIED_VERBS: [&str; 4] = ["apply", "compare", "contrast", "explain"];
const RECALL_VERBS: [&str; 3] = ["describe", "identify", "summarize"];

fn type_points(kind: QuestionType) -> u32 {
    match kind {
        QuestionType::TrueFalse => 0,
        QuestionType::Matching => 2,
        QuestionType::ShortAnswer => 3,
        QuestionType::MultipleChoice | QuestionType::FillInBlank | QuestionType::Mixed => 1,
    }
}

/// Difficulty implied by the stem's vocabulary, length, type and verbs.
pub fn estimate(stem: &str, kind: QuestionType) -> Difficulty {
    let words: Vec<&str> = stem.split_whitespace().collect();
    let mut points = type_points(kind);

    if !words.is_empty() {
        let long = words
            .iter()
            .filter(|word| word.chars().count() > LONG_WORD_CHARS)
            .count() as f32;
        let share = long / words.len() as f32;
        if share > 0.3 {
            points += 2;
        } else if share > 0.15 {
            points += 1;
        }
    }

    if words.len() > 25 {
        points += 2;
    } else if words.len() > 15 {
        points += 1;
    }

    let has_any = |verbs: &[&str]| verbs.iter().any(|verb| contains_word(stem, verb));
    if has_any(&DEEP_VERBS) {
        points += 3;
    } else if has_any(&APPLIED_VERBS) {
        points += 2;
    } else if has_any(&RECALL_VERBS) {
        points += 1;
    }

    match points {
        0..=2 => Difficulty::Easy,
        3..=5 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

/// How well the stated difficulty agrees with the estimate, 0 to 100.
pub fn consistency(stated: Difficulty, stem: &str, kind: QuestionType) -> f32 {
    let estimated = estimate(stem, kind);
    let gap = (stated.level() as f32 - estimated.level() as f32).abs();
    (100.0 - gap * DIFFICULTY_STEP_PENALTY).max(0.0)
}
