use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::constants::distractors::{
    HEURISTIC_CONFIDENCE, IMPLAUSIBLE_LENGTH_PENALTY, PLAUSIBLE_CASE_BONUS,
    PLAUSIBLE_CLOSE_LENGTH_BONUS, PLAUSIBLE_NEAR_LENGTH_BONUS, PLAUSIBLE_OVERLAP_BONUS,
    PLAUSIBLE_OVERLAP_MAX, PLAUSIBLE_OVERLAP_MIN, PLAUSIBLE_WORD_COUNT_BONUS,
};
use crate::data::{CandidateSource, DistractorCandidate};
use crate::entities::EntityExtractor;

/// Shared distinct lowercase characters over all distinct characters of both texts.
pub fn char_set_similarity(a: &str, b: &str) -> f32 {
    let left: BTreeSet<char> = a.to_lowercase().chars().collect();
    let right: BTreeSet<char> = b.to_lowercase().chars().collect();
    let union = left.union(&right).count();
    if left.is_empty() || right.is_empty() || union == 0 {
        return 0.0;
    }
    left.intersection(&right).count() as f32 / union as f32
}

/// How plausible `candidate` looks next to `answer`, never below zero.
///
/// Rewards a similar length, the same word count, the same leading case, and
/// a character overlap that is related without being a near copy. Very short
/// or very long candidates are penalized.
pub fn score_candidate(candidate: &str, answer: &str) -> f32 {
    let candidate_chars = candidate.chars().count();
    let answer_chars = answer.chars().count();
    let mut score = 0.0;

    let length_gap = candidate_chars.abs_diff(answer_chars);
    if length_gap <= 3 {
        score += PLAUSIBLE_CLOSE_LENGTH_BONUS;
    } else if length_gap <= 6 {
        score += PLAUSIBLE_NEAR_LENGTH_BONUS;
    }
    if candidate.split_whitespace().count() == answer.split_whitespace().count() {
        score += PLAUSIBLE_WORD_COUNT_BONUS;
    }
    let leading_upper = |text: &str| text.chars().next().is_some_and(char::is_uppercase);
    if leading_upper(candidate) == leading_upper(answer) {
        score += PLAUSIBLE_CASE_BONUS;
    }
    let overlap = char_set_similarity(candidate, answer);
    if (PLAUSIBLE_OVERLAP_MIN..=PLAUSIBLE_OVERLAP_MAX).contains(&overlap) {
        score += PLAUSIBLE_OVERLAP_BONUS;
    }
    if !(3..=30).contains(&candidate_chars) {
        score -= IMPLAUSIBLE_LENGTH_PENALTY;
    }
    f32::max(score, 0.0)
}

/// Up to `samples` entities from the context that share the answer's
/// category, most plausible first. Equally plausible entities are ordered
/// by `rng`; entities scoring zero are dropped.
pub fn generate<R: Rng + ?Sized>(
    extractor: &EntityExtractor,
    answer: &str,
    context: &str,
    samples: usize,
    rng: &mut R,
) -> Vec<DistractorCandidate> {
    if context.trim().is_empty() {
        return Vec::new();
    }
    let entities = extractor.extract(context);
    let category = extractor.infer_category(answer, &entities);
    let Some(values) = entities.get(&category) else {
        return Vec::new();
    };
    let mut pool: Vec<&String> = values
        .iter()
        .filter(|value| !value.eq_ignore_ascii_case(answer))
        .collect();
    pool.shuffle(rng);

    let mut scored: Vec<(f32, &String)> = pool
        .into_iter()
        .map(|value| (score_candidate(value, answer), value))
        .filter(|(score, _)| *score > 0.0)
        .collect();
    scored.sort_by(|(left, _), (right, _)| right.total_cmp(left));
    scored
        .into_iter()
        .take(samples)
        .map(|(score, value)| {
            DistractorCandidate::new(
                value.as_str(),
                score,
                CandidateSource::Heuristic,
                HEURISTIC_CONFIDENCE,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn samples_same_category_entities() {
        let extractor = EntityExtractor::default();
        let context = "Albert Einstein and Niels Bohr argued with Marie Curie about physics.";
        let mut rng = StdRng::seed_from_u64(5);
        let picks = generate(&extractor, "Albert Einstein", context, 2, &mut rng);
        assert_eq!(picks.len(), 2);
        for pick in &picks {
            assert_ne!(pick.text, "Albert Einstein");
            assert_eq!(pick.source, CandidateSource::Heuristic);
            assert!(pick.score > 0.0);
        }
    }

    #[test]
    fn plausibility_rewards_shape_and_partial_overlap() {
        // 5 chars apart, same word count and case, 8 of 12 distinct chars shared.
        let close = score_candidate("Niels Bohr", "Albert Einstein");
        assert!((close - 0.8).abs() < 1e-6, "{close}");

        assert_eq!(score_candidate("ab", "Router"), 0.0);
        let long = "An Extraordinarily Long Candidate Phrase";
        assert!(score_candidate(long, "Router") < score_candidate("Switch", "Router"));
        assert!((char_set_similarity("abc", "ABD") - 0.5).abs() < 1e-6);
        assert_eq!(char_set_similarity("", "abc"), 0.0);
    }

    #[test]
    fn most_plausible_entities_come_first() {
        let extractor = EntityExtractor::default();
        let context =
            "Isaac Newton met Bo Li, Alexander Graham Bell, and Marie Curie at the fair.";
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picks = generate(&extractor, "Niels Bohr", context, 5, &mut rng);
            assert!(!picks.is_empty());
            assert!(
                picks
                    .windows(2)
                    .all(|pair| pair[0].score >= pair[1].score)
            );
            assert!(picks.iter().all(|pick| pick.score > 0.0));
        }
    }

    #[test]
    fn empty_context_contributes_nothing() {
        let extractor = EntityExtractor::default();
        let mut rng = StdRng::seed_from_u64(5);
        assert!(generate(&extractor, "Photosynthesis", "", 2, &mut rng).is_empty());
    }

    #[test]
    fn only_the_answer_in_its_category_yields_nothing() {
        let extractor = EntityExtractor::default();
        let mut rng = StdRng::seed_from_u64(5);
        let picks = generate(&extractor, "router", "The router failed.", 2, &mut rng);
        assert!(picks.is_empty());
    }
}
