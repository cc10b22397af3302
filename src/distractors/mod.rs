//! Distractor generation: composable strategies merged in priority order.

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use rand::Rng;
use regex::Regex;
use tracing::debug;

use crate::config::{DistractorConfig, EngineVariant};
use crate::data::{DistractorCandidate, DistractorQuality};
use crate::entities::EntityExtractor;
use crate::types::AnswerText;

/// Domain vocabularies and pool sampling.
pub mod domain;
/// Templated last-resort distractors.
pub mod generic;
/// Same-category entity sampling.
pub mod heuristic;
/// Spelling, phonetic, and orthographic mutations.
pub mod pattern;
/// Embedding-ranked context phrases.
pub mod semantic;

pub use domain::{Domain, DomainVocabularies};
pub use semantic::{SimilarityModel, cosine_similarity, evaluate_quality};

/// A single candidate source the engine can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DistractorStrategy {
    /// Embedding-ranked context phrases.
    Semantic,
    /// Domain vocabulary pool.
    Domain,
    /// Same-category context entities.
    Heuristic,
    /// Answer mutations.
    Pattern,
}

impl EngineVariant {
    /// Strategies in merge priority order.
    pub fn plan(self) -> &'static [DistractorStrategy] {
        match self {
            EngineVariant::Basic => &[DistractorStrategy::Heuristic, DistractorStrategy::Pattern],
            EngineVariant::Hybrid => &[
                DistractorStrategy::Semantic,
                DistractorStrategy::Domain,
                DistractorStrategy::Heuristic,
                DistractorStrategy::Pattern,
            ],
        }
    }
}

static SINGLE_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]\d*$").expect("single-letter pattern compiles"));
static DIGITS_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("digit pattern compiles"));
static PUNCTUATION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\w\s]+$").expect("punctuation pattern compiles"));
static DOCUMENT_FRAGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:figure|table|page|section|chapter)\s*\d*$")
        .expect("fragment pattern compiles")
});

const MEANINGLESS_WORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
];

/// Whether a candidate is too degenerate to show as an option.
pub fn is_nonsensical(text: &str) -> bool {
    let text = text.trim();
    if text.chars().count() <= 2 {
        return true;
    }
    if SINGLE_LETTER.is_match(text)
        || DIGITS_ONLY.is_match(text)
        || PUNCTUATION_ONLY.is_match(text)
        || DOCUMENT_FRAGMENT.is_match(text)
    {
        return true;
    }
    MEANINGLESS_WORDS.contains(&text.to_lowercase().as_str())
}

/// Produces plausible wrong answers for a correct answer in context.
pub struct DistractorEngine {
    config: DistractorConfig,
    entities: EntityExtractor,
    domains: DomainVocabularies,
    model: Option<Arc<dyn SimilarityModel>>,
}

impl DistractorEngine {
    /// Engine without a similarity model; the semantic strategy stays silent.
    pub fn new(config: DistractorConfig) -> Self {
        Self {
            config,
            entities: EntityExtractor::default(),
            domains: DomainVocabularies::default(),
            model: None,
        }
    }

    /// Attach an embedding collaborator for the semantic strategy.
    pub fn with_similarity_model(mut self, model: Arc<dyn SimilarityModel>) -> Self {
        self.model = Some(model);
        self
    }

    /// Replace the entity extractor used by the heuristic strategy.
    pub fn with_entity_extractor(mut self, entities: EntityExtractor) -> Self {
        self.entities = entities;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &DistractorConfig {
        &self.config
    }

    /// Domain vocabularies used for pool sampling and inference.
    pub fn domains(&self) -> &DomainVocabularies {
        &self.domains
    }

    /// Mutable vocabularies, for registering custom domains.
    pub fn domains_mut(&mut self) -> &mut DomainVocabularies {
        &mut self.domains
    }

    /// Judge `distractors` for `answer` with the attached similarity model.
    ///
    /// Without a model the neutral quality is returned.
    pub fn evaluate_quality(&self, answer: &str, distractors: &[String]) -> DistractorQuality {
        evaluate_quality(self.model.as_deref(), answer, distractors)
    }

    /// `num_distractors` distractors from the configured plan.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        answer: &str,
        context: &str,
        domain: Option<&str>,
        rng: &mut R,
    ) -> Vec<AnswerText> {
        self.generate_n(answer, context, domain, self.config.num_distractors, rng)
    }

    /// Up to `count` distractors, none equal to `answer` ignoring case.
    pub fn generate_n<R: Rng + ?Sized>(
        &self,
        answer: &str,
        context: &str,
        domain: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<AnswerText> {
        self.ranked_candidates(answer, context, domain, count, rng)
            .into_iter()
            .map(|candidate| candidate.text)
            .collect()
    }

    /// Merged candidates, best first, at most `count` long.
    ///
    /// Strategy output is ordered by plan position then confidence. Duplicates,
    /// the answer itself, and nonsense are dropped before truncation, and
    /// generic templates fill any remaining gap.
    pub fn ranked_candidates<R: Rng + ?Sized>(
        &self,
        answer: &str,
        context: &str,
        domain: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<DistractorCandidate> {
        let answer = answer.trim();
        if count == 0 {
            return Vec::new();
        }
        let mut pooled: Vec<(usize, DistractorCandidate)> = Vec::new();
        for (position, strategy) in self.config.variant.plan().iter().enumerate() {
            let produced = self.run_strategy(*strategy, answer, context, domain, count, rng);
            debug!(
                "[quizgen:distractors] {:?} produced {} candidates for '{answer}'",
                strategy,
                produced.len()
            );
            pooled.extend(produced.into_iter().map(|candidate| (position, candidate)));
        }
        pooled.sort_by(|(left_pos, left), (right_pos, right)| {
            left_pos
                .cmp(right_pos)
                .then_with(|| right.confidence.total_cmp(&left.confidence))
        });

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(answer.to_lowercase());
        let mut selected: Vec<DistractorCandidate> = Vec::new();
        for (_, mut candidate) in pooled {
            candidate.text = candidate.text.trim().to_string();
            if is_nonsensical(&candidate.text) || !seen.insert(candidate.text.to_lowercase()) {
                continue;
            }
            selected.push(candidate);
            if selected.len() == count {
                return selected;
            }
        }

        let texts: Vec<String> = selected.iter().map(|candidate| candidate.text.clone()).collect();
        selected.extend(generic::fill(answer, &texts, count));
        selected
    }

    fn run_strategy<R: Rng + ?Sized>(
        &self,
        strategy: DistractorStrategy,
        answer: &str,
        context: &str,
        domain: Option<&str>,
        count: usize,
        rng: &mut R,
    ) -> Vec<DistractorCandidate> {
        match strategy {
            DistractorStrategy::Semantic => semantic::generate(
                self.model.as_deref(),
                answer,
                context,
                self.config.semantic,
                self.config.max_semantic_candidates,
                count,
            ),
            DistractorStrategy::Domain => {
                domain::generate(&self.domains, answer, context, domain, count, rng)
            }
            DistractorStrategy::Heuristic => heuristic::generate(
                &self.entities,
                answer,
                context,
                self.config.heuristic_samples,
                rng,
            ),
            DistractorStrategy::Pattern => pattern::generate(answer, rng),
        }
    }
}

impl Default for DistractorEngine {
    fn default() -> Self {
        Self::new(DistractorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CandidateSource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const ROUTER: &str =
        "A router is a networking device that forwards data packets between computer networks.";

    #[test]
    fn nonsense_filter_rejects_fragments() {
        for text in ["A", "B12", "42", "?!", "of", "Figure 3", "table", "  x "] {
            assert!(is_nonsensical(text), "{text} should be rejected");
        }
        for text in ["Router", "Data link", "TCP"] {
            assert!(!is_nonsensical(text), "{text} should be kept");
        }
    }

    #[test]
    fn plans_follow_variant_priority() {
        assert_eq!(
            EngineVariant::Basic.plan(),
            &[DistractorStrategy::Heuristic, DistractorStrategy::Pattern]
        );
        assert_eq!(EngineVariant::Hybrid.plan()[0], DistractorStrategy::Semantic);
    }

    #[test]
    fn router_gets_three_distinct_distractors() {
        let engine = DistractorEngine::default();
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let distractors = engine.generate("Router", ROUTER, None, &mut rng);
            assert_eq!(distractors.len(), 3);
            let lowered: HashSet<String> =
                distractors.iter().map(|text| text.to_lowercase()).collect();
            assert_eq!(lowered.len(), 3);
            assert!(!lowered.contains("router"));
        }
    }

    #[test]
    fn domain_candidates_outrank_pattern_candidates_in_hybrid() {
        let engine = DistractorEngine::default();
        let mut rng = StdRng::seed_from_u64(11);
        let ranked = engine.ranked_candidates("Router", ROUTER, None, 3, &mut rng);
        assert_eq!(ranked[0].source, CandidateSource::Domain);
    }

    #[test]
    fn basic_variant_ignores_domain_pools() {
        let engine = DistractorEngine::new(DistractorConfig {
            variant: EngineVariant::Basic,
            ..DistractorConfig::default()
        });
        let mut rng = StdRng::seed_from_u64(2);
        let ranked = engine.ranked_candidates("Router", ROUTER, Some("networking"), 3, &mut rng);
        assert!(ranked.iter().all(|candidate| candidate.source != CandidateSource::Domain));
    }

    #[test]
    fn quality_without_a_model_is_neutral() {
        let engine = DistractorEngine::default();
        let mut rng = StdRng::seed_from_u64(3);
        let distractors = engine.generate("Router", ROUTER, None, &mut rng);
        let quality = engine.evaluate_quality("Router", &distractors);
        assert_eq!(quality.overall_quality, 0.5);
        assert!(quality.avg_similarity.is_none());
    }

    #[test]
    fn zero_requested_returns_nothing() {
        let engine = DistractorEngine::default();
        let mut rng = StdRng::seed_from_u64(2);
        assert!(engine.generate_n("Router", ROUTER, None, 0, &mut rng).is_empty());
    }
}
