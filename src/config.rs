use serde::{Deserialize, Serialize};

use crate::constants::assembler::{MAX_OPTION_CHARS, MAX_OPTION_WORDS, OPTION_COUNT};
use crate::constants::distractors::{
    DEFAULT_NUM_DISTRACTORS, HEURISTIC_SAMPLES, MAX_SEMANTIC_CANDIDATES, SEMANTIC_IDEAL,
    SEMANTIC_MINIMUM, SEMANTIC_TOO_SIMILAR,
};
use crate::constants::extraction::{MIN_ENTITY_CHARS, MIN_SENTENCE_CHARS};
use crate::constants::validator::{
    CLARITY_WEIGHT, DIFFICULTY_WEIGHT, DISTRACTOR_WEIGHT, EDUCATIONAL_WEIGHT, GRAMMAR_WEIGHT,
    MAX_RECOMMENDATIONS,
};
use crate::errors::QuizError;
use crate::types::DomainName;

/// Controls the entity and knowledge extraction passes.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Sentences with this many characters or fewer are ignored by the knowledge extractor.
    pub min_sentence_chars: usize,
    /// Entity spans shorter than this are discarded.
    pub min_entity_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_sentence_chars: MIN_SENTENCE_CHARS,
            min_entity_chars: MIN_ENTITY_CHARS,
        }
    }
}

/// Similarity band used by the semantic distractor strategy.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SemanticThresholds {
    /// Candidates at or below this similarity are discarded as unrelated.
    pub minimum: f32,
    /// Candidates at or above this similarity are discarded as paraphrases.
    pub too_similar: f32,
    /// Target similarity; candidates are ranked by their distance to it.
    pub ideal: f32,
}

impl Default for SemanticThresholds {
    fn default() -> Self {
        Self {
            minimum: SEMANTIC_MINIMUM,
            too_similar: SEMANTIC_TOO_SIMILAR,
            ideal: SEMANTIC_IDEAL,
        }
    }
}

/// Selects which strategies the distractor engine runs, and in what priority.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EngineVariant {
    /// Heuristic then pattern.
    Basic,
    /// Semantic, domain, heuristic, then pattern.
    #[default]
    Hybrid,
}

/// Controls distractor generation.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DistractorConfig {
    /// Number of distractors requested per question; one less than
    /// [`AssemblerConfig::option_count`].
    pub num_distractors: usize,
    /// Maximum same-category spans sampled by the heuristic strategy.
    pub heuristic_samples: usize,
    /// Similarity band for the semantic strategy.
    pub semantic: SemanticThresholds,
    /// Maximum number of context phrases embedded per answer.
    pub max_semantic_candidates: usize,
    /// Strategy plan used by the engine.
    pub variant: EngineVariant,
}

impl Default for DistractorConfig {
    fn default() -> Self {
        Self {
            num_distractors: DEFAULT_NUM_DISTRACTORS,
            heuristic_samples: HEURISTIC_SAMPLES,
            semantic: SemanticThresholds::default(),
            max_semantic_candidates: MAX_SEMANTIC_CANDIDATES,
            variant: EngineVariant::default(),
        }
    }
}

/// Controls option normalization and question assembly.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblerConfig {
    /// Number of options on each assembled question.
    pub option_count: usize,
    /// Phrases with more words than this collapse to one salient token.
    pub max_words: usize,
    /// Hard cap on option length, in characters.
    pub max_chars: usize,
}

impl Default for AssemblerConfig {
    fn default() -> Self {
        Self {
            option_count: OPTION_COUNT,
            max_words: MAX_OPTION_WORDS,
            max_chars: MAX_OPTION_CHARS,
        }
    }
}

/// Relative weights of the per-question validation axes.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScoreWeights {
    /// Grammar axis weight.
    pub grammar: f32,
    /// Clarity axis weight.
    pub clarity: f32,
    /// Educational-value axis weight.
    pub educational: f32,
    /// Distractor-quality axis weight.
    pub distractors: f32,
    /// Difficulty-consistency axis weight.
    pub difficulty: f32,
}

impl ScoreWeights {
    /// Sum of all weights.
    pub fn total(&self) -> f32 {
        self.grammar + self.clarity + self.educational + self.distractors + self.difficulty
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            grammar: GRAMMAR_WEIGHT,
            clarity: CLARITY_WEIGHT,
            educational: EDUCATIONAL_WEIGHT,
            distractors: DISTRACTOR_WEIGHT,
            difficulty: DIFFICULTY_WEIGHT,
        }
    }
}

/// Controls the quality validator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Weights used to blend the axis scores into the overall score.
    pub weights: ScoreWeights,
    /// Cap on recommendations carried by a batch report.
    pub max_recommendations: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            max_recommendations: MAX_RECOMMENDATIONS,
        }
    }
}

/// Top-level configuration for `QuizPipeline`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// RNG seed; `None` seeds from the operating system.
    pub seed: Option<u64>,
    /// Extraction settings.
    pub extraction: ExtractionConfig,
    /// Distractor settings.
    pub distractors: DistractorConfig,
    /// Assembly settings.
    pub assembler: AssemblerConfig,
    /// Validator settings.
    pub validator: ValidatorConfig,
    /// Run the quality validator over generated questions.
    pub validate: bool,
    /// Explicit subject domain; inferred from the text when unset.
    pub domain: Option<DomainName>,
}

impl PipelineConfig {
    /// Load a config from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, QuizError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no pipeline could honor.
    pub fn validate(&self) -> Result<(), QuizError> {
        if self.assembler.option_count < 2 {
            return Err(QuizError::Configuration(format!(
                "option_count must be at least 2 (got {})",
                self.assembler.option_count
            )));
        }
        if self.distractors.num_distractors + 1 != self.assembler.option_count {
            return Err(QuizError::Configuration(format!(
                "num_distractors ({}) must be one less than option_count ({})",
                self.distractors.num_distractors, self.assembler.option_count
            )));
        }
        if self.assembler.max_chars == 0 || self.assembler.max_words == 0 {
            return Err(QuizError::Configuration(
                "max_chars and max_words must be positive".to_string(),
            ));
        }
        let band = self.distractors.semantic;
        for (name, value) in [
            ("minimum", band.minimum),
            ("too_similar", band.too_similar),
            ("ideal", band.ideal),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(QuizError::Configuration(format!(
                    "semantic.{name} must lie in [0, 1] (got {value})"
                )));
            }
        }
        if band.minimum >= band.too_similar {
            return Err(QuizError::Configuration(format!(
                "semantic.minimum ({}) must be below semantic.too_similar ({})",
                band.minimum, band.too_similar
            )));
        }
        let total = self.validator.weights.total();
        if (total - 1.0).abs() > 0.01 {
            return Err(QuizError::Configuration(format!(
                "validator weights must sum to 1.0 (got {total:.3})"
            )));
        }
        Ok(())
    }
}
