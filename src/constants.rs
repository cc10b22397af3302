/// Constants used by the entity and knowledge extractors.
pub mod extraction {
    /// Minimum character count for a span to be kept as an entity.
    pub const MIN_ENTITY_CHARS: usize = 3;
    /// Sentences with this many characters or fewer are skipped by the knowledge extractor.
    pub const MIN_SENTENCE_CHARS: usize = 15;
    /// Minimum subject length for a knowledge item.
    pub const MIN_SUBJECT_CHARS: usize = 3;
    /// Minimum content length for a knowledge item.
    pub const MIN_CONTENT_CHARS: usize = 5;
    /// Confidence every knowledge item starts from.
    pub const BASE_CONFIDENCE: f32 = 0.5;
    /// Content longer than this earns the first length bonus.
    pub const CONTENT_BONUS_SHORT_CHARS: usize = 20;
    /// Content longer than this earns the second length bonus.
    pub const CONTENT_BONUS_LONG_CHARS: usize = 40;
}

/// Constants used by the distractor engine and its strategies.
pub mod distractors {
    /// Default number of distractors requested per question.
    pub const DEFAULT_NUM_DISTRACTORS: usize = 3;
    /// Maximum same-category spans sampled by the heuristic strategy.
    pub const HEURISTIC_SAMPLES: usize = 2;
    /// Answers shorter than this (in chars) skip orthographic mutation.
    pub const MIN_MUTATION_CHARS: usize = 3;
    /// Similarity below this is treated as unrelated.
    pub const SEMANTIC_MINIMUM: f32 = 0.1;
    /// Similarity above this is treated as a paraphrase of the answer.
    pub const SEMANTIC_TOO_SIMILAR: f32 = 0.85;
    /// Similarity the semantic strategy ranks candidates towards.
    pub const SEMANTIC_IDEAL: f32 = 0.3;
    /// Upper bound on phrases extracted from context for embedding.
    pub const MAX_SEMANTIC_CANDIDATES: usize = 50;
    /// Score attached to domain-pool candidates.
    pub const DOMAIN_SCORE: f32 = 0.5;
    /// Confidence attached to domain-pool candidates.
    pub const DOMAIN_CONFIDENCE: f32 = 0.7;
    /// Plausibility awarded when candidate and answer lengths differ by at most 3 chars.
    pub const PLAUSIBLE_CLOSE_LENGTH_BONUS: f32 = 0.3;
    /// Plausibility awarded when lengths differ by at most 6 chars.
    pub const PLAUSIBLE_NEAR_LENGTH_BONUS: f32 = 0.1;
    /// Plausibility awarded for an equal word count.
    pub const PLAUSIBLE_WORD_COUNT_BONUS: f32 = 0.2;
    /// Plausibility awarded when both start upper case or both start lower case.
    pub const PLAUSIBLE_CASE_BONUS: f32 = 0.2;
    /// Plausibility awarded when character-set overlap lies in the plausible band.
    pub const PLAUSIBLE_OVERLAP_BONUS: f32 = 0.3;
    /// Lower bound of the plausible character-set overlap band.
    pub const PLAUSIBLE_OVERLAP_MIN: f32 = 0.2;
    /// Upper bound of the plausible character-set overlap band.
    pub const PLAUSIBLE_OVERLAP_MAX: f32 = 0.7;
    /// Penalty for candidates shorter than 3 or longer than 30 chars.
    pub const IMPLAUSIBLE_LENGTH_PENALTY: f32 = 0.5;
    /// Similarity a well-chosen distractor set averages against its answer.
    pub const QUALITY_IDEAL_SIMILARITY: f32 = 0.4;
    /// Quality reported when no similarity model can judge a distractor set.
    pub const NEUTRAL_QUALITY: f32 = 0.5;
    /// Confidence attached to heuristic candidates.
    pub const HEURISTIC_CONFIDENCE: f32 = 0.7;
    /// Score attached to pattern candidates.
    pub const PATTERN_SCORE: f32 = 0.3;
    /// Confidence attached to pattern candidates.
    pub const PATTERN_CONFIDENCE: f32 = 0.6;
    /// Confidence attached to generic fallback candidates.
    pub const GENERIC_CONFIDENCE: f32 = 0.1;
    /// Confidence assigned to semantic candidates above the ideal similarity.
    pub const SEMANTIC_HIGH_CONFIDENCE: f32 = 0.9;
}

/// Constants used by the question assembler.
pub mod assembler {
    /// Number of options on a multiple-choice question.
    pub const OPTION_COUNT: usize = 4;
    /// Phrases with more words than this collapse to a single salient token.
    pub const MAX_OPTION_WORDS: usize = 2;
    /// Hard cap on option length in characters.
    pub const MAX_OPTION_CHARS: usize = 24;
    /// Short tokens used to backfill options when too few distinct ones remain.
    pub const FALLBACK_TOKENS: &[&str] = &[
        "Alpha", "Beta", "Gamma", "Delta", "Sigma", "Omega", "Kappa", "Theta", "Zeta", "Eta",
        "Iota",
    ];
    /// Suffix markers used to synthesize variants of the correct answer.
    pub const VARIANT_MARKERS: &[&str] = &["X", "Pri", "Max", "Pro"];
    /// Option text used when the correct answer normalizes to nothing.
    pub const EMPTY_ANSWER_PLACEHOLDER: &str = "Unspecified";
    /// Category assigned when nothing more specific is known.
    pub const DEFAULT_CATEGORY: &str = "general";
}

/// Constants used by the quality validator.
pub mod validator {
    /// Weight of the grammar score in the overall blend.
    pub const GRAMMAR_WEIGHT: f32 = 0.25;
    /// Weight of the clarity score in the overall blend.
    pub const CLARITY_WEIGHT: f32 = 0.25;
    /// Weight of the educational score in the overall blend.
    pub const EDUCATIONAL_WEIGHT: f32 = 0.25;
    /// Weight of the distractor score in the overall blend.
    pub const DISTRACTOR_WEIGHT: f32 = 0.15;
    /// Weight of the difficulty-consistency score in the overall blend.
    pub const DIFFICULTY_WEIGHT: f32 = 0.10;
    /// Penalty per grammar pattern hit.
    pub const GRAMMAR_PATTERN_PENALTY: f32 = 5.0;
    /// Penalty for a stem without a terminal question mark.
    pub const MISSING_QUESTION_MARK_PENALTY: f32 = 10.0;
    /// Penalty for a stem that does not start with a capital letter.
    pub const CAPITALIZATION_PENALTY: f32 = 5.0;
    /// Penalty for critical clarity findings.
    pub const CRITICAL_CLARITY_PENALTY: f32 = 15.0;
    /// Penalty for other clarity findings.
    pub const CLARITY_PENALTY: f32 = 8.0;
    /// Penalty for stems that are too long or too short.
    pub const STEM_LENGTH_PENALTY: f32 = 10.0;
    /// Stems with more words than this are flagged as too long.
    pub const MAX_STEM_WORDS: usize = 50;
    /// Stems with fewer words than this are flagged as too short.
    pub const MIN_STEM_WORDS: usize = 5;
    /// Penalty when option lengths diverge from the correct answer.
    pub const LENGTH_DISPARITY_PENALTY: f32 = 15.0;
    /// Relative word-count gap above which options count as unbalanced.
    pub const LENGTH_DISPARITY_RATIO: f32 = 0.5;
    /// Penalty per distractor worded as obviously wrong.
    pub const OBVIOUS_DISTRACTOR_PENALTY: f32 = 10.0;
    /// Penalty when options disagree on a/an agreement with the stem.
    pub const ARTICLE_MISMATCH_PENALTY: f32 = 8.0;
    /// Penalty per distractor sharing too many words with the correct answer.
    pub const OVERLAP_PENALTY: f32 = 12.0;
    /// Share of correct-answer words a distractor may repeat before it is penalized.
    pub const OVERLAP_RATIO: f32 = 0.7;
    /// Points lost per level of difference between stated and estimated difficulty.
    pub const DIFFICULTY_STEP_PENALTY: f32 = 25.0;
    /// Maximum number of recommendations carried on a batch report.
    pub const MAX_RECOMMENDATIONS: usize = 20;
    /// Issue category label for grammar findings.
    pub const CATEGORY_GRAMMAR: &str = "Grammar";
    /// Issue category label for clarity findings.
    pub const CATEGORY_CLARITY: &str = "Clarity";
    /// Issue category label for distractor findings.
    pub const CATEGORY_DISTRACTORS: &str = "Distractors";
}

/// Constants used by the end-to-end pipeline.
pub mod pipeline {
    /// Default number of questions requested.
    pub const DEFAULT_QUESTION_COUNT: usize = 25;
    /// Sentences at or below this length are ignored by the templated fallback.
    pub const MIN_TEMPLATED_SENTENCE_CHARS: usize = 20;
    /// Minimum length of a key term used by the key-term fallback.
    pub const MIN_KEY_TERM_CHARS: usize = 4;
    /// Maximum number of key terms considered by the key-term fallback.
    pub const MAX_KEY_TERMS: usize = 10;
    /// Blank marker inserted into fill-in-the-blank stems.
    pub const BLANK: &str = "_____";
}
