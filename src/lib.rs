#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Quiz assembly helpers: option normalization and letter assignment.
pub mod assembler;
/// Pipeline, extractor, distractor, and validator configuration.
pub mod config;
/// Centralized constants used across extraction, distractors, and validation.
pub mod constants;
/// Request-scoped source text store.
pub mod context;
/// Entity, knowledge, candidate, and question record types.
pub mod data;
/// Distractor engine and its generation strategies.
pub mod distractors;
/// Named-entity extraction over a pattern registry.
pub mod entities;
/// Reusable example runners shared by downstream crates.
pub mod example_apps;
/// Question categorization and difficulty heuristics.
pub mod heuristics;
/// Knowledge item extraction.
pub mod knowledge;
/// Named text-matcher registry.
pub mod patterns;
/// End-to-end quiz generation with an ordered fallback chain.
pub mod pipeline;
/// Seed question/answer pair contract and parsing.
pub mod seeds;
/// Input transports (filesystem today).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text normalization helpers.
pub mod utils;
/// Question quality scoring.
pub mod validator;

mod errors;

pub use assembler::QuestionAssembler;
pub use config::{
    AssemblerConfig, DistractorConfig, EngineVariant, ExtractionConfig, PipelineConfig,
    ScoreWeights, SemanticThresholds, ValidatorConfig,
};
pub use context::ContextStore;
pub use data::{
    CandidateSource, Difficulty, DistractorCandidate, DistractorQuality, EntityCategory,
    KnowledgeItem, KnowledgeType, Question, QuestionType, TextSpan,
};
pub use distractors::{Domain, DistractorEngine, SimilarityModel};
pub use entities::EntityExtractor;
pub use errors::QuizError;
pub use knowledge::KnowledgeExtractor;
pub use patterns::{KeywordMatcher, MatcherRegistry, RegexMatcher, TextMatcher};
pub use pipeline::{QuestionSource, QuizOutput, QuizPipeline};
pub use seeds::{RawSeedPair, RecordedSeeds, SeedPair, SeedSource, parse_seed_pairs};
pub use types::{
    AnswerText, DomainName, Embedding, IssueCategory, OptionLetter, OptionText, Sentence,
    SourceText, Subject,
};
pub use validator::{
    FleschReadability, PosTagger, QualityValidator, ReadabilityScorer, ValidationIssue,
    ValidationReport,
};
