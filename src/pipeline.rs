//! End-to-end quiz generation.
//!
//! Questions are drafted from an ordered list of [`QuestionSource`]s. Each
//! source only fills the slots earlier sources left open, answers are
//! deduplicated in one place, and every draft is rendered into the requested
//! [`QuestionType`] with distractors from the [`DistractorEngine`].

use std::collections::HashSet;
use std::fmt;
use std::sync::LazyLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::assembler::QuestionAssembler;
use crate::config::PipelineConfig;
use crate::constants::pipeline::{
    BLANK, MAX_KEY_TERMS, MIN_KEY_TERM_CHARS, MIN_TEMPLATED_SENTENCE_CHARS,
};
use crate::data::{Difficulty, KnowledgeItem, KnowledgeType, Question, QuestionType};
use crate::distractors::DistractorEngine;
use crate::entities::EntityExtractor;
use crate::errors::QuizError;
use crate::heuristics::{CategoryClassifier, difficulty_for_pair};
use crate::knowledge::KnowledgeExtractor;
use crate::seeds::{SeedSource, complete_pairs};
use crate::types::{AnswerText, Sentence};
use crate::utils::{sentences_longer_than, subject_to_answer};
use crate::validator::{QualityValidator, ValidationReport};

/// Where a draft question came from, in default priority order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    /// Question/answer pairs from an attached [`SeedSource`].
    Seeded,
    /// Facts mined by the [`KnowledgeExtractor`].
    Knowledge,
    /// Capitalized key terms blanked out of their sentence.
    KeyTerms,
    /// Longest word of each sentence blanked out.
    Templated,
}

impl QuestionSource {
    /// Seeded, then knowledge, key terms, and templated drafts.
    pub const DEFAULT_ORDER: [QuestionSource; 4] = [
        QuestionSource::Seeded,
        QuestionSource::Knowledge,
        QuestionSource::KeyTerms,
        QuestionSource::Templated,
    ];

    /// Stable snake_case label.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionSource::Seeded => "seeded",
            QuestionSource::Knowledge => "knowledge",
            QuestionSource::KeyTerms => "key_terms",
            QuestionSource::Templated => "templated",
        }
    }
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A question before it is rendered into a concrete shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// Source that produced the draft.
    pub source: QuestionSource,
    /// Multiple-choice stem.
    pub stem: String,
    /// Correct answer.
    pub answer: AnswerText,
    /// Declarative sentence that states the answer.
    pub statement: Sentence,
    /// Statement with the answer replaced by a blank, when it could be located.
    pub blanked: Option<String>,
    /// Stated difficulty.
    pub difficulty: Difficulty,
}

/// Generated questions and, when validation is enabled, their batch report.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizOutput {
    /// Generated questions, in draft order.
    pub questions: Vec<Question>,
    /// Batch report, when validation is enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ValidationReport>,
}

static KEY_TERM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][A-Za-z]+\b").expect("key term pattern compiles"));
static COPULA: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\b(?:is|are|was|were)\b")
        .case_insensitive(true)
        .build()
        .expect("copula pattern compiles")
});

const KEY_TERM_STOPWORDS: &[&str] = &[
    "the", "this", "that", "these", "those", "when", "where", "what", "which", "how", "why",
    "who", "there", "their", "they", "however", "also",
];

/// Replace the first occurrence of `answer` in `sentence` with a blank.
pub fn blank_out(sentence: &str, answer: &str) -> Option<String> {
    let answer = answer.trim();
    if answer.is_empty() {
        return None;
    }
    let word_edge = |ch: Option<char>| if ch.is_some_and(char::is_alphanumeric) { r"\b" } else { "" };
    let pattern = format!(
        "{}{}{}",
        word_edge(answer.chars().next()),
        regex::escape(answer),
        word_edge(answer.chars().last())
    );
    let matcher = RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .ok()?;
    let hit = matcher.find(sentence)?;
    Some(format!(
        "{}{BLANK}{}",
        &sentence[..hit.start()],
        &sentence[hit.end()..]
    ))
}

/// Turn a true statement into a false one by negating its first copula.
///
/// Copulas inside double-quoted text belong to the quotation and are skipped.
pub fn negate(statement: &str) -> String {
    let statement = statement.trim();
    let unquoted = COPULA
        .find_iter(statement)
        .find(|hit| statement[..hit.start()].matches('"').count() % 2 == 0);
    if let Some(hit) = unquoted {
        return format!(
            "{} not{}",
            &statement[..hit.end()],
            &statement[hit.end()..]
        );
    }
    let mut chars = statement.chars();
    let lowered: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    format!("It is false that {lowered}")
}

fn with_period(text: &str) -> String {
    let text = text.trim();
    if text.ends_with(['.', '!', '?']) {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

fn knowledge_stem(item: &KnowledgeItem) -> String {
    let content = item.content.trim_end_matches([',', ';', ':']).trim();
    match item.kind {
        KnowledgeType::Definition => format!("Which term is defined as {content}?"),
        KnowledgeType::Function => {
            format!("Which term is described by the function: {content}?")
        }
        KnowledgeType::Process => format!("Which process involves {content}?"),
        KnowledgeType::Characteristic => format!("Which term is characterized by {content}?"),
        KnowledgeType::Relationship => format!("Which term relates to {content}?"),
    }
}

fn completion_stem(blanked: &str) -> String {
    let body = blanked.trim().trim_end_matches(['.', '!', '?']);
    format!("Which term best fills the blank in \"{body}\"?")
}

/// End-to-end generator wiring extraction, distractors, assembly, and validation.
pub struct QuizPipeline {
    config: PipelineConfig,
    knowledge: KnowledgeExtractor,
    engine: DistractorEngine,
    assembler: QuestionAssembler,
    validator: QualityValidator,
    categories: CategoryClassifier,
    seeds: Option<Box<dyn SeedSource>>,
    order: Vec<QuestionSource>,
}

impl QuizPipeline {
    /// Pipeline with the built-in extractors and no seed source.
    pub fn new(config: PipelineConfig) -> Self {
        let entities = EntityExtractor::new(&config.extraction);
        Self {
            knowledge: KnowledgeExtractor::new(&config.extraction),
            engine: DistractorEngine::new(config.distractors.clone()).with_entity_extractor(entities),
            assembler: QuestionAssembler::new(config.assembler.clone()),
            validator: QualityValidator::new(config.validator.clone()),
            categories: CategoryClassifier::new(),
            seeds: None,
            order: QuestionSource::DEFAULT_ORDER.to_vec(),
            config,
        }
    }

    /// Consult `source` first for question/answer pairs.
    pub fn with_seed_source(mut self, source: Box<dyn SeedSource>) -> Self {
        self.seeds = Some(source);
        self
    }

    /// Replace the distractor engine, e.g. to attach a similarity model.
    pub fn with_distractor_engine(mut self, engine: DistractorEngine) -> Self {
        self.engine = engine;
        self
    }

    /// Replace the quality validator, e.g. to attach a tagger.
    pub fn with_validator(mut self, validator: QualityValidator) -> Self {
        self.validator = validator;
        self
    }

    /// Override the source priority. Sources not listed are skipped.
    pub fn with_source_order(mut self, order: Vec<QuestionSource>) -> Self {
        self.order = order;
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Sources consulted, in priority order.
    pub fn source_order(&self) -> &[QuestionSource] {
        &self.order
    }

    /// Generate with an RNG seeded from the config, or from the OS when unset.
    pub fn generate(
        &self,
        text: &str,
        count: usize,
        kind: QuestionType,
    ) -> Result<Vec<Question>, QuizError> {
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with_rng(text, count, kind, &mut rng)
    }

    /// Generate and, if `validate` is configured, attach a quality report.
    pub fn run(
        &self,
        text: &str,
        count: usize,
        kind: QuestionType,
    ) -> Result<QuizOutput, QuizError> {
        let questions = self.generate(text, count, kind)?;
        let report = self
            .config
            .validate
            .then(|| self.validator.validate_batch(&questions));
        Ok(QuizOutput { questions, report })
    }

    /// Generate up to `count` questions of `kind` from `text`.
    ///
    /// Blank input yields no questions. A failing seed source is logged and
    /// skipped; it only becomes an error when no local source produced a
    /// question either.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        text: &str,
        count: usize,
        kind: QuestionType,
        rng: &mut R,
    ) -> Result<Vec<Question>, QuizError> {
        if text.trim().is_empty() || count == 0 {
            return Ok(Vec::new());
        }

        let (drafts, seed_failure) = self.collect_drafts(text, count);
        if drafts.is_empty() {
            if let Some(reason) = seed_failure {
                return Err(QuizError::GenerationFailed {
                    reason: format!("seed source failed ({reason}) and no local source produced a question"),
                });
            }
            debug!("[quizgen:pipeline] no question could be drafted from the input");
            return Ok(Vec::new());
        }

        let questions: Vec<Question> = drafts
            .iter()
            .enumerate()
            .map(|(index, draft)| self.render(draft, kind.resolve(index), text, rng))
            .collect();
        info!(
            "[quizgen:pipeline] generated {} of {} requested {} questions",
            questions.len(),
            count,
            kind
        );
        Ok(questions)
    }

    /// Drafts from every source in priority order, deduplicated by answer.
    ///
    /// Also returns the seed source failure, if one occurred.
    pub fn collect_drafts(&self, text: &str, count: usize) -> (Vec<Draft>, Option<String>) {
        let mut drafts = Vec::new();
        let mut used: HashSet<String> = HashSet::new();
        let mut seed_failure = None;

        for source in &self.order {
            if drafts.len() >= count {
                break;
            }
            let remaining = count - drafts.len();
            let produced = match self.drafts_from(*source, text, remaining) {
                Ok(produced) => produced,
                Err(err) => {
                    warn!("[quizgen:pipeline] {source} source unavailable: {err}");
                    seed_failure = Some(err.to_string());
                    continue;
                }
            };
            let before = drafts.len();
            for draft in produced {
                if drafts.len() >= count {
                    break;
                }
                if draft.answer.trim().is_empty() || draft.stem.trim().is_empty() {
                    continue;
                }
                if used.insert(draft.answer.to_lowercase()) {
                    drafts.push(draft);
                }
            }
            debug!(
                "[quizgen:pipeline] {source} source contributed {} drafts",
                drafts.len() - before
            );
        }
        (drafts, seed_failure)
    }

    /// Drafts from one source, at most `limit` of them.
    pub fn drafts_from(
        &self,
        source: QuestionSource,
        text: &str,
        limit: usize,
    ) -> Result<Vec<Draft>, QuizError> {
        let drafts = match source {
            QuestionSource::Seeded => self.seeded_drafts(text, limit)?,
            QuestionSource::Knowledge => self.knowledge_drafts(text),
            QuestionSource::KeyTerms => key_term_drafts(text),
            QuestionSource::Templated => templated_drafts(text),
        };
        Ok(drafts)
    }

    fn seeded_drafts(&self, text: &str, limit: usize) -> Result<Vec<Draft>, QuizError> {
        let Some(seeds) = &self.seeds else {
            return Ok(Vec::new());
        };
        let raw = seeds.fetch(text, limit)?;
        let drafts = complete_pairs(raw)
            .into_iter()
            .map(|pair| {
                let question = pair.question.trim_end_matches('?').trim();
                let statement = format!("The answer to \"{question}?\" is {}.", pair.answer);
                Draft {
                    source: QuestionSource::Seeded,
                    difficulty: difficulty_for_pair(&pair.question, &pair.answer),
                    blanked: Some(format!("{question}? {BLANK}")),
                    stem: pair.question,
                    answer: pair.answer,
                    statement,
                }
            })
            .collect();
        Ok(drafts)
    }

    fn knowledge_drafts(&self, text: &str) -> Vec<Draft> {
        self.knowledge
            .extract(text)
            .into_iter()
            .map(|item| {
                let answer = subject_to_answer(&item.subject);
                let statement = with_period(&item.source_sentence);
                Draft {
                    source: QuestionSource::Knowledge,
                    stem: knowledge_stem(&item),
                    blanked: blank_out(&statement, &answer),
                    difficulty: Difficulty::from_confidence(item.confidence),
                    answer,
                    statement,
                }
            })
            .collect()
    }

    fn render<R: Rng + ?Sized>(
        &self,
        draft: &Draft,
        kind: QuestionType,
        context: &str,
        rng: &mut R,
    ) -> Question {
        let mut question = match kind {
            QuestionType::TrueFalse => {
                let is_true = rng.random_bool(0.5);
                let statement = if is_true {
                    draft.statement.clone()
                } else {
                    with_period(&negate(draft.statement.trim_end_matches(['.', '!', '?'])))
                };
                self.assembler.assemble_true_false(&statement, is_true)
            }
            QuestionType::FillInBlank => {
                let blanked = draft
                    .blanked
                    .clone()
                    .unwrap_or_else(|| format!("{} {BLANK}", draft.stem));
                let distractors = self.distractors(&draft.answer, context, rng);
                let mut question = self.assembler.assemble(
                    &format!("Fill in the blank: {blanked}"),
                    &draft.answer,
                    &distractors,
                    rng,
                );
                question.kind = QuestionType::FillInBlank;
                question
            }
            _ => {
                let distractors = self.distractors(&draft.answer, context, rng);
                self.assembler
                    .assemble(&draft.stem, &draft.answer, &distractors, rng)
            }
        };
        question.difficulty = draft.difficulty;
        question.category = self
            .categories
            .classify(&format!("{} {}", draft.statement, draft.answer))
            .to_string();
        question
    }

    fn distractors<R: Rng + ?Sized>(
        &self,
        answer: &str,
        context: &str,
        rng: &mut R,
    ) -> Vec<AnswerText> {
        let wanted = self.config.distractors.num_distractors;
        self.engine
            .generate_n(answer, context, self.config.domain.as_deref(), wanted, rng)
    }
}

impl Default for QuizPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

fn is_key_term(word: &str) -> bool {
    word.chars().count() >= MIN_KEY_TERM_CHARS
        && !KEY_TERM_STOPWORDS.contains(&word.to_lowercase().as_str())
}

fn key_term_drafts(text: &str) -> Vec<Draft> {
    let sentences = sentences_longer_than(text, MIN_TEMPLATED_SENTENCE_CHARS);
    let mut seen: HashSet<String> = HashSet::new();
    let mut drafts = Vec::new();
    for sentence in &sentences {
        for hit in KEY_TERM.find_iter(sentence) {
            if drafts.len() >= MAX_KEY_TERMS {
                return drafts;
            }
            let term = hit.as_str();
            if !is_key_term(term) || !seen.insert(term.to_lowercase()) {
                continue;
            }
            let Some(blanked) = blank_out(sentence, term) else {
                continue;
            };
            drafts.push(Draft {
                source: QuestionSource::KeyTerms,
                stem: completion_stem(&blanked),
                answer: term.to_string(),
                statement: sentence.clone(),
                blanked: Some(blanked),
                difficulty: Difficulty::Medium,
            });
        }
    }
    drafts
}

fn templated_drafts(text: &str) -> Vec<Draft> {
    let mut drafts = Vec::new();
    for sentence in sentences_longer_than(text, MIN_TEMPLATED_SENTENCE_CHARS) {
        let longest = sentence
            .split(|ch: char| !ch.is_alphanumeric())
            .filter(|word| word.chars().count() >= MIN_KEY_TERM_CHARS)
            .fold(None::<&str>, |best, word| match best {
                Some(current) if current.chars().count() >= word.chars().count() => Some(current),
                _ => Some(word),
            });
        let Some(word) = longest else {
            continue;
        };
        let Some(blanked) = blank_out(&sentence, word) else {
            continue;
        };
        drafts.push(Draft {
            source: QuestionSource::Templated,
            stem: completion_stem(&blanked),
            answer: word.to_string(),
            blanked: Some(blanked),
            statement: sentence.clone(),
            difficulty: Difficulty::Easy,
        });
    }
    drafts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::{RawSeedPair, RecordedSeeds};

    const ROUTER_TEXT: &str = "A router is a networking device that forwards data packets between computer networks.";

    struct FailingSeeds;

    impl SeedSource for FailingSeeds {
        fn fetch(&self, _context: &str, _count: usize) -> Result<Vec<RawSeedPair>, QuizError> {
            Err(QuizError::SeedSourceUnavailable {
                reason: "timed out".to_string(),
            })
        }
    }

    fn seeded_pipeline() -> QuizPipeline {
        QuizPipeline::new(PipelineConfig {
            seed: Some(7),
            ..PipelineConfig::default()
        })
    }

    #[test]
    fn blank_out_respects_word_edges() {
        assert_eq!(
            blank_out("A router forwards packets.", "Router").as_deref(),
            Some("A _____ forwards packets.")
        );
        assert_eq!(blank_out("Routers forward packets.", "Router"), None);
        assert_eq!(blank_out("Anything", "  "), None);
    }

    #[test]
    fn negation_targets_the_first_copula() {
        assert_eq!(negate("A router is a device"), "A router is not a device");
        assert_eq!(negate("Routers forward packets"), "It is false that routers forward packets");
    }

    #[test]
    fn negation_skips_copulas_inside_quotes() {
        assert_eq!(
            negate("The answer to \"What is the transport protocol?\" is TCP"),
            "The answer to \"What is the transport protocol?\" is not TCP"
        );
        assert_eq!(
            negate("He said \"it is\" twice"),
            "It is false that he said \"it is\" twice"
        );
    }

    #[test]
    fn false_seeded_statements_negate_the_answer_clause() {
        let pipeline = QuizPipeline::new(PipelineConfig {
            seed: Some(1),
            ..PipelineConfig::default()
        })
        .with_seed_source(Box::new(RecordedSeeds::new(
            "Q: What is the transport protocol used by HTTP?\nA: TCP",
        )))
        .with_source_order(vec![QuestionSource::Seeded]);
        let mut saw_false = false;
        for seed in 0..16 {
            let mut rng = StdRng::seed_from_u64(seed);
            let questions = pipeline
                .generate_with_rng(ROUTER_TEXT, 1, QuestionType::TrueFalse, &mut rng)
                .unwrap();
            let question = &questions[0];
            assert!(question.stem.contains("\"What is the transport protocol used by HTTP?\""));
            if question.correct_letter == 'B' {
                saw_false = true;
                assert!(question.stem.ends_with("is not TCP."), "{}", question.stem);
            } else {
                assert!(question.stem.ends_with("is TCP."), "{}", question.stem);
            }
        }
        assert!(saw_false);
    }

    #[test]
    fn knowledge_items_draft_subject_questions() {
        let drafts = seeded_pipeline()
            .drafts_from(QuestionSource::Knowledge, ROUTER_TEXT, 5)
            .unwrap();
        let first = &drafts[0];
        assert_eq!(first.answer, "Router");
        assert!(first.stem.starts_with("Which term is defined as a networking device"));
        assert_eq!(
            first.blanked.as_deref(),
            Some("A _____ is a networking device that forwards data packets between computer networks.")
        );
        assert_eq!(first.difficulty, Difficulty::Hard);
    }

    #[test]
    fn multiple_choice_questions_are_well_formed() {
        let questions = seeded_pipeline()
            .generate(ROUTER_TEXT, 3, QuestionType::MultipleChoice)
            .unwrap();
        assert!(!questions.is_empty());
        let first = &questions[0];
        assert_eq!(first.options.len(), 4);
        assert_eq!(first.correct_text(), Some("Router"));
        assert_eq!(first.category, "technology");
    }

    #[test]
    fn identical_seeds_reproduce_the_quiz() {
        let pipeline = seeded_pipeline();
        let first = pipeline.generate(ROUTER_TEXT, 3, QuestionType::Mixed).unwrap();
        let second = pipeline.generate(ROUTER_TEXT, 3, QuestionType::Mixed).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn mixed_rotates_shapes() {
        let text = "A router is a networking device that forwards data packets. \
                    A switch is a device that connects hosts inside one network. \
                    Ethernet is a family of wired networking technologies.";
        let questions = seeded_pipeline().generate(text, 3, QuestionType::Mixed).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].kind, QuestionType::MultipleChoice);
        assert_eq!(questions[1].kind, QuestionType::TrueFalse);
        assert!(questions[1].stem.starts_with("True or False: "));
        assert_eq!(questions[2].kind, QuestionType::FillInBlank);
        assert!(questions[2].stem.starts_with("Fill in the blank: "));
    }

    #[test]
    fn seeded_pairs_take_priority() {
        let pipeline = seeded_pipeline().with_seed_source(Box::new(RecordedSeeds::new(
            "Q: What forwards packets between networks?\nA: Router",
        )));
        let (drafts, failure) = pipeline.collect_drafts(ROUTER_TEXT, 5);
        assert!(failure.is_none());
        assert_eq!(drafts[0].source, QuestionSource::Seeded);
        // the knowledge item with the same answer is deduplicated.
        assert!(drafts.iter().filter(|d| d.answer == "Router").count() == 1);
    }

    #[test]
    fn failing_seed_source_falls_back_to_local_sources() {
        let pipeline = seeded_pipeline().with_seed_source(Box::new(FailingSeeds));
        let questions = pipeline
            .generate(ROUTER_TEXT, 2, QuestionType::MultipleChoice)
            .unwrap();
        assert!(!questions.is_empty());
    }

    #[test]
    fn failing_seed_source_without_local_results_is_an_error() {
        let pipeline = seeded_pipeline()
            .with_seed_source(Box::new(FailingSeeds))
            .with_source_order(vec![QuestionSource::Seeded]);
        let err = pipeline
            .generate(ROUTER_TEXT, 2, QuestionType::MultipleChoice)
            .unwrap_err();
        assert!(matches!(err, QuizError::GenerationFailed { .. }));
    }

    #[test]
    fn headings_stay_separate_from_the_following_paragraph() {
        let text = format!("Networking Basics\n\n{ROUTER_TEXT}");
        let questions = seeded_pipeline()
            .generate(&text, 1, QuestionType::MultipleChoice)
            .unwrap();
        assert_eq!(questions[0].correct_text(), Some("Router"));
        assert!(
            questions[0]
                .stem
                .starts_with("Which term is defined as a networking device")
        );
    }

    #[test]
    fn wider_option_sets_request_more_distractors() {
        let mut config = PipelineConfig {
            seed: Some(4),
            ..PipelineConfig::default()
        };
        config.assembler.option_count = 5;
        config.distractors.num_distractors = 4;
        assert!(config.validate().is_ok());
        let questions = QuizPipeline::new(config)
            .generate(ROUTER_TEXT, 2, QuestionType::MultipleChoice)
            .unwrap();
        for question in &questions {
            assert_eq!(question.options.len(), 5);
        }
    }

    #[test]
    fn blank_input_yields_nothing() {
        let pipeline = seeded_pipeline();
        assert!(pipeline.generate("   ", 5, QuestionType::MultipleChoice).unwrap().is_empty());
        assert!(pipeline.generate(ROUTER_TEXT, 0, QuestionType::MultipleChoice).unwrap().is_empty());
    }

    #[test]
    fn templated_source_blanks_the_longest_word() {
        let drafts = templated_drafts("packets travel across interconnected links every second.");
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].answer, "interconnected");
        assert!(drafts[0].stem.ends_with("\"packets travel across _____ links every second\"?"));
    }

    #[test]
    fn key_terms_skip_stopwords_and_short_words() {
        let drafts = key_term_drafts("The Internet links networks run by IBM and Cisco worldwide.");
        let answers: Vec<&str> = drafts.iter().map(|d| d.answer.as_str()).collect();
        assert_eq!(answers, vec!["Internet", "Cisco"]);
    }

    #[test]
    fn run_attaches_report_when_validation_is_enabled() {
        let pipeline = QuizPipeline::new(PipelineConfig {
            seed: Some(3),
            validate: true,
            ..PipelineConfig::default()
        });
        let output = pipeline.run(ROUTER_TEXT, 2, QuestionType::MultipleChoice).unwrap();
        let report = output.report.expect("report requested");
        assert_eq!(report.scores.len(), output.questions.len());
    }
}
