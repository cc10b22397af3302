use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use quizgen::assembler::normalize_option;
use quizgen::{
    AssemblerConfig, DistractorConfig, DistractorEngine, EngineVariant, EntityExtractor,
    ExtractionConfig, KnowledgeExtractor, PipelineConfig, QuestionAssembler, QuestionType,
    QuizPipeline,
};

const CORPUS: &str = "A router is a networking device that forwards data packets between computer networks. \
    TCP provides reliable delivery of packets across the Internet. \
    Photosynthesis is the process by which plants convert light into chemical energy. \
    In 1969, Neil Armstrong walked on the Moon during the Apollo program. \
    A compiler is a program that translates source code into machine code.";

const ANSWERS: &[&str] = &[
    "Router",
    "TCP",
    "Photosynthesis",
    "Neil Armstrong",
    "Compiler",
    "x",
    "",
    "None of the above",
    "42",
];

fn assert_distinct_ignoring_case(options: &[&str]) {
    let lowered: HashSet<String> = options.iter().map(|text| text.to_lowercase()).collect();
    assert_eq!(lowered.len(), options.len(), "duplicate options: {options:?}");
}

#[test]
fn distractors_never_repeat_the_answer_and_respect_the_count() {
    for variant in [EngineVariant::Basic, EngineVariant::Hybrid] {
        let engine = DistractorEngine::new(DistractorConfig {
            variant,
            ..DistractorConfig::default()
        });
        for seed in 0..24 {
            let mut rng = StdRng::seed_from_u64(seed);
            for answer in ANSWERS {
                for count in [0, 1, 3, 6] {
                    let distractors =
                        engine.generate_n(answer, CORPUS, Some("networking"), count, &mut rng);
                    assert!(distractors.len() <= count);
                    let answer = answer.trim().to_lowercase();
                    assert!(
                        distractors.iter().all(|d| d.trim().to_lowercase() != answer),
                        "answer leaked into {distractors:?}"
                    );
                    let refs: Vec<&str> = distractors.iter().map(String::as_str).collect();
                    assert_distinct_ignoring_case(&refs);
                }
            }
        }
    }
}

#[test]
fn assembled_questions_always_have_four_distinct_short_options() {
    let assembler = QuestionAssembler::default();
    let max_chars = assembler.config().max_chars;
    let adversarial: &[(&str, &[&str])] = &[
        ("Router", &["router", "ROUTER", "Router."]),
        ("", &[]),
        ("   ", &["", "  "]),
        (
            "A very long answer that keeps going well past any reasonable option budget",
            &["Alpha", "alpha", "Alpha; beta"],
        ),
        ("Alpha", &["Alpha", "Beta", "Gamma", "Delta", "Epsilon"]),
        ("\"(quoted)\"", &["[bracketed]", "{braced}"]),
    ];
    for seed in 0..32 {
        let mut rng = StdRng::seed_from_u64(seed);
        for (answer, distractors) in adversarial {
            let distractors: Vec<String> = distractors.iter().map(|d| d.to_string()).collect();
            let question = assembler.assemble("Which option?", answer, &distractors, &mut rng);
            assert_eq!(question.options.len(), 4);
            assert!(question.options.contains_key(&question.correct_letter));
            let texts: Vec<&str> = question.options.values().map(String::as_str).collect();
            assert_distinct_ignoring_case(&texts);
            assert!(texts.iter().all(|text| text.chars().count() <= max_chars));
            assert!(texts.iter().all(|text| !text.is_empty()));
            let letters: Vec<char> = question.options.keys().copied().collect();
            assert_eq!(letters, vec!['A', 'B', 'C', 'D']);
        }
    }
}

#[test]
fn tiny_character_caps_still_yield_distinct_options() {
    let assembler = QuestionAssembler::new(AssemblerConfig {
        max_chars: 1,
        ..AssemblerConfig::default()
    });
    let mut rng = StdRng::seed_from_u64(1);
    let question = assembler.assemble("Which?", "Router", &["Rover".to_string()], &mut rng);
    let texts: Vec<&str> = question.options.values().map(String::as_str).collect();
    assert_eq!(texts.len(), 4);
    assert_distinct_ignoring_case(&texts);
}

#[test]
fn entity_extraction_is_idempotent() {
    let extractor = EntityExtractor::new(&ExtractionConfig::default());
    let first = extractor.extract(CORPUS);
    let second = extractor.extract(CORPUS);
    assert_eq!(first, second);
    assert!(
        first
            .values()
            .flatten()
            .all(|span| span.chars().count() >= 3)
    );
}

#[test]
fn knowledge_content_survives_option_normalization() {
    let extractor = KnowledgeExtractor::new(&ExtractionConfig::default());
    let items = extractor.extract(CORPUS);
    assert!(!items.is_empty());
    for window in items.windows(2) {
        assert!(window[0].confidence >= window[1].confidence);
    }
    for item in &items {
        assert!(!normalize_option(&item.content, 2, 24).is_empty());
    }
    for punctuation_only in ["", "   ", "..."] {
        let normalized = normalize_option(punctuation_only, 2, 24);
        assert!(normalized.chars().all(|ch| !ch.is_alphanumeric()));
    }
}

#[test]
fn generated_quizzes_keep_question_invariants() {
    for seed in 0..8 {
        let pipeline = QuizPipeline::new(PipelineConfig {
            seed: Some(seed),
            ..PipelineConfig::default()
        });
        for kind in [
            QuestionType::MultipleChoice,
            QuestionType::FillInBlank,
            QuestionType::Mixed,
        ] {
            let questions = pipeline.generate(CORPUS, 10, kind).unwrap();
            assert!(!questions.is_empty());
            assert!(questions.len() <= 10);
            for question in &questions {
                assert!(!question.stem.trim().is_empty());
                assert!(question.points >= 1);
                assert!(question.options.contains_key(&question.correct_letter));
                let texts: Vec<&str> = question.options.values().map(String::as_str).collect();
                assert_distinct_ignoring_case(&texts);
                match question.kind {
                    QuestionType::TrueFalse => assert_eq!(texts, vec!["True", "False"]),
                    _ => assert_eq!(texts.len(), 4),
                }
            }
        }
    }
}
