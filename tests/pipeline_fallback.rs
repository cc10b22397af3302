use std::fs;

use quizgen::transport::fs::load_documents;
use quizgen::{
    ContextStore, PipelineConfig, QuestionSource, QuestionType, QuizError, QuizPipeline,
    RawSeedPair, RecordedSeeds, SeedSource,
};
use tempfile::tempdir;

const NETWORK_NOTES: &str = "A router is a networking device that forwards data packets between \
computer networks. A switch is a device that connects devices within one local network. \
The Internet Protocol assigns addresses to every host.";

struct UnreachableSeeds;

impl SeedSource for UnreachableSeeds {
    fn fetch(&self, _context: &str, _count: usize) -> Result<Vec<RawSeedPair>, QuizError> {
        Err(QuizError::SeedSourceUnavailable {
            reason: "connection refused".to_string(),
        })
    }
}

struct PartialSeeds;

impl SeedSource for PartialSeeds {
    fn fetch(&self, _context: &str, _count: usize) -> Result<Vec<RawSeedPair>, QuizError> {
        Ok(vec![
            RawSeedPair::new("Which device forwards packets between networks?", "Router"),
            RawSeedPair {
                question: Some("What connects devices on one network?".to_string()),
                answer: None,
            },
            RawSeedPair::new("   ", "Switch"),
        ])
    }
}

fn seeded_config(seed: u64) -> PipelineConfig {
    PipelineConfig {
        seed: Some(seed),
        ..PipelineConfig::default()
    }
}

#[test]
fn unreachable_seed_source_falls_back_to_local_sources() {
    let pipeline = QuizPipeline::new(seeded_config(3)).with_seed_source(Box::new(UnreachableSeeds));
    let questions = pipeline
        .generate(NETWORK_NOTES, 3, QuestionType::MultipleChoice)
        .unwrap();
    assert!(!questions.is_empty());
    assert!(questions.len() <= 3);
    for question in &questions {
        assert_eq!(question.options.len(), 4);
        assert!(question.correct_text().is_some());
    }
}

#[test]
fn seed_failure_without_local_sources_is_an_error() {
    let pipeline = QuizPipeline::new(seeded_config(3))
        .with_seed_source(Box::new(UnreachableSeeds))
        .with_source_order(vec![QuestionSource::Seeded]);
    let err = pipeline
        .generate(NETWORK_NOTES, 2, QuestionType::MultipleChoice)
        .unwrap_err();
    assert!(matches!(err, QuizError::GenerationFailed { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn incomplete_seed_pairs_are_dropped() {
    let pipeline = QuizPipeline::new(seeded_config(11))
        .with_seed_source(Box::new(PartialSeeds))
        .with_source_order(vec![QuestionSource::Seeded]);
    let questions = pipeline
        .generate(NETWORK_NOTES, 5, QuestionType::MultipleChoice)
        .unwrap();
    assert_eq!(questions.len(), 1);
    assert_eq!(
        questions[0].stem,
        "Which device forwards packets between networks?"
    );
    assert_eq!(questions[0].correct_text(), Some("Router"));
}

#[test]
fn recorded_generator_output_drives_seeded_questions() {
    let recorded = RecordedSeeds::new(
        "Q: Which device forwards packets between networks?\nA: Router\n\
         Q: Which protocol assigns host addresses?\nA: Internet Protocol\n",
    );
    let pipeline = QuizPipeline::new(seeded_config(2))
        .with_seed_source(Box::new(recorded))
        .with_source_order(vec![QuestionSource::Seeded]);
    let questions = pipeline
        .generate(NETWORK_NOTES, 2, QuestionType::MultipleChoice)
        .unwrap();
    let answers: Vec<_> = questions
        .iter()
        .filter_map(|question| question.correct_text())
        .collect();
    assert_eq!(answers, vec!["Router", "Internet Protocol"]);
}

#[test]
fn blank_input_yields_no_questions() {
    let pipeline = QuizPipeline::new(seeded_config(1)).with_seed_source(Box::new(UnreachableSeeds));
    assert!(
        pipeline
            .generate("   \n\t ", 5, QuestionType::MultipleChoice)
            .unwrap()
            .is_empty()
    );
    assert!(
        pipeline
            .generate(NETWORK_NOTES, 0, QuestionType::TrueFalse)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn documents_on_disk_flow_through_the_context_store() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a_routing.md"), NETWORK_NOTES).unwrap();
    fs::write(
        dir.path().join("b_biology.txt"),
        "Photosynthesis is a process that converts light energy into chemical energy.",
    )
    .unwrap();
    fs::write(dir.path().join("ignored.csv"), "router,switch").unwrap();

    let mut store = ContextStore::new();
    store.ingest(load_documents(dir.path()).unwrap());
    assert_eq!(store.len(), 2);
    let text = store.require_context().unwrap();
    assert!(text.contains("Photosynthesis"));
    assert!(!text.contains("router,switch"));

    let config = PipelineConfig {
        validate: true,
        ..seeded_config(21)
    };
    let output = QuizPipeline::new(config)
        .run(&text, 4, QuestionType::Mixed)
        .unwrap();
    assert!(!output.questions.is_empty());
    let report = output.report.unwrap();
    assert_eq!(report.scores.len(), output.questions.len());

    let saved = dir.path().join("context.json");
    store.save(&saved).unwrap();
    assert_eq!(ContextStore::load(&saved).unwrap(), store);
}
