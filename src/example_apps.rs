use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use tracing::info;

use crate::config::PipelineConfig;
use crate::constants::pipeline::DEFAULT_QUESTION_COUNT;
use crate::context::ContextStore;
use crate::data::QuestionType;
use crate::heuristics::format_score;
use crate::pipeline::QuizPipeline;
use crate::transport::fs::load_documents;

#[derive(Debug, Parser)]
#[command(
    name = "generate_quiz",
    disable_help_subcommand = true,
    about = "Generate a multiple-choice quiz from text documents",
    long_about = "Extract facts from .txt/.md documents, synthesize questions with distractors, and print them as JSON.",
    after_help = "Values given on the command line override the same settings from --config."
)]
struct GenerateQuizCli {
    #[arg(
        long,
        value_name = "PATH",
        help = "A .txt/.md file, or a directory searched recursively"
    )]
    input: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_QUESTION_COUNT,
        value_parser = parse_positive_usize,
        help = "Number of questions to generate"
    )]
    count: usize,
    #[arg(
        long = "question-type",
        value_parser = parse_question_type,
        default_value = "multiple_choice",
        help = "multiple_choice, true_false, fill_in_blank, short_answer, matching, or mixed"
    )]
    question_type: QuestionType,
    #[arg(long, help = "Deterministic seed override")]
    seed: Option<u64>,
    #[arg(long, help = "Subject domain for distractor vocabularies, e.g. networking")]
    domain: Option<String>,
    #[arg(long, help = "Attach a quality validation report")]
    validate: bool,
    #[arg(long, value_name = "PATH", help = "JSON pipeline configuration")]
    config: Option<PathBuf>,
}

/// Parse `args_iter` (without the program name) and print a quiz to stdout.
pub fn run_generate_quiz<I>(args_iter: I) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    run_generate_quiz_to(args_iter, &mut handle)
}

/// Same as [`run_generate_quiz`], writing the JSON to `out`.
pub fn run_generate_quiz_to<I, W>(args_iter: I, out: &mut W) -> Result<(), Box<dyn Error>>
where
    I: Iterator<Item = String>,
    W: Write,
{
    let Some(cli) = parse_cli::<GenerateQuizCli, _>(
        std::iter::once("generate_quiz".to_string()).chain(args_iter),
    )?
    else {
        return Ok(());
    };

    let mut config = match &cli.config {
        Some(path) => PipelineConfig::from_json(&fs::read_to_string(path)?)?,
        None => PipelineConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.domain.is_some() {
        config.domain = cli.domain.clone();
    }
    config.validate |= cli.validate;
    config.validate()?;

    let mut store = ContextStore::new();
    store.ingest(load_documents(&cli.input)?);
    let text = store.require_context()?;

    let pipeline = QuizPipeline::new(config);
    let output = pipeline.run(&text, cli.count, cli.question_type)?;
    if let Some(report) = &output.report {
        info!(
            "[quizgen:cli] quiz quality {} ({})",
            format_score(report.averages.overall),
            report.rating
        );
    }
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

fn parse_positive_usize(raw: &str) -> Result<usize, String> {
    let parsed = raw
        .parse::<usize>()
        .map_err(|_| format!("Could not parse --count value '{raw}' as a positive integer"))?;
    if parsed == 0 {
        return Err("--count must be greater than zero".to_string());
    }
    Ok(parsed)
}

fn parse_question_type(raw: &str) -> Result<QuestionType, String> {
    raw.parse::<QuestionType>().map_err(|err| err.to_string())
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(err.into()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::QuizOutput;
    use tempfile::tempdir;

    fn args(values: &[&str]) -> std::vec::IntoIter<String> {
        values
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .into_iter()
    }

    #[test]
    fn prints_questions_as_json() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(
            &input,
            "A router is a networking device that forwards data packets between computer networks.",
        )
        .unwrap();
        let input = input.display().to_string();

        let mut out = Vec::new();
        run_generate_quiz_to(
            args(&["--input", &input, "--count", "2", "--seed", "9", "--validate"]),
            &mut out,
        )
        .unwrap();
        let output: QuizOutput = serde_json::from_slice(&out).unwrap();
        assert!(!output.questions.is_empty());
        assert!(output.report.is_some());
    }

    #[test]
    fn empty_input_directory_is_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().display().to_string();
        let mut out = Vec::new();
        let err = run_generate_quiz_to(args(&["--input", &input]), &mut out).unwrap_err();
        assert!(err.to_string().contains("no source text"));
    }

    #[test]
    fn invalid_arguments_are_errors() {
        let mut out = Vec::new();
        assert!(run_generate_quiz_to(args(&["--input", "x", "--count", "0"]), &mut out).is_err());
        assert!(
            run_generate_quiz_to(args(&["--input", "x", "--question-type", "essay"]), &mut out)
                .is_err()
        );
    }

    #[test]
    fn config_file_is_validated() {
        let dir = tempdir().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, r#"{"assembler": {"option_count": 1}}"#).unwrap();
        let config = config.display().to_string();
        let mut out = Vec::new();
        let err = run_generate_quiz_to(args(&["--input", "x", "--config", &config]), &mut out)
            .unwrap_err();
        assert!(err.to_string().contains("option_count"));
    }
}
