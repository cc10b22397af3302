use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;
use tracing::warn;

use crate::config::SemanticThresholds;
use crate::constants::distractors::{QUALITY_IDEAL_SIMILARITY, SEMANTIC_HIGH_CONFIDENCE};
use crate::data::{CandidateSource, DistractorCandidate, DistractorQuality};
use crate::errors::QuizError;
use crate::types::Embedding;

static QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]+)""#).expect("quoted-term pattern compiles"));
static EMPHASIZED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^*]+)\*").expect("emphasis pattern compiles"));

/// Optional embedding collaborator used to rank context phrases.
pub trait SimilarityModel: Send + Sync {
    /// One embedding per input text, in input order.
    fn embed(&self, texts: &[String]) -> Result<Vec<Embedding>, QuizError>;

    /// Similarity of two embeddings; cosine by default.
    fn cosine_similarity(&self, a: &[f32], b: &[f32]) -> f32 {
        cosine_similarity(a, b)
    }

    /// Judge a finished distractor set against its answer.
    ///
    /// Quality is one minus the distance of the mean similarity from
    /// `QUALITY_IDEAL_SIMILARITY`, averaged with the similarity variance and
    /// clamped to [0, 1].
    fn distractor_quality(
        &self,
        answer: &str,
        distractors: &[String],
    ) -> Result<DistractorQuality, QuizError> {
        let mut texts = Vec::with_capacity(distractors.len() + 1);
        texts.push(answer.to_string());
        texts.extend(distractors.iter().cloned());
        let embeddings = self.embed(&texts)?;
        let Some((answer_embedding, rest)) = embeddings.split_first() else {
            return Err(QuizError::EmbeddingUnavailable {
                reason: "model returned no embeddings".to_string(),
            });
        };
        if rest.len() != distractors.len() {
            return Err(QuizError::EmbeddingUnavailable {
                reason: format!(
                    "model returned {} embeddings for {} distractors",
                    rest.len(),
                    distractors.len()
                ),
            });
        }
        let similarities: Vec<f32> = rest
            .iter()
            .map(|embedding| self.cosine_similarity(answer_embedding, embedding))
            .collect();
        let count = similarities.len() as f32;
        let mean = similarities.iter().sum::<f32>() / count;
        let variance = if similarities.len() < 2 {
            0.0
        } else {
            similarities
                .iter()
                .map(|value| (value - mean).powi(2))
                .sum::<f32>()
                / (count - 1.0)
        };
        let closeness = 1.0 - (mean - QUALITY_IDEAL_SIMILARITY).abs();
        Ok(DistractorQuality {
            overall_quality: ((closeness + variance) / 2.0).clamp(0.0, 1.0),
            avg_similarity: Some(mean),
            diversity: Some(variance),
            similarities,
        })
    }
}

/// Quality of `distractors` for `answer`, neutral when there is no model,
/// nothing to judge, or the model fails.
pub fn evaluate_quality(
    model: Option<&dyn SimilarityModel>,
    answer: &str,
    distractors: &[String],
) -> DistractorQuality {
    let Some(model) = model else {
        return DistractorQuality::neutral();
    };
    if distractors.is_empty() {
        return DistractorQuality::neutral();
    }
    model
        .distractor_quality(answer, distractors)
        .unwrap_or_else(|err| {
            warn!("[quizgen:semantic] distractor quality evaluation failed: {err}");
            DistractorQuality::neutral()
        })
}

/// Cosine similarity; zero when either vector has no magnitude or lengths differ.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

fn strip_non_word(word: &str) -> String {
    word.chars()
        .filter(|ch| ch.is_alphanumeric() || *ch == '_')
        .collect()
}

fn is_title_case(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|ch| !ch.is_uppercase()),
        _ => false,
    }
}

/// Phrases from `context` worth embedding: title-case words, adjacent word
/// pairs, "quoted" terms, and *emphasized* terms. Never includes the answer.
pub fn extract_candidates(context: &str, answer: &str, limit: usize) -> Vec<String> {
    let answer = answer.to_lowercase();
    let mut candidates: IndexSet<String> = IndexSet::new();
    let words: Vec<&str> = context.split_whitespace().collect();
    for (index, word) in words.iter().enumerate() {
        let cleaned = strip_non_word(word);
        if cleaned.chars().count() > 3 && cleaned.to_lowercase() != answer && is_title_case(&cleaned)
        {
            candidates.insert(cleaned.clone());
        }
        if let Some(next) = words.get(index + 1) {
            let phrase = format!("{cleaned} {}", strip_non_word(next));
            if phrase.chars().count() > 5 && phrase.to_lowercase() != answer {
                candidates.insert(phrase);
            }
        }
    }
    for pattern in [&*QUOTED, &*EMPHASIZED] {
        for captures in pattern.captures_iter(context) {
            let term = captures[1].trim();
            if term.chars().count() > 2 && term.to_lowercase() != answer {
                candidates.insert(term.to_string());
            }
        }
    }
    candidates.into_iter().take(limit).collect()
}

/// Context phrases that are related to `answer` without paraphrasing it,
/// closest to the ideal similarity first.
///
/// Returns nothing when the model is missing or fails.
pub fn generate(
    model: Option<&dyn SimilarityModel>,
    answer: &str,
    context: &str,
    thresholds: SemanticThresholds,
    max_candidates: usize,
    count: usize,
) -> Vec<DistractorCandidate> {
    let Some(model) = model else {
        return Vec::new();
    };
    let phrases = extract_candidates(context, answer, max_candidates);
    if phrases.is_empty() {
        return Vec::new();
    }
    match rank(model, answer, &phrases, thresholds) {
        Ok(mut ranked) => {
            ranked.truncate(count);
            ranked
        }
        Err(err) => {
            warn!("[quizgen:semantic] similarity model failed; skipping semantic distractors: {err}");
            Vec::new()
        }
    }
}

fn rank(
    model: &dyn SimilarityModel,
    answer: &str,
    phrases: &[String],
    thresholds: SemanticThresholds,
) -> Result<Vec<DistractorCandidate>, QuizError> {
    let answer_embedding = model
        .embed(&[answer.to_string()])?
        .into_iter()
        .next()
        .ok_or_else(|| QuizError::EmbeddingUnavailable {
            reason: "model returned no embedding for the answer".to_string(),
        })?;
    let embeddings = model.embed(phrases)?;
    if embeddings.len() != phrases.len() {
        return Err(QuizError::EmbeddingUnavailable {
            reason: format!(
                "model returned {} embeddings for {} phrases",
                embeddings.len(),
                phrases.len()
            ),
        });
    }
    let mut ranked: Vec<DistractorCandidate> = phrases
        .iter()
        .zip(&embeddings)
        .filter_map(|(phrase, embedding)| {
            let similarity = model.cosine_similarity(&answer_embedding, embedding);
            if similarity <= thresholds.minimum || similarity >= thresholds.too_similar {
                return None;
            }
            let confidence = if similarity > thresholds.ideal {
                SEMANTIC_HIGH_CONFIDENCE
            } else {
                similarity / thresholds.ideal
            };
            Some(DistractorCandidate::new(
                phrase.as_str(),
                similarity,
                CandidateSource::Semantic,
                confidence,
            ))
        })
        .collect();
    ranked.sort_by(|a, b| {
        let left = (a.score - thresholds.ideal).abs();
        let right = (b.score - thresholds.ideal).abs();
        left.total_cmp(&right)
    });
    Ok(ranked)
}
