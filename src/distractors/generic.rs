use crate::constants::distractors::GENERIC_CONFIDENCE;
use crate::data::{CandidateSource, DistractorCandidate};

/// Templated last-resort distractors, in preference order.
pub fn templates(answer: &str) -> Vec<String> {
    vec![
        format!("Not {answer}"),
        format!("Alternative to {answer}"),
        format!("Opposite of {answer}"),
        format!("{answer} variant"),
        format!("Similar to {answer}"),
        "None of the above".to_string(),
        "All of the above".to_string(),
        "Cannot be determined".to_string(),
        "Insufficient information".to_string(),
    ]
}

/// Templates not already present in `existing` (ignoring case), enough to
/// bring `existing` up to `count` entries when the templates allow it.
pub fn fill(answer: &str, existing: &[String], count: usize) -> Vec<DistractorCandidate> {
    let mut taken: Vec<String> = existing.iter().map(|text| text.to_lowercase()).collect();
    let answer_lower = answer.to_lowercase();
    let mut filled = Vec::new();
    for template in templates(answer) {
        if existing.len() + filled.len() >= count {
            break;
        }
        let template = template.trim().to_string();
        let lowered = template.to_lowercase();
        if template.is_empty() || lowered == answer_lower || taken.contains(&lowered) {
            continue;
        }
        taken.push(lowered);
        filled.push(DistractorCandidate::new(
            template,
            0.0,
            CandidateSource::Generic,
            GENERIC_CONFIDENCE,
        ));
    }
    filled
}
