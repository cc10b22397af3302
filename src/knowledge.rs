//! Mining (subject, relation, content) facts from sentences.

use std::collections::{BTreeMap, HashSet};

use regex::{Regex, RegexBuilder};

use crate::config::ExtractionConfig;
use crate::constants::extraction::{
    BASE_CONFIDENCE, CONTENT_BONUS_LONG_CHARS, CONTENT_BONUS_SHORT_CHARS, MIN_CONTENT_CHARS,
    MIN_SUBJECT_CHARS,
};
use crate::data::{KnowledgeItem, KnowledgeType};
use crate::utils::sentences_longer_than;

const DEFINITION_PATTERNS: &[&str] = &[
    r"([A-Z][a-zA-Z\s]+?)\s+(?:is|are|refers to|means|represents)\s+([^.!?]+)",
    r"([A-Z][a-zA-Z\s]+?):\s*([^.!?]+)",
    r"The\s+([a-zA-Z\s]+?)\s+(?:is|are)\s+([^.!?]+)",
    r"([A-Z][a-zA-Z\s]+?)\s+can be defined as\s+([^.!?]+)",
];

const FUNCTION_PATTERNS: &[&str] = &[
    r"([A-Z][a-zA-Z\s]+?)\s+(?:enables?|allows?|provides?|facilitates?|helps?)\s+([^.!?]+)",
    r"([A-Z][a-zA-Z\s]+?)\s+(?:is used to|serves to|functions to)\s+([^.!?]+)",
    r"The (?:purpose|function|role) of\s+([a-zA-Z\s]+?)\s+is to\s+([^.!?]+)",
];

const PROCESS_PATTERNS: &[&str] = &[
    r"([A-Z][a-zA-Z\s]+?)\s+(?:involves?|includes?|consists? of|comprises?)\s+([^.!?]+)",
    r"During\s+([a-zA-Z\s]+?),\s*([^.!?]+)",
    r"The process of\s+([a-zA-Z\s]+?)\s+([^.!?]+)",
];

const CHARACTERISTIC_PATTERNS: &[&str] = &[
    r"([A-Z][a-zA-Z\s]+?)\s+(?:has|have|features?|contains?|exhibits?)\s+([^.!?]+)",
    r"([A-Z][a-zA-Z\s]+?)\s+is\s+(?:characterized by|known for|notable for)\s+([^.!?]+)",
];

const RELATIONSHIP_PATTERNS: &[&str] = &[
    r"([A-Z][a-zA-Z\s]+?)\s+(?:connects?|links?|relates? to|interacts? with)\s+([^.!?]+)",
    r"The relationship between\s+([a-zA-Z\s]+?)\s+and\s+([a-zA-Z\s]+?)\s+([^.!?]+)",
];

const PLACEHOLDER_SUBJECTS: &[&str] = &[
    "this", "that", "these", "those", "it", "they", "we", "you", "he", "she", "what", "which",
    "where", "when", "how", "why",
];

const GENERIC_CONTENT: &[&str] = &[
    "important",
    "significant",
    "useful",
    "necessary",
    "good",
    "bad",
    "better",
    "worse",
];

const TECHNICAL_MARKERS: &[&str] = &[
    "system",
    "method",
    "process",
    "technique",
    "algorithm",
    "protocol",
];

/// Turns sentences into structured knowledge items ranked by confidence.
pub struct KnowledgeExtractor {
    families: BTreeMap<KnowledgeType, Vec<Regex>>,
    min_sentence_chars: usize,
}

impl KnowledgeExtractor {
    /// Extractor with the built-in relation families.
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut extractor = Self {
            families: BTreeMap::new(),
            min_sentence_chars: config.min_sentence_chars,
        };
        let families: [(KnowledgeType, &[&str]); 5] = [
            (KnowledgeType::Definition, DEFINITION_PATTERNS),
            (KnowledgeType::Function, FUNCTION_PATTERNS),
            (KnowledgeType::Process, PROCESS_PATTERNS),
            (KnowledgeType::Characteristic, CHARACTERISTIC_PATTERNS),
            (KnowledgeType::Relationship, RELATIONSHIP_PATTERNS),
        ];
        for (kind, patterns) in families {
            extractor
                .register_family(kind, patterns)
                .expect("built-in relation patterns compile");
        }
        extractor
    }

    /// Register (or replace) the patterns for `kind`. Each pattern must
    /// capture the subject in group 1 and the content in group 2.
    pub fn register_family(
        &mut self,
        kind: KnowledgeType,
        patterns: &[&str],
    ) -> Result<(), regex::Error> {
        let compiled = patterns
            .iter()
            .map(|pattern| RegexBuilder::new(pattern).case_insensitive(true).build())
            .collect::<Result<Vec<_>, _>>()?;
        self.families.insert(kind, compiled);
        Ok(())
    }

    /// Remove the patterns for `kind`.
    pub fn remove_family(&mut self, kind: KnowledgeType) {
        self.families.remove(&kind);
    }

    /// Every valid match in `text`, before ranking and deduplication.
    pub fn candidates(&self, text: &str) -> Vec<KnowledgeItem> {
        let mut items = Vec::new();
        for sentence in sentences_longer_than(text, self.min_sentence_chars) {
            let sentence = sentence.trim_end_matches(['.', '!', '?']).trim();
            for (kind, patterns) in &self.families {
                for pattern in patterns {
                    for captures in pattern.captures_iter(sentence) {
                        let (Some(subject), Some(content)) = (captures.get(1), captures.get(2))
                        else {
                            continue;
                        };
                        let subject = subject.as_str().trim();
                        let content = content.as_str().trim();
                        if !is_valid_item(subject, content) {
                            continue;
                        }
                        items.push(KnowledgeItem {
                            kind: *kind,
                            subject: subject.to_string(),
                            content: content.to_string(),
                            source_sentence: sentence.to_string(),
                            confidence: confidence(subject, content, *kind),
                        });
                    }
                }
            }
        }
        items
    }

    /// Knowledge items sorted by confidence (highest first), one per subject.
    ///
    /// Ranking happens before deduplication, so the surviving item for a
    /// subject is always its highest-confidence match; ties keep the earliest.
    pub fn extract(&self, text: &str) -> Vec<KnowledgeItem> {
        let mut items = self.candidates(text);
        items.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        let mut seen = HashSet::new();
        items.retain(|item| seen.insert(item.subject.to_lowercase()));
        items
    }
}

impl Default for KnowledgeExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

fn is_valid_item(subject: &str, content: &str) -> bool {
    if subject.chars().count() < MIN_SUBJECT_CHARS || content.chars().count() < MIN_CONTENT_CHARS {
        return false;
    }
    let subject = subject.to_lowercase();
    if PLACEHOLDER_SUBJECTS.contains(&subject.as_str()) {
        return false;
    }
    let content = content.to_lowercase();
    !GENERIC_CONTENT.contains(&content.as_str())
}

fn confidence(subject: &str, content: &str, kind: KnowledgeType) -> f32 {
    let mut score = BASE_CONFIDENCE;
    let content_chars = content.chars().count();
    if content_chars > CONTENT_BONUS_SHORT_CHARS {
        score += 0.2;
    }
    if content_chars > CONTENT_BONUS_LONG_CHARS {
        score += 0.1;
    }
    if subject.chars().next().is_some_and(char::is_uppercase) {
        score += 0.1;
    }
    let lowered = content.to_lowercase();
    if TECHNICAL_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        score += 0.1;
    }
    if kind == KnowledgeType::Definition {
        score += 0.1;
    }
    score.min(1.0)
}
