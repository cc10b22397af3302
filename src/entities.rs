//! Regex-family entity extraction.

use std::collections::{BTreeMap, BTreeSet};

use crate::config::ExtractionConfig;
use crate::data::{EntityCategory, TextSpan};
use crate::patterns::{MatcherRegistry, RegexMatcher, TextMatcher};

const PERSON_PATTERNS: &[&str] = &[
    r"\b[A-Z][a-z]+ [A-Z][a-z]+\b",
    r"\b(?:Dr|Professor|Mr|Ms|Mrs)\.? [A-Z][a-z]+(?:\s[A-Z][a-z]+)?\b",
    r"\b[A-Z][a-z]+(?:son|sen|stein|berg|mann|ski|owski|enko|ova|ez|es)\b",
];

const PLACE_PATTERNS: &[&str] = &[
    r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)*\s(?:City|Town|Village|County|State|Province|Country|University|College|Institute|Hospital|School)\b",
    r"\b(?:New|Old|North|South|East|West|Upper|Lower|Great|Little)\s[A-Z][a-z]+\b",
    r"\b[A-Z][a-z]+(?:land|burg|ville|town|shire|ford|field|wood|mount|hill|dale|port|beach)\b",
];

const CONCEPT_PATTERNS: &[&str] = &[
    r"\b[A-Z][a-z]*(?:ism|ology|ography|ometry|ics|tion|sion|ness|ment|ship|hood|dom)\b",
    r"\b(?:theory|principle|law|rule|method|process|system|model|framework|approach)\s(?:of\s)?[A-Z][a-z]+\b",
    r"\b[A-Z][a-z]+(?:\s[A-Z][a-z]+)*\s(?:theorem|principle|law|effect|syndrome|disorder)\b",
];

const DATE_PATTERNS: &[&str] = &[
    r"\b(?:19|20)\d{2}\b",
    r"\b(?:January|February|March|April|May|June|July|August|September|October|November|December)\s\d{1,2},?\s(?:19|20)?\d{2}\b",
    r"\b\d{1,2}(?:st|nd|rd|th)?\s(?:century|millennium)\b",
];

const NUMBER_PATTERNS: &[&str] = &[
    r"\b\d+(?:\.\d+)?\s?(?:percent|%|million|billion|thousand|hundred)",
    r"\b(?:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty|thirty|forty|fifty|sixty|seventy|eighty|ninety|hundred|thousand|million|billion)\b",
];

const TECHNICAL_PATTERNS: &[&str] = &[
    r"\b[A-Z]{2,}(?:/[A-Z]+)?\b",
    r"\b(?:TCP|UDP|HTTP|HTTPS|FTP|SSH|DNS|DHCP|SMTP|IP|IPv4|IPv6)\b",
    r"(?i)\b(?:router|switch|hub|modem|server|client|computer|laptop|smartphone)s?\b",
];

/// Tags spans of text as people, places, concepts, dates, numbers, and technical terms.
///
/// Proper-noun families (people, places, concepts, acronyms) match
/// case-sensitively; date and number vocabularies ignore case.
pub struct EntityExtractor {
    registry: MatcherRegistry<EntityCategory>,
}

impl EntityExtractor {
    /// Extractor with the built-in pattern families.
    pub fn new(config: &ExtractionConfig) -> Self {
        let min_chars = config.min_entity_chars;
        let families: [(EntityCategory, &[&str], bool); 6] = [
            (EntityCategory::Person, PERSON_PATTERNS, false),
            (EntityCategory::Place, PLACE_PATTERNS, false),
            (EntityCategory::Concept, CONCEPT_PATTERNS, false),
            (EntityCategory::Date, DATE_PATTERNS, true),
            (EntityCategory::Number, NUMBER_PATTERNS, true),
            (EntityCategory::TechnicalTerm, TECHNICAL_PATTERNS, false),
        ];
        let mut registry = MatcherRegistry::new();
        for (category, patterns, case_insensitive) in families {
            let matcher = RegexMatcher::new(category.as_str(), patterns, case_insensitive)
                .expect("built-in entity patterns compile")
                .with_min_chars(min_chars);
            registry.register(category, Box::new(matcher));
        }
        Self { registry }
    }

    /// Extractor over a caller-built registry.
    pub fn with_registry(registry: MatcherRegistry<EntityCategory>) -> Self {
        Self { registry }
    }

    /// Mutable access for registering or removing pattern families.
    pub fn registry_mut(&mut self) -> &mut MatcherRegistry<EntityCategory> {
        &mut self.registry
    }

    /// Category to distinct matched texts. Categories without matches are omitted.
    pub fn extract(&self, text: &str) -> BTreeMap<EntityCategory, BTreeSet<String>> {
        self.registry.find_all(text)
    }

    /// Every categorized span, ordered by offset then category.
    pub fn spans(&self, text: &str) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        for category in self.registry.keys() {
            let Some(matcher) = self.registry.get(category) else {
                continue;
            };
            for (offset, value) in matcher.find_spans(text) {
                spans.push(TextSpan {
                    text: value,
                    category,
                    offset,
                });
            }
        }
        spans.sort_by(|a, b| {
            a.offset
                .cmp(&b.offset)
                .then_with(|| a.category.cmp(&b.category))
        });
        spans.dedup();
        spans
    }

    /// Best guess at the category of `answer`.
    ///
    /// Looks for an extracted entity that contains, or is contained in, the
    /// answer; then re-tests the answer against each family; else `Concept`.
    pub fn infer_category(
        &self,
        answer: &str,
        entities: &BTreeMap<EntityCategory, BTreeSet<String>>,
    ) -> EntityCategory {
        let needle = answer.to_lowercase();
        for (category, values) in entities {
            let overlaps = values.iter().any(|value| {
                let value = value.to_lowercase();
                value.contains(&needle) || needle.contains(&value)
            });
            if overlaps {
                return *category;
            }
        }
        self.registry
            .first_match(answer)
            .unwrap_or(EntityCategory::Concept)
    }
}

impl Default for EntityExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}
