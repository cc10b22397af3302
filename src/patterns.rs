//! Named text matchers and a registry that dispatches over them.
//!
//! Entity categories, domain vocabularies, and question categories are all
//! families of patterns keyed by a label. Each family is a [`TextMatcher`]
//! registered under its key, so families can be added or removed without
//! touching the code that scans text.

use std::collections::{BTreeMap, BTreeSet};

use regex::{Regex, RegexBuilder};

use crate::utils::lowercase_words;

/// A named capability that finds candidate spans in text.
pub trait TextMatcher: Send + Sync {
    /// Human-readable matcher name used in logs.
    fn name(&self) -> &str;

    /// Every match in `text`, in scan order. Duplicates are allowed.
    fn find(&self, text: &str) -> Vec<String>;

    /// Matches paired with their byte offsets in `text`.
    fn find_spans(&self, text: &str) -> Vec<(usize, String)> {
        self.find(text)
            .into_iter()
            .map(|value| (text.find(value.as_str()).unwrap_or(0), value))
            .collect()
    }

    /// Whether anything in `text` matches.
    fn is_match(&self, text: &str) -> bool {
        !self.find(text).is_empty()
    }

    /// Fixed vocabulary behind the matcher, if it has one.
    fn vocabulary(&self) -> &[String] {
        &[]
    }
}

/// Matcher backed by an ordered family of regular expressions.
pub struct RegexMatcher {
    name: String,
    patterns: Vec<Regex>,
    min_chars: usize,
}

impl RegexMatcher {
    /// Compile `patterns`, case-sensitively unless `case_insensitive` is set.
    pub fn new(
        name: impl Into<String>,
        patterns: &[&str],
        case_insensitive: bool,
    ) -> Result<Self, regex::Error> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(case_insensitive)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.into(),
            patterns,
            min_chars: 0,
        })
    }

    /// Drop matches shorter than `min_chars` characters.
    pub fn with_min_chars(mut self, min_chars: usize) -> Self {
        self.min_chars = min_chars;
        self
    }
}

impl TextMatcher for RegexMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, text: &str) -> Vec<String> {
        self.find_spans(text)
            .into_iter()
            .map(|(_, value)| value)
            .collect()
    }

    fn find_spans(&self, text: &str) -> Vec<(usize, String)> {
        let mut found = Vec::new();
        for pattern in &self.patterns {
            for hit in pattern.find_iter(text) {
                let value = hit.as_str().trim();
                if !value.is_empty() && value.chars().count() >= self.min_chars {
                    found.push((hit.start(), value.to_string()));
                }
            }
        }
        found
    }
}

/// Matcher backed by a fixed keyword vocabulary, matched as whole words
/// ignoring case. Keywords with spaces or punctuation match as substrings.
pub struct KeywordMatcher {
    name: String,
    keywords: Vec<String>,
    lowered: Vec<String>,
}

impl KeywordMatcher {
    /// Build a matcher over `keywords`; duplicates are dropped.
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        let mut unique: Vec<String> = Vec::with_capacity(keywords.len());
        for keyword in keywords {
            if !unique.iter().any(|seen| seen.eq_ignore_ascii_case(keyword)) {
                unique.push((*keyword).to_string());
            }
        }
        let lowered = unique.iter().map(|word| word.to_lowercase()).collect();
        Self {
            name: name.into(),
            keywords: unique,
            lowered,
        }
    }

    /// Vocabulary in declaration order, original casing.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl TextMatcher for KeywordMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn find(&self, text: &str) -> Vec<String> {
        let lowered_text = text.to_lowercase();
        let words: BTreeSet<String> = lowercase_words(text).into_iter().collect();
        self.keywords
            .iter()
            .zip(&self.lowered)
            .filter(|(_, lowered)| {
                if !lowered.chars().all(char::is_alphanumeric) {
                    lowered_text.contains(lowered.as_str())
                } else {
                    words.contains(lowered.as_str())
                }
            })
            .map(|(keyword, _)| keyword.clone())
            .collect()
    }

    fn vocabulary(&self) -> &[String] {
        &self.keywords
    }
}

/// Ordered set of matchers keyed by label.
pub struct MatcherRegistry<K: Ord + Copy> {
    matchers: BTreeMap<K, Box<dyn TextMatcher>>,
}

impl<K: Ord + Copy> Default for MatcherRegistry<K> {
    fn default() -> Self {
        Self {
            matchers: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy> MatcherRegistry<K> {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `matcher` under `key`, returning the matcher it replaced.
    pub fn register(
        &mut self,
        key: K,
        matcher: Box<dyn TextMatcher>,
    ) -> Option<Box<dyn TextMatcher>> {
        self.matchers.insert(key, matcher)
    }

    /// Remove the matcher registered under `key`.
    pub fn remove(&mut self, key: K) -> Option<Box<dyn TextMatcher>> {
        self.matchers.remove(&key)
    }

    /// Matcher registered under `key`.
    pub fn get(&self, key: K) -> Option<&dyn TextMatcher> {
        self.matchers.get(&key).map(|matcher| matcher.as_ref())
    }

    /// Registered keys in order.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.matchers.keys().copied()
    }

    /// Number of registered matchers.
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// Whether no matcher is registered.
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// Run every matcher; keys with no match are omitted.
    pub fn find_all(&self, text: &str) -> BTreeMap<K, BTreeSet<String>> {
        let mut found = BTreeMap::new();
        for (key, matcher) in &self.matchers {
            let hits: BTreeSet<String> = matcher.find(text).into_iter().collect();
            if !hits.is_empty() {
                found.insert(*key, hits);
            }
        }
        found
    }

    /// First key, in key order, whose matcher accepts `text`.
    pub fn first_match(&self, text: &str) -> Option<K> {
        self.matchers
            .iter()
            .find(|(_, matcher)| matcher.is_match(text))
            .map(|(key, _)| *key)
    }

    /// Key whose matcher reports the most hits; ties go to the earlier key.
    pub fn best_match(&self, text: &str) -> Option<(K, usize)> {
        let mut best: Option<(K, usize)> = None;
        for (key, matcher) in &self.matchers {
            let hits = matcher.find(text).len();
            if hits > 0 && best.is_none_or(|(_, top)| hits > top) {
                best = Some((*key, hits));
            }
        }
        best
    }
}
