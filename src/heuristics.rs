use std::fmt;

use crate::data::Difficulty;
use crate::patterns::{MatcherRegistry, RegexMatcher};

/// Subject area a finished question is filed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QuestionCategory {
    /// Natural sciences.
    Science,
    /// History and politics.
    History,
    /// Mathematics.
    Mathematics,
    /// Literature and writing.
    Literature,
    /// Computing and networking.
    Technology,
    /// Business and economics.
    Business,
    /// Anything else.
    General,
}

impl QuestionCategory {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionCategory::Science => "science",
            QuestionCategory::History => "history",
            QuestionCategory::Mathematics => "mathematics",
            QuestionCategory::Literature => "literature",
            QuestionCategory::Technology => "technology",
            QuestionCategory::Business => "business",
            QuestionCategory::General => "general",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CATEGORY_KEYWORDS: [(QuestionCategory, &[&str]); 6] = [
    (
        QuestionCategory::Science,
        &[
            "experiment", "hypothesis", "theory", "research", "data", "analysis", "biology",
            "chemistry", "physics",
        ],
    ),
    (
        QuestionCategory::History,
        &[
            "century", "war", "revolution", "empire", "civilization", "ancient", "medieval",
            "modern",
        ],
    ),
    (
        QuestionCategory::Mathematics,
        &[
            "equation", "formula", "calculate", "solve", "number", "algebra", "geometry",
            "statistics",
        ],
    ),
    (
        QuestionCategory::Literature,
        &[
            "author", "novel", "poem", "character", "plot", "theme", "symbolism", "metaphor",
        ],
    ),
    (
        QuestionCategory::Technology,
        &[
            "computer", "software", "algorithm", "network", "database", "programming",
            "digital", "router", "protocol",
        ],
    ),
    (
        QuestionCategory::Business,
        &[
            "market", "profit", "revenue", "strategy", "management", "economics", "finance",
            "investment",
        ],
    ),
];

/// Files questions under the category with the most keyword hits.
///
/// Keywords match at word starts, so `network` also covers `networks` and
/// `networking`. Ties go to the category declared first.
pub struct CategoryClassifier {
    registry: MatcherRegistry<QuestionCategory>,
}

impl CategoryClassifier {
    /// Classifier with the built-in keyword sets.
    pub fn new() -> Self {
        let mut registry = MatcherRegistry::new();
        for (category, keywords) in CATEGORY_KEYWORDS {
            let pattern = format!(r"\b(?:{})\w*", keywords.join("|"));
            let matcher = RegexMatcher::new(category.as_str(), &[pattern.as_str()], true)
                .expect("category keywords compile");
            registry.register(category, Box::new(matcher));
        }
        Self { registry }
    }

    /// Mutable registry, for adding or replacing categories.
    pub fn registry_mut(&mut self) -> &mut MatcherRegistry<QuestionCategory> {
        &mut self.registry
    }

    /// Category with the most keyword hits in `text`, else `General`.
    pub fn classify(&self, text: &str) -> QuestionCategory {
        self.registry
            .best_match(text)
            .map_or(QuestionCategory::General, |(category, _)| category)
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Difficulty of an externally seeded pair from its combined size.
pub fn difficulty_for_pair(question: &str, answer: &str) -> Difficulty {
    let chars = question.chars().count() + answer.chars().count();
    let words = question.split_whitespace().count() + answer.split_whitespace().count();
    if chars < 50 || words < 8 {
        Difficulty::Easy
    } else if chars < 120 || words < 15 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

/// Render a 0-100 score with one decimal, e.g. `87.5/100`.
pub fn format_score(score: f32) -> String {
    format!("{score:.1}/100")
}
