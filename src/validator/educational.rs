use crate::data::QuestionType;
use crate::utils::{contains_word, lowercase_words};

/// Cognitive levels from recall up to synthesis, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BloomLevel {
    /// Recall facts.
    Remember,
    /// Explain ideas.
    Understand,
    /// Use knowledge in a new situation.
    Apply,
    /// Break material into parts.
    Analyze,
    /// Justify a judgement.
    Evaluate,
    /// Produce something new.
    Create,
}

impl BloomLevel {
    /// Every level, lowest first.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];

    /// Action verbs that signal this level.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            BloomLevel::Remember => &[
                "define", "identify", "list", "name", "recall", "recognize", "select", "state",
            ],
            BloomLevel::Understand => &[
                "describe",
                "explain",
                "interpret",
                "summarize",
                "classify",
                "compare",
                "contrast",
            ],
            BloomLevel::Apply => &[
                "apply",
                "demonstrate",
                "solve",
                "use",
                "implement",
                "execute",
                "carry out",
            ],
            BloomLevel::Analyze => &[
                "analyze",
                "categorize",
                "examine",
                "investigate",
                "distinguish",
                "differentiate",
            ],
            BloomLevel::Evaluate => &[
                "evaluate", "judge", "critique", "assess", "rate", "validate", "justify",
            ],
            BloomLevel::Create => &[
                "create",
                "design",
                "generate",
                "compose",
                "plan",
                "construct",
                "develop",
            ],
        }
    }

    /// Educational value of a question at this level.
    pub fn score(self) -> f32 {
        match self {
            BloomLevel::Remember => 60.0,
            BloomLevel::Understand => 70.0,
            BloomLevel::Apply => 80.0,
            BloomLevel::Analyze => 90.0,
            BloomLevel::Evaluate => 95.0,
            BloomLevel::Create => 100.0,
        }
    }

    /// Highest level whose keywords appear in `text`.
    pub fn detect(text: &str) -> Option<BloomLevel> {
        let words = lowercase_words(text);
        let phrase = words.join(" ");
        BloomLevel::ALL.into_iter().rev().find(|level| {
            level.keywords().iter().any(|keyword| {
                if keyword.contains(' ') {
                    phrase.contains(keyword)
                } else {
                    words.iter().any(|word| word == keyword)
                }
            })
        })
    }
}

fn type_base(kind: QuestionType) -> f32 {
    match kind {
        QuestionType::MultipleChoice => 70.0,
        QuestionType::TrueFalse => 60.0,
        QuestionType::FillInBlank => 75.0,
        QuestionType::ShortAnswer => 85.0,
        QuestionType::Matching | QuestionType::Mixed => 80.0,
    }
}

const EXAMPLE_WORDS: [&str; 4] = ["example", "instance", "case", "illustration"];
const REASONING_WORDS: [&str; 5] = ["why", "how", "explain", "justify", "reason"];

/// Educational value of a stem and the suggestions it earns.
pub fn validate(stem: &str, kind: QuestionType) -> (f32, Vec<String>) {
    let mut suggestions = Vec::new();
    let mut score = match BloomLevel::detect(stem) {
        Some(level) => level.score(),
        None => {
            suggestions.push(
                "Consider using action verbs that clearly indicate the learning objective"
                    .to_string(),
            );
            60.0
        }
    };

    if EXAMPLE_WORDS.iter().any(|word| contains_word(stem, word)) {
        score += 5.0;
    }
    if REASONING_WORDS.iter().any(|word| contains_word(stem, word)) {
        score += 10.0;
    }

    score = (score + type_base(kind)) / 2.0;

    if kind == QuestionType::TrueFalse && score < 80.0 {
        suggestions.push(
            "True/False questions work best for testing factual knowledge or misconceptions"
                .to_string(),
        );
    }
    if kind == QuestionType::MultipleChoice && contains_word(stem, "best") {
        suggestions.push(
            "'Best answer' questions can be effective for testing judgment and application"
                .to_string(),
        );
        score += 5.0;
    }

    (score.min(100.0), suggestions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_level_wins() {
        assert_eq!(
            BloomLevel::detect("Define and then evaluate the routing table"),
            Some(BloomLevel::Evaluate)
        );
        assert_eq!(
            BloomLevel::detect("How do teams carry out a rollout?"),
            Some(BloomLevel::Apply)
        );
        assert_eq!(BloomLevel::detect("Which device forwards packets?"), None);
    }

    #[test]
    fn keywords_match_whole_words_only() {
        // "username" must not read as "use" nor "name".
        assert_eq!(BloomLevel::detect("Which username is valid?"), None);
    }

    #[test]
    fn missing_objective_is_suggested() {
        let (score, suggestions) = validate("Which device forwards packets?", QuestionType::MultipleChoice);
        assert_eq!(score, 65.0);
        assert_eq!(suggestions.len(), 1);
    }

    #[test]
    fn reasoning_and_type_blend() {
        let (score, suggestions) = validate("Explain how a router works?", QuestionType::ShortAnswer);
        // understand 70 + reasoning 10, blended with 85.
        assert_eq!(score, 82.5);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn weak_true_false_gets_a_hint() {
        let (score, suggestions) = validate("True or False: A router forwards packets.", QuestionType::TrueFalse);
        assert_eq!(score, 60.0);
        assert!(suggestions.iter().any(|s| s.starts_with("True/False")));
    }

    #[test]
    fn best_answer_bonus_applies_to_multiple_choice() {
        let (score, suggestions) = validate("Which option best describes a router?", QuestionType::MultipleChoice);
        // "describes" is not a taxonomy verb: 60 blended with 70, plus 5.
        assert_eq!(score, 70.0);
        assert!(suggestions.iter().any(|s| s.starts_with("'Best answer'")));
    }
}
