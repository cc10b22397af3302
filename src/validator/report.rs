use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::validator::{CATEGORY_CLARITY, CATEGORY_DISTRACTORS, CATEGORY_GRAMMAR};
use crate::types::IssueCategory;

/// How serious a validation finding is.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Likely to confuse or mislead.
    Critical,
    /// Worth fixing.
    Warning,
    /// Minor note.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        f.write_str(label)
    }
}

/// One finding raised while validating a question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// How serious the finding is.
    pub severity: Severity,
    /// `Grammar`, `Clarity`, or `Distractors`.
    pub category: IssueCategory,
    /// What was found.
    pub message: String,
    /// How to fix it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Where the issue was found, e.g. `Question 2: Position 4-9`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl ValidationIssue {
    /// Issue without suggestion or location.
    pub fn new(severity: Severity, category: &str, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.to_string(),
            message: message.into(),
            suggestion: None,
            location: None,
        }
    }

    /// Attach a suggestion.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a location.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Per-question scores on a 0-100 scale, rounded to one decimal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuestionScore {
    /// Weighted blend of the five axes.
    pub overall_score: f32,
    /// Grammar axis.
    pub grammar_score: f32,
    /// Clarity axis.
    pub clarity_score: f32,
    /// Educational value axis.
    pub educational_score: f32,
    /// Distractor quality axis.
    pub distractor_score: f32,
    /// Agreement between stated and estimated difficulty.
    pub difficulty_consistency: f32,
    /// Findings for this question.
    pub issues: Vec<ValidationIssue>,
    /// Improvement suggestions for this question.
    pub suggestions: Vec<String>,
}

/// Batch averages, rounded to one decimal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AverageScores {
    /// Mean overall score.
    pub overall: f32,
    /// Mean grammar score.
    pub grammar: f32,
    /// Mean clarity score.
    pub clarity: f32,
    /// Mean educational score.
    pub educational: f32,
    /// Mean distractor score.
    pub distractor: f32,
}

/// Issue counts by severity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueSummary {
    /// All issues.
    pub total: usize,
    /// Critical issues.
    pub critical: usize,
    /// Warnings.
    pub warnings: usize,
    /// Informational notes.
    pub info: usize,
}

/// Qualitative batch rating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityRating {
    /// Average of at least 85.
    Excellent,
    /// Average of at least 75.
    Good,
    /// Average of at least 60.
    Acceptable,
    /// Average below 60.
    NeedsImprovement,
    /// The batch was empty.
    NoQuestions,
}

impl QualityRating {
    /// Rating for an average overall score.
    pub fn from_average(average: f32) -> Self {
        if average >= 85.0 {
            QualityRating::Excellent
        } else if average >= 75.0 {
            QualityRating::Good
        } else if average >= 60.0 {
            QualityRating::Acceptable
        } else {
            QualityRating::NeedsImprovement
        }
    }
}

impl fmt::Display for QualityRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QualityRating::Excellent => "Excellent",
            QualityRating::Good => "Good",
            QualityRating::Acceptable => "Acceptable",
            QualityRating::NeedsImprovement => "Needs Improvement",
            QualityRating::NoQuestions => "No questions to validate",
        };
        f.write_str(label)
    }
}

/// Aggregated validation of a batch of questions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Qualitative rating of the batch.
    pub rating: QualityRating,
    /// Per-axis averages.
    pub averages: AverageScores,
    /// Issue counts by severity.
    pub issue_summary: IssueSummary,
    /// Per-question scores, in batch order.
    pub scores: Vec<QuestionScore>,
    /// Every issue, tagged with the question it came from.
    pub issues: Vec<ValidationIssue>,
    /// `Q{n}: ...` suggestions, capped.
    pub recommendations: Vec<String>,
    /// Short plain-text takeaways for the whole batch.
    pub summary: Vec<String>,
}

pub(crate) fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl Iterator<Item = f32>, count: usize) -> f32 {
    if count == 0 {
        0.0
    } else {
        values.sum::<f32>() / count as f32
    }
}

/// Fold per-question scores into a batch report.
pub fn aggregate(scores: Vec<QuestionScore>, max_recommendations: usize) -> ValidationReport {
    let count = scores.len();
    let mut issues = Vec::new();
    let mut recommendations = Vec::new();
    for (index, score) in scores.iter().enumerate() {
        let number = index + 1;
        for issue in &score.issues {
            let mut tagged = issue.clone();
            tagged.location = Some(match &issue.location {
                Some(location) => format!("Question {number}: {location}"),
                None => format!("Question {number}"),
            });
            issues.push(tagged);
        }
        recommendations.extend(
            score
                .suggestions
                .iter()
                .map(|suggestion| format!("Q{number}: {suggestion}")),
        );
    }
    recommendations.truncate(max_recommendations);

    let averages = AverageScores {
        overall: round1(mean(scores.iter().map(|s| s.overall_score), count)),
        grammar: round1(mean(scores.iter().map(|s| s.grammar_score), count)),
        clarity: round1(mean(scores.iter().map(|s| s.clarity_score), count)),
        educational: round1(mean(scores.iter().map(|s| s.educational_score), count)),
        distractor: round1(mean(scores.iter().map(|s| s.distractor_score), count)),
    };
    let critical = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Critical)
        .count();
    let warnings = issues
        .iter()
        .filter(|issue| issue.severity == Severity::Warning)
        .count();
    let issue_summary = IssueSummary {
        total: issues.len(),
        critical,
        warnings,
        info: issues.len() - critical - warnings,
    };
    let rating = if count == 0 {
        QualityRating::NoQuestions
    } else {
        QualityRating::from_average(averages.overall)
    };
    let summary = summarize(&scores, &issues);

    ValidationReport {
        rating,
        averages,
        issue_summary,
        scores,
        issues,
        recommendations,
        summary,
    }
}

fn summarize(scores: &[QuestionScore], issues: &[ValidationIssue]) -> Vec<String> {
    if scores.is_empty() {
        return vec![QualityRating::NoQuestions.to_string()];
    }
    let count = scores.len() as f32;
    let mut summary = Vec::new();
    let average = mean(scores.iter().map(|s| s.overall_score), scores.len());
    if average >= 80.0 {
        summary.push("Quiz quality is good overall".to_string());
    } else {
        summary.push("Quiz quality needs improvement".to_string());
    }
    let in_category = |category: &str| {
        issues
            .iter()
            .filter(|issue| issue.category == category)
            .count() as f32
    };
    if in_category(CATEGORY_GRAMMAR) > count * 0.3 {
        summary.push("Focus on improving grammar and sentence structure".to_string());
    }
    if in_category(CATEGORY_CLARITY) > count * 0.3 {
        summary.push("Work on making questions clearer and less ambiguous".to_string());
    }
    if in_category(CATEGORY_DISTRACTORS) > count * 0.2 {
        summary.push("Improve distractor quality for multiple choice questions".to_string());
    }
    let educational = mean(scores.iter().map(|s| s.educational_score), scores.len());
    if educational < 70.0 {
        summary.push("Consider aligning questions more closely with learning objectives".to_string());
    }
    summary
}
