//! Text normalization helpers shared by the extractors and the validator.

use crate::types::Sentence;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Heuristic sentence splitter with tokenizer-friendly rules.
pub fn sentences(text: &str) -> Vec<Sentence> {
    let mut results = Vec::new();

    for block in text.split("\n\n") {
        if block.trim().is_empty() {
            continue;
        }
        let normalized = normalize_inline_whitespace(block);
        if normalized.is_empty() {
            continue;
        }
        push_block_sentences(&normalized, &mut results);
    }

    results
}

/// Sentences longer than `min_chars` characters, in document order.
pub fn sentences_longer_than(text: &str, min_chars: usize) -> Vec<Sentence> {
    sentences(text)
        .into_iter()
        .filter(|sentence| sentence.chars().count() > min_chars)
        .collect()
}

/// Uppercase the first character and leave the rest untouched.
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Drop a leading `a`/`an`/`the` article.
pub fn strip_leading_article(text: &str) -> &str {
    let trimmed = text.trim();
    for article in ["a ", "an ", "the "] {
        if trimmed.len() > article.len()
            && trimmed.is_char_boundary(article.len())
            && trimmed[..article.len()].eq_ignore_ascii_case(article)
        {
            return trimmed[article.len()..].trim_start();
        }
    }
    trimmed
}

/// Turn a subject like `A router` into answer text like `Router`.
pub fn subject_to_answer(subject: &str) -> String {
    capitalize_first(strip_leading_article(subject))
}

/// Lowercased alphanumeric words of `text`.
pub fn lowercase_words(text: &str) -> Vec<String> {
    text.split(|ch: char| !ch.is_alphanumeric() && ch != '\'')
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Whether `text` contains `word` as a whole word, ignoring ASCII case.
pub fn contains_word(text: &str, word: &str) -> bool {
    let needle = word.to_lowercase();
    lowercase_words(text).iter().any(|candidate| *candidate == needle)
}

/// ASCII case-insensitive suffix test that never slices inside a character.
pub fn ends_with_ignore_ascii_case(text: &str, suffix: &str) -> bool {
    if suffix.len() > text.len() {
        return false;
    }
    let split = text.len() - suffix.len();
    text.is_char_boundary(split) && text[split..].eq_ignore_ascii_case(suffix)
}

fn push_block_sentences(block: &str, results: &mut Vec<Sentence>) {
    let chars: Vec<char> = block.chars().collect();
    let mut buffer = String::new();

    for (idx, ch) in chars.iter().enumerate() {
        buffer.push(*ch);
        if is_sentence_boundary(&chars, idx) {
            let trimmed = buffer.trim();
            if !trimmed.is_empty() {
                results.push(trimmed.to_string());
            }
            buffer.clear();
        }
    }

    let trailing = buffer.trim();
    if !trailing.is_empty() {
        results.push(trailing.to_string());
    }
}

fn is_sentence_boundary(chars: &[char], idx: usize) -> bool {
    match chars[idx] {
        '.' => is_dot_boundary(chars, idx),
        '!' | '?' => true,
        _ => false,
    }
}

fn is_dot_boundary(chars: &[char], idx: usize) -> bool {
    if is_decimal_middle(chars, idx) || is_identifier_middle(chars, idx) {
        return false;
    }
    if idx + 1 < chars.len() && chars[idx + 1] == '.' {
        return false;
    }
    true
}

fn is_decimal_middle(chars: &[char], idx: usize) -> bool {
    idx > 0
        && idx + 1 < chars.len()
        && chars[idx - 1].is_ascii_digit()
        && chars[idx + 1].is_ascii_digit()
}

fn is_identifier_middle(chars: &[char], idx: usize) -> bool {
    idx > 0
        && idx + 1 < chars.len()
        && is_identifier_char(chars[idx - 1])
        && is_identifier_char(chars[idx + 1])
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_uppercase() || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_whitespace_collapses_runs() {
        let input = "Alpha\n\n  Beta\tGamma";
        assert_eq!(normalize_inline_whitespace(input), "Alpha Beta Gamma");
    }

    #[test]
    fn sentences_falls_back_to_full_text_when_needed() {
        let text = "   \n";
        let result = sentences(text);
        assert!(result.is_empty());

        let text2 = "Single block without punctuation";
        let result2 = sentences(text2);
        assert_eq!(
            result2,
            vec![String::from("Single block without punctuation")]
        );
    }

    #[test]
    fn sentences_longer_than_drops_fragments() {
        let text = "Ok. Routers forward packets between networks.";
        assert_eq!(
            sentences_longer_than(text, 15),
            vec!["Routers forward packets between networks."]
        );
    }

    #[test]
    fn subject_to_answer_strips_article_and_capitalizes() {
        assert_eq!(subject_to_answer("A router"), "Router");
        assert_eq!(subject_to_answer("the OSI model"), "OSI model");
        assert_eq!(subject_to_answer("Another device"), "Another device");
        assert_eq!(subject_to_answer("photosynthesis"), "Photosynthesis");
    }

    #[test]
    fn contains_word_matches_whole_words_only() {
        assert!(contains_word("Which is the BEST option?", "best"));
        assert!(!contains_word("bestow the title", "best"));
    }

    #[test]
    fn suffix_check_is_char_boundary_safe() {
        assert!(ends_with_ignore_ascii_case("STATION", "tion"));
        assert!(!ends_with_ignore_ascii_case("\u{e9}a", "xa"));
        assert!(!ends_with_ignore_ascii_case("ly", "ally"));
    }

    #[test]
    fn sentences_keep_decimal_values_together() {
        let text = "Pi is roughly 3.14. Circles use it.";
        let result = sentences(text);
        assert_eq!(result, vec!["Pi is roughly 3.14.", "Circles use it."]);
    }

    #[test]
    fn sentences_keep_dotted_identifiers_together() {
        let text = "IPV4.X headers differ from IPV6.Y headers.";
        let result = sentences(text);
        assert_eq!(result, vec!["IPV4.X headers differ from IPV6.Y headers."]);
    }

    #[test]
    fn sentences_treat_blank_line_as_boundary() {
        let text = "First line without punctuation\n\nSecond line with more context.";
        let result = sentences(text);
        assert_eq!(
            result,
            vec![
                "First line without punctuation".to_string(),
                "Second line with more context.".to_string()
            ]
        );
    }
}
