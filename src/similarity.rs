// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Scoring a typed answer against the answer on the back of a card.

use std::collections::HashSet;

use strsim::normalized_levenshtein;

/// Weight of the word-overlap ratio in the final score. The remainder goes
/// to the character-level ratio.
const WORD_WEIGHT: f64 = 0.7;
const CHAR_WEIGHT: f64 = 0.3;

/// Compare a user's answer with the correct answer. Returns a value in
/// `[0, 1]`, where `1` means the answers are identical after normalization.
pub fn score(user_answer: &str, correct_answer: &str) -> f64 {
    let text1 = normalize(user_answer);
    let text2 = normalize(correct_answer);
    if text1 == text2 {
        return 1.0;
    }
    let word = word_similarity(&text1, &text2);
    let chr = normalized_levenshtein(&text1, &text2);
    WORD_WEIGHT * word + CHAR_WEIGHT * chr
}

/// Lowercase, drop everything that is neither an ASCII word character nor
/// whitespace, and trim.
fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || is_space(*c))
        .collect::<String>()
        .trim_matches(is_space)
        .to_string()
}

/// The whitespace set used for normalizing and tokenizing. Unicode
/// `White_Space` minus NEL (U+0085), plus the byte order mark (U+FEFF).
fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Splits on whitespace runs. An empty string yields a single empty token.
fn tokens(text: &str) -> Vec<&str> {
    if text.is_empty() {
        vec![""]
    } else {
        text.split(is_space).filter(|t| !t.is_empty()).collect()
    }
}

/// Fraction of distinct tokens present on both sides, relative to the
/// longer token list. Repeated tokens only count once.
fn word_similarity(text1: &str, text2: &str) -> f64 {
    let words1 = tokens(text1);
    let words2 = tokens(text2);
    let longest = words1.len().max(words2.len());
    if longest == 0 {
        return 0.0;
    }
    let set1: HashSet<&str> = words1.iter().copied().collect();
    let set2: HashSet<&str> = words2.iter().copied().collect();
    let common = set1.intersection(&set2).count();
    common as f64 / longest as f64
}

/// Coarse grading of a score, for feedback.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Band {
    High,
    Medium,
    Low,
}

impl Band {
    pub fn of(score: f64) -> Self {
        if score >= 0.8 {
            Band::High
        } else if score >= 0.5 {
            Band::Medium
        } else {
            Band::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Band::High => "Excellent match!",
            Band::Medium => "Good attempt!",
            Band::Low => "Low similarity",
        }
    }

    pub fn encouragement(&self) -> &'static str {
        match self {
            Band::High => "Great job!",
            Band::Medium => "You're on the right track!",
            Band::Low => "Keep practicing!",
        }
    }

    /// CSS class used when rendering the band.
    pub fn css_class(&self) -> &'static str {
        match self {
            Band::High => "similarity-high",
            Band::Medium => "similarity-medium",
            Band::Low => "similarity-low",
        }
    }
}

/// Score as a whole percentage.
pub fn percent(score: f64) -> u32 {
    (score * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical() {
        assert_eq!(score("Paris", "Paris"), 1.0);
        assert_eq!(score("a card", "a card"), 1.0);
    }

    #[test]
    fn test_identical_after_normalization() {
        assert_eq!(score("  PARIS!! ", "paris"), 1.0);
        assert_eq!(score("It's metacognition.", "its metacognition"), 1.0);
    }

    #[test]
    fn test_empty() {
        assert_eq!(score("", ""), 1.0);
        assert!(score("a", "") < 1.0);
        assert_eq!(score("a", ""), 0.0);
        assert_eq!(score("!!!", "?"), 1.0);
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("A card bearing information", "A card with info"),
            ("spaced repetition", "repetition spaced"),
            ("kitten", "sitting"),
            ("", "something"),
            ("the the the", "the"),
        ];
        for (a, b) in pairs {
            assert_eq!(score(a, b), score(b, a), "{a:?} vs {b:?}");
        }
    }

    #[test]
    fn test_bounds() {
        let inputs = [
            "",
            "a",
            "hello world",
            "Über café",
            "completely different",
            "123 456",
            "   ",
        ];
        for a in inputs {
            for b in inputs {
                let s = score(a, b);
                assert!((0.0..=1.0).contains(&s), "{a:?} vs {b:?} = {s}");
            }
        }
    }

    #[test]
    fn test_medium_range() {
        let s = score("A card bearing information", "A card with info");
        assert!(s > 0.4 && s < 0.7, "got {s}");
    }

    #[test]
    fn test_word_order_only() {
        // All words shared, characters mostly rearranged.
        let s = score("spaced repetition", "repetition spaced");
        assert!(s >= 0.7, "got {s}");
        assert!(s < 1.0);
    }

    #[test]
    fn test_repeated_words_counted_once() {
        // Tokens: ["the", "the"] vs ["the"]; one common word over two.
        assert_eq!(word_similarity("the the", "the"), 0.5);
    }

    #[test]
    fn test_character_part() {
        // Single-word answers share no token, so only the character part
        // contributes: 0.3 * (1 - 3/7).
        let s = score("kitten", "sitting");
        assert!((s - 0.3 * (1.0 - 3.0 / 7.0)).abs() < 1e-9, "got {s}");
        assert_eq!(normalized_levenshtein("", ""), 1.0);
    }

    #[test]
    fn test_whitespace_set() {
        assert_eq!(tokens("a\u{feff}b"), vec!["a", "b"]);
        assert_eq!(tokens("a\u{85}b"), vec!["a\u{85}b"]);
        assert_eq!(normalize("\u{feff} paris \u{3000}"), "paris");
        assert_eq!(normalize("a\u{85}b"), "ab");
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Hello, World!  "), "hello world");
        assert_eq!(normalize("snake_case-word"), "snake_caseword");
        assert_eq!(normalize("naïve"), "nave");
    }

    #[test]
    fn test_bands() {
        assert_eq!(Band::of(1.0), Band::High);
        assert_eq!(Band::of(0.8), Band::High);
        assert_eq!(Band::of(0.79), Band::Medium);
        assert_eq!(Band::of(0.5), Band::Medium);
        assert_eq!(Band::of(0.49), Band::Low);
        assert_eq!(percent(0.456), 46);
    }
}
