//! `questions.json` for the anagram game.
//!
//! The list is shared with other question types, so entries without a
//! `correctWord` are skipped.
//!
//! ```json
//! { "list": [{ "scrambledWord": "tsur", "correctWord": "rust", "hint": "Oxidised iron" }] }
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct WordListDoc {
    #[serde(default)]
    pub list: Vec<ListEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    #[serde(default)]
    pub correct_word: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
}

/// A target word and its optional hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub word: String,
    pub hint: Option<String>,
}

impl WordEntry {
    pub fn new(word: impl Into<String>, hint: Option<&str>) -> Self {
        Self {
            word: word.into(),
            hint: hint.map(str::to_string),
        }
    }
}

fn default_words() -> Vec<WordEntry> {
    vec![
        WordEntry::new("APPLE", Some("A red or green fruit")),
        WordEntry::new("TIGER", Some("A big striped cat")),
        WordEntry::new("HOUSE", Some("A place to live")),
        WordEntry::new("WATER", Some("You drink it every day")),
        WordEntry::new("MUSIC", Some("Melody and rhythm")),
    ]
}

impl Default for WordListDoc {
    fn default() -> Self {
        Self {
            list: default_words()
                .into_iter()
                .map(|w| ListEntry {
                    correct_word: Some(w.word),
                    hint: w.hint,
                })
                .collect(),
        }
    }
}

impl WordListDoc {
    /// Playable words in document order. Never empty.
    pub fn words(&self) -> Vec<WordEntry> {
        let words: Vec<WordEntry> = self
            .list
            .iter()
            .filter_map(|entry| {
                let word = entry.correct_word.as_deref()?.trim();
                if word.is_empty() {
                    return None;
                }
                let hint = entry.hint.as_deref().filter(|h| !h.trim().is_empty());
                Some(WordEntry::new(word, hint))
            })
            .collect();

        if words.is_empty() {
            log::warn!("content has no anagram words, using the built-in list");
            default_words()
        } else {
            words
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_list_keeps_only_anagrams() {
        let json = r#"{ "list": [
            { "value": "Pick one", "answers": ["a", "b"], "correctAnswer": "a", "layout": "grid" },
            { "scrambledWord": "tsur", "correctWord": "rust", "hint": "Oxidised iron" },
            { "correctWord": "wasm" },
            { "correctWord": "   " }
        ]}"#;
        let doc: WordListDoc = serde_json::from_str(json).unwrap();
        let words = doc.words();
        assert_eq!(
            words,
            vec![WordEntry::new("rust", Some("Oxidised iron")), WordEntry::new("wasm", None)]
        );
    }

    #[test]
    fn no_anagrams_falls_back_to_built_in_list() {
        let doc: WordListDoc = serde_json::from_str(r#"{ "list": [{ "value": "x" }] }"#).unwrap();
        assert_eq!(doc.words(), default_words());
        let empty: WordListDoc = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.words().len(), 5);
    }

    #[test]
    fn default_document_round_trips_to_defaults() {
        assert_eq!(WordListDoc::default().words(), default_words());
    }
}
