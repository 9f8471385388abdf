//! Word-level highlighting inside a changed line.

use serde::Serialize;

use crate::edit_script::{edit_script, SpanKind};

/// How a word span relates to the other side of a changed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WordKind {
    Equal,
    Added,
    Removed,
}

/// A run of text on one side of a changed row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WordSpan {
    pub value: String,
    pub kind: WordKind,
}

/// Split `text` into word, whitespace and punctuation tokens.
///
/// Runs of alphanumeric characters (plus `_`) form one token, runs of
/// whitespace form one token, and every other character stands alone.
/// Concatenating the tokens yields `text` again.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current: Option<CharClass> = None;

    for (idx, ch) in text.char_indices() {
        let class = CharClass::of(ch);
        let continues = match current {
            Some(prev) => prev == class && class != CharClass::Other,
            None => false,
        };
        if !continues && idx > start {
            tokens.push(&text[start..idx]);
            start = idx;
        }
        current = Some(class);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }

    tokens
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum CharClass {
    Word,
    Space,
    Other,
}

impl CharClass {
    fn of(ch: char) -> Self {
        if ch.is_alphanumeric() || ch == '_' {
            CharClass::Word
        } else if ch.is_whitespace() {
            CharClass::Space
        } else {
            CharClass::Other
        }
    }
}

/// Diff two lines word by word, returning the spans for each side.
pub fn diff_words(left: &str, right: &str) -> (Vec<WordSpan>, Vec<WordSpan>) {
    let left_tokens = tokenize_words(left);
    let right_tokens = tokenize_words(right);

    let mut left_words = Vec::new();
    let mut right_words = Vec::new();

    for span in edit_script(&left_tokens, &right_tokens) {
        match span.kind {
            SpanKind::Equal => {
                let value = span.left_tokens(&left_tokens).concat();
                left_words.push(WordSpan {
                    value: value.clone(),
                    kind: WordKind::Equal,
                });
                right_words.push(WordSpan {
                    value,
                    kind: WordKind::Equal,
                });
            }
            SpanKind::Deleted => left_words.push(WordSpan {
                value: span.left_tokens(&left_tokens).concat(),
                kind: WordKind::Removed,
            }),
            SpanKind::Inserted => right_words.push(WordSpan {
                value: span.right_tokens(&right_tokens).concat(),
                kind: WordKind::Added,
            }),
        }
    }

    (left_words, right_words)
}
