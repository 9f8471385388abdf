//! Line-level diff: side-by-side rows for two texts.
//!
//! Lines are aligned with a minimal edit script, then adjacent deleted and
//! inserted runs are paired position by position into `changed` rows so a
//! renderer can show the old and new version of a line next to each other.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::edit_script::{edit_script, edit_script_by_key, EditSpan, SpanKind};
use crate::words::{diff_words, WordSpan};

/// Options for [`diff_text`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextDiffOptions {
    /// Treat lines as equal when they only differ in whitespace runs or
    /// leading/trailing whitespace.
    pub ignore_whitespace: bool,
    /// Attach word-level spans to `changed` rows.
    pub word_diff: bool,
}

/// The kind of a display row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Equal,
    Added,
    Removed,
    Changed,
}

/// One row of a side-by-side diff.
///
/// Line numbers are 1-based and only present for the sides that carry a
/// line. Word spans are only set on `changed` rows when word diffing was
/// requested.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub kind: RowKind,
    pub left_line_number: Option<usize>,
    pub right_line_number: Option<usize>,
    pub left_text: String,
    pub right_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_words: Option<Vec<WordSpan>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_words: Option<Vec<WordSpan>>,
}

impl DisplayRow {
    fn removed(line: usize, text: &str) -> Self {
        Self {
            kind: RowKind::Removed,
            left_line_number: Some(line),
            right_line_number: None,
            left_text: text.to_string(),
            right_text: String::new(),
            left_words: None,
            right_words: None,
        }
    }

    fn added(line: usize, text: &str) -> Self {
        Self {
            kind: RowKind::Added,
            left_line_number: None,
            right_line_number: Some(line),
            left_text: String::new(),
            right_text: text.to_string(),
            left_words: None,
            right_words: None,
        }
    }
}

/// The result of diffing two texts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LineDiff {
    pub rows: Vec<DisplayRow>,
}

impl LineDiff {
    /// Returns `true` if every row is `equal`.
    pub fn is_identical(&self) -> bool {
        self.rows.iter().all(|r| r.kind == RowKind::Equal)
    }

    /// Number of rows of the given kind.
    pub fn count(&self, kind: RowKind) -> usize {
        self.rows.iter().filter(|r| r.kind == kind).count()
    }

    /// Number of rows present only on the right.
    pub fn additions(&self) -> usize {
        self.count(RowKind::Added)
    }

    /// Number of rows present only on the left.
    pub fn removals(&self) -> usize {
        self.count(RowKind::Removed)
    }

    /// Number of paired rows whose sides differ.
    pub fn changes(&self) -> usize {
        self.count(RowKind::Changed)
    }
}

/// Split text into lines.
///
/// A trailing line break does not start another line, so `"a\n"` is one
/// line and `"\n"` is a single empty line. Empty text has no lines. A `\r`
/// directly before `\n` is part of the break.
pub fn tokenize_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n')
        .map(|line| match line.strip_suffix('\n') {
            Some(line) => line.strip_suffix('\r').unwrap_or(line),
            None => line,
        })
        .collect()
}

/// Collapse whitespace runs to a single space and trim both ends.
pub fn normalize_whitespace(line: &str) -> String {
    line.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Compute the side-by-side rows for `left` and `right`.
pub fn diff_text(left: &str, right: &str, options: &TextDiffOptions) -> LineDiff {
    let left_lines = tokenize_lines(left);
    let right_lines = tokenize_lines(right);

    let spans = if options.ignore_whitespace {
        edit_script_by_key(&left_lines, &right_lines, |line| normalize_whitespace(line))
    } else {
        edit_script(&left_lines, &right_lines)
    };

    let raw = expand_spans(&spans, &left_lines, &right_lines);
    let mut rows = pair_blocks(&raw);

    for row in rows.iter_mut().filter(|r| r.kind == RowKind::Changed) {
        if options.ignore_whitespace
            && normalize_whitespace(&row.left_text) == normalize_whitespace(&row.right_text)
        {
            row.kind = RowKind::Equal;
            continue;
        }
        if options.word_diff {
            let (left_words, right_words) = diff_words(&row.left_text, &row.right_text);
            row.left_words = Some(left_words);
            row.right_words = Some(right_words);
        }
    }

    debug!(
        left_lines = left_lines.len(),
        right_lines = right_lines.len(),
        rows = rows.len(),
        "text diff computed"
    );

    LineDiff { rows }
}

/// A per-line row before block pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RawRow<'a> {
    Equal {
        left_line: usize,
        right_line: usize,
        left_text: &'a str,
        right_text: &'a str,
    },
    Removed {
        left_line: usize,
        text: &'a str,
    },
    Added {
        right_line: usize,
        text: &'a str,
    },
}

fn expand_spans<'a>(spans: &[EditSpan], left: &[&'a str], right: &[&'a str]) -> Vec<RawRow<'a>> {
    let mut rows = Vec::with_capacity(left.len().max(right.len()));
    let mut left_line = 1;
    let mut right_line = 1;

    for span in spans {
        match span.kind {
            SpanKind::Equal => {
                let pairs = span.left_tokens(left).iter().zip(span.right_tokens(right));
                for (&left_text, &right_text) in pairs {
                    rows.push(RawRow::Equal {
                        left_line,
                        right_line,
                        left_text,
                        right_text,
                    });
                    left_line += 1;
                    right_line += 1;
                }
            }
            SpanKind::Deleted => {
                for &text in span.left_tokens(left) {
                    rows.push(RawRow::Removed { left_line, text });
                    left_line += 1;
                }
            }
            SpanKind::Inserted => {
                for &text in span.right_tokens(right) {
                    rows.push(RawRow::Added { right_line, text });
                    right_line += 1;
                }
            }
        }
    }

    rows
}

/// Pair each removed run with the added run directly after it.
///
/// Pairs are formed in order up to the shorter run's length; the rest of the
/// longer run follows the pairs as plain removed or added rows.
fn pair_blocks(raw: &[RawRow<'_>]) -> Vec<DisplayRow> {
    let mut rows = Vec::with_capacity(raw.len());
    let mut index = 0;

    while index < raw.len() {
        match raw[index] {
            RawRow::Equal {
                left_line,
                right_line,
                left_text,
                right_text,
            } => {
                rows.push(DisplayRow {
                    kind: RowKind::Equal,
                    left_line_number: Some(left_line),
                    right_line_number: Some(right_line),
                    left_text: left_text.to_string(),
                    right_text: right_text.to_string(),
                    left_words: None,
                    right_words: None,
                });
                index += 1;
            }
            RawRow::Added { right_line, text } => {
                rows.push(DisplayRow::added(right_line, text));
                index += 1;
            }
            RawRow::Removed { .. } => {
                let removed_end = run_end(raw, index, |r| matches!(r, RawRow::Removed { .. }));
                let added_end = run_end(raw, removed_end, |r| matches!(r, RawRow::Added { .. }));
                let removed = &raw[index..removed_end];
                let added = &raw[removed_end..added_end];

                for (old, new) in removed.iter().zip(added) {
                    if let (
                        RawRow::Removed { left_line, text: left_text },
                        RawRow::Added { right_line, text: right_text },
                    ) = (old, new)
                    {
                        rows.push(DisplayRow {
                            kind: RowKind::Changed,
                            left_line_number: Some(*left_line),
                            right_line_number: Some(*right_line),
                            left_text: left_text.to_string(),
                            right_text: right_text.to_string(),
                            left_words: None,
                            right_words: None,
                        });
                    }
                }

                let paired = removed.len().min(added.len());
                for row in &removed[paired..] {
                    if let RawRow::Removed { left_line, text } = row {
                        rows.push(DisplayRow::removed(*left_line, text));
                    }
                }
                for row in &added[paired..] {
                    if let RawRow::Added { right_line, text } = row {
                        rows.push(DisplayRow::added(*right_line, text));
                    }
                }

                index = added_end;
            }
        }
    }

    rows
}

fn run_end(raw: &[RawRow<'_>], start: usize, pred: impl Fn(&RawRow<'_>) -> bool) -> usize {
    raw[start..]
        .iter()
        .position(|r| !pred(r))
        .map_or(raw.len(), |offset| start + offset)
}
