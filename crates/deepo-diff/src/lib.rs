//! Diff engine for Deepo.
//!
//! Two independent comparison tools built on pure functions:
//!
//! - a side-by-side **line diff** that pairs removed and added lines into
//!   `changed` rows, optionally ignoring whitespace and highlighting words;
//! - a **structural JSON diff** that reports added, removed and changed
//!   locations by path, optionally comparing primitive arrays as multisets.
//!
//! # Key Types
//!
//! - [`LineDiff`] / [`DisplayRow`] / [`WordSpan`] -- Side-by-side text diff
//! - [`JsonDiff`] / [`JsonChange`] / [`JsonPath`] -- Structural JSON diff
//! - [`EditSpan`] -- Minimal edit script over arbitrary token sequences
//!
//! # Example
//!
//! ```
//! use deepo_diff::{diff_json_semantic, parse_json_pair, JsonDiffOptions};
//!
//! let pair = parse_json_pair(r#"{"a":1,"b":2}"#, r#"{"a":3,"c":2}"#).unwrap();
//! let diff = diff_json_semantic(&pair.left, &pair.right, &JsonDiffOptions::default());
//! assert_eq!(diff.removed[0].as_str(), "$.b");
//! assert_eq!(diff.added[0].as_str(), "$.c");
//! ```

pub mod edit_script;
pub mod error;
pub mod json_diff;
pub mod json_path;
pub mod line_diff;
pub mod words;

pub use edit_script::{edit_script, edit_script_by_key, EditSpan, SpanKind};
pub use error::{DiffError, DiffResult, Side};
pub use json_diff::{
    diff_json_semantic, parse_json_pair, JsonChange, JsonDiff, JsonDiffOptions, JsonPair,
};
pub use json_path::JsonPath;
pub use line_diff::{
    diff_text, normalize_whitespace, tokenize_lines, DisplayRow, LineDiff, RowKind,
    TextDiffOptions,
};
pub use words::{diff_words, tokenize_words, WordKind, WordSpan};
