//! Minimal edit scripts between two token sequences.
//!
//! Wraps the Myers implementation of the `similar` crate behind a stateless
//! function returning [`EditSpan`]s. Each span addresses a range of the left
//! and right sequences, so callers comparing tokens under a normalization can
//! still recover the original tokens of both sides.

use std::hash::Hash;
use std::ops::Range;

use serde::Serialize;
use similar::{Algorithm, DiffOp};

/// The disposition of a run of tokens in an edit script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanKind {
    /// Tokens present in both sequences.
    Equal,
    /// Tokens present only in the right sequence.
    Inserted,
    /// Tokens present only in the left sequence.
    Deleted,
}

/// A contiguous run of tokens sharing one [`SpanKind`].
///
/// `left` and `right` index into the two input sequences. `Equal` spans
/// cover ranges of the same length on both sides; `Deleted` spans have an
/// empty `right` range and `Inserted` spans an empty `left` range, positioned
/// where the run sits relative to the other sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditSpan {
    pub kind: SpanKind,
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl EditSpan {
    /// Number of tokens in this span.
    pub fn len(&self) -> usize {
        match self.kind {
            SpanKind::Equal | SpanKind::Deleted => self.left.len(),
            SpanKind::Inserted => self.right.len(),
        }
    }

    /// Returns `true` if the span covers no tokens.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The tokens this span refers to.
    ///
    /// For `Equal` spans the left-side tokens are returned; use
    /// [`EditSpan::right_tokens`] when the right side's originals matter.
    pub fn tokens<'a, T>(&self, left: &'a [T], right: &'a [T]) -> &'a [T] {
        match self.kind {
            SpanKind::Equal | SpanKind::Deleted => &left[self.left.clone()],
            SpanKind::Inserted => &right[self.right.clone()],
        }
    }

    /// The left-side tokens covered by this span (empty for insertions).
    pub fn left_tokens<'a, T>(&self, left: &'a [T]) -> &'a [T] {
        &left[self.left.clone()]
    }

    /// The right-side tokens covered by this span (empty for deletions).
    pub fn right_tokens<'a, T>(&self, right: &'a [T]) -> &'a [T] {
        &right[self.right.clone()]
    }
}

/// Compute a minimal edit script turning `left` into `right`.
///
/// Every token of both sequences is covered by exactly one span, in original
/// order. Within a changed region deletions come before insertions, and
/// adjacent spans of the same kind are merged.
pub fn edit_script<T>(left: &[T], right: &[T]) -> Vec<EditSpan>
where
    T: Hash + Eq + Ord,
{
    let ops = similar::capture_diff_slices(Algorithm::Myers, left, right);
    let mut spans: Vec<EditSpan> = Vec::with_capacity(ops.len());

    for op in ops {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => push_span(
                &mut spans,
                SpanKind::Equal,
                old_index..old_index + len,
                new_index..new_index + len,
            ),
            DiffOp::Delete {
                old_index,
                old_len,
                new_index,
            } => push_span(
                &mut spans,
                SpanKind::Deleted,
                old_index..old_index + old_len,
                new_index..new_index,
            ),
            DiffOp::Insert {
                old_index,
                new_index,
                new_len,
            } => push_span(
                &mut spans,
                SpanKind::Inserted,
                old_index..old_index,
                new_index..new_index + new_len,
            ),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                // Split into Delete + Insert so block pairing sees both runs.
                push_span(
                    &mut spans,
                    SpanKind::Deleted,
                    old_index..old_index + old_len,
                    new_index..new_index,
                );
                push_span(
                    &mut spans,
                    SpanKind::Inserted,
                    old_index + old_len..old_index + old_len,
                    new_index..new_index + new_len,
                );
            }
        }
    }

    spans
}

/// Compute an edit script where tokens compare equal when their keys do.
///
/// This is how callers express a custom equality: project each token to a
/// normalized key (for example whitespace-collapsed text) and diff the keys.
/// The returned ranges index into the original `left` and `right` slices.
pub fn edit_script_by_key<T, K, F>(left: &[T], right: &[T], key: F) -> Vec<EditSpan>
where
    K: Hash + Eq + Ord,
    F: Fn(&T) -> K,
{
    let left_keys: Vec<K> = left.iter().map(&key).collect();
    let right_keys: Vec<K> = right.iter().map(&key).collect();
    edit_script(&left_keys, &right_keys)
}

fn push_span(spans: &mut Vec<EditSpan>, kind: SpanKind, left: Range<usize>, right: Range<usize>) {
    if left.is_empty() && right.is_empty() {
        return;
    }
    if let Some(last) = spans.last_mut() {
        if last.kind == kind && last.left.end == left.start && last.right.end == right.start {
            last.left.end = left.end;
            last.right.end = right.end;
            return;
        }
    }
    spans.push(EditSpan { kind, left, right });
}
