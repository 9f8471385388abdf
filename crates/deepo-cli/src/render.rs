//! Terminal rendering of diff results.

use colored::Colorize;
use deepo_diff::{DisplayRow, JsonDiff, JsonPath, LineDiff, RowKind, WordKind, WordSpan};

pub fn render_line_diff(diff: &LineDiff) -> String {
    let width = diff
        .rows
        .iter()
        .flat_map(|r| [r.left_line_number, r.right_line_number])
        .flatten()
        .max()
        .unwrap_or(0)
        .to_string()
        .len();

    let mut lines = Vec::with_capacity(diff.rows.len() + 1);
    for row in &diff.rows {
        let left_no = gutter(row.left_line_number, width);
        let right_no = gutter(row.right_line_number, width);
        match row.kind {
            RowKind::Equal => {
                lines.push(format!("  {left_no} {right_no} │ {}", row.left_text));
            }
            RowKind::Removed => {
                lines.push(format!("{} {left_no} {right_no} │ {}", "-".red(), row.left_text.red()));
            }
            RowKind::Added => {
                lines.push(format!("{} {left_no} {right_no} │ {}", "+".green(), row.right_text.green()));
            }
            RowKind::Changed => {
                let blank = gutter(None, width);
                let (left, right) = changed_sides(row);
                lines.push(format!("{} {left_no} {blank} │ {left}", "~".yellow()));
                lines.push(format!("{} {blank} {right_no} │ {right}", "~".yellow()));
            }
        }
    }

    lines.push(line_summary(diff));
    lines.join("\n")
}

pub fn render_json_diff(diff: &JsonDiff) -> String {
    let mut lines = vec![format!(
        "Added paths: {}  Removed paths: {}  Changed paths: {}",
        diff.additions().to_string().green().bold(),
        diff.removals().to_string().red().bold(),
        diff.modifications().to_string().yellow().bold(),
    )];

    lines.push("Added:".bold().to_string());
    push_paths(&mut lines, &diff.added, "+");
    lines.push("Removed:".bold().to_string());
    push_paths(&mut lines, &diff.removed, "-");

    lines.push("Changed:".bold().to_string());
    if diff.changed.is_empty() {
        lines.push("  (none)".dimmed().to_string());
    }
    for change in &diff.changed {
        lines.push(format!("  {} {}", "~".yellow(), change.path));
        lines.push(format!("      before: {}", change.before.to_string().red()));
        lines.push(format!("      after:  {}", change.after.to_string().green()));
    }

    lines.join("\n")
}

fn push_paths(lines: &mut Vec<String>, paths: &[JsonPath], marker: &str) {
    if paths.is_empty() {
        lines.push("  (none)".dimmed().to_string());
        return;
    }
    for path in paths {
        let marker = match marker {
            "+" => marker.green(),
            _ => marker.red(),
        };
        lines.push(format!("  {marker} {path}"));
    }
}

fn gutter(line: Option<usize>, width: usize) -> String {
    match line {
        Some(n) => format!("{n:>width$}").dimmed().to_string(),
        None => " ".repeat(width),
    }
}

fn changed_sides(row: &DisplayRow) -> (String, String) {
    match (&row.left_words, &row.right_words) {
        (Some(left), Some(right)) => (paint_words(left), paint_words(right)),
        _ => (row.left_text.red().to_string(), row.right_text.green().to_string()),
    }
}

fn paint_words(words: &[WordSpan]) -> String {
    words
        .iter()
        .map(|w| match w.kind {
            WordKind::Equal => w.value.normal().to_string(),
            WordKind::Removed => w.value.red().bold().underline().to_string(),
            WordKind::Added => w.value.green().bold().underline().to_string(),
        })
        .collect()
}

fn line_summary(diff: &LineDiff) -> String {
    if diff.is_identical() {
        return "No differences.".dimmed().to_string();
    }
    format!(
        "{} changed, {} added, {} removed",
        diff.changes().to_string().yellow().bold(),
        diff.additions().to_string().green().bold(),
        diff.removals().to_string().red().bold(),
    )
}
