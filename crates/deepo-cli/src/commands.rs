use std::io::Read;
use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context};
use deepo_diff::{diff_json_semantic, diff_text, parse_json_pair, JsonDiffOptions, TextDiffOptions};
use serde::Serialize;

use crate::cli::*;
use crate::config::{DeepoConfig, OutputFormat};
use crate::render;

/// Whether the compared inputs turned out to be equivalent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Same,
    Different,
}

impl Outcome {
    pub fn exit_code(self) -> ExitCode {
        match self {
            Outcome::Same => ExitCode::SUCCESS,
            Outcome::Different => ExitCode::from(1),
        }
    }
}

pub fn run_command(cli: Cli) -> anyhow::Result<Outcome> {
    let config = DeepoConfig::discover(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);
    colored::control::set_override(config.output.color && !cli.no_color);

    match cli.command {
        Command::Text(args) => cmd_text(args, &config, format),
        Command::Json(args) => cmd_json(args, &config, format),
    }
}

fn cmd_text(args: TextArgs, config: &DeepoConfig, format: OutputFormat) -> anyhow::Result<Outcome> {
    let (left, right) = read_pair(&args.left, &args.right)?;
    let options = TextDiffOptions {
        ignore_whitespace: args.ignore_whitespace || config.text.ignore_whitespace,
        word_diff: args.word_diff || config.text.word_diff,
    };

    let diff = diff_text(&left, &right, &options);
    emit(format, &diff, render::render_line_diff)?;

    Ok(if diff.is_identical() { Outcome::Same } else { Outcome::Different })
}

fn cmd_json(args: JsonArgs, config: &DeepoConfig, format: OutputFormat) -> anyhow::Result<Outcome> {
    let (left, right) = read_pair(&args.left, &args.right)?;
    let pair = parse_json_pair(&left, &right).context("both inputs must be valid JSON")?;
    let options = JsonDiffOptions {
        arrays_order_insensitive: args.arrays_order_insensitive
            || config.json.arrays_order_insensitive,
    };

    let diff = diff_json_semantic(&pair.left, &pair.right, &options);
    emit(format, &diff, render::render_json_diff)?;

    Ok(if diff.is_empty() { Outcome::Same } else { Outcome::Different })
}

fn emit<T: Serialize>(format: OutputFormat, value: &T, render: fn(&T) -> String) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{}", render(value)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

fn read_pair(left: &Path, right: &Path) -> anyhow::Result<(String, String)> {
    if is_stdin(left) && is_stdin(right) {
        bail!("only one side can be read from stdin");
    }
    Ok((read_input(left)?, read_input(right)?))
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

/// Read a side as text; invalid UTF-8 is replaced rather than rejected.
fn read_input(path: &Path) -> anyhow::Result<String> {
    let bytes = if is_stdin(path) {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
