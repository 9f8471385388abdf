use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::OutputFormat;

#[derive(Parser)]
#[command(
    name = "deepo",
    about = "Deepo — side-by-side text diffs and structural JSON diffs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Path to a config file (defaults to ./deepo.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two text files line by line
    Text(TextArgs),
    /// Compare two JSON documents structurally
    Json(JsonArgs),
}

#[derive(Args)]
pub struct TextArgs {
    /// Original file (`-` for stdin)
    pub left: PathBuf,
    /// Updated file (`-` for stdin)
    pub right: PathBuf,
    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,
    #[arg(long)]
    pub word_diff: bool,
}

#[derive(Args)]
pub struct JsonArgs {
    /// Left document (`-` for stdin)
    pub left: PathBuf,
    /// Right document (`-` for stdin)
    pub right: PathBuf,
    /// Compare arrays of primitives ignoring element order
    #[arg(long)]
    pub arrays_order_insensitive: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_text() {
        let cli = Cli::try_parse_from(["deepo", "text", "a.txt", "b.txt"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.left, PathBuf::from("a.txt"));
            assert_eq!(args.right, PathBuf::from("b.txt"));
            assert!(!args.ignore_whitespace);
            assert!(!args.word_diff);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_text_flags() {
        let cli = Cli::try_parse_from(["deepo", "text", "-w", "--word-diff", "a", "b"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert!(args.ignore_whitespace);
            assert!(args.word_diff);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_json_order_insensitive() {
        let cli = Cli::try_parse_from(["deepo", "json", "--arrays-order-insensitive", "l.json", "r.json"]).unwrap();
        if let Command::Json(args) = cli.command {
            assert!(args.arrays_order_insensitive);
            assert_eq!(args.left, PathBuf::from("l.json"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_stdin_side() {
        let cli = Cli::try_parse_from(["deepo", "text", "-", "b.txt"]).unwrap();
        if let Command::Text(args) = cli.command {
            assert_eq!(args.left, PathBuf::from("-"));
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::try_parse_from([
            "deepo", "json", "a", "b", "--format", "json", "--no-color", "--config", "x.toml", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn format_defaults_to_config() {
        let cli = Cli::try_parse_from(["deepo", "text", "a", "b"]).unwrap();
        assert!(cli.format.is_none());
    }

    #[test]
    fn missing_operand_is_rejected() {
        assert!(Cli::try_parse_from(["deepo", "json", "only-one"]).is_err());
    }
}
