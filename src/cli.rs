use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ace")]
#[command(
    version,
    about = "AI Code Editor core - analyze and patch HTML/CSS/JS documents",
    long_about = "AI Code Editor (ACE)\n\nModes:\n- analyze: run the heuristic analyzer suite over a document and report scores and issues.\n- apply: apply a suggestion JSON (id-keyed old/new changes) to a document with fuzzy matching.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) to set analyzer timeout, history cap and patch options"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document and report per-analyzer scores and issues
    Analyze {
        #[arg(long, help = "HTML file to analyze")]
        html: PathBuf,

        #[arg(long, help = "CSS file (empty stylesheet if omitted)")]
        css: Option<PathBuf>,

        #[arg(long, help = "JS file (no script if omitted)")]
        js: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Apply a suggestion JSON to a document
    Apply {
        #[arg(long, help = "HTML file to patch")]
        html: PathBuf,

        #[arg(long, help = "CSS file (passed through unchanged)")]
        css: Option<PathBuf>,

        #[arg(long, help = "JS file (passed through unchanged)")]
        js: Option<PathBuf>,

        #[arg(
            long,
            help = "Suggestion JSON: {\"changes\": {id: {old?, new, status}}, \"preview\": {\"html\"}}"
        )]
        suggestion: PathBuf,

        #[arg(
            long,
            value_name = "DIR",
            help = "Write the patched buffers into this directory (created if missing); otherwise the result is printed"
        )]
        out_dir: Option<PathBuf>,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;
    use std::path::Path;

    #[test]
    fn analyze_command_uses_defaults() {
        let cli = Cli::parse_from(["ace", "analyze", "--html", "page.html"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Analyze {
                html,
                css,
                js,
                format,
                output,
            } => {
                assert_eq!(html, Path::new("page.html"));
                assert!(css.is_none());
                assert!(js.is_none());
                assert!(matches!(format, OutputFormat::Json));
                assert!(output.is_none());
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn apply_command_respects_overrides() {
        let cli = Cli::parse_from([
            "ace",
            "--verbose",
            "apply",
            "--html",
            "page.html",
            "--css",
            "style.css",
            "--suggestion",
            "suggestion.json",
            "--out-dir",
            "patched",
            "--format",
            "text",
            "--config",
            "ace.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some(Path::new("ace.toml")));

        match cli.command {
            Commands::Apply {
                html,
                css,
                js,
                suggestion,
                out_dir,
                format,
                output,
            } => {
                assert_eq!(html, Path::new("page.html"));
                assert_eq!(css.as_deref(), Some(Path::new("style.css")));
                assert!(js.is_none());
                assert_eq!(suggestion, Path::new("suggestion.json"));
                assert_eq!(out_dir.as_deref(), Some(Path::new("patched")));
                assert!(matches!(format, OutputFormat::Text));
                assert!(output.is_none());
            }
            _ => panic!("expected apply command"),
        }
    }
}
