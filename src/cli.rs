use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tenhou-log-urls")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Collect Tenhou log URLs from saved HTML pages")]
#[command(
    long_about = "Scans a directory of saved HTML pages for lines containing a keyword \
                  (default 四鳳南喰赤) and writes every Tenhou log URL found on those lines \
                  to a numbered text file."
)]
#[command(after_help = "EXAMPLES:\n  \
    tenhou-log-urls\n  \
    tenhou-log-urls saved_pages out\n  \
    tenhou-log-urls saved_pages out urls.txt\n  \
    tenhou-log-urls --keyword 三鳳南喰赤 --dry-run")]
pub struct Cli {
    /// Directory containing saved HTML pages (defaults to html_files)
    pub html_dir: Option<PathBuf>,

    /// Directory for generated URL lists (defaults to log_htmls)
    pub output_dir: Option<PathBuf>,

    /// Explicit output file path (defaults to an auto-generated name)
    pub output_file: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Keyword a line must contain before URLs are taken from it
    #[arg(short, long)]
    pub keyword: Option<String>,

    /// Extension of the input files
    #[arg(long, help = "Input file extension (default: html)")]
    pub extension: Option<String>,

    /// Number of URLs shown in the final preview
    #[arg(long)]
    pub preview: Option<usize>,

    /// Output format for results
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Dry run (scan and report without writing anything)
    #[arg(long, help = "Scan and report without creating the output file")]
    pub dry_run: bool,

    /// Generate sample configuration file
    #[arg(long, help = "Generate a sample configuration file")]
    pub generate_config: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

/// Where a run reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub output_file: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_keyword(self.keyword.clone())
            .with_extension(self.extension.clone())
            .with_preview_count(self.preview)
    }

    /// Positional arguments win over the `[paths]` table; no existence checks happen here.
    pub fn resolve_directories(&self, config: &Config) -> ResolvedPaths {
        ResolvedPaths {
            input_dir: self
                .html_dir
                .clone()
                .unwrap_or_else(|| config.paths.html_dir.clone()),
            output_dir: self
                .output_dir
                .clone()
                .unwrap_or_else(|| config.paths.output_dir.clone()),
            output_file: self.output_file.clone(),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
