pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod logging;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat, ResolvedPaths};
pub use config::{CliOverrides, Config, OutputConfig, PathsConfig, ScanConfig};
pub use error::{LogUrlsError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{
    ExtractionProgress, ExtractionReport, FileScan, FileSummary, LineHit, OutputManager,
    UrlExtractor,
};
pub use scanner::{FileFilter, HtmlFile, HtmlScanner};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use std::path::Path;

/// Main library interface: one linear pass from HTML directory to URL list.
pub struct TenhouLogUrls {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl TenhouLogUrls {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(output_mode == OutputMode::Human && !quiet);

        Self {
            config,
            output_formatter,
            progress_manager,
        }
    }

    /// Create an instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbose,
            cli_args.quiet,
        ))
    }

    /// Collect URLs from `paths.input_dir` and write them out.
    ///
    /// A missing or empty input directory and a run without matches come back
    /// as errors for which [`LogUrlsError::is_graceful`] is true; no output
    /// file exists in those cases.
    pub fn collect(&self, paths: &ResolvedPaths, dry_run: bool) -> Result<ExtractionReport> {
        let extractor = UrlExtractor::new(&self.config.scan)?;
        let output_manager = OutputManager::new(paths.output_dir.clone(), &self.config.output)?;

        if !dry_run {
            output_manager.initialize()?;
        }

        self.output_formatter
            .print_run_settings(extractor.keyword(), paths);

        // Step 1: discover input files
        let scanner = HtmlScanner::new(&self.config.scan);
        let files = scanner.list_input_files(&paths.input_dir)?;

        self.output_formatter.print_files_found(files.len());
        self.output_formatter
            .debug(&scanner.get_statistics(&files).display_summary());

        // Step 2: scan every file in order
        let (summaries, urls, progress) = self.extract_files(&extractor, &files);

        if !progress.errors.is_empty() {
            self.output_formatter.warning(&format!(
                "{} file(s) could not be read and were skipped",
                progress.errors.len()
            ));
        }

        if urls.is_empty() {
            return Err(LogUrlsError::NoUrlsFound {
                keyword: extractor.keyword().to_string(),
            });
        }

        // Step 3: pick the output path
        let output_path = output_manager.resolve_output_path(paths.output_file.as_deref(), &urls);
        if paths.output_file.is_none() {
            self.output_formatter.print_generated_filename(&output_path);
        }

        // Step 4: write
        if dry_run {
            tracing::info!("dry run, not writing {}", output_path.display());
        } else {
            output_manager.write_urls(&output_path, &urls)?;
        }

        Ok(output_manager.create_extraction_report(
            extractor.keyword(),
            &paths.input_dir,
            summaries,
            urls,
            &progress,
            output_path,
            paths.output_file.is_none(),
            dry_run,
        ))
    }

    fn extract_files(
        &self,
        extractor: &UrlExtractor,
        files: &[HtmlFile],
    ) -> (Vec<FileSummary>, Vec<String>, ExtractionProgress) {
        let mut progress = ExtractionProgress::new(files.len());
        let mut summaries = Vec::with_capacity(files.len());
        let mut all_urls = Vec::new();

        let pb = self.progress_manager.create_file_progress(files.len() as u64);

        for file in files {
            self.progress_manager.suspend(&pb, || {
                self.output_formatter.file_started(&file.filename)
            });

            match extractor.extract_from_file(&file.path) {
                Ok(scan) => {
                    self.progress_manager.suspend(&pb, || {
                        for hit in &scan.line_hits {
                            self.output_formatter.line_hit(hit);
                        }
                        self.output_formatter.file_finished(&file.filename, &scan);
                    });

                    progress.update_file(file.filename.clone(), scan.urls.len());
                    summaries.push(FileSummary {
                        filename: file.filename.clone(),
                        path: file.path.clone(),
                        urls_found: scan.urls.len(),
                        line_hits: scan.line_hits,
                        error: None,
                    });
                    all_urls.extend(scan.urls);
                }
                Err(e) => {
                    tracing::debug!("{}", e);
                    self.progress_manager.suspend(&pb, || {
                        self.output_formatter.file_failed(&file.filename, &e)
                    });

                    progress.update_file(file.filename.clone(), 0);
                    progress.add_error(e.user_message());
                    summaries.push(FileSummary {
                        filename: file.filename.clone(),
                        path: file.path.clone(),
                        urls_found: 0,
                        line_hits: Vec::new(),
                        error: Some(e.user_message()),
                    });
                }
            }

            ui::progress::update_file_progress(&pb, &progress);
        }

        ui::progress::finish_progress_with_summary(
            &pb,
            &format!("Scanned {} files", progress.files_processed),
            progress.elapsed(),
        );

        (summaries, all_urls, progress)
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Report an error; graceful outcomes get their own wording.
    pub fn handle_error(&self, error: &LogUrlsError) {
        match error {
            LogUrlsError::NoUrlsFound { keyword } => {
                self.output_formatter.print_no_urls_found(keyword)
            }
            _ => self.output_formatter.print_user_friendly_error(error),
        }
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
