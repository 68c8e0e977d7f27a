use crate::cli::ResolvedPaths;
use crate::error::{LogUrlsError, UserFriendlyError};
use crate::extractor::{ExtractionReport, FileScan, LineHit};
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

static CROSS: Emoji = Emoji("❌ ", "");
static WARNING: Emoji = Emoji("⚠️  ", "");
static INFO: Emoji = Emoji("ℹ️  ", "");

const RULE_WIDTH: usize = 60;

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    // Core messaging methods
    /// Errors are shown even in quiet mode.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn info(&self, message: &str) {
        if self.should_show_message(0) {
            match self.mode {
                OutputMode::Human | OutputMode::Plain => println!("{}", message),
                OutputMode::Json => self.print_json_message("info", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human if self.use_colors => println!("  {}", style(message).dim()),
                OutputMode::Human | OutputMode::Plain => println!("  DEBUG: {}", message),
                OutputMode::Json => self.print_json_message("debug", message),
            }
        }
    }

    pub fn blank_line(&self) {
        if self.should_show_message(0) && self.mode != OutputMode::Json {
            println!();
        }
    }

    pub fn print_banner(&self, title: &str) {
        if !self.should_show_message(0) {
            return;
        }

        match self.mode {
            OutputMode::Human | OutputMode::Plain => {
                let rule = "=".repeat(RULE_WIDTH);
                println!("{}", rule);
                if self.use_colors {
                    println!("{}", style(title).bold().cyan());
                } else {
                    println!("{}", title);
                }
                println!("{}", rule);
            }
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "header",
                "title": title
            })),
        }
    }

    // Pipeline stages
    pub fn print_run_settings(&self, keyword: &str, paths: &ResolvedPaths) {
        if self.mode == OutputMode::Json {
            if self.should_show_message(0) {
                self.print_json_object(&serde_json::json!({
                    "type": "settings",
                    "keyword": keyword,
                    "html_dir": paths.input_dir,
                    "output_dir": paths.output_dir,
                    "output_file": paths.output_file,
                }));
            }
            return;
        }

        self.print_banner("Extracting Tenhou URLs from HTML files");
        self.info(&format!("Keyword: {}", keyword));
        self.info(&format!("HTML directory: {}", paths.input_dir.display()));
        self.info(&format!("Output directory: {}", paths.output_dir.display()));
        match paths.output_file {
            Some(ref file) => self.info(&format!("Output file: {} (custom)", file.display())),
            None => self.info("Output file: (auto-generated based on year)"),
        }
        self.blank_line();
    }

    pub fn print_files_found(&self, count: usize) {
        self.info(&format!("Found {} HTML file(s)", count));
        self.blank_line();
    }

    pub fn file_started(&self, filename: &str) {
        match self.mode {
            OutputMode::Json => {}
            OutputMode::Human if self.use_colors => {
                if self.should_show_message(0) {
                    println!("Processing: {}", style(filename).bold());
                }
            }
            _ => self.info(&format!("Processing: {}", filename)),
        }
    }

    pub fn line_hit(&self, hit: &LineHit) {
        if self.mode != OutputMode::Json {
            self.info(&format!(
                "  Line {}: Found {} URL(s)",
                hit.line_number, hit.count
            ));
        }
    }

    pub fn file_finished(&self, filename: &str, scan: &FileScan) {
        match self.mode {
            OutputMode::Json => {
                if self.should_show_message(0) {
                    self.print_json_object(&serde_json::json!({
                        "type": "file",
                        "filename": filename,
                        "urls_found": scan.urls.len(),
                        "line_hits": scan.line_hits,
                    }));
                }
            }
            _ => {
                if scan.urls.is_empty() {
                    self.info("  No matching URLs found");
                } else {
                    self.info(&format!(
                        "  Total URLs found in this file: {}",
                        scan.urls.len()
                    ));
                }
                self.blank_line();
            }
        }
    }

    pub fn file_failed(&self, filename: &str, error: &LogUrlsError) {
        match self.mode {
            OutputMode::Json => {
                if self.should_show_message(0) {
                    self.print_json_object(&serde_json::json!({
                        "type": "file",
                        "filename": filename,
                        "urls_found": 0,
                        "error": error.user_message(),
                    }));
                }
            }
            _ => {
                self.error(&error.user_message());
                self.info("  No matching URLs found");
                self.blank_line();
            }
        }
    }

    pub fn print_generated_filename(&self, path: &Path) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        self.info(&format!("Generated output filename: {}", name));
        self.blank_line();
    }

    // Summary and reporting
    pub fn print_extraction_report(&self, report: &ExtractionReport, preview_count: usize) {
        match self.mode {
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            _ => {
                if self.quiet {
                    if let Some(ref file) = report.output_file {
                        println!("{}", file.display());
                    }
                    return;
                }
                self.print_text_report(report, preview_count);
            }
        }
    }

    fn print_text_report(&self, report: &ExtractionReport, preview_count: usize) {
        if report.dry_run {
            self.print_banner("Dry run complete (nothing written)");
        } else {
            self.print_banner("Extraction complete!");
        }

        let total = report.total_urls();
        if self.use_colors {
            println!("Total URLs extracted: {}", style(total).cyan().bold());
        } else {
            println!("Total URLs extracted: {}", total);
        }

        if report.dry_run {
            println!(
                "Output would be saved to: {}",
                report.planned_output_file.display()
            );
        } else {
            println!("Output saved to: {}", report.planned_output_file.display());
        }

        if !report.errors.is_empty() {
            println!("Files that could not be read: {}", report.errors.len());
        }
        println!();

        let preview = report.preview(preview_count);
        if !preview.is_empty() {
            println!("Preview (first {} URLs):", preview.len());
            for url in preview {
                println!("  {}", url);
            }
            if total > preview.len() {
                println!("  ... and {} more", total - preview.len());
            }
        }
        println!();
    }

    pub fn print_no_urls_found(&self, keyword: &str) {
        match self.mode {
            OutputMode::Json => self.print_json_object(&serde_json::json!({
                "type": "summary",
                "total_urls": 0,
                "keyword": keyword,
                "output_file": null,
            })),
            _ => {
                self.print_banner("No URLs found!");
                self.info(&format!(
                    "No lines containing '{}' with matching URLs were found.",
                    keyword
                ));
                self.blank_line();
            }
        }
    }

    // User-friendly error handling
    pub fn print_user_friendly_error(&self, error: &LogUrlsError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => self.print_json_object(&serde_json::json!({
                    "type": "suggestion",
                    "message": suggestion
                })),
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        if self.use_colors {
            let styled = match msg_type {
                MessageType::Error => format!("{}{}", CROSS, style(message).red().bold()),
                MessageType::Warning => format!("{}{}", WARNING, style(message).yellow().bold()),
            };

            match msg_type {
                MessageType::Error => eprintln!("{}", styled),
                _ => println!("{}", styled),
            }
        } else {
            match msg_type {
                MessageType::Error => eprintln!("ERROR: {}", message),
                MessageType::Warning => println!("WARNING: {}", message),
            }
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}
