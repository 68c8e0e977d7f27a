use crate::config::OutputConfig;
use crate::error::{LogUrlsError, Result};
use crate::extractor::{ExtractionProgress, LineHit};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

const YEAR_PATTERN: &str = r"log=(\d{4})";
const UNKNOWN_YEAR: &str = "unknown";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub keyword: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// `None` on a dry run.
    pub output_file: Option<PathBuf>,
    pub planned_output_file: PathBuf,
    pub generated_name: bool,
    pub files: Vec<FileSummary>,
    pub urls: Vec<String>,
    pub errors: Vec<String>,
    pub extraction_time: DateTime<Utc>,
    pub extraction_duration: Duration,
    pub dry_run: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileSummary {
    pub filename: String,
    pub path: PathBuf,
    pub urls_found: usize,
    pub line_hits: Vec<LineHit>,
    pub error: Option<String>,
}

impl ExtractionReport {
    pub fn total_urls(&self) -> usize {
        self.urls.len()
    }

    pub fn preview(&self, count: usize) -> &[String] {
        &self.urls[..count.min(self.urls.len())]
    }
}

/// Chooses output file names and writes URL lists.
pub struct OutputManager {
    output_directory: PathBuf,
    file_prefix: String,
    year_pattern: Regex,
}

impl OutputManager {
    pub fn new(output_directory: PathBuf, config: &OutputConfig) -> Result<Self> {
        let year_pattern =
            Regex::new(YEAR_PATTERN).map_err(|source| LogUrlsError::InvalidPattern {
                pattern: YEAR_PATTERN.to_string(),
                source,
            })?;

        Ok(Self {
            output_directory,
            file_prefix: config.file_prefix.clone(),
            year_pattern,
        })
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(|source| LogUrlsError::OutputWrite {
            path: self.output_directory.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// First four digits directly after `log=`, or `unknown`.
    pub fn derive_year(&self, url: &str) -> String {
        self.year_pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_YEAR.to_string())
    }

    /// `<dir>/<prefix>_<year>_<n>.txt` for the smallest n >= 1 not on disk.
    pub fn next_available_path(&self, year: &str) -> PathBuf {
        let mut file_id: u32 = 1;

        loop {
            let candidate = self
                .output_directory
                .join(format!("{}_{}_{}.txt", self.file_prefix, year, file_id));

            if !candidate.exists() {
                return candidate;
            }

            file_id += 1;
        }
    }

    /// Explicit path if given, else a fresh name derived from the first URL.
    pub fn resolve_output_path(&self, explicit: Option<&Path>, urls: &[String]) -> PathBuf {
        match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let year = urls
                    .first()
                    .map(|url| self.derive_year(url))
                    .unwrap_or_else(|| UNKNOWN_YEAR.to_string());
                self.next_available_path(&year)
            }
        }
    }

    /// Creates or truncates `path`; one URL per line.
    pub fn write_urls(&self, path: &Path, urls: &[String]) -> Result<()> {
        let write_error = |source: std::io::Error| LogUrlsError::OutputWrite {
            path: path.display().to_string(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let file = fs::File::create(path).map_err(write_error)?;
        let mut writer = BufWriter::new(file);

        for url in urls {
            writeln!(writer, "{}", url).map_err(write_error)?;
        }

        writer.flush().map_err(write_error)?;
        tracing::info!("wrote {} urls to {}", urls.len(), path.display());

        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    pub fn create_extraction_report(
        &self,
        keyword: &str,
        input_dir: &Path,
        files: Vec<FileSummary>,
        urls: Vec<String>,
        progress: &ExtractionProgress,
        planned_output_file: PathBuf,
        generated_name: bool,
        dry_run: bool,
    ) -> ExtractionReport {
        ExtractionReport {
            keyword: keyword.to_string(),
            input_dir: input_dir.to_path_buf(),
            output_dir: self.output_directory.clone(),
            output_file: if dry_run {
                None
            } else {
                Some(planned_output_file.clone())
            },
            planned_output_file,
            generated_name,
            files,
            urls,
            errors: progress.errors.clone(),
            extraction_time: Utc::now(),
            extraction_duration: progress.elapsed(),
            dry_run,
        }
    }
}
