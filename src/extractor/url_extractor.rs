use crate::config::ScanConfig;
use crate::error::{LogUrlsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineHit {
    pub line_number: usize,
    pub count: usize,
}

/// URLs taken from one file, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub urls: Vec<String>,
    pub line_hits: Vec<LineHit>,
}

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_processed: usize,
    pub total_files: usize,
    pub urls_found: usize,
    pub current_file: Option<String>,
    pub start_time: Instant,
    pub errors: Vec<String>,
}

impl ExtractionProgress {
    pub fn new(total_files: usize) -> Self {
        Self {
            files_processed: 0,
            total_files,
            urls_found: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
        }
    }

    pub fn update_file(&mut self, filename: String, urls: usize) {
        self.files_processed += 1;
        self.urls_found += urls;
        self.current_file = Some(filename);
    }

    pub fn add_error<S: Into<String>>(&mut self, error: S) {
        self.errors.push(error.into());
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

pub struct UrlExtractor {
    keyword: String,
    url_pattern: Regex,
}

impl UrlExtractor {
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let url_pattern =
            Regex::new(&config.url_pattern).map_err(|source| LogUrlsError::InvalidPattern {
                pattern: config.url_pattern.clone(),
                source,
            })?;

        Ok(Self {
            keyword: config.keyword.clone(),
            url_pattern,
        })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    /// Every match on the line, left to right; nothing unless the keyword is present.
    pub fn extract_from_line<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if !line.contains(&self.keyword) {
            return Vec::new();
        }

        self.url_pattern
            .find_iter(line)
            .map(|m| m.as_str())
            .collect()
    }

    /// `\n`, `\r\n` and a lone `\r` each end a line; `LineHit` numbers count all three.
    pub fn extract_from_reader<R: BufRead>(&self, mut reader: R) -> io::Result<FileScan> {
        let mut scan = FileScan::default();
        let mut buf = Vec::new();
        let mut line_number = 0;

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            let chunk = std::str::from_utf8(&buf)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

            for line in split_lines(chunk) {
                line_number += 1;
                let found = self.extract_from_line(line);

                if !found.is_empty() {
                    scan.line_hits.push(LineHit {
                        line_number,
                        count: found.len(),
                    });
                    scan.urls.extend(found.into_iter().map(str::to_string));
                }
            }
        }

        Ok(scan)
    }

    /// A read error anywhere in the file discards everything found in it.
    pub fn extract_from_file(&self, path: &Path) -> Result<FileScan> {
        let read_error = |source: io::Error| LogUrlsError::FileRead {
            path: path.display().to_string(),
            source,
        };

        let file = fs::File::open(path).map_err(read_error)?;
        let scan = self
            .extract_from_reader(BufReader::new(file))
            .map_err(read_error)?;

        tracing::debug!(
            "{}: {} urls on {} lines",
            path.display(),
            scan.urls.len(),
            scan.line_hits.len()
        );

        Ok(scan)
    }
}

/// Splits one chunk ending in `\n` (or at EOF) into lines, dropping the terminator.
fn split_lines(chunk: &str) -> std::str::Split<'_, char> {
    let body = chunk.strip_suffix('\n').unwrap_or(chunk);
    let body = body.strip_suffix('\r').unwrap_or(body);
    body.split('\r')
}
