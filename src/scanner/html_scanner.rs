use crate::config::ScanConfig;
use crate::error::{LogUrlsError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct HtmlFile {
    pub path: PathBuf,
    pub filename: String,
    pub size: u64,
}

impl HtmlFile {
    pub fn new(path: PathBuf, size: u64) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self {
            path,
            filename,
            size,
        }
    }
}

pub struct HtmlScanner {
    filter: FileFilter,
}

impl HtmlScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
        }
    }

    /// Lists matching files directly inside `input_dir`, sorted by path.
    pub fn list_input_files<P: AsRef<Path>>(&self, input_dir: P) -> Result<Vec<HtmlFile>> {
        let root_path = input_dir.as_ref();

        if !root_path.exists() {
            return Err(LogUrlsError::InputDirectoryNotFound {
                path: root_path.display().to_string(),
            });
        }

        if !root_path.is_dir() {
            return Err(LogUrlsError::NotADirectory {
                path: root_path.display().to_string(),
            });
        }

        let mut files = Vec::new();

        // Depth 1 only, so following links cannot loop.
        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };

            if !entry.file_type().is_file() || !self.filter.is_input_file(entry.path()) {
                continue;
            }

            let size = match entry.metadata() {
                Ok(metadata) => metadata.len(),
                Err(err) => {
                    tracing::warn!("no metadata for {}: {}", entry.path().display(), err);
                    0
                }
            };

            files.push(HtmlFile::new(entry.into_path(), size));
        }

        if files.is_empty() {
            return Err(LogUrlsError::NoInputFiles {
                path: root_path.display().to_string(),
                extension: self.filter.get_extension().to_string(),
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        tracing::debug!("found {} input files in {}", files.len(), root_path.display());

        Ok(files)
    }

    pub fn get_statistics(&self, files: &[HtmlFile]) -> ScanStatistics {
        let (largest_file_size, largest_file) = files
            .iter()
            .max_by_key(|f| f.size)
            .map(|f| (f.size, f.filename.clone()))
            .unwrap_or((0, String::new()));

        ScanStatistics {
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
            largest_file_size,
            largest_file,
        }
    }
}

#[derive(Debug, Default)]
pub struct ScanStatistics {
    pub total_files: usize,
    pub total_size: u64,
    pub largest_file_size: u64,
    pub largest_file: String,
}

impl ScanStatistics {
    pub fn display_summary(&self) -> String {
        let mut summary = format!(
            "Scan results: {} files, {} total",
            self.total_files,
            format_bytes(self.total_size)
        );

        if self.largest_file_size > 0 {
            summary.push_str(&format!(
                ", largest {} ({})",
                self.largest_file,
                format_bytes(self.largest_file_size)
            ));
        }

        summary
    }
}

pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
