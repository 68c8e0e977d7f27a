use crate::config::ScanConfig;
use std::path::Path;

/// Decides which directory entries count as input pages.
pub struct FileFilter {
    suffix: String,
    extension: String,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self::for_extension(config.extension.trim())
    }

    pub fn for_extension(extension: &str) -> Self {
        let extension = extension.trim_start_matches('.').to_string();
        Self {
            suffix: format!(".{}", extension),
            extension,
        }
    }

    /// Case-sensitive suffix match on the file name, so `.html` itself qualifies.
    pub fn is_input_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.ends_with(&self.suffix))
    }

    pub fn get_extension(&self) -> &str {
        &self.extension
    }
}

impl Default for FileFilter {
    fn default() -> Self {
        Self::new(&ScanConfig::default())
    }
}
