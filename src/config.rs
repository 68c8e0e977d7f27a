use crate::error::{LogUrlsError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_HTML_DIR: &str = "html_files";
pub const DEFAULT_OUTPUT_DIR: &str = "log_htmls";
pub const DEFAULT_KEYWORD: &str = "四鳳南喰赤";
pub const DEFAULT_URL_PATTERN: &str = r#"http://tenhou\.net/0/\?log=[^\s"<>]+"#;
pub const DEFAULT_CONFIG_FILE: &str = "tenhou-log-urls.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub scan: ScanConfig,
    pub paths: PathsConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScanConfig {
    pub keyword: String,
    pub url_pattern: String,
    pub extension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PathsConfig {
    pub html_dir: PathBuf,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    pub file_prefix: String,
    pub preview_count: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            keyword: DEFAULT_KEYWORD.to_string(),
            url_pattern: DEFAULT_URL_PATTERN.to_string(),
            extension: "html".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            html_dir: PathBuf::from(DEFAULT_HTML_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            file_prefix: "tenhou_log_urls".to_string(),
            preview_count: 5,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LogUrlsError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| LogUrlsError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| LogUrlsError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = [DEFAULT_CONFIG_FILE, ".tenhou-log-urls.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        tracing::debug!("loading configuration from {}", default_path);
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref keyword) = cli_args.keyword {
            self.scan.keyword = keyword.clone();
        }

        if let Some(ref extension) = cli_args.extension {
            self.scan.extension = extension.trim_start_matches('.').to_string();
        }

        if let Some(preview_count) = cli_args.preview_count {
            self.output.preview_count = preview_count;
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| LogUrlsError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| LogUrlsError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.scan.keyword.is_empty() {
            return Err(LogUrlsError::Config {
                message: "Search keyword must not be empty".to_string(),
            });
        }

        if self.scan.extension.is_empty() {
            return Err(LogUrlsError::Config {
                message: "Input file extension must not be empty".to_string(),
            });
        }

        Regex::new(&self.scan.url_pattern).map_err(|source| LogUrlsError::InvalidPattern {
            pattern: self.scan.url_pattern.clone(),
            source,
        })?;

        let prefix = &self.output.file_prefix;
        if prefix.is_empty() || prefix.contains('/') || prefix.contains('\\') {
            return Err(LogUrlsError::Config {
                message: format!(
                    "Output file prefix must be a plain, non-empty file name: '{}'",
                    prefix
                ),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub keyword: Option<String>,
    pub extension: Option<String>,
    pub preview_count: Option<usize>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_keyword(mut self, keyword: Option<String>) -> Self {
        self.keyword = keyword;
        self
    }

    pub fn with_extension(mut self, extension: Option<String>) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_preview_count(mut self, preview_count: Option<usize>) -> Self {
        self.preview_count = preview_count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.keyword, "四鳳南喰赤");
        assert_eq!(config.scan.extension, "html");
        assert_eq!(config.paths.html_dir, PathBuf::from("html_files"));
        assert_eq!(config.paths.output_dir, PathBuf::from("log_htmls"));
        assert_eq!(config.output.preview_count, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.scan.keyword.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scan.url_pattern = "http://(unclosed".to_string();
        assert!(matches!(
            config.validate(),
            Err(LogUrlsError::InvalidPattern { .. })
        ));

        let mut config = Config::default();
        config.output.file_prefix = "../escape".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let mut config = Config::default();
        config.output.preview_count = 9;
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded_config.output.preview_count, 9);
        assert_eq!(loaded_config.scan.url_pattern, DEFAULT_URL_PATTERN);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan]\nkeyword = \"三鳳南喰赤\"").unwrap();

        let config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.scan.keyword, "三鳳南喰赤");
        assert_eq!(config.scan.extension, "html");
        assert_eq!(config.output.file_prefix, "tenhou_log_urls");
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("/definitely/not/here.toml");
        assert!(matches!(result, Err(LogUrlsError::Config { .. })));
    }

    #[test]
    fn test_malformed_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[scan\nkeyword = ").unwrap();

        let result = Config::load_from_file(temp_file.path());
        assert!(matches!(result, Err(LogUrlsError::Config { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_keyword(Some("東南".to_string()))
            .with_extension(Some(".htm".to_string()))
            .with_preview_count(Some(2));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.scan.keyword, "東南");
        assert_eq!(config.scan.extension, "htm");
        assert_eq!(config.output.preview_count, 2);
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(sample.contains("[scan]"));
        assert!(sample.contains("[paths]"));
        assert!(sample.contains("[output]"));
    }
}
