use crate::extractor::ExtractionProgress;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn create_file_progress(&self, total_files: u64) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::with_draw_target(Some(total_files), ProgressDrawTarget::stderr());
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5}/{len:5} files {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        pb.set_message("Scanning files...");
        pb
    }

    /// Runs `f` with the bar cleared so console lines do not tear it.
    pub fn suspend<F, R>(&self, pb: &ProgressBar, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            pb.suspend(f)
        } else {
            f()
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_file_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    pb.set_position(progress.files_processed as u64);

    match progress.current_file {
        Some(ref current_file) => pb.set_message(format!(
            "{} ({} URLs so far)",
            current_file, progress.urls_found
        )),
        None => pb.set_message("Scanning files..."),
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    let final_message = format!("{} (completed in {})", message, format_duration(duration));
    pb.finish_with_message(final_message);
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_manager_creation() {
        assert!(ProgressManager::new(true).enabled);
        assert!(!ProgressManager::new(false).enabled);
    }

    #[test]
    fn test_disabled_progress_bar_is_hidden() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_file_progress(10);
        assert!(pb.is_hidden());

        let value = manager.suspend(&pb, || 42);
        assert_eq!(value, 42);
    }

    #[test]
    fn test_update_file_progress() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_file_progress(3);
        let mut progress = ExtractionProgress::new(3);

        progress.update_file("a.html".to_string(), 2);
        update_file_progress(&pb, &progress);

        assert_eq!(pb.position(), 1);
        assert!(pb.message().contains("a.html"));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }
}
