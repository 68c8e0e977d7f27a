pub mod file_filter;
pub mod html_scanner;

pub use file_filter::FileFilter;
pub use html_scanner::{HtmlFile, HtmlScanner, ScanStatistics};
