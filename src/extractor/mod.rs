pub mod output_manager;
pub mod url_extractor;

pub use output_manager::{ExtractionReport, FileSummary, OutputManager};
pub use url_extractor::{ExtractionProgress, FileScan, LineHit, UrlExtractor};
