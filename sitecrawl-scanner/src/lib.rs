pub mod classifier;
pub mod crawler;
pub mod error;
pub mod fetcher;
pub mod frontier;
pub mod html;
pub mod metadata;
pub mod result;

pub use crawler::{Crawler, ProgressCallback};
pub use error::{FetchError, ScanError};
pub use result::{CrawlResult, CrawlStats, CrawlUrl, Page};
