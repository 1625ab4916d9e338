pub mod crawl;
pub mod proxy;
pub mod settings;

pub use crawl::{
    CrawlOptions, CrawlProgressCallback, SeedRequest, execute_crawl, extract_url_path,
    generate_crawl_report,
};
pub use proxy::{ProxyConfig, ProxyRequest};
pub use settings::CrawlSettings;
