use crate::proxy::ProxyConfig;
use crate::settings::CrawlSettings;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use sitecrawl_scanner::error::Result;
use sitecrawl_scanner::{CrawlResult, Crawler, Page};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::debug;
use url::Url;

/// One crawl's input: where to start and how to reach the network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRequest {
    pub seed_url: String,
    pub proxy: Option<ProxyConfig>,
}

impl SeedRequest {
    pub fn new(seed_url: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            proxy: None,
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }
}

/// Options for configuring a crawl operation
#[derive(Debug, Clone, Default)]
pub struct CrawlOptions {
    pub settings: CrawlSettings,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Extract the path component from a URL
pub fn extract_url_path(url: &str) -> String {
    Url::parse(url)
        .ok()
        .map(|u| {
            let path = u.path().to_string();
            if path.is_empty() || path == "/" {
                "/".to_string()
            } else {
                path
            }
        })
        .unwrap_or_else(|| url.to_string())
}

/// Execute a crawl with the given options
pub async fn execute_crawl(
    request: SeedRequest,
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<CrawlResult> {
    let CrawlOptions {
        settings,
        show_progress_bars,
    } = options;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let dispatched = Arc::new(AtomicUsize::new(0));
    let dispatched_clone = dispatched.clone();
    let pb_clone = progress_bar.clone();
    let callback_clone = progress_callback.clone();
    let internal_progress_callback: sitecrawl_scanner::ProgressCallback =
        Arc::new(move |depth: usize, url: String| {
            let count = dispatched_clone.fetch_add(1, Ordering::Relaxed) + 1;
            if let Some(ref pb) = pb_clone {
                pb.set_message(format!("Crawling... {} URLs dispatched (depth {})", count, depth));
                pb.tick();
            }
            if let Some(ref callback) = callback_clone {
                callback(format!("[depth {}] {}", depth, url));
            }
        });

    if let Some(ref proxy) = request.proxy {
        debug!("Crawl of {} will use proxy {}", request.seed_url, proxy);
    }

    let crawler = Crawler::new()
        .with_max_pages(settings.max_pages)
        .with_max_depth(settings.max_depth)
        .with_max_concurrent_tasks(settings.max_concurrent_tasks)
        .with_timeout(settings.request_timeout_secs)
        .with_proxy(request.proxy.as_ref().map(ProxyConfig::proxy_url))
        .with_progress_callback(internal_progress_callback);

    let outcome = crawler.crawl(&request.seed_url).await;

    if let Some(ref pb) = progress_bar {
        match outcome {
            Ok(ref result) => pb.finish_with_message(format!(
                "Crawl complete! {} pages fetched",
                result.stats.pages_fetched
            )),
            Err(ref e) => pb.abandon_with_message(format!("Crawl failed: {}", e)),
        }
    }

    outcome
}

fn metadata_summary(page: &Page) -> Option<String> {
    ["title", "og:title", "description"]
        .iter()
        .find_map(|key| page.metadata.get(*key))
        .filter(|value| !value.is_empty())
        .cloned()
}

/// Generate a crawl report from results
pub fn generate_crawl_report(result: &CrawlResult) -> String {
    let stats = &result.stats;

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    report.push_str(&format!("  Pages fetched: {}\n", stats.pages_fetched));
    report.push_str(&format!("  Pages failed: {}\n", stats.pages_failed));
    report.push_str(&format!("  Links discovered: {}\n", stats.links_discovered));
    report.push_str(&format!("  Waves: {}\n", stats.waves));
    report.push_str(&format!("  Deepest depth: {}\n", stats.deepest_depth));
    report.push_str(&format!("  Elapsed: {:.2}s\n", stats.elapsed.as_secs_f64()));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    // Group pages by host, sorted for stable output
    let mut by_host: BTreeMap<String, Vec<&Page>> = BTreeMap::new();
    for page in result.pages.values() {
        if let Ok(url) = Url::parse(&page.url)
            && let Some(host) = url.host_str()
        {
            by_host.entry(host.to_string()).or_default().push(page);
        }
    }

    for (host, mut pages) in by_host {
        pages.sort_by(|a, b| a.url.cmp(&b.url));

        report.push_str(&format!("## {}\n", host));
        report.push_str(&format!("  {} pages fetched\n\n", pages.len()));

        for page in pages {
            let mut line = format!(
                "  {} {}",
                extract_url_path(&page.url).green(),
                format!("[{} meta]", page.metadata.len()).bright_black()
            );
            if let Some(summary) = metadata_summary(page) {
                line.push_str(&format!(" {}", summary));
            }
            report.push_str(&line);
            report.push('\n');
        }
        report.push('\n');
    }

    if !result.failures.is_empty() {
        report.push_str("## Failures\n");
        let mut failures: Vec<_> = result.failures.iter().collect();
        failures.sort();
        for (url, reason) in failures {
            report.push_str(&format!("  {} {}\n", url.red(), reason));
        }
        report.push('\n');
    }

    report
}
