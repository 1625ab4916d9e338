use crate::error::{FetchError, Result, ScanError};
use reqwest::{Client, Proxy};
use std::time::Duration;
use tracing::debug;
use url::Url;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A successful response body and the URL it was finally served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    /// Differs from the requested URL when redirects were followed.
    pub final_url: Url,
    pub body: String,
}

/// Fetches page bodies for one crawl run.
///
/// The proxy and timeout are fixed at construction; clones share the
/// underlying connection pool.
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(timeout_secs: u64, proxy: Option<&str>) -> Result<Self> {
        let timeout = Duration::from_secs(timeout_secs.max(1));

        let mut builder = Client::builder()
            .user_agent(concat!(
                "Mozilla/5.0 (compatible; sitecrawl/",
                env!("CARGO_PKG_VERSION"),
                ")"
            ))
            .timeout(timeout)
            .connect_timeout(timeout)
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .redirect(reqwest::redirect::Policy::limited(10));

        if let Some(proxy_url) = proxy {
            debug!("Routing fetches through proxy {}", proxy_url);
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| ScanError::InvalidProxy(format!("{}: {}", proxy_url, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;
        Ok(Self { client })
    }

    /// GET `url`, following redirects, and return its body as text. Any non-2xx status is an error.
    pub async fn fetch(&self, url: &str) -> std::result::Result<FetchedBody, FetchError> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let final_url = response.url().clone();
        if final_url.as_str() != url {
            debug!("{} redirected to {}", url, final_url);
        }
        let body = response.text().await?;
        Ok(FetchedBody { final_url, body })
    }
}
