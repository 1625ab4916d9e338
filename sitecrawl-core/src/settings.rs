use sitecrawl_scanner::crawler::{DEFAULT_MAX_CONCURRENT_TASKS, DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAGES};
use sitecrawl_scanner::fetcher::DEFAULT_TIMEOUT_SECS;
use std::env;
use std::fmt::Display;
use std::str::FromStr;

/// Limits applied to every crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlSettings {
    pub max_pages: usize,
    pub max_depth: usize,
    pub max_concurrent_tasks: usize,
    pub request_timeout_secs: u64,
}

impl Default for CrawlSettings {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            max_concurrent_tasks: DEFAULT_MAX_CONCURRENT_TASKS,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CrawlSettings {
    /// Read `MAX_PAGES`, `MAX_DEPTH`, `MAX_CONCURRENT_TASKS` and `REQUEST_TIMEOUT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`CrawlSettings::from_env`], reading variables through `lookup`.
    ///
    /// Unparseable values warn and keep the default; zero is raised to 1.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_pages: read_var(&lookup, "MAX_PAGES", defaults.max_pages),
            max_depth: read_var(&lookup, "MAX_DEPTH", defaults.max_depth),
            max_concurrent_tasks: read_var(
                &lookup,
                "MAX_CONCURRENT_TASKS",
                defaults.max_concurrent_tasks,
            ),
            request_timeout_secs: read_var(&lookup, "REQUEST_TIMEOUT", defaults.request_timeout_secs),
        }
    }
}

fn read_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialEq + From<u8> + Display + Copy,
{
    let Some(raw) = lookup(key) else {
        return default;
    };

    match raw.trim().parse::<T>() {
        Ok(value) if value == T::from(0) => {
            eprintln!("Warning: {} must be at least 1, using 1", key);
            T::from(1)
        }
        Ok(value) => value,
        Err(_) => {
            eprintln!(
                "Warning: Invalid {} value '{}', using default {}",
                key, raw, default
            );
            default
        }
    }
}
