use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use sitecrawl::commands::command_argument_builder;
use sitecrawl::{ServerConfig, init_tracing, start_server};
use sitecrawl_core::{
    CrawlOptions, ProxyConfig, SeedRequest, execute_crawl, generate_crawl_report,
};
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = command_argument_builder().get_matches();
    let config = ServerConfig::from_env();
    init_tracing(&config);

    match matches.subcommand() {
        Some(("serve", sub_matches)) => handle_serve(config, sub_matches).await,
        Some(("crawl", sub_matches)) => handle_crawl(config, sub_matches).await,
        None => start_server(config).await,
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

async fn handle_serve(mut config: ServerConfig, args: &ArgMatches) -> anyhow::Result<()> {
    if let Some(host) = args.get_one::<String>("host") {
        config.host = host.clone();
    }
    if let Some(port) = args.get_one::<u16>("port") {
        config.port = *port;
    }
    start_server(config).await
}

async fn handle_crawl(config: ServerConfig, args: &ArgMatches) -> anyhow::Result<()> {
    let url = args
        .get_one::<String>("url")
        .context("--url is required")?;
    let quiet = args.get_flag("quiet");

    let mut settings = config.crawl;
    if let Some(max_pages) = args.get_one::<usize>("max-pages") {
        settings.max_pages = (*max_pages).max(1);
    }
    if let Some(max_depth) = args.get_one::<usize>("max-depth") {
        settings.max_depth = (*max_depth).max(1);
    }
    if let Some(concurrency) = args.get_one::<usize>("concurrency") {
        settings.max_concurrent_tasks = (*concurrency).max(1);
    }
    if let Some(timeout) = args.get_one::<u64>("timeout") {
        settings.request_timeout_secs = (*timeout).max(1);
    }

    let proxy = args.get_one::<ProxyConfig>("proxy").cloned();
    if !quiet {
        eprintln!("\n{} {}", "Crawling".bold(), url);
        eprintln!(
            "Max pages: {}, max depth: {}, concurrency: {}",
            settings.max_pages, settings.max_depth, settings.max_concurrent_tasks
        );
        if let Some(ref proxy) = proxy {
            eprintln!("Proxy: {}", proxy);
        }
        eprintln!();
    }

    let options = CrawlOptions {
        settings,
        show_progress_bars: !quiet,
    };
    let result = execute_crawl(SeedRequest::new(url.as_str()).with_proxy(proxy), options, None)
        .await
        .with_context(|| format!("crawl of {} failed", url))?;

    let json = serde_json::to_string_pretty(&result.pages)?;
    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Page map written to {}", path.display());
            if !quiet {
                eprintln!("{} {}", "✓ Page map saved to".green(), path.display());
            }
        }
        None => println!("{}", json),
    }

    if !quiet {
        eprintln!("{}", generate_crawl_report(&result));
    }

    Ok(())
}
