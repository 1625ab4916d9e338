pub mod commands;
pub mod config;
pub mod handlers;
pub mod server;

pub use config::{LogFormat, ServerConfig};
pub use handlers::{ApiError, AppState, CrawlRequest, post_crawl};
pub use server::{create_router, init_tracing, start_server};

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
