// src/main.rs

use bookstack_mcp::config::{CommandLineInput, ServerConfig};
use bookstack_mcp::mcp::McpServer;
use bookstack_mcp::operations::BookStack;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Sets up logging configuration.
///
/// stdout carries the protocol, so the console appender writes to stderr.
fn setup_logging(verbose: bool, log_file_path: &Path) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "[{l}] {m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(if verbose {
                    LevelFilter::Debug
                } else {
                    LevelFilter::Warn
                })))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();
    let config = ServerConfig::resolve(cli)?;

    setup_logging(config.verbose, &config.log_file)?;

    log::info!(
        "Starting {} {} for {} (writes {})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.base_url,
        if config.write_enabled { "enabled" } else { "disabled" }
    );

    let bookstack = BookStack::from_config(&config)?;
    let server = McpServer::new(Arc::new(bookstack));
    server.run_stdio().await?;

    Ok(())
}
