mod cli;
mod commands;
mod config;

use anyhow::Context;
use clap::Parser;
use scribe_logger::{LevelFilter, LogFormat, Logger, parse_level};
use std::io;

use crate::cli::Cli;
use crate::config::{ShellConfig, load_config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config: ShellConfig = load_config(cli.config.as_deref())?;
    let _logger = init_logger(&config, cli.verbose)?;

    let key = cli.key.as_deref().or(config.cipher.key.as_deref());
    let mut out = io::stdout().lock();

    commands::execute(&cli.command, key, &mut out)
}

fn init_logger(config: &ShellConfig, verbose: u8) -> anyhow::Result<Logger> {
    let level = match verbose {
        0 => parse_level(&config.log.level)?,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let builder = Logger::builder().name(env!("CARGO_BIN_NAME")).level(level);

    let logger = match &config.log.path {
        Some(path) => builder.path(path).format(config.log.format.parse::<LogFormat>()?).init(),
        None => builder.init(),
    };

    logger.context("Failed to initialize logging")
}
