#![allow(clippy::print_stderr, clippy::print_stdout)]

mod args;
mod commands;

use crate::args::Cli;
use anyhow::Context;
use clap::Parser;
use ecinv_cipher::{CipherError, DIAGNOSTICS_TARGET};
use ecinv_client::ClientError;
use ecinv_client::config::{ConfigError, load_config};
use ecinv_domain::config::{AppConfig, LogConfig};
use ecinv_logger::{Logger, parse_level};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}: {err:#}", error_code(&err));
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config: AppConfig = load_config(cli.config.as_ref()).context("Configuration")?;
    config.client.debug |= cli.debug;

    let _log = init_logger(&config.log, config.client.debug)?;

    let output = commands::execute(cli.command, &config.client).await?;
    println!("{output}");

    Ok(())
}

fn init_logger(log: &LogConfig, diagnostics: bool) -> anyhow::Result<Logger> {
    let mut builder = Logger::builder()
        .name(env!("CARGO_BIN_NAME"))
        .level(parse_level(&log.level)?)
        .console(log.console)
        .json(log.json);

    if let Some(filter) = &log.filter {
        builder = builder.filter(filter);
    }
    if let Some(directory) = &log.directory {
        builder = builder.directory(directory);
    }
    if diagnostics {
        builder = builder.directive(format!("{DIAGNOSTICS_TARGET}=debug"));
    }

    Ok(builder.init()?)
}

/// Taxonomy code of the first classified error in the chain.
fn error_code(err: &anyhow::Error) -> &'static str {
    err.chain()
        .find_map(|cause| {
            if let Some(e) = cause.downcast_ref::<ClientError>() {
                Some(e.code())
            } else if cause.is::<CipherError>() {
                Some("CRYPTO_ERROR")
            } else {
                cause.downcast_ref::<ConfigError>().map(ConfigError::code)
            }
        })
        .unwrap_or("ERROR")
}
