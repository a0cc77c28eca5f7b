//! `deligo`: validate DeliGo delivery-partner onboarding submissions.
//!
//! ```bash
//! # validate files, human-readable report
//! deligo validate alice.json bob.json
//!
//! # stdin, JSON lines, original report-all behaviour
//! cat alice.json | deligo validate - --output json --mode report-all
//!
//! # show effective configuration
//! DELIGO_MODE=report-all deligo config
//! ```

mod cli;
mod config;
mod validate;

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::config::CliConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<u8> {
    let config = CliConfig::load(cli)?;
    deligo_log::init(config.log.clone()).context("failed to initialise logging")?;
    tracing::debug!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match &cli.command {
        Command::Validate(args) => validate::run(&args.files, &config, &mut out)?.exit_code(),
        Command::Config => {
            let rendered = toml::to_string_pretty(&config).context("failed to render configuration")?;
            write!(out, "{rendered}")?;
            0
        }
    };

    out.flush()?;
    Ok(code)
}
