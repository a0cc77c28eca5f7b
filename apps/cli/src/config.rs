//! Layered configuration: defaults → config file → environment → flags.

use std::path::Path;

use anyhow::{Context, bail};
use clap::ValueEnum;
use deligo_onboarding::RuleMode;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, Command};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "deligo.toml";

/// How validation results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary
    #[default]
    Pretty,
    /// One JSON document per line
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    pub mode: RuleMode,
    pub output: OutputFormat,
    pub log: deligo_log::Config,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            mode: RuleMode::default(),
            output: OutputFormat::default(),
            log: deligo_log::Config::cli(),
        }
    }
}

impl CliConfig {
    /// Loads the effective configuration for `cli`.
    pub fn load(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = Self::figment(cli.config.as_deref())?
            .extract::<Self>()
            .context("invalid configuration")?;
        config.apply_flags(cli);
        Ok(config)
    }

    fn figment(path: Option<&Path>) -> anyhow::Result<Figment> {
        let file = match path {
            Some(path) if !path.is_file() => {
                bail!("config file not found: {}", path.display());
            }
            Some(path) => path,
            None => Path::new(DEFAULT_CONFIG_FILE),
        };

        Ok(Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("DELIGO_").only(&["mode", "output"]))
            .merge(Env::raw().filter_map(|key| {
                // the logger's own variables, under the [log] table
                if key == "DELIGO_LOG" {
                    Some("log.level".into())
                } else if key == "DELIGO_LOG_FORMAT" {
                    Some("log.format".into())
                } else {
                    None
                }
            })))
    }

    fn apply_flags(&mut self, cli: &Cli) {
        if let Some(level) = &cli.log_level {
            self.log.level.clone_from(level);
        }
        if let Command::Validate(args) = &cli.command {
            if let Some(mode) = args.mode {
                self.mode = mode;
            }
            if let Some(output) = args.output {
                self.output = output;
            }
        }
    }
}
