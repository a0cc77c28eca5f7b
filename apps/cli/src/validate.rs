//! `deligo validate`: run the onboarding rule set over files.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use deligo_onboarding::{OnboardingRecord, OnboardingValidator, ValidationErrors};
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::config::{CliConfig, OutputFormat};

/// Result of validating one input.
#[derive(Debug)]
pub enum Outcome {
    Valid(Box<OnboardingRecord>),
    Invalid(ValidationErrors),
    /// The input could not be read or is not JSON.
    Unreadable(anyhow::Error),
}

/// Totals across every input, used for the exit code.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub valid: usize,
    pub invalid: usize,
    pub unreadable: usize,
}

impl Summary {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Valid(_) => self.valid += 1,
            Outcome::Invalid(_) => self.invalid += 1,
            Outcome::Unreadable(_) => self.unreadable += 1,
        }
    }

    /// 0 when everything validated, 1 when a submission was rejected,
    /// 2 when an input could not be read at all.
    pub const fn exit_code(&self) -> u8 {
        if self.unreadable > 0 {
            2
        } else if self.invalid > 0 {
            1
        } else {
            0
        }
    }
}

fn display_name(path: &Path) -> String {
    if path == Path::new("-") {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read standard input")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
    }
}

/// Reads, parses and validates one input.
pub fn check(path: &Path, validator: &OnboardingValidator) -> Outcome {
    let input = read_source(path).and_then(|source| {
        serde_json::from_str::<Value>(&source)
            .with_context(|| format!("{} is not valid JSON", display_name(path)))
    });

    match input {
        Ok(input) => match validator.validate(&input) {
            Ok(record) => Outcome::Valid(Box::new(record)),
            Err(errors) => Outcome::Invalid(errors),
        },
        Err(error) => Outcome::Unreadable(error),
    }
}

/// Validates every file and prints one report per file to `out`.
pub fn run(files: &[PathBuf], config: &CliConfig, out: &mut impl Write) -> anyhow::Result<Summary> {
    let validator = OnboardingValidator::new(config.mode);
    let mut summary = Summary::default();

    for path in files {
        let name = display_name(path);
        let outcome = check(path, &validator);
        summary.record(&outcome);

        match &outcome {
            Outcome::Valid(_) => debug!(file = %name, "submission valid"),
            Outcome::Invalid(errors) => debug!(file = %name, errors = errors.len(), "submission rejected"),
            Outcome::Unreadable(error) => warn!(file = %name, error = %error, "input skipped"),
        }

        match config.output {
            OutputFormat::Pretty => write_pretty(out, &name, &outcome)?,
            OutputFormat::Json => write_json(out, &name, &outcome)?,
        }
    }

    info!(
        valid = summary.valid,
        invalid = summary.invalid,
        unreadable = summary.unreadable,
        mode = %config.mode,
        "validation finished"
    );
    Ok(summary)
}

fn write_pretty(out: &mut impl Write, name: &str, outcome: &Outcome) -> anyhow::Result<()> {
    match outcome {
        Outcome::Valid(record) => {
            writeln!(out, "OK {name}")?;
            writeln!(out, "{}", serde_json::to_string_pretty(record)?)?;
        }
        Outcome::Invalid(errors) => {
            writeln!(out, "INVALID {name} ({} error(s))", errors.len())?;
            for error in errors {
                let field = match error.field_path() {
                    "" => "<submission>",
                    field => field,
                };
                writeln!(out, "  {field}: {} [{}]", error.message, error.code)?;
            }
        }
        Outcome::Unreadable(error) => {
            writeln!(out, "ERROR {name}: {error:#}")?;
        }
    }
    Ok(())
}

fn write_json(out: &mut impl Write, name: &str, outcome: &Outcome) -> anyhow::Result<()> {
    let report = match outcome {
        Outcome::Valid(record) => json!({ "file": name, "valid": true, "record": record }),
        Outcome::Invalid(errors) => json!({
            "file": name,
            "valid": false,
            "errors": errors.to_json_value(),
        }),
        Outcome::Unreadable(error) => json!({
            "file": name,
            "valid": false,
            "error": format!("{error:#}"),
        }),
    };
    writeln!(out, "{}", serde_json::to_string(&report)?)?;
    Ok(())
}
