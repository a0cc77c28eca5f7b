//! Logger configuration

mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Logger configuration.
///
/// Deserializes from a `[log]` table, so tools can embed it in their own
/// configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `EnvFilter` directives, e.g. `info` or `deligo_onboarding=trace,warn`.
    pub level: String,
    pub format: Format,
    pub display: DisplayConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Compact,
            display: DisplayConfig::default(),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Single-line human-readable output.
    #[default]
    Compact,
    /// Multi-line output with fields on separate lines.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl Format {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            _ => Err(LogError::Format(s.to_string())),
        }
    }
}

/// What each log line shows besides the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// ANSI colors (ignored for JSON).
    pub colors: bool,
    /// Timestamp.
    pub time: bool,
    /// Event target (module path).
    pub target: bool,
    /// Source file and line.
    pub source: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            time: true,
            target: true,
            source: false,
        }
    }
}

impl DisplayConfig {
    /// Applies `DELIGO_LOG_COLORS`, `DELIGO_LOG_TIME`, `DELIGO_LOG_TARGET` and
    /// `DELIGO_LOG_SOURCE` overrides read through `var`.
    pub(crate) fn parse_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        let flag = |name: &str| var(name).map(|v| matches!(v.as_str(), "1" | "true" | "yes" | "on"));

        if let Some(colors) = flag("DELIGO_LOG_COLORS") {
            self.colors = colors;
        }
        if let Some(time) = flag("DELIGO_LOG_TIME") {
            self.time = time;
        }
        if let Some(target) = flag("DELIGO_LOG_TARGET") {
            self.target = target;
        }
        if let Some(source) = flag("DELIGO_LOG_SOURCE") {
            self.source = source;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("compact", Format::Compact)]
    #[case("Pretty", Format::Pretty)]
    #[case("JSON", Format::Json)]
    fn test_format_from_str(#[case] input: &str, #[case] expected: Format) {
        assert_eq!(input.parse::<Format>(), Ok(expected));
    }

    #[test]
    fn test_unknown_format() {
        assert_eq!(
            "logfmt".parse::<Format>(),
            Err(LogError::Format("logfmt".to_string()))
        );
    }

    #[test]
    fn test_display_env_flags() {
        let mut display = DisplayConfig::default();
        display.parse_env(|name| match name {
            "DELIGO_LOG_COLORS" => Some("0".to_string()),
            "DELIGO_LOG_SOURCE" => Some("true".to_string()),
            _ => None,
        });

        assert!(!display.colors);
        assert!(display.source);
        assert!(display.time);
    }
}
