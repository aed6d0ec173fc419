//! A minimal `argv` pre-parser for the three flags that affect how
//! diagnostics are rendered before a host's full option parser has run
//! (`spec.md` §6 "CLI surface consumed by the diagnostic log").
//!
//! Diagnostics can be emitted arbitrarily early — while a config file is
//! still being located, say — so a host wires this up before constructing
//! its [`super::StderrLog`] rather than waiting on `clap` (or whatever full
//! parser it uses) to finish.

use super::LogLevel;
use super::render::ColorMode;

/// What the preflight found in `argv`, each field `None` if the
/// corresponding flag was absent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogPreflight {
    pub color: Option<ColorModeArg>,
    pub log_level: Option<LogLevel>,
    pub log_limit: Option<usize>,
}

/// `--color`'s value, kept distinct from [`ColorMode`] since the flag only
/// ever spells out `true`/`false` — `IfTerminal` is the preflight's default
/// when the flag is absent, never something a user types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorModeArg {
    True,
    False,
}

impl ColorModeArg {
    #[must_use]
    pub fn into_color_mode(self) -> ColorMode {
        match self {
            Self::True => ColorMode::Always,
            Self::False => ColorMode::Never,
        }
    }
}

/// Scans `argv` for `--color=true|false`, `--log-level=info|warning|error|silent`,
/// and `--log-limit=N`, ignoring every other argument (a full option parser
/// handles the rest later). Unrecognized values for a recognized flag are
/// ignored rather than treated as an error — this is a preview pass, not
/// validation.
#[must_use]
pub fn preparse_log_args(argv: &[String]) -> LogPreflight {
    let mut preflight = LogPreflight::default();
    for arg in argv {
        if let Some(value) = arg.strip_prefix("--color=") {
            preflight.color = match value {
                "true" => Some(ColorModeArg::True),
                "false" => Some(ColorModeArg::False),
                _ => preflight.color,
            };
        } else if let Some(value) = arg.strip_prefix("--log-level=") {
            preflight.log_level = LogLevel::parse(value).or(preflight.log_level);
        } else if let Some(value) = arg.strip_prefix("--log-limit=") {
            preflight.log_limit = value.parse::<usize>().ok().or(preflight.log_limit);
        }
    }
    preflight
}

#[cfg(test)]
#[path = "../../tests/preflight.rs"]
mod tests;
