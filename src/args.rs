use std::path::PathBuf;
use std::str::FromStr;

use argh::FromArgs;

use csstty::parser::options::{ParserOptions, DEFAULT_MAX_NESTING_DEPTH};

/// Parse a CSS stylesheet and browse its rule tree.
#[derive(FromArgs, Debug)]
pub struct Args {
    /// the stylesheet to parse
    #[argh(positional)]
    pub path: PathBuf,

    /// print the normalized stylesheet instead of opening the browser
    #[argh(switch)]
    pub print: bool,

    /// skip stray top-level tokens instead of failing
    #[argh(switch)]
    pub lenient: bool,

    /// capture the whole at-rule prelude rather than its first token
    #[argh(switch)]
    pub full_prelude: bool,

    /// deepest bracket nesting allowed in selectors
    #[argh(option, default = "DEFAULT_MAX_NESTING_DEPTH")]
    pub max_depth: usize,

    /// the amount of logging to perform
    #[argh(option, default = "LogLevel::Off")]
    pub log: LogLevel,
}

impl Args {
    pub fn parser_options(&self) -> ParserOptions {
        ParserOptions::default()
            .with_strict(!self.lenient)
            .with_full_prelude(self.full_prelude)
            .with_max_nesting_depth(self.max_depth)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warning => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl FromStr for LogLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),

            _ => Err("expected one of `off`, `trace`, `debug`, `info`, `warning`, or `error`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::from_args(&["csstty"], &["style.css"]).unwrap();
        assert_eq!(args.path, PathBuf::from("style.css"));
        assert!(!args.print);
        assert_eq!(args.log, LogLevel::Off);
        assert_eq!(args.parser_options(), ParserOptions::default());
    }

    #[test]
    fn test_flags_map_to_options() {
        let args = Args::from_args(
            &["csstty"],
            &[
                "style.css",
                "--lenient",
                "--full-prelude",
                "--max-depth",
                "8",
                "--log",
                "debug",
            ],
        )
        .unwrap();
        let options = args.parser_options();
        assert!(!options.strict);
        assert!(options.full_prelude);
        assert_eq!(options.max_nesting_depth, 8);
        assert_eq!(args.log.to_level_filter(), log::LevelFilter::Debug);
    }

    #[test]
    fn test_bad_log_level() {
        assert!("loud".parse::<LogLevel>().is_err());
    }
}
