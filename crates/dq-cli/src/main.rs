//! Data-quality CLI.

use clap::{ColorChoice, Parser};
use dq_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod ingest;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{outcome_json, report_json, run_analyze, run_clean};
use crate::summary::{print_outcome, print_report};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Analyze(args) => match run_analyze(args) {
            Ok(result) => {
                if args.json {
                    match serde_json::to_string_pretty(&report_json(
                        &result.metadata,
                        &result.report,
                    )) {
                        Ok(rendered) => println!("{rendered}"),
                        Err(error) => {
                            eprintln!("error: {error}");
                            std::process::exit(1);
                        }
                    }
                } else {
                    print_report(&result.metadata, &result.report);
                }
                if args.fail_on_high && result.report.has_high_severity() {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
        Command::Clean(args) => match run_clean(args) {
            Ok(result) => {
                if args.json {
                    match serde_json::to_string_pretty(&outcome_json(&result)) {
                        Ok(rendered) => println!("{rendered}"),
                        Err(error) => {
                            eprintln!("error: {error}");
                            std::process::exit(1);
                        }
                    }
                } else {
                    print_outcome(&result.metadata, &result.outcome, &result.transform_id);
                }
                0
            }
            Err(error) => {
                eprintln!("error: {error}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags.
///
/// `--log-level` wins over `-v`/`-q`; `RUST_LOG` only applies when neither
/// flag was given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let explicit = cli.log_level.map(|level| match level {
        LogLevelArg::Error => LevelFilter::ERROR,
        LogLevelArg::Warn => LevelFilter::WARN,
        LogLevelArg::Info => LevelFilter::INFO,
        LogLevelArg::Debug => LevelFilter::DEBUG,
        LogLevelArg::Trace => LevelFilter::TRACE,
    });
    LogConfig {
        level_filter: explicit.unwrap_or_else(|| cli.verbosity.tracing_level_filter()),
        use_env_filter: explicit.is_none() && !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("valid args")
    }

    #[test]
    fn default_flags_keep_env_filter_enabled() {
        let config = log_config_from_cli(&parse(&["dq", "analyze", "in.csv"]));
        assert!(config.use_env_filter);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn explicit_log_level_wins_over_verbosity() {
        let config = log_config_from_cli(&parse(&[
            "dq", "analyze", "in.csv", "-v", "--log-level", "error",
        ]));
        assert_eq!(config.level_filter, LevelFilter::ERROR);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn verbosity_flags_disable_env_filter() {
        let config = log_config_from_cli(&parse(&["dq", "analyze", "in.csv", "-vv"]));
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }
}
