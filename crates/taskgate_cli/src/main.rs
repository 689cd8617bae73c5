//! Line-oriented driver for the task registry.
//!
//! # Responsibility
//! - Assemble the registry, gate and adapter from command-line flags.
//! - Replay `METHOD PATH [JSON]` lines from stdin through the adapter.
//!
//! # Invariants
//! - Each non-blank, non-comment input line produces exactly one output line.
//! - Bad flags exit with status 2; bad request lines never abort the run.

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;
use taskgate_api::TaskApi;
use taskgate_core::{default_log_level, init_logging, CoreConfig, SystemClock, TaskService};

/// Replays `METHOD PATH [JSON BODY]` lines from stdin against an in-memory
/// task registry and prints `STATUS JSON` per request.
#[derive(Parser, Debug)]
#[command(name = "taskgate_cli", version)]
#[command(about = "Line-oriented driver for the taskgate registry")]
#[command(after_help = "Examples:\n  GET /items\n  POST /items {\"name\":\"X\",\"done\":false}\n  PUT /items/5\n  DELETE /items/4")]
struct Cli {
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long, default_value = default_log_level())]
    log_level: String,

    /// Minimum seconds between accepted creates; omit to disable the gate.
    #[arg(long, value_parser = parse_interval_secs)]
    create_interval_secs: Option<Duration>,

    /// Start with an empty registry instead of the fixture records.
    #[arg(long)]
    empty: bool,
}

impl Cli {
    fn into_config(self) -> CoreConfig {
        CoreConfig {
            log_level: self.log_level,
            log_dir: self.log_dir,
            create_interval: self.create_interval_secs,
            seed_fixtures: !self.empty,
        }
    }
}

fn parse_interval_secs(value: &str) -> Result<Duration, String> {
    match value.parse::<u64>() {
        Ok(0) => Err("interval must be greater than zero".to_string()),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(err) => Err(format!("not a whole number of seconds: {err}")),
    }
}

/// Splits `METHOD PATH [BODY]`; the body is everything after the path.
fn parse_request_line(line: &str) -> Option<(&str, &str, &str)> {
    let line = line.trim();
    let (method, rest) = line.split_once(char::is_whitespace)?;
    let rest = rest.trim_start();
    let (path, body) = match rest.split_once(char::is_whitespace) {
        Some((path, body)) => (path, body.trim()),
        None => (rest, ""),
    };
    if path.is_empty() {
        return None;
    }
    Some((method, path, body))
}

fn run(config: CoreConfig) -> io::Result<()> {
    if let Some(log_dir) = &config.log_dir {
        if let Err(err) = init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    let service = TaskService::from_config(config.repository(), SystemClock, &config);
    let api = TaskApi::new(service);
    info!(
        "event=cli_start module=cli status=ok seeded={} create_interval_secs={}",
        config.seed_fixtures,
        config
            .create_interval
            .map(|interval| interval.as_secs().to_string())
            .unwrap_or_else(|| "off".to_string())
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match parse_request_line(trimmed) {
            Some((method, path, body)) => {
                let response = api.handle(method, path, body);
                writeln!(out, "{} {}", response.status, response.body)?;
            }
            None => {
                let body = serde_json::json!({
                    "error": "invalid_request_line",
                    "message": "expected METHOD PATH [JSON BODY]",
                });
                writeln!(out, "400 {body}")?;
            }
        }
    }

    info!(
        "event=cli_exit module=cli status=ok mutations={}",
        api.service().mutation_count()
    );
    out.flush()
}

fn main() {
    let config = Cli::parse().into_config();
    if let Err(err) = config.validate() {
        Cli::command()
            .error(ErrorKind::ValueValidation, err.to_string())
            .exit();
    }

    if let Err(err) = run(config) {
        eprintln!("taskgate_cli failed: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_request_line, Cli};
    use clap::error::ErrorKind;
    use clap::{CommandFactory, Parser};
    use std::time::Duration;

    #[test]
    fn parse_request_line_keeps_json_body_intact() {
        let (method, path, body) =
            parse_request_line(r#"POST /items {"name": "two words", "done": false}"#).unwrap();
        assert_eq!(method, "POST");
        assert_eq!(path, "/items");
        assert_eq!(body, r#"{"name": "two words", "done": false}"#);

        assert_eq!(parse_request_line("GET  /items"), Some(("GET", "/items", "")));
        assert_eq!(parse_request_line("GET"), None);
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_build_gated_unseeded_config() {
        let cli =
            Cli::try_parse_from(["taskgate_cli", "--empty", "--create-interval-secs", "60"])
                .unwrap();
        let config = cli.into_config();
        assert!(!config.seed_fixtures);
        assert_eq!(config.create_interval, Some(Duration::from_secs(60)));
        config.validate().unwrap();
    }

    #[test]
    fn rejects_zero_or_non_numeric_interval() {
        for value in ["0", "soon"] {
            let err = Cli::try_parse_from(["taskgate_cli", "--create-interval-secs", value])
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ValueValidation);
        }
    }

    #[test]
    fn rejects_unknown_flag_and_missing_value() {
        let unknown = Cli::try_parse_from(["taskgate_cli", "--bogus"]).unwrap_err();
        assert_eq!(unknown.kind(), ErrorKind::UnknownArgument);
        assert!(Cli::try_parse_from(["taskgate_cli", "--log-level"]).is_err());
    }

    #[test]
    fn unknown_log_level_fails_config_validation() {
        let cli = Cli::try_parse_from(["taskgate_cli", "--log-level", "loud"]).unwrap();
        assert!(cli.into_config().validate().is_err());
    }
}
