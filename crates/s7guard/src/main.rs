mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "s7guard",
    version,
    about = "Offline PDU budget and response diagnostics for S7 sessions"
)]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(
        long,
        value_name = "LEVEL",
        default_value = "warn",
        env = "S7GUARD_LOG_LEVEL",
        global = true
    )]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    let result = cmd::run(cli.command, format);

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_budget_subcommand() {
        let cli = Cli::try_parse_from([
            "s7guard", "budget", "read", "--pdu", "480", "--item", "word:4", "--item", "real",
        ])
        .expect("budget args should parse");

        match cli.command {
            Command::Budget(args) => {
                assert_eq!(args.pdu, 480);
                assert_eq!(args.items.len(), 2);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_item_type() {
        let err = Cli::try_parse_from(["s7guard", "budget", "read", "--item", "float:2"])
            .expect_err("unknown type should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn budget_requires_items() {
        let err = Cli::try_parse_from(["s7guard", "budget", "write"])
            .expect_err("missing items should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_check_response_subcommand() {
        let cli = Cli::try_parse_from([
            "s7guard",
            "check-response",
            "0300",
            "--data-length",
            "2",
        ])
        .expect("check-response args should parse");
        assert!(matches!(cli.command, Command::CheckResponse(_)));
    }
}
