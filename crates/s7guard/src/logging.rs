use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

/// Crates whose events follow `--log-level`; everything else stays at warn.
const S7GUARD_TARGETS: [&str; 4] = [
    "s7guard",
    "s7guard_transport",
    "s7guard_frame",
    "s7guard_session",
];

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Level applied to crates outside the workspace.
    fn dependency_level(self) -> LogLevel {
        match self {
            LogLevel::Error => LogLevel::Error,
            _ => LogLevel::Warn,
        }
    }
}

fn filter_directives(level: LogLevel) -> String {
    let mut directives = vec![level.dependency_level().as_directive().to_string()];
    directives.extend(
        S7GUARD_TARGETS
            .iter()
            .map(|target| format!("{target}={}", level.as_directive())),
    );
    directives.join(",")
}

/// Install the stderr subscriber. Frame hex dumps are emitted at trace.
pub fn init_logging(format: LogFormat, level: LogLevel) {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::new(filter_directives(level)))
        .with_ansi(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
