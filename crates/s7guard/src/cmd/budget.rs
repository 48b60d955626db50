use s7guard_frame::{read_budget, write_budget, DataItem};
use s7guard_session::{SessionConfig, SessionGuard};
use serde::Serialize;

use crate::cmd::{BatchKind, BudgetArgs};
use crate::exit::{session_error, CliResult, DATA_INVALID, SUCCESS};
use crate::output::{print_report, OutputFormat};

#[derive(Serialize)]
struct BudgetOutput<'a> {
    kind: &'static str,
    max_pdu_size: usize,
    items: &'a [DataItem],
    request_size: usize,
    /// Response size for reads, data size for writes.
    data_size: usize,
    fits: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub fn run(args: BudgetArgs, format: OutputFormat) -> CliResult<i32> {
    let guard = SessionGuard::with_config(SessionConfig {
        max_pdu_size: args.pdu,
        audit_enabled: false,
        ..SessionConfig::default()
    })
    .map_err(|err| session_error("invalid session config", err))?;

    let (kind, request_size, data_size, verdict) = match args.kind {
        BatchKind::Read => {
            let (budget, verdict) = match guard.check_read(&args.items) {
                Ok(budget) => (budget, Ok(())),
                Err(err) => (read_budget(&args.items), Err(err)),
            };
            ("read", budget.request_size, budget.response_size, verdict)
        }
        BatchKind::Write => {
            let (budget, verdict) = match guard.check_write(&args.items) {
                Ok(budget) => (budget, Ok(())),
                Err(err) => (write_budget(&args.items), Err(err)),
            };
            ("write", budget.request_size, budget.payload_size, verdict)
        }
    };

    let error = verdict.err().map(|err| err.to_string());
    let fits = error.is_none();

    let report = BudgetOutput {
        kind,
        max_pdu_size: guard.max_pdu_size(),
        items: &args.items,
        request_size,
        data_size,
        fits,
        error: error.clone(),
    };
    let mut rows = vec![
        ("kind", kind.to_string()),
        ("max_pdu_size", guard.max_pdu_size().to_string()),
        ("items", args.items.len().to_string()),
        ("request_size", request_size.to_string()),
        ("data_size", data_size.to_string()),
        ("fits", fits.to_string()),
    ];
    if let Some(error) = error {
        rows.push(("error", error));
    }
    print_report(&report, &rows, format);

    Ok(if fits { SUCCESS } else { DATA_INVALID })
}
