use s7guard_frame::DEFAULT_AUDIT_CAPACITY;
use s7guard_session::{DEFAULT_MAX_PDU_SIZE, DEFAULT_TIMEOUT};

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    println!("s7guard {}", env!("CARGO_PKG_VERSION"));
    if !args.extended {
        return Ok(SUCCESS);
    }

    println!(
        "build: {} ({})",
        option_env!("S7GUARD_BUILD_TARGET").unwrap_or("unknown"),
        option_env!("S7GUARD_BUILD_PROFILE").unwrap_or("unknown")
    );
    println!(
        "session defaults: max_pdu_size={}, audit_capacity={}, timeout={}s",
        DEFAULT_MAX_PDU_SIZE,
        DEFAULT_AUDIT_CAPACITY,
        DEFAULT_TIMEOUT.as_secs()
    );
    println!("features: cli=true");

    Ok(SUCCESS)
}
