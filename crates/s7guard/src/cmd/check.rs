use bytes::Bytes;
use s7guard_frame::{FrameRecord, ResponseStatus, STATUS_OFFSET};
use s7guard_session::SessionGuard;
use serde::Serialize;

use crate::cmd::CheckResponseArgs;
use crate::exit::{session_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::{print_frames, print_report, OutputFormat};

#[derive(Serialize)]
struct CheckOutput<'a> {
    valid: bool,
    status: Option<u8>,
    data_length: usize,
    data: String,
    frames: &'a [FrameRecord],
}

pub fn run(args: CheckResponseArgs, format: OutputFormat) -> CliResult<i32> {
    let response = Bytes::from(parse_hex("response", &args.response)?);
    let guard = SessionGuard::new();

    if let Some(request) = &args.request {
        guard.record_sent(&parse_hex("--request", request)?, &args.operation);
    }

    let data = guard
        .accept_response(Some(&response), args.data_length, &args.operation)
        .map_err(|err| session_error("response rejected", err))?;

    let status = response.get(STATUS_OFFSET).copied();
    let frames = guard.frames();
    let report = CheckOutput {
        valid: true,
        status,
        data_length: data.len(),
        data: hex::encode_upper(&data),
        frames: &frames,
    };
    let rows = [
        ("valid", "true".to_string()),
        (
            "status",
            status
                .map(|code| format!("{:?}", ResponseStatus::from_byte(code)))
                .unwrap_or_default(),
        ),
        ("data_length", data.len().to_string()),
        ("data", hex::encode_upper(&data)),
    ];
    print_report(&report, &rows, format);
    print_frames(&frames, format);

    Ok(SUCCESS)
}

fn parse_hex(what: &str, input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact)
        .map_err(|err| CliError::new(USAGE, format!("{what} is not valid hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spaced_hex() {
        assert_eq!(
            parse_hex("response", "03 00 0a ff").unwrap(),
            vec![0x03, 0x00, 0x0A, 0xFF]
        );
    }

    #[test]
    fn rejects_odd_length_hex() {
        let err = parse_hex("response", "030").unwrap_err();
        assert_eq!(err.code, USAGE);
    }
}
