use bytes::Bytes;
use s7guard_frame::{
    FrameError, ResponseStatus, MIN_STATUS_FRAME_LEN, RESPONSE_DATA_OFFSET, STATUS_OFFSET,
};

/// Validate a read/write response and return its data region.
///
/// Checks, in order:
/// 1. a frame was received at all,
/// 2. it is long enough to carry the status byte,
/// 3. the status byte reports success,
/// 4. it is long enough to carry `data_length` bytes of data.
///
/// A controller-reported status error therefore wins over a truncated
/// frame. A `data_length` too large to add the header to is reported as
/// expecting `usize::MAX` bytes. On success the returned slice is the `data_length` bytes starting
/// at [`RESPONSE_DATA_OFFSET`], sharing the input buffer.
pub fn validate_response(
    response: Option<&Bytes>,
    data_length: usize,
) -> Result<Bytes, FrameError> {
    let frame = response.ok_or(FrameError::NoData)?;
    let expected = data_length.saturating_add(RESPONSE_DATA_OFFSET);

    if frame.len() < MIN_STATUS_FRAME_LEN {
        return Err(wrong_byte_count(frame, expected));
    }

    let status = ResponseStatus::from_byte(frame[STATUS_OFFSET]);
    if let Err(err) = status.into_result() {
        tracing::warn!(status = status.code(), error = %err, "response status rejected");
        return Err(err);
    }

    if frame.len() < expected {
        return Err(wrong_byte_count(frame, expected));
    }

    Ok(frame.slice(RESPONSE_DATA_OFFSET..expected))
}

fn wrong_byte_count(frame: &[u8], expected: usize) -> FrameError {
    FrameError::WrongByteCount {
        received: frame.len(),
        expected,
        dump: hex::encode_upper(frame),
    }
}
