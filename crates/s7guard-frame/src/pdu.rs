//! PDU budget arithmetic for read and write batches.
//!
//! ```text
//! read  request  = 19 + 12 * items
//! read  response = padded_data + 4 * items + 14
//! write request  = 12 + 18 * items
//! write payload  = padded_data + 16 * items + 12
//! ```
//!
//! `padded_data` is the sum of each item's encoded length, rounded up to an
//! even number per item.
//!
//! All sizes saturate at `usize::MAX`. A count too large to represent still
//! yields a size above any PDU limit, so `check` rejects it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FrameError, Result};

pub const READ_REQUEST_HEADER: usize = 19;
pub const READ_REQUEST_PER_ITEM: usize = 12;
pub const READ_RESPONSE_HEADER: usize = 14;
pub const READ_RESPONSE_PER_ITEM: usize = 4;

pub const WRITE_REQUEST_HEADER: usize = 12;
pub const WRITE_REQUEST_PER_ITEM: usize = 18;
pub const WRITE_PAYLOAD_HEADER: usize = 12;
pub const WRITE_PAYLOAD_PER_ITEM: usize = 16;

/// Encoded byte length of one requested item.
///
/// Implemented by whatever describes a read/write target; the budget only
/// needs the number of bytes the item occupies on the wire.
pub trait ItemLength {
    fn byte_length(&self) -> usize;
}

impl<T: ItemLength + ?Sized> ItemLength for &T {
    fn byte_length(&self) -> usize {
        (**self).byte_length()
    }
}

/// Controller variable types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VarType {
    Bit,
    Byte,
    Word,
    DWord,
    Int,
    DInt,
    Real,
    LReal,
    String,
    S7String,
    S7WString,
    Timer,
    Counter,
    DateTime,
    DateTimeLong,
    Date,
    Time,
}

impl VarType {
    /// Bytes occupied by `count` elements of this type, saturating at
    /// `usize::MAX`.
    pub fn byte_length(self, count: usize) -> usize {
        match self {
            VarType::Bit => count.div_ceil(8),
            VarType::Byte => count.max(1),
            VarType::String => count,
            VarType::S7String => round_up_even(count.saturating_add(2)),
            VarType::S7WString => count.saturating_mul(2).saturating_add(4),
            VarType::Word | VarType::Int | VarType::Timer | VarType::Counter | VarType::Date => {
                count.saturating_mul(2)
            }
            VarType::DWord | VarType::DInt | VarType::Real | VarType::Time => {
                count.saturating_mul(4)
            }
            VarType::LReal | VarType::DateTime => count.saturating_mul(8),
            VarType::DateTimeLong => count.saturating_mul(12),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VarType::Bit => "bit",
            VarType::Byte => "byte",
            VarType::Word => "word",
            VarType::DWord => "dword",
            VarType::Int => "int",
            VarType::DInt => "dint",
            VarType::Real => "real",
            VarType::LReal => "lreal",
            VarType::String => "string",
            VarType::S7String => "s7string",
            VarType::S7WString => "s7wstring",
            VarType::Timer => "timer",
            VarType::Counter => "counter",
            VarType::DateTime => "datetime",
            VarType::DateTimeLong => "datetimelong",
            VarType::Date => "date",
            VarType::Time => "time",
        }
    }
}

impl fmt::Display for VarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VarType {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        let parsed = match s.trim().to_ascii_lowercase().as_str() {
            "bit" | "bool" => VarType::Bit,
            "byte" => VarType::Byte,
            "word" => VarType::Word,
            "dword" => VarType::DWord,
            "int" => VarType::Int,
            "dint" => VarType::DInt,
            "real" => VarType::Real,
            "lreal" => VarType::LReal,
            "string" => VarType::String,
            "s7string" => VarType::S7String,
            "s7wstring" => VarType::S7WString,
            "timer" => VarType::Timer,
            "counter" => VarType::Counter,
            "datetime" => VarType::DateTime,
            "datetimelong" => VarType::DateTimeLong,
            "date" => VarType::Date,
            "time" => VarType::Time,
            _ => return Err(FrameError::UnknownVarType(s.to_string())),
        };
        Ok(parsed)
    }
}

/// A (variable type, element count) read/write target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataItem {
    pub var_type: VarType,
    pub count: usize,
}

impl DataItem {
    pub fn new(var_type: VarType, count: usize) -> Self {
        Self { var_type, count }
    }
}

impl ItemLength for DataItem {
    fn byte_length(&self) -> usize {
        self.var_type.byte_length(self.count)
    }
}

/// Parses `TYPE:COUNT`, or a bare `TYPE` meaning one element.
impl FromStr for DataItem {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self> {
        let (ty, count) = match s.split_once(':') {
            Some((ty, count)) => {
                let count = count
                    .trim()
                    .parse()
                    .map_err(|_| FrameError::InvalidItemCount(s.to_string()))?;
                (ty, count)
            }
            None => (s, 1),
        };
        Ok(Self::new(ty.parse()?, count))
    }
}

fn round_up_even(len: usize) -> usize {
    len.saturating_add(len & 1)
}

fn padded_data_length<I: ItemLength>(items: &[I]) -> usize {
    items
        .iter()
        .map(|item| round_up_even(item.byte_length()))
        .fold(0, usize::saturating_add)
}

fn envelope(header: usize, per_item: usize, count: usize) -> usize {
    per_item.saturating_mul(count).saturating_add(header)
}

/// Sizes a read batch needs in each direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadBudget {
    pub item_count: usize,
    pub request_size: usize,
    pub response_size: usize,
}

impl ReadBudget {
    /// Fail if either direction exceeds `max_pdu_size`. The request side is
    /// checked first.
    pub fn check(&self, max_pdu_size: usize) -> Result<()> {
        if self.request_size > max_pdu_size {
            return Err(FrameError::RequestTooLarge {
                size: self.request_size,
                max: max_pdu_size,
            });
        }
        if self.response_size > max_pdu_size {
            return Err(FrameError::ResponseTooLarge {
                size: self.response_size,
                max: max_pdu_size,
            });
        }
        Ok(())
    }
}

/// Sizes a write batch needs for its item envelope and its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteBudget {
    pub item_count: usize,
    pub request_size: usize,
    pub payload_size: usize,
}

impl WriteBudget {
    /// Fail if the envelope or the data exceeds `max_pdu_size`. The envelope
    /// is checked first.
    pub fn check(&self, max_pdu_size: usize) -> Result<()> {
        if self.request_size > max_pdu_size {
            return Err(FrameError::RequestTooLarge {
                size: self.request_size,
                max: max_pdu_size,
            });
        }
        if self.payload_size > max_pdu_size {
            return Err(FrameError::PayloadTooLarge {
                size: self.payload_size,
                max: max_pdu_size,
            });
        }
        Ok(())
    }
}

pub fn read_budget<I: ItemLength>(items: &[I]) -> ReadBudget {
    let count = items.len();
    ReadBudget {
        item_count: count,
        request_size: envelope(READ_REQUEST_HEADER, READ_REQUEST_PER_ITEM, count),
        response_size: padded_data_length(items).saturating_add(envelope(
            READ_RESPONSE_HEADER,
            READ_RESPONSE_PER_ITEM,
            count,
        )),
    }
}

pub fn write_budget<I: ItemLength>(items: &[I]) -> WriteBudget {
    let count = items.len();
    WriteBudget {
        item_count: count,
        request_size: envelope(WRITE_REQUEST_HEADER, WRITE_REQUEST_PER_ITEM, count),
        payload_size: padded_data_length(items).saturating_add(envelope(
            WRITE_PAYLOAD_HEADER,
            WRITE_PAYLOAD_PER_ITEM,
            count,
        )),
    }
}
