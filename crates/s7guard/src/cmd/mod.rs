use clap::{Args, Subcommand, ValueEnum};
use s7guard_frame::DataItem;
use s7guard_session::DEFAULT_MAX_PDU_SIZE;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod budget;
pub mod check;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the PDU budget of a read or write batch.
    Budget(BudgetArgs),
    /// Validate a captured response frame.
    CheckResponse(CheckResponseArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Budget(args) => budget::run(args, format),
        Command::CheckResponse(args) => check::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BatchKind {
    Read,
    Write,
}

#[derive(Args, Debug)]
pub struct BudgetArgs {
    /// Batch direction.
    pub kind: BatchKind,
    /// Negotiated PDU size in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_PDU_SIZE)]
    pub pdu: usize,
    /// Data item as TYPE[:COUNT], e.g. word:4 (repeatable).
    #[arg(long = "item", value_name = "TYPE[:COUNT]", required = true)]
    pub items: Vec<DataItem>,
}

#[derive(Args, Debug)]
pub struct CheckResponseArgs {
    /// Response frame as hex (spaces allowed).
    pub response: String,
    /// Declared data length of the request, in bytes.
    #[arg(long)]
    pub data_length: usize,
    /// Request frame as hex, logged ahead of the response.
    #[arg(long, value_name = "HEX")]
    pub request: Option<String>,
    /// Operation label attached to the logged frames.
    #[arg(long, default_value = s7guard_frame::OP_READ)]
    pub operation: String,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
