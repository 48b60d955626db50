use std::io::IsTerminal;

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use s7guard_frame::FrameRecord;
use serde::Serialize;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

/// Print a serialisable report as JSON, or as a two-column table / list of
/// `key=value` pairs built from `rows`.
pub fn print_report<T: Serialize>(report: &T, rows: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["FIELD", "VALUE"]);
            for (field, value) in rows {
                table.add_row(vec![field.to_string(), value.clone()]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            let line: Vec<String> = rows
                .iter()
                .map(|(field, value)| format!("{field}={value}"))
                .collect();
            println!("{}", line.join(" "));
        }
    }
}

/// Print captured frames, oldest first.
pub fn print_frames(frames: &[FrameRecord], format: OutputFormat) {
    match format {
        OutputFormat::Json => {}
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["DIRECTION", "OPERATION", "SIZE", "HEX"]);
            for frame in frames {
                table.add_row(vec![
                    frame.direction().to_string(),
                    frame.operation().to_string(),
                    frame.byte_len().to_string(),
                    frame.payload_hex().to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for frame in frames {
                println!(
                    "{} op={} size={} hex={}",
                    frame.direction(),
                    frame.operation(),
                    frame.byte_len(),
                    frame.payload_hex()
                );
            }
        }
    }
}
