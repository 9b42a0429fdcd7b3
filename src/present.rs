//! Console rendering of captured requests.
//!
//! # Responsibilities
//! - Render one record as a colorized, human-scannable text block
//! - Keep section order fixed: metadata, headers, url params, form data, body
//!
//! # Design Decisions
//! - The block is assembled in a buffer and written with a single call, so
//!   blocks from concurrent requests never interleave mid-record
//! - Optional sections are printed only when populated; the body is printed
//!   as indented JSON

use std::io::{self, Write};

use crossterm::style::Stylize;

use crate::record::RequestRecord;

/// Render `record` as one text block on `out`, followed by a blank line.
pub fn print_record(record: &RequestRecord, out: &mut impl Write) -> io::Result<()> {
    let mut block = Vec::new();
    write_block(record, &mut block)?;
    out.write_all(&block)?;
    out.flush()
}

fn write_block(record: &RequestRecord, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{}: {}",
        record.sequence_number.to_string().green(),
        record.timestamp
    )?;
    writeln!(out, "{}: {}", "Method".green(), record.method)?;
    writeln!(out, "{}: {}", "Request URI".green(), record.request_uri)?;
    writeln!(out, "{}: {}", "Remote Addr".green(), record.remote_address)?;

    if !record.headers.is_empty() {
        writeln!(out, "{}", "Headers:".green())?;
        for (name, value) in &record.headers {
            writeln!(out, "{name} = {value}")?;
        }
    }

    if let Some(params) = &record.url_params {
        writeln!(out, "{}", "UrlParams:".green())?;
        for (name, value) in params {
            writeln!(out, "{name} = {value}")?;
        }
    }

    if let Some(fields) = &record.form_data {
        writeln!(out, "{}", "FormData:".green())?;
        for (name, value) in fields {
            writeln!(out, "{name} = {value}")?;
        }
    }

    if let Some(body) = &record.body {
        writeln!(out, "{}", "Body:".green())?;
        let pretty = serde_json::to_string_pretty(body).unwrap_or_else(|_| body.to_string());
        writeln!(out, "{}", pretty.dark_cyan())?;
    }

    writeln!(out)
}
