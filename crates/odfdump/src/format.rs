//! The line protocol written for each record.
//!
//! ```text
//! <name>:: date_time: 2011-03-07T14:05:58
//! <name>:: comment: <text>
//! <name>:: extra: b'<escaped bytes>'
//! <name>:: file_size: <decimal>
//! <name>:: CRC: <decimal>
//! <name>:: sha1: <40 hex digits>
//! <name>:: filetype: binary|utf-8|unknown
//! <name>:: <content line>
//! ```
//!
//! Attribute headers appear only when the attribute is present. Content lines
//! appear only for `utf-8` records. Names are written as-is, so a `:` inside a
//! member name is not escaped.

use std::borrow::Cow;
use std::io::{self, Write};

use crate::record::Record;

/// Separates the member name from the rest of every line.
pub const SEPARATOR: &str = ":: ";

/// Header lines of a record as `(attribute, value)` pairs, in output order.
pub fn headers(record: &Record) -> Vec<(&'static str, String)> {
    let attrs = &record.attributes;
    let mut headers = Vec::with_capacity(7);

    if let Some(date_time) = &attrs.date_time {
        headers.push(("date_time", date_time.to_string()));
    }
    if let Some(comment) = &attrs.comment {
        headers.push(("comment", single_line(comment).into_owned()));
    }
    if let Some(extra) = &attrs.extra {
        headers.push(("extra", byte_literal(extra)));
    }
    if let Some(file_size) = attrs.file_size {
        headers.push(("file_size", file_size.to_string()));
    }
    if let Some(crc) = attrs.crc {
        headers.push(("CRC", crc.to_string()));
    }
    headers.push(("sha1", record.sha1.clone()));
    headers.push(("filetype", record.filetype.to_string()));

    headers
}

/// Render a record as output lines, without terminators.
pub fn format_record(record: &Record) -> Vec<String> {
    let name = &record.name;
    let mut lines: Vec<String> = headers(record)
        .into_iter()
        .map(|(key, value)| format!("{name}{SEPARATOR}{key}: {value}"))
        .collect();

    if record.filetype.is_text() {
        lines.extend(record.lines.iter().map(|line| format!("{name}{SEPARATOR}{line}")));
    }

    lines
}

/// Write a record, one `\n`-terminated line at a time.
pub fn write_record<W: Write>(out: &mut W, record: &Record) -> io::Result<()> {
    for line in format_record(record) {
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
    }
    Ok(())
}

/// Replace each line break in a header value with two spaces.
fn single_line(value: &str) -> Cow<'_, str> {
    if !value.contains(['\r', '\n']) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.replace("\r\n", "\n").replace(['\r', '\n'], "  "))
}

/// `b'...'` with quotes, backslashes and non-printable bytes escaped.
fn byte_literal(bytes: &[u8]) -> String {
    let escaped: String = bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect();
    format!("b'{escaped}'")
}
