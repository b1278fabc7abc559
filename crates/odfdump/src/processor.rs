//! Per-member processing: hashing, classification and XML normalization.

use log::debug;
use odfdump_common::memchr::memchr2;
use odfdump_xml::{XmlBackend, XmlBackendKind};

use crate::classify;
use crate::config::DumpConfig;
use crate::error::{Error, Result};
use crate::hash;
use crate::member::Member;
use crate::record::Record;

/// `.xml` payloads of this many bytes or fewer are dumped as plain text.
pub const MIN_XML_LEN: usize = 2;

/// Turns members into records.
///
/// Holds only the settings fixed at startup, so the same processor can be
/// reused for every member of an archive.
pub struct MemberProcessor {
    omit_timestamp: bool,
    xml: Box<dyn XmlBackend>,
}

impl MemberProcessor {
    /// Create a processor using the backend named in `config`.
    pub fn new(config: &DumpConfig) -> Self {
        Self::with_backend(config, config.xml_backend.backend())
    }

    /// Create a processor with an explicit XML backend.
    pub fn with_backend(config: &DumpConfig, xml: Box<dyn XmlBackend>) -> Self {
        Self {
            omit_timestamp: config.omit_timestamp,
            xml,
        }
    }

    /// The XML backend in use.
    pub fn xml_backend(&self) -> XmlBackendKind {
        self.xml.kind()
    }

    /// Build the record for one member.
    ///
    /// Fails only when the member is an `.xml` text member the backend
    /// rejects. The raw text is never used in its place.
    pub fn process(&self, member: &Member) -> Result<Record> {
        let payload = member.payload();
        let sha1 = hash::digest(payload);
        let (filetype, text) = classify::inspect(payload);

        let mut attributes = member.attributes().clone();
        if self.omit_timestamp {
            attributes.date_time = None;
        }

        let lines = match text {
            Some(text) if member.is_xml() && payload.len() > MIN_XML_LEN => {
                let normalized = self.xml.normalize(text).map_err(|source| Error::MalformedInput {
                    name: member.name().to_string(),
                    source,
                })?;
                split_lines(&normalized)
            }
            Some(text) => split_lines(text),
            None => Vec::new(),
        };

        debug!(
            "{}: {} bytes, {}, {} line(s)",
            member.name(),
            payload.len(),
            filetype,
            lines.len()
        );

        Ok(Record {
            name: member.name().to_string(),
            attributes,
            sha1,
            filetype,
            lines,
        })
    }
}

impl std::fmt::Debug for MemberProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberProcessor")
            .field("omit_timestamp", &self.omit_timestamp)
            .field("xml", &self.xml.kind())
            .finish()
    }
}

/// Split text into lines, accepting `\n`, `\r\n` and `\r` as terminators.
///
/// A terminator at the very end does not start another line.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        match memchr2(b'\r', b'\n', rest.as_bytes()) {
            Some(pos) => {
                lines.push(rest[..pos].to_string());
                let skip = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[pos + skip..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }

    lines
}
