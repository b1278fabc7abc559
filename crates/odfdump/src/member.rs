//! Archive members as seen by the dump pipeline.

use odfdump_zip::{DosDateTime, ZipEntry};

/// Optional metadata stored for a member.
///
/// `None` means the archive carries no value, in which case no header line
/// is written. Comments and extra fields that are stored but empty count as
/// absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberAttributes {
    pub date_time: Option<DosDateTime>,
    pub comment: Option<String>,
    pub extra: Option<Vec<u8>>,
    /// Uncompressed size as stated by the archive.
    pub file_size: Option<u64>,
    /// CRC-32 as stated by the archive.
    pub crc: Option<u32>,
}

impl MemberAttributes {
    /// Collect the attributes stored in a central directory entry.
    pub fn from_entry(entry: &ZipEntry) -> Self {
        let comment = entry.comment();
        let extra = entry.extra();

        Self {
            date_time: entry.last_modified(),
            comment: (!comment.is_empty()).then(|| String::from_utf8_lossy(comment).into_owned()),
            extra: (!extra.is_empty()).then(|| extra.to_vec()),
            file_size: Some(entry.uncompressed_size()),
            crc: Some(entry.crc32()),
        }
    }
}

/// A member name, its decompressed payload and its stored attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: String,
    payload: Vec<u8>,
    attributes: MemberAttributes,
}

impl Member {
    /// A member with no stored attributes.
    pub fn new(name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            payload,
            attributes: MemberAttributes::default(),
        }
    }

    /// Pair an entry's metadata with its extracted payload.
    pub fn from_entry(entry: &ZipEntry, payload: Vec<u8>) -> Self {
        Self {
            name: entry.name().to_string(),
            payload,
            attributes: MemberAttributes::from_entry(entry),
        }
    }

    pub fn with_attributes(mut self, attributes: MemberAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    #[inline]
    pub fn attributes(&self) -> &MemberAttributes {
        &self.attributes
    }

    /// Members named `*.xml` are normalized when they hold text.
    pub fn is_xml(&self) -> bool {
        self.name.ends_with(".xml")
    }
}
