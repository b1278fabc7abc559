//! Processed member records.

use crate::classify::Filetype;
use crate::member::MemberAttributes;

/// Everything that is dumped for one member.
///
/// `lines` is empty unless `filetype` is [`Filetype::Utf8`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    /// Attributes to render, after timestamp suppression.
    pub attributes: MemberAttributes,
    /// SHA-1 of the raw payload, in lowercase hex.
    pub sha1: String,
    pub filetype: Filetype,
    /// Content lines without terminators.
    pub lines: Vec<String>,
}
