//! Dump configuration.

use odfdump_xml::XmlBackendKind;

/// What to do when a single member cannot be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first failing member. Records already written stay written.
    #[default]
    Abort,
    /// Log the failure, emit nothing for that member and carry on.
    Continue,
}

/// Process-wide settings, fixed before the first member is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpConfig {
    /// Leave out the `date_time` header of every member.
    pub omit_timestamp: bool,
    /// Backend used to normalize `.xml` members.
    pub xml_backend: XmlBackendKind,
    /// Per-member failure handling.
    pub on_member_error: ErrorPolicy,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            omit_timestamp: false,
            xml_backend: XmlBackendKind::detect(),
            on_member_error: ErrorPolicy::default(),
        }
    }
}

impl DumpConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_omit_timestamp(mut self, omit: bool) -> Self {
        self.omit_timestamp = omit;
        self
    }

    pub fn with_xml_backend(mut self, kind: XmlBackendKind) -> Self {
        self.xml_backend = kind;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_member_error = policy;
        self
    }
}
