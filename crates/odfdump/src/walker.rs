//! Archive traversal.

use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use odfdump_zip::{ZipArchive, ZipEntry};

use crate::config::{DumpConfig, ErrorPolicy};
use crate::error::{Error, Result};
use crate::format;
use crate::member::Member;
use crate::processor::MemberProcessor;
use crate::record::Record;

/// Drives the member processor over an archive in central directory order.
#[derive(Debug)]
pub struct ArchiveWalker {
    archive: ZipArchive,
    processor: MemberProcessor,
    policy: ErrorPolicy,
}

impl ArchiveWalker {
    /// Open an archive on disk.
    pub fn open<P: AsRef<Path>>(path: P, config: &DumpConfig) -> Result<Self> {
        let path = path.as_ref();
        let archive = ZipArchive::open(path).map_err(|source| Error::ArchiveOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_archive(archive, config))
    }

    /// Walk an archive that is already open.
    pub fn from_archive(archive: ZipArchive, config: &DumpConfig) -> Self {
        let processor = MemberProcessor::new(config);
        debug!(
            "{}: {} members, XML backend {}",
            archive.name(),
            archive.entry_count(),
            processor.xml_backend()
        );

        Self {
            archive,
            processor,
            policy: config.on_member_error,
        }
    }

    #[inline]
    pub fn archive(&self) -> &ZipArchive {
        &self.archive
    }

    /// Number of members in the archive.
    #[inline]
    pub fn len(&self) -> usize {
        self.archive.entry_count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Lazily process every member, in archive order.
    ///
    /// Each member is extracted only when its record is requested.
    pub fn records(&self) -> Records<'_> {
        Records {
            walker: self,
            entries: self.archive.iter(),
        }
    }

    /// Write the records of every member to `out`.
    ///
    /// Member failures either stop the dump or are skipped, depending on the
    /// configured [`ErrorPolicy`]. Records written before a failure stay
    /// written.
    pub fn dump<W: Write>(&self, out: &mut W) -> Result<DumpSummary> {
        let mut summary = DumpSummary::default();

        for record in self.records() {
            match record {
                Ok(record) => {
                    format::write_record(out, &record)?;
                    summary.dumped += 1;
                }
                Err(err) if self.policy == ErrorPolicy::Continue && err.is_member_error() => {
                    warn!("{err}; skipping member");
                    summary.failed.push(err.member_name().unwrap_or_default().to_string());
                }
                Err(err) => return Err(err),
            }
        }

        out.flush()?;
        Ok(summary)
    }

    fn process_entry(&self, entry: &ZipEntry) -> Result<Record> {
        let payload = self.archive.read(entry).map_err(|source| Error::MemberRead {
            name: entry.name().to_string(),
            source,
        })?;
        self.processor.process(&Member::from_entry(entry, payload))
    }
}

/// Iterator over the records of an archive. See [`ArchiveWalker::records`].
#[derive(Debug)]
pub struct Records<'a> {
    walker: &'a ArchiveWalker,
    entries: std::slice::Iter<'a, ZipEntry>,
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        Some(self.walker.process_entry(entry))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for Records<'_> {}

/// Outcome of [`ArchiveWalker::dump`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    /// Members whose records were written.
    pub dumped: usize,
    /// Names of members skipped after a failure.
    pub failed: Vec<String>,
}

impl DumpSummary {
    /// True when no member was skipped.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}
