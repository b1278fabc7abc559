//! odfdump CLI - dump OpenDocument files and other zip archives as text.
//!
//! The dump goes to stdout. Diagnostics go to stderr through `env_logger`;
//! set `RUST_LOG=debug` to see per-member progress.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::builder::FalseyValueParser;
use clap::{Parser, ValueEnum};
use log::debug;

use odfdump::prelude::*;

/// odfdump - dump OpenDocument files and other zip archives as diff-friendly text
#[derive(Parser)]
#[command(name = "odfdump")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Archive to dump (.odt, .ods, .odp, or any zip file)
    archive: PathBuf,

    /// Do not dump the date of each archive member
    #[arg(short = 'D', long = "no-date", alias = "no-dump-date")]
    no_date: bool,

    /// XML backend used to pretty-print .xml members
    #[arg(long, value_enum, default_value_t = BackendChoice::Auto, env = "ODFDUMP_XML_BACKEND")]
    xml_backend: BackendChoice,

    /// Skip members that cannot be dumped instead of stopping at the first one
    #[arg(long, env = "ODFDUMP_KEEP_GOING", value_parser = FalseyValueParser::new())]
    keep_going: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BackendChoice {
    /// Fastest backend compiled in
    Auto,
    /// Single-pass re-indenter
    Streaming,
    /// Strict document-tree re-serializer
    Tree,
}

impl BackendChoice {
    fn resolve(self) -> XmlBackendKind {
        match self {
            Self::Auto => XmlBackendKind::detect(),
            Self::Streaming => XmlBackendKind::Streaming,
            Self::Tree => XmlBackendKind::Tree,
        }
    }
}

impl Cli {
    fn config(&self) -> DumpConfig {
        let policy = if self.keep_going {
            ErrorPolicy::Continue
        } else {
            ErrorPolicy::Abort
        };

        DumpConfig::new()
            .with_omit_timestamp(self.no_date)
            .with_xml_backend(self.xml_backend.resolve())
            .with_error_policy(policy)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.config();

    let walker = ArchiveWalker::open(&cli.archive, &config)
        .with_context(|| format!("Failed to open archive {}", cli.archive.display()))?;

    let mut out = BufWriter::new(io::stdout().lock());
    let summary = walker.dump(&mut out).context("Failed to dump archive")?;
    out.flush().context("Failed to write output")?;

    debug!("dumped {} of {} members", summary.dumped, walker.len());

    if !summary.is_complete() {
        bail!(
            "{} of {} members could not be dumped: {}",
            summary.failed.len(),
            walker.len(),
            summary.failed.join(", ")
        );
    }

    Ok(())
}
