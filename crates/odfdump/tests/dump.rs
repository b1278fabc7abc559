//! End-to-end dumps of archives written to disk.

use std::io::Write;
use std::path::{Path, PathBuf};

use odfdump::common::crc;
use odfdump::prelude::*;
use odfdump::Error;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const MIMETYPE: &str = "application/vnd.oasis.opendocument.text";

const CONTENT_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?><office:document-content xmlns:office="urn:oasis:names:tc:opendocument:xmlns:office:1.0" xmlns:text="urn:oasis:names:tc:opendocument:xmlns:text:1.0"><office:body><office:text><text:p>Hello</text:p><text:p>World</text:p></office:text></office:body></office:document-content>"#;

struct Fixture {
    _dir: TempDir,
    path: PathBuf,
}

fn write_archive(members: &[(&str, &[u8], CompressionMethod)]) -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("document.odt");

    let file = std::fs::File::create(&path).unwrap();
    let mut writer = ZipWriter::new(file);
    for (name, data, method) in members {
        let options = SimpleFileOptions::default().compression_method(*method);
        writer.start_file(*name, options).unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap();

    Fixture { _dir: dir, path }
}

fn odt(content_xml: &[u8]) -> Fixture {
    let mut png = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR".to_vec();
    png.extend_from_slice(&[0u8; 64]);

    write_archive(&[
        ("mimetype", MIMETYPE.as_bytes(), CompressionMethod::Stored),
        ("content.xml", content_xml, CompressionMethod::Deflated),
        ("Thumbnails/thumbnail.png", &png, CompressionMethod::Deflated),
        ("META-INF/manifest.xml", br#"<manifest:manifest xmlns:manifest="urn:m"><manifest:file-entry manifest:full-path="/"/></manifest:manifest>"#, CompressionMethod::Zstd),
    ])
}

fn dump(path: &Path, config: &DumpConfig) -> (odfdump::Result<DumpSummary>, String) {
    let mut out = Vec::new();
    let result = ArchiveWalker::open(path, config).and_then(|walker| walker.dump(&mut out));
    (result, String::from_utf8(out).unwrap())
}

fn member_lines<'a>(text: &'a str, name: &str) -> Vec<&'a str> {
    let prefix = format!("{name}:: ");
    text.lines().filter(|l| l.starts_with(&prefix)).collect()
}

#[test]
fn test_mimetype_member() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let config = DumpConfig::default().with_omit_timestamp(true);
    let (result, text) = dump(&fixture.path, &config);
    assert!(result.unwrap().is_complete());

    let crc = crc::hash_bytes(MIMETYPE.as_bytes());
    let sha1 = odfdump::digest(MIMETYPE.as_bytes());
    assert_eq!(
        member_lines(&text, "mimetype"),
        [
            format!("mimetype:: file_size: {}", MIMETYPE.len()),
            format!("mimetype:: CRC: {crc}"),
            format!("mimetype:: sha1: {sha1}"),
            "mimetype:: filetype: utf-8".to_string(),
            format!("mimetype:: {MIMETYPE}"),
        ]
    );
}

#[test]
fn test_thumbnail_is_binary() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let (_, text) = dump(&fixture.path, &DumpConfig::default().with_omit_timestamp(true));

    let lines = member_lines(&text, "Thumbnails/thumbnail.png");
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("Thumbnails/thumbnail.png:: file_size: "));
    assert!(lines[2].starts_with("Thumbnails/thumbnail.png:: sha1: "));
    assert_eq!(lines[3], "Thumbnails/thumbnail.png:: filetype: binary");
}

#[test]
fn test_dense_xml_is_split_across_lines() {
    let fixture = odt(CONTENT_XML.as_bytes());

    for kind in [XmlBackendKind::detect(), XmlBackendKind::Tree] {
        let config = DumpConfig::default().with_xml_backend(kind);
        let (result, text) = dump(&fixture.path, &config);
        assert!(result.unwrap().is_complete(), "{kind}");

        let content: Vec<_> = member_lines(&text, "content.xml")
            .into_iter()
            .filter(|l| !l.contains(":: date_time: ") && !l.contains(":: file_size: "))
            .skip_while(|l| !l.ends_with("filetype: utf-8"))
            .skip(1)
            .collect();
        assert!(content.len() > 5, "{kind}: {content:?}");
        assert!(content.iter().any(|l| l.trim_end().ends_with("<text:p>Hello</text:p>")));
        assert!(content.iter().any(|l| l.trim_end().ends_with("<text:p>World</text:p>")));
    }
}

#[test]
fn test_zstd_member_is_dumped() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let (result, text) = dump(&fixture.path, &DumpConfig::default());
    assert!(result.unwrap().is_complete());
    assert!(member_lines(&text, "META-INF/manifest.xml")
        .iter()
        .any(|l| l.contains("<manifest:file-entry manifest:full-path=\"/\"/>")));
}

#[test]
fn test_malformed_xml_aborts() {
    let fixture = odt(b"<office:document-content><office:body></office:document-content>");
    let (result, text) = dump(&fixture.path, &DumpConfig::default());

    match result {
        Err(Error::MalformedInput { name, .. }) => assert_eq!(name, "content.xml"),
        other => panic!("expected MalformedInput, got {other:?}"),
    }
    // Members before the failure were already written; nothing after it.
    assert!(!member_lines(&text, "mimetype").is_empty());
    assert!(member_lines(&text, "content.xml").is_empty());
    assert!(member_lines(&text, "Thumbnails/thumbnail.png").is_empty());
}

#[test]
fn test_malformed_xml_skipped_with_continue() {
    let fixture = odt(b"<office:document-content><office:body></office:document-content>");
    let config = DumpConfig::default().with_error_policy(ErrorPolicy::Continue);
    let (result, text) = dump(&fixture.path, &config);

    let summary = result.unwrap();
    assert_eq!(summary.failed, ["content.xml"]);
    assert_eq!(summary.dumped, 3);
    assert!(member_lines(&text, "content.xml").is_empty());
    assert!(!member_lines(&text, "META-INF/manifest.xml").is_empty());
}

#[test]
fn test_no_date_only_drops_date_lines() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let (_, with_date) = dump(&fixture.path, &DumpConfig::default());
    let (_, without_date) = dump(&fixture.path, &DumpConfig::default().with_omit_timestamp(true));

    let date_lines = with_date.lines().filter(|l| l.contains(":: date_time: ")).count();
    assert_eq!(date_lines, 4);
    assert!(!without_date.contains(":: date_time: "));

    let filtered: Vec<_> = with_date.lines().filter(|l| !l.contains(":: date_time: ")).collect();
    assert_eq!(filtered, without_date.lines().collect::<Vec<_>>());
}

#[test]
fn test_missing_comment_and_extra_are_omitted() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let (_, text) = dump(&fixture.path, &DumpConfig::default());
    assert!(!text.contains(":: comment: "));
    assert!(!text.contains(":: extra: "));
}

#[test]
fn test_dump_is_idempotent() {
    let fixture = odt(CONTENT_XML.as_bytes());
    let config = DumpConfig::default();
    let (_, first) = dump(&fixture.path, &config);
    let (_, second) = dump(&fixture.path, &config);
    assert_eq!(first, second);
}

#[test]
fn test_not_an_archive() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.odt");
    std::fs::write(&path, b"PK but not really").unwrap();

    let (result, text) = dump(&path, &DumpConfig::default());
    assert!(matches!(result, Err(Error::ArchiveOpen { .. })));
    assert!(text.is_empty());
}
