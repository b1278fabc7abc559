//! Single-pass re-indenting backend.

use quick_xml::events::Event;
use quick_xml::{Reader, Writer};

use crate::{is_blank, is_indentation, Error, Result, XmlBackend, XmlBackendKind, INDENT};

/// Re-emits parser events through an indenting writer.
///
/// Start and end tags must still pair up, but text is copied verbatim:
/// entity references are not resolved and several top-level elements are
/// tolerated.
///
/// Line-breaking whitespace is dropped in favour of the writer's indentation
/// until an element shows non-blank text. From then on every text chunk in
/// that element is kept as written.
#[derive(Debug, Clone)]
pub struct StreamingBackend {
    indent: usize,
}

impl StreamingBackend {
    pub fn new() -> Self {
        Self { indent: INDENT }
    }
}

impl Default for StreamingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBackend for StreamingBackend {
    fn kind(&self) -> XmlBackendKind {
        XmlBackendKind::Streaming
    }

    fn normalize(&self, xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().check_end_names = true;

        let mut writer = Writer::new_with_indent(Vec::with_capacity(xml.len() * 5 / 4), b' ', self.indent);

        // One flag per open element: has it shown non-blank text yet?
        let mut mixed: Vec<bool> = Vec::new();
        let mut seen_element = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| Error::malformed(reader.buffer_position() as u64, e))?;

            match event {
                Event::Start(_) => {
                    mixed.push(false);
                    seen_element = true;
                }
                Event::End(_) => {
                    mixed.pop();
                }
                Event::Empty(_) => seen_element = true,
                Event::Text(ref text) => match mixed.last_mut() {
                    None if is_blank(text) => continue,
                    Some(false) if is_indentation(text) => continue,
                    Some(flag) if !is_blank(text) => *flag = true,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }

            writer.write_event(event).map_err(Error::write)?;
        }

        if !mixed.is_empty() {
            return Err(Error::Unclosed { depth: mixed.len() });
        }
        if !seen_element {
            return Err(Error::NoRootElement);
        }

        String::from_utf8(writer.into_inner()).map_err(Error::write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(xml: &str) -> Result<String> {
        StreamingBackend::new().normalize(xml)
    }

    #[test]
    fn test_indents_nested_elements() {
        let out = normalize("<a><b/><c>t</c></a>").unwrap();
        assert_eq!(out, "<a>\n  <b/>\n  <c>t</c>\n</a>");
    }

    #[test]
    fn test_keeps_declaration() {
        let out = normalize(r#"<?xml version="1.0" encoding="UTF-8"?><a><b/></a>"#).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        assert_eq!(lines[1], "<a>");
    }

    #[test]
    fn test_replaces_existing_whitespace() {
        let compact = normalize("<a><b/></a>").unwrap();
        let loose = normalize("<a>\n\n      <b/>\n   </a>\n").unwrap();
        assert_eq!(compact, loose);
    }

    #[test]
    fn test_inline_space_stays_on_one_line() {
        let out = normalize("<p><s>a</s> <s>b</s></p>").unwrap();
        assert_eq!(out, "<p>\n  <s>a</s> <s>b</s>\n</p>");
    }

    #[test]
    fn test_space_only_element_is_kept() {
        let out = normalize("<r><p> </p><p/></r>").unwrap();
        assert_eq!(out, "<r>\n  <p> </p>\n  <p/>\n</r>");
    }

    #[test]
    fn test_mixed_element_keeps_later_line_breaks() {
        let out = normalize("<p>one\n<s>a</s>\n</p>").unwrap();
        assert_eq!(out, "<p>one\n<s>a</s>\n</p>");
    }

    #[test]
    fn test_text_passes_through_unresolved() {
        // Entities the parser does not know are left alone.
        let out = normalize("<p>caf&eacute; &amp; more</p>").unwrap();
        assert_eq!(out, "<p>caf&eacute; &amp; more</p>");
    }

    #[test]
    fn test_tolerates_several_top_level_elements() {
        let out = normalize("<a/><b/>").unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_mismatched_end_tag() {
        assert!(matches!(normalize("<a><b></a>"), Err(Error::Malformed { .. })));
    }

    #[test]
    fn test_unclosed_element() {
        assert!(normalize("<a><b>text").is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(normalize(""), Err(Error::NoRootElement)));
        assert!(matches!(normalize("   \n"), Err(Error::NoRootElement)));
    }

    #[test]
    fn test_is_deterministic() {
        let xml = r#"<r x="1"><s y="2"><t/></s><!-- note --><u>v</u></r>"#;
        assert_eq!(normalize(xml).unwrap(), normalize(xml).unwrap());
    }
}
