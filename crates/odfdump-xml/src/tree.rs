//! Document-tree backend.
//!
//! The whole input is parsed into a [`Document`] before anything is written,
//! so a document is either normalized completely or rejected.

use std::io::Write;

use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesPI, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use crate::{is_blank, is_indentation, Error, Result, XmlBackend, XmlBackendKind, INDENT};

/// Parses into a document tree and serializes it back with indentation.
///
/// Text is unescaped on the way in and escaped again on the way out, so
/// character references come out in one canonical form. Unknown entities,
/// stray text and extra top-level elements are errors.
///
/// Line-breaking whitespace between the children of an element-only element
/// is replaced by indentation. Any element with non-blank text keeps all of
/// its text exactly.
#[derive(Debug, Clone)]
pub struct TreeBackend {
    indent: usize,
}

impl TreeBackend {
    pub fn new() -> Self {
        Self { indent: INDENT }
    }
}

impl Default for TreeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlBackend for TreeBackend {
    fn kind(&self) -> XmlBackendKind {
        XmlBackendKind::Tree
    }

    fn normalize(&self, xml: &str) -> Result<String> {
        let document = Document::parse(xml)?;

        let mut writer = Writer::new_with_indent(Vec::with_capacity(xml.len() * 5 / 4), b' ', self.indent);
        document.write(&mut writer)?;

        String::from_utf8(writer.into_inner()).map_err(Error::write)
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    Element(Element),
    /// Unescaped character data.
    Text(String),
    CData(String),
    Comment(String),
    /// Target and content of a processing instruction.
    ProcessingInstruction(String),
}

#[derive(Debug, Clone, PartialEq)]
struct Element {
    name: String,
    /// Unescaped attribute values, in document order.
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let name = utf8(start.name().as_ref(), position)?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| Error::malformed(position, e))?;
            let key = utf8(attr.key.as_ref(), position)?.to_string();
            let value = attr
                .unescape_value()
                .map_err(|e| Error::malformed(position, e))?
                .into_owned();
            attributes.push((key, value));
        }

        Ok(Self {
            name,
            attributes,
            children: Vec::new(),
        })
    }

    /// Drop indentation text unless some child text is real content.
    fn strip_indentation(&mut self) {
        let mixed = self
            .children
            .iter()
            .any(|child| matches!(child, Node::Text(text) if !is_blank(text.as_bytes())));
        if !mixed {
            self.children
                .retain(|child| !matches!(child, Node::Text(text) if is_indentation(text.as_bytes())));
        }
    }
}

/// A parsed XML document with exactly one root element.
#[derive(Debug, Clone, PartialEq)]
struct Document {
    doctype: Option<String>,
    /// Comments and processing instructions before the root.
    prolog: Vec<Node>,
    root: Element,
    /// Comments and processing instructions after the root.
    epilog: Vec<Node>,
}

impl Document {
    fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        let config = reader.config_mut();
        config.check_end_names = true;
        config.check_comments = true;

        let mut doctype = None;
        let mut prolog = Vec::new();
        let mut epilog = Vec::new();
        let mut root: Option<Element> = None;
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader.read_event().map_err(|e| Error::malformed(position, e))?;

            // Nodes that are not elements go to the open element, or around the root.
            let node = match event {
                Event::Start(e) => {
                    if root.is_some() && stack.is_empty() {
                        return Err(Error::MultipleRoots);
                    }
                    stack.push(Element::from_start(&e, position)?);
                    continue;
                }
                Event::Empty(e) => Node::Element(Element::from_start(&e, position)?),
                Event::End(_) => match stack.pop() {
                    Some(mut element) => {
                        element.strip_indentation();
                        Node::Element(element)
                    }
                    None => return Err(Error::malformed(position, "unmatched end tag")),
                },
                Event::Text(e) => {
                    if stack.is_empty() {
                        if is_blank(&e) {
                            continue;
                        }
                        return Err(Error::TextOutsideRoot);
                    }
                    let text = e.unescape().map_err(|e| Error::malformed(position, e))?;
                    Node::Text(text.into_owned())
                }
                Event::CData(e) => {
                    if stack.is_empty() {
                        return Err(Error::TextOutsideRoot);
                    }
                    Node::CData(utf8(&e, position)?.to_string())
                }
                Event::Comment(e) => Node::Comment(utf8(&e, position)?.to_string()),
                Event::PI(e) => Node::ProcessingInstruction(utf8(&e, position)?.to_string()),
                Event::DocType(e) => {
                    doctype = Some(utf8(&e, position)?.trim().to_string());
                    continue;
                }
                // A fresh declaration is always written.
                Event::Decl(_) => continue,
                Event::Eof => break,
            };

            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
                continue;
            }

            match node {
                Node::Element(element) => {
                    if root.is_some() {
                        return Err(Error::MultipleRoots);
                    }
                    root = Some(element);
                }
                other if root.is_none() => prolog.push(other),
                other => epilog.push(other),
            }
        }

        if !stack.is_empty() {
            return Err(Error::Unclosed { depth: stack.len() });
        }
        let root = root.ok_or(Error::NoRootElement)?;

        Ok(Self {
            doctype,
            prolog,
            root,
            epilog,
        })
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(Error::write)?;

        if let Some(doctype) = &self.doctype {
            writer
                .write_event(Event::DocType(BytesText::from_escaped(doctype.as_str())))
                .map_err(Error::write)?;
        }

        for node in &self.prolog {
            write_node(writer, node)?;
        }
        write_element(writer, &self.root)?;
        for node in &self.epilog {
            write_node(writer, node)?;
        }

        Ok(())
    }
}

fn write_node<W: Write>(writer: &mut Writer<W>, node: &Node) -> Result<()> {
    let event = match node {
        Node::Element(element) => return write_element(writer, element),
        Node::Text(text) => Event::Text(BytesText::new(text)),
        Node::CData(data) => Event::CData(BytesCData::new(data.as_str())),
        Node::Comment(comment) => Event::Comment(BytesText::from_escaped(comment.as_str())),
        Node::ProcessingInstruction(pi) => Event::PI(BytesPI::new(pi.as_str())),
    };
    writer.write_event(event).map_err(Error::write)
}

/// Write a single element and its children.
fn write_element<W: Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(Error::write);
    }

    writer.write_event(Event::Start(start)).map_err(Error::write)?;
    for child in &element.children {
        write_node(writer, child)?;
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(Error::write)
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| Error::malformed(position, e))
}
