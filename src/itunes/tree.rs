//! Minimal XML element tree
//!
//! iTunes plists are positional (a `<key>` is paired with whatever element
//! follows it), so the reader needs sibling order, which is awkward to track
//! with a flat event loop. This builds a small in-memory tree instead.

use crate::error::ParseError;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::borrow::Cow;
use std::io::BufRead;

/// An XML element with its leading text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,

    /// Text before the first child element, if any
    pub text: Option<String>,

    pub children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Self {
            name,
            text: None,
            children: Vec::new(),
        }
    }

    /// Element text, or an empty string when the element has none
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }

    /// Immediate children with the given tag name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn first_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    fn push_text(&mut self, text: &str) {
        // Text after a child element belongs to that child's tail, which nothing reads
        if self.children.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(text);
        }
    }
}

/// Parse a complete XML document into its root element
///
/// Text is kept verbatim apart from line endings, which are normalized to
/// `\n` as an XML 1.0 processor would. Declarations, doctypes, comments and
/// processing instructions are skipped.
pub fn parse_document<R: BufRead>(source: R) -> Result<Element, ParseError> {
    let mut reader = Reader::from_reader(source);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        let position = reader.buffer_position() as u64;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|source| ParseError::Xml {
                position: reader.buffer_position() as u64,
                source,
            })?;

        match event {
            Event::Start(e) => {
                if root.is_some() {
                    return Err(ParseError::OutsideRoot { position });
                }
                stack.push(Element::new(element_name(e.name().as_ref())?));
            }

            Event::Empty(e) => {
                if root.is_some() {
                    return Err(ParseError::OutsideRoot { position });
                }
                let element = Element::new(element_name(e.name().as_ref())?);
                attach(&mut stack, &mut root, element);
            }

            // quick-xml rejects mismatched and unmatched end tags itself
            Event::End(_) => {
                if let Some(element) = stack.pop() {
                    attach(&mut stack, &mut root, element);
                }
            }

            Event::Text(e) => {
                let text = e
                    .unescape()
                    .map_err(|e| ParseError::Xml {
                        position,
                        source: e.into(),
                    })?;
                push_text(&mut stack, &text, position)?;
            }

            Event::CData(e) => {
                let text = std::str::from_utf8(&e)?;
                push_text(&mut stack, text, position)?;
            }

            Event::Eof => break,

            _ => {}
        }

        buf.clear();
    }

    if let Some(open) = stack.pop() {
        return Err(ParseError::UnexpectedEof { open: open.name });
    }

    root.ok_or(ParseError::NoRootElement)
}

fn element_name(raw: &[u8]) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(raw)?.to_owned())
}

/// Attach a finished element to its parent, or make it the root
fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), ParseError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.push_text(&normalize_newlines(text));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::OutsideRoot { position }),
    }
}

/// `\r\n` and lone `\r` become `\n`
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}
