use crate::errors::{NcError, Result};
use crate::model::{Mapping, Node};
use crate::xml::writer::{ATTRIBUTE_PREFIX, TEXT_KEY};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

struct Frame {
    name: String,
    attributes: Vec<(String, String)>,
    children: Mapping,
    text: String,
}

impl Frame {
    fn open(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8(start.local_name().as_ref())?.to_string();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(malformed)?;
            let key = utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value().map_err(malformed)?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            children: Mapping::new(),
            text: String::new(),
        })
    }

    fn close(self) -> (String, Node) {
        let text = self.text.trim().to_string();
        if self.attributes.is_empty() && self.children.is_empty() {
            return (self.name, Node::Scalar(text));
        }
        let mut m = Mapping::new();
        for (k, v) in self.attributes {
            m.insert(format!("{}{}", ATTRIBUTE_PREFIX, k), Node::Scalar(v));
        }
        for (k, v) in self.children {
            m.insert(k, v);
        }
        if !text.is_empty() {
            m.insert(TEXT_KEY, Node::Scalar(text));
        }
        (self.name, Node::Mapping(m))
    }
}

/// Add a child to its parent, turning a repeated tag into a sequence that
/// keeps the position of the first occurrence.
fn attach(parent: &mut Mapping, name: String, node: Node) {
    match parent.entry_mut(&name) {
        Some(Node::Sequence(items)) => items.push(node),
        Some(existing) => {
            let first = std::mem::replace(existing, Node::Sequence(Vec::new()));
            *existing = Node::Sequence(vec![first, node]);
        }
        None => parent.insert(name, node),
    }
}

/// Parse an XML document into a mapping keyed by its root element.
/// Blank input parses to an empty mapping.
///
/// # Errors
///
/// `MalformedReply` when the text is not well-formed XML.
pub fn parse_document(xml: &str) -> Result<Mapping> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut document = Mapping::new();
    let mut stack: Vec<Frame> = Vec::new();

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(start) => stack.push(Frame::open(&start)?),
            Event::Empty(start) => {
                let (name, node) = Frame::open(&start)?.close();
                match stack.last_mut() {
                    Some(parent) => attach(&mut parent.children, name, node),
                    None => attach(&mut document, name, node),
                }
            }
            Event::End(_) => {
                let frame = stack.pop().ok_or_else(|| NcError::MalformedReply {
                    message: "closing tag without matching opening tag".to_string(),
                })?;
                let (name, node) = frame.close();
                match stack.last_mut() {
                    Some(parent) => attach(&mut parent.children, name, node),
                    None => attach(&mut document, name, node),
                }
            }
            Event::Text(text) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(&text.unescape().map_err(malformed)?);
                }
            }
            Event::CData(data) => {
                if let Some(frame) = stack.last_mut() {
                    frame.text.push_str(utf8(&data.into_inner())?);
                }
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(NcError::MalformedReply {
            message: format!("unclosed element <{}>", open.name),
        });
    }

    Ok(document)
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(malformed)
}

fn malformed(err: impl std::fmt::Display) -> NcError {
    NcError::MalformedReply {
        message: err.to_string(),
    }
}
