//! XML ⇄ `Node` marshalling
//!
//! The reader follows the usual attribute/text conventions for mapping XML
//! onto nested maps: attributes become `@name` entries, text next to
//! attributes or child elements becomes `#text`, repeated sibling tags
//! collapse into a sequence and an empty element is an empty scalar.

pub mod reader;
pub mod writer;

pub use reader::parse_document;
pub use writer::{write_fragment, ATTRIBUTE_PREFIX, TEXT_KEY};
