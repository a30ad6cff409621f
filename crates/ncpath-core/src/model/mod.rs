pub mod datastore;
pub mod node;
pub mod path;

pub use datastore::{Datastore, DefaultOperation, ReadMode};
pub use node::{Mapping, Node};
pub use path::{Path, PathSegment, Predicate};
