pub mod config;
pub mod document;
pub mod path;
pub mod value;

pub use config::{Config, SourceFormat};
pub use document::Document;
pub use path::{normalize, resolve, LookupError, ParsedPath};
pub use value::{Node, NodeMap, NodeType};
