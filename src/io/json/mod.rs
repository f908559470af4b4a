//! JSON document exchange
//!
//! Documents are exchanged as nested JSON objects: entities grouped per
//! variant and keyed by id, layers keyed by id, partners and components
//! nested recursively.

mod reader;
mod writer;

pub use reader::{JsonReader, JsonReaderConfiguration};
pub use writer::{write_json, JsonWriter};
