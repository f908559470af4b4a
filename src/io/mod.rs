//! I/O module for reading and writing documents

pub mod json;

pub use json::{write_json, JsonReader, JsonReaderConfiguration, JsonWriter};
