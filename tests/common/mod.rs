//! Shared test utilities for panelcad integration tests.
//!
//! Path resolution, JSON read helpers and entity counting, imported by every
//! test crate via `mod common;`.

#![allow(dead_code)]

pub mod builders;
pub mod comparison;

use panelcad::io::json::{JsonReader, JsonReaderConfiguration, JsonWriter};
use panelcad::{DocumentNode, EntityKind};
use std::collections::BTreeMap;
use std::path::PathBuf;

// ===========================================================================
// Paths
// ===========================================================================

/// Resolve path into the `test_output/` directory, creating it if needed.
pub fn test_output_path(filename: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    let _ = std::fs::create_dir_all(&dir);
    dir.join(filename)
}

// ===========================================================================
// Read helpers
// ===========================================================================

/// Read JSON text in strict mode.
pub fn read_json(text: &str) -> DocumentNode {
    JsonReader::from_str(text)
        .unwrap_or_else(|e| panic!("Cannot parse JSON: {e:?}"))
        .read()
        .unwrap_or_else(|e| panic!("Failed to read document: {e:?}"))
}

/// Read JSON text in failsafe mode.
pub fn read_json_failsafe(text: &str) -> DocumentNode {
    JsonReader::from_str(text)
        .unwrap_or_else(|e| panic!("Cannot parse JSON: {e:?}"))
        .with_configuration(JsonReaderConfiguration {
            failsafe: true,
            ..Default::default()
        })
        .read()
        .unwrap_or_else(|e| panic!("Failed to read document: {e:?}"))
}

/// Write then read back a document.
pub fn roundtrip(doc: &DocumentNode) -> DocumentNode {
    let text = JsonWriter::new(doc)
        .write_to_string()
        .unwrap_or_else(|e| panic!("Failed to write document: {e:?}"));
    read_json(&text)
}

// ===========================================================================
// Entity utilities
// ===========================================================================

/// Sorted frequency map of entity kinds over the whole subtree.
pub fn entity_kind_histogram(doc: &DocumentNode) -> BTreeMap<&'static str, usize> {
    let mut map = BTreeMap::new();
    for e in doc.get_all_entities().iter() {
        *map.entry(e.kind().as_str()).or_insert(0) += 1;
    }
    map
}

/// Count entities of one kind over the whole subtree.
pub fn count_of_kind(doc: &DocumentNode, kind: EntityKind) -> usize {
    doc.get_all_entities().of_kind(kind).count()
}
