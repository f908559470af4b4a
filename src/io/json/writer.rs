//! JSON document writer

use crate::document::DocumentNode;
use crate::error::Result;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// JSON document writer
pub struct JsonWriter<'a> {
    document: &'a DocumentNode,
    /// Indent the output
    pub pretty: bool,
}

impl<'a> JsonWriter<'a> {
    /// Create a writer producing compact output
    pub fn new(document: &'a DocumentNode) -> Self {
        Self {
            document,
            pretty: false,
        }
    }

    /// Switch to indented output
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    /// Write to a file
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to_writer(&mut writer)?;
        writer.flush()?;
        info!(path = %path.display(), id = %self.document.id, "wrote document");
        Ok(())
    }

    /// Write to any writer
    pub fn write_to_writer<W: Write>(&self, writer: W) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(writer, self.document)?;
        } else {
            serde_json::to_writer(writer, self.document)?;
        }
        Ok(())
    }

    pub fn write_to_string(&self) -> Result<String> {
        let text = if self.pretty {
            serde_json::to_string_pretty(self.document)?
        } else {
            serde_json::to_string(self.document)?
        };
        Ok(text)
    }

    pub fn document(&self) -> &DocumentNode {
        self.document
    }
}

/// Write a document to a file as indented JSON
pub fn write_json<P: AsRef<Path>>(document: &DocumentNode, path: P) -> Result<()> {
    JsonWriter::new(document).pretty().write_to_file(path)
}
