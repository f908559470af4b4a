//! JSON document reader

use crate::document::DocumentNode;
use crate::entities::{EntityKind, EntityType};
use crate::error::{DrawingError, Result};
use crate::notification::{NotificationCollection, NotificationType};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{debug, info};

/// Configuration for the JSON reader.
#[derive(Debug, Clone, Default)]
pub struct JsonReaderConfiguration {
    /// Regenerate every id in the document after reading.
    pub reset_ids: bool,
    /// When `true`, unknown entity buckets and entities that fail to parse
    /// are dropped and reported as notifications instead of aborting the
    /// read.
    ///
    /// Default: `false` (strict mode).
    pub failsafe: bool,
}

/// JSON document reader
pub struct JsonReader {
    value: Value,
    config: JsonReaderConfiguration,
}

impl JsonReader {
    /// Create a reader over any byte source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let value = serde_json::from_reader(reader)?;
        Ok(Self {
            value,
            config: JsonReaderConfiguration::default(),
        })
    }

    /// Create a reader from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a reader over JSON text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(text: &str) -> Result<Self> {
        let value = serde_json::from_str(text)?;
        Ok(Self {
            value,
            config: JsonReaderConfiguration::default(),
        })
    }

    /// Set the reader configuration.
    pub fn with_configuration(mut self, config: JsonReaderConfiguration) -> Self {
        self.config = config;
        self
    }

    /// Read the document
    pub fn read(self) -> Result<DocumentNode> {
        self.read_with_notifications().map(|(document, _)| document)
    }

    /// Read the document along with the notifications raised in failsafe mode
    pub fn read_with_notifications(self) -> Result<(DocumentNode, NotificationCollection)> {
        let mut notifications = NotificationCollection::new();
        let mut value = self.value;
        let mut sanitizer = Sanitizer {
            failsafe: self.config.failsafe,
            notifications: &mut notifications,
        };
        sanitizer.node(&mut value, "")?;

        let mut document: DocumentNode = serde_json::from_value(value)?;
        if self.config.reset_ids {
            document.reset_ids();
        }
        document.refresh_base_lines();

        info!(
            id = %document.id,
            entities = document.get_all_entities().len(),
            partners = document.partners.len(),
            components = document.components.data.len(),
            notifications = notifications.len(),
            "read document"
        );
        Ok((document, notifications))
    }
}

/// Pre-pass over the raw value tree checking entity buckets and entities
/// before they reach the typed deserializer
struct Sanitizer<'a> {
    failsafe: bool,
    notifications: &'a mut NotificationCollection,
}

impl Sanitizer<'_> {
    fn node(&mut self, value: &mut Value, path: &str) -> Result<()> {
        let node = value.as_object_mut().ok_or_else(|| {
            DrawingError::InvalidData(format!("document at `{}` is not an object", display(path)))
        })?;

        if let Some(entities) = node.get_mut("entities").and_then(Value::as_object_mut) {
            self.entities(entities, &join(path, "entities"))?;
        }
        if let Some(partners) = node.get_mut("partners").and_then(Value::as_array_mut) {
            for (i, partner) in partners.iter_mut().enumerate() {
                self.node(partner, &format!("{}[{i}]", join(path, "partners")))?;
            }
        }
        if let Some(data) = node
            .get_mut("components")
            .and_then(|c| c.get_mut("data"))
            .and_then(Value::as_array_mut)
        {
            for (i, component) in data.iter_mut().enumerate() {
                self.node(component, &format!("{}[{i}]", join(path, "components.data")))?;
            }
        }
        Ok(())
    }

    fn entities(&mut self, buckets: &mut Map<String, Value>, path: &str) -> Result<()> {
        let names: Vec<String> = buckets.keys().cloned().collect();
        for name in names {
            let bucket_path = join(path, &name);
            if name.parse::<EntityKind>().is_err() {
                self.reject(
                    NotificationType::NotSupported,
                    &bucket_path,
                    DrawingError::InvalidEntityType(name.clone()),
                )?;
                buckets.remove(&name);
                continue;
            }
            let Some(bucket) = buckets.get_mut(&name).and_then(Value::as_object_mut) else {
                continue;
            };
            let ids: Vec<String> = bucket.keys().cloned().collect();
            for id in ids {
                let entity_path = join(&bucket_path, &id);
                let keep = match bucket.get_mut(&id) {
                    Some(entity) => {
                        self.entity_key(entity, &id, &entity_path);
                        self.entity(entity, &name, &entity_path)?
                    }
                    None => continue,
                };
                if !keep {
                    bucket.remove(&id);
                }
            }
        }
        Ok(())
    }

    /// The bucket key is the entity id; a differing `id` field is overwritten
    fn entity_key(&mut self, value: &mut Value, key: &str, path: &str) {
        let Some(entity) = value.as_object_mut() else {
            return;
        };
        let stated = entity.get("id").and_then(Value::as_str).unwrap_or_default();
        if !stated.is_empty() && stated != key {
            debug!(path, stated, key, "entity id replaced by its key");
            if self.failsafe {
                self.notifications.notify(
                    NotificationType::Warning,
                    path,
                    format!("entity id `{stated}` differs from its key `{key}`"),
                );
            }
        }
        entity.insert("id".to_string(), Value::String(key.to_string()));
    }

    /// Check one entity and its children; `Ok(false)` drops it
    fn entity(&mut self, value: &mut Value, bucket: &str, path: &str) -> Result<bool> {
        let Some(entity) = value.as_object_mut() else {
            self.reject(
                NotificationType::Error,
                path,
                DrawingError::InvalidData(format!("entity at `{path}` is not an object")),
            )?;
            return Ok(false);
        };

        let tag = entity
            .entry("type")
            .or_insert_with(|| Value::String(bucket.to_string()));
        let tag = tag.as_str().unwrap_or_default().to_string();
        if tag.parse::<EntityKind>().is_err() {
            self.reject(
                NotificationType::NotSupported,
                path,
                DrawingError::InvalidEntityType(tag),
            )?;
            return Ok(false);
        }
        if tag != bucket {
            self.reject(
                NotificationType::Error,
                path,
                DrawingError::InvalidData(format!("`{tag}` entity stored in bucket `{bucket}`")),
            )?;
            return Ok(false);
        }

        if let Some(children) = entity.get_mut("children").and_then(Value::as_array_mut) {
            let mut kept = Vec::with_capacity(children.len());
            for (i, mut child) in std::mem::take(children).into_iter().enumerate() {
                let child_tag = child
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                if self.entity(&mut child, &child_tag, &format!("{path}.children[{i}]"))? {
                    kept.push(child);
                }
            }
            *children = kept;
        }

        if self.failsafe {
            if let Err(error) = EntityType::from_value(value.clone()) {
                self.reject(NotificationType::Error, path, error)?;
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Fail in strict mode, record and continue in failsafe mode
    fn reject(&mut self, kind: NotificationType, path: &str, error: DrawingError) -> Result<()> {
        if !self.failsafe {
            return Err(error);
        }
        debug!(path, %error, "dropping unreadable value");
        self.notifications.notify(kind, path, error.to_string());
        Ok(())
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn display(path: &str) -> &str {
    if path.is_empty() {
        "<root>"
    } else {
        path
    }
}
