use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use typelens_proto::{decode_type_batch, Location, MarkupContent, TypeData};

use crate::{DumpError, MemoryIndex};

/// JSON export of an index: type snapshots plus per-binding-key docs and
/// source locations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexDump {
    #[serde(default)]
    pub types: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub javadoc: BTreeMap<String, MarkupContent>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub locations: BTreeMap<String, Location>,
}

impl IndexDump {
    pub fn from_types<'a>(types: impl IntoIterator<Item = &'a TypeData>) -> Self {
        Self {
            types: types.into_iter().map(TypeData::to_value).collect(),
            ..Self::default()
        }
    }

    pub fn load(path: &Path) -> Result<IndexDump, DumpError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| DumpError::Io {
            path: display.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|err| DumpError::Json {
            path: display,
            message: typelens_proto::sanitize_serde_json_error(&err),
        })
    }

    /// Build an index, dropping malformed snapshots with a warning.
    pub fn into_index(self) -> MemoryIndex {
        let total = self.types.len();
        let types = decode_type_batch(serde_json::Value::Array(self.types));
        tracing::debug!(
            target: "typelens.index",
            total,
            loaded = types.len(),
            "loaded index dump"
        );

        let mut index = MemoryIndex::from_types(types);
        for (key, doc) in self.javadoc {
            index.set_javadoc(key, doc);
        }
        for (key, location) in self.locations {
            index.set_location(key, location);
        }
        index
    }
}
