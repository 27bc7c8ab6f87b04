//! Collections of records and their file representation.
//!
//! A collection is the unit a merge works on: one JSON file holding an array
//! of records. Population indexes the records by identity and marks each one
//! present, so that lookups for unknown ids can hand back an absent record
//! instead of an `Option`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::{ModelError, ModelResult};
use crate::record::Record;

/// An ordered collection of records indexed by identity.
#[derive(Clone, Debug, Default)]
pub struct RecordCollection {
    records: Vec<Record>,
    by_id: HashMap<String, usize>,
    ids: Vec<String>,
}

impl RecordCollection {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from records, marking each one present and
    /// pinning default schema versions.
    ///
    /// The id index keeps the last record for a repeated id; the id listing
    /// keeps first-seen order without duplicates.
    pub fn from_records(mut records: Vec<Record>) -> Self {
        let mut by_id = HashMap::with_capacity(records.len());
        let mut ids = Vec::with_capacity(records.len());

        for (idx, record) in records.iter_mut().enumerate() {
            record.present = true;
            record.normalize_format_version();
            if !by_id.contains_key(&record.id) {
                ids.push(record.id.clone());
            }
            by_id.insert(record.id.clone(), idx);
        }

        Self {
            records,
            by_id,
            ids,
        }
    }

    /// Number of records, including any with repeated ids.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the collection holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records in wire order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Record ids in first-seen order, without duplicates.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Look up a record by id.
    pub fn get(&self, id: &str) -> Option<&Record> {
        self.by_id.get(id).map(|&idx| &self.records[idx])
    }

    /// Fetch a record by id, yielding an absent record when the id is
    /// unknown. The result's `present` flag tells the two cases apart.
    pub fn fetch(&self, id: &str) -> Record {
        self.get(id).cloned().unwrap_or_else(Record::absent)
    }

    /// Returns `true` if the collection holds a record with this id.
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Parse a collection from JSON bytes holding an array of records.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        let records: Vec<Record> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(records))
    }

    /// Read and parse a collection file.
    pub fn from_path(path: &Path) -> ModelResult<Self> {
        let bytes = fs::read(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let collection =
            Self::from_json_slice(&bytes).map_err(|source| ModelError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            path = %path.display(),
            records = collection.len(),
            "loaded record collection"
        );
        Ok(collection)
    }

    /// Encode the collection as pretty JSON with four-space indentation and
    /// a trailing newline.
    pub fn to_json_vec(&self) -> ModelResult<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.records
            .serialize(&mut serializer)
            .map_err(ModelError::Encode)?;
        buf.push(b'\n');
        Ok(buf)
    }

    /// Encode the collection and write it to a file.
    pub fn to_path(&self, path: &Path) -> ModelResult<()> {
        let bytes = self.to_json_vec()?;
        fs::write(path, bytes).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            path = %path.display(),
            records = self.len(),
            "wrote record collection"
        );
        Ok(())
    }
}
