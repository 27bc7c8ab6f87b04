//! The record entity and its wire representation.
//!
//! A [`Record`] is one structured item in a collection, keyed by its opaque
//! `id`. The wire format is JSON; every field is optional on the wire and
//! defaults to its zero value. The `data` block is wire-polymorphic: it may
//! arrive as an array of entry objects or as one bare entry object, and both
//! shapes normalize to the same ordered sequence at parse time.

use std::collections::{BTreeMap, BTreeSet};

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Schema version assumed when a record carries none.
pub const DEFAULT_FORMAT_VERSION: &str = "1.0";

/// One structured entity in a record collection.
///
/// Records are matched across collections by `id`. The `present` flag is
/// derived state: it is true only for records actually found by identity in
/// a collection, and it never appears on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Opaque identity, unique within a collection.
    #[serde(default)]
    pub id: String,

    /// Display label.
    #[serde(default)]
    pub name: String,

    /// Named `(name, type, value)` triples.
    #[serde(default)]
    pub data: DataBlock,

    /// `(kind, value)` pairs; kinds may repeat.
    #[serde(default)]
    pub meta: MetaBlock,

    /// Selector strings, compared as a set.
    #[serde(default)]
    pub selectors: Vec<String>,

    /// Domain classification.
    #[serde(default)]
    pub domain: Domain,

    /// Tag labels, compared as a set.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Schema version; empty means [`DEFAULT_FORMAT_VERSION`].
    #[serde(default, rename = "formatVersion")]
    pub format_version: String,

    /// Whether this record was actually found in a collection.
    #[serde(skip)]
    pub present: bool,
}

impl Record {
    /// The absent zero-value record (`present == false`).
    ///
    /// This is what a collection lookup yields for an unknown identity. An
    /// absent record must never be treated as equal to a present one without
    /// the caller checking `present` first.
    pub fn absent() -> Self {
        Self::default()
    }

    /// The schema version with the default applied: an empty version reads
    /// as [`DEFAULT_FORMAT_VERSION`].
    pub fn effective_format_version(&self) -> &str {
        if self.format_version.is_empty() {
            DEFAULT_FORMAT_VERSION
        } else {
            &self.format_version
        }
    }

    /// Pin the default schema version into the record.
    ///
    /// Idempotent. Collections apply this once at population time so that
    /// later comparisons are pure reads.
    pub fn normalize_format_version(&mut self) {
        if self.format_version.is_empty() {
            self.format_version = DEFAULT_FORMAT_VERSION.to_string();
        }
    }

    /// Tags as a set; duplicates collapse and order is ignored.
    pub fn tag_set(&self) -> BTreeSet<&str> {
        self.tags.iter().map(String::as_str).collect()
    }

    /// Selectors as a set; duplicates collapse and order is ignored.
    pub fn selector_set(&self) -> BTreeSet<&str> {
        self.selectors.iter().map(String::as_str).collect()
    }
}

/// A single `(name, type, value)` triple in a record's data block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub ty: String,
    #[serde(default)]
    pub value: String,
}

impl DataEntry {
    /// Create a data entry.
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            value: value.into(),
        }
    }
}

/// The ordered data block of a record.
///
/// Serialization always emits the array form; parsing additionally accepts a
/// single bare entry object and normalizes it to a one-element sequence.
/// Anything else on the wire is a hard parse error for the whole record.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DataBlock(pub Vec<DataEntry>);

impl DataBlock {
    /// Create a data block from entries.
    pub fn new(entries: Vec<DataEntry>) -> Self {
        Self(entries)
    }

    /// Number of entries, including duplicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the block has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries in wire order.
    pub fn entries(&self) -> &[DataEntry] {
        &self.0
    }

    /// Entries keyed by name. Later entries with the same name overwrite
    /// earlier ones; comparisons are defined over this map, not the raw
    /// sequence.
    pub fn by_name(&self) -> BTreeMap<&str, &DataEntry> {
        let mut map = BTreeMap::new();
        for entry in &self.0 {
            map.insert(entry.name.as_str(), entry);
        }
        map
    }

    /// Compare two blocks over the union of their entry names.
    ///
    /// A name absent on one side reads as an empty entry; two entries match
    /// when `type` and `value` both match exactly. Entry order and repeated
    /// names do not affect the outcome beyond last-wins resolution.
    pub fn entries_match(&self, other: &Self) -> bool {
        let mine = self.by_name();
        let theirs = other.by_name();
        let empty = DataEntry::default();

        mine.keys().chain(theirs.keys()).all(|name| {
            let a = mine.get(name).copied().unwrap_or(&empty);
            let b = theirs.get(name).copied().unwrap_or(&empty);
            a.ty == b.ty && a.value == b.value
        })
    }
}

impl<'de> Deserialize<'de> for DataBlock {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Array(_) => {
                let entries =
                    Vec::<DataEntry>::deserialize(value).map_err(de::Error::custom)?;
                Ok(DataBlock(entries))
            }
            Value::Object(_) => {
                let entry = DataEntry::deserialize(value).map_err(de::Error::custom)?;
                Ok(DataBlock(vec![entry]))
            }
            other => Err(de::Error::custom(format!(
                "data block must be an entry object or an array of entries, got {}",
                json_kind(&other)
            ))),
        }
    }
}

/// A single `(kind, value)` pair in a record's meta block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaEntry {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub value: String,
}

impl MetaEntry {
    /// Create a meta entry.
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// The ordered meta block of a record. Kinds may repeat.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaBlock(pub Vec<MetaEntry>);

impl MetaBlock {
    /// Create a meta block from entries.
    pub fn new(entries: Vec<MetaEntry>) -> Self {
        Self(entries)
    }

    /// Number of entries, including duplicates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the block has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The entries in wire order.
    pub fn entries(&self) -> &[MetaEntry] {
        &self.0
    }

    /// Values keyed by kind. The last entry with a given kind wins.
    pub fn by_kind(&self) -> BTreeMap<&str, &str> {
        let mut map = BTreeMap::new();
        for entry in &self.0 {
            map.insert(entry.kind.as_str(), entry.value.as_str());
        }
        map
    }

    /// Compare two blocks over the union of their kinds.
    ///
    /// A kind absent on one side reads as an empty value.
    pub fn values_match(&self, other: &Self) -> bool {
        let mine = self.by_kind();
        let theirs = other.by_kind();

        mine.keys().chain(theirs.keys()).all(|kind| {
            mine.get(kind).copied().unwrap_or("")
                == theirs.get(kind).copied().unwrap_or("")
        })
    }
}

/// Domain classification of a record, compared by full structural equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub kind: String,
}

impl Domain {
    /// Create a domain classification.
    pub fn new(category: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            kind: kind.into(),
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
