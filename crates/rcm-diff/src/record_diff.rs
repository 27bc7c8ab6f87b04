//! Record-level diff: compare two records of the same identity.
//!
//! Every section comparator runs unconditionally so the result can name all
//! differing sections, not just the first. Comparison maps are built fresh
//! per call; nothing here mutates the compared records.

use std::collections::BTreeSet;

use rcm_types::{DataEntry, Record};

use crate::report::{side_by_side, ID_HEADER};

/// The result of comparing two records.
///
/// Holds borrows of both inputs so difference lines can be rendered on
/// demand. Detection is symmetric; rendered lines place the first record on
/// the left and the second on the right.
#[derive(Clone, Copy, Debug)]
pub struct RecordDiff<'a> {
    /// The left-hand record.
    pub a: &'a Record,
    /// The right-hand record.
    pub b: &'a Record,
    /// True when any section differs.
    pub has_differences: bool,
    /// Display names differ.
    pub name_differs: bool,
    /// Data blocks differ under union-of-names comparison.
    pub data_differs: bool,
    /// Meta blocks differ under union-of-kinds comparison.
    pub meta_differs: bool,
    /// Selector sets differ.
    pub selectors_differ: bool,
    /// Domain classifications differ.
    pub domain_differs: bool,
    /// Tag sets differ.
    pub tags_differ: bool,
    /// Effective schema versions differ.
    pub format_version_differs: bool,
}

/// Compare two records section by section.
///
/// Either record may be the absent zero-value; callers that want absence to
/// short-circuit must check `present` before calling. Schema versions are
/// compared through [`Record::effective_format_version`], so an empty version
/// reads as `"1.0"` without mutating either input.
pub fn diff_records<'a>(a: &'a Record, b: &'a Record) -> RecordDiff<'a> {
    let name_differs = a.name != b.name;
    let data_differs = !a.data.entries_match(&b.data);
    let meta_differs = !a.meta.values_match(&b.meta);
    let selectors_differ = a.selector_set() != b.selector_set();
    let domain_differs = a.domain != b.domain;
    let tags_differ = a.tag_set() != b.tag_set();
    let format_version_differs =
        a.effective_format_version() != b.effective_format_version();

    RecordDiff {
        a,
        b,
        has_differences: name_differs
            || data_differs
            || meta_differs
            || selectors_differ
            || domain_differs
            || tags_differ
            || format_version_differs,
        name_differs,
        data_differs,
        meta_differs,
        selectors_differ,
        domain_differs,
        tags_differ,
        format_version_differs,
    }
}

impl<'a> RecordDiff<'a> {
    /// One line per differing data key, in union order.
    ///
    /// Each differing key contributes a `data.<name>.type` line when the
    /// types differ and a `data.<name>.value` line when the values differ.
    pub fn data_differences(&self) -> Vec<String> {
        let a_by_name = self.a.data.by_name();
        let b_by_name = self.b.data.by_name();
        let empty = DataEntry::default();

        let names = union_keys(
            self.a.data.entries().iter().map(|e| e.name.as_str()),
            self.b.data.entries().iter().map(|e| e.name.as_str()),
        );

        let mut lines = Vec::new();
        for name in names {
            let left = a_by_name.get(name).copied().unwrap_or(&empty);
            let right = b_by_name.get(name).copied().unwrap_or(&empty);
            if left.ty != right.ty {
                lines.push(side_by_side(
                    &format!("data.{name}.type"),
                    &left.ty,
                    &right.ty,
                ));
            }
            if left.value != right.value {
                lines.push(side_by_side(
                    &format!("data.{name}.value"),
                    &left.value,
                    &right.value,
                ));
            }
        }
        lines
    }

    /// One `meta.<kind>` line per differing meta kind, in union order.
    pub fn meta_differences(&self) -> Vec<String> {
        let a_by_kind = self.a.meta.by_kind();
        let b_by_kind = self.b.meta.by_kind();

        let kinds = union_keys(
            self.a.meta.entries().iter().map(|e| e.kind.as_str()),
            self.b.meta.entries().iter().map(|e| e.kind.as_str()),
        );

        let mut lines = Vec::new();
        for kind in kinds {
            let left = a_by_kind.get(kind).copied().unwrap_or("");
            let right = b_by_kind.get(kind).copied().unwrap_or("");
            if left != right {
                lines.push(side_by_side(&format!("meta.{kind}"), left, right));
            }
        }
        lines
    }

    /// Render the full difference listing for this pair.
    ///
    /// Empty when nothing differs. Otherwise an id header followed by one
    /// section after another: the name side by side, per-key data and meta
    /// lines, then a single plain line for each differing flag-only section.
    pub fn render(&self) -> Vec<String> {
        if !self.has_differences {
            return Vec::new();
        }

        let mut lines = vec![side_by_side(ID_HEADER, &self.a.id, &self.b.id)];
        if self.name_differs {
            lines.push(side_by_side("name", &self.a.name, &self.b.name));
        }
        if self.data_differs {
            lines.extend(self.data_differences());
        }
        if self.meta_differs {
            lines.extend(self.meta_differences());
        }
        if self.tags_differ {
            lines.push("tags differ".to_string());
        }
        if self.selectors_differ {
            lines.push("selectors differ".to_string());
        }
        if self.domain_differs {
            lines.push("domain differs".to_string());
        }
        if self.format_version_differs {
            lines.push("formatVersion differs".to_string());
        }
        lines
    }
}

/// Union of two key sequences, first-seen order, duplicates dropped.
fn union_keys<'a>(
    first: impl Iterator<Item = &'a str>,
    second: impl Iterator<Item = &'a str>,
) -> Vec<&'a str> {
    let mut seen = BTreeSet::new();
    let mut keys = Vec::new();
    for key in first.chain(second) {
        if seen.insert(key) {
            keys.push(key);
        }
    }
    keys
}
