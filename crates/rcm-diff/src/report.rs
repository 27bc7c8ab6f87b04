//! Pair-level report rendering.
//!
//! Turns a (current, other) record pair into the lines a merge driver prints:
//! nothing for a clean pair, a single missing-marker header when exactly one
//! side is absent, and the full difference listing otherwise.

use rcm_types::Record;

use crate::record_diff::diff_records;

/// Label of the header line opening each record's difference listing.
pub(crate) const ID_HEADER: &str = "================= Id";

/// Placeholder shown in place of an id when one side is absent.
pub(crate) const MISSING_MARKER: &str = "- missing -";

/// Describe a record pair for the diff report.
///
/// Both sides absent yields no lines; the caller treats that pairing as a
/// fault before reporting. Exactly one absent side yields a single header
/// with the missing marker on the absent side. Two present records yield
/// [`RecordDiff::render`] output.
///
/// [`RecordDiff::render`]: crate::record_diff::RecordDiff::render
pub fn describe_pair(a: &Record, b: &Record) -> Vec<String> {
    match (a.present, b.present) {
        (false, false) => Vec::new(),
        (false, true) => vec![side_by_side(ID_HEADER, MISSING_MARKER, &b.id)],
        (true, false) => vec![side_by_side(ID_HEADER, &a.id, MISSING_MARKER)],
        (true, true) => diff_records(a, b).render(),
    }
}

/// Format one report line: a right-aligned label, then both values with the
/// left one right-aligned and the right one left-aligned.
pub(crate) fn side_by_side(label: &str, left: &str, right: &str) -> String {
    format!("{label:>20}: {left:>38} ≠ {right:<38}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn present(id: &str, name: &str) -> Record {
        Record {
            id: id.to_string(),
            name: name.to_string(),
            present: true,
            ..Record::default()
        }
    }

    #[test]
    fn line_layout_is_fixed_width() {
        let line = side_by_side("name", "foo", "bar");
        // 20 label + ": " + 38 left + " ≠ " + 38 right.
        assert_eq!(line.chars().count(), 101);

        let (left, right) = line.split_once(" ≠ ").unwrap();
        assert!(left.starts_with("                name: "));
        assert!(left.ends_with("foo"));
        assert!(right.starts_with("bar"));
        assert_eq!(right.chars().count(), 38);
    }

    #[test]
    fn wide_values_are_never_truncated() {
        let wide = "x".repeat(50);
        let line = side_by_side("name", &wide, &wide);
        assert_eq!(line.matches(&wide).count(), 2);
    }

    #[test]
    fn both_absent_yields_no_lines() {
        assert!(describe_pair(&Record::absent(), &Record::absent()).is_empty());
    }

    #[test]
    fn left_absent_marks_left_side() {
        let b = present("id-b", "B");
        let lines = describe_pair(&Record::absent(), &b);

        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains("Id"));
        let (left, right) = lines[0].split_once(" ≠ ").unwrap();
        assert!(left.ends_with(MISSING_MARKER));
        assert!(right.starts_with("id-b"));
    }

    #[test]
    fn right_absent_marks_right_side() {
        let a = present("id-a", "A");
        let lines = describe_pair(&a, &Record::absent());

        assert_eq!(lines.len(), 1);
        let (left, right) = lines[0].split_once(" ≠ ").unwrap();
        assert!(left.ends_with("id-a"));
        assert!(right.starts_with(MISSING_MARKER));
    }

    #[test]
    fn identical_present_pair_yields_no_lines() {
        let a = present("1", "Same");
        let b = present("1", "Same");
        assert!(describe_pair(&a, &b).is_empty());
    }

    #[test]
    fn differing_present_pair_yields_full_listing() {
        let a = present("1", "Alpha");
        let b = present("1", "Beta");

        let lines = describe_pair(&a, &b);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Id"));
        assert!(lines[1].contains("Alpha"));
        assert!(lines[1].contains("Beta"));
    }
}
