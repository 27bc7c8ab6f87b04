use colored::Colorize;
use tracing::debug;

use rcm_merge::reconcile;
use rcm_types::RecordCollection;

use crate::cli::Cli;

pub fn run_merge(cli: Cli) -> anyhow::Result<()> {
    debug!(path = %cli.ancestor.display(), "reading ancestor");
    let ancestor = RecordCollection::from_path(&cli.ancestor)?;
    debug!(path = %cli.current.display(), "reading current");
    let current = RecordCollection::from_path(&cli.current)?;
    debug!(path = %cli.other.display(), "reading other");
    let other = RecordCollection::from_path(&cli.other)?;

    let outcome = reconcile(&ancestor, &current, &other)?;
    for line in &outcome.report {
        println!("{line}");
    }

    if cli.check {
        println!(
            "{} {} identities compared, {} report lines; nothing written",
            "✓".green(),
            outcome.merged.len(),
            outcome.report.len(),
        );
        return Ok(());
    }

    outcome.merged.to_path(&cli.current)?;
    println!(
        "{} Merged {} records into {}",
        "✓".green().bold(),
        outcome.merged.len(),
        cli.current.display().to_string().bold(),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn write_collection(path: &Path, body: &str) {
        fs::write(path, body).unwrap();
    }

    fn make_cli(dir: &Path, check: bool) -> Cli {
        Cli {
            ancestor: dir.join("ancestor.json"),
            current: dir.join("current.json"),
            other: dir.join("other.json"),
            check,
            verbose: false,
        }
    }

    #[test]
    fn merge_writes_result_to_current_path() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(
            &dir.path().join("current.json"),
            r#"[{"id": "1", "name": "A", "data": [{"name": "x", "type": "string", "value": "foo"}]}]"#,
        );
        write_collection(
            &dir.path().join("other.json"),
            r#"[{"id": "1", "name": "A", "data": [{"name": "x", "type": "string", "value": "bar"}]}]"#,
        );

        run_merge(make_cli(dir.path(), false)).unwrap();

        let merged = RecordCollection::from_path(&dir.path().join("current.json")).unwrap();
        assert_eq!(merged.len(), 1);
        // Any difference hands the win to the other side.
        assert_eq!(merged.get("1").unwrap().data.entries()[0].value, "bar");
    }

    #[test]
    fn merged_file_is_pretty_printed() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(&dir.path().join("current.json"), r#"[{"id":"1","name":"A"}]"#);
        write_collection(&dir.path().join("other.json"), "[]");

        run_merge(make_cli(dir.path(), false)).unwrap();

        let text = fs::read_to_string(dir.path().join("current.json")).unwrap();
        assert!(text.contains("    \"id\": \"1\""));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn check_mode_leaves_current_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let current_body = r#"[{"id":"1","name":"A"}]"#;
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(&dir.path().join("current.json"), current_body);
        write_collection(&dir.path().join("other.json"), r#"[{"id":"1","name":"B"}]"#);

        run_merge(make_cli(dir.path(), true)).unwrap();

        let after = fs::read_to_string(dir.path().join("current.json")).unwrap();
        assert_eq!(after, current_body);
    }

    #[test]
    fn union_records_survive_from_both_sides() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(&dir.path().join("current.json"), r#"[{"id":"a","name":"A"}]"#);
        write_collection(&dir.path().join("other.json"), r#"[{"id":"b","name":"B"}]"#);

        run_merge(make_cli(dir.path(), false)).unwrap();

        let merged = RecordCollection::from_path(&dir.path().join("current.json")).unwrap();
        assert_eq!(merged.ids(), ["a", "b"]);
    }

    #[test]
    fn missing_input_file_fails_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let current_body = r#"[{"id":"1","name":"A"}]"#;
        write_collection(&dir.path().join("current.json"), current_body);
        write_collection(&dir.path().join("other.json"), "[]");

        let err = run_merge(make_cli(dir.path(), false)).unwrap_err();
        assert!(err.to_string().contains("ancestor.json"));

        let after = fs::read_to_string(dir.path().join("current.json")).unwrap();
        assert_eq!(after, current_body);
    }

    #[test]
    fn malformed_input_is_a_parse_error_not_empty() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(&dir.path().join("current.json"), "[{\"id\":");
        write_collection(&dir.path().join("other.json"), "[]");

        let err = run_merge(make_cli(dir.path(), false)).unwrap_err();
        assert!(err.to_string().contains("failed parsing"));
        assert!(err.to_string().contains("current.json"));
    }

    #[test]
    fn ancestor_only_identity_surfaces_the_fault() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), r#"[{"id":"ghost"}]"#);
        write_collection(&dir.path().join("current.json"), "[]");
        write_collection(&dir.path().join("other.json"), "[]");

        let err = run_merge(make_cli(dir.path(), false)).unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[test]
    fn nonexistent_paths_do_not_create_files() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            ancestor: dir.path().join("a.json"),
            current: dir.path().join("b.json"),
            other: dir.path().join("c.json"),
            check: false,
            verbose: false,
        };

        assert!(run_merge(cli).is_err());
        assert!(!dir.path().join("b.json").exists());
    }

    #[test]
    fn single_object_data_block_round_trips_as_array() {
        let dir = tempfile::tempdir().unwrap();
        write_collection(&dir.path().join("ancestor.json"), "[]");
        write_collection(
            &dir.path().join("current.json"),
            r#"[{"id": "1", "data": {"name": "only", "type": "string", "value": "v"}}]"#,
        );
        write_collection(&dir.path().join("other.json"), "[]");

        run_merge(make_cli(dir.path(), false)).unwrap();

        let text = fs::read_to_string(dir.path().join("current.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert!(parsed[0]["data"].is_array());
        assert_eq!(parsed[0]["data"][0]["name"], "only");
    }
}
