//! Consolidated report assembly.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::dispatch::ResultStore;
use crate::error::Error;

/// Append every job's captured lines to the report file.
///
/// The file is created if absent and opened in append mode, so successive
/// runs accumulate. Entries are written in coordinate order with no
/// separators between jobs, matching the raw tool output. Consumes the
/// store; the run is over once the report exists.
pub fn aggregate(store: ResultStore, report_path: &Path) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(report_path)
        .map_err(|e| Error::io(report_path, e))?;

    let entries = store.into_entries();
    info!("writing {} dependency trees to {}", entries.len(), report_path.display());

    for (_, lines) in entries {
        for line in lines {
            writeln!(file, "{line}").map_err(|e| Error::io(report_path, e))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &[&str])]) -> ResultStore {
        let store = ResultStore::new();
        for (key, lines) in entries {
            store.insert(
                key.to_string(),
                lines.iter().map(|l| l.to_string()).collect(),
            );
        }
        store
    }

    #[test]
    fn test_concatenates_in_coordinate_order() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("deptree.txt");

        let store = store_with(&[
            ("b:y", &["tree of b:y"]),
            ("a:x", &["tree of a:x", "  \\- leaf"]),
        ]);
        aggregate(store, &report).unwrap();

        let content = std::fs::read_to_string(&report).unwrap();
        assert_eq!(content, "tree of a:x\n  \\- leaf\ntree of b:y\n");
    }

    #[test]
    fn test_append_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("deptree.txt");
        std::fs::write(&report, "previous run\n").unwrap();

        aggregate(store_with(&[("a:x", &["new line"])]), &report).unwrap();

        let content = std::fs::read_to_string(&report).unwrap();
        assert_eq!(content, "previous run\nnew line\n");
    }

    #[test]
    fn test_empty_store_creates_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("deptree.txt");

        aggregate(ResultStore::new(), &report).unwrap();

        assert!(report.exists());
        assert_eq!(std::fs::read_to_string(&report).unwrap(), "");
    }

    #[test]
    fn test_unwritable_path_is_io_failure() {
        let err = aggregate(ResultStore::new(), Path::new("/nonexistent/dir/report.txt"))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::IoFailure { .. })
        ));
    }
}
