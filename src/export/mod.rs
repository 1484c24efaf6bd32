//! Snapshot Exporter: visible samples → timestamped text file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::info;

use crate::model::ExportError;
use crate::state::{AxisRange, ScrollingBuffer};

/// File name prefix of every snapshot.
pub const SNAPSHOT_PREFIX: &str = "rtt_snapshot_";

/// What an export did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// File written.
    Written {
        /// Path of the new file.
        path: PathBuf,
        /// Number of values written.
        count: usize,
    },
    /// No buffer position falls inside the visible range; nothing written.
    NothingVisible,
}

/// Values whose position lies in the closed range `visible`, in position order.
pub fn select_visible(buffer: &ScrollingBuffer, visible: AxisRange) -> Vec<u32> {
    buffer
        .positions_within(visible.min, visible.max)
        .map(|(_, value)| value)
        .collect()
}

/// `rtt_snapshot_YYYYMMDD_HHMMSS.txt` for the given local time.
pub fn snapshot_file_name(at: DateTime<Local>) -> String {
    format!("{SNAPSHOT_PREFIX}{}.txt", at.format("%Y%m%d_%H%M%S"))
}

/// Write the visible samples, one decimal integer per line, into `dir`.
pub fn export_snapshot(
    buffer: &ScrollingBuffer,
    visible: AxisRange,
    dir: &Path,
    at: DateTime<Local>,
) -> Result<ExportOutcome, ExportError> {
    let values = select_visible(buffer, visible);
    if values.is_empty() {
        return Ok(ExportOutcome::NothingVisible);
    }

    let path = dir.join(snapshot_file_name(at));
    write_values(&path, &values).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), count = values.len(), "Snapshot saved");
    Ok(ExportOutcome::Written {
        path,
        count: values.len(),
    })
}

fn write_values(path: &Path, values: &[u32]) -> std::io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for value in values {
        writeln!(writer, "{value}")?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;

    fn fixed_time() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 7)
            .single()
            .expect("unambiguous local time")
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rtt-scope-export-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn file_name_uses_local_timestamp() {
        assert_eq!(
            snapshot_file_name(fixed_time()),
            "rtt_snapshot_20240309_140507.txt"
        );
    }

    #[test]
    fn selects_inclusive_visible_positions() {
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);
        assert_eq!(
            select_visible(&buffer, AxisRange::new(1.0, 2.0)),
            vec![20, 30]
        );
    }

    #[test]
    fn positions_are_zero_based_and_bounds_inclusive() {
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);

        // Position 2 holds the third value; both ends of the range are kept
        assert_eq!(
            select_visible(&buffer, AxisRange::new(2.0, 3.0)),
            vec![30, 40]
        );
        assert_eq!(select_visible(&buffer, AxisRange::new(2.5, 2.9)), Vec::<u32>::new());
    }

    #[test]
    fn writes_one_value_per_line() {
        let dir = scratch_dir("lines");
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);

        let outcome = export_snapshot(&buffer, AxisRange::new(1.0, 2.0), &dir, fixed_time())
            .expect("export succeeds");

        let expected_path = dir.join("rtt_snapshot_20240309_140507.txt");
        assert_eq!(
            outcome,
            ExportOutcome::Written {
                path: expected_path.clone(),
                count: 2
            }
        );
        assert_eq!(fs::read_to_string(&expected_path).unwrap(), "20\n30\n");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_selection_writes_nothing() {
        let dir = scratch_dir("empty");
        let buffer = ScrollingBuffer::from_values(vec![10, 20, 30, 40]);

        let outcome = export_snapshot(&buffer, AxisRange::new(10.0, 20.0), &dir, fixed_time())
            .expect("empty selection is not an error");

        assert_eq!(outcome, ExportOutcome::NothingVisible);
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_directory_is_reported_with_path() {
        let dir = std::env::temp_dir().join("rtt-scope-export-does-not-exist/nested");
        let buffer = ScrollingBuffer::from_values(vec![1]);

        let err = export_snapshot(&buffer, AxisRange::new(0.0, 1.0), &dir, fixed_time())
            .expect_err("cannot create file in missing directory");

        let ExportError::Io { path, .. } = err;
        assert!(path.ends_with("rtt_snapshot_20240309_140507.txt"));
    }
}
