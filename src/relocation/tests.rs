use super::{
    destination_name, FileRelocator, FixedClock, RelocationError, RelocationState, RunErrorMarker, MARKER_FILE_NAME
};

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tempfile::TempDir;

const TIMESTAMP: &str = "20230824123456";

struct Directories {
    root: TempDir
}

impl Directories {
    fn new() -> Result<Self> {
        let root = TempDir::new()?;
        fs::create_dir(root.path().join("input"))?;

        Ok(Self { root })
    }

    fn input(&self) -> std::path::PathBuf {
        self.root.path().join("input")
    }

    fn completed(&self) -> std::path::PathBuf {
        self.root.path().join("completed")
    }

    fn error(&self) -> std::path::PathBuf {
        self.root.path().join("error")
    }

    fn relocator(&self) -> Result<FileRelocator<FixedClock>> {
        let now = NaiveDate::from_ymd_opt(2023, 8, 24)
            .and_then(|date| date.and_hms_opt(12, 34, 56))
            .ok_or_else(|| anyhow!("invalid fixed clock"))?;

        Ok(FileRelocator::new(self.input(), self.completed(), self.error()).with_clock(FixedClock(now)))
    }
}

fn write_file(directory: &Path, name: &str, content: &str) -> Result<()> {
    fs::write(directory.join(name), content)?;
    Ok(())
}

#[test]
fn test_destination_name_inserts_timestamp_before_extension() {
    assert_eq!(destination_name("batch.txt", TIMESTAMP, false), "batch_20230824123456.txt");
    assert_eq!(destination_name("batch.txt", TIMESTAMP, true), "batch_ERROR_20230824123456.txt");
    assert_eq!(destination_name("daily.report.txt", TIMESTAMP, false), "daily.report_20230824123456.txt");
    assert_eq!(destination_name("noextension", TIMESTAMP, true), "noextension_ERROR_20230824123456");
}

#[tokio::test]
async fn test_marker_create_is_idempotent_and_clear_tolerates_missing() -> Result<()> {
    let directories = Directories::new()?;
    let marker = RunErrorMarker::in_directory(directories.input());

    assert_eq!(marker.path(), directories.input().join(MARKER_FILE_NAME));
    assert!(!marker.exists().await?);

    marker.create().await?;
    marker.create().await?;

    assert!(marker.exists().await?);

    marker.clear().await?;
    marker.clear().await?;

    assert!(!marker.exists().await?);

    Ok(())
}

#[tokio::test]
async fn test_clean_run_moves_files_to_completed() -> Result<()> {
    let directories = Directories::new()?;
    write_file(&directories.input(), "testEmptyFile.txt", "")?;
    write_file(&directories.input(), "testCorrectFile.txt", "header\n123456|123.45|Description|2023-08-24|12:34:56|789")?;

    let mut relocator = directories.relocator()?;
    let summary = relocator.relocate().await?;

    assert_eq!(relocator.state(), RelocationState::Done);
    assert!(!summary.routed_to_error);
    assert_eq!(summary.files.len(), 2);
    assert!(!directories.input().join("testEmptyFile.txt").exists());
    assert!(directories.completed().join("testEmptyFile_20230824123456.txt").exists());
    assert!(directories.completed().join("testCorrectFile_20230824123456.txt").exists());
    assert!(directories.error().is_dir());

    Ok(())
}

#[tokio::test]
async fn test_marker_routes_every_file_to_error_and_is_cleared() -> Result<()> {
    let directories = Directories::new()?;
    write_file(&directories.input(), "bad.txt", "header\nIncorrectFormatData")?;
    write_file(&directories.input(), "good.txt", "header\n123456|1.00|Desc|2023-08-24|12:34:56|789")?;

    let mut relocator = directories.relocator()?;
    relocator.marker().create().await?;

    let summary = relocator.relocate().await?;

    assert!(summary.routed_to_error);
    assert!(directories.error().join("bad_ERROR_20230824123456.txt").exists());
    assert!(directories.error().join("good_ERROR_20230824123456.txt").exists());
    assert!(!directories.input().join(MARKER_FILE_NAME).exists());
    assert_eq!(fs::read_dir(directories.input())?.count(), 0);

    Ok(())
}

#[tokio::test]
async fn test_empty_input_still_clears_stale_marker() -> Result<()> {
    let directories = Directories::new()?;
    let mut relocator = directories.relocator()?;
    relocator.marker().create().await?;

    let summary = relocator.relocate().await?;

    assert!(summary.files.is_empty());
    assert!(!relocator.marker().exists().await?);
    assert_eq!(relocator.state(), RelocationState::Done);

    Ok(())
}

#[tokio::test]
async fn test_existing_target_fails_and_leaves_file_and_marker_untouched() -> Result<()> {
    let directories = Directories::new()?;
    fs::create_dir(directories.error())?;
    write_file(&directories.input(), "a.txt", "")?;
    write_file(&directories.input(), "b.txt", "")?;
    write_file(&directories.error(), "b_ERROR_20230824123456.txt", "previous run")?;

    let mut relocator = directories.relocator()?;
    relocator.marker().create().await?;

    let result = relocator.relocate().await;

    assert!(matches!(result, Err(RelocationError::TargetExists { .. })));
    assert_eq!(relocator.state(), RelocationState::Failed);
    assert!(directories.error().join("a_ERROR_20230824123456.txt").exists());
    assert!(directories.input().join("b.txt").exists());
    assert_eq!(fs::read_to_string(directories.error().join("b_ERROR_20230824123456.txt"))?, "previous run");
    assert!(relocator.marker().exists().await?);

    Ok(())
}

#[tokio::test]
async fn test_unusable_target_directory_fails_while_preparing() -> Result<()> {
    let directories = Directories::new()?;
    write_file(directories.root.path(), "completed", "not a directory")?;
    write_file(&directories.input(), "a.txt", "")?;

    let mut relocator = directories.relocator()?;
    let result = relocator.relocate().await;

    assert!(matches!(result, Err(RelocationError::CreateDirectory { .. })));
    assert_eq!(relocator.state(), RelocationState::Failed);
    assert!(directories.input().join("a.txt").exists());

    Ok(())
}
