//! # Blocking recursive zip writer.
//!
//! Produces a single deflated archive containing every file under the source
//! folder. In-archive paths are rooted one level above the source, so the
//! archive's top-level entry is the source folder's own name and extraction
//! elsewhere preserves folder identity.
//!
//! This function blocks; the orchestrator runs it under
//! [`tokio::task::spawn_blocking`] so the countdown keeps advancing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::BackupError;

/// What one completed archive run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveSummary {
    /// Path of the written archive.
    pub destination: PathBuf,
    /// Number of file entries written.
    pub entries: usize,
    /// Uncompressed bytes read from the source.
    pub bytes: u64,
}

/// Recursively compresses `source` into a zip archive at `destination`.
///
/// Fails with [`BackupError::Io`] when the source folder does not exist or
/// the destination cannot be created or written. A partially written archive
/// is removed on failure.
pub fn archive_folder(source: &Path, destination: &Path) -> Result<ArchiveSummary, BackupError> {
    if !source.is_dir() {
        return Err(BackupError::io(format!(
            "source folder {} does not exist",
            source.display()
        )));
    }

    let result = write_archive(source, destination);
    if result.is_err() {
        let _ = fs::remove_file(destination);
    }
    result
}

fn write_archive(source: &Path, destination: &Path) -> Result<ArchiveSummary, BackupError> {
    let root = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "archive".to_string());

    let file = fs::File::create(destination).map_err(|e| {
        BackupError::io(format!("create {}: {e}", destination.display()))
    })?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut entries = 0usize;
    let mut bytes = 0u64;

    for entry in WalkDir::new(source).follow_links(false) {
        let entry = entry.map_err(BackupError::io)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(source)
            .map_err(BackupError::io)?;
        zip.start_file(entry_name(&root, rel), options)
            .map_err(BackupError::io)?;

        let mut input = fs::File::open(entry.path()).map_err(|e| {
            BackupError::io(format!("read {}: {e}", entry.path().display()))
        })?;
        bytes += io::copy(&mut input, &mut zip).map_err(BackupError::io)?;
        entries += 1;
    }

    zip.finish().map_err(BackupError::io)?;
    Ok(ArchiveSummary {
        destination: destination.to_path_buf(),
        entries,
        bytes,
    })
}

/// Zip entry name: the source folder's own name, then the relative path with
/// forward slashes regardless of platform.
fn entry_name(root: &str, rel: &Path) -> String {
    let mut name = String::from(root);
    for component in rel.components() {
        name.push('/');
        name.push_str(&component.as_os_str().to_string_lossy());
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::io::Read;
    use tempfile::TempDir;
    use zip::ZipArchive;

    fn build_source(dir: &Path) -> PathBuf {
        let src = dir.join("media");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("a.txt"), b"alpha").unwrap();
        fs::write(src.join("sub").join("b.txt"), b"bravo").unwrap();
        src
    }

    fn read_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
        let mut archive = ZipArchive::new(fs::File::open(path).unwrap()).unwrap();
        let mut out = BTreeMap::new();
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i).unwrap();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).unwrap();
            out.insert(entry.name().to_string(), buf);
        }
        out
    }

    #[test]
    fn round_trip_preserves_layout_and_bytes() {
        let dir = TempDir::new().unwrap();
        let src = build_source(dir.path());
        let dest = dir.path().join("out.zip");

        let summary = archive_folder(&src, &dest).unwrap();
        assert_eq!(summary.entries, 2);
        assert_eq!(summary.bytes, 10);

        let entries = read_entries(&dest);
        assert_eq!(entries.get("media/a.txt").unwrap(), b"alpha");
        assert_eq!(entries.get("media/sub/b.txt").unwrap(), b"bravo");
    }

    #[test]
    fn entries_are_rooted_at_source_folder_name() {
        let dir = TempDir::new().unwrap();
        let src = build_source(dir.path());
        let dest = dir.path().join("out.zip");

        archive_folder(&src, &dest).unwrap();
        for name in read_entries(&dest).keys() {
            assert!(name.starts_with("media/"), "entry {name} not under root");
        }
    }

    #[test]
    fn missing_source_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let dest = dir.path().join("out.zip");
        let err = archive_folder(&dir.path().join("nope"), &dest).unwrap_err();
        assert_eq!(err.as_label(), "backup_io");
        assert!(!dest.exists(), "no archive file may be created");
    }

    #[test]
    fn unwritable_destination_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let src = build_source(dir.path());
        let dest = dir.path().join("no-such-dir").join("out.zip");
        let err = archive_folder(&src, &dest).unwrap_err();
        assert_eq!(err.as_label(), "backup_io");
    }

    #[test]
    fn empty_folder_yields_empty_archive() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("empty");
        fs::create_dir(&src).unwrap();
        let dest = dir.path().join("out.zip");

        let summary = archive_folder(&src, &dest).unwrap();
        assert_eq!(summary.entries, 0);
        assert!(read_entries(&dest).is_empty());
    }
}
