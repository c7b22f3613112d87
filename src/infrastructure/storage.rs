use crate::domain::error::{AppError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))
}

/// Replace the file's contents in one open-write-close sequence
pub fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)
        .map_err(|e| AppError::IoError(format!("Failed to write {}: {}", path.display(), e)))
}

/// Serialize fully before touching the destination, so a failure leaves no partial file
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        ensure_dir(parent)
            .map_err(|e| AppError::IoError(format!("Failed to create {}: {}", parent.display(), e)))?;
    }
    write_bytes(path, text.as_bytes())
}

/// Regular files directly inside `dir`, sorted by path
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(AppError::NotFound(format!(
            "Directory not found: {}",
            dir.display()
        )));
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested/menu.json");
        write_json_pretty(&out, &serde_json::json!([{"label": "About"}])).unwrap();

        let text = fs::read_to_string(&out).unwrap();
        assert!(text.starts_with("[\n  {"));
        assert!(text.contains("\"label\": \"About\""));
    }

    #[test]
    fn test_list_files_sorted_and_skips_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();

        let files = list_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.png"]);
    }

    #[test]
    fn test_list_files_missing_dir() {
        let err = list_files(Path::new("/no/such/tiles")).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let err = read_bytes(Path::new("/no/such/file.png")).unwrap_err();
        assert!(matches!(err, AppError::IoError(_)));
    }
}
