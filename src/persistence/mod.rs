//! Whole-file persistence for small plain-text values
//!
//! Writes go to a sibling temp file first and are renamed over the target,
//! so a crash mid-write leaves the previous value intact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Storage failure
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a file's trimmed contents; `None` when the file doesn't exist
pub fn read_text(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text.trim().to_string())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace a file's contents wholesale
pub fn write_text(path: &Path, text: &str) -> Result<(), StoreError> {
    let tmp = tmp_path(path);
    let wrap = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    fs::write(&tmp, text).map_err(wrap)?;
    fs::rename(&tmp, path).map_err(wrap)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}


#[cfg(test)]
mod tests {
    use super::testutil::scratch_path;
    use super::*;

    #[test]
    fn test_missing_file_reads_none() {
        let path = scratch_path("missing.txt");
        assert_eq!(read_text(&path).unwrap(), None);
    }

    #[test]
    fn test_write_then_read_trims() {
        let path = scratch_path("value.txt");
        write_text(&path, "42").unwrap();
        assert_eq!(read_text(&path).unwrap().as_deref(), Some("42"));

        fs::write(&path, "  17\n").unwrap();
        assert_eq!(read_text(&path).unwrap().as_deref(), Some("17"));
    }

    #[test]
    fn test_write_overwrites_and_leaves_no_tmp() {
        let path = scratch_path("value.txt");
        write_text(&path, "123456").unwrap();
        write_text(&path, "7").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "7");
        assert!(!tmp_path(&path).exists());
    }
}
