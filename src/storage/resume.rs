// src/storage/resume.rs
use std::fs;
use std::path::Path;

/// Heuristic check whether a company folder already holds a finished download.
///
/// Complete means at least `expected_file_count` entries, none smaller than
/// `min_file_size` bytes. Contents are not validated. An unreadable folder
/// counts as incomplete.
pub fn is_folder_complete(folder: &Path, expected_file_count: usize, min_file_size: u64) -> bool {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!("Cannot list {}: {}", folder.display(), e);
            return false;
        }
    };

    let mut count = 0usize;
    for entry in entries {
        let size = match entry.and_then(|entry| entry.metadata()) {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::debug!("Cannot stat entry in {}: {}", folder.display(), e);
                return false;
            }
        };
        if size < min_file_size {
            return false;
        }
        count += 1;
    }

    count >= expected_file_count
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, size: usize) {
        fs::write(dir.join(name), vec![b'x'; size]).unwrap();
    }

    #[test]
    fn enough_adequately_sized_files_is_complete() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.htm", 100);
        write_file(dir.path(), "b.txt", 250);
        assert!(is_folder_complete(dir.path(), 2, 100));
    }

    #[test]
    fn one_undersized_file_flips_to_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), "a.htm", 100);
        write_file(dir.path(), "b.txt", 250);
        assert!(is_folder_complete(dir.path(), 2, 100));

        write_file(dir.path(), "a.htm", 99);
        assert!(!is_folder_complete(dir.path(), 2, 100));
    }

    #[test]
    fn too_few_files_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_folder_complete(dir.path(), 2, 100));
        write_file(dir.path(), "a.htm", 5000);
        assert!(!is_folder_complete(dir.path(), 2, 100));
    }

    #[test]
    fn missing_folder_is_incomplete() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_folder_complete(&dir.path().join("absent"), 0, 0));
    }
}
