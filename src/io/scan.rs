//! Instance discovery.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension of instance files.
pub const INSTANCE_EXTENSION: &str = "vrp";

/// Lists the `*.vrp` files directly inside `dir`, sorted by file name.
///
/// Subdirectories are not descended into.
pub fn find_instances(dir: impl AsRef<Path>) -> crate::error::Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_instance = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext == INSTANCE_EXTENSION);
        if is_instance {
            found.push(path);
        }
    }
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_and_sorts() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["B-n31-k5.vrp", "A-n32-k5.vrp", "notes.txt", "A-n32-k5.sol"] {
            fs::write(dir.path().join(name), "").expect("write");
        }
        fs::create_dir(dir.path().join("nested.vrp")).expect("mkdir");

        let names: Vec<String> = find_instances(dir.path())
            .expect("scan")
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["A-n32-k5.vrp", "B-n31-k5.vrp"]);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(find_instances(dir.path().join("missing")).is_err());
    }
}
