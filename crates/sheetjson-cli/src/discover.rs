use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Name prefixes of lock/temp files written by spreadsheet editors.
const TEMP_PREFIXES: [&str; 2] = [".~", "~$"];

/// Workbooks directly inside `dir` (not recursive), sorted by file name.
pub fn find_workbooks(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("list {}", dir.display()))?;
        if entry.file_type().is_file() && is_workbook(entry.path(), extensions) {
            found.push(entry.into_path());
        }
    }
    Ok(found)
}

/// Whether `path` has one of `extensions` (case-insensitive, leading `.`
/// optional) and is not an editor lock file.
pub fn is_workbook(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    if TEMP_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
        return false;
    }
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|wanted| wanted.trim_start_matches('.').eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> Vec<String> {
        vec!["xlsx".to_string(), ".XLSM".to_string()]
    }

    #[test]
    fn matches_extensions_case_insensitively() {
        assert!(is_workbook(Path::new("items.xlsx"), &defaults()));
        assert!(is_workbook(Path::new("dir/Items.XLSX"), &defaults()));
        assert!(is_workbook(Path::new("macro.xlsm"), &defaults()));
        assert!(!is_workbook(Path::new("legacy.xls"), &defaults()));
        assert!(!is_workbook(Path::new("README"), &defaults()));
    }

    #[test]
    fn skips_editor_lock_files() {
        assert!(!is_workbook(Path::new("~$items.xlsx"), &defaults()));
        assert!(!is_workbook(Path::new(".~lock.items.xlsx"), &defaults()));
    }

    #[test]
    fn lists_only_top_level_workbooks_in_name_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        for name in ["b.xlsx", "a.xlsm", "~$b.xlsx", "notes.txt"] {
            std::fs::write(dir.path().join(name), b"").expect("write");
        }
        std::fs::create_dir(dir.path().join("nested.xlsx")).expect("mkdir");
        std::fs::write(dir.path().join("nested.xlsx").join("c.xlsx"), b"").expect("write");

        let found = find_workbooks(dir.path(), &defaults()).expect("find");
        let names: Vec<_> = found
            .iter()
            .map(|path| path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.xlsm", "b.xlsx"]);
    }
}
