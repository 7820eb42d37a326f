use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tempfile::NamedTempFile;

/// Write `value` as JSON to `dest`, replacing any existing file.
///
/// The JSON goes to a temp file in the destination directory first and is
/// renamed into place, so a failed write never leaves a truncated document.
pub fn write_json<T: Serialize + ?Sized>(dest: &Path, value: &T, compact: bool) -> Result<()> {
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        if compact {
            serde_json::to_writer(&mut writer, value)?;
        } else {
            serde_json::to_writer_pretty(&mut writer, value)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.as_file().sync_all()?;
    tmp.persist(dest)
        .map_err(|err| err.error)
        .with_context(|| format!("write {}", dest.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_pretty_json_and_replaces_existing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("out").join("doc.json");

        write_json(&dest, &serde_json::json!({"a": [1, 2]}), false).expect("write");
        assert_eq!(
            fs::read_to_string(&dest).expect("read"),
            "{\n  \"a\": [\n    1,\n    2\n  ]\n}\n"
        );

        write_json(&dest, &serde_json::json!([true]), true).expect("rewrite");
        assert_eq!(fs::read_to_string(&dest).expect("read"), "[true]\n");
    }
}
