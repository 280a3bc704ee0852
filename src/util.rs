use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::BufWriter;
use std::path::Path;

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_serialized<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)?;
    Ok(())
}
