use super::Schema;
use crate::error::{ErdError, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a schema document written by [`save_schema`].
pub fn load_schema(path: &Path) -> Result<Schema> {
    let file = File::open(path).map_err(|e| ErdError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ErdError::Document {
        path: path.to_path_buf(),
        source,
    })
}

/// Write a schema document as pretty-printed JSON.
pub fn save_schema(schema: &Schema, path: &Path) -> Result<()> {
    write_atomic(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, schema)?;
        writer.write_all(b"\n")
    })
}

/// Write a file through a temporary file next to `path`.
///
/// The temporary file is only renamed into place once `write` and the final
/// flush succeeded, so a failed write never leaves a truncated file behind
/// and an existing file is replaced whole.
pub fn write_atomic<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<&File>) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let tmp = NamedTempFile::new_in(dir).map_err(|e| ErdError::io(dir, e))?;
    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer).map_err(|e| ErdError::io(path, e))?;
        writer.flush().map_err(|e| ErdError::io(path, e))?;
    }

    tmp.persist(path).map_err(|e| ErdError::io(path, e.error))?;
    Ok(())
}
