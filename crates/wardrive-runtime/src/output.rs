use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use wardrive_engine::FeatureCollection;

use crate::Result;

/// Write the document as pretty-printed UTF-8 JSON; returns the file size in bytes.
pub fn write_geojson(path: &Path, document: &FeatureCollection) -> Result<u64> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    let size = std::fs::metadata(path)?.len();
    log::info!("Wrote {} ({} bytes)", path.display(), size);
    Ok(size)
}
