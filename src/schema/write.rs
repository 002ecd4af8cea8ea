use anyhow::{Context, Result};
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};
use tracing::{debug, instrument};

use super::Dataset;

/// Serialize `dataset` as two-space indented UTF-8 JSON at `path`.
///
/// - writes to a hidden `.<name>.tmp` beside the target first
/// - renames it over `path` only once the whole document is flushed
#[instrument(level = "info", skip(path, dataset), fields(output = %path.as_ref().display()))]
pub fn write_dataset<P: AsRef<Path>>(path: P, dataset: &Dataset) -> Result<()> {
    // 1) Work out the temp path next to the target
    let path = path.as_ref();
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("output path {:?} has no file name", path))?
        .to_string_lossy();
    let tmp_path = dir.join(format!(".{}.tmp", file_name));

    // 2) Serialize into the temp file
    let tmp = fs::File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    let mut writer = BufWriter::new(tmp);
    serde_json::to_writer_pretty(&mut writer, dataset).context("serializing dataset JSON")?;
    writer.write_all(b"\n")?;
    writer
        .flush()
        .with_context(|| format!("flushing {:?}", tmp_path))?;
    drop(writer);

    // 3) Swap it into place
    fs::rename(&tmp_path, path)
        .with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path))?;

    debug!(records = dataset.countries.len(), "dataset written");
    Ok(())
}
