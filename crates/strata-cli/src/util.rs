use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::Path,
};

use anyhow::Context;

/// Writes `value` to `path` as pretty-printed JSON followed by a newline.
pub fn save_json<T, P>(value: &T, path: P) -> anyhow::Result<()>
where
    T: serde::Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, value)
        .with_context(|| format!("Failed to write JSON to {}", path.display()))?;
    writeln!(writer)
        .with_context(|| format!("Failed to write newline after JSON to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush output to {}", path.display()))?;
    Ok(())
}
