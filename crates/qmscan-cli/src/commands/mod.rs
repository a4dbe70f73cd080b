pub mod energy;
pub mod gbsa;
pub mod neb;
pub mod orca;
pub mod scan;

use crate::error::{CliError, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Creates `path` (and its parent directories), hands a buffered writer to `body`
/// and flushes it.
pub(crate) fn write_output<F>(path: &Path, body: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    let wrap = |source| CliError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(wrap)?;
    }
    let mut writer = BufWriter::new(File::create(path).map_err(wrap)?);
    body(&mut writer)?;
    writer.flush().map_err(wrap)
}
