//! Save markup to disk (the CLI's "download" surface).

use std::fs;
use std::path::{Path, PathBuf};

use super::SurfaceError;
use crate::convert::SvgMarkup;

/// Default saved file name, matching the original tool's download.
pub const DOWNLOAD_FILENAME: &str = "converted-svg.svg";

/// MIME type of saved files (informational; the extension carries it here).
pub const SVG_MIME: &str = "image/svg+xml";

/// Write the markup byte-identical to `path`, creating parent directories.
///
/// Returns the path written to.
pub fn save(markup: &SvgMarkup, path: &Path) -> Result<PathBuf, SurfaceError> {
    let io = |source| SurfaceError::Download {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(io)?;
    }

    fs::write(path, markup.as_bytes()).map_err(io)?;
    Ok(path.to_path_buf())
}
