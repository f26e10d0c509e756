//! Output surfaces: where settled markup goes.
//!
//! Preview, clipboard and download are host collaborators, not part of the
//! conversion core. Their failures are reported and never retried.

pub mod clipboard;
mod download;
mod preview;

pub use clipboard::ClipboardProvider;
pub use download::{DOWNLOAD_FILENAME, SVG_MIME, save};
pub use preview::print_preview;

use std::path::PathBuf;
use thiserror::Error;

/// Host-operation errors (collaborator-reported, not produced by the core).
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no clipboard tool found (install wl-copy, xclip, xsel or pbcopy)")]
    NoClipboard,

    #[error("clipboard write via `{provider}` failed")]
    Clipboard {
        provider: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clipboard tool `{provider}` exited with {status}")]
    ClipboardStatus {
        provider: String,
        status: std::process::ExitStatus,
    },

    #[error("could not save `{}`", .path.display())]
    Download {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
