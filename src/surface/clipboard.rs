//! Clipboard surface: pipe markup to a host clipboard tool.
//!
//! Detection prefers Wayland, then X11, then tmux, mirroring what terminal
//! tools on each platform expect. A configured command overrides detection.

use std::io::Write;
use std::process::{Command, Stdio};

use super::SurfaceError;
use crate::convert::SvgMarkup;

/// Detected (or configured) clipboard backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardProvider {
    Pasteboard,
    Wayland,
    XClip,
    XSel,
    Win32Yank,
    Tmux,
    /// User-configured command; markup is piped to its stdin.
    Custom(String),
    None,
}

fn binary_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

#[cfg(not(windows))]
fn env_var_is_set(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

impl ClipboardProvider {
    /// Detect a provider for the current host, or take the configured
    /// override command.
    pub fn detect(configured: Option<&str>) -> Self {
        if let Some(command) = configured {
            return Self::Custom(command.to_string());
        }
        Self::default()
    }

    /// Command line for this provider, if one is available.
    fn command(&self) -> Option<(String, Vec<String>)> {
        let (program, args): (&str, &[&str]) = match self {
            Self::Pasteboard => ("pbcopy", &[]),
            Self::Wayland => ("wl-copy", &["--type", "text/plain"]),
            Self::XClip => ("xclip", &["-i", "-selection", "clipboard"]),
            Self::XSel => ("xsel", &["-i", "-b"]),
            Self::Win32Yank => ("win32yank.exe", &["-i"]),
            Self::Tmux => ("tmux", &["load-buffer", "-w", "-"]),
            Self::Custom(command) => {
                let mut parts = command.split_whitespace().map(str::to_string);
                let program = parts.next()?;
                return Some((program, parts.collect()));
            }
            Self::None => return None,
        };
        Some((
            program.to_string(),
            args.iter().map(|s| s.to_string()).collect(),
        ))
    }

    /// Human-readable name for error reporting and logs.
    pub fn name(&self) -> &str {
        match self {
            Self::Pasteboard => "pbcopy",
            Self::Wayland => "wl-copy",
            Self::XClip => "xclip",
            Self::XSel => "xsel",
            Self::Win32Yank => "win32yank",
            Self::Tmux => "tmux",
            Self::Custom(command) => command,
            Self::None => "none",
        }
    }

    /// Write the markup to the clipboard. Fire-and-forget from the caller's
    /// point of view: failure is reported, never retried.
    pub fn copy(&self, markup: &SvgMarkup) -> Result<(), SurfaceError> {
        let Some((program, args)) = self.command() else {
            return Err(SurfaceError::NoClipboard);
        };

        let io = |source| SurfaceError::Clipboard {
            provider: self.name().to_string(),
            source,
        };

        let mut child = Command::new(&program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(io)?;

        if let Some(stdin) = child.stdin.as_mut() {
            stdin.write_all(markup.as_bytes()).map_err(io)?;
        }

        let status = child.wait().map_err(io)?;
        if !status.success() {
            return Err(SurfaceError::ClipboardStatus {
                provider: self.name().to_string(),
                status,
            });
        }
        Ok(())
    }
}

impl Default for ClipboardProvider {
    #[cfg(windows)]
    fn default() -> Self {
        if binary_exists("win32yank.exe") {
            Self::Win32Yank
        } else {
            Self::None
        }
    }

    #[cfg(target_os = "macos")]
    fn default() -> Self {
        if env_var_is_set("TMUX") && binary_exists("tmux") {
            Self::Tmux
        } else if binary_exists("pbcopy") {
            Self::Pasteboard
        } else {
            Self::None
        }
    }

    #[cfg(not(any(windows, target_os = "macos")))]
    fn default() -> Self {
        if env_var_is_set("WAYLAND_DISPLAY") && binary_exists("wl-copy") {
            Self::Wayland
        } else if env_var_is_set("DISPLAY") && binary_exists("xclip") {
            Self::XClip
        } else if env_var_is_set("DISPLAY") && binary_exists("xsel") {
            Self::XSel
        } else if env_var_is_set("TMUX") && binary_exists("tmux") {
            Self::Tmux
        } else if binary_exists("win32yank.exe") {
            Self::Win32Yank
        } else {
            Self::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_command_overrides_detection() {
        let provider = ClipboardProvider::detect(Some("my-clip --stdin"));
        assert_eq!(provider, ClipboardProvider::Custom("my-clip --stdin".into()));

        let (program, args) = provider.command().unwrap();
        assert_eq!(program, "my-clip");
        assert_eq!(args, vec!["--stdin".to_string()]);
    }

    #[test]
    fn test_none_provider_reports_no_clipboard() {
        let err = ClipboardProvider::None
            .copy(&SvgMarkup::from("<svg/>"))
            .unwrap_err();
        assert!(matches!(err, SurfaceError::NoClipboard));
    }

    #[test]
    fn test_custom_copy_pipes_stdin() {
        // `cat` consumes stdin and exits 0; enough to exercise the pipe.
        if !binary_exists("cat") {
            return;
        }
        let provider = ClipboardProvider::Custom("cat".into());
        provider.copy(&SvgMarkup::from("<svg/>")).unwrap();
    }

    #[test]
    fn test_missing_custom_binary_is_reported() {
        let provider = ClipboardProvider::Custom("desvg-no-such-tool".into());
        let err = provider.copy(&SvgMarkup::from("<svg/>")).unwrap_err();
        assert!(matches!(err, SurfaceError::Clipboard { .. }));
    }

    #[test]
    fn test_failing_tool_status_is_reported() {
        if !binary_exists("false") {
            return;
        }
        let provider = ClipboardProvider::Custom("false".into());
        let err = provider.copy(&SvgMarkup::from("<svg/>")).unwrap_err();
        // `false` may exit before reading stdin, so either the broken pipe
        // or the nonzero status surfaces; both are clipboard failures.
        assert!(matches!(
            err,
            SurfaceError::ClipboardStatus { .. } | SurfaceError::Clipboard { .. }
        ));
    }
}
