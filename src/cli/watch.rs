//! Watch command: debounced conversion driven by a file or by stdin lines.
//!
//! Architecture (same shape as a watcher/debouncer actor):
//!
//! ```text
//! source (notify | stdin) → bridge thread → async channel → select loop
//!                                                │
//!                     controller deadline ───────┘ (quiet period elapsed)
//! ```
//!
//! The select loop races new input against the controller's armed deadline;
//! whichever wins decides whether the pending conversion is superseded or
//! settles and fans out to the listeners.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::event::ModifyKind;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::cli::WatchArgs;
use crate::config::Config;
use crate::controller::InputController;
use crate::convert::ConversionResult;
use crate::state;
use crate::surface::{self, ClipboardProvider, SVG_MIME};
use crate::{debug, log, logger};

/// Run the watch command.
pub fn run(args: &WatchArgs, config: &Config) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("could not start async runtime")?;
    runtime.block_on(run_loop(args, config))
}

async fn run_loop(args: &WatchArgs, config: &Config) -> Result<()> {
    let debounce = args
        .debounce_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.debounce());

    let mut controller = InputController::with_debounce(debounce);
    wire_listeners(&mut controller, args, config);

    let clipboard = args
        .copy
        .then(|| ClipboardProvider::detect(config.clipboard.command.as_deref()));

    let (tx, mut rx) = mpsc::channel::<String>(16);

    // The watcher handle must stay alive for the duration of the loop.
    let _watcher = match &args.path {
        Some(path) if path.as_os_str() != "-" => {
            let initial = std::fs::read_to_string(path)
                .with_context(|| format!("could not read `{}`", path.display()))?;
            log!("watch"; "watching {} (debounce {} ms)", path.display(), debounce.as_millis());
            controller.on_input(initial);
            Some(spawn_file_source(path.clone(), tx)?)
        }
        _ => {
            log!("watch"; "reading data URLs from stdin, one per line (debounce {} ms)", debounce.as_millis());
            spawn_stdin_source(tx);
            None
        }
    };

    loop {
        if state::is_shutdown() {
            controller.dispose();
            log!("watch"; "shutting down");
            break;
        }

        tokio::select! {
            biased;
            received = rx.recv() => match received {
                Some(text) => {
                    debug!("watch"; "input: {} bytes", text.len());
                    controller.on_input(text);
                }
                None => {
                    // Source closed: let a pending conversion settle, then stop.
                    if controller.is_pending() {
                        tokio::time::sleep(controller.sleep_duration()).await;
                        settle(&mut controller, clipboard.as_ref());
                    }
                    controller.dispose();
                    break;
                }
            },
            _ = tokio::time::sleep(controller.sleep_duration()) => {
                settle(&mut controller, clipboard.as_ref());
            }
            // Shutdown poll tick; keeps the loop responsive while idle.
            _ = tokio::time::sleep(Duration::from_millis(100)) => {}
        }
    }

    Ok(())
}

/// Settle a ready conversion and handle the clipboard side effect.
///
/// The clipboard is driven here rather than in a listener because the copy
/// acknowledgment lives on the controller.
fn settle(controller: &mut InputController, clipboard: Option<&ClipboardProvider>) {
    let markup = match controller.take_if_ready() {
        Some(Ok(markup)) => markup.clone(),
        _ => return,
    };

    if let Some(provider) = clipboard {
        match provider.copy(&markup) {
            Ok(()) => {
                controller.mark_copied();
                log!("copy"; "copied {} bytes via {}", markup.len(), provider.name());
            }
            Err(err) => log!("error"; "{err}"),
        }
    }
}

/// Register the view listeners: preview/status, then auto-save.
fn wire_listeners(controller: &mut InputController, args: &WatchArgs, config: &Config) {
    let no_preview = args.no_preview;
    controller.subscribe(Box::new(move |result: &ConversionResult| match result {
        Ok(markup) => {
            if no_preview {
                logger::status().success(&format!("converted ({} bytes)", markup.len()));
            } else {
                surface::print_preview(markup);
                log!("convert"; "ok ({} bytes)", markup.len());
                logger::status().detach();
            }
        }
        Err(err) => {
            if no_preview {
                logger::status().error("conversion failed", &err.to_string());
            } else {
                log!("error"; "{err}");
                logger::status().detach();
            }
        }
    }));

    if args.save || args.output.is_some() {
        let path = args.output.clone().unwrap_or_else(|| config.output_path());
        controller.subscribe(Box::new(move |result: &ConversionResult| {
            if let Ok(markup) = result {
                match surface::save(markup, &path) {
                    Ok(written) => {
                        debug!("save"; "wrote {} ({})", written.display(), SVG_MIME);
                    }
                    Err(err) => log!("error"; "{err}"),
                }
            }
        }));
    }
}

/// Watch `path` for changes and forward its contents on every rewrite.
///
/// notify's callback is sync, so events cross a std channel to a bridge
/// thread that re-reads the file and feeds the async channel.
fn spawn_file_source(path: PathBuf, tx: mpsc::Sender<String>) -> Result<RecommendedWatcher> {
    let (notify_tx, notify_rx) = std::sync::mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })?;

    // Watch the parent directory: editors replace files on save, which
    // drops the watch on the file itself.
    let watch_root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();
    watcher.watch(&watch_root, RecursiveMode::NonRecursive)?;

    let target = path.canonicalize().unwrap_or_else(|_| path.clone());
    std::thread::spawn(move || {
        while let Ok(result) = notify_rx.recv() {
            let event = match result {
                Ok(event) => event,
                Err(err) => {
                    log!("watch"; "notify error: {}", err);
                    continue;
                }
            };

            if !is_content_change(&event.kind) {
                continue;
            }
            let concerns_target = event.paths.iter().any(|p| {
                p == &path || p.canonicalize().ok().as_deref() == Some(target.as_path())
            });
            if !concerns_target {
                continue;
            }

            debug!("watch"; "raw notify: {:?} {:?}", event.kind, event.paths);
            match std::fs::read_to_string(&path) {
                Ok(text) => {
                    if tx.blocking_send(text).is_err() {
                        break; // Receiver dropped
                    }
                }
                Err(err) => log!("watch"; "could not re-read {}: {}", path.display(), err),
            }
        }
    });

    Ok(watcher)
}

/// Content-bearing event kinds; metadata-only changes are mtime/chmod noise.
fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

/// Forward stdin lines, one input event per line.
fn spawn_stdin_source(tx: mpsc::Sender<String>) {
    std::thread::spawn(move || {
        use std::io::BufRead;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.blocking_send(line).is_err() {
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_change_classification() {
        use notify::event::{CreateKind, DataChange, MetadataKind, RemoveKind};

        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Data(
            DataChange::Any
        ))));
        assert!(!is_content_change(&EventKind::Modify(
            ModifyKind::Metadata(MetadataKind::Any)
        )));
        assert!(!is_content_change(&EventKind::Remove(RemoveKind::File)));
    }

    #[tokio::test]
    async fn test_loop_settles_last_input_only() {
        // Drive the controller the way run_loop does, with channel input and
        // a short debounce, and check only the final value settles.
        let mut controller = InputController::with_debounce(Duration::from_millis(20));
        let decoded = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&decoded);
        controller.subscribe(Box::new(move |result: &ConversionResult| {
            sink.lock().push(result.clone());
        }));

        let (tx, mut rx) = mpsc::channel::<String>(16);
        tx.send("data:image/svg+xml,%3Cfirst%2F%3E".to_string())
            .await
            .unwrap();
        tx.send("data:image/svg+xml,%3Csecond%2F%3E".to_string())
            .await
            .unwrap();
        drop(tx);

        loop {
            tokio::select! {
                biased;
                received = rx.recv() => match received {
                    Some(text) => controller.on_input(text),
                    None => {
                        if controller.is_pending() {
                            tokio::time::sleep(controller.sleep_duration()).await;
                            settle(&mut controller, None);
                        }
                        break;
                    }
                },
                _ = tokio::time::sleep(controller.sleep_duration()) => {
                    settle(&mut controller, None);
                }
            }
        }

        let decoded = decoded.lock();
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].as_ref().unwrap().as_str(), "<second/>");
    }
}
