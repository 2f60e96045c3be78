//! Live preview of a markdown file on disk.
//!
//! The file is loaded into an [`EditorBuffer`] and rendered into a visible
//! [`PreviewPane`]. Once [`LivePreview::watch`] is called, saves are picked
//! up from the file's directory (editors often save by renaming a temp file
//! over the original) and re-rendered after a quiet period.

use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use super::{PreviewPane, Renderer, refresh_preview};
use crate::editor::EditorBuffer;
use crate::surface::TextSurface;

pub struct LivePreview<R> {
    path: PathBuf,
    buffer: EditorBuffer,
    pane: PreviewPane,
    renderer: R,
    changes: Option<FileChanges>,
}

impl<R: Renderer> LivePreview<R> {
    /// Load `path` and render it once.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn open(path: impl Into<PathBuf>, renderer: R) -> Result<Self> {
        let path = path.into();
        let text = read(&path)?;
        let mut preview = Self {
            path,
            buffer: EditorBuffer::from_text(&text),
            pane: PreviewPane::visible(),
            renderer,
            changes: None,
        };
        refresh_preview(&preview.buffer, &mut preview.pane, &preview.renderer);
        Ok(preview)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The latest rendered HTML.
    pub fn html(&self) -> &str {
        self.pane.html().unwrap_or_default()
    }

    /// Re-read the file; true if its text changed and was re-rendered.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn reload(&mut self) -> Result<bool> {
        let text = read(&self.path)?;
        self.buffer.set_value(&text);
        if !self.buffer.is_dirty() {
            return Ok(false);
        }
        self.buffer.mark_clean();
        refresh_preview(&self.buffer, &mut self.pane, &self.renderer);
        Ok(true)
    }

    /// Start watching the file, treating a burst of events as one save once
    /// `debounce` has passed without another.
    ///
    /// # Errors
    /// Returns an error if the platform watcher cannot be created.
    pub fn watch(&mut self, debounce: Duration) -> notify::Result<()> {
        self.changes = Some(FileChanges::new(&self.path, debounce)?);
        tracing::debug!(file = %self.path.display(), "watching markdown source");
        Ok(())
    }

    /// Reload if a save has settled; true when new HTML is ready.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, which can happen briefly
    /// during an atomic save.
    pub fn poll(&mut self) -> Result<bool> {
        if self.changes.as_mut().is_some_and(FileChanges::settled) {
            self.reload()
        } else {
            Ok(false)
        }
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

struct FileChanges {
    _watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
    name: OsString,
    debounce: Duration,
    settle_at: Option<Instant>,
}

impl FileChanges {
    fn new(path: &Path, debounce: Duration) -> notify::Result<Self> {
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path.file_name().map(OsString::from).unwrap_or_default();

        let (tx, events) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;

        Ok(Self {
            _watcher: watcher,
            events,
            name,
            debounce,
            settle_at: None,
        })
    }

    fn settled(&mut self) -> bool {
        while let Ok(event) = self.events.try_recv() {
            match event {
                Ok(ev) if touches(&ev, &self.name) => {
                    self.settle_at = Some(Instant::now() + self.debounce);
                }
                Ok(_) => {}
                Err(err) => tracing::warn!(%err, "file watcher error"),
            }
        }
        match self.settle_at {
            Some(at) if Instant::now() >= at => {
                self.settle_at = None;
                true
            }
            _ => false,
        }
    }
}

/// Events without paths are kept; a reload of unchanged text is a no-op.
fn touches(event: &Event, name: &OsStr) -> bool {
    event.paths.is_empty()
        || event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(name))
}
