//! Pasteboard sources for the link-capture shortcut

use std::collections::VecDeque;

use toaster_core::prelude::*;
use toaster_core::{is_link, Pasteboard};

/// The desktop clipboard, through arboard
///
/// A clipboard handle is opened per read so the type stays `Send` on every
/// platform.
#[cfg(feature = "system-pasteboard")]
#[derive(Debug, Default)]
pub struct SystemPasteboard;

#[cfg(feature = "system-pasteboard")]
impl SystemPasteboard {
    fn open() -> Result<arboard::Clipboard> {
        arboard::Clipboard::new().map_err(|e| Error::pasteboard(e.to_string()))
    }
}

#[cfg(feature = "system-pasteboard")]
impl Pasteboard for SystemPasteboard {
    fn take_url(&mut self) -> Option<String> {
        let mut clipboard = match Self::open() {
            Ok(clipboard) => clipboard,
            Err(e) => {
                warn!("{}", e);
                return None;
            }
        };

        let text = clipboard.get_text().ok();
        if let Err(e) = clipboard.clear() {
            debug!("Failed to clear clipboard: {}", e);
        }

        text.map(|t| t.trim().to_string()).filter(|t| is_link(t))
    }
}

/// A scripted pasteboard: each queued entry is what the next read sees
#[derive(Debug, Clone, Default)]
pub struct MemoryPasteboard {
    contents: VecDeque<Option<String>>,
    reads: usize,
}

impl MemoryPasteboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put text on the pasteboard; it is consumed by the next read
    pub fn copy(&mut self, text: impl Into<String>) {
        self.contents.push_back(Some(text.into()));
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

impl Pasteboard for MemoryPasteboard {
    fn take_url(&mut self) -> Option<String> {
        self.reads += 1;
        self.contents
            .pop_front()
            .flatten()
            .filter(|text| is_link(text))
    }
}
