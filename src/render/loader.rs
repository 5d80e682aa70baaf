//! Asynchronous icon image loading.
//!
//! The layer asks an [`ImageLoader`] for each distinct icon URL exactly once.
//! The loader reports back through the [`ImageLoadNotifier`] it was handed,
//! at any later point and from any thread. Completions are queued and only
//! applied when the layer drains them, never in the middle of a draw cycle.

use bytes::Bytes;
use std::sync::mpsc::{Receiver, Sender, TryRecvError, channel};

/// A decoded icon image ready to be blitted.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    pub width: u32,
    pub height: u32,
    /// Pixel data in whatever layout the drawing surface expects.
    pub data: Bytes,
}

impl IconImage {
    pub fn new(width: u32, height: u32, data: impl Into<Bytes>) -> Self {
        Self {
            width,
            height,
            data: data.into(),
        }
    }
}

/// Host facility that fetches and decodes icon images.
pub trait ImageLoader {
    /// Start loading `url`. Report the outcome through `notifier`, now or later.
    fn load(&mut self, url: &str, notifier: ImageLoadNotifier);
}

/// Outcome of one image load.
#[derive(Debug, Clone)]
pub struct ImageLoadEvent {
    pub url: String,
    pub result: std::result::Result<IconImage, String>,
}

/// One-shot completion handle for a single URL.
#[derive(Debug, Clone)]
pub struct ImageLoadNotifier {
    url: String,
    sender: Sender<ImageLoadEvent>,
}

impl ImageLoadNotifier {
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn loaded(self, image: IconImage) {
        self.complete(Ok(image));
    }

    pub fn failed(self, reason: impl Into<String>) {
        self.complete(Err(reason.into()));
    }

    /// Deliver the outcome. Dropped silently if the layer no longer exists.
    pub fn complete(self, result: std::result::Result<IconImage, String>) {
        let _ = self.sender.send(ImageLoadEvent {
            url: self.url,
            result,
        });
    }
}

/// Receiving side of the completion queue, owned by the icon cache.
pub(crate) struct CompletionQueue {
    sender: Sender<ImageLoadEvent>,
    receiver: Receiver<ImageLoadEvent>,
}

impl CompletionQueue {
    pub(crate) fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub(crate) fn notifier(&self, url: &str) -> ImageLoadNotifier {
        ImageLoadNotifier {
            url: url.to_string(),
            sender: self.sender.clone(),
        }
    }

    /// Everything delivered so far, in arrival order.
    pub(crate) fn drain(&self) -> Vec<ImageLoadEvent> {
        let mut events = Vec::new();
        loop {
            match self.receiver.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        events
    }
}
