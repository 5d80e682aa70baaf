//! Per-URL icon image cache that serializes drawing against image loads.
//!
//! Each icon URL moves through `unrequested -> loading -> ready` (or
//! `failed`). While a URL is loading, draw requests for it are queued; when
//! the load completes the queue is handed back to the layer in FIFO order.
//! Requests made after completion are answered immediately.

use super::loader::{CompletionQueue, IconImage, ImageLoader};
use crate::marker::MarkerId;
use canvas_markers_types::point::ScreenPoint;
use rustc_hash::FxHashMap;
use std::rc::Rc;

/// A draw waiting for its icon to finish loading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueuedDraw {
    pub marker: MarkerId,
    pub position: ScreenPoint,
}

/// What the caller should do with a draw request.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawDecision {
    /// The image is loaded: draw now.
    Draw(Rc<IconImage>),
    /// The draw was queued behind an in-flight load.
    Queued,
    /// The icon failed to load; the marker stays undrawn.
    Skipped,
}

/// Load state of one icon URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconStatus {
    Loading,
    Ready,
    Failed,
}

/// A load that completed since the last drain, with the draws it released.
#[derive(Debug, Clone)]
pub struct FlushedIcon {
    pub url: Rc<str>,
    /// `None` when the load failed.
    pub image: Option<Rc<IconImage>>,
    pub queued: Vec<QueuedDraw>,
}

enum IconState {
    Loading(Vec<QueuedDraw>),
    Ready(Rc<IconImage>),
    Failed,
}

/// Deduplicating icon image cache keyed by URL.
pub struct IconCache {
    entries: FxHashMap<Rc<str>, IconState>,
    completions: CompletionQueue,
    loads_requested: u64,
}

impl IconCache {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            completions: CompletionQueue::new(),
            loads_requested: 0,
        }
    }

    /// Ask to draw `marker` at `position` with the icon at `url`.
    ///
    /// `handle` is the marker's cached image handle: the URL key it was last
    /// resolved against. A handle for a different URL (the marker's icon was
    /// swapped) is discarded first.
    ///
    /// - no handle, URL unknown: start a load and queue the draw
    /// - no handle, URL loading: queue the draw
    /// - URL ready: draw now
    /// - handle set, URL still loading: refresh the queued position
    pub fn request_draw<L>(
        &mut self,
        marker: MarkerId,
        url: &str,
        handle: &mut Option<Rc<str>>,
        position: ScreenPoint,
        loader: &mut L,
    ) -> DrawDecision
    where
        L: ImageLoader + ?Sized,
    {
        if handle.as_deref() != Some(url) || !self.entries.contains_key(url) {
            *handle = None;
        }

        let Some(key) = self.entries.get_key_value(url).map(|(key, _)| key.clone()) else {
            let key: Rc<str> = Rc::from(url);
            self.entries.insert(
                key.clone(),
                IconState::Loading(vec![QueuedDraw { marker, position }]),
            );
            *handle = Some(key);
            self.loads_requested += 1;
            log::trace!("requesting icon image {}", url);
            loader.load(url, self.completions.notifier(url));
            return DrawDecision::Queued;
        };

        let had_handle = handle.is_some();
        *handle = Some(key);

        match self.entries.get_mut(url) {
            Some(IconState::Ready(image)) => DrawDecision::Draw(image.clone()),
            Some(IconState::Loading(queue)) => {
                match queue.iter_mut().find(|q| q.marker == marker) {
                    Some(queued) if had_handle => queued.position = position,
                    _ => queue.push(QueuedDraw { marker, position }),
                }
                DrawDecision::Queued
            }
            Some(IconState::Failed) | None => DrawDecision::Skipped,
        }
    }

    /// Apply every load completion delivered so far.
    pub fn drain_completions(&mut self) -> Vec<FlushedIcon> {
        let mut flushed = Vec::new();

        for event in self.completions.drain() {
            let url = event.url.as_str();
            let Some(key) = self.entries.get_key_value(url).map(|(key, _)| key.clone()) else {
                continue;
            };
            let Some(state) = self.entries.get_mut(url) else {
                continue;
            };

            if !matches!(state, IconState::Loading(_)) {
                continue;
            }

            let next = match event.result {
                Ok(image) => IconState::Ready(Rc::new(image)),
                Err(reason) => {
                    log::warn!("icon image {} failed to load: {}", event.url, reason);
                    IconState::Failed
                }
            };

            let image = match &next {
                IconState::Ready(image) => Some(image.clone()),
                _ => None,
            };

            let queued = match std::mem::replace(state, next) {
                IconState::Loading(queue) => queue,
                _ => Vec::new(),
            };

            flushed.push(FlushedIcon {
                url: key,
                image,
                queued,
            });
        }

        flushed
    }

    pub fn status(&self, url: &str) -> Option<IconStatus> {
        self.entries.get(url).map(|state| match state {
            IconState::Loading(_) => IconStatus::Loading,
            IconState::Ready(_) => IconStatus::Ready,
            IconState::Failed => IconStatus::Failed,
        })
    }

    /// Number of distinct loads ever started.
    pub fn loads_requested(&self) -> u64 {
        self.loads_requested
    }

    /// Count of URLs in each state: (loading, ready, failed).
    pub fn counts(&self) -> (usize, usize, usize) {
        self.entries
            .values()
            .fold((0, 0, 0), |(loading, ready, failed), state| match state {
                IconState::Loading(_) => (loading + 1, ready, failed),
                IconState::Ready(_) => (loading, ready + 1, failed),
                IconState::Failed => (loading, ready, failed + 1),
            })
    }
}

impl Default for IconCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::loader::ImageLoadNotifier;

    #[derive(Default)]
    struct PendingLoader {
        pending: Vec<ImageLoadNotifier>,
    }

    impl ImageLoader for PendingLoader {
        fn load(&mut self, _url: &str, notifier: ImageLoadNotifier) {
            self.pending.push(notifier);
        }
    }

    fn image() -> IconImage {
        IconImage::new(8, 8, vec![255u8; 8 * 8 * 4])
    }

    fn at(x: f64) -> ScreenPoint {
        ScreenPoint::new(x, 0.0)
    }

    #[test]
    fn test_shared_url_loads_once() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let (mut h1, mut h2) = (None, None);

        let d1 = cache.request_draw(MarkerId(1), "pin.png", &mut h1, at(1.0), &mut loader);
        let d2 = cache.request_draw(MarkerId(2), "pin.png", &mut h2, at(2.0), &mut loader);
        assert_eq!(d1, DrawDecision::Queued);
        assert_eq!(d2, DrawDecision::Queued);
        assert_eq!(loader.pending.len(), 1);
        assert_eq!(cache.loads_requested(), 1);
        assert_eq!(cache.status("pin.png"), Some(IconStatus::Loading));
        assert_eq!(h1.as_deref(), Some("pin.png"));
        assert_eq!(h2.as_deref(), Some("pin.png"));

        loader.pending.pop().unwrap().loaded(image());
        let flushed = cache.drain_completions();
        assert_eq!(flushed.len(), 1);
        assert!(flushed[0].image.is_some());
        let order: Vec<MarkerId> = flushed[0].queued.iter().map(|q| q.marker).collect();
        assert_eq!(order, vec![MarkerId(1), MarkerId(2)]);
        assert_eq!(cache.status("pin.png"), Some(IconStatus::Ready));
    }

    #[test]
    fn test_ready_url_draws_synchronously() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let mut h1 = None;
        cache.request_draw(MarkerId(1), "pin.png", &mut h1, at(1.0), &mut loader);
        loader.pending.pop().unwrap().loaded(image());
        cache.drain_completions();

        let mut h2 = None;
        let decision = cache.request_draw(MarkerId(2), "pin.png", &mut h2, at(2.0), &mut loader);
        assert!(matches!(decision, DrawDecision::Draw(_)));
        let decision = cache.request_draw(MarkerId(1), "pin.png", &mut h1, at(3.0), &mut loader);
        assert!(matches!(decision, DrawDecision::Draw(_)));
        assert!(loader.pending.is_empty());
        assert!(cache.drain_completions().is_empty());
    }

    #[test]
    fn test_repeat_request_while_loading_refreshes_position() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let mut handle = None;
        cache.request_draw(MarkerId(1), "pin.png", &mut handle, at(1.0), &mut loader);
        cache.request_draw(MarkerId(1), "pin.png", &mut handle, at(9.0), &mut loader);

        loader.pending.pop().unwrap().loaded(image());
        let flushed = cache.drain_completions();
        assert_eq!(flushed[0].queued, vec![QueuedDraw { marker: MarkerId(1), position: at(9.0) }]);
    }

    #[test]
    fn test_failed_load_skips_marker() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let mut handle = None;
        cache.request_draw(MarkerId(1), "missing.png", &mut handle, at(1.0), &mut loader);
        loader.pending.pop().unwrap().failed("404 Not Found");

        let flushed = cache.drain_completions();
        assert_eq!(flushed.len(), 1);
        assert!(flushed[0].image.is_none());
        assert_eq!(cache.status("missing.png"), Some(IconStatus::Failed));

        let decision = cache.request_draw(MarkerId(1), "missing.png", &mut handle, at(1.0), &mut loader);
        assert_eq!(decision, DrawDecision::Skipped);
        let mut other = None;
        let decision = cache.request_draw(MarkerId(2), "missing.png", &mut other, at(1.0), &mut loader);
        assert_eq!(decision, DrawDecision::Skipped);
        assert!(loader.pending.is_empty());
        assert_eq!(cache.counts(), (0, 0, 1));
    }

    #[test]
    fn test_swapped_icon_discards_handle() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let mut handle = None;
        cache.request_draw(MarkerId(1), "a.png", &mut handle, at(0.0), &mut loader);
        cache.request_draw(MarkerId(1), "b.png", &mut handle, at(0.0), &mut loader);
        assert_eq!(handle.as_deref(), Some("b.png"));
        assert_eq!(loader.pending.len(), 2);
        assert_eq!(cache.counts(), (2, 0, 0));
    }

    #[test]
    fn test_duplicate_completion_ignored() {
        let mut cache = IconCache::new();
        let mut loader = PendingLoader::default();
        let mut handle = None;
        cache.request_draw(MarkerId(1), "a.png", &mut handle, at(0.0), &mut loader);
        let notifier = loader.pending.pop().unwrap();
        notifier.clone().loaded(image());
        notifier.failed("late failure");

        let flushed = cache.drain_completions();
        assert_eq!(flushed.len(), 1);
        assert_eq!(cache.status("a.png"), Some(IconStatus::Ready));
    }
}
