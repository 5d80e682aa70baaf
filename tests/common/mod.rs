//! Recording collaborators shared by the integration tests.

#![allow(dead_code)]

use canvas_markers::prelude::*;
use canvas_markers::render::{IconImage, ImageLoadNotifier};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Events fired on any marker, tagged with the marker's name.
pub type EventLog = Rc<RefCell<Vec<(String, MarkerEventKind)>>>;

pub fn event_log() -> EventLog {
    Rc::new(RefCell::new(Vec::new()))
}

pub struct TestMarker {
    pub name: String,
    pub at: LatLng,
    pub icon: IconOptions,
    pub interactive: bool,
    pub dragged: Cell<bool>,
    pub log: EventLog,
}

impl TestMarker {
    pub fn new(log: &EventLog, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            name: name.to_string(),
            at: LatLng::new(lat, lng),
            icon: IconOptions::new("pin.png", 10.0, 10.0),
            interactive: true,
            dragged: Cell::new(false),
            log: log.clone(),
        }
    }

    pub fn with_icon(mut self, icon: IconOptions) -> Self {
        self.icon = icon;
        self
    }

    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }

    pub fn shared(self) -> MarkerRef {
        Rc::new(self)
    }
}

impl Marker for TestMarker {
    fn lat_lng(&self) -> LatLng {
        self.at
    }

    fn icon(&self) -> &IconOptions {
        &self.icon
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn drag_moved(&self) -> bool {
        self.dragged.get()
    }

    fn fire(&self, event: &MarkerEvent) {
        self.log.borrow_mut().push((self.name.clone(), event.kind));
    }
}

pub fn pin(log: &EventLog, name: &str, lat: f64, lng: f64) -> MarkerRef {
    TestMarker::new(log, name, lat, lng).shared()
}

/// Equirectangular view: `scale` pixels per degree around `center`.
///
/// The default view is 400x200 px at 10 px/deg centered on (0, 0), so it
/// spans longitudes [-20, 20] and latitudes [-10, 10].
pub struct LinearViewport {
    pub width: f64,
    pub height: f64,
    pub center: LatLng,
    pub scale: f64,
    pub interacting: bool,
    /// Offset of the drawing surface relative to the container.
    pub layer_offset: ScreenPoint,
}

impl Default for LinearViewport {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 200.0,
            center: LatLng::new(0.0, 0.0),
            scale: 10.0,
            interacting: false,
            layer_offset: ScreenPoint::new(0.0, 0.0),
        }
    }
}

impl LinearViewport {
    pub fn pan_to(&mut self, lat: f64, lng: f64) {
        self.center = LatLng::new(lat, lng);
    }
}

impl ViewportProvider for LinearViewport {
    fn container_bounds(&self) -> ScreenBounds {
        ScreenBounds::from_size(self.width, self.height)
    }

    fn project(&self, at: LatLng) -> ScreenPoint {
        ScreenPoint::new(
            (at.lng - self.center.lng) * self.scale + self.width / 2.0,
            (self.center.lat - at.lat) * self.scale + self.height / 2.0,
        )
    }

    fn unproject(&self, point: ScreenPoint) -> LatLng {
        LatLng::new(
            self.center.lat - (point.y - self.height / 2.0) / self.scale,
            self.center.lng + (point.x - self.width / 2.0) / self.scale,
        )
    }

    fn container_to_layer_point(&self, point: ScreenPoint) -> ScreenPoint {
        point - self.layer_offset
    }

    fn is_interacting(&self) -> bool {
        self.interacting
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub top_left: ScreenPoint,
    pub size: IconSize,
    pub image_width: u32,
    /// Drawn between `begin_frame` and `end_frame`.
    pub in_frame: bool,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub draws: Vec<DrawCall>,
    pub frames: Vec<Option<ScreenBounds>>,
    pub frames_ended: usize,
    pub frame_open: bool,
    pub clears: usize,
    pub interactive_cursor: bool,
}

impl RecordingSurface {
    pub fn take_draws(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.draws)
    }

    pub fn drawn_at(&self) -> Vec<ScreenPoint> {
        self.draws.iter().map(|d| d.top_left).collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self) {
        self.clears += 1;
    }

    fn begin_frame(&mut self, clip: Option<&ScreenBounds>) {
        self.frames.push(clip.copied());
        self.frame_open = true;
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
        self.frame_open = false;
    }

    fn draw_image(&mut self, image: &IconImage, top_left: ScreenPoint, size: IconSize) {
        self.draws.push(DrawCall {
            top_left,
            size,
            image_width: image.width,
            in_frame: self.frame_open,
        });
    }

    fn set_interactive_cursor(&mut self, interactive: bool) {
        self.interactive_cursor = interactive;
    }
}

pub fn icon_image() -> IconImage {
    IconImage::new(10, 10, vec![0u8; 10 * 10 * 4])
}

/// Holds every load until the test completes it.
#[derive(Default)]
pub struct ManualLoader {
    pub requests: Vec<String>,
    pub pending: Vec<ImageLoadNotifier>,
}

impl ManualLoader {
    pub fn complete_all(&mut self) {
        for notifier in self.pending.drain(..) {
            notifier.loaded(icon_image());
        }
    }

    /// Complete the load of `url` with `image`.
    pub fn complete(&mut self, url: &str, image: IconImage) {
        if let Some(idx) = self.pending.iter().position(|n| n.url() == url) {
            self.pending.remove(idx).loaded(image);
        }
    }

    pub fn fail(&mut self, url: &str) {
        if let Some(idx) = self.pending.iter().position(|n| n.url() == url) {
            self.pending.remove(idx).failed("404 Not Found");
        }
    }
}

impl ImageLoader for ManualLoader {
    fn load(&mut self, url: &str, notifier: ImageLoadNotifier) {
        self.requests.push(url.to_string());
        self.pending.push(notifier);
    }
}

/// Completes every load inside the request.
#[derive(Default)]
pub struct ImmediateLoader {
    pub requests: Vec<String>,
}

impl ImageLoader for ImmediateLoader {
    fn load(&mut self, url: &str, notifier: ImageLoadNotifier) {
        self.requests.push(url.to_string());
        notifier.loaded(icon_image());
    }
}

pub type ManualLayer = MarkerLayer<LinearViewport, RecordingSurface, ManualLoader>;
pub type ImmediateLayer = MarkerLayer<LinearViewport, RecordingSurface, ImmediateLoader>;

pub fn manual_layer() -> ManualLayer {
    init_logging();
    LayerBuilder::new()
        .build_attached(
            LinearViewport::default(),
            RecordingSurface::default(),
            ManualLoader::default(),
        )
        .unwrap()
}

pub fn immediate_layer() -> ImmediateLayer {
    init_logging();
    LayerBuilder::new()
        .build_attached(
            LinearViewport::default(),
            RecordingSurface::default(),
            ImmediateLoader::default(),
        )
        .unwrap()
}

pub fn kinds_for(log: &EventLog, name: &str) -> Vec<MarkerEventKind> {
    log.borrow()
        .iter()
        .filter(|(n, _)| n == name)
        .map(|(_, kind)| *kind)
        .collect()
}
