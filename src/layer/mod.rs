//! The marker layer: membership, draw cycle and pointer dispatch.
//!
//! A [`MarkerLayer`] owns both spatial indexes, the icon cache, the group
//! registry and the hover state, and borrows nothing from the host except
//! through its three collaborators. Every mutating entry point takes
//! `&mut self`, so a draw cycle can never interleave with another one or with
//! an icon completion: completions wait in a queue until
//! [`process_image_loads`](MarkerLayer::process_image_loads) runs, which the
//! layer itself does at the end of each cycle and after each add.
//!
//! # Draw cycle
//!
//! 1. repack the geographic index if its churn ratio is reached
//! 2. query it with the viewport bounds and project the hits
//! 3. draw each hit (or queue it behind its icon load) in insertion order
//! 4. rebuild the screen index from the drawn footprints
//! 5. flush completed icon loads, still inside the frame

pub mod groups;
pub mod hit;
pub mod stats;

pub use groups::GroupRegistry;
pub use hit::{HitTester, HoverTransition};
pub use stats::LayerStats;

use crate::compute::spatial::{GeoIndex, ScreenIndex, SpatialEntry};
use crate::compute::validation::{validate_marker, validate_markers};
use crate::config::LayerConfig;
use crate::error::{LayerError, Result};
use crate::events::{MarkerEvent, MarkerEventKind, PointerEvent, PointerKind, ViewEvent};
use crate::marker::{Marker, MarkerId, MarkerRef, marker_address};
use crate::render::{
    DrawDecision, DrawingSurface, IconCache, IconImage, ImageLoader, ViewportProvider, cull,
};
use canvas_markers_types::bounds::{GeoBounds, ScreenBounds};
use canvas_markers_types::icon::IconOptions;
use canvas_markers_types::point::{LatLng, ScreenPoint};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;
use std::rc::Rc;

/// Per-marker bookkeeping kept next to the host's handle.
struct MarkerSlot {
    marker: MarkerRef,
    group: Rc<str>,
    /// Coordinate the marker was indexed at.
    lat_lng: LatLng,
    /// Icon URL the cached image handle was resolved against.
    image: Option<Rc<str>>,
}

/// A single-surface layer drawing many point markers.
///
/// Generic over the host's viewport (`V`), drawing surface (`S`) and image
/// loader (`L`). Build one with [`LayerBuilder`](crate::LayerBuilder).
pub struct MarkerLayer<V, S, L> {
    config: LayerConfig,
    viewport: Option<V>,
    surface: S,
    loader: L,
    geo: GeoIndex,
    screen: ScreenIndex,
    icons: IconCache,
    groups: GroupRegistry,
    hit: HitTester,
    slots: FxHashMap<MarkerId, MarkerSlot>,
    by_address: FxHashMap<usize, MarkerId>,
    next_id: u64,
    last_bounds: Option<GeoBounds>,
}

impl<V, S, L> MarkerLayer<V, S, L>
where
    V: ViewportProvider,
    S: DrawingSurface,
    L: ImageLoader,
{
    /// Create a detached layer. `config` must already be validated.
    pub(crate) fn with_config(config: LayerConfig, surface: S, loader: L) -> Self {
        Self {
            geo: GeoIndex::new(config.rebuild_ratio),
            config,
            viewport: None,
            surface,
            loader,
            screen: ScreenIndex::new(),
            icons: IconCache::new(),
            groups: GroupRegistry::new(),
            hit: HitTester::new(),
            slots: FxHashMap::default(),
            by_address: FxHashMap::default(),
            next_id: 0,
            last_bounds: None,
        }
    }

    /// Detached layer with the default configuration.
    pub fn new(surface: S, loader: L) -> Self {
        Self::with_config(LayerConfig::default(), surface, loader)
    }

    // ---- attachment -------------------------------------------------------

    /// Attach to a map view and draw everything currently visible.
    pub fn on_add(&mut self, viewport: V) {
        self.viewport = Some(viewport);
        self.redraw();
    }

    /// Detach from the map view, returning it. Markers stay indexed.
    pub fn on_remove(&mut self) -> Option<V> {
        let viewport = self.viewport.take()?;
        self.screen.clear();
        self.reset_hover();
        self.surface.clear();
        self.last_bounds = None;
        Some(viewport)
    }

    pub fn is_attached(&self) -> bool {
        self.viewport.is_some()
    }

    // ---- membership -------------------------------------------------------

    /// Add one marker to `group` (or the default group).
    ///
    /// The marker is validated before anything is indexed. If the layer is
    /// attached and the marker is inside the current view it is drawn
    /// immediately.
    pub fn add_marker(&mut self, marker: MarkerRef, group: Option<&str>) -> Result<MarkerId> {
        validate_marker(marker.as_ref())?;
        if self.by_address.contains_key(&marker_address(&marker)) {
            return Err(LayerError::DuplicateMarker);
        }

        let lat_lng = marker.lat_lng();
        let id = self.register(marker, lat_lng, group);
        self.geo.insert(SpatialEntry::point(id, lat_lng));

        self.draw_if_visible(&[id]);
        Ok(id)
    }

    /// Add a batch of markers to one group.
    ///
    /// The whole batch is validated first; on error nothing is added. Large
    /// batches are bulk loaded into the geographic index.
    pub fn add_markers<I>(&mut self, markers: I, group: Option<&str>) -> Result<Vec<MarkerId>>
    where
        I: IntoIterator<Item = MarkerRef>,
    {
        let markers: Vec<MarkerRef> = markers.into_iter().collect();
        if markers.is_empty() {
            return Ok(Vec::new());
        }

        validate_markers(markers.iter().map(|m| m.as_ref() as &dyn Marker))?;

        let mut seen = FxHashSet::default();
        for (idx, marker) in markers.iter().enumerate() {
            let address = marker_address(marker);
            if self.by_address.contains_key(&address) || !seen.insert(address) {
                log::debug!("rejecting batch: marker at index {} is a duplicate", idx);
                return Err(LayerError::DuplicateMarker);
            }
        }

        let mut ids = Vec::with_capacity(markers.len());
        let mut entries = Vec::with_capacity(markers.len());
        for marker in markers {
            let lat_lng = marker.lat_lng();
            let id = self.register(marker, lat_lng, group);
            entries.push(SpatialEntry::point(id, lat_lng));
            ids.push(id);
        }

        self.geo.extend(entries);
        log::debug!("added {} markers ({} total)", ids.len(), self.geo.total());

        self.draw_if_visible(&ids);
        Ok(ids)
    }

    /// Remove a marker. Unknown markers are ignored.
    ///
    /// With `redraw` the surface is redrawn right away; otherwise the marker
    /// may stay painted until the next cycle, though it no longer hit-tests.
    pub fn remove_marker(&mut self, marker: &MarkerRef, redraw: bool) -> bool {
        match self.by_address.get(&marker_address(marker)).copied() {
            Some(id) => self.remove_marker_id(id, redraw),
            None => false,
        }
    }

    pub fn remove_marker_id(&mut self, id: MarkerId, redraw: bool) -> bool {
        let Some(slot) = self.slots.remove(&id) else {
            return false;
        };
        self.by_address.remove(&marker_address(&slot.marker));
        self.geo
            .remove(&SpatialEntry::point(id, slot.lat_lng), |a, b| a.marker == b.marker);
        self.groups.release(&slot.group);
        self.forget_on_screen(id);

        if redraw {
            self.redraw();
        }
        true
    }

    /// Remove every marker of `group` and redraw. Returns how many went.
    pub fn remove_group(&mut self, group: &str) -> usize {
        let removed = self.drop_group(group);
        if removed > 0 {
            self.redraw();
        }
        removed
    }

    /// Remove several groups with a single redraw.
    pub fn remove_groups<I, G>(&mut self, groups: I) -> usize
    where
        I: IntoIterator<Item = G>,
        G: AsRef<str>,
    {
        let removed: usize = groups
            .into_iter()
            .map(|group| self.drop_group(group.as_ref()))
            .sum();
        if removed > 0 {
            self.redraw();
        }
        removed
    }

    /// Remove every marker and wipe the surface. Loaded icons stay cached.
    pub fn clear_layers(&mut self) {
        let count = self.slots.len();
        self.geo.clear();
        self.screen.clear();
        self.slots.clear();
        self.by_address.clear();
        self.groups.clear();
        self.reset_hover();
        self.surface.clear();
        log::debug!("cleared {} markers", count);
    }

    // ---- drawing ----------------------------------------------------------

    /// Redraw the whole surface.
    pub fn redraw(&mut self) {
        self.draw_cycle(None);
    }

    /// Redraw with the surface clipped to `region`.
    pub fn redraw_region(&mut self, region: ScreenBounds) {
        self.draw_cycle(Some(region));
    }

    /// Redraw if `event` marks the end of a view change.
    pub fn handle_view_event(&mut self, event: ViewEvent) -> bool {
        if !event.triggers_redraw() || !self.is_attached() {
            return false;
        }
        self.redraw();
        true
    }

    /// Apply finished icon loads: draw every queued marker that is still a
    /// member, still on screen and still using that icon. Returns the number
    /// of markers drawn.
    ///
    /// Draws released by one call are painted in insertion order, whichever
    /// icon finished first.
    pub fn process_image_loads(&mut self) -> usize {
        let flushed = self.icons.drain_completions();
        if flushed.is_empty() {
            return 0;
        }

        let Some(viewport) = self.viewport.as_ref() else {
            return 0;
        };

        let mut ready = Vec::new();
        for icon in flushed {
            let Some(image) = icon.image else {
                continue;
            };
            for queued in icon.queued {
                let Some(slot) = self.slots.get(&queued.marker) else {
                    continue;
                };
                if !self.screen.contains(queued.marker)
                    || slot.marker.icon().url.as_str() != icon.url.as_ref()
                {
                    continue;
                }
                ready.push((queued, image.clone()));
            }
        }
        ready.sort_by_key(|(queued, _)| queued.marker);

        for (queued, image) in &ready {
            if let Some(slot) = self.slots.get(&queued.marker) {
                blit(viewport, &mut self.surface, image, slot.marker.icon(), queued.position);
            }
        }
        ready.len()
    }

    fn draw_cycle(&mut self, clip: Option<ScreenBounds>) {
        let Some(viewport) = self.viewport.as_ref() else {
            log::debug!("skipping redraw: layer is not attached");
            return;
        };

        self.geo.rebuild_if_needed();
        let bounds = viewport.bounds();

        self.surface.begin_frame(clip.as_ref());
        let slots = &self.slots;
        let culled = cull(&self.geo, &bounds, viewport, |id| {
            slots.get(&id).map(|slot| slot.marker.icon().size)
        });

        let mut footprints = Vec::with_capacity(culled.len());
        for marker in &culled {
            self.draw_marker(marker.marker, marker.position);
            footprints.push(marker.footprint);
        }

        self.screen.bulk_load(footprints);
        self.last_bounds = Some(bounds);

        // Loads that finished while drawing land inside the same frame
        self.process_image_loads();
        self.surface.end_frame();
    }

    fn draw_marker(&mut self, id: MarkerId, position: ScreenPoint) {
        let Some(viewport) = self.viewport.as_ref() else {
            return;
        };
        let Some(slot) = self.slots.get_mut(&id) else {
            return;
        };

        let icon = slot.marker.icon();
        let decision =
            self.icons
                .request_draw(id, &icon.url, &mut slot.image, position, &mut self.loader);
        if let DrawDecision::Draw(image) = decision {
            blit(viewport, &mut self.surface, &image, icon, position);
        }
    }

    /// Draw freshly added markers that fall inside the current view.
    fn draw_if_visible(&mut self, ids: &[MarkerId]) {
        let Some(viewport) = self.viewport.as_ref() else {
            return;
        };
        let bounds = viewport.bounds();

        let visible: Vec<(MarkerId, ScreenPoint, SpatialEntry)> = ids
            .iter()
            .filter_map(|id| {
                let slot = self.slots.get(id)?;
                if !bounds.contains(&slot.lat_lng) {
                    return None;
                }
                let position = viewport.project(slot.lat_lng);
                let footprint = SpatialEntry::footprint(*id, position, slot.marker.icon().size);
                Some((*id, position, footprint))
            })
            .collect();

        if visible.is_empty() {
            return;
        }

        let mut footprints = Vec::with_capacity(visible.len());
        for (id, position, footprint) in visible {
            self.draw_marker(id, position);
            footprints.push(footprint);
        }
        if footprints.len() == 1 {
            self.screen.insert(footprints[0]);
        } else {
            self.screen.extend(footprints);
        }

        self.process_image_loads();
    }

    // ---- pointer events ---------------------------------------------------

    /// Dispatch a pointer event by kind.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Option<MarkerId> {
        match event.kind {
            PointerKind::Click => self.handle_click(event),
            PointerKind::MouseMove => self.handle_mouse_move(event),
            PointerKind::MouseOut => {
                self.handle_mouse_out(event);
                None
            }
        }
    }

    /// Fire `click` on the topmost interactive marker under the pointer.
    ///
    /// Returns the clicked marker so the host can stop propagation.
    pub fn handle_click(&mut self, event: &PointerEvent) -> Option<MarkerId> {
        if !self.is_attached() {
            return None;
        }
        let target = self.pick(event.container_point, |m| m.is_interactive() && !m.drag_moved())?;
        self.fire(target, MarkerEventKind::Click, event);
        Some(target)
    }

    /// Update hover state and fire mouseout / mouseover / mousemove.
    ///
    /// Returns the hovered marker after the move.
    pub fn handle_mouse_move(&mut self, event: &PointerEvent) -> Option<MarkerId> {
        let viewport = self.viewport.as_ref()?;
        if self.config.suppress_hover_while_interacting && viewport.is_interacting() {
            return self.hit.hovered();
        }

        let target = self.pick(event.container_point, |m| m.is_interactive());
        let transition = self.hit.update(target);

        if let Some(left) = transition.left() {
            self.fire(left, MarkerEventKind::MouseOut, event);
        }
        match transition {
            HoverTransition::Enter(_) => self.surface.set_interactive_cursor(true),
            HoverTransition::Leave(_) => self.surface.set_interactive_cursor(false),
            _ => {}
        }
        if let Some(entered) = transition.entered() {
            self.fire(entered, MarkerEventKind::MouseOver, event);
        }

        let hovered = self.hit.hovered()?;
        self.fire(hovered, MarkerEventKind::MouseMove, event);
        Some(hovered)
    }

    /// The pointer left the surface: end any hover.
    pub fn handle_mouse_out(&mut self, event: &PointerEvent) {
        if let HoverTransition::Leave(left) = self.hit.update(None) {
            self.fire(left, MarkerEventKind::MouseOut, event);
            self.surface.set_interactive_cursor(false);
        }
    }

    fn pick<F>(&self, point: ScreenPoint, accept: F) -> Option<MarkerId>
    where
        F: Fn(&dyn Marker) -> bool,
    {
        HitTester::pick(
            self.screen
                .query_point(point)
                .into_iter()
                .filter(|entry| {
                    self.slots
                        .get(&entry.marker)
                        .is_some_and(|slot| accept(slot.marker.as_ref()))
                })
                .map(|entry| entry.marker),
        )
    }

    fn fire(&self, id: MarkerId, kind: MarkerEventKind, original: &PointerEvent) {
        if let Some(slot) = self.slots.get(&id) {
            slot.marker.fire(&MarkerEvent {
                kind,
                marker: id,
                original: *original,
            });
        }
    }

    // ---- internals --------------------------------------------------------

    fn register(&mut self, marker: MarkerRef, lat_lng: LatLng, group: Option<&str>) -> MarkerId {
        self.next_id += 1;
        let id = MarkerId(self.next_id);

        let group = group.unwrap_or(self.config.default_group.as_str());
        let group = self.groups.add_to_group(group);

        self.by_address.insert(marker_address(&marker), id);
        self.slots.insert(
            id,
            MarkerSlot {
                marker,
                group,
                lat_lng,
                image: None,
            },
        );
        id
    }

    /// Unindex every member of `group` without redrawing.
    fn drop_group(&mut self, group: &str) -> usize {
        if self.groups.take_group(group).is_none() {
            return 0;
        }

        let doomed: FxHashSet<MarkerId> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.group.as_ref() == group)
            .map(|(id, _)| *id)
            .collect();

        let unindexed = self.geo.remove_matching(|entry| doomed.contains(&entry.marker));
        for id in &doomed {
            if let Some(slot) = self.slots.remove(id) {
                self.by_address.remove(&marker_address(&slot.marker));
            }
            self.forget_on_screen(*id);
        }

        log::debug!(
            "removed group {:?}: {} markers unindexed, {} remain",
            group,
            unindexed.len(),
            self.geo.total()
        );
        doomed.len()
    }

    fn forget_on_screen(&mut self, id: MarkerId) {
        self.screen.remove(id);
        if self.hit.hovered() == Some(id) {
            self.reset_hover();
        }
    }

    fn reset_hover(&mut self) {
        if self.hit.reset().is_some() {
            self.surface.set_interactive_cursor(false);
        }
    }

    // ---- accessors --------------------------------------------------------

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains_marker(&self, marker: &MarkerRef) -> bool {
        self.by_address.contains_key(&marker_address(marker))
    }

    pub fn marker_id(&self, marker: &MarkerRef) -> Option<MarkerId> {
        self.by_address.get(&marker_address(marker)).copied()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerRef> {
        self.slots.get(&id).map(|slot| &slot.marker)
    }

    pub fn group_of(&self, id: MarkerId) -> Option<&str> {
        self.slots.get(&id).map(|slot| slot.group.as_ref())
    }

    pub fn group_size(&self, group: &str) -> usize {
        self.groups.count(group)
    }

    pub fn groups(&self) -> &GroupRegistry {
        &self.groups
    }

    /// Members of `group`, in insertion order.
    pub fn markers_in_group(&self, group: &str) -> Vec<MarkerId> {
        let mut ids: Vec<MarkerId> = self
            .slots
            .iter()
            .filter(|(_, slot)| slot.group.as_ref() == group)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Markers drawn in the last cycle (or added visibly since).
    pub fn visible_markers(&self) -> Vec<MarkerId> {
        self.screen.markers()
    }

    /// Every marker whose footprint contains `point`, topmost first.
    /// Non-interactive markers are included.
    pub fn markers_at(&self, point: ScreenPoint) -> SmallVec<[MarkerId; 4]> {
        let mut hits: SmallVec<[MarkerId; 4]> = self
            .screen
            .query_point(point)
            .into_iter()
            .map(|entry| entry.marker)
            .collect();
        hits.sort_unstable_by(|a, b| b.cmp(a));
        hits
    }

    pub fn hovered(&self) -> Option<MarkerId> {
        self.hit.hovered()
    }

    /// Viewport bounds used by the last draw cycle.
    pub fn last_bounds(&self) -> Option<&GeoBounds> {
        self.last_bounds.as_ref()
    }

    pub fn geo_index(&self) -> &GeoIndex {
        &self.geo
    }

    pub fn screen_index(&self) -> &ScreenIndex {
        &self.screen
    }

    pub fn icon_cache(&self) -> &IconCache {
        &self.icons
    }

    pub fn viewport(&self) -> Option<&V> {
        self.viewport.as_ref()
    }

    pub fn viewport_mut(&mut self) -> Option<&mut V> {
        self.viewport.as_mut()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }

    pub fn loader_mut(&mut self) -> &mut L {
        &mut self.loader
    }

    pub fn stats(&self) -> LayerStats {
        let (icons_loading, icons_ready, icons_failed) = self.icons.counts();
        LayerStats {
            total: self.geo.total(),
            dirty: self.geo.dirty(),
            visible: self.screen.len(),
            groups: self.groups.len(),
            markers: self.slots.len(),
            icons_loading,
            icons_ready,
            icons_failed,
            rebuilds: self.geo.rebuild_count(),
        }
    }
}

fn blit<V, S>(viewport: &V, surface: &mut S, image: &IconImage, icon: &IconOptions, position: ScreenPoint)
where
    V: ViewportProvider,
    S: DrawingSurface,
{
    let top_left = viewport.container_to_layer_point(position - icon.anchor());
    surface.draw_image(image, top_left, icon.size);
}
