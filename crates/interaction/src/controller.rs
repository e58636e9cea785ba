use camera::{Camera, DEFAULT_PADDING, ViewportTransform, ZOOM_TO_REGION_MS};
use foundation::Vec2;
use gazetteer::{GeographyIndex, GeographyLoadError, Region, RegionKey};

use crate::entries::EntryCounts;
use crate::highlight::{Highlight, classify};
use crate::scene::{RegionShape, Scene, Viewport};
use crate::selection::Selection;
use crate::tooltip::Tooltip;

/// Where the controller sits in its render lifecycle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InteractionPhase {
    /// No committed scene yet: geometry or a usable viewport is missing.
    Uninitialized,
    /// Scene committed, pointer outside every region.
    Idle,
    /// Scene committed, pointer inside a region.
    Hovering,
}

/// Result of driving one render request to completion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// A fresh scene was committed.
    Committed,
    /// The pass was superseded by a newer request; nothing changed.
    Abandoned,
    /// Geometry or viewport not usable yet; retried on the next signal.
    Skipped,
    /// Nothing pending.
    UpToDate,
}

/// In-flight render pass. Commit fails if a newer request supersedes it.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RenderPass {
    epoch: u64,
    viewport: Viewport,
}

/// Ticket guarding an asynchronous geography load; completions carrying a
/// superseded ticket are discarded silently.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    epoch: u64,
}

/// Notifications for the embedding layer, drained per event-loop turn.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    GeographyLoaded { regions: usize },
    GeographyLoadFailed { message: String },
    Rendered { viewport: Viewport },
    SelectionChanged { selected: Option<RegionKey> },
}

/// Found-regions summary for the header stats.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FoundSummary {
    pub with_entries: usize,
    pub total: usize,
}

/// Owns the map's render lifecycle and interaction state.
///
/// Single-threaded and event-driven: every method runs to completion on
/// the caller's event loop. The only asynchronous collaborator is the
/// geography fetch, bridged by `begin_geography_load`/`complete_geography_load`.
///
/// Render requests coalesce. Each request bumps an epoch; a pass begun
/// under an older epoch is abandoned at commit, so a burst of resizes
/// leaves exactly one committed scene, matching the newest dimensions.
#[derive(Debug, Default)]
pub struct MapController {
    index: Option<GeographyIndex>,
    load_epoch: u64,
    status: Option<String>,
    viewport: Viewport,
    maximized: bool,
    render_epoch: u64,
    committed_epoch: u64,
    scene: Option<Scene>,
    hover: Option<RegionKey>,
    tooltip: Tooltip,
    selection: Selection,
    entries: EntryCounts,
    camera: Camera,
    events: Vec<MapEvent>,
}

impl MapController {
    pub fn new() -> Self {
        Self::default()
    }

    // ---- geography lifecycle ----

    /// Starts an asynchronous geography load. Only the newest ticket can
    /// complete; earlier ones are dropped on arrival.
    pub fn begin_geography_load(&mut self) -> LoadTicket {
        self.load_epoch += 1;
        LoadTicket {
            epoch: self.load_epoch,
        }
    }

    pub fn complete_geography_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<GeographyIndex, GeographyLoadError>,
    ) {
        if ticket.epoch != self.load_epoch {
            log::debug!("discarding stale geography load (ticket {})", ticket.epoch);
            return;
        }

        match result {
            Ok(index) => {
                self.events.push(MapEvent::GeographyLoaded {
                    regions: index.len(),
                });
                self.index = Some(index);
                self.request_render();
            }
            Err(err) => {
                // Reported once; the rest of the application stays usable
                // without a clickable map.
                if self.status.is_none() {
                    let message = err.to_string();
                    log::warn!("geography load failed: {message}");
                    self.status = Some(message.clone());
                    self.events.push(MapEvent::GeographyLoadFailed { message });
                }
            }
        }
    }

    /// Synchronous convenience for callers that already hold an index.
    pub fn set_geography(&mut self, index: GeographyIndex) {
        let ticket = self.begin_geography_load();
        self.complete_geography_load(ticket, Ok(index));
    }

    /// Load-failure status message, if any. Non-blocking: the controller
    /// stays alive, just without a map.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    // ---- render lifecycle ----

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
        self.request_render();
    }

    pub fn set_maximized(&mut self, maximized: bool) {
        if self.maximized != maximized {
            self.maximized = maximized;
            self.request_render();
        }
    }

    pub fn toggle_maximized(&mut self) -> bool {
        self.set_maximized(!self.maximized);
        self.maximized
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Flags the current scene as stale. Requests coalesce: only the
    /// newest is ever committed.
    pub fn request_render(&mut self) {
        self.render_epoch += 1;
    }

    pub fn has_pending_render(&self) -> bool {
        self.render_epoch != self.committed_epoch
    }

    /// Snapshots the newest request for an in-flight pass, or `None` when
    /// nothing is pending.
    pub fn begin_render(&mut self) -> Option<RenderPass> {
        if !self.has_pending_render() {
            return None;
        }
        Some(RenderPass {
            epoch: self.render_epoch,
            viewport: self.viewport,
        })
    }

    pub fn commit_render(&mut self, pass: RenderPass) -> RenderOutcome {
        if pass.epoch != self.render_epoch {
            log::debug!("abandoning superseded render pass (epoch {})", pass.epoch);
            return RenderOutcome::Abandoned;
        }
        if pass.viewport.is_empty() {
            return RenderOutcome::Skipped;
        }
        let Some(index) = &self.index else {
            return RenderOutcome::Skipped;
        };
        let Some(scene) = Scene::build(index, pass.viewport) else {
            return RenderOutcome::Skipped;
        };

        // Prior rendered shapes are discarded wholesale; selection and
        // entry state live outside the scene and survive untouched.
        self.scene = Some(scene);
        self.committed_epoch = pass.epoch;
        self.events.push(MapEvent::Rendered {
            viewport: pass.viewport,
        });
        RenderOutcome::Committed
    }

    /// Drives the pending render request, if any, to completion.
    pub fn render(&mut self) -> RenderOutcome {
        match self.begin_render() {
            Some(pass) => self.commit_render(pass),
            None => RenderOutcome::UpToDate,
        }
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> InteractionPhase {
        if self.scene.is_none() {
            InteractionPhase::Uninitialized
        } else if self.hover.is_some() {
            InteractionPhase::Hovering
        } else {
            InteractionPhase::Idle
        }
    }

    // ---- pointer interaction ----

    /// Pointer entered a region; `position` is container-relative, used
    /// for tooltip placement.
    pub fn pointer_enter(&mut self, key: &RegionKey, position: Vec2) {
        let Some(scene) = &self.scene else {
            return;
        };
        let Some(shape) = scene.shape(key) else {
            log::debug!("pointer entered unknown region {key}");
            return;
        };
        let name = shape.name.clone();
        self.hover = Some(key.clone());
        self.tooltip.show(&name, position);
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        if self.hover.is_some() {
            self.tooltip.move_to(position);
        }
    }

    pub fn pointer_leave(&mut self) {
        self.hover = None;
        self.tooltip.hide();
    }

    pub fn hovered_key(&self) -> Option<&RegionKey> {
        self.hover.as_ref()
    }

    pub fn tooltip(&self) -> &Tooltip {
        &self.tooltip
    }

    // ---- selection ----

    /// Click on a rendered region: selects it and nothing else. Zooming
    /// stays with the driver so pointer and programmatic selection behave
    /// identically.
    pub fn click(&mut self, key: &RegionKey) {
        self.select(key);
    }

    /// Returns `true` if `key` names a known region (selected, whether or
    /// not it was already).
    pub fn select(&mut self, key: &RegionKey) -> bool {
        let known = self
            .index
            .as_ref()
            .is_some_and(|index| index.get(key).is_some());
        if !known {
            log::debug!("ignoring selection of unknown region {key}");
            return false;
        }
        if self.selection.select(key.clone()) {
            self.events.push(MapEvent::SelectionChanged {
                selected: Some(key.clone()),
            });
        }
        true
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.events
                .push(MapEvent::SelectionChanged { selected: None });
        }
    }

    pub fn selected_key(&self) -> Option<&RegionKey> {
        self.selection.selected()
    }

    pub fn selected_name(&self) -> Option<&str> {
        let key = self.selection.selected()?;
        self.index.as_ref()?.display_name(key)
    }

    // ---- camera ----

    /// Animates the camera to frame the given region. No-op without a
    /// committed scene or for unknown keys.
    pub fn zoom_to(&mut self, key: &RegionKey) -> bool {
        let Some(scene) = &self.scene else {
            return false;
        };
        let Some(shape) = scene.shape(key) else {
            return false;
        };
        let viewport = scene.viewport();
        let target = ViewportTransform::frame(
            shape.bounds,
            viewport.width,
            viewport.height,
            DEFAULT_PADDING,
        );
        self.camera.animate_to(target, ZOOM_TO_REGION_MS);
        true
    }

    pub fn reset_zoom(&mut self) {
        self.camera.reset();
    }

    /// Advances zoom animation; called once per frame with the elapsed
    /// milliseconds.
    pub fn tick(&mut self, dt_ms: f64) {
        self.camera.tick(dt_ms);
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.camera.pan_by(dx, dy);
    }

    pub fn zoom_about(&mut self, origin: Vec2, factor: f64) {
        self.camera.zoom_about(origin, factor);
    }

    // ---- entries & classification ----

    pub fn set_entries(&mut self, entries: EntryCounts) {
        self.entries = entries;
    }

    /// Rebuilds entry counts from provider records (region keys or
    /// free-text country fields).
    pub fn set_entries_from_records<'a>(&mut self, records: impl IntoIterator<Item = &'a str>) {
        let Some(index) = &self.index else {
            self.entries = EntryCounts::new();
            return;
        };
        self.entries = EntryCounts::from_records(index, records);
    }

    pub fn entries(&self) -> &EntryCounts {
        &self.entries
    }

    /// Derived classification for one region; recomputed on every call
    /// from the entry and selection state.
    pub fn highlight(&self, key: &RegionKey) -> Highlight {
        classify(key, &self.entries, &self.selection)
    }

    /// Every rendered shape with its current classification.
    pub fn classified_shapes(&self) -> Vec<(&RegionShape, Highlight)> {
        let Some(scene) = &self.scene else {
            return Vec::new();
        };
        scene
            .shapes()
            .iter()
            .map(|shape| (shape, self.highlight(&shape.key)))
            .collect()
    }

    pub fn summary(&self) -> FoundSummary {
        let regions = self.regions();
        FoundSummary {
            with_entries: regions
                .iter()
                .filter(|r| self.entries.has_entries(&r.key))
                .count(),
            total: regions.len(),
        }
    }

    // ---- name resolution & lists ----

    /// Regions in display order; empty before geography is loaded.
    pub fn regions(&self) -> &[Region] {
        self.index.as_ref().map(|i| i.regions()).unwrap_or(&[])
    }

    pub fn display_name(&self, key: &RegionKey) -> Option<&str> {
        self.index.as_ref()?.display_name(key)
    }

    /// Resolves a comma-separated country field to region keys, exposed
    /// for collaborators that look up metadata on their own.
    pub fn resolve_country_list(&self, raw: &str) -> Vec<RegionKey> {
        self.index
            .as_ref()
            .map(|i| i.resolve_country_list(raw))
            .unwrap_or_default()
    }

    /// Side-list filter: regions whose name contains the query.
    pub fn filter_regions(&self, query: &str) -> Vec<&Region> {
        self.index
            .as_ref()
            .map(|i| i.filter(query))
            .unwrap_or_default()
    }

    /// Resolves a free-text country field and selects (and frames) the
    /// first region that matches. Returns the selected key.
    pub fn select_from_country_field(&mut self, raw: &str) -> Option<RegionKey> {
        let key = self.resolve_country_list(raw).into_iter().next()?;
        self.select(&key);
        self.zoom_to(&key);
        Some(key)
    }

    /// Incremental search: selects and frames the best name match.
    pub fn search_select(&mut self, query: &str) -> Option<RegionKey> {
        let key = self.index.as_ref()?.search(query)?.key.clone();
        self.select(&key);
        self.zoom_to(&key);
        Some(key)
    }

    // ---- notifications ----

    /// Hands accumulated notifications to the embedder and clears them.
    pub fn drain_events(&mut self) -> Vec<MapEvent> {
        std::mem::take(&mut self.events)
    }
}
