//! The live-view scene: viewport fitting, creation sessions, shape editing
//! and the continuously repainted scene graph.
//!
//! The scene never owns the annotations. Every operation that reads or
//! changes them borrows a [`VideoAnnoStore`] for the duration of the call.

use liveview_scene::{
    Animation, Bounds, Cursor, Event, FillRule, Frame, FrameClock, Group, Key, Layer,
    MouseButton, Node, Point, Size, Stage, Transform,
};

use crate::config::{LayerVisibility, SceneConfig};
use crate::editor::{self, EditorPart, EditorStyle, Handle};
use crate::mask;
use crate::model::{AnnoTag, Geometry, ShapeId, ShapeType};
use crate::store::VideoAnnoStore;

/// Name of the single layer holding the frame and every shape.
pub const LIVE_VIEW_LAYER: &str = "live_view";

/// Loading state of the background frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Loading,
    Loaded,
    Error,
}

/// The background frame as far as the scene cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ImageInfo {
    pub status: LoadStatus,
    pub size: Size,
}

impl ImageInfo {
    pub fn loaded(size: Size) -> Self {
        Self {
            status: LoadStatus::Loaded,
            size,
        }
    }
}

/// A shape being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct CreationSession {
    pub shape_type: ShapeType,
    pub tag: AnnoTag,
    /// `None` until the first press.
    pending: Option<Geometry>,
    /// Pointer position trailing a polygon or line, never committed.
    preview: Option<Point>,
}

impl CreationSession {
    pub fn new(shape_type: ShapeType, tag: AnnoTag) -> Self {
        Self {
            shape_type,
            tag,
            pending: None,
            preview: None,
        }
    }

    /// True until the first point has been placed.
    pub fn is_armed(&self) -> bool {
        self.pending.is_none()
    }

    /// The geometry that would be committed right now.
    pub fn pending(&self) -> Option<&Geometry> {
        self.pending.as_ref()
    }

    /// The pending geometry as drawn, including the trailing preview vertex.
    pub fn display_geometry(&self) -> Option<Geometry> {
        let mut geometry = self.pending.clone()?;
        // Only polygons and lines ever get a preview
        if let Some(p) = self.preview {
            geometry.push_point(p);
        }
        Some(geometry)
    }

    fn add_point(&mut self, point: Point) {
        match &mut self.pending {
            None => self.pending = Some(Geometry::start(self.shape_type, point)),
            Some(geometry) => geometry.push_point(point),
        }
        self.preview = None;
    }

    fn track_pointer(&mut self, point: Point) -> bool {
        let Some(geometry) = &mut self.pending else {
            return false;
        };
        match geometry {
            Geometry::BBox(_) => geometry.push_point(point),
            Geometry::Polygon(_) | Geometry::Line(_) => self.preview = Some(point),
        }
        true
    }
}

/// Whether the user is drawing a new shape.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CreationMode {
    #[default]
    Disabled,
    Creating(CreationSession),
}

impl CreationMode {
    pub fn is_creating(&self) -> bool {
        matches!(self, CreationMode::Creating(_))
    }

    pub fn session(&self) -> Option<&CreationSession> {
        match self {
            CreationMode::Creating(session) => Some(session),
            CreationMode::Disabled => None,
        }
    }
}

/// Creation progress reported to the owner of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CreationEvent {
    /// A point was placed, in image space.
    Point(Point),
    /// The pending shape was stored under this id.
    Committed(ShapeId),
    /// The session ended without storing anything.
    Discarded,
}

/// What happened in response to one event.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneResponse {
    pub repaint: bool,
    pub creation: Option<CreationEvent>,
    /// Shape removed through its delete cross.
    pub removed: Option<ShapeId>,
    pub frame: Option<Frame>,
}

impl SceneResponse {
    fn repaint(repaint: bool) -> Self {
        Self {
            repaint,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    Dragging { id: ShapeId, handle: Handle },
}

/// Interactive annotation canvas over a live video frame.
#[derive(Debug)]
pub struct LiveViewScene {
    config: SceneConfig,
    canvas: Size,
    image: ImageInfo,
    transform: Transform,
    layers: LayerVisibility,
    mode: CreationMode,
    drag: DragState,
    hovered: Option<ShapeId>,
    over_delete: bool,
    clock: FrameClock,
    animation: Option<Animation>,
}

impl LiveViewScene {
    pub fn new(config: SceneConfig) -> Self {
        Self::with_clock(config, FrameClock::new())
    }

    /// Create a scene that repaints from an existing clock.
    pub fn with_clock(config: SceneConfig, clock: FrameClock) -> Self {
        Self {
            layers: config.layers,
            config,
            canvas: Size::ZERO,
            image: ImageInfo::default(),
            transform: Transform::identity(),
            mode: CreationMode::Disabled,
            drag: DragState::Idle,
            hovered: None,
            over_delete: false,
            clock,
            animation: None,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn canvas_size(&self) -> Size {
        self.canvas
    }

    pub fn image_info(&self) -> ImageInfo {
        self.image
    }

    pub fn mode(&self) -> &CreationMode {
        &self.mode
    }

    pub fn hovered(&self) -> Option<ShapeId> {
        self.hovered
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn layers(&self) -> LayerVisibility {
        self.layers
    }

    /// Show or hide every shape with `tag`. The store is not touched.
    ///
    /// Hiding a layer also lets go of a handle dragged on one of its shapes.
    pub fn set_layer_visible<S: VideoAnnoStore + ?Sized>(
        &mut self,
        store: &S,
        tag: AnnoTag,
        visible: bool,
    ) {
        log::debug!("👁️ {} layer visible: {}", tag.name(), visible);
        self.layers.set(tag, visible);
        if visible {
            return;
        }
        self.hovered = None;
        self.over_delete = false;
        match self.drag {
            DragState::Dragging { id, .. } if store.video_anno(id).is_none_or(|a| a.tag == tag) => {
                log::debug!("Dropped drag of hidden annotation {}", id);
                self.drag = DragState::Idle;
            }
            _ => {}
        }
    }

    /// The image extent every drag is clamped to.
    pub fn boundary(&self) -> Bounds {
        Bounds::from_size(self.image.size)
    }

    /// Canvas point to image point, `None` if it does not map to a finite one.
    pub fn to_image(&self, device: Point) -> Option<Point> {
        let point = self.transform.invert(device);
        (point.x.is_finite() && point.y.is_finite()).then_some(point)
    }

    // ---- viewport ----

    /// Fit the frame into a canvas of `canvas` size, centered.
    pub fn resize(&mut self, canvas: Size) {
        self.canvas = canvas;
        self.fit();
    }

    /// Update the frame status and size, refitting when the size changed.
    pub fn set_image_info(&mut self, info: ImageInfo) {
        let size_changed = info.size != self.image.size;
        if info.status != self.image.status {
            log::debug!("🖼️ Frame status {:?} -> {:?}", self.image.status, info.status);
        }
        self.image = info;
        if info.status != LoadStatus::Loaded {
            self.drag = DragState::Idle;
            self.hovered = None;
            self.over_delete = false;
        }
        if size_changed {
            self.fit();
        }
    }

    fn fit(&mut self) {
        match Transform::fit_centered(self.canvas, self.image.size) {
            Some(transform) => {
                self.transform = transform;
                log::debug!(
                    "🔍 Fit {}x{} frame into {}x{} canvas: scale={:.4} offset=({:.1}, {:.1})",
                    self.image.size.width,
                    self.image.size.height,
                    self.canvas.width,
                    self.canvas.height,
                    transform.scale,
                    transform.offset_x,
                    transform.offset_y
                );
            }
            None => log::trace!("Frame size unknown, keeping transform"),
        }
    }

    // ---- creation ----

    /// Start drawing a new shape. Any pending shape is discarded.
    pub fn start_creating(&mut self, shape_type: ShapeType, tag: AnnoTag) {
        if self.discard_session() {
            log::debug!("Previous pending shape discarded");
        }
        log::debug!("✏️ Creating {} ({})", shape_type.name(), tag.name());
        self.mode = CreationMode::Creating(CreationSession::new(shape_type, tag));
        self.drag = DragState::Idle;
        self.hovered = None;
        self.over_delete = false;
    }

    /// Leave creation mode without storing anything.
    ///
    /// Returns true if a session was active.
    pub fn disable(&mut self) -> bool {
        let was_creating = self.mode.is_creating();
        self.discard_session();
        self.mode = CreationMode::Disabled;
        was_creating
    }

    fn discard_session(&mut self) -> bool {
        match std::mem::take(&mut self.mode) {
            CreationMode::Creating(session) => session.pending.is_some(),
            CreationMode::Disabled => false,
        }
    }

    /// Place a point of the shape being drawn.
    ///
    /// Returns the image-space point, or `None` when not creating.
    pub fn pointer_down(&mut self, device: Point) -> Option<Point> {
        let point = self.to_image(device)?;
        let CreationMode::Creating(session) = &mut self.mode else {
            return None;
        };
        session.add_point(point);
        log::trace!("Placed {:?} for {}", point, session.shape_type.name());
        Some(point)
    }

    /// Follow the pointer with the shape being drawn.
    ///
    /// Returns true if the pending shape changed.
    pub fn pointer_move(&mut self, device: Point) -> bool {
        let Some(point) = self.to_image(device) else {
            return false;
        };
        match &mut self.mode {
            CreationMode::Creating(session) => session.track_pointer(point),
            CreationMode::Disabled => false,
        }
    }

    /// Store the pending shape and leave creation mode.
    ///
    /// Returns the new shape's id, or `None` if nothing had been drawn.
    pub fn finish<S: VideoAnnoStore + ?Sized>(&mut self, store: &mut S) -> Option<ShapeId> {
        let CreationMode::Creating(session) = std::mem::take(&mut self.mode) else {
            return None;
        };
        let geometry = session.pending?;
        let id = store.insert_video_anno(session.tag, geometry)?;
        log::debug!("✅ Committed {} {}", session.shape_type.name(), id);
        Some(id)
    }

    // ---- repaint ----

    /// Start repainting on every frame.
    pub fn activate(&mut self) {
        if self.animation.is_none() {
            self.animation = Some(self.clock.start());
        }
    }

    pub fn is_active(&self) -> bool {
        self.animation.as_ref().is_some_and(Animation::is_running)
    }

    /// Stop repainting and abandon any creation session.
    pub fn teardown(&mut self) {
        if let Some(mut animation) = self.animation.take() {
            animation.stop();
        }
        self.disable();
        self.drag = DragState::Idle;
        self.hovered = None;
        self.over_delete = false;
        log::debug!(
            "🛑 Scene torn down, {} animations left on the clock",
            self.clock.active_animations()
        );
    }

    /// A frame to paint now, while active.
    pub fn tick(&self) -> Option<Frame> {
        self.clock.tick()
    }

    pub fn tick_at(&self, now: web_time::Instant) -> Option<Frame> {
        self.clock.tick_at(now)
    }

    // ---- editing ----

    fn can_edit(&self) -> bool {
        !self.mode.is_creating() && self.image.status == LoadStatus::Loaded
    }

    /// The shape and part under a canvas point.
    pub fn shape_at<S: VideoAnnoStore + ?Sized>(
        &self,
        store: &S,
        device: Point,
    ) -> Option<(ShapeId, EditorPart)> {
        if self.image.status != LoadStatus::Loaded {
            return None;
        }
        let layer = self.build_layer(store);
        let (group, child) = layer.hit_test(device)?;
        let id = layer.groups[group].key?;
        let anno = store.video_anno(id)?;
        editor::part_at(&anno.geometry, child).map(|part| (id, part))
    }

    /// Grab the handle under the pointer. Returns true if a drag started.
    pub fn drag_start<S: VideoAnnoStore + ?Sized>(&mut self, store: &S, device: Point) -> bool {
        if !self.can_edit() {
            return false;
        }
        match self.shape_at(store, device) {
            Some((id, EditorPart::Handle(handle))) => {
                log::debug!("🖐️ Dragging {:?} of annotation {}", handle, id);
                self.drag = DragState::Dragging { id, handle };
                true
            }
            _ => false,
        }
    }

    /// Move the grabbed handle, clamped to the frame.
    pub fn drag_move<S: VideoAnnoStore + ?Sized>(&mut self, store: &mut S, device: Point) -> bool {
        let DragState::Dragging { id, handle } = self.drag else {
            return false;
        };
        let Some(point) = self.to_image(device) else {
            return false;
        };
        let boundary = self.boundary();
        let patch = store
            .video_anno(id)
            .and_then(|anno| editor::drag(&anno.geometry, handle, point, &boundary));
        match patch {
            Some(patch) => {
                store.update_video_anno(id, patch);
                true
            }
            None => {
                log::warn!("Dragged handle {:?} no longer exists on {}", handle, id);
                self.drag = DragState::Idle;
                false
            }
        }
    }

    pub fn drag_end(&mut self) -> bool {
        let was_dragging = self.is_dragging();
        if was_dragging {
            log::debug!("Finished dragging");
        }
        self.drag = DragState::Idle;
        was_dragging
    }

    /// Track which shape the pointer is over. Returns true if that changed.
    pub fn hover<S: VideoAnnoStore + ?Sized>(&mut self, store: &S, device: Point) -> bool {
        let hit = if self.can_edit() {
            self.shape_at(store, device)
        } else {
            None
        };
        let hovered = hit.map(|(id, _)| id);
        let over_delete = matches!(hit, Some((_, EditorPart::Delete)));
        let changed = hovered != self.hovered || over_delete != self.over_delete;
        self.hovered = hovered;
        self.over_delete = over_delete;
        changed
    }

    /// Activate the delete cross under the pointer, if any.
    pub fn click<S: VideoAnnoStore + ?Sized>(&mut self, store: &mut S, device: Point) -> Option<ShapeId> {
        if !self.can_edit() {
            return None;
        }
        match self.shape_at(store, device) {
            Some((id, EditorPart::Delete)) => {
                store.remove_video_anno(id);
                self.hovered = None;
                self.over_delete = false;
                Some(id)
            }
            _ => None,
        }
    }

    // ---- events ----

    /// Route one input event.
    pub fn handle_event<S: VideoAnnoStore + ?Sized>(
        &mut self,
        store: &mut S,
        event: &Event,
    ) -> SceneResponse {
        match *event {
            Event::PointerDown {
                position,
                button: MouseButton::Left,
            } => {
                if self.mode.is_creating() {
                    let point = self.pointer_down(position);
                    return SceneResponse {
                        repaint: point.is_some(),
                        creation: point.map(CreationEvent::Point),
                        ..Default::default()
                    };
                }
                if let Some(id) = self.click(store, position) {
                    return SceneResponse {
                        repaint: true,
                        removed: Some(id),
                        ..Default::default()
                    };
                }
                SceneResponse::repaint(self.drag_start(store, position))
            }
            Event::PointerDown { .. } => SceneResponse::default(),
            Event::PointerUp { .. } => SceneResponse::repaint(self.drag_end()),
            Event::PointerMove { position } => {
                let repaint = if self.is_dragging() {
                    self.drag_move(store, position)
                } else if self.mode.is_creating() {
                    self.pointer_move(position)
                } else {
                    self.hover(store, position)
                };
                SceneResponse::repaint(repaint)
            }
            Event::PointerLeave => {
                let changed = self.hovered.is_some() || self.is_dragging();
                self.hovered = None;
                self.over_delete = false;
                self.drag = DragState::Idle;
                SceneResponse::repaint(changed)
            }
            Event::KeyDown { key: Key::Char(c) } if c == self.config.finish_key => {
                if !self.mode.is_creating() {
                    return SceneResponse::default();
                }
                let creation = match self.finish(store) {
                    Some(id) => CreationEvent::Committed(id),
                    None => CreationEvent::Discarded,
                };
                SceneResponse {
                    repaint: true,
                    creation: Some(creation),
                    ..Default::default()
                }
            }
            Event::KeyDown { key: Key::Escape } if self.mode.is_creating() => {
                self.disable();
                SceneResponse {
                    repaint: true,
                    creation: Some(CreationEvent::Discarded),
                    ..Default::default()
                }
            }
            Event::KeyDown { .. } => SceneResponse::default(),
            Event::Resize { size } => {
                self.resize(size);
                SceneResponse::repaint(true)
            }
            Event::FrameTick => {
                let frame = self.tick();
                SceneResponse {
                    repaint: frame.is_some(),
                    frame,
                    ..Default::default()
                }
            }
        }
    }

    // ---- rendering ----

    /// Build the scene graph for the current state.
    pub fn render<S: VideoAnnoStore + ?Sized>(&self, store: &S) -> Stage {
        let mut stage = Stage::new(self.canvas);
        stage.cursor = if self.mode.is_creating() {
            Cursor::Crosshair
        } else if self.over_delete {
            Cursor::Pointer
        } else {
            Cursor::Default
        };
        stage.push(self.build_layer(store));
        stage
    }

    fn build_layer<S: VideoAnnoStore + ?Sized>(&self, store: &S) -> Layer {
        let mut layer = Layer::new(LIVE_VIEW_LAYER, self.transform);

        let mut background = Group::new(None).with_listening(false);
        background.push(Node::Image {
            size: self.image.size,
        });
        layer.push(background);

        // Shapes drawn before the frame is loaded would show at the wrong scale
        if self.image.status != LoadStatus::Loaded {
            return layer;
        }

        let scale = self.transform.scale;
        let pending = self
            .mode
            .session()
            .and_then(|s| s.display_geometry().map(|g| (s.tag, g)));
        let annos = store.video_annos();

        for &tag in AnnoTag::all() {
            let visible = self.layers.is_visible(tag);

            if tag.is_mask_hole() {
                let holes = annos
                    .iter()
                    .filter(|a| a.tag == tag)
                    .map(|a| &a.geometry)
                    .chain(pending.iter().filter(|(t, _)| *t == tag).map(|(_, g)| g));
                let mut group = Group::new(None)
                    .with_visible(visible)
                    .with_listening(false);
                group.push(Node::Path {
                    path: mask::mask_path(self.image.size, holes),
                    fill: self.config.mask_color,
                    fill_rule: FillRule::NonZero,
                    listening: false,
                });
                layer.push(group);
            }

            let style = EditorStyle::new(&self.config, tag, scale);
            for anno in annos.iter().filter(|a| a.tag == tag) {
                let show_delete = self.hovered == Some(anno.id) && !self.mode.is_creating();
                layer.push(
                    editor::render(anno.id, &anno.geometry, &style, show_delete)
                        .with_visible(visible),
                );
            }

            if let Some((_, geometry)) = pending.as_ref().filter(|(t, _)| *t == tag) {
                let mut group = editor::render(0, geometry, &style, false)
                    .with_visible(visible)
                    .with_listening(false);
                group.key = None;
                layer.push(group);
            }
        }
        layer
    }
}
