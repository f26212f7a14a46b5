//! Tests for the rendered scene graph and its rasterization.

use liveview_scene::{render_stage, Color, Group, Layer, Node, Pixmap, Point, Size, Stage};

use super::{down, moved, scene};
use crate::coordinator::{LiveViewScene, LIVE_VIEW_LAYER};
use crate::model::{AnnoTag, Box2d, Geometry, ShapeType};
use crate::store::{AnnoList, VideoAnnoStore};

/// Placeholder frame gray (0.2) as an 8-bit channel.
const FRAME_GRAY: u8 = 51;

fn live_view(stage: &Stage) -> &Layer {
    stage.layer(LIVE_VIEW_LAYER).expect("live view layer")
}

fn mask_group(layer: &Layer) -> &Group {
    layer
        .groups
        .iter()
        .find(|g| matches!(g.children.first(), Some(Node::Path { .. })))
        .expect("mask group")
}

fn red_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
    pixmap.pixel(x, y).map(|p| p.red()).unwrap_or(0)
}

fn aoi_scene() -> (LiveViewScene, AnnoList) {
    let mut store = AnnoList::new();
    store.insert_video_anno(
        AnnoTag::Aoi,
        Geometry::BBox(Box2d::new(25.0, 25.0, 75.0, 75.0)),
    );
    (scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0)), store)
}

#[test]
fn test_stage_layout() {
    let mut store = AnnoList::new();
    let aoi = store.insert_video_anno(
        AnnoTag::Aoi,
        Geometry::BBox(Box2d::new(10.0, 10.0, 50.0, 50.0)),
    ).expect("id");
    let zone = store.insert_video_anno(
        AnnoTag::DangerZone,
        Geometry::Polygon(vec![
            Point::new(60.0, 60.0),
            Point::new(90.0, 60.0),
            Point::new(90.0, 90.0),
        ]),
    ).expect("id");
    let scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let stage = scene.render(&store);
    assert_eq!(stage.size, Size::new(100.0, 100.0));

    let layer = live_view(&stage);
    // Background, mask, then one group per shape
    assert_eq!(layer.groups.len(), 4);
    assert!(matches!(layer.groups[0].children[..], [Node::Image { .. }]));
    assert!(!layer.groups[0].listening);
    assert!(!mask_group(layer).listening);
    assert_eq!(layer.groups[2].key, Some(aoi));
    assert_eq!(layer.groups[3].key, Some(zone));
}

#[test]
fn test_shapes_use_tag_colors() {
    let mut store = AnnoList::new();
    let aoi = store.insert_video_anno(
        AnnoTag::Aoi,
        Geometry::BBox(Box2d::new(10.0, 10.0, 50.0, 50.0)),
    ).expect("id");
    let zone = store.insert_video_anno(
        AnnoTag::DangerZone,
        Geometry::BBox(Box2d::new(60.0, 60.0, 90.0, 90.0)),
    ).expect("id");
    let scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let stage = scene.render(&store);
    let layer = live_view(&stage);

    let stroke_of = |id| match layer.group(id).map(|g| &g.children[0]) {
        Some(Node::Polyline { stroke, .. }) => *stroke,
        other => panic!("expected an outline, got {:?}", other),
    };
    assert_eq!(stroke_of(aoi), Color::WHITE);
    assert_eq!(stroke_of(zone), Color::YELLOW);

    let Some(Node::Path { fill, .. }) = mask_group(layer).children.first() else {
        panic!("mask group without a path");
    };
    assert_eq!(*fill, Color::BLACK.with_alpha(0.5));
}

#[test]
fn test_sizes_stay_constant_on_screen() {
    let mut store = AnnoList::new();
    let id = store.insert_video_anno(
        AnnoTag::Aoi,
        Geometry::BBox(Box2d::new(10.0, 10.0, 50.0, 50.0)),
    ).expect("id");
    // Scale 0.25
    let scene = scene(Size::new(400.0, 400.0), Size::new(100.0, 100.0));
    let stage = scene.render(&store);
    let group = live_view(&stage).group(id).expect("shape group");

    match &group.children[1] {
        Node::Circle { radius, .. } => assert!((radius - 20.0).abs() < 1e-4),
        other => panic!("expected a handle, got {:?}", other),
    }
    match &group.children[0] {
        Node::Polyline { stroke_width, .. } => assert!((stroke_width - 8.0).abs() < 1e-4),
        other => panic!("expected an outline, got {:?}", other),
    }
}

#[test]
fn test_counting_line_is_open() {
    let mut store = AnnoList::new();
    let id = store.insert_video_anno(
        AnnoTag::CountingLine,
        Geometry::Line(vec![
            Point::new(0.0, 50.0),
            Point::new(50.0, 40.0),
            Point::new(100.0, 50.0),
        ]),
    ).expect("id");
    let scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let stage = scene.render(&store);
    let group = live_view(&stage).group(id).expect("line group");

    assert!(matches!(group.children[0], Node::Polyline { closed: false, .. }));
    // Outline, three vertex handles, delete cross
    assert_eq!(group.children.len(), 5);
}

#[test]
fn test_aoi_cuts_hole_in_mask() {
    let (scene, store) = aoi_scene();
    let pixmap = render_stage(&scene.render(&store), None).expect("render");

    let inside = red_at(&pixmap, 50, 50);
    let outside = red_at(&pixmap, 5, 5);
    assert!(inside.abs_diff(FRAME_GRAY) <= 1, "inside = {}", inside);
    assert!(outside < 40, "outside = {}", outside);
}

#[test]
fn test_hiding_aoi_layer_hides_mask_and_shapes() {
    let (mut scene, store) = aoi_scene();
    let id = store.video_annos()[0].id;
    assert!(scene.shape_at(&store, Point::new(25.0, 50.0)).is_some());

    scene.set_layer_visible(&store, AnnoTag::Aoi, false);
    let stage = scene.render(&store);
    let layer = live_view(&stage);
    assert!(!mask_group(layer).visible);
    assert!(!layer.group(id).expect("still rendered").visible);
    assert!(scene.shape_at(&store, Point::new(25.0, 50.0)).is_none());
    assert_eq!(store.len(), 1);

    let pixmap = render_stage(&stage, None).expect("render");
    assert!(red_at(&pixmap, 5, 5).abs_diff(FRAME_GRAY) <= 1);

    scene.set_layer_visible(&store, AnnoTag::Aoi, true);
    let pixmap = render_stage(&scene.render(&store), None).expect("render");
    assert!(red_at(&pixmap, 5, 5) < 40);
}

#[test]
fn test_without_aoi_whole_frame_is_masked() {
    let store = AnnoList::new();
    let scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let pixmap = render_stage(&scene.render(&store), None).expect("render");
    assert!(red_at(&pixmap, 50, 50) < 40);
}

#[test]
fn test_pending_aoi_cuts_hole_while_drawing() {
    let mut store = AnnoList::new();
    let mut scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    scene.start_creating(ShapeType::BBox, AnnoTag::Aoi);
    scene.handle_event(&mut store, &down(25.0, 25.0));
    scene.handle_event(&mut store, &moved(75.0, 75.0));

    let stage = scene.render(&store);
    let pending = live_view(&stage)
        .groups
        .last()
        .expect("pending group");
    assert_eq!(pending.key, None);
    assert!(!pending.listening);

    let pixmap = render_stage(&stage, None).expect("render");
    assert!(red_at(&pixmap, 50, 50).abs_diff(FRAME_GRAY) <= 1);
    assert!(red_at(&pixmap, 5, 5) < 40);
}

#[test]
fn test_mirrored_aoi_box_still_cuts_hole() {
    let mut store = AnnoList::new();
    store.insert_video_anno(
        AnnoTag::Aoi,
        Geometry::BBox(Box2d::new(75.0, 25.0, 25.0, 75.0)),
    );
    let scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    let pixmap = render_stage(&scene.render(&store), None).expect("render");
    assert!(red_at(&pixmap, 50, 50).abs_diff(FRAME_GRAY) <= 1);
}

#[test]
fn test_polygon_preview_drawn_but_not_stored() {
    let mut store = AnnoList::new();
    let mut scene = scene(Size::new(100.0, 100.0), Size::new(100.0, 100.0));
    scene.start_creating(ShapeType::Polygon, AnnoTag::DangerZone);
    scene.handle_event(&mut store, &down(10.0, 10.0));
    scene.handle_event(&mut store, &moved(60.0, 10.0));

    let stage = scene.render(&store);
    let pending = live_view(&stage).groups.last().expect("pending group");
    match &pending.children[0] {
        Node::Polyline { points, .. } => {
            assert_eq!(points, &vec![Point::new(10.0, 10.0), Point::new(60.0, 10.0)])
        }
        other => panic!("expected an outline, got {:?}", other),
    }
    assert!(store.is_empty());
}
