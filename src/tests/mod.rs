//! End-to-end tests driving the scene through input events.
//!
//! These tests exercise creation, editing, layer visibility and rendering
//! together against an in-memory store.

mod render_tests;

use liveview_scene::{Event, Key, MouseButton, Point, Size};

use crate::config::SceneConfig;
use crate::coordinator::{ImageInfo, LiveViewScene};

const EPSILON: f32 = 1e-4;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

/// A scene showing a loaded frame of `image` size in a `canvas` sized view.
fn scene(image: Size, canvas: Size) -> LiveViewScene {
    let mut scene = LiveViewScene::new(SceneConfig::default());
    scene.handle_event(&mut crate::store::AnnoList::new(), &Event::Resize { size: canvas });
    scene.set_image_info(ImageInfo::loaded(image));
    scene
}

fn down(x: f32, y: f32) -> Event {
    Event::PointerDown {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn up(x: f32, y: f32) -> Event {
    Event::PointerUp {
        position: Point::new(x, y),
        button: MouseButton::Left,
    }
}

fn moved(x: f32, y: f32) -> Event {
    Event::PointerMove {
        position: Point::new(x, y),
    }
}

fn finish_key() -> Event {
    Event::KeyDown { key: Key::Char('d') }
}
