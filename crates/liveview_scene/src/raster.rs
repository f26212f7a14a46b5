//! Software rasterization of a [`Stage`] with tiny-skia.

use crate::color::Color;
use crate::geometry::Point;
use crate::node::Node;
use crate::path::{FillRule, Path, PathCommand};
use crate::stage::Stage;
use crate::transform::Transform;

/// Background used for the image node when no frame is supplied.
const PLACEHOLDER_FRAME: Color = Color {
    r: 0.2,
    g: 0.2,
    b: 0.2,
    a: 1.0,
};

/// Errors that can occur while rasterizing a stage.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The stage has a zero or non-finite dimension
    #[error("Cannot render a stage of size {width}x{height}")]
    InvalidSize { width: f32, height: f32 },

    /// Frame pixel data does not match its dimensions
    #[error("Frame data has {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}

/// Rasterize every visible layer of `stage`.
///
/// `frame` is drawn wherever an [`Node::Image`] appears; without it the image
/// area is filled with a neutral placeholder.
pub fn render_stage(
    stage: &Stage,
    frame: Option<&tiny_skia::Pixmap>,
) -> Result<tiny_skia::Pixmap, RenderError> {
    let invalid = || RenderError::InvalidSize {
        width: stage.size.width,
        height: stage.size.height,
    };
    if !stage.size.width.is_finite() || !stage.size.height.is_finite() {
        return Err(invalid());
    }
    let mut pixmap = tiny_skia::Pixmap::new(
        stage.size.width.round() as u32,
        stage.size.height.round() as u32,
    )
    .ok_or_else(invalid)?;

    for layer in &stage.layers {
        let ts = to_skia_transform(&layer.transform);
        for group in layer.groups.iter().filter(|g| g.visible) {
            for node in &group.children {
                draw_node(&mut pixmap, node, ts, frame);
            }
        }
    }

    log::debug!(
        "Rendered stage {}x{} with {} layers",
        pixmap.width(),
        pixmap.height(),
        stage.layers.len()
    );
    Ok(pixmap)
}

/// Build a frame pixmap from straight (non-premultiplied) RGBA8 data.
pub fn frame_from_rgba8(
    mut data: Vec<u8>,
    width: u32,
    height: u32,
) -> Result<tiny_skia::Pixmap, RenderError> {
    let expected = width as usize * height as usize * 4;
    if data.len() != expected {
        return Err(RenderError::FrameSize {
            expected,
            actual: data.len(),
        });
    }
    for px in data.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
    let size = tiny_skia::IntSize::from_wh(width, height).ok_or(RenderError::InvalidSize {
        width: width as f32,
        height: height as f32,
    })?;
    tiny_skia::Pixmap::from_vec(data, size).ok_or(RenderError::InvalidSize {
        width: width as f32,
        height: height as f32,
    })
}

/// Convert a rendered pixmap to straight RGBA8 data.
pub fn pixmap_to_rgba8(pixmap: &tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|px| {
            let c = px.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect()
}

fn to_skia_transform(t: &Transform) -> tiny_skia::Transform {
    tiny_skia::Transform::from_row(t.scale, 0.0, 0.0, t.scale, t.offset_x, t.offset_y)
}

fn paint_for(color: Color) -> tiny_skia::Paint<'static> {
    let [r, g, b, a] = color.to_rgba8();
    let mut paint = tiny_skia::Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;
    paint
}

fn skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => pb.move_to(p.x, p.y),
            PathCommand::LineTo(p) => pb.line_to(p.x, p.y),
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}

fn polyline_path(points: &[Point], closed: bool) -> Option<tiny_skia::Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = tiny_skia::PathBuilder::new();
    pb.move_to(first.x, first.y);
    for p in rest {
        pb.line_to(p.x, p.y);
    }
    if closed {
        pb.close();
    }
    pb.finish()
}

fn stroke(width: f32) -> tiny_skia::Stroke {
    tiny_skia::Stroke {
        width,
        ..Default::default()
    }
}

fn draw_node(
    pixmap: &mut tiny_skia::Pixmap,
    node: &Node,
    ts: tiny_skia::Transform,
    frame: Option<&tiny_skia::Pixmap>,
) {
    match node {
        Node::Image { size } => match frame {
            Some(frame) => pixmap.draw_pixmap(
                0,
                0,
                frame.as_ref(),
                &tiny_skia::PixmapPaint::default(),
                ts,
                None,
            ),
            None => {
                if let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, size.width, size.height) {
                    pixmap.fill_rect(rect, &paint_for(PLACEHOLDER_FRAME), ts, None);
                }
            }
        },
        Node::Path {
            path,
            fill,
            fill_rule,
            ..
        } => {
            if let Some(p) = skia_path(path) {
                let rule = match fill_rule {
                    FillRule::NonZero => tiny_skia::FillRule::Winding,
                    FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
                };
                pixmap.fill_path(&p, &paint_for(*fill), rule, ts, None);
            }
        }
        Node::Polyline {
            points,
            closed,
            stroke: color,
            stroke_width,
            ..
        } => {
            if let Some(p) = polyline_path(points, *closed) {
                pixmap.stroke_path(&p, &paint_for(*color), &stroke(*stroke_width), ts, None);
            }
        }
        Node::Circle {
            center,
            radius,
            fill,
            ..
        } => {
            if let Some(p) = tiny_skia::PathBuilder::from_circle(center.x, center.y, *radius) {
                pixmap.fill_path(
                    &p,
                    &paint_for(*fill),
                    tiny_skia::FillRule::Winding,
                    ts,
                    None,
                );
            }
        }
        Node::Cross {
            origin,
            size,
            stroke: color,
            stroke_width,
            visible,
        } => {
            if !*visible {
                return;
            }
            let mut pb = tiny_skia::PathBuilder::new();
            pb.move_to(origin.x, origin.y);
            pb.line_to(origin.x + size, origin.y + size);
            pb.move_to(origin.x + size, origin.y);
            pb.line_to(origin.x, origin.y + size);
            if let Some(p) = pb.finish() {
                pixmap.stroke_path(&p, &paint_for(*color), &stroke(*stroke_width), ts, None);
            }
        }
    }
}
