//! Vector paths built from move/line/close commands.
//!
//! A path may hold several subpaths. When filled, every subpath is treated as
//! closed, and coverage is decided by the [`FillRule`].

use crate::geometry::Point;

/// A single drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Close,
}

/// How overlapping subpaths decide whether a point is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Inside when the winding number is not zero.
    #[default]
    NonZero,
    /// Inside when the number of crossings is odd.
    EvenOdd,
}

/// An ordered list of path commands.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(&mut self, point: Point) -> &mut Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn close(&mut self) -> &mut Self {
        self.commands.push(PathCommand::Close);
        self
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Split the path into its subpaths' vertex lists.
    ///
    /// A `LineTo` right after `Close` continues from the closed subpath's
    /// start; a `LineTo` with no pen position starts at its own point.
    /// Single-point subpaths are kept.
    pub fn subpaths(&self) -> Vec<Vec<Point>> {
        let mut result: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut closed_start: Option<Point> = None;

        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if !current.is_empty() {
                        result.push(std::mem::take(&mut current));
                    }
                    closed_start = None;
                    current.push(p);
                }
                PathCommand::LineTo(p) => {
                    if current.is_empty() {
                        if let Some(start) = closed_start.take() {
                            current.push(start);
                        }
                    }
                    current.push(p);
                }
                PathCommand::Close => {
                    if let Some(&start) = current.first() {
                        result.push(std::mem::take(&mut current));
                        closed_start = Some(start);
                    }
                }
            }
        }
        if !current.is_empty() {
            result.push(current);
        }
        result
    }

    /// Winding number of the path around `point`, every subpath closed.
    pub fn winding_number(&self, point: Point) -> i32 {
        self.subpaths()
            .iter()
            .map(|sub| winding_number(sub, point))
            .sum()
    }

    /// Number of edge crossings of a horizontal ray from `point`.
    fn crossings(&self, point: Point) -> u32 {
        let mut count = 0;
        for sub in self.subpaths() {
            for (a, b) in closed_edges(&sub) {
                if (a.y > point.y) != (b.y > point.y)
                    && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
                {
                    count += 1;
                }
            }
        }
        count
    }

    /// Check whether `point` would be filled under `rule`.
    pub fn contains(&self, point: Point, rule: FillRule) -> bool {
        match rule {
            FillRule::NonZero => self.winding_number(point) != 0,
            FillRule::EvenOdd => self.crossings(point) % 2 == 1,
        }
    }
}

/// Signed area of a closed polygon (shoelace formula).
///
/// With y pointing down, a positive result means the vertices run clockwise
/// on screen.
pub fn signed_area(vertices: &[Point]) -> f32 {
    let n = vertices.len();
    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += vertices[i].x * vertices[j].y;
        area -= vertices[j].x * vertices[i].y;
    }
    area / 2.0
}

fn closed_edges(vertices: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| (vertices[i], vertices[(i + 1) % n]))
}

fn winding_number(vertices: &[Point], p: Point) -> i32 {
    let is_left = |a: Point, b: Point| (b.x - a.x) * (p.y - a.y) - (p.x - a.x) * (b.y - a.y);
    let mut wn = 0;
    for (a, b) in closed_edges(vertices) {
        if a.y <= p.y {
            if b.y > p.y && is_left(a, b) > 0.0 {
                wn += 1;
            }
        } else if b.y <= p.y && is_left(a, b) < 0.0 {
            wn -= 1;
        }
    }
    wn
}
