//! Layers and the stage that holds them.

use crate::geometry::{Point, Size};
use crate::node::Group;
use crate::transform::Transform;

/// Mouse cursor requested by the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Crosshair,
    Pointer,
}

/// A transformed list of groups. Groups are drawn in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub name: String,
    pub transform: Transform,
    pub groups: Vec<Group>,
}

impl Layer {
    pub fn new(name: impl Into<String>, transform: Transform) -> Self {
        Self {
            name: name.into(),
            transform,
            groups: Vec::new(),
        }
    }

    pub fn push(&mut self, group: Group) {
        self.groups.push(group);
    }

    /// Find the topmost group under a device-space point.
    ///
    /// Returns the group index and the index of the hit child.
    pub fn hit_test(&self, device: Point) -> Option<(usize, usize)> {
        let local = self.transform.invert(device);
        self.groups
            .iter()
            .enumerate()
            .rev()
            .find_map(|(gi, group)| group.hit_test(local).map(|ci| (gi, ci)))
    }

    /// Find a group by its key.
    pub fn group(&self, key: u64) -> Option<&Group> {
        self.groups.iter().find(|g| g.key == Some(key))
    }
}

/// The root of a rendered scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Stage {
    pub size: Size,
    pub layers: Vec<Layer>,
    pub cursor: Cursor,
}

impl Stage {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            layers: Vec::new(),
            cursor: Cursor::Default,
        }
    }

    pub fn push(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Find a layer by name.
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }
}
