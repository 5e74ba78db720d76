//! Layout tree management

use crate::error::{LayoutError, Result};
use folio_core::Rect;
use slotmap::{new_key_type, SlotMap};
use taffy as tf;

new_key_type! {
    pub struct LayoutNodeId;
}

/// Maps between folio node IDs and Taffy node IDs
pub struct LayoutTree {
    taffy: tf::TaffyTree<()>,
    node_map: SlotMap<LayoutNodeId, tf::NodeId>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self {
            taffy: tf::TaffyTree::new(),
            node_map: SlotMap::with_key(),
        }
    }

    /// Create a new layout node with the given style
    pub fn create_node(&mut self, style: tf::Style) -> Result<LayoutNodeId> {
        let taffy_node = self.taffy.new_leaf(style).map_err(LayoutError::taffy)?;
        Ok(self.node_map.insert(taffy_node))
    }

    /// Add a child to a parent node
    pub fn add_child(&mut self, parent: LayoutNodeId, child: LayoutNodeId) -> Result<()> {
        let (Some(&parent_node), Some(&child_node)) =
            (self.node_map.get(parent), self.node_map.get(child))
        else {
            return Err(LayoutError::UnknownNode);
        };
        self.taffy
            .add_child(parent_node, child_node)
            .map_err(LayoutError::taffy)
    }

    /// Compute layout for a tree rooted at the given node, with a definite
    /// width and unbounded height
    pub fn compute_layout(&mut self, root: LayoutNodeId, width: f32) -> Result<()> {
        let &taffy_node = self.node_map.get(root).ok_or(LayoutError::UnknownNode)?;
        let available = tf::Size {
            width: tf::AvailableSpace::Definite(width),
            height: tf::AvailableSpace::MaxContent,
        };
        self.taffy
            .compute_layout(taffy_node, available)
            .map_err(LayoutError::taffy)
    }

    /// Get the computed layout for a node, relative to its parent
    pub fn get_layout(&self, id: LayoutNodeId) -> Option<&tf::Layout> {
        self.node_map
            .get(id)
            .and_then(|&taffy_node| self.taffy.layout(taffy_node).ok())
    }

    /// Computed rect of a node in root coordinates
    pub fn absolute_rect(&self, id: LayoutNodeId) -> Option<Rect> {
        let &node = self.node_map.get(id)?;
        let layout = self.taffy.layout(node).ok()?;
        let (mut x, mut y) = (layout.location.x, layout.location.y);

        let mut current = node;
        while let Some(parent) = self.taffy.parent(current) {
            let parent_layout = self.taffy.layout(parent).ok()?;
            x += parent_layout.location.x;
            y += parent_layout.location.y;
            current = parent;
        }

        Some(Rect::new(x, y, layout.size.width, layout.size.height))
    }

    /// Remove a node
    pub fn remove_node(&mut self, id: LayoutNodeId) {
        if let Some(taffy_node) = self.node_map.remove(id) {
            let _ = self.taffy.remove(taffy_node);
        }
    }
}

impl Default for LayoutTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taffy::prelude::{length, percent, zero};

    fn fixed_height(height: f32) -> tf::Style {
        tf::Style {
            size: tf::Size {
                width: percent(1.0),
                height: length(height),
            },
            flex_shrink: 0.0,
            ..Default::default()
        }
    }

    fn column(width: f32) -> tf::Style {
        tf::Style {
            flex_direction: tf::FlexDirection::Column,
            size: tf::Size {
                width: length(width),
                height: tf::Dimension::Auto,
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_column_stacks_children() {
        let mut tree = LayoutTree::new();
        let root = tree
            .create_node(column(800.0))
            .unwrap();
        let a = tree.create_node(fixed_height(100.0)).unwrap();
        let b = tree.create_node(fixed_height(250.0)).unwrap();
        tree.add_child(root, a).unwrap();
        tree.add_child(root, b).unwrap();

        tree.compute_layout(root, 800.0).unwrap();

        assert_eq!(tree.absolute_rect(a), Some(Rect::new(0.0, 0.0, 800.0, 100.0)));
        assert_eq!(tree.absolute_rect(b), Some(Rect::new(0.0, 100.0, 800.0, 250.0)));
        assert_eq!(tree.get_layout(root).map(|l| l.size.height), Some(350.0));
    }

    #[test]
    fn test_nested_positions_are_absolute() {
        let mut tree = LayoutTree::new();
        let root = tree
            .create_node(column(500.0))
            .unwrap();
        let spacer = tree.create_node(fixed_height(40.0)).unwrap();
        let section = tree
            .create_node(tf::Style {
                flex_direction: tf::FlexDirection::Column,
                padding: tf::Rect {
                    left: zero(),
                    right: zero(),
                    top: length(10.0),
                    bottom: length(10.0),
                },
                ..Default::default()
            })
            .unwrap();
        let inner = tree.create_node(fixed_height(20.0)).unwrap();
        tree.add_child(root, spacer).unwrap();
        tree.add_child(root, section).unwrap();
        tree.add_child(section, inner).unwrap();

        tree.compute_layout(root, 500.0).unwrap();

        assert_eq!(tree.absolute_rect(inner).map(|r| r.y()), Some(50.0));
        tree.remove_node(inner);
        assert_eq!(tree.absolute_rect(inner), None);
    }
}
