//! Layout data types
//!
//! All coordinates are PDF points with the origin at the bottom-left corner
//! of the page.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in page space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangular area in points
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// X position (left edge)
    pub x: f64,
    /// Y position (bottom edge)
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f64 {
        self.y + self.height
    }
}

/// Where one item lands: page and grid cell (row 0 is the top row)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotPosition {
    pub page_index: usize,
    pub row: usize,
    pub col: usize,
}

impl SlotPosition {
    pub fn new(page_index: usize, row: usize, col: usize) -> Self {
        Self {
            page_index,
            row,
            col,
        }
    }
}

/// One edge of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

/// Which edges of a cell lie on the outside of the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OuterEdges {
    pub top: bool,
    pub bottom: bool,
    pub left: bool,
    pub right: bool,
}

impl OuterEdges {
    /// Outer edges in drawing order (top, bottom, left, right)
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        [
            (self.top, Edge::Top),
            (self.bottom, Edge::Bottom),
            (self.left, Edge::Left),
            (self.right, Edge::Right),
        ]
        .into_iter()
        .filter_map(|(on, edge)| on.then_some(edge))
    }

    pub fn count(&self) -> usize {
        self.edges().count()
    }
}

/// Grid geometry derived from page, card and grid settings.
///
/// Pure function of the configuration; compute once and reuse for every slot
/// and every document with the same settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub page_width: f64,
    pub page_height: f64,
    pub rows: usize,
    pub cols: usize,
    /// Card size doubles as the pitch: there is no gutter
    pub card_width: f64,
    pub card_height: f64,
    /// Horizontal margin, centers the grid
    pub margin_x: f64,
    /// Space above the grid, as configured
    pub margin_y: f64,
    pub crop_mark_length: f64,
    pub crop_mark_thickness: f64,
    pub qr_size: f64,
    pub qr_margin: f64,
    pub text_gap: f64,
    pub font_size: f64,
}
