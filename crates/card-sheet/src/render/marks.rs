//! Crop marks for cards on the outside of the grid
//!
//! Only edges on the grid boundary get marks. Each marked edge gets a tick at
//! both of its ends, continuing the neighbouring cut lines outward. A tick
//! shared with the card to the left or above is drawn once, by that card.

use crate::layout::{Edge, GridGeometry, Point, Rect, SlotPosition};

use super::{DrawCommand, Rgb};

/// Tick segments for one edge of `card`
pub fn crop_mark_segments(edge: Edge, card: &Rect, length: f64) -> [(Point, Point); 2] {
    match edge {
        Edge::Top => [
            (Point::new(card.x, card.top()), Point::new(card.x, card.top() + length)),
            (
                Point::new(card.right(), card.top()),
                Point::new(card.right(), card.top() + length),
            ),
        ],
        Edge::Bottom => [
            (Point::new(card.x, card.y), Point::new(card.x, card.y - length)),
            (
                Point::new(card.right(), card.y),
                Point::new(card.right(), card.y - length),
            ),
        ],
        Edge::Left => [
            (Point::new(card.x, card.y), Point::new(card.x - length, card.y)),
            (
                Point::new(card.x, card.top()),
                Point::new(card.x - length, card.top()),
            ),
        ],
        Edge::Right => [
            (
                Point::new(card.right(), card.y),
                Point::new(card.right() + length, card.y),
            ),
            (
                Point::new(card.right(), card.top()),
                Point::new(card.right() + length, card.top()),
            ),
        ],
    }
}

/// Whether the tick at `end` (0 = left/bottom, 1 = right/top) of `edge` is
/// already drawn by an earlier card in the same grid line
fn shared_with_previous(edge: Edge, end: usize, slot: SlotPosition) -> bool {
    match edge {
        Edge::Top | Edge::Bottom => end == 0 && slot.col > 0,
        Edge::Left | Edge::Right => end == 1 && slot.row > 0,
    }
}

/// Crop mark lines for the card at `slot`.
///
/// Cards fill the grid row by row, so the card to the left and the card above
/// are always present when this one is.
pub fn crop_marks(geometry: &GridGeometry, slot: SlotPosition, card: &Rect) -> Vec<DrawCommand> {
    if geometry.crop_mark_length <= 0.0 {
        return Vec::new();
    }

    geometry
        .outer_edges(slot)
        .edges()
        .flat_map(|edge| {
            crop_mark_segments(edge, card, geometry.crop_mark_length)
                .into_iter()
                .enumerate()
                .filter(move |(end, _)| !shared_with_previous(edge, *end, slot))
                .map(|(_, segment)| segment)
        })
        .map(|(from, to)| DrawCommand::DrawLine {
            from,
            to,
            thickness: geometry.crop_mark_thickness,
            color: Rgb::BLACK,
        })
        .collect()
}
