//! Pagination: splitting items into page-sized groups
//!
//! The slot cursor is an explicit `(page_index, row, col)` value computed from
//! the item's global index; nothing here keeps state between calls.

use crate::layout::SlotPosition;
use crate::types::PrintItem;

/// Map a global item index to its page and grid cell
///
/// # Panics
/// Panics if `rows` or `cols` is zero. Geometry validation rejects empty
/// grids before any slot is computed.
pub fn slot_position(global_index: usize, rows: usize, cols: usize) -> SlotPosition {
    assert!(rows > 0 && cols > 0, "grid must have at least one row and column");
    let per_page = rows * cols;
    let local = global_index % per_page;
    SlotPosition {
        page_index: global_index / per_page,
        row: local / cols,
        col: local % cols,
    }
}

/// Number of pages needed for `item_count` items
pub fn page_count(item_count: usize, per_page: usize) -> usize {
    if item_count == 0 {
        0
    } else {
        item_count.div_ceil(per_page)
    }
}

/// The items that land on one page
#[derive(Debug, Clone, Copy)]
pub struct PageGroup<'a> {
    pub page_index: usize,
    /// Global index of the first item on this page
    pub first_index: usize,
    pub items: &'a [PrintItem],
}

impl<'a> PageGroup<'a> {
    /// Items paired with their slot, in reading order
    pub fn slots(
        self,
        rows: usize,
        cols: usize,
    ) -> impl Iterator<Item = (SlotPosition, &'a PrintItem)> + 'a {
        let first = self.first_index;
        self.items
            .iter()
            .enumerate()
            .map(move |(offset, item)| (slot_position(first + offset, rows, cols), item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Lazy sequence of page groups.
///
/// Cloning yields an independent iterator starting from the same position,
/// so the sequence can be walked more than once.
#[derive(Debug, Clone)]
pub struct PageGroups<'a> {
    items: &'a [PrintItem],
    per_page: usize,
    next_page: usize,
}

impl<'a> Iterator for PageGroups<'a> {
    type Item = PageGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.next_page * self.per_page;
        if start >= self.items.len() {
            return None;
        }
        let end = (start + self.per_page).min(self.items.len());
        let group = PageGroup {
            page_index: self.next_page,
            first_index: start,
            items: &self.items[start..end],
        };
        self.next_page += 1;
        Some(group)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining =
            page_count(self.items.len(), self.per_page).saturating_sub(self.next_page);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PageGroups<'_> {}

/// Split `items` into groups of `per_page`; the last group may be shorter.
///
/// # Panics
/// Panics if `per_page` is zero. Geometry validation rejects empty grids
/// before pagination runs.
pub fn paginate(items: &[PrintItem], per_page: usize) -> PageGroups<'_> {
    assert!(per_page > 0, "per_page must be positive");
    PageGroups {
        items,
        per_page,
        next_page: 0,
    }
}
