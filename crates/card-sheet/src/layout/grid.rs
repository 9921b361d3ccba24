//! Grid layout calculation
//!
//! This module derives the card grid geometry from the configuration and
//! answers per-cell questions (bounds, outer edges).

use crate::constants::LAYOUT_EPSILON;
use crate::options::{CardSpec, GridSpec, PageSpec};
use crate::types::{Result, SheetError};

use super::{GridGeometry, OuterEdges, Rect, SlotPosition};

// =============================================================================
// Grid Creation
// =============================================================================

/// Compute the grid geometry for a page/card/grid combination.
///
/// The grid is centered horizontally; the vertical margin is taken as
/// configured and measured down from the top of the page. Every check runs
/// here so that rendering never discovers a bad configuration mid-document.
pub fn compute_grid(page: &PageSpec, card: &CardSpec, grid: &GridSpec) -> Result<GridGeometry> {
    if grid.rows == 0 {
        return Err(SheetError::layout("grid.rows", "must be at least 1"));
    }
    if grid.cols == 0 {
        return Err(SheetError::layout("grid.cols", "must be at least 1"));
    }

    let (page_width, page_height) = page.size_pt();
    let (card_width, card_height) = card.size_pt();

    require_positive("page.width", page_width)?;
    require_positive("page.height", page_height)?;
    require_positive("card.width", card_width)?;
    require_positive("card.height", card_height)?;
    require_positive("grid.font_size_pt", grid.font_size_pt)?;

    let margin_y = grid.margin_y.to_pt();
    let crop_mark_length = grid.crop_mark_length.to_pt();
    let qr_size = grid.qr_size.to_pt();
    let qr_margin = grid.qr_margin.to_pt();
    let text_gap = grid.text_gap.to_pt();

    require_non_negative("grid.margin_y", margin_y)?;
    require_non_negative("grid.crop_mark_length", crop_mark_length)?;
    require_non_negative("grid.crop_mark_thickness", grid.crop_mark_thickness)?;
    require_positive("grid.qr_size", qr_size)?;
    require_non_negative("grid.qr_margin", qr_margin)?;
    require_non_negative("grid.text_gap", text_gap)?;

    let grid_width = grid.cols as f64 * card_width;
    let margin_x = (page_width - grid_width) / 2.0;
    if margin_x < -LAYOUT_EPSILON {
        return Err(SheetError::layout(
            "card.width",
            format!(
                "{} columns of {:.3}pt need {:.3}pt but the page is {:.3}pt wide",
                grid.cols, card_width, grid_width, page_width
            ),
        ));
    }

    let grid_height = grid.rows as f64 * card_height;
    if grid_height + margin_y > page_height + LAYOUT_EPSILON {
        return Err(SheetError::layout(
            "grid.margin_y",
            format!(
                "{} rows of {:.3}pt plus a {:.3}pt margin exceed the {:.3}pt page height",
                grid.rows, card_height, margin_y, page_height
            ),
        ));
    }

    // inset from the right and bottom card edges only
    if qr_size + qr_margin > card_width.min(card_height) + LAYOUT_EPSILON {
        return Err(SheetError::layout(
            "grid.qr_size",
            format!(
                "a {:.3}pt barcode with a {:.3}pt inset does not fit a {:.3}x{:.3}pt card",
                qr_size, qr_margin, card_width, card_height
            ),
        ));
    }

    if qr_margin + qr_size + text_gap + grid.font_size_pt > card_height + LAYOUT_EPSILON {
        return Err(SheetError::layout(
            "grid.text_gap",
            format!(
                "code text above the barcode overflows the {:.3}pt card height",
                card_height
            ),
        ));
    }

    Ok(GridGeometry {
        page_width,
        page_height,
        rows: grid.rows,
        cols: grid.cols,
        card_width,
        card_height,
        margin_x: margin_x.max(0.0),
        margin_y,
        crop_mark_length,
        crop_mark_thickness: grid.crop_mark_thickness,
        qr_size,
        qr_margin,
        text_gap,
        font_size: grid.font_size_pt,
    })
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SheetError::layout(field, format!("must be positive, got {value}")))
    }
}

fn require_non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SheetError::layout(
            field,
            format!("must not be negative, got {value}"),
        ))
    }
}

// =============================================================================
// Cell Calculations
// =============================================================================

impl GridGeometry {
    /// Slots on one page
    pub fn per_page(&self) -> usize {
        self.rows * self.cols
    }

    /// Bounds of the whole card grid on the page
    pub fn grid_bounds(&self) -> Rect {
        let height = self.rows as f64 * self.card_height;
        Rect::new(
            self.margin_x,
            self.page_height - self.margin_y - height,
            self.cols as f64 * self.card_width,
            height,
        )
    }

    /// Bounds of the card at `slot`. Row 0 is the top row.
    pub fn slot_rect(&self, slot: SlotPosition) -> Rect {
        let x = self.margin_x + slot.col as f64 * self.card_width;
        let y = self.page_height - self.margin_y - (slot.row + 1) as f64 * self.card_height;
        Rect::new(x, y, self.card_width, self.card_height)
    }

    /// Edges of the cell that lie on the outside of the grid
    pub fn outer_edges(&self, slot: SlotPosition) -> OuterEdges {
        OuterEdges {
            top: slot.row == 0,
            bottom: slot.row + 1 == self.rows,
            left: slot.col == 0,
            right: slot.col + 1 == self.cols,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
