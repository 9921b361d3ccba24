use crate::constants::*;
use crate::layout::{GridGeometry, compute_grid};
use crate::types::*;
use crate::units::Measurement;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output page size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PageSpec {
    pub width: Measurement,
    pub height: Measurement,
}

impl PageSpec {
    pub fn from_paper(paper: PaperSize, orientation: Orientation) -> Self {
        let (w, h) = paper.dimensions_with_orientation(orientation);
        Self {
            width: Measurement::mm(w),
            height: Measurement::mm(h),
        }
    }

    /// (width, height) in points
    pub fn size_pt(&self) -> (f64, f64) {
        (self.width.to_pt(), self.height.to_pt())
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::from_paper(PaperSize::A4, Orientation::Portrait)
    }
}

/// Trimmed card size
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardSpec {
    pub width: Measurement,
    pub height: Measurement,
}

impl CardSpec {
    pub fn size_pt(&self) -> (f64, f64) {
        (self.width.to_pt(), self.height.to_pt())
    }
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            width: Measurement::mm(DEFAULT_CARD_WIDTH_MM),
            height: Measurement::mm(DEFAULT_CARD_HEIGHT_MM),
        }
    }
}

/// Grid, barcode and mark settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridSpec {
    pub rows: usize,
    pub cols: usize,
    /// Space kept free above the grid. Not centered.
    pub margin_y: Measurement,
    pub crop_mark_length: Measurement,
    /// Stroke width of crop marks in points
    pub crop_mark_thickness: f64,
    /// Edge length of the square barcode
    pub qr_size: Measurement,
    /// Inset of the barcode from the card's bottom and right edges
    pub qr_margin: Measurement,
    /// Gap between the barcode's top edge and the code text baseline
    pub text_gap: Measurement,
    pub font_size_pt: f64,
}

impl GridSpec {
    /// Slots on one page
    pub fn per_page(&self) -> usize {
        self.rows * self.cols
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            margin_y: Measurement::pt(DEFAULT_MARGIN_Y_PT),
            crop_mark_length: Measurement::mm(DEFAULT_CROP_MARK_MM),
            crop_mark_thickness: CROP_MARK_WIDTH,
            qr_size: Measurement::pt(DEFAULT_QR_SIZE_PT),
            qr_margin: Measurement::pt(DEFAULT_QR_MARGIN_PT),
            text_gap: Measurement::pt(DEFAULT_TEXT_GAP_PT),
            font_size_pt: DEFAULT_FONT_SIZE_PT,
        }
    }
}

/// Complete sheet configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SheetConfig {
    pub page: PageSpec,
    pub card: CardSpec,
    pub grid: GridSpec,
}

impl SheetConfig {
    /// Validate the configuration and derive the grid geometry
    pub fn geometry(&self) -> Result<GridGeometry> {
        compute_grid(&self.page, &self.card, &self.grid)
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        self.geometry().map(|_| ())
    }
}
