use crate::layout::SlotPosition;
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SheetError {
    #[error("Invalid layout ({field}): {reason}")]
    InvalidLayout { field: &'static str, reason: String },
    #[error("Missing {asset} image for item {item_id} (page {}, row {}, col {})", .slot.page_index, .slot.row, .slot.col)]
    MissingAsset {
        item_id: String,
        slot: SlotPosition,
        asset: AssetKind,
    },
    #[error("Generation cancelled after {pages_written} page(s)")]
    Cancelled { pages_written: usize },
    #[error("Page sink error: {0}")]
    Sink(String),
}

impl SheetError {
    pub(crate) fn layout(field: &'static str, reason: impl Into<String>) -> Self {
        SheetError::InvalidLayout {
            field,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;

/// Paper orientation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Orientation {
    /// Portrait: height > width (default for most paper sizes)
    #[default]
    Portrait,
    /// Landscape: width > height
    Landscape,
}

/// Standard paper sizes
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PaperSize {
    A3,
    A4,
    A5,
    Letter,
    Legal,
    Tabloid,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// Get base dimensions (always portrait: width < height for standard sizes)
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Legal => (215.9, 355.6),
            PaperSize::Tabloid => (279.4, 431.8),
            PaperSize::Custom {
                width_mm,
                height_mm,
            } => (width_mm, height_mm),
        }
    }

    /// Get dimensions with orientation applied
    pub fn dimensions_with_orientation(self, orientation: Orientation) -> (f64, f64) {
        let (w, h) = self.dimensions_mm();
        match orientation {
            Orientation::Portrait => (w, h),
            Orientation::Landscape => (h, w),
        }
    }
}

/// Shared reference to a batch's background template.
///
/// The engine never looks inside; the asset resolver maps it to a raster.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TemplateRef(Arc<str>);

impl TemplateRef {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One card's printable identity
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintItem {
    pub id: String,
    /// Code printed in plain text above the barcode
    pub human_code: String,
    /// String encoded into the barcode
    pub barcode_payload: String,
    pub background: TemplateRef,
}

impl PrintItem {
    pub fn new(
        id: impl Into<String>,
        human_code: impl Into<String>,
        barcode_payload: impl Into<String>,
        background: TemplateRef,
    ) -> Self {
        Self {
            id: id.into(),
            human_code: human_code.into(),
            barcode_payload: barcode_payload.into(),
            background,
        }
    }
}

/// Image referenced by a draw command
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ImageRef {
    /// The batch background template
    Template(TemplateRef),
    /// A barcode rendered from this payload
    Barcode(String),
}

impl ImageRef {
    pub fn kind(&self) -> AssetKind {
        match self {
            ImageRef::Template(_) => AssetKind::Background,
            ImageRef::Barcode(_) => AssetKind::Barcode,
        }
    }
}

/// Which of an item's images failed to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AssetKind {
    Background,
    Barcode,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Background => f.write_str("background"),
            AssetKind::Barcode => f.write_str("barcode"),
        }
    }
}

/// Statistics about a print run
#[derive(Debug, Clone, PartialEq)]
pub struct SheetStatistics {
    /// Number of items in the batch
    pub items: usize,
    /// Slots on one page (rows * cols)
    pub slots_per_page: usize,
    /// Number of output pages
    pub pages: usize,
    /// Occupied slots on the last page (0 when there are no pages)
    pub last_page_slots: usize,
    /// Unoccupied slots on the last page
    pub empty_slots: usize,
}
