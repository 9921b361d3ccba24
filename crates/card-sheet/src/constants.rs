//! Shared constants for sheet layout
//!
//! Centralizes the unit factors and the default card/sheet dimensions used
//! when no configuration is supplied.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per inch (PDF user space)
pub const POINTS_PER_INCH: f64 = 72.0;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Points per millimeter (1 inch = 72 points, 1 inch = 25.4mm)
pub const POINTS_PER_MM: f64 = POINTS_PER_INCH / MM_PER_INCH; // ≈ 2.83465

// =============================================================================
// Default Card Dimensions
// =============================================================================

/// Default card width (ID-1 style loyalty card, rounded)
pub const DEFAULT_CARD_WIDTH_MM: f64 = 85.0;

/// Default card height
pub const DEFAULT_CARD_HEIGHT_MM: f64 = 55.0;

/// Default grid: 5 rows of 2 cards
pub const DEFAULT_ROWS: usize = 5;
pub const DEFAULT_COLS: usize = 2;

/// Space reserved above the grid (points)
pub const DEFAULT_MARGIN_Y_PT: f64 = 36.0;

// =============================================================================
// Barcode and Code Text
// =============================================================================

/// Edge length of the square barcode (points)
pub const DEFAULT_QR_SIZE_PT: f64 = 60.0;

/// Inset of the barcode from the card's bottom-right corner (points)
pub const DEFAULT_QR_MARGIN_PT: f64 = 10.0;

/// Gap between the top of the barcode and the code baseline (points)
pub const DEFAULT_TEXT_GAP_PT: f64 = 4.0;

/// Font size of the human-readable code (points)
pub const DEFAULT_FONT_SIZE_PT: f64 = 9.0;

// =============================================================================
// Printer's Marks
// =============================================================================

/// Length of crop marks
pub const DEFAULT_CROP_MARK_MM: f64 = 5.0;

/// Line width for crop marks (points)
pub const CROP_MARK_WIDTH: f64 = 0.25;

/// Tolerance used when validating that the grid fits the page (points)
pub const LAYOUT_EPSILON: f64 = 1e-6;
