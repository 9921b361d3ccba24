//! PDF output for card sheets
//!
//! Concrete collaborators for the `card-sheet` engine: template and QR code
//! rasters ([`BatchAssets`]), a printpdf page sink ([`PdfSheetWriter`]) and
//! the async file I/O around them.

mod assets;
mod config;
mod generate;
mod items;
mod types;
mod writer;

pub use assets::{BatchAssets, barcode_raster};
pub use config::{load_config, save_config};
pub use generate::{GenerateOptions, GeneratedPdf, generate_pdf, generate_pdf_bytes};
pub use items::{load_items_csv, parse_items_csv};
pub use types::*;
pub use writer::PdfSheetWriter;
