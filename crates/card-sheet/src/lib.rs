//! Card sheet layout engine
//!
//! Arranges print items (loyalty cards) into fixed page grids, overlays a
//! barcode and a human-readable code per card, and adds crop marks on the
//! outer edges of the grid. Output is a stream of plain draw-command pages;
//! image decoding and PDF serialization live behind [`AssetResolver`] and
//! [`PageSink`].

pub mod assemble;
mod constants;
pub mod layout;
mod options;
pub mod paginate;
pub mod render;
mod stats;
mod types;
pub mod units;

pub use assemble::{Assembler, CancelToken, assemble};
pub use constants::*;
pub use layout::{GridGeometry, Point, Rect, SlotPosition, compute_grid};
pub use options::*;
pub use paginate::{page_count, paginate, slot_position};
pub use render::{AssetResolver, DrawCommand, Document, Page, PageSink, Rgb, render_slot};
pub use stats::calculate_statistics;
pub use types::*;
pub use units::{Measurement, Unit, mm_to_pt, pt_to_mm};
