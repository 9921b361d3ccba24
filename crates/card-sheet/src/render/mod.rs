//! Slot rendering
//!
//! Turns one item plus its slot into plain draw commands. Nothing here touches
//! a PDF library; the assembler hands finished pages to a `PageSink`.

mod command;
mod marks;
mod slot;

pub use command::*;
pub use marks::{crop_mark_segments, crop_marks};
pub use slot::*;
