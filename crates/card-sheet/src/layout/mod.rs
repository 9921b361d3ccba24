//! Layout calculation modules
//!
//! - Grid geometry (margins, card pitch, validation)
//! - Cell bounds and outer-edge classification

mod grid;
mod types;

pub use grid::*;
pub use types::*;
