//! Draw commands and the page/document containers that hold them

use crate::layout::{Point, Rect};
use crate::types::{ImageRef, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// RGB color, components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };
}

/// One drawing operation. Plain data: resolving images and fonts is the
/// backend's job.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrawCommand {
    PlaceImage {
        image: ImageRef,
        rect: Rect,
    },
    /// Text with its baseline starting at (x, y)
    PlaceText {
        text: String,
        x: f64,
        y: f64,
        font_size: f64,
        color: Rgb,
    },
    DrawLine {
        from: Point,
        to: Point,
        thickness: f64,
        color: Rgb,
    },
}

impl DrawCommand {
    pub fn is_line(&self) -> bool {
        matches!(self, DrawCommand::DrawLine { .. })
    }
}

/// One finished output page
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Page {
    pub index: usize,
    pub width: f64,
    pub height: f64,
    /// Number of occupied slots
    pub slots: usize,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    /// Background images, one per rendered slot
    pub fn backgrounds(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands.iter().filter(|cmd| {
            matches!(
                cmd,
                DrawCommand::PlaceImage {
                    image: ImageRef::Template(_),
                    ..
                }
            )
        })
    }
}

/// Ordered list of pages
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Receives finished pages in page order.
///
/// Pages are handed over by value; the assembler keeps no reference to a page
/// once it has been written.
pub trait PageSink {
    fn write_page(&mut self, page: Page) -> Result<()>;
}

impl PageSink for Document {
    fn write_page(&mut self, page: Page) -> Result<()> {
        self.pages.push(page);
        Ok(())
    }
}

impl<S: PageSink + ?Sized> PageSink for &mut S {
    fn write_page(&mut self, page: Page) -> Result<()> {
        (**self).write_page(page)
    }
}
