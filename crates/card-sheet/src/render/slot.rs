//! Per-slot rendering

use crate::layout::{GridGeometry, Rect, SlotPosition};
use crate::types::{ImageRef, PrintItem, Result, SheetError};

use super::marks::crop_marks;
use super::{DrawCommand, Rgb};

/// Maps image references to rasters the backend can embed.
///
/// The renderer only asks whether a reference resolves; the backend fetches
/// the raster itself when it draws the page.
pub trait AssetResolver: Sync {
    fn is_resolvable(&self, image: &ImageRef) -> bool;
}

impl<R: AssetResolver + ?Sized> AssetResolver for &R {
    fn is_resolvable(&self, image: &ImageRef) -> bool {
        (**self).is_resolvable(image)
    }
}

/// Render one item into its slot.
///
/// Output order is fixed: background, barcode, code text, then crop marks for
/// the slot's outer edges.
pub fn render_slot<R: AssetResolver + ?Sized>(
    item: &PrintItem,
    slot: SlotPosition,
    geometry: &GridGeometry,
    resolver: &R,
) -> Result<Vec<DrawCommand>> {
    let background = ImageRef::Template(item.background.clone());
    let barcode = ImageRef::Barcode(item.barcode_payload.clone());

    for image in [&background, &barcode] {
        if !resolver.is_resolvable(image) {
            log::warn!(
                "Item {} has no {} image (page {}, row {}, col {})",
                item.id,
                image.kind(),
                slot.page_index,
                slot.row,
                slot.col
            );
            return Err(SheetError::MissingAsset {
                item_id: item.id.clone(),
                slot,
                asset: image.kind(),
            });
        }
    }

    let card = geometry.slot_rect(slot);
    let qr_x = card.right() - geometry.qr_size - geometry.qr_margin;
    let qr_y = card.y + geometry.qr_margin;

    let mut commands = Vec::with_capacity(11);
    commands.push(DrawCommand::PlaceImage {
        image: background,
        rect: card,
    });
    commands.push(DrawCommand::PlaceImage {
        image: barcode,
        rect: Rect::new(qr_x, qr_y, geometry.qr_size, geometry.qr_size),
    });
    commands.push(DrawCommand::PlaceText {
        text: item.human_code.clone(),
        x: qr_x,
        y: qr_y + geometry.qr_size + geometry.text_gap,
        font_size: geometry.font_size,
        color: Rgb::BLACK,
    });
    commands.extend(crop_marks(geometry, slot, &card));

    Ok(commands)
}
