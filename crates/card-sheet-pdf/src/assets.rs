//! Image resolution for a print batch
//!
//! Templates are decoded once when they are added. Barcodes are rasterized
//! from their payload each time they are drawn, so nothing per-item stays in
//! memory after its page is written.

use crate::types::*;
use card_sheet::{AssetResolver, ImageRef, TemplateRef};
use image::{Rgb, RgbImage};
use qrcode::{Color, QrCode};
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

/// Light modules around the code (minimum quiet zone for QR)
const QUIET_ZONE_MODULES: u32 = 4;

/// Pixels per QR module in the embedded raster
const MODULE_PX: u32 = 4;

/// Rasters for one batch: background templates plus on-demand barcodes
#[derive(Debug, Default)]
pub struct BatchAssets {
    templates: HashMap<TemplateRef, RgbImage>,
}

impl BatchAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an already decoded template
    pub fn with_template(mut self, name: &str, image: RgbImage) -> (Self, TemplateRef) {
        let template = TemplateRef::new(name);
        self.templates.insert(template.clone(), image);
        (self, template)
    }

    /// Decode template image bytes (PNG, JPEG, ...) and register them
    pub fn add_template(&mut self, name: &str, bytes: &[u8]) -> Result<TemplateRef> {
        let image = image::load_from_memory(bytes)?.to_rgb8();
        log::debug!(
            "Decoded template {} ({}x{} px)",
            name,
            image.width(),
            image.height()
        );
        let template = TemplateRef::new(name);
        self.templates.insert(template.clone(), image);
        Ok(template)
    }

    /// Read and decode a template file; it is registered under its file stem
    pub async fn load_template(&mut self, path: impl AsRef<Path>) -> Result<TemplateRef> {
        let path = path.as_ref().to_owned();
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "template".to_string());

        let bytes = tokio::fs::read(&path).await?;
        let image =
            tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await??;

        let template = TemplateRef::new(name.as_str());
        self.templates.insert(template.clone(), image.to_rgb8());
        Ok(template)
    }

    pub fn template(&self, template: &TemplateRef) -> Option<&RgbImage> {
        self.templates.get(template)
    }

    /// Raster for any image reference. Templates are borrowed, barcodes are
    /// generated fresh.
    pub fn raster(&self, image: &ImageRef) -> Option<Cow<'_, RgbImage>> {
        match image {
            ImageRef::Template(template) => self.template(template).map(Cow::Borrowed),
            ImageRef::Barcode(payload) => barcode_raster(payload).map(Cow::Owned),
        }
    }
}

impl AssetResolver for BatchAssets {
    fn is_resolvable(&self, image: &ImageRef) -> bool {
        match image {
            ImageRef::Template(template) => self.templates.contains_key(template),
            ImageRef::Barcode(payload) => !payload.is_empty() && QrCode::new(payload).is_ok(),
        }
    }
}

/// Rasterize `payload` as a QR code with a quiet zone.
///
/// Returns `None` for empty payloads and payloads too long to encode.
pub fn barcode_raster(payload: &str) -> Option<RgbImage> {
    if payload.is_empty() {
        return None;
    }
    let code = QrCode::new(payload).ok()?;
    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_ZONE_MODULES) * MODULE_PX;

    let image = RgbImage::from_fn(side, side, |px, py| {
        let mx = (px / MODULE_PX).checked_sub(QUIET_ZONE_MODULES);
        let my = (py / MODULE_PX).checked_sub(QUIET_ZONE_MODULES);
        match (mx, my) {
            (Some(mx), Some(my)) if mx < modules && my < modules => {
                match colors[(my * modules + mx) as usize] {
                    Color::Dark => Rgb([0, 0, 0]),
                    Color::Light => Rgb([255, 255, 255]),
                }
            }
            _ => Rgb([255, 255, 255]),
        }
    });
    Some(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_barcode_has_quiet_zone() {
        let image = barcode_raster("LC-00001").unwrap();
        assert_eq!(image.width(), image.height());
        // version 1 code: 21 modules + 2 * 4 quiet modules
        assert_eq!(image.width(), (21 + 8) * MODULE_PX);
        assert_eq!(image.get_pixel(0, 0), &Rgb([255, 255, 255]));
        // top-left finder pattern starts right after the quiet zone
        let start = QUIET_ZONE_MODULES * MODULE_PX;
        assert_eq!(image.get_pixel(start, start), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_unencodable_payloads() {
        assert!(barcode_raster("").is_none());
        assert!(barcode_raster(&"x".repeat(5000)).is_none());

        let assets = BatchAssets::new();
        assert!(!assets.is_resolvable(&ImageRef::Barcode(String::new())));
        assert!(!assets.is_resolvable(&ImageRef::Barcode("9".repeat(8000))));
        assert!(assets.is_resolvable(&ImageRef::Barcode("https://loyalty.example/c/1".into())));
    }

    #[test]
    fn test_templates_resolve_by_name() {
        let (assets, template) = BatchAssets::new().with_template("front", RgbImage::new(8, 5));

        assert!(assets.is_resolvable(&ImageRef::Template(template.clone())));
        assert!(!assets.is_resolvable(&ImageRef::Template(TemplateRef::new("back"))));
        assert_eq!(assets.raster(&ImageRef::Template(template)).unwrap().width(), 8);
    }

    #[test]
    fn test_add_template_rejects_garbage() {
        let mut assets = BatchAssets::new();
        let err = assets.add_template("broken", b"not an image").unwrap_err();
        assert!(matches!(err, PdfError::Image(_)));
    }
}
