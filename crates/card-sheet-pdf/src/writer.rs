use crate::assets::BatchAssets;
use crate::types::*;
use card_sheet::{DrawCommand, ImageRef, Page, PageSink, SheetError, TemplateRef};
use printpdf::{
    BuiltinFont, Color, Line, LinePoint, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt,
    RawImage, RawImageData, RawImageFormat, TextItem, XObjectId, XObjectTransform,
};
use std::collections::HashMap;

/// printpdf backend for the card sheet engine.
///
/// Coordinates are in points with the origin at the bottom-left corner of the
/// page. Each template is embedded once and reused by every card drawing it.
pub struct PdfSheetWriter<'a> {
    doc: PdfDocument,
    assets: &'a BatchAssets,
    templates: HashMap<TemplateRef, XObjectId>,
    current: Option<PendingPage>,
    pages_written: usize,
}

struct PendingPage {
    width: f64,
    height: f64,
    ops: Vec<Op>,
}

impl<'a> PdfSheetWriter<'a> {
    pub fn new(title: &str, assets: &'a BatchAssets) -> Self {
        Self {
            doc: PdfDocument::new(title),
            assets,
            templates: HashMap::new(),
            current: None,
            pages_written: 0,
        }
    }

    pub fn pages_written(&self) -> usize {
        self.pages_written
    }

    /// Start a new page, finishing the current one first
    pub fn create_page(&mut self, width: f64, height: f64) {
        self.finish_page();
        self.current = Some(PendingPage {
            width,
            height,
            ops: Vec::new(),
        });
    }

    /// Scale `image` into `rect`
    pub fn draw_image(&mut self, image: &ImageRef, rect: &card_sheet::Rect) -> Result<()> {
        let (id, px_width, px_height) = match image {
            ImageRef::Template(template) => self.template_xobject(template)?,
            ImageRef::Barcode(payload) => {
                let raster = crate::assets::barcode_raster(payload).ok_or_else(|| {
                    PdfError::Pdf(format!("barcode payload cannot be encoded: {payload:?}"))
                })?;
                self.embed(raster)
            }
        };

        // at 72 dpi one pixel is one point
        let transform = XObjectTransform {
            translate_x: Some(Pt(rect.x as f32)),
            translate_y: Some(Pt(rect.y as f32)),
            scale_x: Some((rect.width / px_width as f64) as f32),
            scale_y: Some((rect.height / px_height as f64) as f32),
            dpi: Some(72.0),
            ..Default::default()
        };
        self.ops()?.push(Op::UseXobject { id, transform });
        Ok(())
    }

    pub fn draw_line(
        &mut self,
        from: card_sheet::Point,
        to: card_sheet::Point,
        thickness: f64,
        color: card_sheet::Rgb,
    ) -> Result<()> {
        let ops = self.ops()?;
        ops.push(Op::SaveGraphicsState);
        ops.push(Op::SetOutlineColor {
            col: pdf_color(color),
        });
        ops.push(Op::SetOutlineThickness {
            pt: Pt(thickness as f32),
        });
        ops.push(Op::DrawLine {
            line: Line {
                points: vec![line_point(from), line_point(to)],
                is_closed: false,
            },
        });
        ops.push(Op::RestoreGraphicsState);
        Ok(())
    }

    /// Helvetica text with its baseline starting at (x, y)
    pub fn draw_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        size: f64,
        color: card_sheet::Rgb,
    ) -> Result<()> {
        let ops = self.ops()?;
        ops.push(Op::SaveGraphicsState);
        ops.push(Op::SetFillColor {
            col: pdf_color(color),
        });
        ops.push(Op::StartTextSection);
        ops.push(Op::SetTextCursor {
            pos: printpdf::Point {
                x: Pt(x as f32),
                y: Pt(y as f32),
            },
        });
        ops.push(Op::SetFontSizeBuiltinFont {
            font: BuiltinFont::Helvetica,
            size: Pt(size as f32),
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font: BuiltinFont::Helvetica,
        });
        ops.push(Op::EndTextSection);
        ops.push(Op::RestoreGraphicsState);
        Ok(())
    }

    /// Close the current page, if any
    pub fn finish_page(&mut self) {
        if let Some(page) = self.current.take() {
            self.doc.pages.push(PdfPage::new(
                Mm::from(Pt(page.width as f32)),
                Mm::from(Pt(page.height as f32)),
                page.ops,
            ));
            self.pages_written += 1;
        }
    }

    /// Serialize the document
    pub fn save(mut self) -> Vec<u8> {
        self.finish_page();
        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("printpdf reported {} warnings", warnings.len());
        }
        bytes
    }

    fn ops(&mut self) -> Result<&mut Vec<Op>> {
        self.current
            .as_mut()
            .map(|page| &mut page.ops)
            .ok_or_else(|| PdfError::Pdf("no page started".to_string()))
    }

    fn template_xobject(&mut self, template: &TemplateRef) -> Result<(XObjectId, u32, u32)> {
        let assets = self.assets;
        let raster = assets
            .template(template)
            .ok_or_else(|| PdfError::Pdf(format!("unknown template {template}")))?;
        let (width, height) = raster.dimensions();

        if let Some(id) = self.templates.get(template) {
            return Ok((id.clone(), width, height));
        }
        let (id, _, _) = self.embed(raster.clone());
        self.templates.insert(template.clone(), id.clone());
        Ok((id, width, height))
    }

    fn embed(&mut self, raster: image::RgbImage) -> (XObjectId, u32, u32) {
        let (width, height) = raster.dimensions();
        let image = RawImage {
            pixels: RawImageData::U8(raster.into_raw()),
            width: width as usize,
            height: height as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };
        (self.doc.add_image(&image), width, height)
    }

    fn write(&mut self, page: Page) -> Result<()> {
        self.create_page(page.width, page.height);
        for cmd in page.commands {
            match cmd {
                DrawCommand::PlaceImage { image, rect } => self.draw_image(&image, &rect)?,
                DrawCommand::PlaceText {
                    text,
                    x,
                    y,
                    font_size,
                    color,
                } => self.draw_text(&text, x, y, font_size, color)?,
                DrawCommand::DrawLine {
                    from,
                    to,
                    thickness,
                    color,
                } => self.draw_line(from, to, thickness, color)?,
            }
        }
        self.finish_page();
        log::debug!("Wrote page {} to PDF", page.index + 1);
        Ok(())
    }
}

impl PageSink for PdfSheetWriter<'_> {
    fn write_page(&mut self, page: Page) -> card_sheet::Result<()> {
        self.write(page).map_err(|e| SheetError::Sink(e.to_string()))
    }
}

fn pdf_color(color: card_sheet::Rgb) -> Color {
    Color::Rgb(printpdf::Rgb {
        r: color.r as f32,
        g: color.g as f32,
        b: color.b as f32,
        icc_profile: None,
    })
}

fn line_point(point: card_sheet::Point) -> LinePoint {
    LinePoint {
        p: printpdf::Point {
            x: Pt(point.x as f32),
            y: Pt(point.y as f32),
        },
        bezier: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use card_sheet::{Point, Rect, Rgb};
    use image::RgbImage;

    #[test]
    fn test_drawing_without_page_fails() {
        let assets = BatchAssets::new();
        let mut writer = PdfSheetWriter::new("test", &assets);
        let err = writer
            .draw_line(Point::new(0.0, 0.0), Point::new(1.0, 1.0), 0.25, Rgb::BLACK)
            .unwrap_err();
        assert!(matches!(err, PdfError::Pdf(_)));
    }

    #[test]
    fn test_template_embedded_once() {
        let (assets, template) = BatchAssets::new().with_template("bg", RgbImage::new(4, 4));
        let mut writer = PdfSheetWriter::new("test", &assets);
        writer.create_page(200.0, 200.0);
        let image = ImageRef::Template(template);
        writer.draw_image(&image, &Rect::new(0.0, 0.0, 40.0, 20.0)).unwrap();
        writer.draw_image(&image, &Rect::new(50.0, 0.0, 40.0, 20.0)).unwrap();
        assert_eq!(writer.templates.len(), 1);
    }

    #[test]
    fn test_pages_counted() {
        let assets = BatchAssets::new();
        let mut writer = PdfSheetWriter::new("test", &assets);
        writer.create_page(100.0, 100.0);
        writer.draw_text("LC-1", 10.0, 10.0, 9.0, Rgb::BLACK).unwrap();
        writer.create_page(100.0, 100.0);
        writer.finish_page();
        assert_eq!(writer.pages_written(), 2);
        assert!(writer.save().starts_with(b"%PDF"));
    }
}
