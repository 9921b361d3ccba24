use crate::assets::BatchAssets;
use crate::types::*;
use crate::writer::PdfSheetWriter;
use card_sheet::{Assembler, CancelToken, PrintItem, SheetConfig};
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Document title written to the PDF info dictionary
    pub title: String,
    /// Render pages on the rayon pool
    pub parallel: bool,
    pub cancel: Option<CancelToken>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            title: "Card sheets".to_string(),
            parallel: false,
            cancel: None,
        }
    }
}

/// A serialized PDF and the number of pages in it
#[derive(Debug, Clone)]
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Lay out `items` and serialize the sheets as PDF.
///
/// Nothing is returned unless every page was written.
pub fn generate_pdf_bytes(
    items: &[PrintItem],
    config: &SheetConfig,
    assets: &BatchAssets,
    options: &GenerateOptions,
) -> Result<GeneratedPdf> {
    let mut assembler = Assembler::new(config, assets)?;
    if let Some(token) = &options.cancel {
        assembler = assembler.with_cancel(token.clone());
    }

    let mut writer = PdfSheetWriter::new(&options.title, assets);
    let pages = if options.parallel {
        assembler.stream_parallel(items, &mut writer)?
    } else {
        assembler.stream(items, &mut writer)?
    };

    let bytes = writer.save();
    log::info!(
        "Generated {} page(s) for {} item(s), {} bytes",
        pages,
        items.len(),
        bytes.len()
    );
    Ok(GeneratedPdf { bytes, pages })
}

/// Generate on a blocking thread and write the PDF to `output_path`.
///
/// The output file is only created when generation succeeded. Returns the
/// page count.
pub async fn generate_pdf(
    items: &[PrintItem],
    config: &SheetConfig,
    assets: Arc<BatchAssets>,
    options: &GenerateOptions,
    output_path: impl AsRef<Path>,
) -> Result<usize> {
    let items = items.to_vec();
    let config = *config;
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    let pdf = tokio::task::spawn_blocking(move || {
        generate_pdf_bytes(&items, &config, &assets, &options)
    })
    .await??;

    tokio::fs::write(&output_path, pdf.bytes).await?;

    Ok(pdf.pages)
}
