use card_sheet::*;
use card_sheet_pdf::*;
use image::RgbImage;
use std::sync::Arc;
use tempfile::TempDir;

fn create_assets() -> (BatchAssets, TemplateRef) {
    let background = RgbImage::from_pixel(34, 22, image::Rgb([200, 30, 30]));
    BatchAssets::new().with_template("front", background)
}

fn create_items(count: usize, template: &TemplateRef) -> Vec<PrintItem> {
    (0..count)
        .map(|i| {
            PrintItem::new(
                format!("card-{i}"),
                format!("LC-{i:05}"),
                format!("https://loyalty.example/c/{i}"),
                template.clone(),
            )
        })
        .collect()
}

#[test]
fn test_pdf_page_count_matches_pagination() {
    let (assets, template) = create_assets();
    let items = create_items(23, &template);

    let pdf = generate_pdf_bytes(
        &items,
        &SheetConfig::default(),
        &assets,
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(pdf.pages, page_count(23, 10));

    let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn test_zero_items_saves_empty_pdf() {
    let (assets, _) = create_assets();

    let pdf = generate_pdf_bytes(
        &[],
        &SheetConfig::default(),
        &assets,
        &GenerateOptions::default(),
    )
    .unwrap();
    assert_eq!(pdf.pages, 0);

    let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 0);
}

#[test]
fn test_parallel_generation_page_count() {
    let (assets, template) = create_assets();
    let items = create_items(41, &template);
    let options = GenerateOptions {
        parallel: true,
        ..Default::default()
    };

    let pdf = generate_pdf_bytes(&items, &SheetConfig::default(), &assets, &options).unwrap();
    let doc = lopdf::Document::load_mem(&pdf.bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 5);
}

#[test]
fn test_unknown_template_is_missing_asset() {
    let (assets, _) = create_assets();
    let items = create_items(3, &TemplateRef::new("back"));

    let err = generate_pdf_bytes(
        &items,
        &SheetConfig::default(),
        &assets,
        &GenerateOptions::default(),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        PdfError::Sheet(SheetError::MissingAsset {
            asset: AssetKind::Background,
            ..
        })
    ));
}

#[test]
fn test_cancelled_generation_returns_nothing() {
    let (assets, template) = create_assets();
    let items = create_items(30, &template);
    let cancel = CancelToken::new();
    cancel.cancel();
    let options = GenerateOptions {
        cancel: Some(cancel),
        ..Default::default()
    };

    let err = generate_pdf_bytes(&items, &SheetConfig::default(), &assets, &options).unwrap_err();
    assert!(matches!(
        err,
        PdfError::Sheet(SheetError::Cancelled { pages_written: 0 })
    ));
}

#[tokio::test]
async fn test_generate_pdf_writes_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sheets.pdf");
    let (assets, template) = create_assets();
    let items = create_items(12, &template);

    let pages = generate_pdf(
        &items,
        &SheetConfig::default(),
        Arc::new(assets),
        &GenerateOptions::default(),
        &output,
    )
    .await
    .unwrap();

    assert_eq!(pages, 2);
    let bytes = std::fs::read(&output).unwrap();
    let doc = lopdf::Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[tokio::test]
async fn test_unencodable_barcode_leaves_no_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sheets.pdf");
    let (assets, template) = create_assets();
    let mut items = create_items(15, &template);
    items[11].barcode_payload = String::new();

    let err = generate_pdf(
        &items,
        &SheetConfig::default(),
        Arc::new(assets),
        &GenerateOptions::default(),
        &output,
    )
    .await
    .unwrap_err();

    match err {
        PdfError::Sheet(SheetError::MissingAsset { item_id, slot, asset }) => {
            assert_eq!(item_id, "card-11");
            assert_eq!(slot, SlotPosition::new(1, 0, 1));
            assert_eq!(asset, AssetKind::Barcode);
        }
        other => panic!("Expected MissingAsset, got {other:?}"),
    }
    assert!(!output.exists());
}
