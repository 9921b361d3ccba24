use card_sheet::*;
use card_sheet_pdf::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_load_items_csv() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("items.csv");
    tokio::fs::write(
        &path,
        "id,code,payload\nc1,LC-1,https://loyalty.example/c/1\nbroken\nc2,LC-2,https://loyalty.example/c/2\n",
    )
    .await
    .unwrap();

    let template = TemplateRef::new("front");
    let items = load_items_csv(&path, &template).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].human_code, "LC-1");
    assert_eq!(items[1].id, "c2");
}

#[tokio::test]
async fn test_load_items_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_items_csv(dir.path().join("nope.csv"), &TemplateRef::new("front"))
        .await
        .unwrap_err();
    assert!(matches!(err, PdfError::Io(_)));
}

#[tokio::test]
async fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheet.json");

    let mut config = SheetConfig {
        page: PageSpec::from_paper(PaperSize::Letter, Orientation::Portrait),
        ..Default::default()
    };
    config.grid.rows = 4;

    save_config(&config, &path).await.unwrap();
    let loaded = load_config(&path).await.unwrap();
    assert_eq!(loaded, config);
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sheet.json");

    tokio::fs::write(&path, r#"{ "grid": { "rows": 0 } }"#)
        .await
        .unwrap();
    let err = load_config(&path).await.unwrap_err();
    assert!(matches!(
        err,
        PdfError::Sheet(SheetError::InvalidLayout { field: "grid.rows", .. })
    ));

    tokio::fs::write(&path, "not json").await.unwrap();
    let err = load_config(&path).await.unwrap_err();
    assert!(matches!(err, PdfError::Config(_)));
}

#[tokio::test]
async fn test_load_template_from_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("front.png");
    image::RgbImage::new(10, 6).save(&path).unwrap();

    let mut assets = BatchAssets::new();
    let template = assets.load_template(&path).await.unwrap();
    assert_eq!(template.as_str(), "front");
    assert!(assets.is_resolvable(&ImageRef::Template(template)));
}
