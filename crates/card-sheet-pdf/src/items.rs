use crate::types::Result;
use card_sheet::{PrintItem, TemplateRef};
use std::path::Path;

/// Parse `id,code,payload` rows. The first line is a header; rows with fewer
/// than three fields are skipped. Every item gets `background`.
pub fn parse_items_csv(contents: &str, background: &TemplateRef) -> Result<Vec<PrintItem>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes());
    let mut items = Vec::new();

    for result in reader.records() {
        let record = result?;
        if record.len() >= 3 {
            items.push(PrintItem::new(
                &record[0],
                &record[1],
                &record[2],
                background.clone(),
            ));
        } else {
            log::warn!(
                "Skipping CSV row {} with {} fields",
                record.position().map_or(0, |p| p.line()),
                record.len()
            );
        }
    }
    Ok(items)
}

pub async fn load_items_csv(
    path: impl AsRef<Path>,
    background: &TemplateRef,
) -> Result<Vec<PrintItem>> {
    let path = path.as_ref().to_owned();
    let background = background.clone();

    let contents = tokio::fs::read_to_string(&path).await?;

    let items = tokio::task::spawn_blocking(move || parse_items_csv(&contents, &background))
        .await??;

    log::info!("Loaded {} items from {}", items.len(), path.display());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let csv = "id,code,payload\n\
                   c1,LC-0001,https://loyalty.example/c/1\n\
                   c2, LC-0002 ,https://loyalty.example/c/2\n";
        let template = TemplateRef::new("front");
        let items = parse_items_csv(csv, &template).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "c2");
        assert_eq!(items[1].human_code, "LC-0002");
        assert_eq!(items[1].barcode_payload, "https://loyalty.example/c/2");
        assert_eq!(items[0].background, template);
    }

    #[test]
    fn test_short_rows_skipped() {
        let csv = "id,code,payload\nc1,LC-0001\nc2,LC-0002,p2\n";
        let items = parse_items_csv(csv, &TemplateRef::new("front")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "c2");
    }

    #[test]
    fn test_header_only() {
        let items = parse_items_csv("id,code,payload\n", &TemplateRef::new("front")).unwrap();
        assert!(items.is_empty());
    }
}
