use crate::types::{PdfError, Result};
use card_sheet::SheetConfig;
use std::path::Path;

/// Read a JSON sheet configuration. Missing sections fall back to defaults;
/// the result is validated before it is returned.
pub async fn load_config(path: impl AsRef<Path>) -> Result<SheetConfig> {
    let path = path.as_ref();
    let contents = tokio::fs::read_to_string(path).await?;
    let config: SheetConfig = serde_json::from_str(&contents)
        .map_err(|e| PdfError::Config(format!("{}: {e}", path.display())))?;
    config.validate()?;
    Ok(config)
}

pub async fn save_config(config: &SheetConfig, path: impl AsRef<Path>) -> Result<()> {
    let json =
        serde_json::to_string_pretty(config).map_err(|e| PdfError::Config(e.to_string()))?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
