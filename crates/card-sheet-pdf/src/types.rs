use card_sheet::SheetError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("PDF error: {0}")]
    Pdf(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PdfError>;
