use thiserror::Error;

#[derive(Error, Debug)]
pub enum PptxError {
    #[error("a presentation needs at least one slide")]
    NoSlides,

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

pub type Result<T> = std::result::Result<T, PptxError>;
