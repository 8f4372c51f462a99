pub mod codes;
pub mod dictionary;
pub mod patterns;
pub mod pdf;
pub mod sanitize;
pub mod sections;
pub mod terms;

pub use codes::*;
pub use dictionary::*;
pub use patterns::*;
pub use pdf::*;
pub use sanitize::*;
pub use sections::*;
pub use terms::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("Invalid extraction pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Unknown dictionary category: {0}")]
    UnknownCategory(String),

    #[error("Report text is empty")]
    EmptyReport,

    #[error("Entity recognizer failed: {0}")]
    Recognizer(String),
}
