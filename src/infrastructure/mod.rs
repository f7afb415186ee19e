pub mod pdf_extractor;
pub mod temp_document;

pub use pdf_extractor::{PdfExtractor, TextExtractor};
pub use temp_document::TempDocument;
