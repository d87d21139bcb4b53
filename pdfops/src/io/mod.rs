//! Reading and writing PDF files.
//!
//! [`PdfReader`] loads documents, [`PdfWriter`] saves them. Both move the
//! lopdf work onto tokio's blocking pool.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::{PdfReader, PdfWriter};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let loaded = PdfReader::new().load(Path::new("input.pdf")).await?;
//! PdfWriter::new().save(loaded.document, Path::new("copy.pdf")).await?;
//! # Ok(())
//! # }
//! ```

pub mod reader;
pub mod writer;

pub use reader::{LoadResult, LoadedPdf, PdfReader};
pub use writer::{PdfWriter, WriteOptions, WriteStatistics};

use crate::error::Result;
use lopdf::Document;
use std::path::Path;

/// Load a PDF document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a valid PDF.
pub async fn load_pdf(path: &Path) -> Result<Document> {
    Ok(PdfReader::new().load(path).await?.document)
}

/// Save a PDF document to a file with default options.
pub async fn save_pdf(doc: Document, path: &Path) -> Result<()> {
    PdfWriter::new().save(doc, path).await
}
