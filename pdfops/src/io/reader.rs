//! PDF reading and loading operations.
//!
//! Parsing runs on tokio's blocking pool so large documents do not stall
//! the runtime. Batches are loaded with bounded concurrency while results
//! keep the input order.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::reader::PdfReader;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let results = reader.load_all(&paths, 4).await;
//! # Ok(())
//! # }
//! ```

use futures::stream::{self, StreamExt};
use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::error::{PdfOpsError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

/// Result of a load operation (success or failure).
pub type LoadResult = Result<LoadedPdf>;

/// PDF reader.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File cannot be read
    /// - File is not a valid PDF
    /// - PDF is encrypted
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::io::reader::PdfReader;
    /// # use std::path::Path;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let loaded = reader.load(Path::new("document.pdf")).await?;
    /// println!("Loaded {} pages in {:?}", loaded.page_count, loaded.load_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        let path_buf = path.to_path_buf();
        let start = Instant::now();

        let metadata = tokio::fs::metadata(&path_buf).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfOpsError::file_not_found(path_buf.clone())
            } else {
                PdfOpsError::failed_to_load_pdf(path_buf.clone(), e.to_string())
            }
        })?;

        if !metadata.is_file() {
            return Err(PdfOpsError::NotAFile { path: path_buf });
        }

        let bytes = tokio::fs::read(&path_buf)
            .await
            .map_err(|e| PdfOpsError::failed_to_load_pdf(path_buf.clone(), e.to_string()))?;

        let parse_path = path_buf.clone();
        let document = task::spawn_blocking(move || {
            Document::load_mem(&bytes).map_err(|e| {
                let err_msg = e.to_string();
                if err_msg.contains("encrypt") || err_msg.contains("password") {
                    PdfOpsError::encrypted_pdf(parse_path)
                } else {
                    PdfOpsError::failed_to_load_pdf(parse_path, err_msg)
                }
            })
        })
        .await
        .map_err(|e| PdfOpsError::failed_to_load_pdf(path_buf.clone(), e.to_string()))??;

        let page_count = document.get_pages().len();
        let load_time = start.elapsed();

        tracing::debug!(
            path = %path_buf.display(),
            pages = page_count,
            elapsed_ms = load_time.as_millis() as u64,
            "loaded pdf"
        );

        Ok(LoadedPdf {
            document,
            path: path_buf,
            page_count,
            load_time,
            file_size: metadata.len(),
        })
    }

    /// Load multiple PDF documents with bounded concurrency.
    ///
    /// At most `workers` documents are parsed at the same time. The returned
    /// vector has one result per input, in the same order as `paths`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::io::reader::PdfReader;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let reader = PdfReader::new();
    /// let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    ///
    /// for result in reader.load_all(&paths, 4).await {
    ///     match result {
    ///         Ok(loaded) => println!("Loaded: {}", loaded.path.display()),
    ///         Err(e) => eprintln!("Error: {}", e),
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn load_all(&self, paths: &[PathBuf], workers: usize) -> Vec<LoadResult> {
        let workers = workers.max(1);

        let reader = *self;
        let tasks: Vec<_> = paths
            .iter()
            .cloned()
            .map(|path| async move { reader.load(&path).await })
            .collect();

        stream::iter(tasks).buffered(workers).collect().await
    }
}
