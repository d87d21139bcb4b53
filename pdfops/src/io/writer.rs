//! PDF writing and saving operations.
//!
//! This module provides safe PDF writing with:
//! - Atomic writes (write to temp file, then rename)
//! - Compression support
//! - Write statistics
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! writer.save(doc, Path::new("output.pdf")).await?;
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;

use crate::config::CompressionLevel;
use crate::error::{PdfOpsError, Result};
use crate::utils::format_file_size;

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Use atomic writes (write to temp file, then rename).
    pub atomic: bool,

    /// Compression applied before writing.
    pub compression: CompressionLevel,

    /// Renumber objects into a dense id range before writing.
    pub optimize: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            atomic: true,
            compression: CompressionLevel::Standard,
            optimize: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,

    /// Number of pages in the written document.
    pub page_count: usize,

    /// Whether compression was applied.
    pub compressed: bool,
}

impl WriteStatistics {
    /// Format file size as human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer using the given compression level and default
    /// settings otherwise.
    pub fn with_compression(compression: CompressionLevel) -> Self {
        Self {
            options: WriteOptions {
                compression,
                ..Default::default()
            },
        }
    }

    /// Save a PDF document to a file.
    ///
    /// The parent directory must already exist.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Output directory doesn't exist
    /// - Insufficient permissions
    /// - Write operation fails
    pub async fn save(&self, doc: Document, path: &Path) -> Result<()> {
        self.save_with_stats(doc, path).await.map(|_| ())
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfops::io::writer::PdfWriter;
    /// # use lopdf::Document;
    /// # use std::path::Path;
    /// # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
    /// let writer = PdfWriter::new();
    /// let stats = writer.save_with_stats(doc, Path::new("output.pdf")).await?;
    /// println!("Wrote {} in {:?}", stats.format_file_size(), stats.write_time);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_with_stats(&self, doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        task::spawn_blocking(move || write_document(doc, path_buf, &options))
            .await
            .map_err(|e| PdfOpsError::FailedToWrite {
                path: path.to_path_buf(),
                source: std::io::Error::other(e),
            })?
    }
}

fn write_document(
    mut doc: Document,
    path: PathBuf,
    options: &WriteOptions,
) -> Result<WriteStatistics> {
    let start = Instant::now();

    match options.compression {
        CompressionLevel::None => {}
        CompressionLevel::Standard => doc.compress(),
        CompressionLevel::Maximum => {
            doc.prune_objects();
            doc.compress();
        }
    }

    if options.optimize {
        doc.renumber_objects();
    }

    let page_count = doc.get_pages().len();

    let write_path = if options.atomic {
        temp_path_for(&path)
    } else {
        path.clone()
    };

    let write_err = |source: std::io::Error| PdfOpsError::FailedToWrite {
        path: write_path.clone(),
        source,
    };

    let file = std::fs::File::create(&write_path).map_err(write_err)?;
    let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

    let written = doc
        .save_to(&mut writer)
        .map_err(|e| write_err(std::io::Error::other(e)))
        .and_then(|_| writer.flush().map_err(write_err));

    if let Err(e) = written {
        if options.atomic {
            std::fs::remove_file(&write_path).ok();
        }
        return Err(e);
    }

    if options.atomic {
        std::fs::rename(&write_path, &path).map_err(|e| {
            std::fs::remove_file(&write_path).ok();
            PdfOpsError::FailedToWrite {
                path: path.clone(),
                source: e,
            }
        })?;
    }

    let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

    Ok(WriteStatistics {
        write_time: start.elapsed(),
        file_size,
        output_path: path,
        page_count,
        compressed: options.compression != CompressionLevel::None,
    })
}

/// Sibling path used while an atomic write is in flight.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
