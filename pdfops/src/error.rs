//! Error types for pdfops.
//!
//! Every fallible operation in the crate returns [`PdfOpsError`]. Errors fall
//! into three broad groups, reported by [`PdfOpsError::category`]:
//!
//! - **File not found**: an input path does not exist.
//! - **PDF processing**: a document could not be loaded, copied or saved.
//! - **Other**: invalid configuration and plain I/O failures.

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfops operations.
pub type Result<T> = std::result::Result<T, PdfOpsError>;

/// Broad classification of a [`PdfOpsError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// An input file does not exist.
    FileNotFound,
    /// Loading, copying or saving a PDF failed.
    PdfProcessing,
    /// Configuration or environment problem.
    Other,
}

/// Main error type for pdfops operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfOpsError {
    /// Input file was not found.
    #[error("File not found: {}", .path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input path exists but is not a regular file.
    #[error("Not a file: {}", .path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// lopdf could not parse the file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", .path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason reported by the parser.
        reason: String,
    },

    /// PDF file is encrypted and cannot be opened.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  \
         Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        .path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Copying pages between documents or saving a document failed.
    #[error("{message}")]
    PdfProcessing {
        /// Full description, including the affected file.
        message: String,
    },

    /// An action was given no input files.
    #[error("No input files specified")]
    NoInputFiles,

    /// Split page length must be at least one.
    #[error("Invalid page length: {length}. Each split must contain at least one page")]
    InvalidPageLength {
        /// Requested page length.
        length: usize,
    },

    /// Output directory could not be created.
    #[error("Failed to create output directory: {}\n  Reason: {source}", .path.display())]
    FailedToCreateOutputDir {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing an output file failed.
    #[error("Failed to write to output file: {}\n  Reason: {source}", .path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// An input glob pattern could not be parsed or walked.
    #[error("Invalid input pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Parser or filesystem error.
        reason: String,
    },

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PdfOpsError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: impl Into<PathBuf>) -> Self {
        Self::EncryptedPdf { path: path.into() }
    }

    /// Create a PdfProcessing error.
    pub fn pdf_processing(message: impl Into<String>) -> Self {
        Self::PdfProcessing {
            message: message.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FileNotFound { .. } => ErrorCategory::FileNotFound,
            Self::NotAFile { .. }
            | Self::FailedToLoadPdf { .. }
            | Self::EncryptedPdf { .. }
            | Self::PdfProcessing { .. }
            | Self::FailedToWrite { .. } => ErrorCategory::PdfProcessing,
            Self::NoInputFiles
            | Self::InvalidPageLength { .. }
            | Self::FailedToCreateOutputDir { .. }
            | Self::InvalidConfig { .. }
            | Self::InvalidPattern { .. }
            | Self::Io(_) => ErrorCategory::Other,
        }
    }

    /// Check if this error only concerns a single input document.
    ///
    /// Returns true for errors after which the remaining inputs could still
    /// be processed.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::EncryptedPdf { .. }
        )
    }
}

impl From<serde_json::Error> for PdfOpsError {
    fn from(err: serde_json::Error) -> Self {
        Self::invalid_config(err.to_string())
    }
}
