//! Runnable PDF actions.
//!
//! An action is a small command object: it is configured up front and does
//! all of its work in [`Action::execute`]. Two actions exist:
//!
//! - [`MergePdfAction`]: concatenate several PDFs into one
//! - [`SplitPdfAction`]: cut PDFs into files of a fixed number of pages
//!
//! [`AnyAction`] wraps either one, which is what [`ActionSpec`] builds.
//!
//! # Examples
//!
//! ```no_run
//! use pdfops::actions::{Action, MergePdfAction, SplitPdfAction};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let merge = MergePdfAction::new(vec!["a.pdf", "b.pdf"], "ab.pdf");
//! merge.execute().await?;
//!
//! let split = SplitPdfAction::new("ab.pdf", "pages", 2)?;
//! let report = split.execute().await?;
//! println!("wrote {} files", report.outputs.len());
//! # Ok(())
//! # }
//! ```
//!
//! [`ActionSpec`]: crate::config::ActionSpec

mod merge;
mod split;

pub use merge::MergePdfAction;
pub use split::SplitPdfAction;

use lopdf::Document;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::ActionSpec;
use crate::error::{PdfOpsError, Result};
use crate::io::writer::WriteStatistics;
use crate::pages;
use crate::utils::{self, format_file_size};

/// A command that reads PDFs and writes results to disk.
pub trait Action {
    /// Short name of the action, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Run the action.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered. Files written before the
    /// failure are left in place.
    fn execute(&self) -> impl Future<Output = Result<ActionReport>> + Send;
}

/// A file written by an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Number of pages in the file.
    pub page_count: usize,
    /// File size in bytes.
    pub file_size: u64,
}

impl From<WriteStatistics> for WrittenFile {
    fn from(stats: WriteStatistics) -> Self {
        Self {
            path: stats.output_path,
            page_count: stats.page_count,
            file_size: stats.file_size,
        }
    }
}

/// What an action produced.
#[derive(Debug, Clone)]
pub struct ActionReport {
    /// Name of the action that ran.
    pub action: &'static str,
    /// Number of input files processed.
    pub inputs_processed: usize,
    /// Files written, in the order they were written.
    pub outputs: Vec<WrittenFile>,
    /// Wall-clock time of the whole action.
    pub elapsed: Duration,
}

impl ActionReport {
    /// Pages written across all outputs.
    pub fn total_pages(&self) -> usize {
        self.outputs.iter().map(|f| f.page_count).sum()
    }

    /// Bytes written across all outputs.
    pub fn total_size(&self) -> u64 {
        self.outputs.iter().map(|f| f.file_size).sum()
    }

    /// Format the total output size as human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size())
    }
}

/// Either kind of action.
#[derive(Debug, Clone)]
pub enum AnyAction {
    /// A merge.
    Merge(MergePdfAction),
    /// A split.
    Split(SplitPdfAction),
}

impl Action for AnyAction {
    fn name(&self) -> &'static str {
        match self {
            Self::Merge(action) => action.name(),
            Self::Split(action) => action.name(),
        }
    }

    async fn execute(&self) -> Result<ActionReport> {
        match self {
            Self::Merge(action) => action.execute().await,
            Self::Split(action) => action.execute().await,
        }
    }
}

impl From<MergePdfAction> for AnyAction {
    fn from(action: MergePdfAction) -> Self {
        Self::Merge(action)
    }
}

impl From<SplitPdfAction> for AnyAction {
    fn from(action: SplitPdfAction) -> Self {
        Self::Split(action)
    }
}

/// Build and run `specs` one after another.
///
/// All specs are turned into actions before the first one runs, so an
/// invalid spec anywhere in the list prevents any output from being
/// written.
pub async fn execute_all(specs: Vec<ActionSpec>) -> Result<Vec<ActionReport>> {
    let actions = specs
        .into_iter()
        .map(ActionSpec::into_action)
        .collect::<Result<Vec<_>>>()?;

    let mut reports = Vec::with_capacity(actions.len());
    for action in &actions {
        reports.push(action.execute().await?);
    }

    Ok(reports)
}

/// A fresh document with a catalog and an empty page tree.
pub fn create_new_pdf_document() -> Document {
    pages::new_document()
}

/// Check that `path` exists.
///
/// # Errors
///
/// Returns [`PdfOpsError::FileNotFound`] if nothing exists at `path`.
pub async fn validate_file(path: &Path) -> Result<()> {
    match tokio::fs::try_exists(path).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(PdfOpsError::file_not_found(path)),
        Err(e) => Err(PdfOpsError::Io(e)),
    }
}

/// Absolute form of `path`, relative to the current directory.
pub fn resolve_path(path: &Path) -> Result<PathBuf> {
    utils::resolve_path(path)
}
