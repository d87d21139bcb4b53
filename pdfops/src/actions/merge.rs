//! Merging several PDFs into one.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::{Action, ActionReport, create_new_pdf_document, resolve_path};
use crate::config::{ActionOptions, InputFiles};
use crate::error::{PdfOpsError, Result};
use crate::io::reader::PdfReader;
use crate::io::writer::PdfWriter;
use crate::pages::copy_pages;

/// Concatenate the pages of several PDFs into a single output file.
///
/// Pages appear in input order. Inputs are loaded concurrently, bounded by
/// [`ActionOptions::jobs`].
///
/// # Examples
///
/// ```no_run
/// use pdfops::actions::{Action, MergePdfAction};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let report = MergePdfAction::new(vec!["cover.pdf", "body.pdf"], "book.pdf")
///     .execute()
///     .await?;
/// println!("{} pages", report.total_pages());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct MergePdfAction {
    inputs: InputFiles,
    output: PathBuf,
    options: ActionOptions,
    reader: PdfReader,
}

/// The merged document and the number of inputs it was built from.
struct Merged {
    document: Document,
    inputs: usize,
}

impl MergePdfAction {
    /// Create a merge of `inputs` into `output`.
    pub fn new(inputs: impl Into<InputFiles>, output: impl Into<PathBuf>) -> Self {
        Self {
            inputs: inputs.into(),
            output: output.into(),
            options: ActionOptions::default(),
            reader: PdfReader::new(),
        }
    }

    /// Replace the options.
    pub fn with_options(mut self, options: ActionOptions) -> Self {
        self.options = options;
        self
    }

    /// Input files, as given.
    pub fn inputs(&self) -> &InputFiles {
        &self.inputs
    }

    /// Output path, as given.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Options in effect.
    pub fn options(&self) -> &ActionOptions {
        &self.options
    }

    /// Build the merged document without saving it.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::NoInputFiles`] when there is nothing to merge,
    /// and a processing error naming the file when an input cannot be
    /// loaded or its pages cannot be copied.
    pub async fn merge(&self) -> Result<Document> {
        Ok(self.merge_inputs().await?.document)
    }

    async fn merge_inputs(&self) -> Result<Merged> {
        self.options.validate()?;

        let paths = self
            .inputs
            .expand(self.options.expand_globs)?
            .iter()
            .map(|path| resolve_path(path))
            .collect::<Result<Vec<_>>>()?;

        if paths.is_empty() {
            return Err(PdfOpsError::NoInputFiles);
        }

        let results = self
            .reader
            .load_all(&paths, self.options.effective_jobs())
            .await;

        let mut merged = create_new_pdf_document();

        for (path, result) in paths.iter().zip(results) {
            let copied = result.and_then(|loaded| {
                if loaded.page_count == 0 {
                    tracing::warn!(path = %path.display(), "input has no pages");
                }
                copy_pages(&mut merged, &loaded.document, 1..=loaded.page_count as u32)
            });

            match copied {
                Ok(pages) => tracing::debug!(path = %path.display(), pages, "copied pages"),
                Err(e) => {
                    return Err(PdfOpsError::pdf_processing(format!(
                        "Failed to copy pages from {}: {e}",
                        path.display()
                    )));
                }
            }
        }

        Ok(Merged {
            document: merged,
            inputs: paths.len(),
        })
    }
}

impl Action for MergePdfAction {
    fn name(&self) -> &'static str {
        "merge"
    }

    async fn execute(&self) -> Result<ActionReport> {
        let start = Instant::now();

        let merged = self.merge_inputs().await?;
        let output = resolve_path(&self.output)?;

        let stats = PdfWriter::with_compression(self.options.compression)
            .save_with_stats(merged.document, &output)
            .await
            .map_err(|e| PdfOpsError::pdf_processing(format!("Failed to save PDF document: {e}")))?;

        tracing::info!("PDFs merged and saved as {}", self.output.display());

        Ok(ActionReport {
            action: self.name(),
            inputs_processed: merged.inputs,
            outputs: vec![stats.into()],
            elapsed: start.elapsed(),
        })
    }
}
