//! Splitting PDFs into fixed-size page groups.

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::{Action, ActionReport, create_new_pdf_document, resolve_path, validate_file};
use crate::config::{ActionOptions, InputFiles};
use crate::error::{PdfOpsError, Result};
use crate::io::reader::PdfReader;
use crate::io::writer::PdfWriter;
use crate::pages::{PageGroup, copy_pages, page_groups};
use crate::utils::pdf_stem;

/// Write every `page_length` pages of each input to a separate file.
///
/// Group `k` of `report.pdf` is written to
/// `<output_dir>/report_page_<k>.pdf`, counting from 1. The last group of a
/// document may hold fewer pages. Inputs are processed in order and the
/// first failure stops the action.
#[derive(Debug, Clone)]
pub struct SplitPdfAction {
    inputs: InputFiles,
    output_dir: PathBuf,
    page_length: usize,
    options: ActionOptions,
    reader: PdfReader,
}

impl SplitPdfAction {
    /// Create a split of `inputs` into groups of `page_length` pages.
    ///
    /// # Errors
    ///
    /// Returns [`PdfOpsError::InvalidPageLength`] if `page_length` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfops::actions::SplitPdfAction;
    ///
    /// assert!(SplitPdfAction::new("book.pdf", "out", 10).is_ok());
    /// assert!(SplitPdfAction::new("book.pdf", "out", 0).is_err());
    /// ```
    pub fn new(
        inputs: impl Into<InputFiles>,
        output_dir: impl Into<PathBuf>,
        page_length: usize,
    ) -> Result<Self> {
        if page_length == 0 {
            return Err(PdfOpsError::InvalidPageLength {
                length: page_length,
            });
        }

        Ok(Self {
            inputs: inputs.into(),
            output_dir: output_dir.into(),
            page_length,
            options: ActionOptions::default(),
            reader: PdfReader::new(),
        })
    }

    /// Create a split that writes one file per page.
    pub fn per_page(inputs: impl Into<InputFiles>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            inputs: inputs.into(),
            output_dir: output_dir.into(),
            page_length: 1,
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

    /// Output directory, as given.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pages per output file.
    pub fn page_length(&self) -> usize {
        self.page_length
    }

    /// Options in effect.
    pub fn options(&self) -> &ActionOptions {
        &self.options
    }

    /// Path the group numbered `index` of `input` is written to, relative
    /// to the output directory as given.
    pub fn output_path_for(&self, input: &Path, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_page_{index}.pdf", pdf_stem(input)))
    }

    /// Cut `document` into one new document per page group.
    ///
    /// # Errors
    ///
    /// Returns an error if the pages cannot be copied.
    pub fn split_document(&self, document: &Document) -> Result<Vec<(PageGroup, Document)>> {
        page_groups(document.get_pages().len(), self.page_length)?
            .into_iter()
            .map(|group| {
                let mut part = create_new_pdf_document();
                copy_pages(&mut part, document, group.pages())?;
                Ok((group, part))
            })
            .collect()
    }
}

impl Action for SplitPdfAction {
    fn name(&self) -> &'static str {
        "split"
    }

    async fn execute(&self) -> Result<ActionReport> {
        let start = Instant::now();
        self.options.validate()?;

        let inputs = self.inputs.expand(self.options.expand_globs)?;
        if inputs.is_empty() {
            return Err(PdfOpsError::NoInputFiles);
        }

        let output_dir = resolve_path(&self.output_dir)?;
        let writer = PdfWriter::with_compression(self.options.compression);
        let mut outputs = Vec::new();

        for given in &inputs {
            let input = resolve_path(given)?;
            validate_file(&input).await?;

            tokio::fs::create_dir_all(&output_dir).await.map_err(|source| {
                PdfOpsError::FailedToCreateOutputDir {
                    path: output_dir.clone(),
                    source,
                }
            })?;

            let loaded = self.reader.load(&input).await?;
            let parts = self.split_document(&loaded.document)?;
            if parts.is_empty() {
                tracing::warn!(path = %input.display(), "input has no pages, nothing written");
            }

            for (group, part) in parts {
                let target = self.output_path_for(&input, group.index);
                let stats = writer
                    .save_with_stats(part, &resolve_path(&target)?)
                    .await?;

                tracing::info!(
                    "Split {} of {} saved as {}",
                    group.index,
                    given.display(),
                    target.display()
                );
                outputs.push(stats.into());
            }
        }

        Ok(ActionReport {
            action: self.name(),
            inputs_processed: inputs.len(),
            outputs,
            elapsed: start.elapsed(),
        })
    }
}
