//! Configuration for pdfops actions.
//!
//! This module holds the data model the actions are built from:
//! - [`InputFiles`]: one path or an ordered list of paths
//! - [`ActionOptions`]: compression, load concurrency, glob expansion
//! - [`ActionSpec`]: a serializable description of a merge or split
//!
//! Specs are plain JSON:
//!
//! ```json
//! [
//!   { "action": "merge", "inputs": ["a.pdf", "b.pdf"], "output": "ab.pdf" },
//!   { "action": "split", "inputs": "ab.pdf", "outputDir": "pages", "pageLength": 2 }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::actions::{AnyAction, MergePdfAction, SplitPdfAction};
use crate::error::{PdfOpsError, Result};
use crate::utils::collect_paths_for_patterns;

/// A single value or a list of values.
///
/// Deserializes from either `"x"` or `["x", "y"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// A bare value.
    One(T),
    /// A list of values.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flatten into a vector, keeping order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(value) => vec![value],
            Self::Many(values) => values,
        }
    }
}

/// Input paths of an action, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "OneOrMany<PathBuf>", into = "Vec<PathBuf>")]
pub struct InputFiles(Vec<PathBuf>);

impl InputFiles {
    /// Returns the paths as given.
    pub fn paths(&self) -> &[PathBuf] {
        &self.0
    }

    /// Number of inputs.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no inputs.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve the inputs to concrete paths.
    ///
    /// With `expand_globs`, every input is treated as a glob pattern and
    /// replaced by its matches in lexical order. Otherwise the paths are
    /// returned unchanged.
    pub fn expand(&self, expand_globs: bool) -> Result<Vec<PathBuf>> {
        if !expand_globs {
            return Ok(self.0.clone());
        }

        let patterns = self
            .0
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        collect_paths_for_patterns(patterns)
    }
}

impl From<OneOrMany<PathBuf>> for InputFiles {
    fn from(value: OneOrMany<PathBuf>) -> Self {
        Self(value.into_vec())
    }
}

impl From<InputFiles> for Vec<PathBuf> {
    fn from(value: InputFiles) -> Self {
        value.0
    }
}

impl From<PathBuf> for InputFiles {
    fn from(path: PathBuf) -> Self {
        Self(vec![path])
    }
}

impl From<&Path> for InputFiles {
    fn from(path: &Path) -> Self {
        Self(vec![path.to_path_buf()])
    }
}

impl From<&str> for InputFiles {
    fn from(path: &str) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl From<String> for InputFiles {
    fn from(path: String) -> Self {
        Self(vec![PathBuf::from(path)])
    }
}

impl<P: Into<PathBuf>> From<Vec<P>> for InputFiles {
    fn from(paths: Vec<P>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }
}

impl<P: AsRef<Path>> From<&[P]> for InputFiles {
    fn from(paths: &[P]) -> Self {
        Self(paths.iter().map(|p| p.as_ref().to_path_buf()).collect())
    }
}

/// Compression level for written PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressionLevel {
    /// No compression - streams are written as they are.
    None,
    /// Compress uncompressed streams.
    #[default]
    Standard,
    /// Compress streams and drop objects no page refers to.
    Maximum,
}

impl FromStr for CompressionLevel {
    type Err = PdfOpsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "none" => Ok(Self::None),
            "standard" => Ok(Self::Standard),
            "maximum" => Ok(Self::Maximum),
            _ => Err(PdfOpsError::invalid_config(format!(
                "Invalid compression level: {s}. Must be one of: none, standard, maximum"
            ))),
        }
    }
}

/// Tunables shared by all actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActionOptions {
    /// Compression applied when saving.
    pub compression: CompressionLevel,

    /// Maximum number of inputs loaded concurrently (None = auto-detect).
    pub jobs: Option<usize>,

    /// Treat inputs as glob patterns.
    pub expand_globs: bool,
}

impl ActionOptions {
    /// Validate the options.
    ///
    /// # Errors
    ///
    /// Returns an error if `jobs` is zero.
    pub fn validate(&self) -> Result<()> {
        if let Some(jobs) = self.jobs
            && jobs == 0
        {
            return Err(PdfOpsError::invalid_config(
                "Number of jobs must be at least 1",
            ));
        }

        Ok(())
    }

    /// Get the effective number of concurrent loads.
    ///
    /// Returns the configured job count, or the number of CPU cores if auto-detect.
    pub fn effective_jobs(&self) -> usize {
        self.jobs.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }
}

fn default_page_length() -> usize {
    1
}

/// Serializable description of a single action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum ActionSpec {
    /// Merge `inputs` into `output`.
    Merge {
        /// Files to merge, in order.
        inputs: InputFiles,
        /// Path of the merged PDF.
        output: PathBuf,
        /// Shared options.
        #[serde(default)]
        options: ActionOptions,
    },
    /// Split every input into groups of `page_length` pages.
    Split {
        /// Files to split.
        inputs: InputFiles,
        /// Directory receiving the split files.
        output_dir: PathBuf,
        /// Pages per output file.
        #[serde(default = "default_page_length")]
        page_length: usize,
        /// Shared options.
        #[serde(default)]
        options: ActionOptions,
    },
}

impl ActionSpec {
    /// Parse a single spec from JSON.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdfops::config::ActionSpec;
    ///
    /// let spec = ActionSpec::from_json_str(
    ///     r#"{ "action": "split", "inputs": "book.pdf", "outputDir": "out" }"#,
    /// ).unwrap();
    /// assert!(matches!(spec, ActionSpec::Split { page_length: 1, .. }));
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self> {
        let spec: Self = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse one spec or an array of specs from JSON.
    pub fn parse_many(json: &str) -> Result<Vec<Self>> {
        let specs = serde_json::from_str::<OneOrMany<Self>>(json)?.into_vec();
        for spec in &specs {
            spec.validate()?;
        }
        Ok(specs)
    }

    /// Read specs from a JSON file holding one spec or an array of specs.
    pub async fn load(path: &Path) -> Result<Vec<Self>> {
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PdfOpsError::file_not_found(path)
            } else {
                PdfOpsError::Io(e)
            }
        })?;
        Self::parse_many(&json)
    }

    /// Check the description without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No inputs are given
    /// - The split page length is zero
    /// - The options are invalid
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Merge {
                inputs, options, ..
            } => {
                if inputs.is_empty() {
                    return Err(PdfOpsError::NoInputFiles);
                }
                options.validate()
            }
            Self::Split {
                inputs,
                page_length,
                options,
                ..
            } => {
                if inputs.is_empty() {
                    return Err(PdfOpsError::NoInputFiles);
                }
                if *page_length == 0 {
                    return Err(PdfOpsError::InvalidPageLength { length: 0 });
                }
                options.validate()
            }
        }
    }

    /// Build the runnable action.
    pub fn into_action(self) -> Result<AnyAction> {
        self.validate()?;

        let action = match self {
            Self::Merge {
                inputs,
                output,
                options,
            } => AnyAction::Merge(MergePdfAction::new(inputs, output).with_options(options)),
            Self::Split {
                inputs,
                output_dir,
                page_length,
                options,
            } => AnyAction::Split(
                SplitPdfAction::new(inputs, output_dir, page_length)?.with_options(options),
            ),
        };

        Ok(action)
    }
}
