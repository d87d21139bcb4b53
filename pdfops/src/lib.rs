//! pdfops - Merge PDF files and split them into page groups.
//!
//! The crate exposes two actions built on [`lopdf`]:
//!
//! - [`MergePdfAction`]: concatenate the pages of several PDFs into one file
//! - [`SplitPdfAction`]: write every *n* pages of a PDF to a file of its own
//!
//! Actions are async and run on tokio. They can be built directly or from a
//! JSON [`ActionSpec`].
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfops::{Action, MergePdfAction};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let report = MergePdfAction::new(vec!["a.pdf", "b.pdf"], "merged.pdf")
//!     .execute()
//!     .await?;
//! println!("Created {} page document", report.total_pages());
//! # Ok(())
//! # }
//! ```
//!
//! ## Split from a JSON spec
//!
//! ```no_run
//! use pdfops::{Action, ActionSpec};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! pdfops::logging::init_logging("info")?;
//!
//! let action = ActionSpec::from_json_str(
//!     r#"{ "action": "split", "inputs": "book.pdf", "outputDir": "chapters", "pageLength": 20 }"#,
//! )?
//! .into_action()?;
//!
//! for file in action.execute().await?.outputs {
//!     println!("{}", file.path.display());
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod actions;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod pages;
pub mod utils;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use actions::{Action, ActionReport, AnyAction, MergePdfAction, SplitPdfAction};
pub use config::{ActionOptions, ActionSpec, CompressionLevel, InputFiles};
pub use error::{PdfOpsError, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
