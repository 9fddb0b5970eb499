//! DOCX Core - Low-level DOCX container manipulation
//!
//! This crate provides functionality for:
//! - Opening and saving DOCX packages (zip archives of XML parts)
//! - Extracting `{{name}}` placeholder tokens with occurrence counts
//! - Replacing placeholder text across `<w:t>` runs without disturbing markup
//!
//! # Example
//!
//! ```ignore
//! use docx_core::DocxPackage;
//!
//! let mut package = DocxPackage::open("template.docx")?;
//! let counts = package.placeholder_counts();
//! package.replace_placeholders(&replacements);
//! package.save("filled.docx")?;
//! ```

mod container;
mod text;

pub use container::DocxPackage;
pub use text::{replace_text, scan_tokens, strip_markup, xml_escape};

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

/// Errors that can occur during DOCX operations
#[derive(Debug, Error)]
pub enum DocxError {
    #[error("not a valid document archive: {0}")]
    InvalidArchive(#[from] zip::result::ZipError),

    #[error("failed to save document: {0}")]
    SaveError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for DOCX operations
pub type Result<T> = std::result::Result<T, DocxError>;

/// Extract placeholder names and occurrence counts from a DOCX file.
///
/// Opens the archive, strips markup from every XML part, and scans the
/// concatenated plain text for `{{name}}` tokens. See
/// [`DocxPackage::placeholder_counts`] for the exact matching rules.
pub fn extract_placeholders(path: &Path) -> Result<BTreeMap<String, usize>> {
    let package = DocxPackage::open(path)?;
    Ok(package.placeholder_counts())
}
