//! Contract Engine - template-driven contract document generation
//!
//! This crate provides:
//! - A static catalog of supported template variables
//! - Template analysis (filled / missing / unsupported classification)
//! - Substitution context construction with typed value formatting
//! - In-place placeholder rendering across body, tables, headers and footers
//! - PDF conversion with a primary port and a headless office CLI fallback
//! - Generation orchestration with deterministic artifact naming
//!
//! # Example
//!
//! ```ignore
//! use contract::pipeline::{LocalDelivery, LocalFetcher, Pipeline, PipelineConfig};
//!
//! let pipeline = Pipeline::new(&config, fetcher, delivery);
//! let outcome = pipeline.generate("lease.docx", &values, "Іван Петров", "17", 2026)?;
//! println!("{}", outcome.log);
//! ```

pub mod analyzer;
pub mod catalog;
pub mod context;
pub mod convert;
pub mod pipeline;
pub mod render;

pub use analyzer::{analyze, AnalysisResult, TemplateKind};
pub use catalog::{Category, ValueKind};
pub use context::EMPTY_VALUE;
pub use convert::{Convert, ConverterChain, ExternalTool};
pub use pipeline::{GenerationOutcome, Pipeline, PipelineConfig};

use thiserror::Error;

/// Errors that can occur during contract generation
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("template {reference} is not a valid document container: {source}")]
    Format {
        reference: String,
        #[source]
        source: docx_core::DocxError,
    },

    #[error("no conversion backend is available in this environment")]
    ToolUnavailable,

    #[error("conversion failed: primary: {primary}; fallback: {fallback}")]
    Conversion { primary: String, fallback: String },

    #[error("template fetch failed: {0}")]
    Fetch(#[source] anyhow::Error),

    #[error("delivery failed: {0}")]
    Delivery(#[source] anyhow::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<convert::ConvertError> for ContractError {
    fn from(err: convert::ConvertError) -> Self {
        match err {
            convert::ConvertError::ToolUnavailable => Self::ToolUnavailable,
            convert::ConvertError::Failed { primary, fallback } => {
                Self::Conversion { primary, fallback }
            }
            convert::ConvertError::Io(e) => Self::IoError(e),
        }
    }
}

/// Result type for contract operations
pub type Result<T> = std::result::Result<T, ContractError>;
