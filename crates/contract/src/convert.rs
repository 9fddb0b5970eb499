//! PDF conversion
//!
//! Strategy chain: a primary in-process converter behind the [`Convert`]
//! port, then a headless office command-line tool as fallback. Environments
//! without either surface [`ConvertError::ToolUnavailable`] so operators can
//! tell a broken deployment from a broken document.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::warn;

/// Primary in-process conversion port. Implementations convert `source`
/// into the distributable format at exactly `target`.
pub trait Convert {
    fn convert(&self, source: &Path, target: &Path) -> anyhow::Result<()>;
}

/// Errors that can occur during conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("no conversion backend is available in this environment")]
    ToolUnavailable,

    #[error("conversion failed: primary: {primary}; fallback: {fallback}")]
    Failed { primary: String, fallback: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

/// Command-line names probed on PATH, in order
const TOOL_CANDIDATES: [&str; 2] = ["soffice", "libreoffice"];

/// Headless office command-line converter
#[derive(Debug, Clone)]
pub struct ExternalTool {
    binary: PathBuf,
}

impl ExternalTool {
    /// Probe PATH for a usable converter binary.
    pub fn resolve() -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        for dir in std::env::split_paths(&path) {
            for name in TOOL_CANDIDATES {
                let candidate = dir.join(name);
                if candidate.is_file() {
                    return Some(Self { binary: candidate });
                }
            }
        }
        None
    }

    /// Use an explicitly configured binary instead of probing PATH.
    pub fn with_binary(binary: PathBuf) -> Self {
        Self { binary }
    }

    /// Run the converter into `outdir` and return the produced file path.
    /// The tool names its output by source stem and target extension.
    fn run(&self, source: &Path, outdir: &Path) -> anyhow::Result<PathBuf> {
        let output = Command::new(&self.binary)
            .args(["--headless", "--convert-to", "pdf", "--outdir"])
            .arg(outdir)
            .arg(source)
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            let detail = if stderr.trim().is_empty() {
                stdout.trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            anyhow::bail!("converter exited with {}: {}", output.status, detail);
        }

        let stem = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let produced = outdir.join(format!("{stem}.pdf"));
        if !produced.is_file() {
            anyhow::bail!("converter produced no output at {}", produced.display());
        }
        Ok(produced)
    }
}

/// Conversion strategy: primary port first, external tool second.
pub struct ConverterChain {
    primary: Option<Box<dyn Convert>>,
    tool: Option<ExternalTool>,
}

impl ConverterChain {
    pub fn new(primary: Option<Box<dyn Convert>>, tool: Option<ExternalTool>) -> Self {
        Self { primary, tool }
    }

    /// Chain with no primary and whatever tool PATH provides.
    pub fn from_environment() -> Self {
        Self::new(None, ExternalTool::resolve())
    }

    /// Install or replace the primary converter.
    pub fn with_primary(mut self, primary: Box<dyn Convert>) -> Self {
        self.primary = Some(primary);
        self
    }

    /// Convert `source` to PDF at exactly `target`.
    ///
    /// No partial file remains at `target` on any failure, and the fallback
    /// leaves nothing behind in its scratch directory.
    pub fn convert(&self, source: &Path, target: &Path) -> Result<()> {
        let primary_err = match &self.primary {
            Some(primary) => match primary.convert(source, target) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    warn!(error = %err, "primary converter failed, trying fallback");
                    remove_partial(target);
                    Some(err.to_string())
                }
            },
            None => None,
        };

        let fallback_err = match &self.tool {
            Some(tool) => match run_fallback(tool, source, target) {
                Ok(()) => return Ok(()),
                Err(err) => {
                    remove_partial(target);
                    Some(err.to_string())
                }
            },
            None => None,
        };

        match (primary_err, fallback_err) {
            (Some(primary), Some(fallback)) => Err(ConvertError::Failed { primary, fallback }),
            (None, Some(fallback)) => Err(ConvertError::Failed {
                primary: "no primary converter configured".to_string(),
                fallback,
            }),
            // A failed primary without a resolvable fallback binary is an
            // environment problem, not a document problem.
            (Some(primary), None) => {
                warn!(error = %primary, "primary converter failed and no fallback binary resolved");
                Err(ConvertError::ToolUnavailable)
            }
            (None, None) => Err(ConvertError::ToolUnavailable),
        }
    }
}

/// Invoke the external tool in a scratch directory next to the target, then
/// move its output into place. The scratch directory is removed on drop, so
/// no stray output survives either outcome.
fn run_fallback(tool: &ExternalTool, source: &Path, target: &Path) -> anyhow::Result<()> {
    let parent = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    let scratch = tempfile::Builder::new()
        .prefix("convert-")
        .tempdir_in(parent)?;
    let produced = tool.run(source, scratch.path())?;
    std::fs::rename(&produced, target)?;
    Ok(())
}

fn remove_partial(target: &Path) {
    if target.exists() {
        if let Err(err) = std::fs::remove_file(target) {
            warn!(path = %target.display(), error = %err, "failed to remove partial output");
        }
    }
}
