//! Generation orchestration and artifact naming
//!
//! One pipeline run: fetch template, analyze, build context, render, convert,
//! deliver. Every temporary file is owned by the request and removed best
//! effort on every exit path; cleanup failures are logged, never escalated.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::analyzer::{self, AnalysisResult, TemplateKind};
use crate::context;
use crate::convert::{Convert, ConverterChain, ExternalTool};
use crate::render;
use crate::{ContractError, Result};

/// Template fetch collaborator: download `remote_ref` to exactly `target`.
pub trait TemplateFetch {
    fn fetch(&self, remote_ref: &str, target: &Path) -> anyhow::Result<()>;
}

/// Artifact delivery collaborator: publish `local` at `remote_path`.
pub trait Delivery {
    fn deliver(&self, local: &Path, remote_path: &str) -> anyhow::Result<()>;
}

/// Serves templates from a local directory (dev mode and tests).
pub struct LocalFetcher {
    pub root: PathBuf,
}

impl TemplateFetch for LocalFetcher {
    fn fetch(&self, remote_ref: &str, target: &Path) -> anyhow::Result<()> {
        std::fs::copy(self.root.join(remote_ref), target)?;
        Ok(())
    }
}

/// Places artifacts under a local root, creating intermediate directories
/// (dev mode and tests).
pub struct LocalDelivery {
    pub root: PathBuf,
}

impl Delivery for LocalDelivery {
    fn deliver(&self, local: &Path, remote_path: &str) -> anyhow::Result<()> {
        let dest = self.root.join(remote_path);
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(local, &dest)?;
        Ok(())
    }
}

/// Pipeline settings
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Directory for per-request temporary files
    #[serde(default = "default_workdir")]
    pub workdir: PathBuf,

    /// Explicit converter binary; PATH is probed when unset
    #[serde(default)]
    pub converter_binary: Option<PathBuf>,
}

fn default_workdir() -> PathBuf {
    std::env::temp_dir()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workdir: default_workdir(),
            converter_binary: None,
        }
    }
}

/// Result of a successful generation run
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Where the delivery collaborator published the artifact
    pub remote_path: String,
    /// Human-readable fill summary for the requesting user
    pub log: String,
}

/// The document generation pipeline
pub struct Pipeline {
    fetcher: Box<dyn TemplateFetch>,
    delivery: Box<dyn Delivery>,
    converter: ConverterChain,
    workdir: PathBuf,
}

impl Pipeline {
    pub fn new(
        config: &PipelineConfig,
        fetcher: Box<dyn TemplateFetch>,
        delivery: Box<dyn Delivery>,
    ) -> Self {
        let tool = match &config.converter_binary {
            Some(path) => Some(ExternalTool::with_binary(path.clone())),
            None => ExternalTool::resolve(),
        };
        Self {
            fetcher,
            delivery,
            converter: ConverterChain::new(None, tool),
            workdir: config.workdir.clone(),
        }
    }

    /// Install a primary in-process converter ahead of the CLI fallback.
    pub fn with_primary_converter(mut self, primary: Box<dyn Convert>) -> Self {
        self.converter = self.converter.with_primary(primary);
        self
    }

    /// Generate one contract document and deliver it.
    ///
    /// Returns the remote path of the artifact and the generation log, or the
    /// first hard error. Temporaries are cleaned up on both outcomes.
    pub fn generate(
        &self,
        template_ref: &str,
        values: &Map<String, Value>,
        payer_name: &str,
        contract_number: &str,
        year: i32,
    ) -> Result<GenerationOutcome> {
        let stem = request_stem(payer_name, contract_number);
        let template_local = self.workdir.join(format!("{stem}_template.docx"));
        let filled_local = self.workdir.join(format!("{stem}_filled.docx"));
        let pdf_local = self.workdir.join(format!("{stem}.pdf"));

        let _cleanup = TempFiles::tracking(&[
            template_local.as_path(),
            filled_local.as_path(),
            pdf_local.as_path(),
        ]);
        self.run(
            template_ref,
            values,
            payer_name,
            contract_number,
            year,
            &template_local,
            &filled_local,
            &pdf_local,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn run(
        &self,
        template_ref: &str,
        values: &Map<String, Value>,
        payer_name: &str,
        contract_number: &str,
        year: i32,
        template_local: &Path,
        filled_local: &Path,
        pdf_local: &Path,
    ) -> Result<GenerationOutcome> {
        std::fs::create_dir_all(&self.workdir)?;

        info!(template = template_ref, "fetching template");
        self.fetcher
            .fetch(template_ref, template_local)
            .map_err(ContractError::Fetch)?;

        let counts = docx_core::extract_placeholders(template_local).map_err(|source| {
            ContractError::Format {
                reference: template_ref.to_string(),
                source,
            }
        })?;
        let analysis = analyzer::analyze(&counts, values, TemplateKind::Single);
        let ctx = context::build(&counts, values);

        render::render(template_local, &ctx, filled_local).map_err(|source| {
            ContractError::Format {
                reference: template_ref.to_string(),
                source,
            }
        })?;

        info!(source = %filled_local.display(), "converting to PDF");
        self.converter.convert(filled_local, pdf_local)?;
        remove_quietly(filled_local);

        let remote_path = remote_path(payer_name, contract_number, year);
        self.delivery
            .deliver(pdf_local, &remote_path)
            .map_err(ContractError::Delivery)?;
        remove_quietly(pdf_local);
        remove_quietly(template_local);

        info!(remote = %remote_path, "contract generated");
        Ok(GenerationOutcome {
            remote_path,
            log: generation_log(&analysis),
        })
    }

    /// Standalone template validation: which known variables does a template
    /// reference, and which of them have usable values?
    pub fn analyze_template(
        &self,
        path: &Path,
        values: &Map<String, Value>,
        kind: TemplateKind,
    ) -> Result<AnalysisResult> {
        let counts =
            docx_core::extract_placeholders(path).map_err(|source| ContractError::Format {
                reference: path.display().to_string(),
                source,
            })?;
        Ok(analyzer::analyze(&counts, values, kind))
    }
}

/// Deterministic remote location of a generated contract. Downstream systems
/// rebuild this path independently; changing it is a compatibility break.
pub fn remote_path(payer_name: &str, contract_number: &str, year: i32) -> String {
    format!("contracts/{year}/{payer_name}/Договір_{contract_number}_{payer_name}.pdf")
}

/// Per-request file stem so concurrent generations never collide.
fn request_stem(payer_name: &str, contract_number: &str) -> String {
    let sanitize = |s: &str| {
        s.chars()
            .map(|c| if c.is_alphanumeric() { c } else { '_' })
            .collect::<String>()
    };
    format!("{}_{}", sanitize(contract_number), sanitize(payer_name))
}

/// Fill summary shown to the requesting user, in the order the analyzer
/// produced.
pub fn generation_log(analysis: &AnalysisResult) -> String {
    let mut log = format!(
        "Знайдено підстановок: {}, заповнено: {}.",
        analysis.total_occurrences, analysis.filled_occurrences
    );
    if analysis.missing_supported.is_empty() && analysis.unsupported.is_empty() {
        log.push_str("\nУсі підстановки заповнено.");
        return log;
    }
    if !analysis.missing_supported.is_empty() {
        log.push_str(&format!(
            "\nБез значення: {}.",
            decorate(&analysis.missing_supported)
        ));
    }
    if !analysis.unsupported.is_empty() {
        log.push_str(&format!(
            "\nНевідомі змінні: {}.",
            decorate(&analysis.unsupported)
        ));
    }
    log
}

fn decorate(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{{{{{name}}}}}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Best-effort removal of the request's temporaries when the run unwinds.
struct TempFiles {
    paths: Vec<PathBuf>,
}

impl TempFiles {
    fn tracking(paths: &[&Path]) -> Self {
        Self {
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        }
    }
}

impl Drop for TempFiles {
    fn drop(&mut self) {
        for path in &self.paths {
            remove_quietly(path);
        }
    }
}

fn remove_quietly(path: &Path) {
    if path.exists() {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove temporary file");
        }
    }
}
