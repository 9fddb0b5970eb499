//! Template Validation
//!
//! Checks which known variables a DOCX template references and which of them
//! have usable values. Meant for authoring flows: run it against a freshly
//! uploaded template before putting it into rotation.
//!
//! Usage:
//!   cargo run --example analyze_template -- <template.docx> [values.json] [--multi]

use contract::analyzer::TemplateKind;
use contract::catalog;
use contract::pipeline::{LocalFetcher, Pipeline, PipelineConfig};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <template.docx> [values.json] [--multi]", args[0]);
        std::process::exit(1);
    }

    let template_path = Path::new(&args[1]);
    let kind = if args.iter().any(|a| a == "--multi") {
        TemplateKind::MultiPayer
    } else {
        TemplateKind::Single
    };

    let values = match args.get(2).filter(|a| a.as_str() != "--multi") {
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str(&text)?
        }
        None => serde_json::Map::new(),
    };

    let config = PipelineConfig::default();
    let pipeline = Pipeline::new(
        &config,
        Box::new(LocalFetcher {
            root: std::env::current_dir()?,
        }),
        Box::new(contract::pipeline::LocalDelivery {
            root: std::env::temp_dir(),
        }),
    );

    let result = pipeline.analyze_template(template_path, &values, kind)?;

    println!("Плейсхолдерів знайдено: {}", result.total_occurrences);
    println!("Заповнюється: {}", result.filled_occurrences);
    for (name, count) in &result.counts {
        println!("  {{{{{name}}}}} x{count}");
    }
    if !result.missing_supported.is_empty() {
        println!("Без значення:");
        for name in &result.missing_supported {
            let hint = catalog::describe(name).unwrap_or("сучасна змінна");
            println!("  {{{{{name}}}}} — {hint}");
        }
    }
    if !result.unsupported.is_empty() {
        println!("Невідомі змінні:");
        for name in &result.unsupported {
            println!("  {{{{{name}}}}}");
        }
    }

    Ok(())
}
