//! End-to-end Contract Generation
//!
//! Runs the full pipeline in local mode: templates come from a directory,
//! the finished PDF lands under a local delivery root. Conversion uses
//! whatever soffice/libreoffice binary is on PATH.
//!
//! Usage:
//!   cargo run --example generate_contract -- <template-dir> <template.docx> <values.json> <payer> <number> <year> [delivery-root]

use contract::pipeline::{LocalDelivery, LocalFetcher, Pipeline, PipelineConfig};
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_target(false).init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 7 {
        eprintln!(
            "Usage: {} <template-dir> <template.docx> <values.json> <payer> <number> <year> [delivery-root]",
            args[0]
        );
        std::process::exit(1);
    }

    let template_dir = PathBuf::from(&args[1]);
    let template_ref = &args[2];
    let values: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&std::fs::read_to_string(&args[3])?)?;
    let payer = &args[4];
    let number = &args[5];
    let year: i32 = args[6].parse()?;
    let delivery_root = args
        .get(7)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("output"));

    let config = PipelineConfig::default();
    let pipeline = Pipeline::new(
        &config,
        Box::new(LocalFetcher { root: template_dir }),
        Box::new(LocalDelivery {
            root: delivery_root.clone(),
        }),
    );

    let outcome = pipeline.generate(template_ref, &values, payer, number, year)?;

    println!("{}", outcome.log);
    println!();
    println!("Збережено: {}", delivery_root.join(&outcome.remote_path).display());

    Ok(())
}
