//! Document rendering
//!
//! Applies a substitution context to a template and writes the filled copy.
//! The template on disk is never modified.

use std::collections::BTreeMap;
use std::path::Path;

use docx_core::DocxPackage;
use tracing::info;

/// Replace every `{{name}}` from the context across all text-bearing parts
/// and persist the result at `output_path`.
///
/// Matching is literal and whole-token: the braces are part of the search
/// key, so `{{contract}}` can never touch `{{contract_number}}`. Names
/// absent from the context stay verbatim in the output; the generation log
/// reports them. Returns the number of replaced occurrences.
pub fn render(
    template_path: &Path,
    context: &BTreeMap<String, String>,
    output_path: &Path,
) -> docx_core::Result<usize> {
    let mut package = DocxPackage::open(template_path)?;

    let rules: BTreeMap<String, String> = context
        .iter()
        .map(|(name, value)| (format!("{{{{{name}}}}}"), value.clone()))
        .collect();

    let replaced = package.replace_placeholders(&rules);
    package.save(output_path)?;
    info!(
        template = %template_path.display(),
        output = %output_path.display(),
        replaced,
        "rendered document"
    );
    Ok(replaced)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture(dir: &Path, body: &str) -> std::path::PathBuf {
        let path = dir.join("template.docx");
        let mut package = DocxPackage::default();
        package.set_entry("word/document.xml", body.as_bytes().to_vec());
        package.save(&path).unwrap();
        path
    }

    #[test]
    fn renders_without_touching_the_template() {
        let dir = tempfile::tempdir().unwrap();
        let template = fixture(
            dir.path(),
            "<w:document><w:body><w:p><w:r><w:t>{{payer_full_name}}</w:t></w:r></w:p></w:body></w:document>",
        );
        let before = std::fs::read(&template).unwrap();

        let mut context = BTreeMap::new();
        context.insert("payer_full_name".to_string(), "Іван Петров".to_string());
        let output = dir.path().join("filled.docx");
        let replaced = render(&template, &context, &output).unwrap();

        assert_eq!(replaced, 1);
        assert_eq!(std::fs::read(&template).unwrap(), before);

        let filled = DocxPackage::open(&output).unwrap();
        let body = String::from_utf8_lossy(filled.entry("word/document.xml").unwrap()).into_owned();
        assert!(body.contains("Іван Петров"));
        assert!(!body.contains("{{payer_full_name}}"));
    }

    #[test]
    fn names_outside_context_stay_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let template = fixture(
            dir.path(),
            "<w:document><w:body><w:p><w:r><w:t>{{left_alone}}</w:t></w:r></w:p></w:body></w:document>",
        );

        let output = dir.path().join("filled.docx");
        let replaced = render(&template, &BTreeMap::new(), &output).unwrap();
        assert_eq!(replaced, 0);

        let filled = DocxPackage::open(&output).unwrap();
        let body = String::from_utf8_lossy(filled.entry("word/document.xml").unwrap()).into_owned();
        assert!(body.contains("{{left_alone}}"));
    }
}
