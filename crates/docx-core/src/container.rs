//! DOCX zip container I/O

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::io::{Read, Write};
use std::path::Path;

use tracing::debug;

use crate::text;
use crate::{DocxError, Result};

/// A DOCX package held in memory as an ordered list of zip entries.
///
/// Entry order is preserved between open and save so that the output archive
/// keeps the layout word processors expect.
#[derive(Debug, Default)]
pub struct DocxPackage {
    entries: Vec<(String, Vec<u8>)>,
}

impl DocxPackage {
    /// Open a DOCX file and read every entry into memory.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let mut archive = zip::ZipArchive::new(file)?;
        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let name = entry.name().to_string();
            let mut data = Vec::new();
            entry.read_to_end(&mut data)?;
            entries.push((name, data));
        }
        Ok(Self { entries })
    }

    /// Write the package back out as a zip archive.
    ///
    /// Media entries are stored uncompressed and everything else deflated,
    /// matching the typical DOCX layout.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path.as_ref())?;
        let mut writer = zip::ZipWriter::new(file);
        let deflated = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let stored = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        for (name, data) in &self.entries {
            let opts = if name.starts_with("word/media/") {
                stored
            } else {
                deflated
            };
            writer
                .start_file(name.as_str(), opts)
                .map_err(|e| DocxError::SaveError(e.to_string()))?;
            writer.write_all(data)?;
        }
        writer
            .finish()
            .map_err(|e| DocxError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Entry names in archive order.
    pub fn entry_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Raw bytes of a named entry.
    pub fn entry(&self, name: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, data)| data.as_slice())
    }

    /// Replace an entry's bytes, or append the entry if it does not exist.
    pub fn set_entry(&mut self, name: &str, data: Vec<u8>) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(n, _)| n == name) {
            *existing = data;
        } else {
            self.entries.push((name.to_string(), data));
        }
    }

    /// XML parts of the package as (name, text) pairs, in archive order.
    pub fn xml_parts(&self) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.entries
            .iter()
            .filter(|(name, _)| name.ends_with(".xml"))
            .map(|(name, data)| (name.as_str(), String::from_utf8_lossy(data)))
    }

    /// Scan every XML part for `{{name}}` placeholder tokens.
    ///
    /// Markup is stripped per part and the remaining text of all parts is
    /// concatenated into one scan buffer, each part terminated by a newline.
    /// The token pattern never crosses a newline, so a token broken across
    /// markup runs inside one part is found while a token split across two
    /// parts is not. Existing templates rely on exactly this boundary, so it
    /// must not change.
    pub fn placeholder_counts(&self) -> BTreeMap<String, usize> {
        let mut buffer = String::new();
        for (name, xml) in self.xml_parts() {
            let plain = text::strip_markup(&xml);
            debug!(part = name, chars = plain.len(), "scanned document part");
            buffer.push_str(&plain);
            buffer.push('\n');
        }
        text::scan_tokens(&buffer)
    }

    /// Apply literal text replacements to every text-bearing part.
    ///
    /// Covers the document body (paragraphs and table cells) plus all section
    /// headers and footers. Returns the number of replaced occurrences.
    pub fn replace_placeholders(&mut self, rules: &BTreeMap<String, String>) -> usize {
        let mut total = 0;
        let part_names: Vec<String> = self
            .entry_names()
            .filter(|name| is_text_part(name))
            .map(str::to_string)
            .collect();
        for name in part_names {
            let Some(data) = self.entry(&name) else {
                continue;
            };
            let xml = String::from_utf8_lossy(data).into_owned();
            let (replaced, count) = text::replace_text(&xml, rules);
            if count > 0 {
                debug!(part = %name, count, "replaced placeholders in part");
                self.set_entry(&name, replaced.into_bytes());
                total += count;
            }
        }
        total
    }
}

/// Parts whose paragraphs carry user-visible document text.
fn is_text_part(name: &str) -> bool {
    name == "word/document.xml"
        || ((name.starts_with("word/header") || name.starts_with("word/footer"))
            && name.ends_with(".xml"))
}
