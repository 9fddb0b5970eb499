//! Markup stripping, token scanning, and run-aware text replacement

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid regex"));

static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").expect("invalid regex"));

static NON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w.]").expect("invalid regex"));

static PARA_START_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:p[ >]").expect("invalid regex"));

static RUN_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<w:t(?: [^>]*)?>([^<]*)</w:t>").expect("invalid regex"));

/// Remove all angle-bracket markup, leaving only character data.
pub fn strip_markup(xml: &str) -> String {
    TAG_RE.replace_all(xml, "").into_owned()
}

/// Scan plain text for `{{...}}` tokens and count occurrences per name.
///
/// The token pattern does not cross line boundaries. The inner content is
/// reduced to word characters and dots; tokens that clean down to nothing
/// (e.g. `{{!!}}`) are dropped.
pub fn scan_tokens(text: &str) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for caps in TOKEN_RE.captures_iter(text) {
        let name = NON_NAME_RE.replace_all(&caps[1], "");
        if name.is_empty() {
            continue;
        }
        *counts.entry(name.into_owned()).or_insert(0) += 1;
    }
    counts
}

/// Escape a replacement value for insertion into XML character data.
pub fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Replace literal occurrences of each rule key across `<w:t>` runs.
///
/// For each `<w:p>` paragraph the `<w:t>` texts are concatenated into a
/// virtual string, so a key broken across several runs is still matched. The
/// replacement is written into the run where the match starts and the matched
/// portions of later runs are cleared; text outside matches keeps its run.
/// Returns the modified XML and the number of replaced occurrences.
pub fn replace_text(xml: &str, rules: &BTreeMap<String, String>) -> (String, usize) {
    let mut result = xml.to_string();
    let mut total = 0usize;

    // Process paragraphs in reverse so edits do not shift earlier offsets.
    for (p_start, p_end) in find_paragraphs(&result).into_iter().rev() {
        let para = result[p_start..p_end].to_string();
        let (new_para, count) = replace_in_paragraph(&para, rules);
        if count > 0 {
            result.replace_range(p_start..p_end, &new_para);
            total += count;
        }
    }

    (result, total)
}

/// Byte ranges of every `<w:p ...>...</w:p>` element. Paragraphs do not nest,
/// so each start is paired with the first end past it.
fn find_paragraphs(xml: &str) -> Vec<(usize, usize)> {
    let starts: Vec<usize> = PARA_START_RE.find_iter(xml).map(|m| m.start()).collect();
    let mut paragraphs = Vec::with_capacity(starts.len());
    for ps in starts {
        if let Some(rel) = xml[ps..].find("</w:p>") {
            paragraphs.push((ps, ps + rel + "</w:p>".len()));
        }
    }
    paragraphs
}

fn replace_in_paragraph(para: &str, rules: &BTreeMap<String, String>) -> (String, usize) {
    // Content ranges and texts of every <w:t> in this paragraph.
    let runs: Vec<(usize, usize, String)> = RUN_TEXT_RE
        .captures_iter(para)
        .filter_map(|caps| {
            caps.get(1)
                .map(|m| (m.start(), m.end(), m.as_str().to_string()))
        })
        .collect();
    if runs.is_empty() {
        return (para.to_string(), 0);
    }

    // Virtual text across runs, with the owning run of every char.
    let mut virtual_chars: Vec<char> = Vec::new();
    let mut owner: Vec<usize> = Vec::new();
    for (run_idx, (_, _, text)) in runs.iter().enumerate() {
        for ch in text.chars() {
            virtual_chars.push(ch);
            owner.push(run_idx);
        }
    }

    // Non-overlapping literal matches of every rule key, char-indexed.
    let mut matches: Vec<(usize, usize, &str)> = Vec::new();
    for (key, value) in rules {
        let key_chars: Vec<char> = key.chars().collect();
        if key_chars.is_empty() {
            continue;
        }
        let klen = key_chars.len();
        let mut pos = 0;
        while pos + klen <= virtual_chars.len() {
            if virtual_chars[pos..pos + klen] == key_chars[..] {
                let overlaps = matches.iter().any(|(s, e, _)| pos < *e && pos + klen > *s);
                if !overlaps {
                    matches.push((pos, pos + klen, value.as_str()));
                }
                pos += klen;
            } else {
                pos += 1;
            }
        }
    }
    if matches.is_empty() {
        return (para.to_string(), 0);
    }
    matches.sort_by_key(|(s, _, _)| *s);
    let count = matches.len();

    // Rebuild run texts: the replacement goes into the run owning the first
    // matched char, the rest of the match is dropped from its runs.
    let mut new_texts: Vec<String> = vec![String::new(); runs.len()];
    let mut i = 0;
    let mut next = 0;
    while i < virtual_chars.len() {
        if next < matches.len() && matches[next].0 == i {
            let (start, end, value) = matches[next];
            new_texts[owner[start]].push_str(&xml_escape(value));
            i = end;
            next += 1;
        } else {
            new_texts[owner[i]].push(virtual_chars[i]);
            i += 1;
        }
    }

    let mut new_para = para.to_string();
    for (run_idx, (start, end, _)) in runs.iter().enumerate().rev() {
        new_para.replace_range(*start..*end, &new_texts[run_idx]);
    }
    (new_para, count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rules(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn strip_markup_keeps_character_data() {
        let xml = "<w:p><w:r><w:t>hello</w:t></w:r></w:p>";
        assert_eq!(strip_markup(xml), "hello");
    }

    #[test]
    fn strip_markup_joins_runs_without_separator() {
        let xml = "<w:r><w:t>{{na</w:t></w:r><w:r><w:t>me}}</w:t></w:r>";
        assert_eq!(strip_markup(xml), "{{name}}");
    }

    #[test]
    fn scan_tokens_cleans_non_name_characters() {
        let counts = scan_tokens("{{ payer_full_name }} {{land.area}}");
        assert_eq!(counts.get("payer_full_name"), Some(&1));
        assert_eq!(counts.get("land.area"), Some(&1));
    }

    #[test]
    fn scan_tokens_drops_empty_names() {
        let counts = scan_tokens("{{!!}} {{ }} {{}}");
        assert!(counts.is_empty());
    }

    #[test]
    fn replace_single_run() {
        let xml = "<w:p><w:r><w:t>Орендар: {{payer_full_name}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(xml, &rules(&[("{{payer_full_name}}", "Іван Петров")]));
        assert_eq!(count, 1);
        assert_eq!(out, "<w:p><w:r><w:t>Орендар: Іван Петров</w:t></w:r></w:p>");
    }

    #[test]
    fn replace_token_split_across_runs() {
        let xml = "<w:p><w:r><w:t>{{payer_</w:t></w:r><w:r><w:t>full_name}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(xml, &rules(&[("{{payer_full_name}}", "Іван Петров")]));
        assert_eq!(count, 1);
        assert_eq!(
            out,
            "<w:p><w:r><w:t>Іван Петров</w:t></w:r><w:r><w:t></w:t></w:r></w:p>"
        );
    }

    #[test]
    fn replacement_is_whole_token() {
        let xml = "<w:p><w:r><w:t>{{contract_number}} і {{contract}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(
            xml,
            &rules(&[("{{contract}}", "БАЗА"), ("{{contract_number}}", "17/2024")]),
        );
        assert_eq!(count, 2);
        assert!(out.contains("17/2024 і БАЗА"));
    }

    #[test]
    fn replacement_longer_than_token() {
        let xml = "<w:p><w:r><w:t>{{n}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(xml, &rules(&[("{{n}}", "a much longer value")]));
        assert_eq!(count, 1);
        assert!(out.contains("a much longer value"));
    }

    #[test]
    fn replacement_values_are_escaped() {
        let xml = "<w:p><w:r><w:t>{{company_name}}</w:t></w:r></w:p>";
        let (out, _) = replace_text(xml, &rules(&[("{{company_name}}", "ТОВ \"Лан\" <і Ко>")]));
        assert!(out.contains("ТОВ \"Лан\" &lt;і Ко&gt;"));
        assert!(!out.contains("<і Ко>"));
    }

    #[test]
    fn unknown_tokens_left_verbatim() {
        let xml = "<w:p><w:r><w:t>{{mystery}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(xml, &rules(&[("{{known}}", "x")]));
        assert_eq!(count, 0);
        assert_eq!(out, xml);
    }

    #[test]
    fn replaces_inside_table_cells() {
        let xml = "<w:tbl><w:tr><w:tc><w:p><w:r><w:t>{{land_area}}</w:t></w:r></w:p></w:tc></w:tr></w:tbl>";
        let (out, count) = replace_text(xml, &rules(&[("{{land_area}}", "12.3000")]));
        assert_eq!(count, 1);
        assert!(out.contains(">12.3000<"));
    }

    #[test]
    fn multiple_occurrences_in_one_paragraph() {
        let xml = "<w:p><w:r><w:t>{{a}} та {{a}}</w:t></w:r></w:p>";
        let (out, count) = replace_text(xml, &rules(&[("{{a}}", "X")]));
        assert_eq!(count, 2);
        assert!(out.contains("X та X"));
    }
}
