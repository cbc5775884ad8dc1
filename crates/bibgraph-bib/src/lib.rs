use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BibError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read a bibliography file, replacing undecodable bytes.
///
/// Hand-maintained .bib files are occasionally saved in a legacy encoding;
/// lossy decoding keeps the surrounding entries salvageable instead of
/// failing the whole run.
pub fn read_bib_file(path: &Path) -> Result<String, BibError> {
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Segment bibliography text into individual record blocks.
pub fn segment_entries(text: &str) -> EntrySegmenter<'_> {
    EntrySegmenter::new(text)
}

/// Iterator over the records of a bibliography file.
///
/// A record starts at a line whose trimmed content begins with `@` and is
/// closed once brace nesting returns to depth zero. Records that never
/// close (unbalanced or brace-free) are flushed by the next `@` line or by
/// end of input rather than rejected. Hand-maintained files routinely
/// contain such entries and downstream extraction salvages what it can.
///
/// The depth counter deliberately carries over between records; resetting
/// it at each `@` would change which malformed entries survive.
pub struct EntrySegmenter<'a> {
    lines: std::str::Lines<'a>,
    current: Vec<&'a str>,
    depth: i64,
    inside: bool,
    saw_brace: bool,
    pending: Option<String>,
    exhausted: bool,
}

impl<'a> EntrySegmenter<'a> {
    pub fn new(text: &'a str) -> Self {
        EntrySegmenter {
            lines: text.lines(),
            current: Vec::new(),
            depth: 0,
            inside: false,
            saw_brace: false,
            pending: None,
            exhausted: false,
        }
    }

    fn take_current(&mut self) -> String {
        let entry = self.current.join("\n");
        self.current.clear();
        entry
    }
}

impl Iterator for EntrySegmenter<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(entry) = self.pending.take() {
            return Some(entry);
        }
        if self.exhausted {
            return None;
        }

        while let Some(line) = self.lines.next() {
            let mut flushed = None;
            if line.trim().starts_with('@') {
                if !self.current.is_empty() {
                    flushed = Some(self.take_current());
                }
                self.inside = true;
                self.saw_brace = false;
            }

            if self.inside {
                self.current.push(line);
                let opens = line.matches('{').count() as i64;
                let closes = line.matches('}').count() as i64;
                if opens > 0 || closes > 0 {
                    self.saw_brace = true;
                }
                self.depth += opens - closes;

                if self.saw_brace && self.depth <= 0 {
                    let entry = self.take_current();
                    self.inside = false;
                    // An `@` line can both flush the previous record and
                    // close itself; hand the flushed one out first.
                    if flushed.is_some() {
                        self.pending = Some(entry);
                        return flushed;
                    }
                    return Some(entry);
                }
            }

            if flushed.is_some() {
                return flushed;
            }
        }

        self.exhausted = true;
        if !self.current.is_empty() {
            return Some(self.take_current());
        }
        None
    }
}

/// Extract the `title` field from one record.
///
/// The field name is matched case-insensitively and the value may be
/// delimited by braces or quotes and span multiple lines. Newlines collapse
/// to spaces and whitespace runs to a single space. A record without a
/// usable title yields `None`; that is not an error.
pub fn extract_title(entry: &str) -> Option<String> {
    static TITLE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r#"(?is)title\s*=\s*[{"](.+?)[}"]\s*,?"#).unwrap());
    static WS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

    let caps = TITLE_RE.captures(entry)?;
    let raw = caps.get(1)?.as_str().replace('\n', " ");
    Some(WS_RE.replace_all(raw.trim(), " ").into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── segmentation ──

    #[test]
    fn test_segment_two_entries() {
        let text = "@article{a1,\n  title={First},\n  year={2020}\n}\n\n@book{b1,\n  title={Second}\n}\n";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("First"));
        assert!(entries[1].contains("Second"));
    }

    #[test]
    fn test_segment_single_line_entry() {
        let text = "@article{a1, title={Knowledge Graphs and Ontology Mapping}, year=2020}";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0], text);
    }

    #[test]
    fn test_segment_unterminated_entry_flushed_at_eof() {
        let text = "@article{a1,\n  title={Dangling";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].contains("Dangling"));
    }

    #[test]
    fn test_segment_unterminated_entry_flushed_by_next_record() {
        let text = "@article{a1,\n  title={Dangling\n@book{b1, title={Closed}}";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("Dangling"));
        assert!(entries[1].contains("Closed"));
    }

    #[test]
    fn test_segment_braceless_entry_accumulates_until_next_record() {
        let text = "@comment this one has no braces\nstill part of it\n@misc{m1, note={x}}";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 2);
        assert!(entries[0].contains("still part of it"));
    }

    #[test]
    fn test_segment_ignores_preamble_text() {
        let text = "% hand-maintained, do not sort\n\n@misc{m1, note={x}}";
        let entries: Vec<String> = segment_entries(text).collect();
        assert_eq!(entries.len(), 1);
        assert!(entries[0].starts_with("@misc"));
    }

    #[test]
    fn test_segment_empty_input() {
        assert_eq!(segment_entries("").count(), 0);
    }

    #[test]
    fn test_segment_is_restartable() {
        let text = "@a{x, f={1}}\n@b{y, f={2}}";
        let first: Vec<String> = segment_entries(text).collect();
        let second: Vec<String> = segment_entries(text).collect();
        assert_eq!(first, second);
    }

    // ── title extraction ──

    #[test]
    fn test_extract_title_braced() {
        let entry = "@article{a1,\n  title={Knowledge Graphs in Practice},\n  year={2020}\n}";
        assert_eq!(
            extract_title(entry).as_deref(),
            Some("Knowledge Graphs in Practice")
        );
    }

    #[test]
    fn test_extract_title_quoted() {
        let entry = "@article{a1, title=\"Quoted Title Here\", year=2019}";
        assert_eq!(extract_title(entry).as_deref(), Some("Quoted Title Here"));
    }

    #[test]
    fn test_extract_title_case_insensitive_field() {
        let entry = "@article{a1, TITLE={Upper Case Field}}";
        assert_eq!(extract_title(entry).as_deref(), Some("Upper Case Field"));
    }

    #[test]
    fn test_extract_title_multiline_value_collapses() {
        let entry = "@article{a1,\n  title={Knowledge Graphs\n          and Clinical Guidelines},\n}";
        assert_eq!(
            extract_title(entry).as_deref(),
            Some("Knowledge Graphs and Clinical Guidelines")
        );
    }

    #[test]
    fn test_extract_title_missing() {
        let entry = "@article{a1, author={Someone}, year={2018}}";
        assert_eq!(extract_title(entry), None);
    }
}
