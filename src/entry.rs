//! Entry Parser - Paragraph splitting for import files
//!
//! Import files are plain UTF-8 text. Entries are separated by one or more
//! blank lines:
//!
//! ```text
//! first entry
//! spanning two lines
//!
//! second entry
//! ```
//!
//! A file without any blank-line separator is treated as one entry per line.

/// Maximum title length in characters
pub const TITLE_MAX_CHARS: usize = 100;

/// Title used when the content collapses to nothing
pub const UNTITLED: &str = "Untitled";

/// A single importable entry: an ordered, non-empty run of non-blank lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    lines: Vec<String>,
}

impl Entry {
    /// Build an entry from lines. Trailing whitespace is stripped and blank
    /// lines are dropped; returns `None` if nothing is left.
    pub fn from_lines<I, S>(lines: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let lines: Vec<String> = lines
            .into_iter()
            .map(|l| l.as_ref().trim_end().to_string())
            .filter(|l| !l.trim().is_empty())
            .collect();

        if lines.is_empty() {
            None
        } else {
            Some(Self { lines })
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The payload stored in the content record
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn title(&self) -> String {
        derive_title(&self.text())
    }

    /// Single-line preview for console output
    pub fn preview(&self, max_chars: usize) -> String {
        preview(&self.text(), max_chars)
    }
}

/// Derive the stored title: newlines become spaces, trimmed, capped at
/// [`TITLE_MAX_CHARS`] characters.
pub fn derive_title(content: &str) -> String {
    let flat = content.replace('\n', " ");
    let title: String = flat.trim().chars().take(TITLE_MAX_CHARS).collect();
    if title.is_empty() {
        UNTITLED.to_string()
    } else {
        title
    }
}

/// Flatten and shorten text for display, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() > max_chars {
        let head: String = flat.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        flat
    }
}

/// Split raw file text into entries, in file order.
pub fn parse_entries(text: &str) -> Vec<Entry> {
    let mut paragraphs: Vec<Vec<&str>> = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    // One paragraph means no separator was seen between non-blank lines
    if paragraphs.len() == 1 {
        return paragraphs
            .remove(0)
            .into_iter()
            .filter_map(|line| Entry::from_lines([line]))
            .collect();
    }

    paragraphs.into_iter().filter_map(Entry::from_lines).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(entries: &[Entry]) -> Vec<String> {
        entries.iter().map(Entry::text).collect()
    }

    #[test]
    fn test_paragraphs_split_on_blank_lines() {
        let entries = parse_entries("a\nb\n\nc\n");
        assert_eq!(texts(&entries), vec!["a\nb", "c"]);
    }

    #[test]
    fn test_consecutive_blank_lines_collapse() {
        let entries = parse_entries("\n\nfirst\n\n\n   \nsecond\nthird\n\n\n");
        assert_eq!(texts(&entries), vec!["first", "second\nthird"]);
    }

    #[test]
    fn test_no_separator_falls_back_to_lines() {
        let entries = parse_entries("one\ntwo\n  \nthree");
        // the whitespace-only line is a separator
        assert_eq!(texts(&entries), vec!["one\ntwo", "three"]);

        let entries = parse_entries("one\ntwo\nthree\n");
        assert_eq!(texts(&entries), vec!["one", "two", "three"]);

        // blank lines only at the edges do not separate anything
        let entries = parse_entries("\n\na\nb\n\n");
        assert_eq!(texts(&entries), vec!["a", "b"]);

        let entries = parse_entries("  \r\nonly\n\n\n");
        assert_eq!(texts(&entries), vec!["only"]);
    }

    #[test]
    fn test_trailing_whitespace_stripped() {
        let entries = parse_entries("alpha   \r\n  beta\t\r\n\r\ngamma \r\n");
        assert_eq!(texts(&entries), vec!["alpha\n  beta", "gamma"]);
    }

    #[test]
    fn test_blank_input_yields_nothing() {
        assert!(parse_entries("").is_empty());
        assert!(parse_entries("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_parse_is_deterministic() {
        let text = "x\n\ny\nz\n\n\nw";
        assert_eq!(parse_entries(text), parse_entries(text));
    }

    #[test]
    fn test_title_derivation() {
        assert_eq!(derive_title("line one\nline two"), "line one line two");
        assert_eq!(derive_title("  \n "), UNTITLED);

        let long = "é".repeat(150);
        assert_eq!(derive_title(&long).chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn test_preview_truncates() {
        assert_eq!(preview("short", 50), "short");
        assert_eq!(preview("abcdef\nghij", 5), "abcde...");
    }
}
