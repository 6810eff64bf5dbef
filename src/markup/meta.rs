//! Code fence meta string parsing
//!
//! A fence such as ```` ```ts {1,3-5} fileName="a.ts" ```` carries a meta
//! string after the language. Two optional patterns are recognized: a braced
//! line list for highlighting and a `fileName=` pair for the display name.
//! Anything else in the meta string is ignored.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static HIGHLIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([\d\s,\-]+)\}").expect("highlight regex is valid"));

static FILE_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bfileName=(?:"([^"]*)"|'([^']*)'|([^\s"'{}]+))"#).expect("fileName regex is valid")
});

/// A validated set of highlighted line ranges, e.g. `1,3-5`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HighlightLines {
    /// Inclusive, 1-based
    ranges: Vec<(u32, u32)>,
}

impl HighlightLines {
    /// Parse a comma separated list of lines and `a-b` ranges. Returns None
    /// for anything malformed: empty items, zero, or reversed ranges.
    pub fn parse(spec: &str) -> Option<Self> {
        let compact: String = spec.chars().filter(|c| !c.is_whitespace()).collect();
        if compact.is_empty() {
            return None;
        }

        let mut ranges = Vec::new();
        for item in compact.split(',') {
            let (start, end) = match item.split_once('-') {
                Some((a, b)) => (a.parse::<u32>().ok()?, b.parse::<u32>().ok()?),
                None => {
                    let n = item.parse::<u32>().ok()?;
                    (n, n)
                }
            };
            if start == 0 || start > end {
                return None;
            }
            ranges.push((start, end));
        }
        Some(Self { ranges })
    }

    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }

    /// Whether 1-based `line` is highlighted
    pub fn contains(&self, line: u32) -> bool {
        self.ranges.iter().any(|&(a, b)| (a..=b).contains(&line))
    }
}

impl fmt::Display for HighlightLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &(a, b)) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            if a == b {
                write!(f, "{a}")?;
            } else {
                write!(f, "{a}-{b}")?;
            }
        }
        Ok(())
    }
}

impl TryFrom<String> for HighlightLines {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("invalid highlight lines {value:?}"))
    }
}

impl From<HighlightLines> for String {
    fn from(value: HighlightLines) -> Self {
        value.to_string()
    }
}

/// Metadata attached to a code block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_lines: Option<HighlightLines>,
}

impl CodeMeta {
    /// Extract recognized patterns from a fence meta string
    pub fn parse(meta: &str) -> Self {
        let highlight_lines = HIGHLIGHT_RE
            .captures(meta)
            .and_then(|caps| caps.get(1))
            .and_then(|m| HighlightLines::parse(m.as_str()));

        let file_name = FILE_NAME_RE.captures(meta).and_then(|caps| {
            (1..=3)
                .filter_map(|i| caps.get(i))
                .map(|m| m.as_str().to_string())
                .find(|name| !name.is_empty())
        });

        Self {
            file_name,
            highlight_lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.file_name.is_none() && self.highlight_lines.is_none()
    }

    /// Copy every set field of `other` over this one
    pub fn merge_from(&mut self, other: &CodeMeta) {
        if other.file_name.is_some() {
            self.file_name.clone_from(&other.file_name);
        }
        if other.highlight_lines.is_some() {
            self.highlight_lines.clone_from(&other.highlight_lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_patterns() {
        let meta = CodeMeta::parse(r#"{1,3-5} fileName="a.ts""#);
        assert_eq!(meta.file_name.as_deref(), Some("a.ts"));
        let lines = meta.highlight_lines.expect("highlight lines");
        assert_eq!(lines.to_string(), "1,3-5");
        assert!(lines.contains(1) && lines.contains(4) && !lines.contains(2) && !lines.contains(6));
    }

    #[test]
    fn test_parse_order_and_quoting() {
        let meta = CodeMeta::parse("fileName=src/main.rs showLineNumbers { 2 , 7-8 }");
        assert_eq!(meta.file_name.as_deref(), Some("src/main.rs"));
        assert_eq!(meta.highlight_lines.map(|h| h.to_string()).as_deref(), Some("2,7-8"));

        let meta = CodeMeta::parse("fileName='single.py'");
        assert_eq!(meta.file_name.as_deref(), Some("single.py"));
    }

    #[test]
    fn test_absent_patterns_leave_fields_unset() {
        assert!(CodeMeta::parse("").is_empty());
        assert!(CodeMeta::parse("showLineNumbers").is_empty());
        assert!(CodeMeta::parse(r#"title="x""#).is_empty());
    }

    #[test]
    fn test_malformed_is_ignored() {
        assert!(CodeMeta::parse("{5-3}").highlight_lines.is_none());
        assert!(CodeMeta::parse("{1,,2}").highlight_lines.is_none());
        assert!(CodeMeta::parse("{0}").highlight_lines.is_none());
        assert!(CodeMeta::parse("{a-b}").highlight_lines.is_none());
        assert!(CodeMeta::parse(r#"fileName="""#).file_name.is_none());
        assert!(CodeMeta::parse("myfileName=x").file_name.is_none());
    }

    #[test]
    fn test_merge_only_copies_set_fields() {
        let mut outer = CodeMeta {
            file_name: Some("keep.rs".into()),
            highlight_lines: None,
        };
        outer.merge_from(&CodeMeta::parse("{3}"));
        assert_eq!(outer.file_name.as_deref(), Some("keep.rs"));
        assert_eq!(outer.highlight_lines.map(|h| h.to_string()).as_deref(), Some("3"));
    }

    #[test]
    fn test_json_uses_plain_strings() {
        let meta = CodeMeta::parse(r#"{1,3-5} fileName="a.ts""#);
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json, serde_json::json!({"fileName": "a.ts", "highlightLines": "1,3-5"}));
        let back: CodeMeta = serde_json::from_value(json).unwrap();
        assert_eq!(back, meta);
    }
}
