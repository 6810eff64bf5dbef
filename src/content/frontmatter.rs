//! Header block extraction and field parsing

use std::sync::LazyLock;

use regex::Regex;

use super::error::ContentError;

/// `---` line, key/value lines, closing `---` line, at the top of the file
static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?ms)\A\s*---[ \t]*\r?\n(.*?)^---[ \t]*\r?$\n?").expect("header regex is valid")
});

/// Split a file into its header block (if any) and body
pub fn split_header(source: &str) -> (Option<&str>, &str) {
    match HEADER_RE.captures(source) {
        Some(caps) => {
            let block = caps.get(1).map_or("", |m| m.as_str());
            let end = caps.get(0).map_or(0, |m| m.end());
            (Some(block), &source[end..])
        }
        None => (None, source),
    }
}

/// Raw recognized fields of a header block
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Unparsed `tech` value, a bracketed list literal
    pub tech: Option<String>,
}

impl FrontMatter {
    /// Pick out recognized fields by line prefix. Unknown keys are ignored;
    /// a repeated key keeps its last value.
    pub fn parse(block: &str) -> Self {
        let mut fm = FrontMatter::default();
        for line in block.lines() {
            let line = line.trim_start();
            if let Some(value) = line.strip_prefix("title:") {
                fm.title = Some(unquote(value));
            } else if let Some(value) = line.strip_prefix("description:") {
                fm.description = Some(unquote(value));
            } else if let Some(value) = line.strip_prefix("tech:") {
                fm.tech = Some(value.trim().to_string());
            }
        }
        fm
    }
}

/// Trim a scalar value and drop one pair of surrounding quotes
fn unquote(value: &str) -> String {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner.to_string();
        }
    }
    value.to_string()
}

/// Parse a bracketed tag literal such as `["Rust", "WebAssembly"]`
pub fn parse_tags(raw: &str) -> Result<Vec<String>, ContentError> {
    serde_json::from_str::<Vec<String>>(raw.trim()).map_err(|source| ContentError::MalformedTags {
        raw: raw.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_header() {
        let src = "---\ntitle: Foo\n---\nBody line\n";
        let (header, body) = split_header(src);
        assert_eq!(header, Some("title: Foo\n"));
        assert_eq!(body, "Body line\n");
    }

    #[test]
    fn test_split_without_header() {
        let src = "# Just markdown\n---\nnot a header\n";
        let (header, body) = split_header(src);
        assert_eq!(header, None);
        assert_eq!(body, src);
    }

    #[test]
    fn test_split_empty_header_and_crlf() {
        let (header, body) = split_header("---\n---\nbody");
        assert_eq!(header, Some(""));
        assert_eq!(body, "body");

        let (header, body) = split_header("---\r\ntitle: Win\r\n---\r\nbody");
        assert_eq!(FrontMatter::parse(header.unwrap()).title.as_deref(), Some("Win"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_unterminated_header_is_body() {
        let src = "---\ntitle: Foo\nno closing line";
        assert_eq!(split_header(src), (None, src));
    }

    #[test]
    fn test_parse_fields() {
        let fm = FrontMatter::parse("title: Foo\ndescription: \"Bar: baz\"\ntech: [\"X\",\"Y\"]\nauthor: me\n");
        assert_eq!(fm.title.as_deref(), Some("Foo"));
        assert_eq!(fm.description.as_deref(), Some("Bar: baz"));
        assert_eq!(fm.tech.as_deref(), Some("[\"X\",\"Y\"]"));
    }

    #[test]
    fn test_parse_tags() {
        assert_eq!(parse_tags(r#"["X", "Y"]"#).unwrap(), vec!["X", "Y"]);
        assert_eq!(parse_tags("[]").unwrap(), Vec::<String>::new());
        assert!(matches!(
            parse_tags("[X, Y"),
            Err(ContentError::MalformedTags { .. })
        ));
        assert!(parse_tags("['single']").is_err());
    }
}
