//! HTML serialization of the output tree
//!
//! Code metadata is emitted as `data-file-name` / `data-highlight-lines`
//! attributes so stylesheets and client scripts can read it.

use std::fmt::Write;

use super::tree::{Element, OutputNode};

pub fn render_html(node: &OutputNode) -> String {
    let mut out = String::new();
    write_node(&mut out, node);
    out
}

fn write_node(out: &mut String, node: &OutputNode) {
    match node {
        OutputNode::Root { children } => {
            for child in children {
                write_node(out, child);
            }
        }
        OutputNode::Element(el) => write_element(out, el),
        OutputNode::Text { value } => escape_into(out, value),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(&el.tag);
    if !el.class_names.is_empty() {
        out.push_str(" class=\"");
        escape_into(out, &el.class_names.join(" "));
        out.push('"');
    }
    if let Some(name) = &el.code_meta.file_name {
        out.push_str(" data-file-name=\"");
        escape_into(out, name);
        out.push('"');
    }
    if let Some(lines) = &el.code_meta.highlight_lines {
        let _ = write!(out, " data-highlight-lines=\"{lines}\"");
    }
    out.push('>');
    for child in &el.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{}>", el.tag);
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::transform::transform;
    use crate::markup::tree::{CodeBlock, SourceNode};

    #[test]
    fn test_render_code_block_with_meta() {
        let source = SourceNode::Root {
            children: vec![SourceNode::Code(CodeBlock::new(
                Some("rust"),
                Some(r#"{1,3-5} fileName="a<b>.rs""#),
                "if a < b {}",
            ))],
        };
        let html = render_html(&transform(source));
        assert!(html.starts_with(
            r#"<pre data-file-name="a&lt;b&gt;.rs" data-highlight-lines="1,3-5"><code class="language-rust""#
        ));
        assert!(html.contains("if a &lt; b {}"));
        assert!(html.ends_with("</code></pre>"));
    }

    #[test]
    fn test_render_plain_paragraph() {
        let source = SourceNode::Paragraph {
            children: vec![SourceNode::text("Tom & \"Jerry\"")],
        };
        assert_eq!(
            render_html(&transform(source)),
            "<p>Tom &amp; &quot;Jerry&quot;</p>"
        );
    }
}
