//! Two-pass code block metadata transform
//!
//! 1. [`annotate_code_meta`] runs on the source tree and parses each code
//!    block's meta string into a [`CodeMeta`].
//! 2. [`hoist_code_meta`] runs on the output tree and copies that metadata
//!    from each `code` element onto its wrapping `pre`, where styling reads it.
//!
//! [`lower`] stands in for the markdown-to-HTML step between them.

use super::meta::CodeMeta;
use super::tree::{CodeBlock, Element, OutputNode, SourceNode};

/// Source-tree pass. Returns the number of blocks that got metadata.
pub fn annotate_code_meta(root: &mut SourceNode) -> usize {
    let mut annotated = 0;
    root.visit_code_mut(&mut |block: &mut CodeBlock| {
        block.annotations = block.meta.as_deref().map(CodeMeta::parse).unwrap_or_default();
        if !block.annotations.is_empty() {
            annotated += 1;
        }
    });
    annotated
}

/// Convert the source tree into an output tree. Code blocks become
/// `pre > code` with the block's annotations on the `code` element.
pub fn lower(node: &SourceNode) -> OutputNode {
    let lower_all = |children: &[SourceNode]| children.iter().map(lower).collect::<Vec<_>>();
    match node {
        SourceNode::Root { children } => OutputNode::Root {
            children: lower_all(children),
        },
        SourceNode::Heading { depth, children } => {
            let tag = format!("h{}", (*depth).clamp(1, 6));
            OutputNode::Element(Element::new(&tag, lower_all(children)))
        }
        SourceNode::Paragraph { children } => OutputNode::Element(Element::new("p", lower_all(children))),
        SourceNode::Blockquote { children } => {
            OutputNode::Element(Element::new("blockquote", lower_all(children)))
        }
        SourceNode::Code(block) => {
            let mut code = Element::new(
                "code",
                vec![OutputNode::Text {
                    value: block.value.clone(),
                }],
            );
            if let Some(lang) = &block.lang {
                code.class_names.push(format!("language-{lang}"));
            }
            code.code_meta = block.annotations.clone();
            OutputNode::Element(Element::new("pre", vec![OutputNode::Element(code)]))
        }
        SourceNode::Text { value } => OutputNode::Text { value: value.clone() },
    }
}

/// Output-tree pass. Returns the number of `pre` elements that received metadata.
pub fn hoist_code_meta(node: &mut OutputNode) -> usize {
    let mut hoisted = 0;
    if let OutputNode::Element(el) = node {
        if el.tag == "pre" {
            if let Some(meta) = el.child_element("code").map(|code| code.code_meta.clone()) {
                if !meta.is_empty() {
                    el.code_meta.merge_from(&meta);
                    hoisted += 1;
                }
            }
        }
    }
    if let Some(children) = node.children_mut() {
        for child in children {
            hoisted += hoist_code_meta(child);
        }
    }
    hoisted
}

/// Run both passes around [`lower`]
pub fn transform(mut source: SourceNode) -> OutputNode {
    let annotated = annotate_code_meta(&mut source);
    let mut output = lower(&source);
    let hoisted = hoist_code_meta(&mut output);
    log::debug!("Code meta: {} annotated, {} hoisted", annotated, hoisted);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(children: Vec<SourceNode>) -> SourceNode {
        SourceNode::Root { children }
    }

    fn code(meta: Option<&str>) -> SourceNode {
        SourceNode::Code(CodeBlock::new(Some("ts"), meta, "const a = 1;"))
    }

    #[test]
    fn test_meta_reaches_wrapper() {
        let out = transform(doc(vec![code(Some(r#"{1,3-5} fileName="a.ts""#))]));
        let pre = out.find_element("pre").expect("pre element");
        assert_eq!(pre.code_meta.file_name.as_deref(), Some("a.ts"));
        assert_eq!(
            pre.code_meta.highlight_lines.as_ref().map(|h| h.to_string()).as_deref(),
            Some("1,3-5")
        );
    }

    #[test]
    fn test_no_meta_attaches_nothing() {
        let out = transform(doc(vec![code(None)]));
        let pre = out.find_element("pre").expect("pre element");
        assert!(pre.code_meta.is_empty());
        assert!(pre.child_element("code").unwrap().code_meta.is_empty());
    }

    #[test]
    fn test_nested_blocks_are_visited() {
        let mut source = doc(vec![
            SourceNode::Blockquote {
                children: vec![code(Some("{2}")), SourceNode::text("quote")],
            },
            SourceNode::Paragraph {
                children: vec![SourceNode::text("hi")],
            },
            code(Some("fileName=b.rs")),
            code(Some("showLineNumbers")),
        ]);
        assert_eq!(annotate_code_meta(&mut source), 2);

        let mut out = lower(&source);
        assert_eq!(hoist_code_meta(&mut out), 2);
    }

    #[test]
    fn test_lower_shapes_code_block() {
        let out = lower(&code(None));
        let pre = out.as_element().unwrap();
        assert_eq!(pre.tag, "pre");
        let code = pre.child_element("code").unwrap();
        assert_eq!(code.class_names, vec!["language-ts"]);
        assert_eq!(
            code.children,
            vec![OutputNode::Text {
                value: "const a = 1;".into()
            }]
        );
    }

    #[test]
    fn test_hoist_ignores_pre_without_code() {
        let mut out = OutputNode::Element(Element::new(
            "pre",
            vec![OutputNode::Text {
                value: "raw".into(),
            }],
        ));
        assert_eq!(hoist_code_meta(&mut out), 0);
    }
}
