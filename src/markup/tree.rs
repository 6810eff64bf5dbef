//! Document trees on both sides of markdown-to-HTML conversion

use serde::{Deserialize, Serialize};

use super::meta::CodeMeta;

/// A fenced code block in the source tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    pub lang: Option<String>,
    /// Everything after the language on the fence line
    pub meta: Option<String>,
    pub value: String,
    /// Filled in by the source-tree pass
    #[serde(default, skip_serializing_if = "CodeMeta::is_empty")]
    pub annotations: CodeMeta,
}

impl CodeBlock {
    pub fn new(lang: Option<&str>, meta: Option<&str>, value: &str) -> Self {
        Self {
            lang: lang.map(str::to_string),
            meta: meta.map(str::to_string),
            value: value.to_string(),
            annotations: CodeMeta::default(),
        }
    }
}

/// Markdown-side tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceNode {
    Root { children: Vec<SourceNode> },
    Heading { depth: u8, children: Vec<SourceNode> },
    Paragraph { children: Vec<SourceNode> },
    Blockquote { children: Vec<SourceNode> },
    Code(CodeBlock),
    Text { value: String },
}

impl SourceNode {
    pub fn text(value: &str) -> Self {
        SourceNode::Text {
            value: value.to_string(),
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<SourceNode>> {
        match self {
            SourceNode::Root { children }
            | SourceNode::Heading { children, .. }
            | SourceNode::Paragraph { children }
            | SourceNode::Blockquote { children } => Some(children),
            SourceNode::Code(_) | SourceNode::Text { .. } => None,
        }
    }

    /// Depth-first visit of every code block
    pub fn visit_code_mut(&mut self, f: &mut impl FnMut(&mut CodeBlock)) {
        if let SourceNode::Code(block) = self {
            f(block);
        } else if let Some(children) = self.children_mut() {
            for child in children {
                child.visit_code_mut(f);
            }
        }
    }
}

/// HTML-side element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_names: Vec<String>,
    /// Code block metadata, meaningful on `pre` and `code`
    #[serde(default, skip_serializing_if = "CodeMeta::is_empty")]
    pub code_meta: CodeMeta,
    #[serde(default)]
    pub children: Vec<OutputNode>,
}

impl Element {
    pub fn new(tag: &str, children: Vec<OutputNode>) -> Self {
        Self {
            tag: tag.to_string(),
            children,
            ..Default::default()
        }
    }

    /// First child element with the given tag
    pub fn child_element(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find_map(|child| match child {
            OutputNode::Element(el) if el.tag == tag => Some(el),
            _ => None,
        })
    }
}

/// HTML-side tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputNode {
    Root { children: Vec<OutputNode> },
    Element(Element),
    Text { value: String },
}

impl OutputNode {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            OutputNode::Element(el) => Some(el),
            _ => None,
        }
    }

    pub fn children(&self) -> &[OutputNode] {
        match self {
            OutputNode::Root { children } => children,
            OutputNode::Element(el) => &el.children,
            OutputNode::Text { .. } => &[],
        }
    }

    pub fn children_mut(&mut self) -> Option<&mut Vec<OutputNode>> {
        match self {
            OutputNode::Root { children } => Some(children),
            OutputNode::Element(el) => Some(&mut el.children),
            OutputNode::Text { .. } => None,
        }
    }

    /// Depth-first search for the first element with `tag`
    pub fn find_element(&self, tag: &str) -> Option<&Element> {
        if let OutputNode::Element(el) = self {
            if el.tag == tag {
                return Some(el);
            }
        }
        self.children().iter().find_map(|child| child.find_element(tag))
    }
}
