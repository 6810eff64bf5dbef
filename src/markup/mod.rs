//! Code block metadata for rendered posts
//!
//! Fence meta strings (`{1,3-5} fileName="a.ts"`) become a typed
//! [`CodeMeta`] on the source tree, then move to the `pre` wrapper in the
//! output tree.

pub mod html;
pub mod meta;
pub mod transform;
pub mod tree;

pub use html::render_html;
pub use meta::{CodeMeta, HighlightLines};
pub use transform::{annotate_code_meta, hoist_code_meta, lower, transform};
pub use tree::{CodeBlock, Element, OutputNode, SourceNode};
