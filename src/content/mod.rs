//! Content metadata pipeline
//!
//! Blog posts and project write-ups are text files with an optional
//! front-matter block:
//!
//! ```text
//! ---
//! title: Foo
//! description: Bar
//! tech: ["Rust", "WebAssembly"]
//! ---
//! Body text...
//! ```
//!
//! Listing never fails because of one bad file: malformed fields degrade to
//! defaults and unreadable files are logged and skipped.

pub mod error;
pub mod frontmatter;
pub mod listing;
pub mod record;

pub use error::ContentError;
pub use frontmatter::{FrontMatter, parse_tags, split_header};
pub use listing::{ContentOptions, list_records, list_records_with, load_entry, load_entry_with, tag_index};
pub use record::{ContentEntry, ContentRecord};
