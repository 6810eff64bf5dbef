//! Directory listing and single-entry loading

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use super::error::ContentError;
use super::record::{ContentEntry, ContentRecord};

/// Which files count as content
#[derive(Debug, Clone)]
pub struct ContentOptions {
    /// Accepted extensions, without the dot, in lookup priority order
    pub extensions: Vec<String>,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "mdx".to_string()],
        }
    }
}

impl ContentOptions {
    fn accepts(&self, path: &Path) -> bool {
        self.priority(path).is_some()
    }

    /// Position of the path's extension in `extensions`, ignoring case
    fn priority(&self, path: &Path) -> Option<usize> {
        let ext = path.extension()?.to_str()?;
        self.extensions.iter().position(|x| x.eq_ignore_ascii_case(ext))
    }
}

/// Content files in `dir` as `(slug, path)`, in directory listing order
fn content_files(dir: &Path, options: &ContentOptions) -> Result<Vec<(String, PathBuf)>, ContentError> {
    let entries = fs::read_dir(dir).map_err(|source| ContentError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() || !options.accepts(&path) {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        if slug.starts_with('.') {
            continue;
        }
        files.push((slug.to_string(), path));
    }
    Ok(files)
}

/// File contents as text; invalid UTF-8 is replaced rather than rejected
fn read_source(path: &Path) -> Result<String, ContentError> {
    let bytes = fs::read(path).map_err(|source| ContentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    match String::from_utf8(bytes) {
        Ok(text) => Ok(text),
        Err(e) => {
            log::warn!("{} is not valid UTF-8, decoding lossily", path.display());
            Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
        }
    }
}

/// Records for every content file in `dir`, in directory listing order
pub fn list_records(dir: impl AsRef<Path>) -> Result<Vec<ContentRecord>, ContentError> {
    list_records_with(dir, &ContentOptions::default())
}

pub fn list_records_with(
    dir: impl AsRef<Path>,
    options: &ContentOptions,
) -> Result<Vec<ContentRecord>, ContentError> {
    let dir = dir.as_ref();
    let mut seen = HashSet::new();
    let mut records = Vec::new();
    for (slug, path) in content_files(dir, options)? {
        if !seen.insert(slug.clone()) {
            log::warn!("Duplicate slug {:?} in {}", slug, dir.display());
        }
        match read_source(&path) {
            Ok(source) => records.push(ContentRecord::from_source(&slug, &source)),
            Err(err) => log::warn!("Skipping {}: {}", path.display(), err),
        }
    }

    log::debug!("Listed {} entries from {}", records.len(), dir.display());
    Ok(records)
}

/// Load one entry by slug, with its body
pub fn load_entry(dir: impl AsRef<Path>, slug: &str) -> Result<ContentEntry, ContentError> {
    load_entry_with(dir, slug, &ContentOptions::default())
}

/// Resolves `slug` with the same file rules as the listing. When several
/// files share the slug, the earliest extension in `options` wins.
pub fn load_entry_with(
    dir: impl AsRef<Path>,
    slug: &str,
    options: &ContentOptions,
) -> Result<ContentEntry, ContentError> {
    let not_found = || ContentError::NotFound {
        slug: slug.to_string(),
    };
    // Slugs are plain file stems; anything path-like cannot name an entry
    if slug.is_empty() || slug.starts_with('.') || slug.contains(['/', '\\']) {
        return Err(not_found());
    }

    let path = content_files(dir.as_ref(), options)?
        .into_iter()
        .filter(|(stem, _)| stem == slug)
        .min_by_key(|(_, path)| options.priority(path))
        .map(|(_, path)| path)
        .ok_or_else(not_found)?;
    let source = read_source(&path)?;
    Ok(ContentEntry::from_source(slug, &source))
}

/// Slugs grouped by tag, tags sorted, slugs in input order
pub fn tag_index(records: &[ContentRecord]) -> BTreeMap<String, Vec<String>> {
    let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for record in records {
        for tag in &record.tags {
            let slugs = index.entry(tag.clone()).or_default();
            if !slugs.contains(&record.slug) {
                slugs.push(record.slug.clone());
            }
        }
    }
    index
}
