//! Source file discovery by filesystem walking.
//!
//! The scanner only finds files; it reads nothing. [`FsDocs`](crate::FsDocs)
//! turns the returned [`SourceFile`]s into document and category records.

use std::fs;
use std::path::{Path, PathBuf};

use sidenav_docs::DocsError;

use crate::BACKEND;

/// Category metadata file names, in lookup order.
pub(crate) const CATEGORY_FILENAMES: [&str; 3] =
    ["_category_.json", "_category_.yml", "_category_.yaml"];

/// Document file extensions.
const DOC_EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// The role a source file plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SourceKind {
    /// Markdown document.
    Doc,
    /// Per-directory category metadata.
    Category,
}

/// A file discovered during scanning.
#[derive(Debug, Clone)]
pub(crate) struct SourceFile {
    /// Directory relative to the source root, slash-separated ("" for root).
    pub dir: String,
    /// Absolute path to the file.
    pub path: PathBuf,
    /// What kind of source this is.
    pub kind: SourceKind,
}

impl SourceFile {
    /// Classify a file by name.
    ///
    /// Returns `None` for hidden files, `_`-prefixed partials and anything
    /// that is neither a document nor a category file.
    fn classify(path: PathBuf, file_name: &str, dir: &str) -> Option<Self> {
        if CATEGORY_FILENAMES.contains(&file_name) {
            return Some(Self {
                dir: dir.to_owned(),
                path,
                kind: SourceKind::Category,
            });
        }

        if file_name.starts_with(['.', '_']) {
            return None;
        }

        let is_doc = Path::new(file_name)
            .extension()
            .is_some_and(|ext| DOC_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)));

        is_doc.then(|| Self {
            dir: dir.to_owned(),
            path,
            kind: SourceKind::Doc,
        })
    }
}

/// Walks a source directory for documents and category files.
pub(crate) struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    /// Create a new scanner rooted at `source_dir`.
    pub fn new(source_dir: PathBuf) -> Self {
        Self { source_dir }
    }

    /// Scan the source tree.
    ///
    /// Entries are visited in file name order so results are stable across
    /// platforms. Returns an empty list if the source directory doesn't exist.
    pub fn scan(&self) -> Result<Vec<SourceFile>, DocsError> {
        let mut files = Vec::new();
        if self.source_dir.exists() {
            self.scan_directory(&self.source_dir, "", &mut files)?;
        } else {
            tracing::debug!(dir = %self.source_dir.display(), "Source directory does not exist");
        }
        Ok(files)
    }

    fn scan_directory(
        &self,
        dir_path: &Path,
        rel_dir: &str,
        files: &mut Vec<SourceFile>,
    ) -> Result<(), DocsError> {
        let read_error = |e| DocsError::io(e, dir_path).with_backend(BACKEND);

        let mut entries: Vec<_> = fs::read_dir(dir_path)
            .map_err(read_error)?
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                let name = e.file_name().to_string_lossy().into_owned();
                (e.path(), is_dir, name)
            })
            .collect();
        entries.sort_by(|a, b| a.2.cmp(&b.2));

        for (path, is_dir, name) in entries {
            if is_dir {
                // Hidden and underscore directories never hold documents
                if name.starts_with(['.', '_']) {
                    continue;
                }
                let child_dir = if rel_dir.is_empty() {
                    name
                } else {
                    format!("{rel_dir}/{name}")
                };
                self.scan_directory(&path, &child_dir, files)?;
            } else if let Some(file) = SourceFile::classify(path, &name, rel_dir) {
                files.push(file);
            }
        }

        Ok(())
    }
}
