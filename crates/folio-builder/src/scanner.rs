//! Source document discovery.

use std::fs;
use std::path::{Path, PathBuf};

/// Extension of source documents.
const SOURCE_SUFFIX: &str = ".md";

/// A markdown file and the document name derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceDocument {
    /// Path relative to the source directory, `/`-separated, without suffix.
    pub docname: String,
    /// File on disk.
    pub path: PathBuf,
}

/// Find every `*.md` file below `source_dir`, sorted by document name.
///
/// Hidden files and directories are skipped. A missing source directory
/// yields no documents.
pub(crate) fn scan(source_dir: &Path) -> Vec<SourceDocument> {
    let mut docs = Vec::new();
    if source_dir.is_dir() {
        scan_directory(source_dir, "", &mut docs);
    }
    docs.sort_by(|a, b| a.docname.cmp(&b.docname));
    docs
}

fn scan_directory(dir: &Path, prefix: &str, docs: &mut Vec<SourceDocument>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir.display(), error = %e, "Failed to read source directory");
            return;
        }
    };

    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let qualified = if prefix.is_empty() {
            name
        } else {
            format!("{prefix}/{name}")
        };
        let path = entry.path();

        if entry.file_type().is_ok_and(|t| t.is_dir()) {
            scan_directory(&path, &qualified, docs);
        } else if let Some(docname) = qualified.strip_suffix(SOURCE_SUFFIX) {
            docs.push(SourceDocument {
                docname: docname.to_owned(),
                path,
            });
        }
    }
}

/// Resolve a relative markdown link against the document containing it.
///
/// Returns the target document name, or `None` when the link escapes the
/// source root or is not a markdown link.
pub(crate) fn resolve_link(from_docname: &str, href: &str) -> Option<String> {
    let target = href.strip_suffix(SOURCE_SUFFIX)?;
    let mut segments: Vec<&str> = from_docname.split('/').collect();
    segments.pop();

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    (!segments.is_empty()).then(|| segments.join("/"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_scan_derives_docnames() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("guide/deep")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        for file in [
            "index.md",
            "guide/index.md",
            "guide/intro.md",
            "guide/deep/notes.md",
            "guide/image.png",
            ".git/HEAD.md",
            ".draft.md",
        ] {
            fs::write(root.join(file), "# Title\n").unwrap();
        }

        let docnames: Vec<String> = scan(root).into_iter().map(|d| d.docname).collect();

        assert_eq!(
            docnames,
            vec!["guide/deep/notes", "guide/index", "guide/intro", "index"]
        );
    }

    #[test]
    fn test_scan_missing_dir() {
        assert!(scan(Path::new("/nonexistent/folio/docs")).is_empty());
    }

    #[test]
    fn test_resolve_link() {
        assert_eq!(
            resolve_link("guide/intro", "setup.md"),
            Some("guide/setup".to_owned())
        );
        assert_eq!(
            resolve_link("guide/intro", "../index.md"),
            Some("index".to_owned())
        );
        assert_eq!(
            resolve_link("index", "./guide/index.md"),
            Some("guide/index".to_owned())
        );
        assert_eq!(resolve_link("index", "../outside.md"), None);
        assert_eq!(resolve_link("index", "image.png"), None);
    }
}
