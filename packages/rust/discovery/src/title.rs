//! Title resolution for documents and directories.
//!
//! A document's title is its first heading line; a directory's chapter title
//! comes from its overview document, or is derived from its name. Resolution
//! is best-effort: read and decode failures fall back silently.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use mdindex_shared::{ChapterTitles, DocumentRef, ROOT_DIR, ScanOptions};

/// Resolve the display title of the document at `path`.
///
/// Returns the first line starting with `#`, with every leading `#` and the
/// surrounding whitespace removed. Falls back to the file stem when there is
/// no heading or the file cannot be read.
pub fn resolve_title(path: &Path) -> String {
    heading_title(path).unwrap_or_else(|| file_stem(path))
}

/// Resolve the chapter title of `dir`, a `/`-separated path relative to `root`.
///
/// Uses the heading of the directory's overview document when present;
/// otherwise the configured root title for the root itself, or the relative
/// directory path with its first ASCII letter capitalized (`api/v2` → `Api/v2`).
pub fn resolve_chapter_title(root: &Path, dir: &str, opts: &ScanOptions) -> String {
    let is_root = dir.is_empty() || dir == ROOT_DIR;
    let dir_path = if is_root { root.to_path_buf() } else { root.join(dir) };

    let overview = dir_path.join(&opts.overview_file);
    if overview.is_file() {
        if let Some(title) = heading_title(&overview) {
            return title;
        }
    }

    if is_root {
        return opts.root_title.clone();
    }

    capitalize_first(dir)
}

/// Chapter titles for every directory that directly holds one of `documents`.
pub fn chapter_titles(root: &Path, documents: &[DocumentRef], opts: &ScanOptions) -> ChapterTitles {
    let mut titles = ChapterTitles::new();
    for doc in documents {
        if !titles.contains_key(&doc.parent_dir) {
            let title = resolve_chapter_title(root, &doc.parent_dir, opts);
            titles.insert(doc.parent_dir.clone(), title);
        }
    }
    titles
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// First heading line of the file, if it can be read up to that point.
fn heading_title(path: &Path) -> Option<String> {
    static HEADING_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^#+(.*)$").expect("valid regex"));

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "cannot open document for title");
            return None;
        }
    };

    for line in BufReader::new(file).lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "cannot decode document for title");
                return None;
            }
        };

        if let Some(caps) = HEADING_RE.captures(line.trim()) {
            return Some(caps[1].trim().to_string());
        }
    }

    None
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Upper-case the first character when it is ASCII; anything else is kept.
fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii() => format!("{}{}", c.to_ascii_uppercase(), chars.as_str()),
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("mdindex-title-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn title_from_first_heading() {
        let tmp = temp_dir();
        let path = tmp.join("foo.md");
        std::fs::write(&path, "intro text\n\n#   Foo Bar  \n## Second\n").unwrap();

        assert_eq!(resolve_title(&path), "Foo Bar");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn title_strips_every_marker() {
        let tmp = temp_dir();
        let path = tmp.join("deep.md");
        std::fs::write(&path, "   ### Deep Title\n").unwrap();

        assert_eq!(resolve_title(&path), "Deep Title");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn title_falls_back_to_stem() {
        let tmp = temp_dir();
        let path = tmp.join("getting-started.md");
        std::fs::write(&path, "No heading here.\nStill none.\n").unwrap();

        assert_eq!(resolve_title(&path), "getting-started");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn title_of_unreadable_file_is_stem() {
        let tmp = temp_dir();
        assert_eq!(resolve_title(&tmp.join("ghost.md")), "ghost");

        let invalid = tmp.join("binary.md");
        std::fs::write(&invalid, [0xff, 0xfe, b'\n', b'#', b' ', b'X']).unwrap();
        assert_eq!(resolve_title(&invalid), "binary");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn chapter_title_from_overview() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("guides")).unwrap();
        std::fs::write(tmp.join("guides/README.md"), "# User Guides\n").unwrap();

        let title = resolve_chapter_title(&tmp, "guides", &ScanOptions::default());
        assert_eq!(title, "User Guides");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn chapter_title_capitalizes_directory_name() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("guides")).unwrap();

        let opts = ScanOptions::default();
        assert_eq!(resolve_chapter_title(&tmp, "guides", &opts), "Guides");
        assert_eq!(resolve_chapter_title(&tmp, "api/v2", &opts), "Api/v2");
        assert_eq!(resolve_chapter_title(&tmp, "web/v2", &opts), "Web/v2");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn chapter_title_overview_without_heading_uses_name() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("misc")).unwrap();
        std::fs::write(tmp.join("misc/README.md"), "plain text only\n").unwrap();

        let title = resolve_chapter_title(&tmp, "misc", &ScanOptions::default());
        assert_eq!(title, "Misc");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn chapter_title_of_root() {
        let tmp = temp_dir();
        let opts = ScanOptions::default();
        assert_eq!(resolve_chapter_title(&tmp, ROOT_DIR, &opts), "Main Documentation");

        std::fs::write(tmp.join("README.md"), "# Handbook\n").unwrap();
        assert_eq!(resolve_chapter_title(&tmp, ROOT_DIR, &opts), "Handbook");

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn capitalize_leaves_non_ascii_alone() {
        assert_eq!(capitalize_first("éclair"), "éclair");
        assert_eq!(capitalize_first("2024-notes"), "2024-notes");
        assert_eq!(capitalize_first("api"), "Api");
        assert_eq!(capitalize_first(""), "");
    }

    #[test]
    fn chapter_titles_per_parent_dir() {
        let tmp = temp_dir();
        std::fs::create_dir_all(tmp.join("sub")).unwrap();
        std::fs::write(tmp.join("sub/README.md"), "# Sub Chapter\n").unwrap();

        let docs = vec![
            DocumentRef {
                path: "a.md".into(),
                title: "Alpha".into(),
                parent_dir: ROOT_DIR.into(),
            },
            DocumentRef {
                path: "sub/b.md".into(),
                title: "Beta".into(),
                parent_dir: "sub".into(),
            },
        ];

        let titles = chapter_titles(&tmp, &docs, &ScanOptions::default());
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[ROOT_DIR], "Main Documentation");
        assert_eq!(titles["sub"], "Sub Chapter");

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
