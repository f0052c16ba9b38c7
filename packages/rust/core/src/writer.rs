//! Artifact writer.
//!
//! Every generated file goes through [`write_artifact`]: write to a temporary
//! sibling, then rename over the target, so readers never see a partial file.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use mdindex_shared::{MdIndexError, Result};

/// Metadata for a written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactMeta {
    pub path: PathBuf,
    /// Hex SHA-256 of the content.
    pub sha256: String,
    pub size_bytes: usize,
}

/// Write `content` to `path` atomically, creating parent directories.
#[instrument(skip(content), fields(path = %path.display(), size = content.len()))]
pub fn write_artifact(path: &Path, content: &str) -> Result<ArtifactMeta> {
    let file_name = path
        .file_name()
        .ok_or_else(|| MdIndexError::config(format!("invalid output path: {}", path.display())))?
        .to_string_lossy();

    let parent = path.parent().filter(|p| !p.as_os_str().is_empty());
    if let Some(parent) = parent {
        std::fs::create_dir_all(parent).map_err(|e| MdIndexError::io(parent, e))?;
    }

    let temp_name = format!(".{file_name}.tmp");
    let temp = match parent {
        Some(parent) => parent.join(temp_name),
        None => PathBuf::from(temp_name),
    };

    // Write to temp file first
    std::fs::write(&temp, content).map_err(|e| MdIndexError::io(&temp, e))?;

    // Atomic rename
    if let Err(e) = std::fs::rename(&temp, path) {
        let _ = std::fs::remove_file(&temp);
        return Err(MdIndexError::io(path, e));
    }

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(%sha256, "wrote artifact");

    Ok(ArtifactMeta {
        path: path.to_path_buf(),
        sha256,
        size_bytes: content.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("mdindex-writer-test-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_file_and_reports_digest() {
        let tmp = temp_dir();
        let target = tmp.join("out/index.yaml");

        let meta = write_artifact(&target, "a.md: {}\n").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "a.md: {}\n");
        assert_eq!(meta.size_bytes, 9);
        assert_eq!(meta.sha256.len(), 64);
        assert_eq!(meta.path, target);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn identical_content_identical_digest() {
        let tmp = temp_dir();
        let a = write_artifact(&tmp.join("a.md"), "same").unwrap();
        let b = write_artifact(&tmp.join("b.md"), "same").unwrap();
        assert_eq!(a.sha256, b.sha256);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn overwrites_and_leaves_no_temp_files() {
        let tmp = temp_dir();
        let target = tmp.join("Makefile.docs");
        write_artifact(&target, "old").unwrap();
        write_artifact(&target, "new").unwrap();

        assert_eq!(std::fs::read_to_string(&target).unwrap(), "new");
        for entry in std::fs::read_dir(&tmp).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.starts_with('.'), "temp file left behind: {name}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let tmp = temp_dir();
        // A non-empty directory cannot be replaced by a file.
        let target = tmp.join("out.md");
        std::fs::create_dir_all(target.join("inner")).unwrap();

        let err = write_artifact(&target, "content").unwrap_err();
        assert!(matches!(err, MdIndexError::Io { .. }));
        assert!(!tmp.join(".out.md.tmp").exists());
        assert!(target.is_dir());

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
