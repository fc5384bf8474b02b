//! File helpers: reading documents, resolving inputs and atomic writes

use crate::core::config::SourceFormat;
use crate::core::Document;
use crate::error::{DocPathError, Result};
use log::{debug, warn};
use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use walkdir::WalkDir;

/// Whether the extension names a JSON or YAML document
pub fn is_document(path: &Path) -> bool {
    SourceFormat::from_path(path).is_some()
}

/// Read a file and parse it in the format its extension names
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    let format =
        SourceFormat::from_path(path).ok_or_else(|| DocPathError::unsupported_format(path))?;
    if !path.is_file() {
        return Err(DocPathError::file_not_found(path));
    }

    let text = fs::read_to_string(path)?;
    debug!("read {} ({} bytes, {})", path.display(), text.len(), format);
    Document::parse(&text, format)
}

/// Expand files and directories into a list of document files
///
/// Only `.json`, `.yaml` and `.yml` files are kept; other files named
/// explicitly are skipped with a warning. Directories are walked recursively
/// in file name order. Paths that appear more than once are listed once.
pub fn resolve_files<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            if !is_document(path) {
                warn!("skipping {}: not a JSON or YAML file", path.display());
            } else if seen.insert(path.to_path_buf()) {
                files.push(path.to_path_buf());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).sort_by_file_name() {
                let entry = entry.map_err(std::io::Error::from)?;
                if entry.file_type().is_file()
                    && is_document(entry.path())
                    && seen.insert(entry.path().to_path_buf())
                {
                    files.push(entry.into_path());
                }
            }
        } else {
            return Err(DocPathError::file_not_found(path));
        }
    }

    debug!("resolved {} document file(s)", files.len());
    Ok(files)
}

/// Write `content` to a temporary file next to `path`, then move it into place
pub fn write_atomic<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    let path = path.as_ref();
    let parent_dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp_file = NamedTempFile::new_in(parent_dir)?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;

    temp_file.persist(path).map_err(|e| DocPathError::Persist {
        path: path.to_path_buf(),
        reason: e.error.to_string(),
    })?;

    debug!("wrote {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_document_by_extension() {
        let dir = TempDir::new().unwrap();
        let json = dir.path().join("a.json");
        let yaml = dir.path().join("b.yml");
        fs::write(&json, r#"{"k": 1}"#).unwrap();
        fs::write(&yaml, "k: two\n").unwrap();

        let doc = read_document(&json).unwrap();
        assert_eq!(doc.source_format(), SourceFormat::Json);
        assert_eq!(doc.get_integer_by_path("k"), (1, "int"));

        let doc = read_document(&yaml).unwrap();
        assert_eq!(doc.source_format(), SourceFormat::Yaml);
        assert_eq!(doc.get_string_by_path("k"), ("two", "string"));
    }

    #[test]
    fn test_read_document_errors() {
        let dir = TempDir::new().unwrap();
        let toml = dir.path().join("c.toml");
        fs::write(&toml, "k = 1\n").unwrap();

        assert!(matches!(
            read_document(&toml),
            Err(DocPathError::UnsupportedFormat { .. })
        ));
        assert!(matches!(
            read_document(dir.path().join("missing.json")),
            Err(DocPathError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_files_walks_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(dir.path().join("b.yaml"), "").unwrap();
        fs::write(dir.path().join("a.json"), "{}").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();
        fs::write(nested.join("c.yml"), "").unwrap();

        let files = resolve_files(&[dir.path()]).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.json"),
                PathBuf::from("b.yaml"),
                PathBuf::from("nested").join("c.yml"),
            ]
        );
    }

    #[test]
    fn test_resolve_files_keeps_explicit_documents_once() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("data.yaml");
        let notes = dir.path().join("notes.txt");
        fs::write(&file, "").unwrap();
        fs::write(&notes, "").unwrap();

        let files = resolve_files(&[file.clone(), notes, file.clone()]).unwrap();
        assert_eq!(files, vec![file]);

        assert!(matches!(
            resolve_files(&[dir.path().join("nope")]),
            Err(DocPathError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_write_atomic_replaces_content() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out.yaml");
        fs::write(&target, "old").unwrap();

        write_atomic(&target, "---\nk: v\n").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "---\nk: v\n");
    }
}
