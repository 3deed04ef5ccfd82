// src/extractors/walker.rs
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::extractors::collector::SnippetCollector;
use crate::utils::error::ExtractError;

/// What happened during one folder walk.
#[derive(Debug, Default)]
pub struct WalkReport {
    /// Files whose name matched the extension.
    pub files_matched: usize,
    /// Matched files that were read and fed to the collector.
    pub files_extracted: usize,
    /// Files or directory entries that could not be read, with the reason.
    pub skipped: Vec<(PathBuf, String)>,
}

/// Reads one source file as UTF-8.
pub fn read_document(path: &Path) -> Result<String, ExtractError> {
    let bytes = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| ExtractError::Decode(path.to_path_buf()))
}

/// Recursively walks `root`, feeding every file whose name ends with
/// `extension` into `collector`.
///
/// Unreadable files and directory entries are logged and skipped. A missing
/// root is logged and yields an empty report. Symlinked files are read;
/// symlinked directories are not descended into.
pub fn walk_folder(
    root: &Path,
    extension: &str,
    collector: &mut SnippetCollector,
) -> Result<WalkReport, ExtractError> {
    let mut report = WalkReport::default();

    if !root.is_dir() {
        tracing::warn!("Input folder {} does not exist or is not a directory", root.display());
        return Ok(report);
    }

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.to_path_buf());
                let err = ExtractError::Walk(e);
                tracing::warn!("Skipping {}: {}", path.display(), err);
                report.skipped.push((path, err.to_string()));
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();
        // Dangling links count as files so the failed read is reported.
        let is_file = file_type.is_file() || (file_type.is_symlink() && !path.is_dir());
        if !is_file || !has_extension(entry.file_name(), extension) {
            continue;
        }

        report.files_matched += 1;
        tracing::info!("Processing {}...", path.display());

        match read_document(path) {
            Ok(content) => {
                let added = collector.ingest(&content);
                tracing::debug!("{}: {} new snippets", path.display(), added);
                report.files_extracted += 1;
            }
            Err(e) => {
                tracing::error!("Error processing {}: {}", path.display(), e);
                report.skipped.push((path.to_path_buf(), e.to_string()));
            }
        }
    }

    Ok(report)
}

/// Suffix test on the raw name bytes, so names that are not valid UTF-8 still match.
fn has_extension(file_name: &OsStr, extension: &str) -> bool {
    file_name.as_encoded_bytes().ends_with(extension.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::category::Category;

    #[test]
    fn walks_nested_folders_and_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sections").join("appendix");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("main.tex"), "Intro $a$ and \\begin{tabular}{c}1\\end{tabular}").unwrap();
        fs::write(nested.join("proof.tex"), "Proof: $a$ then \\[b\\]").unwrap();
        fs::write(dir.path().join("notes.txt"), "$ignored$").unwrap();
        fs::write(dir.path().join("refs.bib"), "$also ignored$").unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();

        assert_eq!(report.files_matched, 2);
        assert_eq!(report.files_extracted, 2);
        assert!(report.skipped.is_empty());
        assert_eq!(
            collector.snapshot(Category::Formula),
            vec!["$a$".to_string(), "\\[b\\]".to_string()]
        );
        assert_eq!(collector.len(Category::Table), 1);
    }

    #[test]
    fn invalid_utf8_file_is_skipped_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.tex"), [0xff, 0xfe, b'$', b'x', b'$']).unwrap();
        fs::write(dir.path().join("good.tex"), "$y$").unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();

        assert_eq!(report.files_matched, 2);
        assert_eq!(report.files_extracted, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].0.ends_with("bad.tex"));
        assert_eq!(collector.snapshot(Category::Formula), vec!["$y$".to_string()]);
    }

    #[test]
    fn custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("macros.sty"), "$s$").unwrap();
        fs::write(dir.path().join("main.tex"), "$t$").unwrap();

        let mut collector = SnippetCollector::new();
        walk_folder(dir.path(), ".sty", &mut collector).unwrap();
        assert_eq!(collector.snapshot(Category::Formula), vec!["$s$".to_string()]);
    }

    #[test]
    fn directory_named_like_a_source_is_not_read() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("chapter.tex")).unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();
        assert_eq!(report.files_matched, 0);
    }

    #[test]
    fn missing_root_yields_empty_report() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("2010.11645");
        let mut collector = SnippetCollector::new();
        let report = walk_folder(&missing, ".tex", &mut collector).unwrap();
        assert_eq!(report.files_matched, 0);
        assert!(report.skipped.is_empty());
        assert_eq!(collector.len(Category::Formula), 0);
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_file_name_is_matched() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.tex");
        fs::write(dir.path().join(name), "$z$").unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();
        assert_eq!(report.files_matched, 1);
        assert_eq!(report.files_extracted, 1);
        assert_eq!(collector.snapshot(Category::Formula), vec!["$z$".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn symlinked_file_is_read_but_symlinked_dir_is_not_entered() {
        use std::os::unix::fs::symlink;

        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("ext.tex"), "$ext$").unwrap();
        fs::write(outside.path().join("shared.tex"), "$shared$").unwrap();

        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("main.tex"), "$m$").unwrap();
        symlink(outside.path(), dir.path().join("linked_dir")).unwrap();
        symlink(outside.path().join("shared.tex"), dir.path().join("shared.tex")).unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();
        assert_eq!(report.files_matched, 2);
        assert_eq!(
            collector.snapshot(Category::Formula),
            vec!["$m$".to_string(), "$shared$".to_string()]
        );
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_is_reported_as_skipped() {
        use std::os::unix::fs::symlink;

        let dir = tempfile::tempdir().unwrap();
        symlink(dir.path().join("gone.tex"), dir.path().join("broken.tex")).unwrap();

        let mut collector = SnippetCollector::new();
        let report = walk_folder(dir.path(), ".tex", &mut collector).unwrap();
        assert_eq!(report.files_matched, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].0.ends_with("broken.tex"));
    }
}
