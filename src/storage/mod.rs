// src/storage/mod.rs
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::extractors::category::Category;
use crate::extractors::collector::SnippetCollector;
use crate::utils::error::StorageError;

/// Indent used for every persisted snippet list.
const JSON_INDENT: &[u8] = b"    ";

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Opens the output directory without touching the filesystem.
    /// Used by the render stage, which only reads.
    pub fn open<P: AsRef<Path>>(base_dir: P) -> Self {
        Self { base_dir: base_dir.as_ref().to_path_buf() }
    }

    /// Creates a new StorageManager, creating the base directory (and parents) if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn category_path(&self, category: Category) -> PathBuf {
        self.base_dir.join(category.json_file_name())
    }

    /// Writes one category's snippets as a pretty-printed JSON array,
    /// overwriting any previous file.
    pub fn save_category(&self, category: Category, snippets: &[String]) -> Result<PathBuf, StorageError> {
        let file_path = self.category_path(category);

        let mut writer = BufWriter::new(fs::File::create(&file_path)?);
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(JSON_INDENT));
        snippets.serialize(&mut serializer)?;
        writer.flush()?;

        tracing::info!("Saved {} {} snippets to {}", snippets.len(), category, file_path.display());

        Ok(file_path)
    }

    /// Flushes all three categories of `collector`, in `Category::ALL` order.
    pub fn save_all(&self, collector: &SnippetCollector) -> Result<Vec<PathBuf>, StorageError> {
        Category::ALL
            .iter()
            .map(|&category| self.save_category(category, &collector.snapshot(category)))
            .collect()
    }

    /// Reads a category file back. `Ok(None)` when the file does not exist.
    pub fn load_category(&self, category: Category) -> Result<Option<Vec<String>>, StorageError> {
        let file_path = self.category_path(category);
        let raw = match fs::read_to_string(&file_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snippets: Vec<String> = serde_json::from_str(&raw)?;
        tracing::debug!("Loaded {} {} snippets from {}", snippets.len(), category, file_path.display());
        Ok(Some(snippets))
    }
}
