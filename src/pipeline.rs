// src/pipeline.rs
use std::path::PathBuf;

use crate::config::PipelineConfig;
use crate::extractors::{walk_folder, Category, SnippetCollector, WalkReport};
use crate::render::{render_all, RenderReport, Renderer};
use crate::storage::StorageManager;
use crate::utils::AppError;

/// Outcome of one extract run.
#[derive(Debug)]
pub struct ExtractionSummary {
    pub walk: WalkReport,
    pub written: Vec<PathBuf>,
    /// Snippet count per category, in `Category::ALL` order.
    pub counts: [(Category, usize); 3],
}

/// Walks `config.input_root`, collects snippets and writes the three JSON lists.
pub fn run_extraction(config: &PipelineConfig) -> Result<ExtractionSummary, AppError> {
    config.validate()?;

    let mut collector = SnippetCollector::new();
    let walk = walk_folder(&config.input_root, &config.extension, &mut collector)?;

    let storage = StorageManager::new(&config.output_root)?;
    let written = storage.save_all(&collector)?;

    let counts = Category::ALL.map(|category| (category, collector.len(category)));
    tracing::info!(
        "Extraction completed: {} of {} matching files read; {} formulas, {} tables, {} figures",
        walk.files_extracted,
        walk.files_matched,
        counts[0].1,
        counts[1].1,
        counts[2].1
    );

    Ok(ExtractionSummary { walk, written, counts })
}

/// Renders the JSON lists under `config.output_root` into `config.render_root`.
pub async fn run_rendering<R: Renderer>(config: &PipelineConfig, renderer: &R) -> Result<RenderReport, AppError> {
    let storage = StorageManager::open(&config.output_root);
    render_all(renderer, &storage, &config.render_root).await
}

/// Work directory for backend intermediates inside the render root.
pub fn build_dir(config: &PipelineConfig) -> PathBuf {
    config.render_root.join(".build")
}
