// src/render/mod.rs
pub mod latex;

use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::category::Category;
use crate::storage::StorageManager;
use crate::utils::error::RenderError;
use crate::utils::AppError;

pub use latex::LatexRenderer;

/// Canvas settings for one rendered snippet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderOptions {
    /// Maximum line width of the typeset snippet, in inches.
    pub width_in: f32,
    pub dpi: u32,
}

impl RenderOptions {
    /// Tables and figures get a wider canvas than formulas.
    pub fn for_category(category: Category) -> Self {
        match category {
            Category::Formula => Self { width_in: 10.0, dpi: 300 },
            Category::Table | Category::Figure => Self { width_in: 12.0, dpi: 300 },
        }
    }
}

/// A backend that typesets one snippet into a PNG at `output_path`.
#[allow(async_fn_in_trait)]
pub trait Renderer {
    async fn render(&self, snippet: &str, options: &RenderOptions, output_path: &Path) -> Result<(), RenderError>;
}

#[derive(Debug, Default)]
pub struct RenderReport {
    pub rendered: Vec<PathBuf>,
    /// (category, 1-based index, reason)
    pub failed: Vec<(Category, usize, String)>,
    /// Categories whose JSON file was missing.
    pub skipped_categories: Vec<Category>,
}

/// Renders every snippet of every category found in `storage` into
/// `<render_root>/<category>/<category>_<i>.png`.
///
/// A missing category file skips that category and a failing snippet skips
/// that snippet; anything else (unwritable render root, malformed JSON) is
/// returned as an error.
pub async fn render_all<R: Renderer>(
    renderer: &R,
    storage: &StorageManager,
    render_root: &Path,
) -> Result<RenderReport, AppError> {
    fs::create_dir_all(render_root)?;
    let mut report = RenderReport::default();

    for category in Category::ALL {
        let snippets = match storage.load_category(category)? {
            Some(snippets) => snippets,
            None => {
                tracing::warn!(
                    "File {} not found. Skipping {}.",
                    storage.category_path(category).display(),
                    category
                );
                report.skipped_categories.push(category);
                continue;
            }
        };

        let category_dir = render_root.join(category.name());
        fs::create_dir_all(&category_dir)?;
        let options = RenderOptions::for_category(category);

        for (idx, snippet) in snippets.iter().enumerate() {
            let index = idx + 1;
            let output_path = category_dir.join(category.image_file_name(index));
            match renderer.render(snippet, &options, &output_path).await {
                Ok(()) => {
                    tracing::info!("Rendered {} {}: {}", category, index, output_path.display());
                    report.rendered.push(output_path);
                }
                Err(e) => {
                    tracing::error!("Failed to render {} {}: {}", category, index, e);
                    report.failed.push((category, index, e.to_string()));
                }
            }
        }
    }

    tracing::info!(
        "Rendering completed: {} rendered, {} failed, {} categories skipped",
        report.rendered.len(),
        report.failed.len(),
        report.skipped_categories.len()
    );
    Ok(report)
}
