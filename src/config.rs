// src/config.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::AppError;

pub const DEFAULT_EXTENSION: &str = ".tex";
pub const DEFAULT_OUTPUT_DIR: &str = "./output_data";
pub const DEFAULT_RENDER_DIR: &str = "./rendered_tex";

/// Packages and macro definitions available to every rendered snippet.
pub const DEFAULT_PREAMBLE: &str = r"\usepackage{amsmath,amssymb}
\usepackage{array}
\usepackage{graphicx}
\newcommand{\Av}{\mathbf{A}}
\newcommand{\diag}{\operatorname{diag}}
\newcommand{\br}[1]{\left(#1\right)}
\newcommand{\tran}{\mathsf{T}}
\newcommand{\opt}{\operatorname{opt}}
";

/// Everything one extract / render run needs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Directory scanned for sources.
    pub input_root: PathBuf,
    /// Directory the JSON snippet lists are written to and read from.
    pub output_root: PathBuf,
    /// Directory rendered images go to, one subdirectory per category.
    pub render_root: PathBuf,
    /// File-name suffix selecting source files.
    pub extension: String,
    /// LaTeX preamble used only by the renderer.
    pub preamble_macros: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_root: PathBuf::from("."),
            output_root: PathBuf::from(DEFAULT_OUTPUT_DIR),
            render_root: PathBuf::from(DEFAULT_RENDER_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            preamble_macros: DEFAULT_PREAMBLE.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Replaces the preamble with the contents of `path`.
    pub fn with_preamble_file(mut self, path: &Path) -> Result<Self, AppError> {
        self.preamble_macros = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Cannot read preamble file {}: {}", path.display(), e))
        })?;
        Ok(self)
    }

    /// Rejects settings that would silently select nothing.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.extension.trim().is_empty() {
            return Err(AppError::Config("File extension filter must not be empty".to_string()));
        }
        Ok(())
    }
}
