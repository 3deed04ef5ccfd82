// src/render/latex.rs
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::render::{RenderOptions, Renderer};
use crate::utils::error::RenderError;

/// Number of log lines kept in a backend error.
const LOG_TAIL_LINES: usize = 15;

// Float environments cannot float inside a standalone page; typeset them
// in place and keep `\caption` working.
const FLOAT_SHIM: &str = r"\makeatletter
\renewenvironment{figure}[1][]{\def\@captype{figure}\par\centering}{\par}
\renewenvironment{figure*}[1][]{\def\@captype{figure}\par\centering}{\par}
\renewenvironment{table}[1][]{\def\@captype{table}\par\centering}{\par}
\renewenvironment{table*}[1][]{\def\@captype{table}\par\centering}{\par}
\makeatother
";

/// Typesets snippets with `latex` and rasterizes the DVI with `dvipng`.
#[derive(Debug, Clone)]
pub struct LatexRenderer {
    latex_program: String,
    dvipng_program: String,
    preamble: String,
    work_dir: PathBuf,
}

impl LatexRenderer {
    /// `work_dir` holds the intermediate `.tex`/`.dvi` files; it is created on first use.
    pub fn new(preamble: impl Into<String>, work_dir: impl Into<PathBuf>) -> Self {
        Self {
            latex_program: "latex".to_string(),
            dvipng_program: "dvipng".to_string(),
            preamble: preamble.into(),
            work_dir: work_dir.into(),
        }
    }

    pub fn with_programs(mut self, latex: impl Into<String>, dvipng: impl Into<String>) -> Self {
        self.latex_program = latex.into();
        self.dvipng_program = dvipng.into();
        self
    }

    async fn run(&self, program: &str, args: &[String], log_file: Option<&Path>) -> Result<(), RenderError> {
        tracing::debug!("Running {} {:?}", program, args);
        let output = Command::new(program)
            .args(args)
            .current_dir(&self.work_dir)
            .output()
            .await
            .map_err(|source| RenderError::Spawn { program: program.to_string(), source })?;

        if output.status.success() {
            return Ok(());
        }

        let log = match log_file {
            Some(path) => tokio::fs::read_to_string(path).await.unwrap_or_default(),
            None => String::new(),
        };
        let log = if log.is_empty() {
            format!("{}{}", String::from_utf8_lossy(&output.stdout), String::from_utf8_lossy(&output.stderr))
        } else {
            log
        };

        Err(RenderError::Backend {
            program: program.to_string(),
            status: output.status,
            log_tail: tail_lines(&log, LOG_TAIL_LINES),
        })
    }

    async fn cleanup(&self, job: &str) {
        for ext in ["tex", "dvi", "aux", "log"] {
            let _ = tokio::fs::remove_file(self.work_dir.join(format!("{}.{}", job, ext))).await;
        }
    }
}

impl Renderer for LatexRenderer {
    async fn render(&self, snippet: &str, options: &RenderOptions, output_path: &Path) -> Result<(), RenderError> {
        tokio::fs::create_dir_all(&self.work_dir).await?;
        // Both backends run inside work_dir, so the target must not be relative to the caller.
        let target = if output_path.is_absolute() {
            output_path.to_path_buf()
        } else {
            std::env::current_dir()?.join(output_path)
        };

        let job = output_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("snippet")
            .to_string();
        let tex_file = format!("{}.tex", job);
        tokio::fs::write(
            self.work_dir.join(&tex_file),
            compose_document(&self.preamble, snippet, options),
        )
        .await?;

        let latex_args = vec![
            "-interaction=nonstopmode".to_string(),
            "-halt-on-error".to_string(),
            tex_file,
        ];
        let log_path = self.work_dir.join(format!("{}.log", job));
        let result = match self.run(&self.latex_program, &latex_args, Some(&log_path)).await {
            Ok(()) => {
                let dvipng_args = vec![
                    "-q".to_string(),
                    "-T".to_string(),
                    "tight".to_string(),
                    "-D".to_string(),
                    options.dpi.to_string(),
                    "-o".to_string(),
                    target.to_string_lossy().into_owned(),
                    format!("{}.dvi", job),
                ];
                self.run(&self.dvipng_program, &dvipng_args, None).await
            }
            Err(e) => Err(e),
        };

        self.cleanup(&job).await;
        result
    }
}

/// Wraps a snippet in a standalone document sized by `options`.
pub fn compose_document(preamble: &str, snippet: &str, options: &RenderOptions) -> String {
    let mut doc = format!(
        "\\documentclass[varwidth={}in,border=4pt]{{standalone}}\n",
        options.width_in
    );
    doc.push_str(preamble.trim_end());
    doc.push('\n');
    doc.push_str(FLOAT_SHIM);
    doc.push_str("\\begin{document}\n");
    doc.push_str(snippet);
    doc.push_str("\n\\end{document}\n");
    doc
}

fn tail_lines(text: &str, n: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(n);
    lines[start..].join("\n")
}
