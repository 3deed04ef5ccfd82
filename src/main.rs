// src/main.rs
mod arxiv;
mod config;
mod extractors;
mod pipeline;
mod render;
mod storage;
mod utils;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use config::PipelineConfig;
use render::LatexRenderer;
use utils::AppError;

/// Pull formulas, tables and figures out of arXiv LaTeX sources and render them
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Download the source archive of an arXiv paper
    Download {
        /// arXiv identifier, e.g. 2010.11645
        #[arg(short, long)]
        id: String,

        /// Directory the archive is saved to
        #[arg(short, long, default_value = ".")]
        dest: PathBuf,
    },
    /// Extract snippets from an unpacked source folder into JSON lists
    Extract {
        #[command(flatten)]
        extract: ExtractArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Render previously extracted JSON lists to PNG images
    Render {
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Extract, then render
    Pipeline {
        #[command(flatten)]
        extract: ExtractArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
}

#[derive(Args, Debug)]
struct ExtractArgs {
    /// Folder containing the unpacked paper sources
    #[arg(short, long)]
    input: PathBuf,

    /// Only files whose name ends with this suffix are scanned
    #[arg(long, default_value = config::DEFAULT_EXTENSION)]
    extension: String,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Directory holding formulas.json, tables.json and figures.json
    #[arg(short, long, default_value = config::DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Directory rendered images are written to
    #[arg(short, long, default_value = config::DEFAULT_RENDER_DIR)]
    render_dir: PathBuf,

    /// File with LaTeX preamble lines replacing the built-in macros
    #[arg(long)]
    preamble: Option<PathBuf>,

    /// LaTeX executable producing DVI output
    #[arg(long, default_value = "latex")]
    latex: String,

    /// DVI to PNG converter
    #[arg(long, default_value = "dvipng")]
    dvipng: String,
}

fn build_config(
    extract: Option<&ExtractArgs>,
    output: &OutputArgs,
    render: Option<&RenderArgs>,
) -> Result<PipelineConfig, AppError> {
    let mut config = PipelineConfig {
        output_root: output.output_dir.clone(),
        ..Default::default()
    };
    if let Some(extract) = extract {
        config.input_root = extract.input.clone();
        config.extension = extract.extension.clone();
    }
    if let Some(render) = render {
        config.render_root = render.render_dir.clone();
        if let Some(path) = &render.preamble {
            config = config.with_preamble_file(path)?;
        }
    }
    config.validate()?;
    Ok(config)
}

fn extract(config: &PipelineConfig) -> Result<(), AppError> {
    let summary = pipeline::run_extraction(config)?;
    for (path, reason) in &summary.walk.skipped {
        tracing::warn!("Skipped {}: {}", path.display(), reason);
    }
    for path in &summary.written {
        tracing::debug!("Wrote {}", path.display());
    }
    for (category, count) in summary.counts {
        tracing::debug!("{} unique {} snippets", count, category);
    }
    tracing::info!("Extraction completed. Data saved to {}", config.output_root.display());
    Ok(())
}

async fn render(config: &PipelineConfig, args: &RenderArgs) -> Result<(), AppError> {
    let renderer = LatexRenderer::new(config.preamble_macros.clone(), pipeline::build_dir(config))
        .with_programs(args.latex.clone(), args.dvipng.clone());
    let report = pipeline::run_rendering(config, &renderer).await?;
    tracing::info!(
        "Rendering finished. Success: {}, Failures: {}, Skipped categories: {:?}. Check {} for results.",
        report.rendered.len(),
        report.failed.len(),
        report.skipped_categories,
        config.render_root.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let cli = Cli::parse();
    tracing::debug!("Parsed arguments: {:?}", cli);

    // 3. Dispatch
    match &cli.command {
        Command::Download { id, dest } => {
            let info = arxiv::client::download_source(id, dest).await?;
            tracing::info!("Downloaded {} to {}", info.arxiv_id, info.path.display());
        }
        Command::Extract { extract: extract_args, output } => {
            let config = build_config(Some(extract_args), output, None)?;
            extract(&config)?;
        }
        Command::Render { output, render: render_args } => {
            let config = build_config(None, output, Some(render_args))?;
            render(&config, render_args).await?;
        }
        Command::Pipeline { extract: extract_args, output, render: render_args } => {
            let config = build_config(Some(extract_args), output, Some(render_args))?;
            extract(&config)?;
            render(&config, render_args).await?;
        }
    }

    Ok(())
}
