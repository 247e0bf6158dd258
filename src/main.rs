use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use dicegrid::api;
use dicegrid::models::{AppConfig, GridOptions, PageSize, RenderLayout};
use dicegrid::rendering::SvgRenderer;
use dicegrid::server;
use dicegrid::services::{AnalyzerService, DocumentService};
use pip_grid::Grid;

#[derive(Parser)]
#[command(name = "dicegrid")]
#[command(about = "Dicegrid - turns photos into printable dice mosaic plans")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Convert an image to a grid and print it as JSON
    Analyze {
        /// Input image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Grid columns (defaults to --size)
        #[arg(long)]
        width: Option<usize>,

        /// Grid rows (defaults to --size)
        #[arg(long)]
        height: Option<usize>,

        /// Square grid size (defaults to the configured size)
        #[arg(short, long)]
        size: Option<usize>,

        /// Style preset name or id (e.g. "high-contrast" or 3)
        #[arg(short, long)]
        preset: Option<String>,

        /// Bucket policy: "ladder" or "linear"
        #[arg(long)]
        policy: Option<String>,

        /// Resample filter: "area" or "lanczos3"
        #[arg(long)]
        filter: Option<String>,

        /// Write the JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a grid JSON file to a printable PDF
    Render {
        /// Grid JSON: an array of rows, or the output of `analyze`
        #[arg(short, long)]
        grid: PathBuf,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// Title printed on every page
        #[arg(long, default_value = "Dice Grid")]
        project: String,

        /// Split the grid into four overlapping quadrants
        #[arg(long)]
        quadrants: bool,

        /// Use US Letter pages instead of A4
        #[arg(long)]
        letter: bool,

        /// Fixed cell edge in millimetres
        #[arg(long)]
        cell_size: Option<f32>,

        /// Also write a PNG mosaic preview
        #[arg(long)]
        preview: Option<PathBuf>,
    },
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Dicegrid API",
        description = "Turns photos into printable dice mosaic plans",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_analyze,
        api::handle_analyze_styles,
        api::handle_render,
        api::handle_content,
    ),
    components(schemas(
        api::UploadForm,
        api::AnalyzeResponse,
        api::StyleEntry,
        api::StylesResponse,
        api::RenderRequest,
        api::RenderResponse,
        RenderLayout,
        PageSize,
    )),
    tags(
        (name = "Analysis", description = "Image to grid conversion"),
        (name = "Documents", description = "Printable documents and previews")
    )
)]
struct ApiDoc;

/// Grid file contents: bare rows or an `analyze` result
#[derive(Deserialize)]
#[serde(untagged)]
enum GridFile {
    Rows(Vec<Vec<i64>>),
    Analysis { grid: Vec<Vec<i64>> },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve) => run_server().await,
        Some(Commands::Analyze {
            input,
            width,
            height,
            size,
            preset,
            policy,
            filter,
            output,
        }) => {
            let options = GridOptions {
                grid_width: width,
                grid_height: height,
                grid_size: size,
                policy,
                filter,
                preset,
                ..Default::default()
            };
            run_analyze_command(&input, options, output.as_deref())
        }
        Some(Commands::Render {
            grid,
            output,
            project,
            quadrants,
            letter,
            cell_size,
            preview,
        }) => {
            let layout = RenderLayout {
                quadrants: Some(quadrants),
                page_size: letter.then_some(PageSize::Letter),
                cell_size,
                preview: Some(preview.is_some()),
                ..Default::default()
            };
            run_render_command(&grid, &output, &project, layout, preview.as_deref())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Minimal logging for CLI commands
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicegrid=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Convert an image to a grid (no server needed)
fn run_analyze_command(
    input: &Path,
    options: GridOptions,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    let analyzer = AnalyzerService::from_config(&config.analysis)?;

    let bytes = std::fs::read(input)?;
    let analysis = analyzer
        .analyze(&bytes, &options)
        .map_err(|e| anyhow::anyhow!("Analyze error: {e}"))?;

    let json = serde_json::to_string_pretty(&api::AnalyzeResponse {
        width: analysis.grid.width(),
        height: analysis.grid.height(),
        grid: analysis.grid.to_rows(),
        counts: api::analyze::counts_map(&analysis.counts),
        total: analysis.counts.total(),
    })?;

    match output {
        Some(path) => {
            std::fs::write(path, json)?;
            println!(
                "Wrote {}x{} grid to {}",
                analysis.grid.width(),
                analysis.grid.height(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Render a grid file to PDF (no server needed)
fn run_render_command(
    grid_path: &Path,
    output: &Path,
    project: &str,
    layout: RenderLayout,
    preview: Option<&Path>,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = AppConfig::from_env();
    config.validate()?;

    let rows = match serde_json::from_slice::<GridFile>(&std::fs::read(grid_path)?)? {
        GridFile::Rows(rows) | GridFile::Analysis { grid: rows } => rows,
    };
    let grid = Grid::from_int_rows(rows).map_err(|e| anyhow::anyhow!("Grid error: {e}"))?;

    let documents = DocumentService::new(
        config.document.clone(),
        config.bucket_palette()?,
        Arc::new(SvgRenderer::new()),
    );
    let artifacts = documents
        .render(&grid, project, &layout)
        .map_err(|e| anyhow::anyhow!("Render error: {e}"))?;

    std::fs::write(output, &artifacts.pdf)?;
    println!(
        "Rendered {} ({} pages, {} dice, {} bytes)",
        output.display(),
        artifacts.pages,
        artifacts.counts.total(),
        artifacts.pdf.len()
    );

    if let (Some(path), Some(png)) = (preview, &artifacts.preview) {
        std::fs::write(path, png)?;
        println!("Preview {} ({} bytes)", path.display(), png.len());
    }

    Ok(())
}

/// Display status and configuration information
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    // Read environment variables
    let bind_addr = std::env::var("BIND_ADDR").ok();
    let config_file = std::env::var("CONFIG_FILE").ok();
    let content_dir = std::env::var("CONTENT_DIR").ok();
    let public_base_url = std::env::var("PUBLIC_BASE_URL").ok();

    // Header
    println!("Dicegrid v{VERSION}");
    println!("Turns photos into printable dice mosaic plans\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR       = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:8000 (default)")
    );
    println!(
        "  CONFIG_FILE     = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  CONTENT_DIR     = {}",
        content_dir.as_deref().unwrap_or("./content (default)")
    );
    println!(
        "  PUBLIC_BASE_URL = {}",
        public_base_url.as_deref().unwrap_or("(not set)")
    );

    // Effective settings
    let config = AppConfig::load(config_file.as_deref().map(Path::new));
    println!("\nSettings:");
    println!(
        "  Grid:     {}x{} default, {} max, {} policy, {} filter",
        config.analysis.default_grid_size,
        config.analysis.default_grid_size,
        config.analysis.max_grid_dimension,
        config.analysis.policy,
        config.analysis.filter
    );
    println!(
        "  Document: {:?}, {}",
        config.document.page_size,
        match config.document.cell_size {
            Some(size) => format!("{size}mm cells"),
            None => format!(
                "cells fitted to width ({}-{}mm)",
                config.document.min_cell_size, config.document.max_cell_size
            ),
        }
    );
    println!(
        "  Palette:  {}",
        if config.palette.is_some() {
            "custom"
        } else {
            "standard"
        }
    );
    if let Err(e) = config.validate() {
        println!("  Problem:  {e}");
    }

    // Commands section
    println!("\nCommands:");
    println!("  dicegrid serve    Start the HTTP server");
    println!("  dicegrid analyze  Convert an image to a grid");
    println!("  dicegrid render   Render a grid to a PDF file");
    println!("\nRun 'dicegrid --help' for more details.");
}

/// Run the HTTP server
async fn run_server() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dicegrid=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    let bind_addr = config.bind_addr.clone();

    tracing::info!(
        content_dir = %config.content_dir.display(),
        public_base_url = ?config.public_base_url,
        "Content storage configured"
    );

    // Create application state using shared server module
    let state = server::create_app_state(config)?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Dicegrid server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
