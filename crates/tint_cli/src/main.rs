use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, warn};
use tint_render::{BlurOptions, ColorGrid, GridOptions, TintRenderer, DEFAULT_TEXT};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Blur images and render them as colored text blocks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Apply a Gaussian blur and write the result to disk
    Blur(BlurArgs),
    /// Print the average color of every tile
    Colors(ColorsArgs),
    /// Render the image as colored text blocks in the terminal
    Preview(PreviewArgs),
    /// Blur every image in a directory
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct BlurArgs {
    /// Input image path
    input: PathBuf,
    /// Output image path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    blur: BlurSettings,
}

#[derive(Parser, Debug)]
struct ColorsArgs {
    /// Input image path
    input: PathBuf,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Output format for the color grid
    #[arg(long, value_enum, default_value = "css")]
    format: ColorFormat,
    #[command(flatten)]
    grid: GridSettings,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    /// Blur the image with this radius before sampling tiles
    #[arg(long)]
    blur: Option<f32>,
    /// Print glyphs without color escapes
    #[arg(long, default_value_t = false)]
    plain: bool,
    #[command(flatten)]
    grid: GridSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory containing input images
    input: PathBuf,
    /// Output directory for blurred images
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    blur: BlurSettings,
}

#[derive(Parser, Debug, Clone)]
struct BlurSettings {
    /// Blur strength; the kernel reaches floor(radius * 3) pixels each way
    #[arg(long, default_value_t = 2.0)]
    radius: f32,
}

#[derive(Parser, Debug, Clone)]
struct GridSettings {
    /// Tile edge length in pixels, one glyph per tile
    #[arg(long, default_value_t = 12)]
    font_size: u32,
    /// Characters cycled over the tiles
    #[arg(long, default_value = DEFAULT_TEXT)]
    text: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorFormat {
    Css,
    Json,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Blur(args) => blur(args),
        Commands::Colors(args) => colors(args),
        Commands::Preview(args) => preview(args),
        Commands::Batch(args) => batch(args),
    }
}

fn blur(args: BlurArgs) -> Result<()> {
    let renderer = TintRenderer::default();
    let output = renderer
        .blur_path(&args.input, args.blur.to_options())
        .with_context(|| format!("failed to blur {:?}", args.input))?;
    output.save(&args.output).with_context(|| format!("failed to write {:?}", args.output))?;
    Ok(())
}

fn colors(args: ColorsArgs) -> Result<()> {
    let renderer = TintRenderer::default();
    let grid = renderer
        .color_grid_path(&args.input, &args.grid.to_options())
        .with_context(|| format!("failed to sample colors from {:?}", args.input))?;
    debug!("color grid {}x{} for {:?}", grid.columns, grid.rows, args.input);

    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {:?}", path))?;
            write_grid(BufWriter::new(file), &grid, args.format)
        },
        None => write_grid(io::stdout().lock(), &grid, args.format),
    }
}

fn write_grid<W: Write>(mut out: W, grid: &ColorGrid, format: ColorFormat) -> Result<()> {
    match format {
        ColorFormat::Css => {
            for row in grid.css_rows() {
                writeln!(out, "{}", row.join(" "))?;
            }
        },
        ColorFormat::Json => {
            serde_json::to_writer_pretty(&mut out, grid)?;
            writeln!(out)?;
        },
    }
    out.flush()?;
    Ok(())
}

fn preview(args: PreviewArgs) -> Result<()> {
    let renderer = TintRenderer::default();
    let image =
        image::open(&args.input).with_context(|| format!("failed to open {:?}", args.input))?;
    let blur = args.blur.map(|radius| BlurOptions { radius });
    let blocks = renderer
        .text_blocks_image(&image, &args.grid.to_options(), blur)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    let mut out = io::stdout().lock();
    if args.plain {
        for row in blocks.plain_rows() {
            writeln!(out, "{}", row)?;
        }
    } else {
        for row in blocks.ansi_rows() {
            writeln!(out, "{}", row)?;
        }
    }

    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let renderer = TintRenderer::default();
    let options = args.blur.to_options();
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let entries = collect_images(&args.input)?;
    let progress = ProgressBar::new(entries.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
        )?
        .progress_chars("=> "),
    );

    let mut written = 0usize;
    for entry in entries {
        progress.inc(1);
        let output = match renderer.blur_path(&entry, options) {
            Ok(output) => output,
            Err(err) => {
                warn!("skipping {}: {err}", entry.display());
                continue;
            },
        };

        let target = output_path(&args.input, &args.out_dir, &entry);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {:?}", parent))?;
        }
        output.save(&target).with_context(|| format!("failed to write {:?}", target))?;
        written += 1;
    }

    progress.finish_with_message(format!("{} images written to {:?}", written, args.out_dir));
    Ok(())
}

fn collect_images(path: &Path) -> Result<Vec<PathBuf>> {
    let mut entries: Vec<PathBuf> = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|path| image::ImageFormat::from_path(path).is_ok())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", path);
    }
    Ok(entries)
}

/// Mirrors `entry`'s position under `root` into `out_dir`.
fn output_path(root: &Path, out_dir: &Path, entry: &Path) -> PathBuf {
    match entry.strip_prefix(root) {
        Ok(relative) => out_dir.join(relative),
        Err(_) => out_dir.join(entry.file_name().unwrap_or(entry.as_os_str())),
    }
}

impl BlurSettings {
    fn to_options(&self) -> BlurOptions {
        BlurOptions { radius: self.radius }
    }
}

impl GridSettings {
    fn to_options(&self) -> GridOptions {
        GridOptions { font_size: self.font_size, text: self.text.clone() }
    }
}
