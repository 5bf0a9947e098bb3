use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use memegen::{
    CandidateFile, CaptionConfig, Compositor, FONT_DIR_ENV, FontBook, FontFamily, FontSize,
    TextAlign, TextColor,
};

#[derive(Parser, Debug)]
#[command(name = "memegen", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Caption an image and write it as a PNG.
    Render(RenderArgs),
    /// Check whether an image would be accepted for captioning.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input JPEG, PNG or GIF.
    #[arg(long)]
    image: PathBuf,

    /// Top caption.
    #[arg(long)]
    top: Option<String>,

    /// Bottom caption.
    #[arg(long)]
    bottom: Option<String>,

    /// Font size in pixels (12-72).
    #[arg(long)]
    font_size: Option<u32>,

    /// Font family, e.g. "Impact" or "Comic Sans MS".
    #[arg(long)]
    font: Option<FontFamily>,

    /// Fill color as #rrggbb.
    #[arg(long)]
    color: Option<TextColor>,

    /// Horizontal alignment: left, center or right.
    #[arg(long)]
    align: Option<TextAlign>,

    /// Caption config JSON. Flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory with caption fonts. Defaults to $MEMEGEN_FONT_DIR.
    #[arg(long)]
    font_dir: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long, default_value = memegen::EXPORT_FILE_NAME)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Image to check.
    #[arg(long)]
    image: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn load_fonts(font_dir: Option<&Path>) -> anyhow::Result<FontBook> {
    let book = match font_dir {
        Some(dir) => FontBook::from_dir(dir)?,
        None => FontBook::from_env()?.with_context(|| {
            format!("no caption fonts: pass --font-dir or set {FONT_DIR_ENV}")
        })?,
    };
    Ok(book)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = match &args.config {
        Some(path) => CaptionConfig::from_path(path)?,
        None => CaptionConfig::default(),
    };
    if let Some(top) = args.top {
        cfg.caption.top_text = top;
    }
    if let Some(bottom) = args.bottom {
        cfg.caption.bottom_text = bottom;
    }
    if let Some(px) = args.font_size {
        cfg.style.font_size = FontSize::new(px)?;
    }
    if let Some(font) = args.font {
        cfg.style.font_family = font;
    }
    if let Some(color) = args.color {
        cfg.style.text_color = color;
    }
    if let Some(align) = args.align {
        cfg.style.text_align = align;
    }

    let candidate = CandidateFile::from_path(&args.image)?;
    let file = memegen::validate(&candidate)?;
    let base = memegen::decode_validated(&file)
        .with_context(|| format!("decode '{}'", args.image.display()))?;

    let book = load_fonts(args.font_dir.as_deref())?;
    let mut compositor = Compositor::new(&book)?;
    let meme = compositor.composite(&base, &cfg.caption, &cfg.style);
    let export = memegen::export(&meme)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, &export.bytes)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let candidate = CandidateFile::from_path(&args.image)?;
    let file = memegen::validate(&candidate)
        .with_context(|| format!("rejected '{}'", args.image.display()))?;
    println!(
        "{}: {} ({} bytes)",
        args.image.display(),
        file.media_type(),
        candidate.size_bytes
    );
    Ok(())
}
