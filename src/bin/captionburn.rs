use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "captionburn", version)]
struct Cli {
    /// Log font resolution and layout decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Burn a caption onto an image and save it as PNG.
    Burn(BurnArgs),
    /// Render a caption onto a solid canvas.
    Preview(PreviewArgs),
    /// Print the default style as JSON.
    Style,
}

#[derive(Args, Debug)]
struct StyleArgs {
    /// Style JSON; missing fields keep their defaults.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Directory holding the default font files.
    #[arg(long, default_value = captionburn::DEFAULT_FONT_DIR)]
    font_dir: PathBuf,

    /// Font file to try, in order. Replaces the default candidates when given.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct BurnArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Caption text; `\n` in the text is treated as whitespace.
    #[arg(long)]
    caption: String,

    /// Output PNG path (defaults to overwriting the input).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Vertical placement of the caption block.
    #[arg(long, value_enum, default_value_t = PositionChoice::Upper)]
    position: PositionChoice,

    /// Supersampling factor.
    #[arg(long, default_value_t = 2)]
    supersample: u32,

    /// Print the resolved font and line plan before rendering.
    #[arg(long)]
    dump_plan: bool,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// Caption text.
    #[arg(long)]
    caption: String,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = captionburn::PREVIEW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = captionburn::PREVIEW_HEIGHT)]
    height: u32,

    /// Background color as `#RRGGBB`.
    #[arg(long, default_value_t = captionburn::PREVIEW_BACKGROUND)]
    bg: captionburn::Color,

    #[command(flatten)]
    style: StyleArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositionChoice {
    Upper,
    Center,
    Bottom,
}

impl From<PositionChoice> for captionburn::PositionMode {
    fn from(c: PositionChoice) -> Self {
        match c {
            PositionChoice::Upper => Self::Upper,
            PositionChoice::Center => Self::Center,
            PositionChoice::Bottom => Self::Bottom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Burn(args) => cmd_burn(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Style => cmd_style(),
    }
}

fn make_renderer(args: &StyleArgs) -> anyhow::Result<captionburn::CaptionRenderer> {
    let style = match &args.style {
        Some(path) => captionburn::StyleConfig::from_json_path(path)?,
        None => captionburn::StyleConfig::default(),
    };

    let cache = captionburn::FontCache::global();
    let fonts = if args.fonts.is_empty() {
        captionburn::FontResolver::with_font_dir(&args.font_dir, cache)
    } else {
        let family = args.fonts[0]
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        captionburn::FontResolver::new(family, args.fonts.iter().cloned(), cache)
    };

    Ok(captionburn::CaptionRenderer::new(style, fonts)?)
}

fn cmd_burn(args: BurnArgs) -> anyhow::Result<()> {
    let renderer = make_renderer(&args.style)?;
    let opts = captionburn::BurnOptions {
        position: args.position.into(),
        supersample: args.supersample,
        ..captionburn::BurnOptions::default()
    };

    if args.dump_plan {
        let (w, h) = image::image_dimensions(&args.in_path)
            .with_context(|| format!("read image size '{}'", args.in_path.display()))?;
        dump_plan(&renderer, w, h, &args.caption, &opts)?;
    }

    let written = renderer.burn_file(&args.in_path, &args.caption, args.out.as_deref(), &opts)?;
    eprintln!("wrote {}", written.display());
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let renderer = make_renderer(&args.style)?;
    let img = renderer.preview(&args.caption, args.width, args.height, args.bg)?;
    captionburn::save_png(&img, &args.out)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_style() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&captionburn::StyleConfig::default())
        .context("serialize default style")?;
    println!("{json}");
    Ok(())
}

fn dump_plan(
    renderer: &captionburn::CaptionRenderer,
    width: u32,
    height: u32,
    caption: &str,
    opts: &captionburn::BurnOptions,
) -> anyhow::Result<()> {
    let Some(layout) = renderer.layout(width, height, caption, opts)? else {
        eprintln!("empty caption, nothing to draw");
        return Ok(());
    };

    let font = &layout.font;
    eprintln!("caption plan:");
    eprintln!("  family:      {}", font.family());
    match font.source_path() {
        Some(path) => eprintln!("  source:      {}", path.display()),
        None => eprintln!("  source:      builtin bitmap"),
    }
    eprintln!("  font_size:   {}", layout.font_size);
    eprintln!(
        "  canvas:      {}x{} ({}x)",
        layout.canvas.width, layout.canvas.height, opts.supersample
    );
    eprintln!("  line_height: {}", layout.plan.line_height);
    eprintln!("  start_y:     {}", layout.plan.start_y);
    for line in &layout.plan.lines {
        eprintln!(
            "    [{:>5},{:>5}] w={:<5} {}",
            line.x, line.y, line.width, line.text
        );
    }
    Ok(())
}
