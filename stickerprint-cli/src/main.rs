use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use stickerprint::{
    DEFAULT_DPI, GateConfig, LayoutSpec, PRESET_NAMES, Session, UploadOutcome, UploadRejection,
    UploadSlot, ValidationGate,
};

mod detector;

use detector::QrDetector;

#[derive(Parser, Debug)]
#[command(name = "stickerprint", version, about = "Print-ready sticker and photo layouts")]
struct Cli {
    /// Log engine activity (geometry, validation) to stderr.
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check that an image carries a scannable QR code.
    Validate(ValidateArgs),
    /// Compose an image into a print-ready PNG.
    Render(RenderArgs),
    /// Print the built-in layout presets as JSON.
    Layouts(LayoutsArgs),
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    /// 50x75 mm print, contain-fit.
    Plain,
    /// 50x75 mm sticker on an L-size sheet.
    Sticker,
    /// Sticker with a cutout window.
    Cutout,
    /// Free size from --width-mm/--height-mm, contain-fit.
    Custom,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Built-in layout (default: sticker).
    #[arg(long, value_enum, conflicts_with = "layout_file")]
    preset: Option<Preset>,

    /// Layout JSON file instead of a preset.
    #[arg(long)]
    layout_file: Option<PathBuf>,

    /// Override the layout's dpi (72..=1200).
    #[arg(long)]
    dpi: Option<u32>,

    /// Canvas width for `--preset custom`.
    #[arg(long, requires = "height_mm")]
    width_mm: Option<f64>,

    /// Canvas height for `--preset custom`.
    #[arg(long, requires = "width_mm")]
    height_mm: Option<f64>,

    /// Output PNG path.
    #[arg(long, conflicts_with = "out_dir")]
    out: Option<PathBuf>,

    /// Output directory; the file is named after the layout and dpi.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Accept the image without looking for a QR code.
    #[arg(long, default_value_t = false)]
    skip_validation: bool,
}

#[derive(Parser, Debug)]
struct LayoutsArgs {
    /// Resolution to show the presets at.
    #[arg(long, default_value_t = DEFAULT_DPI)]
    dpi: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Validate(args) => cmd_validate(args).await,
        Command::Render(args) => cmd_render(args).await,
        Command::Layouts(args) => cmd_layouts(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn upload_slot() -> UploadSlot {
    let gate = ValidationGate::new(Arc::new(QrDetector)).with_config(GateConfig::from_env());
    UploadSlot::new(gate)
}

fn rejection_error(rejection: UploadRejection) -> anyhow::Error {
    anyhow::anyhow!("{} ({rejection})", rejection.user_message())
}

async fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    match upload_slot().submit(bytes).await {
        UploadOutcome::Accepted(image) => {
            eprintln!(
                "ok: code found in {} ({}x{})",
                args.in_path.display(),
                image.width(),
                image.height()
            );
            Ok(())
        }
        UploadOutcome::Rejected(rejection) => Err(rejection_error(rejection)),
        UploadOutcome::Superseded => anyhow::bail!("validation was cancelled"),
    }
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let layout = resolve_layout(&args)?;
    let mut session = Session::with_layout(layout)?;

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read image '{}'", args.in_path.display()))?;
    if args.skip_validation {
        session.accept(stickerprint::decode_image(&bytes)?);
    } else {
        let outcome = upload_slot().submit(bytes).await;
        session.apply_upload(outcome).map_err(rejection_error)?;
    }

    let surface = session
        .render()?
        .context("no image was accepted for rendering")?;

    let out = match (&args.out, &args.out_dir) {
        (Some(path), _) => path.clone(),
        (None, dir) => dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(session.export_file_name()),
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    stickerprint::write_png(&surface, &out)?;

    eprintln!(
        "wrote {} ({}x{} px)",
        out.display(),
        surface.width(),
        surface.height()
    );
    Ok(())
}

fn resolve_layout(args: &RenderArgs) -> anyhow::Result<LayoutSpec> {
    let free_size = args.width_mm.is_some() || args.height_mm.is_some();
    if free_size && (args.layout_file.is_some() || args.preset != Some(Preset::Custom)) {
        anyhow::bail!("--width-mm and --height-mm only apply to --preset custom");
    }
    let layout = match (&args.layout_file, args.preset.unwrap_or(Preset::Sticker)) {
        (Some(path), _) => LayoutSpec::from_path(path)?,
        (None, Preset::Custom) => {
            let (Some(w), Some(h)) = (args.width_mm, args.height_mm) else {
                anyhow::bail!("--preset custom needs --width-mm and --height-mm");
            };
            LayoutSpec::custom(w, h, DEFAULT_DPI)
        }
        (None, Preset::Plain) => LayoutSpec::plain(DEFAULT_DPI),
        (None, Preset::Sticker) => LayoutSpec::sticker_sheet(DEFAULT_DPI),
        (None, Preset::Cutout) => LayoutSpec::cutout_sheet(DEFAULT_DPI),
    };
    let layout = match args.dpi {
        Some(dpi) => layout.with_dpi(dpi),
        None => layout,
    };
    layout.validate()?;
    Ok(layout)
}

fn cmd_layouts(args: LayoutsArgs) -> anyhow::Result<()> {
    for name in PRESET_NAMES {
        let layout = LayoutSpec::preset(name, args.dpi)
            .with_context(|| format!("unknown preset '{name}'"))?;
        let json = serde_json::to_string(&layout).context("serialize layout")?;
        let px = layout.raster_size();
        println!("{name}\t{}x{} px\t{json}", px.width_px, px.height_px);
    }
    Ok(())
}
