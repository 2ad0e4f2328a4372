use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use holocam::{
    FormatDescriptor, FourCc, FrameDescriptor, FrameGenerator, GeneratorConfig, PixelFormat,
    RgbMask,
};

#[derive(Parser, Debug)]
#[command(name = "holocam", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame described by a generator config.
    Frame(FrameArgs),
    /// Convert an image file into a raw NV12 frame.
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Generator config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output path for the raw frame bytes.
    #[arg(long)]
    out: PathBuf,

    /// Also write a PNG preview of the frame.
    #[arg(long)]
    png: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image (any format the `image` crate decodes).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path for the raw NV12 bytes.
    #[arg(long)]
    out: PathBuf,

    /// NV12 row pitch in bytes (defaults to the image width).
    #[arg(long)]
    pitch: Option<usize>,

    /// Mask ANDed onto each packed ARGB word, e.g. 0xFF00FF00.
    #[arg(long, value_parser = parse_mask, default_value = "0xFFFFFFFF")]
    mask: RgbMask,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "holocam=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Convert(args) => cmd_convert(args),
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = GeneratorConfig::from_path(&args.config)?;
    let mut generator = cfg.build()?;
    let pitch = cfg.effective_pitch()?;

    let out = render_one(&mut generator, pitch, cfg.mask)?;
    write_output(&args.out, &out)?;

    if let Some(png) = &args.png {
        let format = generator.format().context("generator is not initialized")?;
        let frame = generator
            .descriptor()
            .context("generator is not initialized")?;
        write_preview(png, &out, format, frame, pitch)?;
    }
    Ok(())
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let img = holocam::open_image(&args.in_path)?;
    let (width, height) = (img.width(), img.height());
    let pitch = args.pitch.unwrap_or(width as usize);

    let mut generator = FrameGenerator::new(img);
    generator
        .initialize(&FormatDescriptor::new(FourCc::NV12, width, height))
        .with_context(|| format!("'{}' cannot be stored as NV12", args.in_path.display()))?;

    let out = render_one(&mut generator, pitch, args.mask)?;
    write_output(&args.out, &out)
}

fn render_one(generator: &mut FrameGenerator, pitch: usize, mask: RgbMask) -> anyhow::Result<Vec<u8>> {
    let len = generator
        .required_len(pitch)
        .context("frame byte size overflows")?;
    let mut out = vec![0u8; len];
    generator.create_frame(&mut out, pitch, mask)?;
    tracing::info!(
        format = ?generator.format(),
        pitch,
        bytes = len,
        "rendered frame"
    );
    Ok(out)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write frame '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn write_preview(
    path: &Path,
    frame_bytes: &[u8],
    format: PixelFormat,
    frame: FrameDescriptor,
    pitch: usize,
) -> anyhow::Result<()> {
    let rgba = match format {
        PixelFormat::Rgb32 => holocam::rgb32_to_rgba(frame_bytes, pitch, frame)?,
        PixelFormat::Nv12 => holocam::nv12_to_rgba(frame_bytes, pitch, frame.width, frame.height)?,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &rgba,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn parse_mask(s: &str) -> Result<RgbMask, String> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16)
        .map(RgbMask)
        .map_err(|e| format!("invalid mask '{s}': {e}"))
}
