use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use odots::{GifSink, RenderSession, Variant};

#[derive(Parser, Debug)]
#[command(name = "odots", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the looping animation as an animated GIF.
    Render(RenderArgs),
    /// Render a single tick as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output GIF path.
    #[arg(long, default_value = "test.gif")]
    out: PathBuf,

    /// Animation variant to render.
    #[arg(long, value_enum, default_value_t = VariantChoice::Glyph)]
    variant: VariantChoice,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Tick index (0-based) within the cycle.
    #[arg(long, default_value_t = 0)]
    tick: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Animation variant to render.
    #[arg(long, value_enum, default_value_t = VariantChoice::Glyph)]
    variant: VariantChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantChoice {
    Glyph,
    Ring,
}

impl From<VariantChoice> for Variant {
    fn from(choice: VariantChoice) -> Self {
        match choice {
            VariantChoice::Glyph => Variant::Glyph,
            VariantChoice::Ring => Variant::Ring,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        // No subcommand: write the default animation to test.gif.
        None => cmd_render(RenderArgs {
            out: PathBuf::from("test.gif"),
            variant: VariantChoice::Glyph,
        }),
        Some(Command::Render(args)) => cmd_render(args),
        Some(Command::Frame(args)) => cmd_frame(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut session = RenderSession::for_variant(args.variant.into())?;
    let mut sink = GifSink::new(&args.out, session.config().background);
    let stats = session.render(&mut sink)?;

    eprintln!(
        "wrote {} ({} frames)",
        args.out.display(),
        stats.frames_encoded
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let mut session = RenderSession::for_variant(args.variant.into())?;
    let frame = session.frame_at(args.tick)?;

    if let Some(parent) = args.out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
    }

    // PNG expects straight alpha; session frames are fully opaque after the
    // background repaint, so the premultiplied bytes are safe to write as-is.
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
