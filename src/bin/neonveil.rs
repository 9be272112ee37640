use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use minifb::{Key, MouseMode, Window, WindowOptions};

use neonveil::{BackgroundRenderer, Palette, Viewport};

#[derive(Parser, Debug)]
#[command(name = "neonveil", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Open a window and run the live pointer-reactive loop.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Logical viewport width.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Logical viewport height.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Pointer position as `x,y` in logical pixels; omit for the idle state.
    #[arg(long)]
    pointer: Option<String>,

    /// Number of easing frames to advance before capturing.
    #[arg(long, default_value_t = 60)]
    steps: u32,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = Theme::Cosmetic)]
    theme: Theme,

    /// Palette JSON overriding --theme, e.g. {"primary":"#00eaff",...}.
    #[arg(long)]
    palette: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Initial logical window width.
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Initial logical window height.
    #[arg(long, default_value_t = 768)]
    height: u32,

    /// Device pixel ratio.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Color theme.
    #[arg(long, value_enum, default_value_t = Theme::Cosmetic)]
    theme: Theme,

    /// Palette JSON overriding --theme.
    #[arg(long)]
    palette: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Theme {
    Cosmetic,
    Nutrition,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn load_palette(theme: Theme, path: Option<&Path>) -> anyhow::Result<Palette> {
    if let Some(p) = path {
        let f = File::open(p).with_context(|| format!("open palette '{}'", p.display()))?;
        let palette: Palette =
            serde_json::from_reader(BufReader::new(f)).with_context(|| "parse palette JSON")?;
        return Ok(palette);
    }
    Ok(match theme {
        Theme::Cosmetic => Palette::cosmetic(),
        Theme::Nutrition => Palette::nutrition(),
    })
}

fn parse_pointer(s: &str) -> anyhow::Result<(f64, f64)> {
    let (x, y) = s
        .split_once(',')
        .context("pointer must be 'x,y' in logical pixels")?;
    Ok((
        x.trim().parse().context("parse pointer x")?,
        y.trim().parse().context("parse pointer y")?,
    ))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let pointer = args.pointer.as_deref().map(parse_pointer).transpose()?;
    let palette = load_palette(args.theme, args.palette.as_deref())?;
    let viewport = Viewport::new(args.width, args.height, args.dpr)?;
    let mut renderer = BackgroundRenderer::new(viewport, palette)?;

    if let Some((x, y)) = pointer {
        renderer.pointer_moved(x, y);
    }
    renderer.step_frames(args.steps.max(1))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = renderer.frame();
    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let palette = load_palette(args.theme, args.palette.as_deref())?;
    let mut viewport = Viewport::new(args.width, args.height, args.dpr)?;
    let mut renderer = BackgroundRenderer::new(viewport, palette)?;

    // No drawing surface means no effect: report and bow out without a
    // failure status, the same way the embedding page just shows nothing.
    let mut window = match Window::new(
        "neonveil",
        args.width as usize,
        args.height as usize,
        WindowOptions {
            resize: true,
            ..WindowOptions::default()
        },
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("no window available, rendering nothing: {e}");
            return Ok(());
        }
    };
    window.set_target_fps(60);

    while window.is_open() && !window.is_key_down(Key::Escape) {
        let (w, h) = window.get_size();
        if w > 0 && h > 0 && (w as u32 != viewport.width || h as u32 != viewport.height) {
            viewport = Viewport::new(w as u32, h as u32, args.dpr)?;
            renderer.resize(viewport)?;
        }

        // Discard mode reports nothing while the cursor is outside the
        // window, which is exactly the ignore-pointer-leave contract.
        if let Some((mx, my)) = window.get_mouse_pos(MouseMode::Discard) {
            renderer.pointer_moved(f64::from(mx), f64::from(my));
        }

        let frame = renderer.render_frame()?;
        let buf = frame.to_argb8888();
        let (fw, fh) = (frame.width() as usize, frame.height() as usize);
        window
            .update_with_buffer(&buf, fw, fh)
            .map_err(|e| anyhow::anyhow!("present frame: {e}"))?;
    }

    Ok(())
}
