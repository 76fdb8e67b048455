use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "lowpoly", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one frame of a scene as a PNG.
    Frame(FrameArgs),
    /// Render a sweep animation as a numbered PNG sequence.
    Animate(AnimateArgs),
    /// Build wipe strip overlays; print them as JSON or draw their outlines to a PNG.
    Strips(StripsArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Scene JSON. Flags below override its fields.
    #[arg(long = "config")]
    config: Option<PathBuf>,

    /// Canvas width when no config is given.
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Canvas height when no config is given.
    #[arg(long, default_value_t = 600)]
    height: u32,

    #[arg(long)]
    cell_size: Option<f64>,

    #[arg(long)]
    variance: Option<f64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Palette name, e.g. `YlGnBu` or `spectral`.
    #[arg(long)]
    palette: Option<String>,

    /// `linear`, `radial` or `sweep`.
    #[arg(long)]
    gradient: Option<String>,

    /// Sweep direction in degrees.
    #[arg(long)]
    direction: Option<i32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Animation frame to draw (0 = the generated mesh).
    #[arg(long, default_value_t = 0)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames after frame 0.
    #[arg(long)]
    frames: Option<usize>,

    /// Directory receiving `frame_NNNN.png`.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct StripsArgs {
    /// Wipe angle in degrees.
    #[arg(long)]
    angle: i32,

    #[arg(long, default_value_t = 8)]
    count: usize,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Draw outlines to this PNG instead of printing JSON.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Strips(args) => cmd_strips(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<lowpoly::SceneConfig> {
    let f = File::open(path).with_context(|| format!("open scene '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: lowpoly::SceneConfig =
        serde_json::from_reader(r).with_context(|| "parse scene JSON")?;
    Ok(cfg)
}

fn load_scene_config(args: &SceneArgs) -> anyhow::Result<lowpoly::SceneConfig> {
    let mut cfg = match &args.config {
        Some(path) => read_scene_json(path)?,
        None => lowpoly::SceneConfig::new(lowpoly::Canvas::new(args.width, args.height)?),
    };
    if let Some(cell_size) = args.cell_size {
        cfg.cell_size = cell_size;
    }
    if let Some(variance) = args.variance {
        cfg.variance = variance;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }
    if let Some(name) = &args.palette {
        cfg.palette = Some(lowpoly::Palette::parse(name)?);
    }
    if let Some(kind) = &args.gradient {
        cfg.gradient = Some(lowpoly::GradientKind::parse(kind)?);
    }
    if let Some(direction) = args.direction {
        let lowpoly::AnimationConfig::Sweep { direction_deg, .. } = &mut cfg.animation;
        *direction_deg = Some(direction);
    }
    cfg.validate()?;
    Ok(cfg)
}

fn write_png(path: &Path, frame: lowpoly::FrameRGBA) -> anyhow::Result<()> {
    let frame = frame.into_straight();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_scene_config(&args.scene)?;
    let scene = cfg.build()?;
    let renderer = lowpoly::CpuRenderer::new(cfg.canvas, lowpoly::RenderSettings::default())?;

    let mut anim = scene.animation();
    anim.prerender(args.frame);
    let points = anim
        .seek(lowpoly::FrameIndex(args.frame))
        .with_context(|| format!("frame {} was not produced", args.frame))?;

    let frame = renderer.render(&scene.colorize(points))?;
    write_png(&args.out, frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let cfg = load_scene_config(&args.scene)?;
    let frames = args.frames.unwrap_or(cfg.frames);
    let scene = cfg.build()?;
    let renderer = lowpoly::CpuRenderer::new(cfg.canvas, lowpoly::RenderSettings::default())?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut anim = scene.animation();
    anim.setup();
    for i in 0..=frames {
        if i > 0 {
            anim.render_frame();
        }
        let frame = renderer.render(&scene.colorize(anim.current_points()))?;
        let path = args.out_dir.join(format!("frame_{i:04}.png"));
        write_png(&path, frame)?;
    }

    eprintln!("wrote {} frames to {}", frames + 1, args.out_dir.display());
    Ok(())
}

fn cmd_strips(args: StripsArgs) -> anyhow::Result<()> {
    let canvas = lowpoly::Canvas::new(args.width, args.height)?;
    let set = lowpoly::strip_overlays(args.angle, args.count, canvas)?;

    let Some(out) = args.out else {
        let json = serde_json::to_string_pretty(&set).with_context(|| "serialize strips")?;
        println!("{json}");
        return Ok(());
    };

    let settings = lowpoly::RenderSettings {
        clear_rgba: Some([255, 255, 255, 255]),
        ..lowpoly::RenderSettings::default()
    };
    let renderer = lowpoly::CpuRenderer::new(canvas, settings)?;
    let frame = renderer.render_with_strips(&[], Some(&set))?;
    write_png(&out, frame)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}
