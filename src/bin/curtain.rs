use std::{path::PathBuf, rc::Rc, time::Duration};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use curtain::{
    BinaryWord, Cue, Deps, FileStore, FrameQueue, ManualClock, MemoryStore, Millis, Palette, Rng64,
    Scene, ScrollLatch, SequenceConfig, Sequencer, StaticPlatform, Status, SystemClock, Tick,
    Viewport, WORD_TOGGLE_PROBABILITY, WORD_UPDATE_MS, presets,
};

#[derive(Parser, Debug)]
#[command(name = "curtain", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a sequence in real time, printing text payloads as they change.
    Play(PlayArgs),
    /// Step a sequence on a manual clock and print every frame as JSON.
    Trace(TraceArgs),
    /// Render the frame at one instant as a PNG.
    Snapshot(SnapshotArgs),
    /// Print a preset's configuration as JSON.
    Config(ConfigArgs),
    /// Print the bit-flipping binary wordmark.
    Logo(LogoArgs),
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Built-in preset (welcome, typing, hero).
    #[arg(long, default_value = "welcome")]
    preset: String,

    /// Sequence config JSON; overrides `--preset`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Behave as if the platform asked for reduced motion.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Session file standing in for browser session storage.
    #[arg(long)]
    session_file: Option<PathBuf>,

    /// Frame rate of the playback loop.
    #[arg(long, default_value_t = 30)]
    fps: u32,
}

#[derive(Parser, Debug)]
struct TraceArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Clock advance between frames.
    #[arg(long, default_value_t = 100)]
    step_ms: u64,
}

#[derive(Parser, Debug)]
struct SnapshotArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Sequence time to capture.
    #[arg(long)]
    at_ms: u64,

    /// Surface width in CSS pixels.
    #[arg(long, default_value_t = 640.0)]
    width: f64,

    /// Surface height in CSS pixels.
    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Device pixel ratio (capped at 2).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    /// Preset to print.
    #[arg(long, default_value = "welcome")]
    preset: String,
}

#[derive(Parser, Debug)]
struct LogoArgs {
    /// Text to encode.
    #[arg(long, default_value = presets::WORDMARK)]
    word: String,

    /// Number of updates to print.
    #[arg(long, default_value_t = 8)]
    ticks: u32,

    /// Seed for the flip generator.
    #[arg(long, default_value_t = 1)]
    seed: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Trace(args) => cmd_trace(args),
        Command::Snapshot(args) => cmd_snapshot(args),
        Command::Config(args) => cmd_config(args),
        Command::Logo(args) => cmd_logo(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn load_config(source: &SourceArgs) -> anyhow::Result<SequenceConfig<Cue>> {
    let config = match &source.config {
        Some(path) => SequenceConfig::from_path(path)?,
        None => presets::by_name(&source.preset)?,
    };
    Ok(config)
}

fn platform(source: &SourceArgs, viewport: Viewport) -> StaticPlatform {
    let p = StaticPlatform::with_viewport(viewport);
    if source.reduced_motion {
        p.reduced()
    } else {
        p
    }
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.fps > 0, "--fps must be > 0");
    let config = load_config(&args.source)?;
    let session_path = args
        .session_file
        .unwrap_or_else(|| std::env::temp_dir().join("curtain-session.json"));

    let deps = Deps {
        store: Rc::new(FileStore::new(&session_path)),
        scroll: Rc::new(ScrollLatch::new()),
        clock: Rc::new(SystemClock::new()),
    };
    let mut seq = Sequencer::new(config, deps).context("build sequencer")?;
    let mut frames = FrameQueue::new();
    let platform = platform(&args.source, Viewport::new(1280.0, 720.0));

    if seq.start(&platform, &mut frames) == Status::Skipped {
        eprintln!(
            "already played this session (remove '{}' to replay)",
            session_path.display()
        );
        return Ok(());
    }

    let interval = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let mut shown: Option<(usize, String)> = None;
    while let Some(ticket) = frames.pop() {
        std::thread::sleep(interval);
        if let Tick::Finished(reason) = seq.on_frame(ticket, &mut frames) {
            eprintln!("done: {reason:?}");
            break;
        }
        let Some(frame) = seq.frame() else {
            continue;
        };
        let now = (frame.phase, frame.payload.text.clone());
        if shown.as_ref() != Some(&now) {
            println!(
                "[{:>6}] {:<12} {}",
                frame.elapsed.to_string(),
                frame.phase_name,
                frame.payload.text.replace('\n', " / ")
            );
            shown = Some(now);
        }
    }
    Ok(())
}

fn cmd_trace(args: TraceArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let step = Millis(args.step_ms);
    let horizon = config.total().0.max(config.reduced_motion_settle.0);
    let limit = usize::try_from(horizon / args.step_ms.max(1) + 2)
        .context("trace too long for this platform")?;

    let clock = Rc::new(ManualClock::starting_at(Millis::ZERO));
    let deps = Deps {
        store: Rc::new(MemoryStore::new()),
        scroll: Rc::new(ScrollLatch::new()),
        clock: clock.clone(),
    };
    let mut seq = Sequencer::new(config, deps).context("build sequencer")?;
    let platform = platform(&args.source, Viewport::new(1280.0, 720.0));
    let entries = curtain::trace(&mut seq, &platform, &clock, step, limit)?;

    let stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(stdout, &entries).context("write trace json")?;
    println!();
    Ok(())
}

fn cmd_snapshot(args: SnapshotArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let viewport = Viewport {
        width: args.width,
        height: args.height,
        device_pixel_ratio: args.dpr,
    };
    anyhow::ensure!(
        !viewport.is_degenerate(),
        "surface must have positive width and height"
    );

    let clock = Rc::new(ManualClock::starting_at(Millis::ZERO));
    let deps = Deps {
        store: Rc::new(MemoryStore::new()),
        scroll: Rc::new(ScrollLatch::new()),
        clock: clock.clone(),
    };
    let mut seq = Sequencer::new(config, deps).context("build sequencer")?;
    let mut frames = FrameQueue::new();
    seq.start(&platform(&args.source, viewport), &mut frames);

    // First frame seeds the backdrop cadence at t=0, second lands on the requested instant.
    for at in [Millis::ZERO, Millis(args.at_ms)] {
        clock.set(at);
        if let Some(ticket) = frames.pop() {
            seq.on_frame(ticket, &mut frames);
        }
    }

    let frame = seq.frame();
    let scene = Scene {
        look: frame.map(|f| &f.payload),
        cursor_visible: frame.is_some_and(|f| f.cursor_visible()),
        grid: seq.backdrop(),
    };
    let img = curtain::rasterize(scene, viewport, &Palette::default());
    curtain::save_png(&img, &args.out)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {} ({:?})", args.out.display(), seq.status());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = presets::by_name(&args.preset)?;
    println!("{}", config.to_json_pretty()?);
    Ok(())
}

fn cmd_logo(args: LogoArgs) -> anyhow::Result<()> {
    let mut word = BinaryWord::encode(&args.word);
    let mut rng = Rng64::new(args.seed);
    for tick in 0..u64::from(args.ticks) {
        println!("{:>6}ms  {word}", tick * WORD_UPDATE_MS);
        word.toggle(WORD_TOGGLE_PROBABILITY, &mut rng);
    }
    Ok(())
}
