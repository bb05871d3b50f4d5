use std::{
    fs::File,
    io::{self, BufReader, Read as _, Write},
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::Parser;
use crossterm::{cursor, execute, terminal};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "glyphfx",
    version,
    about = "Play a terminal text effect over text read from stdin"
)]
struct Cli {
    /// Effect to play.
    #[arg(value_enum)]
    effect: glyphfx::EffectKind,

    /// Seed for every random choice the effect makes.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Target frames per second (0 plays as fast as possible).
    #[arg(long)]
    frame_rate: Option<u32>,

    /// Restrict output to the xterm-256 palette.
    #[arg(long)]
    xterm_colors: bool,

    /// Truncate lines wider than the terminal instead of wrapping them.
    #[arg(long)]
    no_wrap: bool,

    /// Spaces per tab character.
    #[arg(long)]
    tab_width: Option<usize>,

    /// Effect configuration JSON; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Read input from a file instead of stdin.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let terminal_config = terminal_config(&cli);
    let effect_config = cli.config.as_deref().map(read_config_json).transpose()?;
    let input = read_input(cli.in_path.as_deref())?;

    let size = terminal::size().unwrap_or_else(|err| {
        tracing::warn!(%err, "terminal size unavailable, assuming 80x24");
        (80, 24)
    });
    let canvas = glyphfx::Canvas::from_input(&input, &terminal_config, size);
    let effect = glyphfx::build_effect(cli.effect, canvas, effect_config, cli.seed)
        .with_context(|| format!("build effect '{}'", cli.effect.name()))?;

    play(effect, terminal_config.frame_rate)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn terminal_config(cli: &Cli) -> glyphfx::TerminalConfig {
    let mut config = glyphfx::TerminalConfig {
        xterm_colors: cli.xterm_colors,
        no_wrap: cli.no_wrap,
        ..Default::default()
    };
    if let Some(frame_rate) = cli.frame_rate {
        config.frame_rate = frame_rate;
    }
    if let Some(tab_width) = cli.tab_width {
        config.tab_width = tab_width;
    }
    config
}

fn read_config_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(f))
        .with_context(|| format!("parse config JSON '{}'", path.display()))?;
    Ok(value)
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    let mut input = String::new();
    match path {
        Some(path) => {
            File::open(path)
                .with_context(|| format!("open input '{}'", path.display()))?
                .read_to_string(&mut input)
                .with_context(|| format!("read input '{}'", path.display()))?;
        }
        None => {
            io::stdin()
                .read_to_string(&mut input)
                .context("read input from stdin")?;
        }
    }
    Ok(input)
}

fn play(mut effect: Box<dyn glyphfx::Effect>, frame_rate: u32) -> anyhow::Result<()> {
    let frame_time =
        (frame_rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(frame_rate)));
    let mut out = io::stdout().lock();

    out.write_all(effect.canvas().prep_output_area().as_bytes())
        .context("prepare output area")?;
    execute!(out, cursor::Hide).context("hide cursor")?;
    let result = drive(effect.as_mut(), &mut out, frame_time);
    execute!(out, cursor::Show).context("show cursor")?;
    result
}

fn drive(
    effect: &mut dyn glyphfx::Effect,
    out: &mut impl Write,
    frame_time: Option<Duration>,
) -> anyhow::Result<()> {
    let started = Instant::now();
    let mut frames = 0u64;
    while let Some(frame) = effect.next() {
        let tick_start = Instant::now();
        out.write_all(frame.as_bytes()).context("write frame")?;
        out.flush().context("flush frame")?;
        frames += 1;
        if let Some(frame_time) = frame_time {
            let elapsed = tick_start.elapsed();
            if elapsed < frame_time {
                thread::sleep(frame_time - elapsed);
            }
        }
    }
    tracing::info!(
        effect = effect.name(),
        frames,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "effect finished"
    );
    Ok(())
}
