#![deny(unsafe_code)]
//! CLI binary for the gravity-field heatmap.
//!
//! Subcommands:
//! - `render` replay clicks against a session and write a PNG
//! - `sample` replay clicks and summarize the sampled grid
//! - `scene` print (or save) a preset's scene configuration
//! - `list` print available presets and palettes

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use gravity_field_core::{DVec2, FieldSession, FrameBuffer, Preset, Renderer, Scene};
use gravity_field_heatmap::{
    snapshot, ColorRange, HeatmapRenderer, MarkerStyle, Palette, RangeMode,
};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "gravity-field", about = "Inverse-square potential heatmap CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Log session events to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay clicks against a session and write a PNG snapshot.
    Render {
        #[command(flatten)]
        session: SessionArgs,

        /// Palette name (magma, hot, grayscale).
        #[arg(short, long, default_value = "magma")]
        palette: String,

        /// Output pixels per grid cell (1 to 16).
        #[arg(long, default_value_t = 4)]
        scale: usize,

        /// Marker disc radius in output pixels.
        #[arg(long, default_value_t = 8.0)]
        marker_radius: f64,

        /// Fit the colour axis to each frame instead of [0, 1].
        #[arg(long)]
        fit: bool,

        /// Output file path.
        #[arg(short, long, default_value = "field.png")]
        output: PathBuf,
    },
    /// Replay clicks and summarize the sampled grid (all values with --json).
    Sample {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print a preset's scene as JSON, or save it to a file.
    Scene {
        /// Preset name (markers, saturated).
        #[arg(default_value = "markers")]
        preset: String,

        /// Write the scene here instead of printing it.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List available presets and palettes.
    List,
}

/// Where the session starts and which clicks are replayed against it.
///
/// Clicks are applied in a fixed order: every `--add`, then every
/// `--remove-near`, then every `--remove`.
#[derive(Args)]
struct SessionArgs {
    /// Preset name (markers, saturated). Ignored when --scene is given.
    #[arg(long, default_value = "markers")]
    preset: String,

    /// Scene JSON file to start from.
    #[arg(long)]
    scene: Option<PathBuf>,

    /// Scene overrides as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,

    /// Background click at X,Y (adds a source). Repeatable.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    add: Vec<DVec2>,

    /// Marker click on the source at this index. Repeatable.
    #[arg(long, value_name = "INDEX")]
    remove: Vec<usize>,

    /// Marker click at X,Y (removes the nearest source). Repeatable.
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    remove_near: Vec<DVec2>,

    /// Hit radius for --remove-near, in field units.
    #[arg(long, default_value_t = 1.5)]
    radius: f64,
}

/// Counts of what a click replay did.
#[derive(Default)]
struct Replay {
    added: usize,
    removed: usize,
    /// Marker clicks that left the set unchanged.
    refused: usize,
}

impl Replay {
    fn record(&mut self, removed: bool) {
        if removed {
            self.removed += 1;
        } else {
            self.refused += 1;
        }
    }
}

/// Parses an `X,Y` coordinate pair.
fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {s:?}"))?;
    let parse = |part: &str| {
        part.trim()
            .parse::<f64>()
            .map_err(|e| format!("bad coordinate {part:?}: {e}"))
    };
    Ok(DVec2::new(parse(x)?, parse(y)?))
}

/// Builds the heatmap renderer for `render`.
fn heatmap(
    palette: &str,
    scale: usize,
    fit: bool,
    marker_radius: f64,
) -> Result<HeatmapRenderer, CliError> {
    let palette = Palette::from_name(palette)?;
    let range = if fit {
        RangeMode::Fit
    } else {
        RangeMode::Fixed(ColorRange::unit())
    };
    let style = MarkerStyle {
        radius: marker_radius,
        ..MarkerStyle::default()
    };
    Ok(HeatmapRenderer::new(palette, range, scale)?.with_marker_style(style))
}

/// One-paragraph description of a sampled session.
fn summary(session: &FieldSession<FrameBuffer>, replay: &Replay) -> String {
    let grid = session.grid();
    let sources: Vec<String> = session
        .sources()
        .iter()
        .map(|s| format!("({}, {})", s.x(), s.y()))
        .collect();
    format!(
        "grid {}x{}, {} sources: {}\npotential min {:.6}, max {:.6}\n\
         clicks: {} added, {} removed, {} refused",
        grid.width(),
        grid.height(),
        sources.len(),
        sources.join(" "),
        grid.min(),
        grid.max(),
        replay.added,
        replay.removed,
        replay.refused,
    )
}

fn start<R: Renderer>(
    args: &SessionArgs,
    renderer: R,
) -> Result<(FieldSession<R>, Replay), CliError> {
    let params: serde_json::Value = serde_json::from_str(&args.params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;

    let scene = match &args.scene {
        Some(path) => Scene::load(path)?,
        None => Preset::from_name(&args.preset)?.scene(),
    };
    let mut session = FieldSession::new(scene.with_overrides(&params)?, renderer)?;

    let mut replay = Replay::default();
    for &coord in &args.add {
        session.on_background_click(coord)?;
        replay.added += 1;
    }
    for &coord in &args.remove_near {
        replay.record(session.on_marker_click_near(coord, args.radius)?);
    }
    for &index in &args.remove {
        replay.record(session.on_marker_click(index)?);
    }
    info!(
        added = replay.added,
        removed = replay.removed,
        refused = replay.refused,
        "clicks replayed"
    );
    Ok((session, replay))
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            let presets = Preset::list_names();
            let palettes = Palette::list_names();
            if cli.json {
                let info = serde_json::json!({
                    "presets": presets,
                    "palettes": palettes,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Presets:");
                for name in presets {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
            }
        }
        Command::Scene { preset, output } => {
            let scene = Preset::from_name(&preset)?.scene();
            match output {
                Some(path) => {
                    scene.save(&path)?;
                    if cli.json {
                        let info = serde_json::json!({
                            "preset": preset,
                            "output": path.display().to_string(),
                        });
                        println!("{}", serde_json::to_string_pretty(&info)?);
                    } else {
                        eprintln!("wrote {preset} scene -> {}", path.display());
                    }
                }
                None => println!("{}", serde_json::to_string_pretty(&scene)?),
            }
        }
        Command::Sample { session } => {
            let (session, replay) = start(&session, FrameBuffer::new())?;
            if cli.json {
                let grid = session.grid();
                let info = serde_json::json!({
                    "grid": grid.spec(),
                    "sources": session.sources(),
                    "removals_refused": replay.refused,
                    "min": grid.min(),
                    "max": grid.max(),
                    "values": grid.rows().collect::<Vec<_>>(),
                });
                println!("{}", serde_json::to_string(&info)?);
            } else {
                println!("{}", summary(&session, &replay));
            }
        }
        Command::Render {
            session,
            palette,
            scale,
            marker_radius,
            fit,
            output,
        } => {
            let renderer = heatmap(&palette, scale, fit, marker_radius)?;
            let (session, replay) = start(&session, renderer)?;
            let renderer = session.renderer();
            snapshot::save_frame(renderer, &output)?;

            let (width, height) = (renderer.width(), renderer.height());
            let sources = session.sources().len();
            if cli.json {
                let info = serde_json::json!({
                    "width": width,
                    "height": height,
                    "sources": sources,
                    "added": replay.added,
                    "removed": replay.removed,
                    "refused": replay.refused,
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {sources} sources ({width}x{height} px, {} refused) -> {}",
                    replay.refused,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
