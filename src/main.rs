//! SpaceCRAFT - Astro Pi data in Minecraft
//!
//! Reads Astro Pi sensor logs and shows them in a running Minecraft Pi game.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use futures_util::StreamExt;
use spacecraft::{
    input, world::anchor_near_player, AstroPiDataReader, AstroPiDataWriter, InMemoryWorld,
    JoystickState, McpiConnection, Orientation, SceneComposer, SceneConfig, SensorReading, World,
    WorldConfig, DEFAULT_MCPI_PORT, DEFAULT_REPLAY_INTERVAL_MS,
};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "spacecraft")]
#[command(about = "🚀 SpaceCRAFT - Astro Pi data in Minecraft")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Read Astro Pi sensor logs and display them in Minecraft Pi")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Host running Minecraft Pi
    #[arg(long, default_value = "localhost", global = true)]
    host: String,

    /// Minecraft Pi API port
    #[arg(short, long, default_value_t = DEFAULT_MCPI_PORT, global = true)]
    port: u16,

    /// Scene configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every row of a sensor log
    Read(ReadArgs),

    /// Write a synthetic sensor log
    Generate(GenerateArgs),

    /// Show two scripted readings, then clear the scene
    Demo(DemoArgs),

    /// Push every row of a sensor log into the scene
    Replay(ReplayArgs),
}

#[derive(Args)]
struct ReadArgs {
    /// The input filename
    file: PathBuf,

    /// Output format: plain or json
    #[arg(short, long, default_value = "plain")]
    format: String,
}

#[derive(Args)]
struct GenerateArgs {
    /// The output filename
    file: PathBuf,

    /// Number of rows to write
    #[arg(short, long, default_value_t = 100)]
    rows: u32,
}

#[derive(Args)]
struct DemoArgs {
    /// Seconds to hold each reading
    #[arg(long, default_value_t = 10)]
    hold: u64,

    /// Draw into an in-memory world instead of connecting to Minecraft
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ReplayArgs {
    /// The input filename
    file: PathBuf,

    /// Milliseconds between rows
    #[arg(short, long, default_value_t = DEFAULT_REPLAY_INTERVAL_MS)]
    interval: u64,

    /// Draw into an in-memory world instead of connecting to Minecraft
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    init_logging(&cli)?;

    match &cli.command {
        Commands::Read(args) => read_command(args),
        Commands::Generate(args) => generate_command(args),
        Commands::Demo(args) => {
            print_banner();
            demo_command(&cli, args).await
        }
        Commands::Replay(args) => {
            print_banner();
            replay_command(&cli, args).await
        }
    }
}

fn log_level(cli: &Cli) -> Level {
    if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    }
}

/// `RUST_LOG` when set, otherwise the level picked on the command line.
fn log_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(log_filter(log_level(cli)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

fn print_banner() {
    println!("🚀 SpaceCRAFT - Astro Pi data in Minecraft");
    println!("   Version: {}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn scene_config(cli: &Cli) -> anyhow::Result<SceneConfig> {
    match &cli.config {
        Some(path) => {
            info!("Loading scene configuration from {}", path.display());
            Ok(SceneConfig::from_json_file(path)?)
        }
        None => Ok(SceneConfig::default()),
    }
}

/// Connect to the game, or stand up an in-memory world for a dry run.
fn open_world(cli: &Cli, dry_run: bool) -> anyhow::Result<Box<dyn World>> {
    if dry_run {
        info!("Dry run: drawing into an in-memory world");
        return Ok(Box::new(InMemoryWorld::new()));
    }
    let config = WorldConfig::new(&cli.host, cli.port);
    let mc = McpiConnection::connect(&config)
        .with_context(|| format!("Is Minecraft Pi running on {}?", config.address()))?;
    Ok(Box::new(mc))
}

fn build_scene(cli: &Cli, dry_run: bool) -> anyhow::Result<SceneComposer<Box<dyn World>>> {
    let config = scene_config(cli)?;
    let mut world = open_world(cli, dry_run)?;
    let anchor = anchor_near_player(&mut world)?;
    info!("Scene anchor: {}", anchor);
    world.post_to_chat("SpaceCRAFT - Astro Pi data in Minecraft")?;
    Ok(SceneComposer::new(world, anchor, config)?)
}

fn read_command(args: &ReadArgs) -> anyhow::Result<()> {
    let reader = AstroPiDataReader::open(&args.file)?;

    match args.format.as_str() {
        "plain" => {
            for reading in &reader {
                println!("{}", reading.to_line());
            }
        }
        "json" => {
            for reading in &reader {
                println!("{}", serde_json::to_string(reading)?);
            }
        }
        other => bail!("Unsupported format: {}. Use 'plain' or 'json'", other),
    }

    Ok(())
}

fn generate_command(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut writer = AstroPiDataWriter::create(&args.file)?;
    for step in 0..args.rows {
        writer.write(&SensorReading::simulated(step))?;
    }
    writer.flush()?;
    println!("Wrote {} rows to {}", writer.rows_written(), args.file.display());
    Ok(())
}

async fn demo_command(cli: &Cli, args: &DemoArgs) -> anyhow::Result<()> {
    let mut scene = build_scene(cli, args.dry_run)?;
    let hold = Duration::from_secs(args.hold);

    let result = tokio::select! {
        result = run_demo(&mut scene, hold) => result,
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted");
            Ok(())
        }
    };

    scene.clear()?;
    result
}

async fn run_demo(
    scene: &mut SceneComposer<Box<dyn World>>,
    hold: Duration,
) -> anyhow::Result<()> {
    let now = chrono::Local::now().naive_local();

    let calm = SensorReading {
        time: now,
        cpu_temperature: 40.0,
        temperature_from_humidity: 30.0,
        humidity: 40.0,
        pressure: 1000.0,
        orientation_degrees: Orientation::default(),
        orientation_radians: Orientation::default(),
        ..SensorReading::simulated(0)
    };
    info!("Showing calm reading");
    scene.update(&calm, JoystickState::IDLE)?;
    tokio::time::sleep(hold).await;

    let tilted_degrees = Orientation::new(45.0, 0.0, 45.0);
    let tilted = SensorReading {
        time: chrono::Local::now().naive_local(),
        cpu_temperature: 45.0,
        temperature_from_humidity: 20.0,
        humidity: 30.0,
        pressure: 1050.0,
        orientation_degrees: tilted_degrees,
        orientation_radians: tilted_degrees.to_radians(),
        ..calm
    };
    info!("Showing tilted reading with every button pressed");
    scene.update(&tilted, JoystickState::ALL)?;
    tokio::time::sleep(hold).await;

    Ok(())
}

async fn replay_command(cli: &Cli, args: &ReplayArgs) -> anyhow::Result<()> {
    let reader = AstroPiDataReader::open(&args.file)?;
    if reader.row_count() == 0 {
        warn!("{} has no rows to replay", args.file.display());
        return Ok(());
    }

    let mut scene = build_scene(cli, args.dry_run)?;
    let mut joystick = input::default_provider()?;
    let mut stream = reader.replay(args.interval);
    info!(
        "Replaying {} rows every {}ms",
        reader.row_count(),
        args.interval
    );

    let result: anyhow::Result<()> = async {
        loop {
            let reading = tokio::select! {
                next = stream.next() => match next {
                    Some(reading) => reading,
                    None => break,
                },
                _ = tokio::signal::ctrl_c() => {
                    warn!("Interrupted");
                    break;
                }
            };
            let buttons = joystick.read_joystick()?;
            scene.update(&reading, buttons)?;
        }
        Ok(())
    }
    .await;

    scene.clear()?;
    result
}
