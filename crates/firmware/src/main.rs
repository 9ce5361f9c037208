//! Pocket Player: desktop emulator entry point.
//!
//! Boot order mirrors the handheld: hardware bring-up (fatal on failure),
//! then controller init (card scan, first screen), then the ambient
//! animation. After that four loops run side by side on one thread:
//! controller, decode engine pump, ambient light and console input. The
//! process exits when the console sees `q` or end of input.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p firmware --features emulator -- --music-root ~/Music
//! ```

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use embassy_futures::select::{select4, Either4};
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::mutex::Mutex;
use firmware::emulator::{run_console, EmulatorBoard, Peripherals, TokioDelay};
use firmware::{bring_up, run_ambient, EngineCore, SimulatedEngine};
use platform::config::{APP_NAME, APP_VERSION, DEFAULT_VOLUME, MOUNT_POINT};
use platform::storage_local::LocalFile;
use platform::{StreamFormat, VolumePercent};
use playback::{Command, EngineConfig, EngineEvent, PlaybackController};
use ui::ControlRouter;

/// Queue depth for commands and engine events.
const QUEUE_DEPTH: usize = 8;

/// Command-line arguments for the emulator
#[derive(Parser, Debug)]
#[command(name = "firmware")]
#[command(about = "Pocket Player desktop emulator")]
#[command(version)]
struct Args {
    /// Host directory mounted as the card
    #[arg(long, env = "MUSIC_PATH", default_value = MOUNT_POINT)]
    music_root: PathBuf,

    /// Start-up volume (0-100)
    #[arg(long, default_value_t = DEFAULT_VOLUME, value_parser = clap::value_parser!(u8).range(0..=100))]
    volume: u8,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,

    /// Leave the LED strip dark
    #[arg(long)]
    no_ambient: bool,
}

fn init_tracing(default_filter: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(default_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(&args.log)?;
    tracing::info!(app = APP_NAME, version = APP_VERSION, "starting");

    // Steps 1-6: hardware bring-up. Any failure ends the process.
    let mut board = EmulatorBoard::new(&args.music_root, VolumePercent::new(args.volume));
    bring_up(&mut board).await.context("bring-up failed")?;
    let Peripherals {
        storage,
        sink,
        strip,
        display,
    } = board.into_parts();

    let display = Mutex::<NoopRawMutex, _>::new(display);
    let sink = Mutex::<NoopRawMutex, _>::new(sink);
    let strip = Mutex::<NoopRawMutex, _>::new(strip);
    let commands = Channel::<NoopRawMutex, Command, QUEUE_DEPTH>::new();
    let events = Channel::<NoopRawMutex, EngineEvent, QUEUE_DEPTH>::new();

    // Step 7: engine + controller. The scan never fails the boot.
    let engine_core = EngineCore::<NoopRawMutex, LocalFile>::new(EngineConfig::default());
    let engine = SimulatedEngine::new(&engine_core);
    let mut controller = PlaybackController::new(storage, engine, &display, MOUNT_POINT);
    let tracks = controller.init().await;
    tracing::info!(tracks, "controller ready");

    // Step 8: ambient light.
    let ambient = async {
        if args.no_ambient {
            tracing::info!("ambient light disabled");
            core::future::pending().await
        } else {
            run_ambient(&strip, TokioDelay).await
        }
    };

    let router = ControlRouter::new(commands.sender(), &sink);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());

    match select4(
        controller.run(commands.receiver(), events.receiver()),
        engine_core.run(&sink, events.sender(), StreamFormat::default()),
        ambient,
        run_console(stdin, &router, commands.sender(), &display),
    )
    .await
    {
        Either4::First(never) | Either4::Second(never) | Either4::Third(never) => match never {},
        Either4::Fourth(()) => {}
    }

    tracing::info!("shutting down");
    Ok(())
}
