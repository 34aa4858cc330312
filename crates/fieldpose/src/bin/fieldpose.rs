use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use fieldpose::{
    FieldPoseConfig, FieldPoseError, FieldPoseIoError, PipelineId, ReplayInput, ReplayReport,
    VisionReading,
};
use log::{info, LevelFilter};
#[cfg(feature = "tracing")]
use tracing_log::LogTracer;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fieldpose",
    version,
    about = "Vision target acquisition and field pose estimation"
)]
struct Cli {
    /// Default log level; `RUST_LOG` overrides it. Per-tick scan and pose
    /// records are logged at `debug`/`trace`.
    #[arg(long, global = true, default_value = "warn", value_parser = parse_level)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one tick per recorded frame and write the tick reports as JSON.
    Replay {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        frames: PathBuf,
        /// Report path; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Compute one pose estimate from explicit sensor values.
    Estimate {
        #[arg(long)]
        config: PathBuf,
        #[arg(long)]
        pipeline: u8,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        tx: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        ty: f64,
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        ts: f64,
        /// Treat the reading as "no target".
        #[arg(long)]
        invalid: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr; stdout carries only JSON reports.
fn init_logging(level: LevelFilter) {
    #[cfg(not(feature = "tracing"))]
    {
        let _ = env_logger::Builder::new()
            .filter_level(level)
            .parse_default_env()
            .format_timestamp_millis()
            .try_init();
    }
    #[cfg(feature = "tracing")]
    {
        let _ = LogTracer::init();
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.as_str().to_ascii_lowercase()));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
}

fn parse_level(raw: &str) -> Result<LevelFilter, String> {
    raw.parse::<LevelFilter>()
        .map_err(|_| format!("invalid log level `{raw}`"))
}

fn run(command: Command) -> Result<(), FieldPoseError> {
    match command {
        Command::Replay {
            config,
            frames,
            output,
        } => {
            let cfg = FieldPoseConfig::load_json(&config)?;
            let input = ReplayInput::load_json(&frames)?;
            let ticks = input.replay(&cfg)?;
            let report = ReplayReport::new(&config, &frames, ticks);
            match output {
                Some(path) => {
                    report.write_json(&path)?;
                    info!("wrote {}", path.display());
                }
                None => println!("{}", report.to_json()?),
            }
        }
        Command::Estimate {
            config,
            pipeline,
            tx,
            ty,
            ts,
            invalid,
        } => {
            let engine = FieldPoseConfig::load_json(&config)?.build_engine()?;
            let pipeline = PipelineId::try_from(pipeline)?;
            let reading = VisionReading::new(tx, ty, ts, !invalid);
            let estimate = engine.estimate(pipeline, &reading);
            let json = serde_json::to_string_pretty(&estimate).map_err(FieldPoseIoError::from)?;
            println!("{json}");
        }
    }
    Ok(())
}
