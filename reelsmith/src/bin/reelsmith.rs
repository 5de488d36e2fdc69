use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use clap::Parser;
use reelsmith::config::AgentConfig;
use reelsmith::core::JobState;
use reelsmith::events::LoggingEventSink;
use reelsmith::job::JobRunner;
use reelsmith::observability::{init_tracing, LogFormat};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "reelsmith")]
#[command(about = "Turn a video description into a staged preview image")]
#[command(version)]
struct Cli {
    /// Video description
    prompt: String,

    /// JSON configuration file; flags override its values
    #[arg(long, env = "REELSMITH_CONFIG")]
    config: Option<PathBuf>,

    /// Delay before each stage, in milliseconds
    #[arg(long, env = "REELSMITH_STAGE_DELAY_MS")]
    delay_ms: Option<u64>,

    /// Canvas width in pixels
    #[arg(long, env = "REELSMITH_WIDTH")]
    width: Option<u32>,

    /// Canvas height in pixels
    #[arg(long, env = "REELSMITH_HEIGHT")]
    height: Option<u32>,

    /// Write the preview PNG here
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Log output format
    #[arg(long, env = "REELSMITH_LOG_FORMAT", default_value = "pretty")]
    log_format: Format,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Format {
    Pretty,
    Json,
}

impl From<Format> for LogFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Pretty => LogFormat::Pretty,
            Format::Json => LogFormat::Json,
        }
    }
}

fn load_config(cli: &Cli) -> Result<AgentConfig> {
    let mut config = match &cli.config {
        Some(path) => AgentConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if let Some(ms) = cli.delay_ms {
        config = config.with_stage_delay(Duration::from_millis(ms));
    }
    let width = cli.width.unwrap_or(config.canvas_width);
    let height = cli.height.unwrap_or(config.canvas_height);
    config = config.with_canvas(width, height);
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing("info", cli.log_format.into());

    let config = load_config(&cli)?;
    let runner = JobRunner::new(config).with_event_sink(Arc::new(LoggingEventSink::debug()));
    let mut handle = runner.submit(cli.prompt.clone());

    let mut printed = 0;
    loop {
        tokio::select! {
            update = handle.next_update() => {
                let Some(snapshot) = update else { break };
                for line in snapshot.log_lines().iter().skip(printed) {
                    println!("{line}");
                }
                printed = snapshot.logs.len();
            }
            _ = tokio::signal::ctrl_c(), if !handle.is_cancelled() => {
                handle.cancel();
            }
        }
    }

    let job = handle.wait().await?;
    match job.state {
        JobState::Completed => {}
        JobState::Rejected => bail!("prompt rejected"),
        JobState::Aborted => bail!("cancelled at {}%", job.progress),
        JobState::Running => bail!("job ended while still running"),
    }

    if let (Some(path), Some(artifact)) = (&cli.output, &job.artifact) {
        let Some(payload) = artifact.data_uri.strip_prefix("data:image/png;base64,") else {
            bail!("no image was rendered");
        };
        let png = general_purpose::STANDARD
            .decode(payload)
            .context("artifact payload is not valid base64")?;
        std::fs::write(path, png).with_context(|| format!("failed to write {}", path.display()))?;
        println!("Preview written to {} ({})", path.display(), artifact.theme);
    }

    Ok(())
}
