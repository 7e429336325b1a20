use clap::Parser;
use nusantara_lens::pipeline::FixtureCapabilities;
use nusantara_lens::{
    AnalysisOrchestrator, AnalysisRequest, AppError, Configuration, DeadlineAnalyzer,
    StreamingProgressReporter,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_stream::StreamExt;
use tracing::{Level, info};

/// Analyze a photo of an Indonesian cultural object.
#[derive(Parser, Debug)]
#[command(name = "nusantara-lens", version, about)]
struct Args {
    /// Photo to analyze
    image: PathBuf,

    /// JSON file scripting the vision, OCR, search and completion answers
    #[arg(long)]
    fixture: PathBuf,

    /// Optional TOML/JSON/YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print one JSON progress event per line instead of the final report
    #[arg(long)]
    stream: bool,
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();
    let configuration = Configuration::load(args.config.as_deref())?;
    init_logging(configuration.log_level());

    let capabilities = Arc::new(FixtureCapabilities::load(&args.fixture).await?);
    let orchestrator = Arc::new(
        AnalysisOrchestrator::builder()
            .capabilities(capabilities)
            .configuration(&configuration)
            .build()?,
    );
    let request = AnalysisRequest::from_path(&args.image)?;
    info!("Analyzing {} as {}", args.image.display(), request.request_id());

    if args.stream {
        let reporter = StreamingProgressReporter::new(orchestrator).with_configuration(&configuration);
        let mut events = reporter.stream(request);
        while let Some(event) = events.next().await {
            println!("{}", serde_json::to_string(&event)?);
        }
        return Ok(());
    }

    let analyzer = DeadlineAnalyzer::builder(orchestrator)
        .configuration(&configuration)
        .build();
    let report = analyzer.analyze(request).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
