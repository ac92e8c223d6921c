mod app;
mod config;
mod error;
mod handlers;

use std::process;
use std::sync::Arc;

use axum::Router;
use clap::Parser;

use violence_detect_core::classification::domain::classifier::Classifier;
use violence_detect_core::classification::domain::predictor::Predictor;
use violence_detect_core::classification::infrastructure::onnx_classifier::OnnxClassifier;
use violence_detect_core::pipeline::classification_service::VideoClassificationService;
use violence_detect_core::shared::model_resolver;
use violence_detect_core::upload::infrastructure::local_upload_store::LocalUploadStore;
use violence_detect_core::video::domain::video_reader::VideoReader;
use violence_detect_core::video::infrastructure::ffmpeg_reader::FfmpegReader;

use app::{create_router, AppState};
use config::Cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli.validate()?;

    // A model that fails to load must exit before the port is bound
    let predictor = Arc::new(build_predictor(&cli)?);
    let uploads = LocalUploadStore::new(&cli.upload_dir, cli.allowed_extensions())?;
    let service = VideoClassificationService::new(
        Box::new(uploads),
        predictor,
        Box::new(|| Box::new(FfmpegReader::new()) as Box<dyn VideoReader>),
        cli.extraction_settings(),
    );

    let state = AppState {
        service: Arc::new(service),
    };
    let router = create_router(state, cli.max_upload_bytes());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(serve(&cli.bind_address(), router))
}

fn build_predictor(cli: &Cli) -> Result<Predictor, Box<dyn std::error::Error>> {
    log::info!("Resolving model: {}", cli.model.display());
    let model_path = model_resolver::resolve(&cli.model, cli.model_url.as_deref())?;

    let settings = cli.extraction_settings();
    let (width, height) = (settings.target_width, settings.target_height);
    let predictor = Predictor::new(Box::new(move || {
        let classifier = OnnxClassifier::load(&model_path, width, height)?;
        Ok(Box::new(classifier) as Box<dyn Classifier>)
    }));
    predictor.load()?;

    log::info!(
        "Model ready: input {width}x{height}, {} channel order, every {} frame(s), up to {}",
        settings.channel_order,
        settings.stride,
        settings.max_frames
    );
    Ok(predictor)
}

async fn serve(address: &str, router: Router) -> Result<(), Box<dyn std::error::Error>> {
    let listener = tokio::net::TcpListener::bind(address).await?;
    log::info!("Listening on http://{address}");
    axum::serve(listener, router).await?;
    Ok(())
}
