use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use songkhla::application::ports::AudioNormalizer;
use songkhla::application::services::JobOrchestrator;
use songkhla::infrastructure::audio::{
    FfmpegNormalizer, TranscriptionEngineFactory, TranscriptionProvider,
};
use songkhla::infrastructure::observability::{TracingConfig, init_tracing};
use songkhla::infrastructure::storage::SpoolDir;
use songkhla::presentation::{
    AppState, Environment, Settings, TranscriptionProviderSetting, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let settings = Settings::load(environment)?;

    init_tracing(
        TracingConfig {
            environment: environment.to_string(),
            json_format: settings.logging.enable_json,
        },
        settings.server.port,
    );

    let spool = Arc::new(SpoolDir::new(settings.spool.dir_or_default())?);
    tracing::info!(spool = %spool.base().display(), "Spool directory ready");

    let normalizer: Arc<dyn AudioNormalizer> = Arc::new(FfmpegNormalizer::new(
        settings.normalizer.ffmpeg_binary.clone(),
        Arc::clone(&spool),
    ));

    let provider = match settings.transcription.provider {
        TranscriptionProviderSetting::Local => TranscriptionProvider::Local,
        TranscriptionProviderSetting::OpenAi => TranscriptionProvider::OpenAi,
    };
    let engine = TranscriptionEngineFactory::create(
        provider,
        &settings.transcription.whisper_binary,
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )
    .map_err(|e| anyhow::anyhow!("failed to build transcription engine: {e}"))?;

    let orchestrator = JobOrchestrator::new(
        spool,
        normalizer,
        engine,
        settings.transcription.language.clone(),
    );

    let state = AppState { orchestrator };
    let router = create_router(state, settings.server.max_upload_mb * 1024 * 1024);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
