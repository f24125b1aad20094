//! Lumina pipeline runner binary.
//!
//! Usage: `lumina <job.json>`

use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lumina_client::GenerationClient;
use lumina_studio::{LogFormat, PipelineJob, Session, StudioConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = StudioConfig::from_env().context("Failed to load configuration")?;
    init_tracing(config.log_format)?;

    info!("Starting lumina");
    info!("Service config: {:?}", config.service);

    let Some(manifest) = std::env::args().nth(1) else {
        bail!("usage: lumina <job.json>");
    };

    let client = GenerationClient::new(config.service).context("Failed to create service client")?;
    if let Err(e) = client.health_check().await {
        warn!("Generation service health check failed: {}", e);
    }

    let job = PipelineJob::load(&manifest).await?;
    let session = Session::new(Arc::new(client));

    match job.run(&session).await {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            info!(session_id = %session.id(), "Pipeline finished");
            Ok(())
        }
        Err(e) => {
            error!(session_id = %session.id(), status = %session.status(), "Pipeline failed: {}", e);
            bail!(e.user_message())
        }
    }
}

fn init_tracing(format: LogFormat) -> anyhow::Result<()> {
    let env_filter = EnvFilter::from_default_env()
        .add_directive("lumina=info".parse()?)
        .add_directive("hyper=warn".parse()?);

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_writer(std::io::stderr),
            )
            .with(env_filter)
            .init(),
    }
    Ok(())
}
