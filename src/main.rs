use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use talentmarket::catalog::{Catalog, CandidateSource, FixtureSource};
use talentmarket::config::Config;
use talentmarket::state::AppState;
use talentmarket::upstream::{ProfileClient, UpstreamSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("talentmarket=info,tower_http=info")),
        )
        .init();

    let config = Config::parse();

    let upstream = match &config.upstream_url {
        Some(url) => Some(ProfileClient::new(url.clone())?),
        None => None,
    };

    let source: Box<dyn CandidateSource> = match (&upstream, config.load_from_upstream) {
        (Some(client), true) => Box::new(UpstreamSource {
            client: client.clone(),
        }),
        _ => Box::new(FixtureSource {
            path: config.candidate_file.clone(),
        }),
    };
    let catalog = Catalog::load(source.as_ref()).await;

    let state = Arc::new(AppState::new(catalog, upstream));
    if let Some(token) = &config.bootstrap_token {
        state.sessions.insert_raw("bootstrap", token);
        tracing::info!("Bootstrap token registered");
    }

    let app = talentmarket::app(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!("Listening on {}", config.listen_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
