mod candidates;
mod config;
mod dashboard;
mod db;
mod errors;
mod evaluation;
mod jobs;
mod llm_client;
mod mailer;
mod models;
mod rate_limit;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::dashboard::DashboardHub;
use crate::db::create_pool;
use crate::evaluation::Evaluator;
use crate::mailer::{Mailer, SmtpMailer};
use crate::rate_limit::RateLimiter;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    let store = Arc::new(PgStore::new(db));

    // Initialize Redis (rate limiting)
    let redis = redis::Client::open(config.redis_url.clone())?;
    let rate_limiter = RateLimiter::new(redis, &config.rate_limit);
    info!(
        "Rate limiter initialized ({} requests / {}s)",
        config.rate_limit.max_requests, config.rate_limit.window_secs
    );

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized (bucket: {})", config.s3_bucket);

    // Initialize text generation
    let generator = llm_client::build_generator(&config.llm);
    info!("Text generator initialized ({})", generator.describe());

    let mailer: Option<Arc<dyn Mailer>> = match &config.smtp {
        Some(smtp) => Some(Arc::new(SmtpMailer::new(smtp)?)),
        None => {
            warn!("SMTP_HOST not set, candidate contact will not send email");
            None
        }
    };

    // Build app state
    let state = AppState {
        candidates: store.clone(),
        jobs: store,
        s3,
        s3_bucket: config.s3_bucket.clone(),
        evaluator: Evaluator::new(generator),
        broadcaster: Arc::new(DashboardHub::default()),
        mailer,
        rate_limiter: Some(rate_limiter),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins to the dashboard host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "recruiter-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
