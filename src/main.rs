use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wazir_backoffice::config::{Config, DatabaseConfig};
use wazir_backoffice::middleware::RequestId;
use wazir_backoffice::modules::auth::TokenService;
use wazir_backoffice::modules::submissions::SmtpMailer;
use wazir_backoffice::startup::{self, AppState, Repositories};

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wazir_backoffice=debug,actix_web=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    init_tracing(config.json_logs());
    config.validate().context("Configuration validation failed")?;

    tracing::info!("Starting Wazir Glass back office");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    // Create database connection pool
    let db_pool = config
        .database
        .create_pool()
        .await
        .context("Failed to create database pool")?;

    tracing::info!(
        "Database pool initialized ({} connections)",
        config.database.pool_size
    );

    DatabaseConfig::migrate(&db_pool)
        .await
        .context("Failed to run database migrations")?;

    let mailer = SmtpMailer::new(&config.mail).context("Failed to configure SMTP relay")?;
    let tokens = TokenService::new(
        &config.security.jwt_secret,
        config.security.token_expiry_days,
    );

    let state = AppState::new(
        Repositories::mysql(db_pool.clone()),
        Arc::new(mailer),
        tokens,
        config.security.rate_limit_per_minute,
    );

    if let Some(admin) = &config.admin {
        state
            .auth
            .ensure_admin(&admin.username, &admin.password)
            .await
            .context("Failed to bootstrap admin account")?;
    }

    // Start HTTP server
    let bind_address = config.server.bind_address();
    let allowed_origin = config.security.cors_allowed_origin.clone();
    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(allowed_origin.as_deref()))
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .app_data(actix_web::web::Data::new(db_pool.clone()))
            .configure(|cfg| startup::configure(cfg, &state))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await.context("Server terminated with an error")
}
