//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors; request errors go through
//! `kernel::error::AppError`.

use std::net::SocketAddr;
use std::sync::Arc;

use api::config::ApiConfig;
use api::{Backends, clear_expired_reset_tokens, cors_layer};
use auth::{InMemoryUserRepository, MailNotifier, PgUserRepository};
use orders::{
    InMemoryOrderRepository, InMemoryProductCatalog, OrderConfig, PgOrderRepository,
    PgProductCatalog,
};
use platform::clock::{Clock, SystemClock};
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,orders=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let notifier = Arc::new(match &config.smtp {
        Some(settings) => MailNotifier::smtp(settings)?,
        None if cfg!(debug_assertions) => {
            tracing::info!("SMTP not configured, reset links will be logged");
            MailNotifier::Log
        }
        None => {
            tracing::warn!("SMTP not configured, password reset mails cannot be sent");
            MailNotifier::Unconfigured
        }
    });

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let auth_config = Arc::new(config.auth.clone());
    let order_config = Arc::new(OrderConfig::default());

    let router = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("../../../database/migrations")
                .run(&pool)
                .await?;
            tracing::info!("Migrations completed");

            let users = Arc::new(PgUserRepository::new(pool.clone()));
            clear_expired_reset_tokens(users.as_ref(), clock.as_ref()).await;

            let backends = Backends {
                users,
                notifier,
                orders: Arc::new(PgOrderRepository::new(pool.clone())),
                catalog: Arc::new(PgProductCatalog::new(pool)),
            };
            api::app(backends, auth_config, order_config, clock)
        }
        None if cfg!(debug_assertions) => {
            tracing::warn!("DATABASE_URL not set, using the in-memory store; data is lost on exit");
            let backends = Backends {
                users: Arc::new(InMemoryUserRepository::new()),
                notifier,
                orders: Arc::new(InMemoryOrderRepository::new()),
                catalog: Arc::new(InMemoryProductCatalog::new()),
            };
            api::app(backends, auth_config, order_config, clock)
        }
        None => anyhow::bail!("DATABASE_URL must be set in production"),
    };

    let app = router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.frontend_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
