use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use threadnote_api::config::ServerConfig;
use threadnote_api::router::build_app_router;
use threadnote_api::state::AppState;
use threadnote_labeler::LabelerApi;
use threadnote_mail::MailApi;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadnote_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = threadnote_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    threadnote_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    threadnote_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    let mail = MailApi::new(config.mail.clone()).expect("Failed to build mail API client");
    let labeler =
        LabelerApi::new(config.labeler.clone()).expect("Failed to build completion API client");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mail: Arc::new(mail),
        labeler: Arc::new(labeler),
    };

    let app = build_app_router(state);

    let addr = SocketAddr::new(config.host.parse().expect("Invalid HOST"), config.port);
    tracing::info!("Starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
