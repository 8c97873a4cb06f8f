use std::{process, sync::Arc};

use drive_service::{
    adapters::{
        repositories::{
            MemoryFileRepository, MemoryUserRepository, PgFileRepository, PgUserRepository,
        },
        router::create_router,
        state::AppState,
        view_invalidation::{RedisViewInvalidator, TracingViewInvalidator},
    },
    application::{
        repositories::{file_repository::FileRepository, user_repository::UserRepository},
        services::view_invalidator::ViewInvalidator,
    },
    domain::config::settings::{DocumentStoreProvider, Settings},
    services,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Must be installed before any AWS SDK or rustls client is built
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            process::exit(1);
        }
    };

    tracing::info!(
        "Starting drive-service (object store: {:?}, document store: {:?})",
        settings.object_store,
        settings.document_store
    );

    let (file_repository, user_repository, document_store_provider): (
        Arc<dyn FileRepository>,
        Arc<dyn UserRepository>,
        &'static str,
    ) = match settings.document_store {
        DocumentStoreProvider::Postgres => {
            let database_url = settings.database_url.as_deref().unwrap_or_default();
            tracing::info!("Connecting to PostgreSQL...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");
            (
                Arc::new(PgFileRepository::new(pool.clone())) as Arc<dyn FileRepository>,
                Arc::new(PgUserRepository::new(pool)) as Arc<dyn UserRepository>,
                "postgres",
            )
        }
        DocumentStoreProvider::Memory => {
            tracing::warn!("Using in-memory document store; records are lost on restart");
            (
                Arc::new(MemoryFileRepository::new()) as Arc<dyn FileRepository>,
                Arc::new(MemoryUserRepository::new()) as Arc<dyn UserRepository>,
                "memory",
            )
        }
    };

    let view_invalidator: Arc<dyn ViewInvalidator> = match settings.redis_url.as_deref() {
        Some(redis_url) => {
            let redis_client = redis::Client::open(redis_url)
                .expect("ERROR: Failed to create Redis client. Check REDIS_URL format.");
            let conn_manager = redis::aio::ConnectionManager::new(redis_client)
                .await
                .expect("ERROR: Failed to connect to Redis. Check REDIS_URL and network connectivity.");
            Arc::new(RedisViewInvalidator::new(conn_manager))
        }
        None => Arc::new(TracingViewInvalidator),
    };

    let object_store =
        services::create_object_store(&settings).expect("Failed to create object store");

    let app_state = AppState::new(
        object_store,
        file_repository,
        user_repository,
        view_invalidator,
        settings.capacity_bytes,
        document_store_provider,
    );

    let router = create_router(
        app_state,
        settings.max_upload_bytes,
        &settings.cors_allowed_origins,
    );

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", settings.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", settings.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}
