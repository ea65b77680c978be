//! HTTP server lifecycle: startup, serving and graceful shutdown.

use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::cache::init_entity_caches;
use crate::config::{Environment, settings::Settings};
use crate::db::{establish_async_connection_pool, run_pending_migrations};
use crate::state::AppState;

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Starts the server and runs until a shutdown signal.
    ///
    /// Startup order: optional migrations, database pool, cache backend,
    /// router, listener. A cache backend that cannot be reached does not
    /// stop startup; caching is simply disabled for the process lifetime.
    ///
    /// # Errors
    /// - Migration or pool initialization errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %Environment::from_env().as_str(),
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            "Server configuration loaded"
        );

        tracing::info!(
            max_connections = %self.settings.database.max_connections,
            min_connections = %self.settings.database.min_connections,
            connection_timeout = %self.settings.database.connection_timeout,
            auto_migrate = %self.settings.database.auto_migrate,
            "Database configuration loaded"
        );

        // Never log the token itself
        tracing::info!(
            enabled = %self.settings.cache.enabled,
            backend = ?self.settings.cache.backend,
            ttl_seconds = %self.settings.cache.ttl_seconds,
            redis_credentials = %self.settings.cache.redis.has_credentials(),
            "Cache configuration loaded"
        );

        if self.settings.database.auto_migrate {
            let applied = run_pending_migrations(&self.settings.database.url).await?;
            tracing::info!(count = applied.len(), "Pending migrations applied");
        }

        let pool = establish_async_connection_pool(&self.settings.database).await?;
        tracing::info!("Database connection pool initialized");

        let caches = init_entity_caches(&self.settings.cache).await;
        tracing::info!(
            enabled = caches.connection().is_enabled(),
            "Entity caches initialized"
        );

        let state = AppState::new(pool, caches.clone());
        let router = create_router(state);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed is
/// logged and treated as never firing.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
