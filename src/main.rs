//! Trailhead Tours API server.
//! Reads configuration from TOML file (~/.config/tours-service/config.toml).

use std::sync::Arc;

use tracing::{error, info};

use trailhead_tours::application::identity::{AuthService, PasswordResetService};
use trailhead_tours::domain::{NewUser, UserRepositoryInterface, UserRole};
use trailhead_tours::infrastructure::crypto::password::hash_password;
use trailhead_tours::infrastructure::email::{EmailSender, SmtpMailer};
use trailhead_tours::infrastructure::storage::InMemoryUserRepository;
use trailhead_tours::support::shutdown::{listen_for_shutdown_signals, ShutdownSignal};
use trailhead_tours::{create_api_router, default_config_path, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("TOURS_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Trailhead Tours API...");

    // ── Prometheus metrics recorder (must be installed before any metrics calls) ──
    let prometheus_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus metrics recorder");

    let jwt_config = app_cfg.security.jwt_config();
    info!(
        "JWT configured with {}-day token expiration",
        jwt_config.expiration_days
    );

    // ── Storage + collaborators ────────────────────────────────
    let users: Arc<dyn UserRepositoryInterface> = Arc::new(InMemoryUserRepository::new());

    let mailer: Arc<dyn EmailSender> = Arc::new(SmtpMailer::new(&app_cfg.smtp)?);

    // Create default admin user if not exists
    create_default_admin(users.as_ref(), &app_cfg).await;

    // ── Services ───────────────────────────────────────────────
    let auth_service = Arc::new(AuthService::new(users.clone(), jwt_config.clone()));
    let reset_service = Arc::new(PasswordResetService::new(
        users.clone(),
        mailer,
        jwt_config.clone(),
        app_cfg.security.reset_token_minutes,
        app_cfg.server.public_base_url.clone(),
    ));

    // ── HTTP server ────────────────────────────────────────────
    let router = create_api_router(
        users,
        jwt_config,
        auth_service,
        reset_service,
        prometheus_handle,
    );

    let shutdown = ShutdownSignal::new();
    tokio::spawn(listen_for_shutdown_signals(shutdown.clone()));

    let addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("REST API server listening on http://{}", addr);
    info!("Swagger UI available at http://{}/docs/", addr);

    let graceful = shutdown.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            graceful.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    info!("Trailhead Tours API shutdown complete");
    Ok(())
}

/// Create default admin user if the configured admin email is absent
async fn create_default_admin(users: &dyn UserRepositoryInterface, app_cfg: &AppConfig) {
    let admin_email = app_cfg.admin.email.trim().to_lowercase();

    match users.find_by_email(&admin_email).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            info!("Creating default admin user...");

            let credential_hash = match hash_password(&app_cfg.admin.password) {
                Ok(hash) => hash,
                Err(e) => {
                    error!("Failed to hash admin password: {}", e);
                    return;
                }
            };

            match users
                .create_user(NewUser {
                    name: app_cfg.admin.name.clone(),
                    email: admin_email.clone(),
                    photo: "default.jpg".to_string(),
                    role: UserRole::Admin,
                    credential_hash,
                })
                .await
            {
                Ok(_) => {
                    info!("Default admin created: {}", admin_email);
                    info!("Please change the admin password immediately!");
                }
                Err(e) => {
                    error!("Failed to create admin user: {}", e);
                }
            }
        }
        Err(e) => {
            error!("Failed to look up admin user: {}", e);
        }
    }
}
