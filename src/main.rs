use std::net::SocketAddr;
use std::sync::Arc;

use taskmaster_server::{
    app_state::AppState, data_access::data_context::DataContext, map_routes, settings::Settings,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // ── Settings & store ───────────────────────────────────────
    let settings = Settings::load().expect("Failed to load settings");

    let data_context =
        DataContext::new(&settings.database_path).expect("Failed to open database");

    if data_context
        .ensure_default_user(&settings)
        .expect("Failed to seed default user")
    {
        info!("Created default superuser {}", settings.default_admin_username);
    }

    let addr: SocketAddr = format!("{}:{}", settings.tcp_socket_binding, settings.tcp_socket_port)
        .parse()
        .expect("Invalid socket binding in settings");

    // ── Shared state & router ──────────────────────────────────
    let state = Arc::new(AppState { data_context, settings });

    let app = map_routes(state).layer(
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    );

    // ── Start ──────────────────────────────────────────────────
    info!("Server running on http://{addr}");
    info!("  Login: POST http://{addr}/api/auth/login");
    info!("  Tasks: http://{addr}/api/tasks");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app).await.expect("Server error");
}
