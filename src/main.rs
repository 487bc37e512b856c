use std::net::SocketAddr;
use std::sync::Arc;

use shopfront::{
    config::{get_config, init_config},
    database::{pool::create_pool, MySqlStore},
    middleware::cors::session_cors,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_config()?;
    let config = get_config();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.production {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let pool = create_pool(&config.database).await?;
    info!(
        host = %config.database.host,
        database = %config.database.name,
        "connected to the database"
    );

    let app_state = AppState::new(Arc::new(MySqlStore::new(pool)), config.session());

    let app = routes::router(app_state)
        .layer(session_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address().parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
