use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use grocery_tree::{
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    middleware::{catch_panic_layer, json_error_middleware},
    routes::router,
    state::AppState,
};

#[tokio::main]
async fn main() {
    // no subscriber exists until the config is read
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config: {err:?}");
            std::process::exit(1);
        }
    };
    init_tracing(&cfg.logging.rust_log);

    if let Err(err) = run(cfg).await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let store = connection::open_store(cfg.database.as_ref()).await?;
    let state = AppState::new(cfg, store);

    let app = Router::new()
        .merge(router(Arc::clone(&state)))
        .layer(middleware::from_fn(json_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = state
        .config
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid host/port: {}", state.config.bind_addr()))?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
