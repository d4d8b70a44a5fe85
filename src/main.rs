use std::sync::Arc;
use tokio::sync::Notify;

mod config;
mod error;
mod handler;
mod http;
mod logger;
mod routing;
mod server;

#[cfg(test)]
mod test_support;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = config::Config::load()?;
    logger::init(&cfg)?;

    // Build the Tokio runtime, sized by server.workers when set
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let routes = routing::load_routes(&cfg.mocks.root, &cfg.mocks.marker).map_err(|e| {
        logger::log_error(&format!("Failed to load mocks: {e}"));
        e
    })?;
    if routes.is_empty() {
        logger::log_warning(&format!(
            "No endpoints found under {}",
            cfg.mocks.root.display()
        ));
    }

    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    logger::log_server_start(&addr, &cfg, &routes);
    if cfg.logging.show_routes {
        logger::log_route_table(&routes);
    }

    let shutdown = Arc::new(Notify::new());
    server::signal::start_signal_handler(Arc::clone(&shutdown))?;

    let state = Arc::new(config::AppState::new(cfg, routes));
    server::serve(listener, state, shutdown).await;

    Ok(())
}
