use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use irregular::constants::ClassRegistry;
use irregular::context::WebContext;
use irregular::listener::ConstantListener;
use irregular::view::ViewRegistry;
use irregular::{config, logger, server};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config file path (without extension) from the first argument
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config".to_string());
    let cfg = config::Config::load_from(&config_path)?;
    logger::init(&cfg).map_err(|e| e.to_string())?;

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: config::Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = ClassRegistry::with_builtin();
    if let Some(catalog) = &cfg.context.catalog_file {
        let count = registry.load_catalog(catalog)?;
        logger::log_catalog_loaded(catalog, count, registry.len());
    }

    // Constants are published before the first request can arrive
    let context = Arc::new(WebContext::with_constant_classes(
        cfg.context.constant_class_name.as_deref(),
    ));
    let constant_listener = ConstantListener::new(registry);
    constant_listener.context_initialized(&context)?;

    let app_addr = cfg.get_socket_addr()?;
    let app_listener = server::create_reusable_listener(app_addr)?;
    let state = Arc::new(config::AppState::new(
        &cfg,
        Arc::clone(&context),
        ViewRegistry::with_builtin(),
    ));
    let app_connections = Arc::new(AtomicUsize::new(0));

    let signals = Arc::new(server::SignalHandler::new());
    server::start_signal_handler(Arc::clone(&signals));

    logger::log_server_start(&app_addr, &cfg);

    // Use LocalSet for spawn_local support
    let local = tokio::task::LocalSet::new();
    let result = local
        .run_until(server::start_server_loop(
            app_listener,
            state,
            app_connections,
            Arc::clone(&signals.shutdown),
        ))
        .await;

    constant_listener.context_destroyed(&context);
    result
}
