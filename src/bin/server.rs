use std::{fs::OpenOptions, net::SocketAddr, path::PathBuf, sync::Arc};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use outlay_rs::{AppState, JsonStore, build_router, graceful_shutdown};

/// The web server for outlay_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The address and port to serve the app from.
    #[arg(long, default_value = "0.0.0.0:3000")]
    address: SocketAddr,

    /// File path to the ledger JSON file. Created on the first save if it
    /// does not exist.
    #[arg(long, default_value = "outlay.json")]
    data_file: PathBuf,

    /// The timezone to use for dates as a canonical timezone name, e.g.
    /// "Pacific/Auckland".
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Directory to write the debug log file to. Disables the debug log file
    /// when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(args.log_dir.as_deref());

    let store = JsonStore::new(args.data_file);
    let app_state =
        AppState::new(store, &args.timezone).expect("Could not load the ledger file.");

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(app_state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", args.address);
    axum_server::bind(args.address)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("Could not serve the app.");
}

fn setup_logging(log_dir: Option<&std::path::Path>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(env_filter);

    let debug_log = log_dir.map(|log_dir| {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("debug.log"))
            .expect("Could not create log file");

        tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(Arc::new(log_file))
            .with_filter(filter::LevelFilter::DEBUG)
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
