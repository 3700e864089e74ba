use std::{net::SocketAddr, sync::Arc};

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use choral_directory::config::Config;
use choral_directory::db::{json_store::JsonStore, store::Store};
use choral_directory::routes::api_router;
use choral_directory::session::SessionStore;
use choral_directory::AppState;

#[tokio::main]
async fn main() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let config = Config::from_env();

    let store = JsonStore::open(&config.data_dir)
        .await
        .expect("Failed to prepare data directory");
    let store = Arc::new(store) as Arc<dyn Store>;
    info!("Using data directory {}", config.data_dir.display());

    let sessions = Arc::new(SessionStore::new(config.session_ttl_hours));

    let cors = CorsLayer::new()
        .allow_origin(config.frontend_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true);

    let port = config.port;
    let state = AppState {
        store,
        sessions,
        config: Arc::new(config),
    };

    let app = api_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await.unwrap();
    info!("Listening on http://{}", addr);
    axum::serve(listener, app).await.unwrap();
}
