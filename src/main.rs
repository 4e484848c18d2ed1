use campus_access_api::{app, config, store};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, PORT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("Starting campus access API in {:?} mode", config.environment);

    let store = store::init(config)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize document store: {}", e));

    let app = app(store);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("Campus access API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
