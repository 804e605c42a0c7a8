#[tokio::main]
async fn main() {
    gatherly_observability::init();

    let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
        tracing::warn!("JWT_SECRET not set; using insecure dev default");
        "dev-secret".to_string()
    });
    let addr = std::env::var("GATHERLY_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let app = gatherly_api::app::build_app(jwt_secret.as_bytes());

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
