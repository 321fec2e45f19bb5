use inmokit_auth::AuthConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    inmokit_observability::init();

    // Missing or invalid auth configuration is fatal: refuse to serve
    // rather than fall back to an insecure default.
    let config = AuthConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, "auth configuration is invalid; refusing to start");
    })?;

    let app = inmokit_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
