use stockbook_store::Database;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    stockbook_api::telemetry::init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:stockbook.db".to_string());
    let db = Database::connect(&database_url).await?;
    db.migrate().await?;
    db.seed_demo().await?;

    let app = stockbook_api::app::build_app(db);

    let addr = std::env::var("STOCKBOOK_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
