use roster_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    tracing::info!("  GET /students - List students");
    tracing::info!("  GET /classrooms - List classrooms");
    tracing::info!("  GET /classrooms/{{id}} - Classroom with supplies and students");
    tracing::info!("  GET /health - Health check");
    tracing::info!("  GET /ready - Readiness check");

    #[cfg(feature = "database")]
    if let Some(database) = config.database.clone() {
        let pool = create_pool(&database).await?;
        let state = AppState::new(config.clone(), PgRoster::new(pool));
        return Server::new(config).serve(router(state)).await;
    }

    tracing::warn!("No database configured, serving the built-in sample roster");
    let state = AppState::new(config.clone(), InMemoryRoster::sample());
    Server::new(config).serve(router(state)).await
}
