use anyhow::Context;
use lens_catalog::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    init_tracing(&config)?;

    match config.database.clone() {
        #[cfg(feature = "postgres")]
        Some(database) => {
            let pool = create_pool(&database)
                .await
                .context("connecting to PostgreSQL")?;
            let store = PgProductStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("creating products table")?;

            info!("Using PostgreSQL product store");
            run(config, store).await
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => {
            anyhow::bail!("a database is configured but the `postgres` feature is disabled")
        }
        None => {
            warn!("No database configured, products are kept in memory");
            run(config, MemoryProductStore::new()).await
        }
    }
}

async fn run<R: ProductRepository>(config: Config, repo: R) -> anyhow::Result<()> {
    let state = AppState::new(config.clone(), repo);
    Server::new(config).serve(router(state)).await?;
    Ok(())
}
