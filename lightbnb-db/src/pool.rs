//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits taken from [`DbConfig`].

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DbConfig;
use crate::error::Result;

fn pool_options(config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout())
}

/// Create a PostgreSQL connection pool and open its first connection.
///
/// # Errors
///
/// Returns an error if the configuration is unusable or the connection fails.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::from_env()?).await?;
/// ```
pub async fn create_pool(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;
    let pool = pool_options(config).connect_with(options).await?;
    tracing::info!(
        max_connections = config.max_connections,
        "database pool connected"
    );
    Ok(pool)
}

/// Create a pool that defers connecting until the first query.
pub fn create_lazy_pool(config: &DbConfig) -> Result<PgPool> {
    let options = config.connect_options()?;
    Ok(pool_options(config).connect_lazy_with(options))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p lightbnb-db -- --ignored

    #[tokio::test]
    async fn lazy_pool_does_not_connect() {
        let config = DbConfig::default().with_url("postgres://nobody@127.0.0.1:1/none");
        let pool = create_lazy_pool(&config).expect("lazy pool");
        assert_eq!(pool.size(), 0);
        pool.close().await;
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let config = DbConfig::from_env().expect("config");
        let pool = create_pool(&config).await.expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
