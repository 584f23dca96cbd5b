use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(&ENV.database_url)
        .await?;

    sqlx::migrate!().run(&pool).await.map_err(|e| {
        log::error!("Migration failed: {:?}", e);
        error::SystemError::DatabaseError(e.to_string().into())
    })?;

    Ok(pool)
}
