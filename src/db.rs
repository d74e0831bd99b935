use sqlx::MySqlPool;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPool::connect(database_url).await?;
    tracing::info!("Database pool ready");
    Ok(pool)
}
