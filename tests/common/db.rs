use sqlx::any::AnyPoolOptions;
use sqlx::AnyPool;

pub async fn connect(connection_string: &str) -> AnyPool {
    sqlx::any::install_default_drivers();

    AnyPoolOptions::new()
        .max_connections(1)
        .connect(connection_string)
        .await
        .unwrap()
}

pub async fn insert(pool: &AnyPool, placeholder: &str, n: i32) {
    let sql = format!("INSERT INTO example (id) VALUES ({})", placeholder);
    let result = sqlx::query(&sql).bind(n).execute(pool).await.unwrap();

    assert_eq!(result.rows_affected(), 1);
}

pub async fn query(pool: &AnyPool) -> Vec<i32> {
    sqlx::query_scalar("SELECT id FROM example")
        .fetch_all(pool)
        .await
        .unwrap()
}
