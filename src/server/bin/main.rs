use anyhow::Result;
use sqlx::sqlite::SqlitePool;
use warp::Filter;

use timereport::api;
use timereport::db;
use timereport::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = telemetry::get_subscriber("timereport".into(), "info".into());
    telemetry::init_subscriber(subscriber);

    let pool = db::setup_pool().await?;
    db::setup_db(&pool).await?;
    run(pool).await;

    Ok(())
}

async fn run(pool: SqlitePool) {
    let routes = api::routes(pool).recover(api::handle_rejection);

    warp::serve(routes).run(([0, 0, 0, 0], 3333)).await;
}
