use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use dotenv::dotenv;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Employee {
    pub id: Option<i64>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Project {
    pub id: Option<i64>,
    pub name: String,
}

/// One logged work interval for an employee on a project. `time_from < time_to`
/// is assumed to hold when a record is written; the report queries do not
/// re-check it.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct TimeRecord {
    pub id: Option<i64>,
    pub employee_id: i64,
    pub project_id: i64,
    pub time_from: NaiveDateTime,
    pub time_to: NaiveDateTime,
}

pub async fn setup_pool() -> Result<SqlitePool> {
    dotenv().ok();
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL env var must be set!")?;
    let options = SqliteConnectOptions::from_str(&db_url)?.create_if_missing(true);

    Ok(SqlitePoolOptions::new().connect_with(options).await?)
}

pub async fn setup_db(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS employee(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS project(
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS time_record(
            id INTEGER PRIMARY KEY,
            employee_id INTEGER NOT NULL REFERENCES employee(id),
            project_id INTEGER NOT NULL REFERENCES project(id),
            time_from TEXT NOT NULL,
            time_to TEXT NOT NULL)",
    )
    .execute(pool)
    .await?;

    Ok(())
}

pub async fn write_employee(pool: &SqlitePool, employee: &Employee) -> Result<i64> {
    let result = sqlx::query("INSERT INTO employee(name) VALUES(?)")
        .bind(&employee.name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn read_employee(pool: &SqlitePool, id: i64) -> Result<Employee> {
    Ok(
        sqlx::query_as::<_, Employee>("SELECT id, name FROM employee WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn write_project(pool: &SqlitePool, project: &Project) -> Result<i64> {
    let result = sqlx::query("INSERT INTO project(name) VALUES(?)")
        .bind(&project.name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

pub async fn read_project(pool: &SqlitePool, id: i64) -> Result<Project> {
    Ok(
        sqlx::query_as::<_, Project>("SELECT id, name FROM project WHERE id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?,
    )
}

pub async fn write_time_record(pool: &SqlitePool, record: &TimeRecord) -> Result<i64> {
    let result = sqlx::query(
        "INSERT INTO time_record(employee_id, project_id, time_from, time_to)
        VALUES(?, ?, ?, ?)",
    )
    .bind(record.employee_id)
    .bind(record.project_id)
    .bind(record.time_from)
    .bind(record.time_to)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

pub async fn read_time_record(pool: &SqlitePool, id: i64) -> Result<TimeRecord> {
    Ok(sqlx::query_as::<_, TimeRecord>(
        "SELECT id, employee_id, project_id, time_from, time_to
        FROM time_record WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await?)
}
