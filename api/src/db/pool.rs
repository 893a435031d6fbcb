//! Connection pool and schema bootstrap.

use anyhow::Context as _;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a connection pool and create the tables if they don't exist.
pub async fn connect(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await
        .context("Failed to connect to the database")?;
    init_database(&pool).await?;
    Ok(pool)
}

/// Initialize the database with tables if they don't exist.
async fn init_database(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY,
            username VARCHAR(256) NOT NULL UNIQUE,
            email VARCHAR(256) NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            first_name VARCHAR(256) NOT NULL DEFAULT '',
            last_name VARCHAR(256) NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );",
    )
    .execute(pool)
    .await
    .context("Failed to create users table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS user_profiles (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            community_name VARCHAR(256) NOT NULL,
            admin_name VARCHAR(256) NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'pending',
            docs_link TEXT,
            error_message TEXT
        );",
    )
    .execute(pool)
    .await
    .context("Failed to create user_profiles table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS campaigns (
            id UUID PRIMARY KEY,
            user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title VARCHAR(256) NOT NULL,
            money_needed BIGINT NOT NULL CHECK (money_needed >= 0),
            description TEXT NOT NULL,
            image TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );",
    )
    .execute(pool)
    .await
    .context("Failed to create campaigns table")?;

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS donations (
            id UUID PRIMARY KEY,
            campaign_id UUID NOT NULL REFERENCES campaigns(id) ON DELETE CASCADE,
            name VARCHAR(256) NOT NULL,
            email VARCHAR(256) NOT NULL DEFAULT '',
            amount BIGINT NOT NULL CHECK (amount >= 0),
            social_security_number VARCHAR(128) NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        );",
    )
    .execute(pool)
    .await
    .context("Failed to create donations table")?;

    Ok(())
}
