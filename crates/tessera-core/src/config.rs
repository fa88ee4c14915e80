//! Configuration module
//!
//! This module provides the process-wide configuration: server, database,
//! upload storage, pagination and authentication settings. It is loaded once
//! at startup and shared read-only afterwards.

use std::env;
use std::path::PathBuf;

// Common constants
const SERVER_PORT: u16 = 4000;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const PAGE_MAX_SIZE: i64 = 50;
const MAX_UPLOAD_SIZE_MB: usize = 64;
const MIN_JWT_SECRET_LEN: usize = 32;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub run_migrations: bool,
    /// Directory served as the public web root (e.g. `./public`).
    pub public_root: PathBuf,
    /// Web path of the uploads directory below the public root (e.g. `/uploads/`).
    pub uploads_dir: String,
    pub page_max_size: i64,
    pub max_upload_size_bytes: usize,
    pub jwt_secret: String,
    pub site_name: String,
    /// Requests handled at once; further requests wait for a slot.
    pub http_concurrency_limit: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        Ok(Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            database_url: env::var("DATABASE_URL")
                .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            run_migrations: env::var("RUN_MIGRATIONS")
                .unwrap_or_else(|_| "true".to_string())
                .to_lowercase()
                .parse()
                .unwrap_or(true),
            public_root: env::var("PUBLIC_ROOT")
                .unwrap_or_else(|_| "./public".to_string())
                .into(),
            uploads_dir: env::var("UPLOADS_DIR").unwrap_or_else(|_| "/uploads/".to_string()),
            page_max_size: env::var("PAGE_MAX_SIZE")
                .unwrap_or_else(|_| PAGE_MAX_SIZE.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PAGE_MAX_SIZE must be a valid number"))?,
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            jwt_secret: env::var("JWT_SECRET")
                .map_err(|_| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            site_name: env::var("SITE_NAME").unwrap_or_else(|_| "Tessera".to_string()),
            http_concurrency_limit: env::var("HTTP_CONCURRENCY_LIMIT")
                .unwrap_or_else(|_| HTTP_CONCURRENCY_LIMIT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be a valid number"))?,
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.page_max_size < 1 {
            return Err(anyhow::anyhow!("PAGE_MAX_SIZE must be at least 1"));
        }

        if self.uploads_dir.contains("..") {
            return Err(anyhow::anyhow!(
                "UPLOADS_DIR must not contain parent directory references"
            ));
        }

        if self.max_upload_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_UPLOAD_SIZE_MB must be at least 1"));
        }

        if self.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT must be at least 1"));
        }

        if self.is_production() && self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            return Err(anyhow::anyhow!(
                "JWT_SECRET must be at least {} characters in production",
                MIN_JWT_SECRET_LEN
            ));
        }

        Ok(())
    }
}
