use std::env;

use anyhow::{Context, bail};

pub const DEFAULT_ADMIN_EMAILS: [&str; 2] = ["admin@example.com", "your.admin.email@example.com"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: Option<String>,
    pub store_backend: StoreBackend,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub admin_emails: Vec<String>,
    pub payment_redirect_base: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|v| !v.is_empty());
        let store_backend = match env::var("STORE_BACKEND").ok().as_deref() {
            Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("unknown STORE_BACKEND {other:?}, expected postgres or memory"),
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL must be set for the postgres store");
        }

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let admin_emails = match env::var("ADMIN_EMAILS") {
            Ok(list) => parse_email_list(&list),
            Err(_) => DEFAULT_ADMIN_EMAILS.iter().map(|e| e.to_string()).collect(),
        };
        let payment_redirect_base = env::var("PAYMENT_REDIRECT_BASE")
            .unwrap_or_else(|_| "https://mock-stripe-checkout.com".to_string());

        Ok(Self {
            database_url,
            store_backend,
            host,
            port,
            jwt_secret,
            admin_emails,
            payment_redirect_base,
        })
    }
}

pub fn parse_email_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect()
}

/// For the maintenance binaries, which only talk to the database.
pub fn database_url_from_env() -> anyhow::Result<String> {
    env::var("DATABASE_URL").context("DATABASE_URL is not set")
}
